//! Boot configuration.
//!
//! `BootConfig` names where a program is loaded and where the three vectors point, so a
//! session can be bootstrapped without hand-writing vector bytes.

use crate::cpu::{IRQ_VECTOR, NMI_VECTOR, RESET_VECTOR};
use crate::memory::{BusError, MemoryBus};
use crate::{AddressSpace, ExecutionError, Memory, CPU};

/// Conventional load address for programs: the first byte above the stack page.
pub const DEFAULT_LOAD_ADDRESS: u16 = 0x0200;

/// Program placement and vector contents used to bootstrap a machine.
///
/// # Examples
///
/// ```
/// use cpu6502::BootConfig;
///
/// let config = BootConfig {
///     load_address: 0x8000,
///     ..BootConfig::default()
/// };
///
/// // LDX #$05; DEX
/// let mut cpu = config.boot(&[0xA2, 0x05, 0xCA]).unwrap();
/// assert_eq!(cpu.pc(), 0x8000);
/// cpu.step_n(2).unwrap();
/// assert_eq!(cpu.x(), 0x04);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BootConfig {
    /// Address the program's first byte is written to.
    pub load_address: u16,
    /// Entry point written to the reset vector. Defaults to `load_address`.
    pub reset_vector: Option<u16>,
    /// Handler written to the IRQ/BRK vector, if any.
    pub irq_vector: Option<u16>,
    /// Handler written to the NMI vector, if any.
    pub nmi_vector: Option<u16>,
}

impl Default for BootConfig {
    fn default() -> Self {
        Self {
            load_address: DEFAULT_LOAD_ADDRESS,
            reset_vector: None,
            irq_vector: None,
            nmi_vector: None,
        }
    }
}

impl BootConfig {
    /// Entry point the CPU will start at after reset.
    pub fn entry_point(&self) -> u16 {
        self.reset_vector.unwrap_or(self.load_address)
    }

    /// Writes `program` and the configured vectors into `bus`.
    ///
    /// Vectors left as `None` (other than reset) are not written.
    pub fn install<B: MemoryBus>(&self, bus: &mut B, program: &[u8]) -> Result<(), BusError> {
        let mut addr = self.load_address;
        for &byte in program {
            bus.write(addr, byte)?;
            addr = addr.wrapping_add(1);
        }

        write_vector(bus, RESET_VECTOR, self.entry_point())?;
        if let Some(handler) = self.irq_vector {
            write_vector(bus, IRQ_VECTOR, handler)?;
        }
        if let Some(handler) = self.nmi_vector {
            write_vector(bus, NMI_VECTOR, handler)?;
        }
        Ok(())
    }

    /// Builds a 64KB RAM address space, installs `program`, and returns a reset CPU.
    pub fn boot(&self, program: &[u8]) -> Result<CPU<AddressSpace>, ExecutionError> {
        let mut space = AddressSpace::new();
        space.register_device(0x0000, Box::new(Memory::ram(0x10000)))?;
        self.install(&mut space, program)?;
        log::debug!(
            "booting {} byte program at ${:04X}, entry ${:04X}",
            program.len(),
            self.load_address,
            self.entry_point()
        );
        CPU::new(space)
    }
}

fn write_vector<B: MemoryBus>(bus: &mut B, vector: u16, target: u16) -> Result<(), BusError> {
    let [lo, hi] = target.to_le_bytes();
    bus.write(vector, lo)?;
    bus.write(vector.wrapping_add(1), hi)
}

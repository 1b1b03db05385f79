//! # Memory Bus Abstraction
//!
//! This module provides the `MemoryBus` trait that decouples the CPU from specific
//! memory implementations, and `AddressSpace`, the bus that routes each access to the
//! device registered for that address.
//!
//! ## Design Principles
//!
//! Unlike real 6502 hardware, every access is checked:
//! - Reading or writing an address no device covers fails with `BusError::Unmapped`
//! - Writing a device that rejects mutation fails with `BusError::ReadOnly`
//! - Registering a device over an occupied or out-of-range span fails with
//!   `BusError::RangeConflict` and leaves the address space unchanged

use std::fmt;

use thiserror::Error;

use crate::devices::{Device, DeviceFault};

/// Errors raised by the address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BusError {
    /// A device registration overlaps an existing binding or leaves 0x0000-0xFFFF.
    ///
    /// `end` is inclusive and may exceed 0xFFFF when the device is too large for its base.
    #[error("range ${start:04X}-${end:04X} overlaps a mapped device or lies outside the address space")]
    RangeConflict { start: usize, end: usize },

    /// No device is mapped at the address.
    #[error("no device mapped at ${0:04X}")]
    Unmapped(u16),

    /// The device mapped at the address rejected a write.
    #[error("write to read-only address ${0:04X}")]
    ReadOnly(u16),
}

/// Memory bus trait for CPU to read/write bytes.
///
/// The CPU accesses all memory (RAM, ROM, I/O) through this abstraction.
///
/// # Design
///
/// - `read(&mut self)`: reads may have side effects (I/O registers)
/// - `write(&mut self)`: mutable reference makes side effects explicit
/// - Both return `Result` so unmapped and read-only accesses surface to the caller
pub trait MemoryBus {
    /// Reads a byte from the specified 16-bit address.
    fn read(&mut self, addr: u16) -> Result<u8, BusError>;

    /// Writes a byte to the specified 16-bit address.
    fn write(&mut self, addr: u16, value: u8) -> Result<(), BusError>;

    /// Reads a little-endian word from `addr` and `addr + 1` (wrapping at 0xFFFF).
    fn read_word(&mut self, addr: u16) -> Result<u16, BusError> {
        let lo = self.read(addr)?;
        let hi = self.read(addr.wrapping_add(1))?;
        Ok(u16::from_le_bytes([lo, hi]))
    }

    /// Checks if the IRQ (Interrupt Request) line is active.
    ///
    /// The IRQ line on the 6502 is level-sensitive and shared among all devices: it is
    /// active while ANY device holds it. The CPU polls it at the start of every step.
    ///
    /// Returns `false` by default.
    fn irq_active(&self) -> bool {
        false
    }
}

/// Internal mapping of a device to a base address.
struct DeviceMapping {
    start: u16,
    end: u16,
    device: Box<dyn Device>,
}

impl DeviceMapping {
    fn contains(&self, addr: u16) -> bool {
        self.start <= addr && addr <= self.end
    }
}

/// Address space that routes read/write operations to registered devices.
///
/// `AddressSpace` holds non-overlapping `(start, end, device)` bindings sorted by start
/// address. Each access is forwarded to the owning device with the offset
/// `addr - start`.
///
/// # Examples
///
/// ```rust
/// use cpu6502::{AddressSpace, BusError, Memory};
///
/// let mut space = AddressSpace::new();
///
/// // 16KB RAM at 0x0000-0x3FFF
/// space.register_device(0x0000, Box::new(Memory::ram(0x4000))).unwrap();
///
/// space.write(0x1234, 0x42).unwrap();
/// assert_eq!(space.read(0x1234), Ok(0x42));
///
/// // Nothing is mapped above 0x3FFF
/// assert_eq!(space.read(0x8000), Err(BusError::Unmapped(0x8000)));
/// ```
#[derive(Default)]
pub struct AddressSpace {
    mappings: Vec<DeviceMapping>,
}

impl AddressSpace {
    /// Create a new empty address space.
    pub fn new() -> Self {
        Self {
            mappings: Vec::new(),
        }
    }

    /// Register a device at the specified start address.
    ///
    /// The device occupies `start ..= start + device.len() - 1`. Registration fails with
    /// `BusError::RangeConflict` if the device is empty, runs past 0xFFFF, or overlaps a
    /// device already registered. A rejected device is dropped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu6502::{AddressSpace, BusError, Memory};
    ///
    /// let mut space = AddressSpace::new();
    /// space.register_device(0x0000, Box::new(Memory::ram(0x4000))).unwrap();
    ///
    /// let result = space.register_device(0x1000, Box::new(Memory::ram(0x0400)));
    /// assert_eq!(result, Err(BusError::RangeConflict { start: 0x1000, end: 0x13FF }));
    /// ```
    pub fn register_device(&mut self, start: u16, device: Box<dyn Device>) -> Result<(), BusError> {
        let len = device.len();
        let conflict = BusError::RangeConflict {
            start: start as usize,
            end: (start as usize + len).saturating_sub(1),
        };

        if len == 0 || start as usize + len - 1 > 0xFFFF {
            log::warn!("rejected device registration: {}", conflict);
            return Err(conflict);
        }
        let end = (start as usize + len - 1) as u16;

        if self
            .mappings
            .iter()
            .any(|mapping| start <= mapping.end && mapping.start <= end)
        {
            log::warn!("rejected device registration: {}", conflict);
            return Err(conflict);
        }

        let index = self
            .mappings
            .partition_point(|mapping| mapping.start < start);
        self.mappings.insert(index, DeviceMapping { start, end, device });
        log::debug!("mapped device at ${:04X}-${:04X}", start, end);
        Ok(())
    }

    /// Reads a byte, delegating to the device that owns `addr`.
    pub fn read(&mut self, addr: u16) -> Result<u8, BusError> {
        let mapping = self.find_mapping(addr).ok_or(BusError::Unmapped(addr))?;
        let offset = addr - mapping.start;
        Ok(mapping.device.read(offset))
    }

    /// Writes a byte, delegating to the device that owns `addr`.
    pub fn write(&mut self, addr: u16, value: u8) -> Result<(), BusError> {
        let mapping = self.find_mapping(addr).ok_or(BusError::Unmapped(addr))?;
        let offset = addr - mapping.start;
        mapping
            .device
            .write(offset, value)
            .map_err(|fault| match fault {
                DeviceFault::ReadOnly => BusError::ReadOnly(addr),
            })
    }

    /// Writes `bytes` to consecutive addresses starting at `start`.
    ///
    /// This is a bootstrapping convenience, not a hardware feature. Writing stops at the
    /// first byte the bus rejects; earlier bytes stay written.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu6502::{AddressSpace, Memory};
    ///
    /// let mut space = AddressSpace::new();
    /// space.register_device(0x0000, Box::new(Memory::ram(0x1000))).unwrap();
    /// space.load_bytes(0x0200, &[0xA9, 0x42]).unwrap();
    /// assert_eq!(space.read(0x0201), Ok(0x42));
    /// ```
    pub fn load_bytes(&mut self, start: u16, bytes: &[u8]) -> Result<(), BusError> {
        let mut addr = start;
        for &byte in bytes {
            self.write(addr, byte)?;
            addr = addr.wrapping_add(1);
        }
        Ok(())
    }

    /// Returns true if any mapped device holds the IRQ line.
    pub fn irq_active(&self) -> bool {
        self.mappings.iter().any(|mapping| mapping.device.irq_active())
    }

    /// Iterates over the mapped `(start, end)` ranges in address order. `end` is inclusive.
    pub fn mappings(&self) -> impl Iterator<Item = (u16, u16)> + '_ {
        self.mappings.iter().map(|mapping| (mapping.start, mapping.end))
    }

    /// Number of registered devices.
    pub fn device_count(&self) -> usize {
        self.mappings.len()
    }

    fn find_mapping(&mut self, addr: u16) -> Option<&mut DeviceMapping> {
        // Mappings are sorted and disjoint: the candidate is the last one starting at or below addr.
        let index = self.mappings.partition_point(|mapping| mapping.start <= addr);
        let mapping = self.mappings.get_mut(index.checked_sub(1)?)?;
        mapping.contains(addr).then_some(mapping)
    }
}

impl MemoryBus for AddressSpace {
    fn read(&mut self, addr: u16) -> Result<u8, BusError> {
        AddressSpace::read(self, addr)
    }

    fn write(&mut self, addr: u16, value: u8) -> Result<(), BusError> {
        AddressSpace::write(self, addr, value)
    }

    fn irq_active(&self) -> bool {
        AddressSpace::irq_active(self)
    }
}

impl fmt::Debug for AddressSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.mappings
                    .iter()
                    .map(|mapping| format!("${:04X}-${:04X}", mapping.start, mapping.end)),
            )
            .finish()
    }
}

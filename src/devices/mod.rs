//! Memory-mapped device support for the 6502 emulator.
//!
//! This module provides the `Device` capability that anything attached to the
//! [`AddressSpace`](crate::AddressSpace) implements, and the flat `Memory` device used to
//! host programs.
//!
//! # Architecture
//!
//! - **Device trait**: offset-based read/write over a fixed-length window
//! - **AddressSpace**: routes each access to the device registered for that address
//! - **Memory**: RAM, or ROM when marked read-only
//!
//! New peripherals implement `Device` and are registered like any other; the address
//! space dispatches through the trait object and never needs to know the concrete type.
//!
//! # Example
//!
//! ```rust
//! use cpu6502::{AddressSpace, Memory};
//!
//! let mut space = AddressSpace::new();
//!
//! // 16KB RAM at 0x0000-0x3FFF
//! space.register_device(0x0000, Box::new(Memory::ram(0x4000))).unwrap();
//!
//! // 16KB ROM at 0xC000-0xFFFF
//! space.register_device(0xC000, Box::new(Memory::rom(vec![0xEA; 0x4000]))).unwrap();
//! ```

use thiserror::Error;

pub mod ram;

pub use ram::Memory;

/// Reason a device refused an access.
///
/// The address space translates this into a [`BusError`](crate::BusError) carrying the
/// absolute address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeviceFault {
    /// The device does not accept writes.
    #[error("device is read-only")]
    ReadOnly,
}

/// Abstract interface for memory-mapped hardware devices.
///
/// The address space calls these methods with offset-based addressing (0 to len-1), so a
/// device does not need to know where it is mapped.
///
/// # Design
///
/// - **Offset-based**: Device receives offset (0 to len-1), not absolute address
/// - **Mutable read**: reads of I/O registers may have side effects
/// - **Fallible write**: a device may reject mutation with `DeviceFault`
///
/// # Examples
///
/// ```rust
/// use cpu6502::{Device, DeviceFault};
///
/// struct Latch {
///     value: u8,
/// }
///
/// impl Device for Latch {
///     fn read(&mut self, _offset: u16) -> u8 {
///         self.value
///     }
///
///     fn write(&mut self, _offset: u16, value: u8) -> Result<(), DeviceFault> {
///         self.value = value;
///         Ok(())
///     }
///
///     fn len(&self) -> usize {
///         1
///     }
/// }
/// ```
pub trait Device {
    /// Read byte from device at offset relative to its start address.
    fn read(&mut self, offset: u16) -> u8;

    /// Write byte to device at offset relative to its start address.
    fn write(&mut self, offset: u16, value: u8) -> Result<(), DeviceFault>;

    /// Number of addresses the device occupies (1 to 65536).
    fn len(&self) -> usize;

    /// Returns true if the device occupies no addresses. Such a device cannot be mapped.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true while the device holds the shared IRQ line.
    ///
    /// The line is level-sensitive: the device keeps it asserted until its interrupt
    /// condition is acknowledged through its own registers.
    fn irq_active(&self) -> bool {
        false
    }
}

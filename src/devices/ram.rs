//! Flat memory device.
//!
//! Provides RAM, or ROM when the store is marked read-only.

use super::{Device, DeviceFault};

/// Byte-array backing store sized exactly to its mapped range.
///
/// A `Memory` created with [`Memory::ram`] accepts writes; one created with
/// [`Memory::rom`] rejects them with `DeviceFault::ReadOnly`. Contents can always be
/// initialised through [`Memory::load_bytes`], which is how ROM images are programmed.
///
/// # Examples
///
/// ```rust
/// use cpu6502::{Device, DeviceFault, Memory};
///
/// let mut ram = Memory::ram(1024);
/// ram.write(0x42, 0xAA).unwrap();
/// assert_eq!(ram.read(0x42), 0xAA);
///
/// let mut rom = Memory::rom(vec![0xEA; 16]);
/// assert_eq!(rom.write(0, 0xFF), Err(DeviceFault::ReadOnly));
/// assert_eq!(rom.read(0), 0xEA);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
    data: Vec<u8>,
    read_only: bool,
}

impl Memory {
    /// Create zero-filled writable memory of `len` bytes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu6502::{Device, Memory};
    ///
    /// let ram = Memory::ram(0x10000); // the full 64KB
    /// assert_eq!(ram.len(), 0x10000);
    /// ```
    pub fn ram(len: usize) -> Self {
        Self {
            data: vec![0; len],
            read_only: false,
        }
    }

    /// Create read-only memory holding `data`.
    pub fn rom(data: Vec<u8>) -> Self {
        Self {
            data,
            read_only: true,
        }
    }

    /// Returns true if writes through the bus are rejected.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Switch between RAM and ROM behaviour.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Load bytes at the specified offset, ignoring the read-only setting.
    ///
    /// # Panics
    ///
    /// Panics if `offset + bytes.len()` exceeds the device length.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu6502::{Device, Memory};
    ///
    /// let mut rom = Memory::rom(vec![0; 1024]);
    /// rom.load_bytes(0x100, &[0x01, 0x02, 0x03]);
    ///
    /// assert_eq!(rom.read(0x100), 0x01);
    /// assert_eq!(rom.read(0x102), 0x03);
    /// ```
    pub fn load_bytes(&mut self, offset: u16, bytes: &[u8]) {
        let start = offset as usize;
        let end = start + bytes.len();
        self.data[start..end].copy_from_slice(bytes);
    }

    /// The stored bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

impl Device for Memory {
    fn read(&mut self, offset: u16) -> u8 {
        self.data[offset as usize]
    }

    fn write(&mut self, offset: u16, value: u8) -> Result<(), DeviceFault> {
        if self.read_only {
            return Err(DeviceFault::ReadOnly);
        }
        self.data[offset as usize] = value;
        Ok(())
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

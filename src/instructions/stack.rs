//! # Stack Instructions
//!
//! This module implements stack operations:
//! - PHA: Push Accumulator
//! - PHP: Push Processor Status
//! - PLA: Pull Accumulator
//! - PLP: Pull Processor Status
//!
//! The stack lives in page one (0x0100-0x01FF) and grows downward. SP wraps in both
//! directions without error.

use crate::cpu::{FLAG_B, FLAG_UNUSED};
use crate::memory::{BusError, MemoryBus};
use crate::CPU;

/// Executes the PHA (Push Accumulator) instruction.
pub(crate) fn execute_pha<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), BusError> {
    cpu.push(cpu.a)
}

/// Executes the PHP (Push Processor Status) instruction.
///
/// The pushed copy always has B and bit 5 set, as on hardware.
pub(crate) fn execute_php<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), BusError> {
    cpu.push(cpu.status() | FLAG_B | FLAG_UNUSED)
}

/// Executes the PLA (Pull Accumulator) instruction. Updates N and Z.
pub(crate) fn execute_pla<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), BusError> {
    cpu.a = cpu.pull()?;
    cpu.update_nz(cpu.a);
    Ok(())
}

/// Executes the PLP (Pull Processor Status) instruction.
///
/// Every flag, B included, is taken from the pulled byte. Bit 5 keeps reading as 1.
pub(crate) fn execute_plp<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), BusError> {
    let status = cpu.pull()?;
    cpu.set_status(status);
    Ok(())
}

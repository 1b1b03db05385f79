//! # Shift and Rotate Instructions
//!
//! This module implements ASL, LSR, ROL and ROR, on the accumulator or on memory
//! (read-modify-write). The bit shifted out lands in the carry flag; N and Z are set from
//! the result.

use crate::addressing::Operand;
use crate::memory::{BusError, MemoryBus};
use crate::CPU;

/// Executes the ASL (Arithmetic Shift Left) instruction.
pub(crate) fn execute_asl<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: Operand,
) -> Result<(), BusError> {
    read_modify_write(cpu, operand, |value, _| (value << 1, value & 0x80 != 0))
}

/// Executes the LSR (Logical Shift Right) instruction. N is always cleared.
pub(crate) fn execute_lsr<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: Operand,
) -> Result<(), BusError> {
    read_modify_write(cpu, operand, |value, _| (value >> 1, value & 0x01 != 0))
}

/// Executes the ROL (Rotate Left) instruction. The old carry enters bit 0.
pub(crate) fn execute_rol<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: Operand,
) -> Result<(), BusError> {
    read_modify_write(cpu, operand, |value, carry| {
        ((value << 1) | carry as u8, value & 0x80 != 0)
    })
}

/// Executes the ROR (Rotate Right) instruction. The old carry enters bit 7.
pub(crate) fn execute_ror<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: Operand,
) -> Result<(), BusError> {
    read_modify_write(cpu, operand, |value, carry| {
        ((value >> 1) | ((carry as u8) << 7), value & 0x01 != 0)
    })
}

/// Applies `shift` (value, carry in) -> (result, carry out) to the operand in place.
fn read_modify_write<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: Operand,
    shift: impl FnOnce(u8, bool) -> (u8, bool),
) -> Result<(), BusError> {
    let value = cpu.load(operand)?;
    let (result, carry) = shift(value, cpu.flag_c);
    cpu.store(operand, result)?;
    cpu.flag_c = carry;
    cpu.update_nz(result);
    Ok(())
}

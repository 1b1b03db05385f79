//! # Increment and Decrement Instructions
//!
//! INC and DEC read-modify-write memory; INX, INY, DEX and DEY operate on the index
//! registers. All wrap at the byte boundary and update only N and Z.

use crate::addressing::Operand;
use crate::memory::{BusError, MemoryBus};
use crate::CPU;

/// Executes the INC (Increment Memory) instruction.
pub(crate) fn execute_inc<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: Operand,
) -> Result<(), BusError> {
    let result = cpu.load(operand)?.wrapping_add(1);
    cpu.store(operand, result)?;
    cpu.update_nz(result);
    Ok(())
}

/// Executes the DEC (Decrement Memory) instruction.
pub(crate) fn execute_dec<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: Operand,
) -> Result<(), BusError> {
    let result = cpu.load(operand)?.wrapping_sub(1);
    cpu.store(operand, result)?;
    cpu.update_nz(result);
    Ok(())
}

pub(crate) fn execute_inx<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.x = cpu.x.wrapping_add(1);
    cpu.update_nz(cpu.x);
}

pub(crate) fn execute_iny<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.y = cpu.y.wrapping_add(1);
    cpu.update_nz(cpu.y);
}

pub(crate) fn execute_dex<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.x = cpu.x.wrapping_sub(1);
    cpu.update_nz(cpu.x);
}

pub(crate) fn execute_dey<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.y = cpu.y.wrapping_sub(1);
    cpu.update_nz(cpu.y);
}

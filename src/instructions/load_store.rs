//! # Load and Store Instructions
//!
//! This module implements register loads and stores:
//! - LDA, LDX, LDY: load a register and update N and Z
//! - STA, STX, STY: store a register; no flags are affected
//!
//! Indexed loads that cross a page take one extra cycle. Stores never do; their table
//! cost already includes the fix-up cycle.

use crate::addressing::Operand;
use crate::memory::{BusError, MemoryBus};
use crate::CPU;

/// Executes the LDA (Load Accumulator) instruction.
pub(crate) fn execute_lda<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: Operand,
) -> Result<(), BusError> {
    cpu.a = cpu.load(operand)?;
    cpu.update_nz(cpu.a);
    Ok(())
}

/// Executes the LDX (Load X Register) instruction.
pub(crate) fn execute_ldx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: Operand,
) -> Result<(), BusError> {
    cpu.x = cpu.load(operand)?;
    cpu.update_nz(cpu.x);
    Ok(())
}

/// Executes the LDY (Load Y Register) instruction.
pub(crate) fn execute_ldy<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: Operand,
) -> Result<(), BusError> {
    cpu.y = cpu.load(operand)?;
    cpu.update_nz(cpu.y);
    Ok(())
}

/// Executes the STA (Store Accumulator) instruction.
pub(crate) fn execute_sta<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: Operand,
) -> Result<(), BusError> {
    let value = cpu.a;
    cpu.store(operand, value)
}

/// Executes the STX (Store X Register) instruction.
pub(crate) fn execute_stx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: Operand,
) -> Result<(), BusError> {
    let value = cpu.x;
    cpu.store(operand, value)
}

/// Executes the STY (Store Y Register) instruction.
pub(crate) fn execute_sty<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: Operand,
) -> Result<(), BusError> {
    let value = cpu.y;
    cpu.store(operand, value)
}

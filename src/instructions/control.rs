//! # Control Flow Instructions
//!
//! This module implements control flow operations:
//! - BRK: Force Interrupt
//! - JMP: Jump (absolute and indirect)
//! - JSR: Jump to Subroutine
//! - RTS: Return from Subroutine
//! - RTI: Return from Interrupt
//! - JAM: Halt the processor
//!
//! NOP needs no implementation beyond its table entry.

use crate::addressing::Operand;
use crate::cpu::{CpuState, FLAG_B, FLAG_UNUSED, IRQ_VECTOR};
use crate::memory::{BusError, MemoryBus};
use crate::CPU;

/// Executes the BRK (Force Interrupt) instruction.
///
/// BRK is two bytes long on the 6502: the byte after the opcode is a padding byte, so the
/// return address pushed is the opcode address + 2. The sequence:
/// 1. Push PC+2 (high byte, then low byte)
/// 2. Push status with B and bit 5 set
/// 3. Set the I flag
/// 4. Load PC from the IRQ vector at 0xFFFE/0xFFFF
///
/// Total: 7 cycles.
pub(crate) fn execute_brk<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), BusError> {
    // PC already points past the opcode; skip the padding byte.
    let return_address = cpu.pc.wrapping_add(1);
    cpu.push_word(return_address)?;

    cpu.flag_b = true;
    cpu.push(cpu.status() | FLAG_B | FLAG_UNUSED)?;
    cpu.flag_i = true;

    cpu.pc = cpu.memory.read_word(IRQ_VECTOR)?;
    log::debug!("BRK: ${:04X} -> ${:04X}", return_address, cpu.pc);
    Ok(())
}

/// Executes the JMP (Jump) instruction, absolute or indirect.
pub(crate) fn execute_jmp<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    if let Some(target) = operand.address() {
        cpu.pc = target;
    }
}

/// Executes the JSR (Jump to Subroutine) instruction.
///
/// Pushes the address of the last byte of the JSR (return address - 1), high byte first,
/// then jumps to the target.
pub(crate) fn execute_jsr<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: Operand,
) -> Result<(), BusError> {
    let return_address = cpu.pc.wrapping_sub(1);
    cpu.push_word(return_address)?;
    if let Some(target) = operand.address() {
        cpu.pc = target;
    }
    Ok(())
}

/// Executes the RTS (Return from Subroutine) instruction.
///
/// Pulls the return address pushed by JSR and resumes at the byte after it.
pub(crate) fn execute_rts<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), BusError> {
    let return_address = cpu.pull_word()?;
    cpu.pc = return_address.wrapping_add(1);
    Ok(())
}

/// Executes the RTI (Return from Interrupt) instruction.
///
/// Pulls the status register, then PC. Unlike RTS the pulled address is used as is.
pub(crate) fn execute_rti<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), BusError> {
    let status = cpu.pull()?;
    cpu.set_status(status);
    cpu.pc = cpu.pull_word()?;
    Ok(())
}

/// Executes a JAM opcode.
///
/// The processor locks up with PC on the JAM byte. Only a reset recovers it.
pub(crate) fn execute_jam<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.pc = cpu.pc.wrapping_sub(1);
    cpu.state = CpuState::Halted;
    log::warn!("JAM at ${:04X}, CPU halted", cpu.pc);
}

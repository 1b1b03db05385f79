//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! This module implements arithmetic and logical operations:
//! - ADC: Add with Carry (binary and BCD)
//! - SBC: Subtract with Carry (binary and BCD)
//! - AND, ORA, EOR: bitwise logic on the accumulator
//! - CMP, CPX, CPY: register comparisons
//! - BIT: bit test
//!
//! In decimal mode ADC and SBC produce the BCD result and carry, set Z from the result,
//! and clear N and V.

use crate::addressing::Operand;
use crate::memory::{BusError, MemoryBus};
use crate::CPU;

/// Executes the ADC (Add with Carry) instruction.
///
/// Adds the operand plus the carry flag to the accumulator. Updates N, V, Z and C in
/// binary mode; C and Z in decimal mode.
pub(crate) fn execute_adc<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: Operand,
) -> Result<(), BusError> {
    let value = cpu.load(operand)?;
    if cpu.flag_d {
        add_decimal(cpu, value);
    } else {
        add_binary(cpu, value);
    }
    Ok(())
}

/// Executes the SBC (Subtract with Carry) instruction.
///
/// Subtracts the operand and the inverted carry (borrow) from the accumulator.
pub(crate) fn execute_sbc<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: Operand,
) -> Result<(), BusError> {
    let value = cpu.load(operand)?;
    if cpu.flag_d {
        subtract_decimal(cpu, value);
    } else {
        // A - M - !C == A + !M + C
        add_binary(cpu, !value);
    }
    Ok(())
}

fn add_binary<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) {
    let a = cpu.a;
    let carry_in = cpu.flag_c as u16;

    let result16 = a as u16 + value as u16 + carry_in;
    let result = result16 as u8;

    // Carry flag: Set if result > 255
    cpu.flag_c = result16 > 0xFF;

    // Overflow flag: both operands share a sign the result does not
    cpu.flag_v = ((a ^ result) & (value ^ result) & 0x80) != 0;

    cpu.a = result;
    cpu.update_nz(result);
}

fn add_decimal<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) {
    let a = cpu.a as u16;
    let value = value as u16;

    let mut lo = (a & 0x0F) + (value & 0x0F) + cpu.flag_c as u16;
    if lo > 0x09 {
        lo += 0x06;
    }

    let mut hi = (a >> 4) + (value >> 4) + (lo > 0x0F) as u16;
    if hi > 0x09 {
        hi += 0x06;
    }

    let result = ((lo & 0x0F) | (hi << 4)) as u8;

    cpu.flag_c = hi > 0x0F;
    cpu.flag_z = result == 0;
    cpu.flag_n = false;
    cpu.flag_v = false;
    cpu.a = result;
}

fn subtract_decimal<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) {
    let a = cpu.a as i16;
    let value = value as i16;
    let borrow = !cpu.flag_c as i16;

    let mut lo = (a & 0x0F) - (value & 0x0F) - borrow;
    let lo_borrow = lo & 0x10 != 0;
    if lo_borrow {
        lo -= 0x06;
    }

    let mut hi = (a >> 4) - (value >> 4) - lo_borrow as i16;
    if hi & 0x10 != 0 {
        hi -= 0x06;
    }

    let result = ((lo & 0x0F) | (hi << 4)) as u8;

    // Carry flag: clear on borrow out of the high digit
    cpu.flag_c = hi >= 0;
    cpu.flag_z = result == 0;
    cpu.flag_n = false;
    cpu.flag_v = false;
    cpu.a = result;
}

/// Executes the AND (Logical AND) instruction.
pub(crate) fn execute_and<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: Operand,
) -> Result<(), BusError> {
    let value = cpu.load(operand)?;
    cpu.a &= value;
    cpu.update_nz(cpu.a);
    Ok(())
}

/// Executes the ORA (Logical Inclusive OR) instruction.
pub(crate) fn execute_ora<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: Operand,
) -> Result<(), BusError> {
    let value = cpu.load(operand)?;
    cpu.a |= value;
    cpu.update_nz(cpu.a);
    Ok(())
}

/// Executes the EOR (Exclusive OR) instruction.
pub(crate) fn execute_eor<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: Operand,
) -> Result<(), BusError> {
    let value = cpu.load(operand)?;
    cpu.a ^= value;
    cpu.update_nz(cpu.a);
    Ok(())
}

/// Executes the CMP (Compare Accumulator) instruction.
pub(crate) fn execute_cmp<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: Operand,
) -> Result<(), BusError> {
    let value = cpu.load(operand)?;
    let register = cpu.a;
    compare(cpu, register, value);
    Ok(())
}

/// Executes the CPX (Compare X Register) instruction.
pub(crate) fn execute_cpx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: Operand,
) -> Result<(), BusError> {
    let value = cpu.load(operand)?;
    let register = cpu.x;
    compare(cpu, register, value);
    Ok(())
}

/// Executes the CPY (Compare Y Register) instruction.
pub(crate) fn execute_cpy<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: Operand,
) -> Result<(), BusError> {
    let value = cpu.load(operand)?;
    let register = cpu.y;
    compare(cpu, register, value);
    Ok(())
}

/// Sets C if `register >= value`, Z if equal, and N from bit 7 of the difference.
/// Decimal mode has no effect on comparisons.
fn compare<M: MemoryBus>(cpu: &mut CPU<M>, register: u8, value: u8) {
    cpu.flag_c = register >= value;
    cpu.update_nz(register.wrapping_sub(value));
}

/// Executes the BIT (Bit Test) instruction.
///
/// Z is set from `A & M`; N and V are copied from bits 7 and 6 of the operand. The
/// accumulator is unchanged.
pub(crate) fn execute_bit<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: Operand,
) -> Result<(), BusError> {
    let value = cpu.load(operand)?;
    cpu.flag_z = (cpu.a & value) == 0;
    cpu.flag_n = (value & 0x80) != 0;
    cpu.flag_v = (value & 0x40) != 0;
    Ok(())
}

//! # 6502 Instruction Implementations
//!
//! This module contains the implementations of all 6502 instructions, organized by category.
//! Each instruction is implemented as a standalone function that takes a mutable reference
//! to the CPU and the operand already resolved by the addressing stage. PC has been advanced
//! past the instruction before any of these run.
//!
//! ## Categories
//!
//! - **alu**: Arithmetic and logic operations (ADC, SBC, AND, ORA, EOR, CMP, CPX, CPY, BIT)
//! - **branches**: Conditional branch instructions (BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS)
//! - **shifts**: Shift and rotate operations (ASL, LSR, ROL, ROR)
//! - **load_store**: Load and store instructions (LDA, LDX, LDY, STA, STX, STY)
//! - **inc_dec**: Increment and decrement operations (INC, DEC, INX, INY, DEX, DEY)
//! - **control**: Control flow instructions (JMP, JSR, RTS, RTI, BRK, NOP, JAM)
//! - **stack**: Stack operations (PHA, PHP, PLA, PLP)
//! - **flags**: Status flag manipulation (CLC, SEC, CLI, SEI, CLD, SED, CLV)
//! - **transfer**: Register transfer operations (TAX, TAY, TXA, TYA, TSX, TXS)

pub mod alu;
pub mod branches;
pub mod control;
pub mod flags;
pub mod inc_dec;
pub mod load_store;
pub mod shifts;
pub mod stack;
pub mod transfer;

use crate::addressing::Operand;
use crate::memory::{BusError, MemoryBus};
use crate::opcodes::Operation;
use crate::CPU;

/// Executes one decoded instruction.
///
/// Returns cycles owed beyond the table's base cost and the page-cross penalty. Only taken
/// branches report any.
pub(crate) fn execute<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operation: Operation,
    operand: Operand,
) -> Result<u8, BusError> {
    match operation {
        Operation::Adc => alu::execute_adc(cpu, operand)?,
        Operation::And => alu::execute_and(cpu, operand)?,
        Operation::Bit => alu::execute_bit(cpu, operand)?,
        Operation::Cmp => alu::execute_cmp(cpu, operand)?,
        Operation::Cpx => alu::execute_cpx(cpu, operand)?,
        Operation::Cpy => alu::execute_cpy(cpu, operand)?,
        Operation::Eor => alu::execute_eor(cpu, operand)?,
        Operation::Ora => alu::execute_ora(cpu, operand)?,
        Operation::Sbc => alu::execute_sbc(cpu, operand)?,

        Operation::Bcc
        | Operation::Bcs
        | Operation::Beq
        | Operation::Bmi
        | Operation::Bne
        | Operation::Bpl
        | Operation::Bvc
        | Operation::Bvs => return Ok(branches::execute_branch(cpu, operation, operand)),

        Operation::Brk => control::execute_brk(cpu)?,
        Operation::Jam => control::execute_jam(cpu),
        Operation::Jmp => control::execute_jmp(cpu, operand),
        Operation::Jsr => control::execute_jsr(cpu, operand)?,
        Operation::Nop => {}
        Operation::Rti => control::execute_rti(cpu)?,
        Operation::Rts => control::execute_rts(cpu)?,

        Operation::Clc
        | Operation::Cld
        | Operation::Cli
        | Operation::Clv
        | Operation::Sec
        | Operation::Sed
        | Operation::Sei => flags::execute_flag(cpu, operation),

        Operation::Dec => inc_dec::execute_dec(cpu, operand)?,
        Operation::Dex => inc_dec::execute_dex(cpu),
        Operation::Dey => inc_dec::execute_dey(cpu),
        Operation::Inc => inc_dec::execute_inc(cpu, operand)?,
        Operation::Inx => inc_dec::execute_inx(cpu),
        Operation::Iny => inc_dec::execute_iny(cpu),

        Operation::Lda => load_store::execute_lda(cpu, operand)?,
        Operation::Ldx => load_store::execute_ldx(cpu, operand)?,
        Operation::Ldy => load_store::execute_ldy(cpu, operand)?,
        Operation::Sta => load_store::execute_sta(cpu, operand)?,
        Operation::Stx => load_store::execute_stx(cpu, operand)?,
        Operation::Sty => load_store::execute_sty(cpu, operand)?,

        Operation::Asl => shifts::execute_asl(cpu, operand)?,
        Operation::Lsr => shifts::execute_lsr(cpu, operand)?,
        Operation::Rol => shifts::execute_rol(cpu, operand)?,
        Operation::Ror => shifts::execute_ror(cpu, operand)?,

        Operation::Pha => stack::execute_pha(cpu)?,
        Operation::Php => stack::execute_php(cpu)?,
        Operation::Pla => stack::execute_pla(cpu)?,
        Operation::Plp => stack::execute_plp(cpu)?,

        Operation::Tax => transfer::execute_tax(cpu),
        Operation::Tay => transfer::execute_tay(cpu),
        Operation::Tsx => transfer::execute_tsx(cpu),
        Operation::Txa => transfer::execute_txa(cpu),
        Operation::Txs => transfer::execute_txs(cpu),
        Operation::Tya => transfer::execute_tya(cpu),
    }

    Ok(0)
}

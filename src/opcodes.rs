//! # Opcode Metadata Table
//!
//! This module contains the 256-entry opcode table that serves as the single source of
//! truth for decoding: each opcode byte maps to an operation, an addressing mode, a base
//! cycle cost and an instruction size.
//!
//! The table covers:
//! - **151 documented instructions** - Official NMOS 6502 opcodes
//! - **12 JAM opcodes** - Undocumented opcodes that lock the processor
//!
//! Every other undocumented opcode has no entry (`None`) and fails to execute with
//! [`ExecutionError::UnimplementedOpcode`](crate::ExecutionError::UnimplementedOpcode).

use crate::addressing::AddressingMode;

/// Operation performed by an instruction, independent of its addressing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
    /// Undocumented processor lock (KIL/HLT). Halts the CPU until reset.
    Jam,
}

impl Operation {
    /// Three-letter assembler mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Operation::Adc => "ADC",
            Operation::And => "AND",
            Operation::Asl => "ASL",
            Operation::Bcc => "BCC",
            Operation::Bcs => "BCS",
            Operation::Beq => "BEQ",
            Operation::Bit => "BIT",
            Operation::Bmi => "BMI",
            Operation::Bne => "BNE",
            Operation::Bpl => "BPL",
            Operation::Brk => "BRK",
            Operation::Bvc => "BVC",
            Operation::Bvs => "BVS",
            Operation::Clc => "CLC",
            Operation::Cld => "CLD",
            Operation::Cli => "CLI",
            Operation::Clv => "CLV",
            Operation::Cmp => "CMP",
            Operation::Cpx => "CPX",
            Operation::Cpy => "CPY",
            Operation::Dec => "DEC",
            Operation::Dex => "DEX",
            Operation::Dey => "DEY",
            Operation::Eor => "EOR",
            Operation::Inc => "INC",
            Operation::Inx => "INX",
            Operation::Iny => "INY",
            Operation::Jmp => "JMP",
            Operation::Jsr => "JSR",
            Operation::Lda => "LDA",
            Operation::Ldx => "LDX",
            Operation::Ldy => "LDY",
            Operation::Lsr => "LSR",
            Operation::Nop => "NOP",
            Operation::Ora => "ORA",
            Operation::Pha => "PHA",
            Operation::Php => "PHP",
            Operation::Pla => "PLA",
            Operation::Plp => "PLP",
            Operation::Rol => "ROL",
            Operation::Ror => "ROR",
            Operation::Rti => "RTI",
            Operation::Rts => "RTS",
            Operation::Sbc => "SBC",
            Operation::Sec => "SEC",
            Operation::Sed => "SED",
            Operation::Sei => "SEI",
            Operation::Sta => "STA",
            Operation::Stx => "STX",
            Operation::Sty => "STY",
            Operation::Tax => "TAX",
            Operation::Tay => "TAY",
            Operation::Tsx => "TSX",
            Operation::Txa => "TXA",
            Operation::Txs => "TXS",
            Operation::Tya => "TYA",
            Operation::Jam => "JAM",
        }
    }

    /// Whether an indexed read that crosses a page costs one extra cycle.
    ///
    /// Stores and read-modify-write instructions always pay the worst case in their base
    /// cycle count, so only pure reads qualify.
    pub const fn page_cross_penalty(self) -> bool {
        matches!(
            self,
            Operation::Adc
                | Operation::And
                | Operation::Cmp
                | Operation::Eor
                | Operation::Lda
                | Operation::Ldx
                | Operation::Ldy
                | Operation::Ora
                | Operation::Sbc
        )
    }
}

/// Metadata for a single 6502 opcode.
///
/// # Fields
///
/// - `operation`: What the instruction does
/// - `addressing_mode`: How the instruction interprets operand bytes
/// - `base_cycles`: Minimum cycle cost (page-crossing and branch penalties added dynamically)
/// - `size_bytes`: Total instruction size including opcode and operands (1-3 bytes)
///
/// # Examples
///
/// ```
/// use cpu6502::{AddressingMode, Operation, OPCODE_TABLE};
///
/// // Look up LDA immediate (opcode 0xA9)
/// let lda_imm = OPCODE_TABLE[0xA9].unwrap();
/// assert_eq!(lda_imm.operation, Operation::Lda);
/// assert_eq!(lda_imm.mnemonic(), "LDA");
/// assert_eq!(lda_imm.addressing_mode, AddressingMode::Immediate);
/// assert_eq!(lda_imm.base_cycles, 2);
/// assert_eq!(lda_imm.size_bytes, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeMetadata {
    /// Operation performed by the instruction.
    pub operation: Operation,

    /// Addressing mode for this instruction.
    pub addressing_mode: AddressingMode,

    /// Base cycle cost (before page crossing and branch penalties).
    pub base_cycles: u8,

    /// Total instruction size in bytes (opcode + operands).
    pub size_bytes: u8,
}

impl OpcodeMetadata {
    /// Three-letter assembler mnemonic.
    pub const fn mnemonic(&self) -> &'static str {
        self.operation.mnemonic()
    }
}

const fn entry(
    operation: Operation,
    addressing_mode: AddressingMode,
    base_cycles: u8,
) -> Option<OpcodeMetadata> {
    Some(OpcodeMetadata {
        operation,
        addressing_mode,
        base_cycles,
        size_bytes: 1 + addressing_mode.operand_bytes(),
    })
}

/// 256-entry opcode table indexed by opcode byte value.
///
/// `None` marks an opcode with no table entry.
///
/// # Examples
///
/// ```
/// use cpu6502::OPCODE_TABLE;
///
/// let brk = OPCODE_TABLE[0x00].unwrap();
/// assert_eq!(brk.mnemonic(), "BRK");
/// assert_eq!(brk.base_cycles, 7);
///
/// // Undocumented SLO (zp,X) has no entry
/// assert!(OPCODE_TABLE[0x03].is_none());
/// ```
pub const OPCODE_TABLE: [Option<OpcodeMetadata>; 256] = build_table();

const fn build_table() -> [Option<OpcodeMetadata>; 256] {
    use AddressingMode::*;
    use Operation::*;

    let mut t: [Option<OpcodeMetadata>; 256] = [None; 256];

    // Load / store
    t[0xA9] = entry(Lda, Immediate, 2);
    t[0xA5] = entry(Lda, ZeroPage, 3);
    t[0xB5] = entry(Lda, ZeroPageX, 4);
    t[0xAD] = entry(Lda, Absolute, 4);
    t[0xBD] = entry(Lda, AbsoluteX, 4);
    t[0xB9] = entry(Lda, AbsoluteY, 4);
    t[0xA1] = entry(Lda, IndirectX, 6);
    t[0xB1] = entry(Lda, IndirectY, 5);

    t[0xA2] = entry(Ldx, Immediate, 2);
    t[0xA6] = entry(Ldx, ZeroPage, 3);
    t[0xB6] = entry(Ldx, ZeroPageY, 4);
    t[0xAE] = entry(Ldx, Absolute, 4);
    t[0xBE] = entry(Ldx, AbsoluteY, 4);

    t[0xA0] = entry(Ldy, Immediate, 2);
    t[0xA4] = entry(Ldy, ZeroPage, 3);
    t[0xB4] = entry(Ldy, ZeroPageX, 4);
    t[0xAC] = entry(Ldy, Absolute, 4);
    t[0xBC] = entry(Ldy, AbsoluteX, 4);

    t[0x85] = entry(Sta, ZeroPage, 3);
    t[0x95] = entry(Sta, ZeroPageX, 4);
    t[0x8D] = entry(Sta, Absolute, 4);
    t[0x9D] = entry(Sta, AbsoluteX, 5);
    t[0x99] = entry(Sta, AbsoluteY, 5);
    t[0x81] = entry(Sta, IndirectX, 6);
    t[0x91] = entry(Sta, IndirectY, 6);

    t[0x86] = entry(Stx, ZeroPage, 3);
    t[0x96] = entry(Stx, ZeroPageY, 4);
    t[0x8E] = entry(Stx, Absolute, 4);

    t[0x84] = entry(Sty, ZeroPage, 3);
    t[0x94] = entry(Sty, ZeroPageX, 4);
    t[0x8C] = entry(Sty, Absolute, 4);

    // Arithmetic and logic
    t[0x69] = entry(Adc, Immediate, 2);
    t[0x65] = entry(Adc, ZeroPage, 3);
    t[0x75] = entry(Adc, ZeroPageX, 4);
    t[0x6D] = entry(Adc, Absolute, 4);
    t[0x7D] = entry(Adc, AbsoluteX, 4);
    t[0x79] = entry(Adc, AbsoluteY, 4);
    t[0x61] = entry(Adc, IndirectX, 6);
    t[0x71] = entry(Adc, IndirectY, 5);

    t[0xE9] = entry(Sbc, Immediate, 2);
    t[0xE5] = entry(Sbc, ZeroPage, 3);
    t[0xF5] = entry(Sbc, ZeroPageX, 4);
    t[0xED] = entry(Sbc, Absolute, 4);
    t[0xFD] = entry(Sbc, AbsoluteX, 4);
    t[0xF9] = entry(Sbc, AbsoluteY, 4);
    t[0xE1] = entry(Sbc, IndirectX, 6);
    t[0xF1] = entry(Sbc, IndirectY, 5);

    t[0x29] = entry(And, Immediate, 2);
    t[0x25] = entry(And, ZeroPage, 3);
    t[0x35] = entry(And, ZeroPageX, 4);
    t[0x2D] = entry(And, Absolute, 4);
    t[0x3D] = entry(And, AbsoluteX, 4);
    t[0x39] = entry(And, AbsoluteY, 4);
    t[0x21] = entry(And, IndirectX, 6);
    t[0x31] = entry(And, IndirectY, 5);

    t[0x09] = entry(Ora, Immediate, 2);
    t[0x05] = entry(Ora, ZeroPage, 3);
    t[0x15] = entry(Ora, ZeroPageX, 4);
    t[0x0D] = entry(Ora, Absolute, 4);
    t[0x1D] = entry(Ora, AbsoluteX, 4);
    t[0x19] = entry(Ora, AbsoluteY, 4);
    t[0x01] = entry(Ora, IndirectX, 6);
    t[0x11] = entry(Ora, IndirectY, 5);

    t[0x49] = entry(Eor, Immediate, 2);
    t[0x45] = entry(Eor, ZeroPage, 3);
    t[0x55] = entry(Eor, ZeroPageX, 4);
    t[0x4D] = entry(Eor, Absolute, 4);
    t[0x5D] = entry(Eor, AbsoluteX, 4);
    t[0x59] = entry(Eor, AbsoluteY, 4);
    t[0x41] = entry(Eor, IndirectX, 6);
    t[0x51] = entry(Eor, IndirectY, 5);

    t[0xC9] = entry(Cmp, Immediate, 2);
    t[0xC5] = entry(Cmp, ZeroPage, 3);
    t[0xD5] = entry(Cmp, ZeroPageX, 4);
    t[0xCD] = entry(Cmp, Absolute, 4);
    t[0xDD] = entry(Cmp, AbsoluteX, 4);
    t[0xD9] = entry(Cmp, AbsoluteY, 4);
    t[0xC1] = entry(Cmp, IndirectX, 6);
    t[0xD1] = entry(Cmp, IndirectY, 5);

    t[0xE0] = entry(Cpx, Immediate, 2);
    t[0xE4] = entry(Cpx, ZeroPage, 3);
    t[0xEC] = entry(Cpx, Absolute, 4);

    t[0xC0] = entry(Cpy, Immediate, 2);
    t[0xC4] = entry(Cpy, ZeroPage, 3);
    t[0xCC] = entry(Cpy, Absolute, 4);

    t[0x24] = entry(Bit, ZeroPage, 3);
    t[0x2C] = entry(Bit, Absolute, 4);

    // Increment / decrement
    t[0xE6] = entry(Inc, ZeroPage, 5);
    t[0xF6] = entry(Inc, ZeroPageX, 6);
    t[0xEE] = entry(Inc, Absolute, 6);
    t[0xFE] = entry(Inc, AbsoluteX, 7);

    t[0xC6] = entry(Dec, ZeroPage, 5);
    t[0xD6] = entry(Dec, ZeroPageX, 6);
    t[0xCE] = entry(Dec, Absolute, 6);
    t[0xDE] = entry(Dec, AbsoluteX, 7);

    t[0xE8] = entry(Inx, Implied, 2);
    t[0xC8] = entry(Iny, Implied, 2);
    t[0xCA] = entry(Dex, Implied, 2);
    t[0x88] = entry(Dey, Implied, 2);

    // Shifts and rotates
    t[0x0A] = entry(Asl, Accumulator, 2);
    t[0x06] = entry(Asl, ZeroPage, 5);
    t[0x16] = entry(Asl, ZeroPageX, 6);
    t[0x0E] = entry(Asl, Absolute, 6);
    t[0x1E] = entry(Asl, AbsoluteX, 7);

    t[0x4A] = entry(Lsr, Accumulator, 2);
    t[0x46] = entry(Lsr, ZeroPage, 5);
    t[0x56] = entry(Lsr, ZeroPageX, 6);
    t[0x4E] = entry(Lsr, Absolute, 6);
    t[0x5E] = entry(Lsr, AbsoluteX, 7);

    t[0x2A] = entry(Rol, Accumulator, 2);
    t[0x26] = entry(Rol, ZeroPage, 5);
    t[0x36] = entry(Rol, ZeroPageX, 6);
    t[0x2E] = entry(Rol, Absolute, 6);
    t[0x3E] = entry(Rol, AbsoluteX, 7);

    t[0x6A] = entry(Ror, Accumulator, 2);
    t[0x66] = entry(Ror, ZeroPage, 5);
    t[0x76] = entry(Ror, ZeroPageX, 6);
    t[0x6E] = entry(Ror, Absolute, 6);
    t[0x7E] = entry(Ror, AbsoluteX, 7);

    // Branches
    t[0x90] = entry(Bcc, Relative, 2);
    t[0xB0] = entry(Bcs, Relative, 2);
    t[0xF0] = entry(Beq, Relative, 2);
    t[0xD0] = entry(Bne, Relative, 2);
    t[0x30] = entry(Bmi, Relative, 2);
    t[0x10] = entry(Bpl, Relative, 2);
    t[0x50] = entry(Bvc, Relative, 2);
    t[0x70] = entry(Bvs, Relative, 2);

    // Control flow
    t[0x00] = entry(Brk, Implied, 7);
    t[0x4C] = entry(Jmp, Absolute, 3);
    t[0x6C] = entry(Jmp, Indirect, 5);
    t[0x20] = entry(Jsr, Absolute, 6);
    t[0x60] = entry(Rts, Implied, 6);
    t[0x40] = entry(Rti, Implied, 6);
    t[0xEA] = entry(Nop, Implied, 2);

    // Stack
    t[0x48] = entry(Pha, Implied, 3);
    t[0x08] = entry(Php, Implied, 3);
    t[0x68] = entry(Pla, Implied, 4);
    t[0x28] = entry(Plp, Implied, 4);

    // Flags
    t[0x18] = entry(Clc, Implied, 2);
    t[0x38] = entry(Sec, Implied, 2);
    t[0x58] = entry(Cli, Implied, 2);
    t[0x78] = entry(Sei, Implied, 2);
    t[0xB8] = entry(Clv, Implied, 2);
    t[0xD8] = entry(Cld, Implied, 2);
    t[0xF8] = entry(Sed, Implied, 2);

    // Transfers
    t[0xAA] = entry(Tax, Implied, 2);
    t[0xA8] = entry(Tay, Implied, 2);
    t[0x8A] = entry(Txa, Implied, 2);
    t[0x98] = entry(Tya, Implied, 2);
    t[0xBA] = entry(Tsx, Implied, 2);
    t[0x9A] = entry(Txs, Implied, 2);

    // Processor lock
    t[0x02] = entry(Jam, Implied, 2);
    t[0x12] = entry(Jam, Implied, 2);
    t[0x22] = entry(Jam, Implied, 2);
    t[0x32] = entry(Jam, Implied, 2);
    t[0x42] = entry(Jam, Implied, 2);
    t[0x52] = entry(Jam, Implied, 2);
    t[0x62] = entry(Jam, Implied, 2);
    t[0x72] = entry(Jam, Implied, 2);
    t[0x92] = entry(Jam, Implied, 2);
    t[0xB2] = entry(Jam, Implied, 2);
    t[0xD2] = entry(Jam, Implied, 2);
    t[0xF2] = entry(Jam, Implied, 2);

    t
}

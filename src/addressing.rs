//! # Addressing Modes
//!
//! This module defines the addressing modes supported by the 6502 processor and the
//! resolver that turns the bytes following an opcode into an [`Operand`].
//!
//! Resolution reads the operand bytes at `PC + 1 ..`, computes the effective address (or
//! immediate value), and leaves `PC` pointing at the next instruction. Zero page indexing
//! and zero page pointer fetches wrap within page zero.

use crate::memory::{BusError, MemoryBus};
use crate::CPU;

/// 6502 addressing mode enumeration.
///
/// The addressing mode determines how the CPU interprets the operand bytes
/// that follow an opcode and how it calculates the effective memory address
/// for the operation.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implied, Accumulator
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, Relative, IndirectX, IndirectY
/// - **2 bytes**: Absolute, AbsoluteX, AbsoluteY, Indirect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// No operand, operation implied by instruction.
    ///
    /// Examples: CLC, RTS, NOP
    Implied,

    /// Operates directly on the accumulator register.
    ///
    /// Examples: LSR A, ROL A, ASL A
    Accumulator,

    /// 8-bit constant operand in instruction.
    ///
    /// Example: LDA #$10
    Immediate,

    /// 8-bit address in zero page (0x00-0xFF).
    ///
    /// Example: LDA $80
    ZeroPage,

    /// Zero page address indexed by X register, wrapping within zero page.
    ///
    /// Example: LDA $80,X
    ZeroPageX,

    /// Zero page address indexed by Y register, wrapping within zero page.
    ///
    /// Example: LDX $80,Y
    ZeroPageY,

    /// Signed 8-bit offset for branch instructions, relative to the next instruction.
    ///
    /// Example: BEQ label
    Relative,

    /// Full 16-bit address.
    ///
    /// Example: JMP $1234
    Absolute,

    /// 16-bit address indexed by X register.
    ///
    /// Example: LDA $1234,X
    AbsoluteX,

    /// 16-bit address indexed by Y register.
    ///
    /// Example: LDA $1234,Y
    AbsoluteY,

    /// Indirect jump through 16-bit pointer. Only used by JMP.
    ///
    /// Example: JMP ($FFFC)
    Indirect,

    /// Indexed indirect: (ZP + X) then dereference.
    ///
    /// Example: LDA ($40,X)
    IndirectX,

    /// Indirect indexed: ZP dereference then + Y.
    ///
    /// Example: LDA ($40),Y
    IndirectY,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    pub const fn operand_bytes(self) -> u8 {
        match self {
            AddressingMode::Implied | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Relative
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }
}

/// Resolved operand of an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operand {
    /// No operand.
    Implied,
    /// The accumulator register.
    Accumulator,
    /// A constant taken from the instruction stream.
    Immediate(u8),
    /// An effective address. For relative and jump modes this is the target address.
    ///
    /// `page_crossed` is set when indexing (or a taken branch) moved the address into a
    /// different page than its base.
    Memory { address: u16, page_crossed: bool },
}

impl Operand {
    /// Effective address, or `None` for register and immediate operands.
    pub(crate) fn address(self) -> Option<u16> {
        match self {
            Operand::Memory { address, .. } => Some(address),
            _ => None,
        }
    }

    pub(crate) fn page_crossed(self) -> bool {
        matches!(
            self,
            Operand::Memory {
                page_crossed: true,
                ..
            }
        )
    }
}

fn pages_differ(a: u16, b: u16) -> bool {
    (a & 0xFF00) != (b & 0xFF00)
}

impl<M: MemoryBus> CPU<M> {
    /// Resolves the operand of the instruction whose opcode sits at `PC`.
    ///
    /// On success `PC` points at the following instruction. On failure `PC` is left
    /// wherever the failing fetch happened; the caller restores its snapshot.
    pub(crate) fn resolve_operand(&mut self, mode: AddressingMode) -> Result<Operand, BusError> {
        let opcode_addr = self.pc;
        let operand_addr = opcode_addr.wrapping_add(1);
        self.pc = opcode_addr.wrapping_add(1 + mode.operand_bytes() as u16);

        let operand = match mode {
            AddressingMode::Implied => Operand::Implied,
            AddressingMode::Accumulator => Operand::Accumulator,
            AddressingMode::Immediate => Operand::Immediate(self.memory.read(operand_addr)?),
            AddressingMode::ZeroPage => {
                let zp = self.memory.read(operand_addr)?;
                Operand::Memory {
                    address: zp as u16,
                    page_crossed: false,
                }
            }
            AddressingMode::ZeroPageX => {
                let zp = self.memory.read(operand_addr)?;
                Operand::Memory {
                    address: zp.wrapping_add(self.x) as u16,
                    page_crossed: false,
                }
            }
            AddressingMode::ZeroPageY => {
                let zp = self.memory.read(operand_addr)?;
                Operand::Memory {
                    address: zp.wrapping_add(self.y) as u16,
                    page_crossed: false,
                }
            }
            AddressingMode::Relative => {
                let offset = self.memory.read(operand_addr)? as i8;
                let next = self.pc;
                let target = next.wrapping_add_signed(offset as i16);
                Operand::Memory {
                    address: target,
                    page_crossed: pages_differ(next, target),
                }
            }
            AddressingMode::Absolute => Operand::Memory {
                address: self.memory.read_word(operand_addr)?,
                page_crossed: false,
            },
            AddressingMode::AbsoluteX => {
                let base = self.memory.read_word(operand_addr)?;
                let address = base.wrapping_add(self.x as u16);
                Operand::Memory {
                    address,
                    page_crossed: pages_differ(base, address),
                }
            }
            AddressingMode::AbsoluteY => {
                let base = self.memory.read_word(operand_addr)?;
                let address = base.wrapping_add(self.y as u16);
                Operand::Memory {
                    address,
                    page_crossed: pages_differ(base, address),
                }
            }
            AddressingMode::Indirect => {
                let pointer = self.memory.read_word(operand_addr)?;
                // NMOS bug: the high byte is fetched from the same page as the low byte.
                let lo = self.memory.read(pointer)?;
                let hi = self
                    .memory
                    .read((pointer & 0xFF00) | (pointer.wrapping_add(1) & 0x00FF))?;
                Operand::Memory {
                    address: u16::from_le_bytes([lo, hi]),
                    page_crossed: false,
                }
            }
            AddressingMode::IndirectX => {
                let zp = self.memory.read(operand_addr)?.wrapping_add(self.x);
                Operand::Memory {
                    address: self.read_zero_page_word(zp)?,
                    page_crossed: false,
                }
            }
            AddressingMode::IndirectY => {
                let zp = self.memory.read(operand_addr)?;
                let base = self.read_zero_page_word(zp)?;
                let address = base.wrapping_add(self.y as u16);
                Operand::Memory {
                    address,
                    page_crossed: pages_differ(base, address),
                }
            }
        };

        Ok(operand)
    }

    /// Reads a little-endian pointer from page zero; the high byte wraps to $00 after $FF.
    fn read_zero_page_word(&mut self, zp: u8) -> Result<u16, BusError> {
        let lo = self.memory.read(zp as u16)?;
        let hi = self.memory.read(zp.wrapping_add(1) as u16)?;
        Ok(u16::from_le_bytes([lo, hi]))
    }

    /// Reads the value an operand refers to.
    pub(crate) fn load(&mut self, operand: Operand) -> Result<u8, BusError> {
        match operand {
            Operand::Immediate(value) => Ok(value),
            Operand::Accumulator => Ok(self.a),
            Operand::Memory { address, .. } => self.memory.read(address),
            Operand::Implied => Ok(0),
        }
    }

    /// Writes a value back to where an operand refers to.
    pub(crate) fn store(&mut self, operand: Operand, value: u8) -> Result<(), BusError> {
        match operand {
            Operand::Accumulator => {
                self.a = value;
                Ok(())
            }
            Operand::Memory { address, .. } => self.memory.write(address, value),
            Operand::Immediate(_) | Operand::Implied => Ok(()),
        }
    }
}

//! # 6502 CPU Emulator Core
//!
//! A cycle-stepped NMOS 6502 CPU emulator over a device-mapped 64KB address space.
//!
//! This crate provides the processor (registers, status flags, every documented opcode,
//! BCD arithmetic, IRQ/NMI/BRK handling), a trait-based memory bus, and an
//! [`AddressSpace`] that routes each access to the [`Device`] registered for it.
//!
//! ## Quick Start
//!
//! ```rust
//! use cpu6502::{AddressSpace, Memory, CPU};
//!
//! let mut space = AddressSpace::new();
//!
//! // 64KB of RAM covering the whole address space
//! space.register_device(0x0000, Box::new(Memory::ram(0x10000))).unwrap();
//!
//! // Reset vector points to program start at 0x0200
//! space.load_bytes(0xFFFC, &[0x00, 0x02]).unwrap();
//!
//! // LDA #$49; SED; ADC #$99
//! space.load_bytes(0x0200, &[0xA9, 0x49, 0xF8, 0x69, 0x99]).unwrap();
//!
//! let mut cpu = CPU::new(space).unwrap();
//! cpu.step_n(3).unwrap();
//!
//! assert_eq!(cpu.a(), 0x48);
//! assert!(cpu.flag_c());
//! ```
//!
//! ## Architecture
//!
//! - **Modularity**: CPU state is separated from memory via the `MemoryBus` trait
//! - **Checked bus**: unmapped and read-only accesses are errors, never silent
//! - **Atomic steps**: a failed step leaves the registers as they were and halts the CPU
//! - **Table-Driven Design**: all opcode metadata in a single source of truth
//!
//! ## Modules
//!
//! - `cpu` - CPU state and execution logic
//! - `memory` - MemoryBus trait and the AddressSpace router
//! - `devices` - Device trait and the flat Memory device
//! - `opcodes` - Opcode metadata table
//! - `addressing` - Addressing mode enumerations and operand resolution
//! - `config` - Boot helpers for loading a program into a fresh machine
//!
//! ## Logging
//!
//! The crate logs through the `log` facade: every executed instruction at `trace`,
//! resets, interrupts and device mappings at `debug`, halts and rejected operations at
//! `warn`. Install any `log` backend to see them.

use thiserror::Error;

pub mod addressing;
pub mod config;
pub mod cpu;
pub mod devices;
pub mod memory;
pub mod opcodes;

// Internal instruction implementations (not part of public API)
mod instructions;

// Re-export public API
pub use addressing::AddressingMode;
pub use config::{BootConfig, DEFAULT_LOAD_ADDRESS};
pub use cpu::{CpuState, Registers, CPU};
pub use devices::{Device, DeviceFault, Memory};
pub use memory::{AddressSpace, BusError, MemoryBus};
pub use opcodes::{OpcodeMetadata, Operation, OPCODE_TABLE};

/// Errors that can occur during CPU execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// The opcode at `address` has no entry in the opcode table.
    ///
    /// The CPU state is untouched: PC still points at the offending byte.
    #[error("opcode ${opcode:02X} at ${address:04X} is not implemented")]
    UnimplementedOpcode { opcode: u8, address: u16 },

    /// A bus access failed part-way through the step. The CPU has halted.
    #[error("bus fault: {0}")]
    Bus(#[from] BusError),

    /// The CPU is halted and will not step until reset.
    #[error("CPU halted at ${pc:04X}")]
    Halted { pc: u16 },
}

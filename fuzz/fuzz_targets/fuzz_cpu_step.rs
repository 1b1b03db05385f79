//! Fuzz target for CPU step execution.
//!
//! This target creates arbitrary CPU states, memory contents and interrupt lines over a
//! partially mapped address space, then executes one step and checks the error contract.

#![no_main]

use arbitrary::Arbitrary;
use cpu6502::{AddressSpace, ExecutionError, Memory, CPU, OPCODE_TABLE};
use libfuzzer_sys::fuzz_target;

/// Arbitrary CPU initial state for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    /// Packed status register
    status: u8,
    irq: bool,
    nmi: bool,
}

/// Memory region for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzMemory {
    /// Bytes at the PC location (instruction + operands)
    instruction_bytes: [u8; 3],
    /// Zero page contents
    zero_page: [u8; 256],
    /// Stack page contents
    stack_page: [u8; 256],
    /// Small region of memory for testing absolute addressing
    main_memory: [u8; 256],
    /// IRQ/BRK vector
    irq_vector: u16,
}

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    memory: FuzzMemory,
    /// Map the ROM at 0xC000 read-only to exercise write faults
    rom_read_only: bool,
}

fuzz_target!(|input: FuzzInput| {
    // RAM 0x0000-0x7FFF, hole at 0x8000-0xBFFF, ROM 0xC000-0xFFFF
    let mut ram = Memory::ram(0x8000);
    ram.load_bytes(0x0000, &input.memory.zero_page);
    ram.load_bytes(0x0100, &input.memory.stack_page);
    ram.load_bytes(0x4000, &input.memory.main_memory);

    let mut rom = Memory::ram(0x4000);
    rom.load_bytes(0x0000, &input.memory.instruction_bytes);
    rom.load_bytes(0x3FFC, &[0x00, 0xC0]);
    rom.load_bytes(0x3FFE, &input.memory.irq_vector.to_le_bytes());
    rom.set_read_only(input.rom_read_only);

    let mut space = AddressSpace::new();
    if space.register_device(0x0000, Box::new(ram)).is_err()
        || space.register_device(0xC000, Box::new(rom)).is_err()
    {
        panic!("disjoint devices must register");
    }

    let mut cpu = match CPU::new(space) {
        Ok(cpu) => cpu,
        Err(err) => panic!("reset vector is mapped: {}", err),
    };

    cpu.set_a(input.cpu_state.a);
    cpu.set_x(input.cpu_state.x);
    cpu.set_y(input.cpu_state.y);
    cpu.set_sp(input.cpu_state.sp);
    cpu.set_status(input.cpu_state.status);
    if input.cpu_state.irq {
        cpu.assert_irq();
    }
    if input.cpu_state.nmi {
        cpu.assert_nmi();
    }

    let before = cpu.registers();

    match cpu.step() {
        Ok(cycles) => {
            assert!((2..=7).contains(&cycles));
            assert_eq!(cpu.cycles(), cycles);
        }
        Err(ExecutionError::UnimplementedOpcode { opcode, address }) => {
            assert_eq!(address, 0xC000);
            assert!(OPCODE_TABLE[opcode as usize].is_none());
            assert_eq!(cpu.registers(), before);
            assert!(!cpu.is_halted());
        }
        Err(ExecutionError::Bus(_)) => {
            // Failed steps are atomic for registers
            assert_eq!(cpu.registers(), before);
            assert!(cpu.is_halted());
            assert_eq!(cpu.cycles(), 0);
        }
        Err(ExecutionError::Halted { .. }) => panic!("fresh CPU cannot be halted"),
    }

    assert_eq!(cpu.status() & 0x20, 0x20);
});

//! Tests for reset, halting, bus faults and the step error contract.

use cpu6502::{AddressSpace, BusError, CpuState, ExecutionError, Memory, CPU};

/// RAM at 0x0000-0x7FFF, ROM at 0xC000-0xFFFF with the reset vector pointing at 0xC000.
fn setup_cpu(rom_program: &[u8]) -> CPU<AddressSpace> {
    let mut rom = Memory::rom(vec![0xEA; 0x4000]);
    rom.load_bytes(0x0000, rom_program);
    rom.load_bytes(0x3FFC, &[0x00, 0xC0]);

    let mut space = AddressSpace::new();
    space
        .register_device(0x0000, Box::new(Memory::ram(0x8000)))
        .unwrap();
    space.register_device(0xC000, Box::new(rom)).unwrap();
    CPU::new(space).unwrap()
}

// ========== Reset ==========

#[test]
fn test_reset_state() {
    let cpu = setup_cpu(&[]);

    assert_eq!(cpu.pc(), 0xC000);
    assert_eq!(cpu.a(), 0x00);
    assert_eq!(cpu.x(), 0x00);
    assert_eq!(cpu.y(), 0x00);
    assert_eq!(cpu.sp(), 0xFF);
    assert_eq!(cpu.status(), 0x20);
    assert_eq!(cpu.cycles(), 0);
    assert_eq!(cpu.state(), CpuState::Fetching);
}

#[test]
fn test_reset_clears_registers_and_pending_interrupts() {
    // LDA #$12; LDX #$34; LDY #$56; TXS; SEC; SED
    let mut cpu = setup_cpu(&[0xA9, 0x12, 0xA2, 0x34, 0xA0, 0x56, 0x9A, 0x38, 0xF8]);
    cpu.step_n(6).unwrap();
    assert_eq!(cpu.y(), 0x56);
    assert_eq!(cpu.sp(), 0x34);
    cpu.assert_irq();
    cpu.assert_nmi();

    cpu.reset().unwrap();

    assert_eq!(cpu.a(), 0x00);
    assert_eq!(cpu.x(), 0x00);
    assert_eq!(cpu.y(), 0x00);
    assert_eq!(cpu.sp(), 0xFF);
    assert_eq!(cpu.status(), 0x20);
    assert_eq!(cpu.cycles(), 0);
    assert_eq!(cpu.pc(), 0xC000);
    assert!(!cpu.nmi_pending());
    assert!(!cpu.irq_pending());
}

#[test]
fn test_new_fails_when_reset_vector_unmapped() {
    let mut space = AddressSpace::new();
    space
        .register_device(0x0000, Box::new(Memory::ram(0x8000)))
        .unwrap();

    assert_eq!(
        CPU::new(space).err(),
        Some(ExecutionError::Bus(BusError::Unmapped(0xFFFC)))
    );
}

// ========== Unimplemented opcodes ==========

#[test]
fn test_unimplemented_opcode_leaves_state() {
    // LDA #$01; then an undocumented opcode
    let mut cpu = setup_cpu(&[0xA9, 0x01, 0x1A]);
    cpu.step().unwrap();
    let before = cpu.registers();

    assert_eq!(
        cpu.step(),
        Err(ExecutionError::UnimplementedOpcode {
            opcode: 0x1A,
            address: 0xC002
        })
    );
    assert_eq!(cpu.registers(), before);
    assert_eq!(cpu.cycles(), 2);
    assert!(!cpu.is_halted());

    // The caller can move past it and carry on
    cpu.set_pc(0xC003);
    assert_eq!(cpu.step(), Ok(2));
}

#[test]
fn test_error_display() {
    let err = ExecutionError::UnimplementedOpcode {
        opcode: 0x1A,
        address: 0xC002,
    };
    assert_eq!(err.to_string(), "opcode $1A at $C002 is not implemented");
    assert_eq!(
        ExecutionError::from(BusError::ReadOnly(0xC000)).to_string(),
        "bus fault: write to read-only address $C000"
    );
}

// ========== JAM ==========

#[test]
fn test_jam_halts_until_reset() {
    let mut cpu = setup_cpu(&[0xEA, 0x02]);
    cpu.step().unwrap();

    assert_eq!(cpu.step(), Ok(2));
    assert_eq!(cpu.state(), CpuState::Halted);
    assert_eq!(cpu.pc(), 0xC001);
    assert_eq!(cpu.step(), Err(ExecutionError::Halted { pc: 0xC001 }));

    // Interrupts do not wake a halted CPU
    cpu.assert_nmi();
    assert_eq!(cpu.step(), Err(ExecutionError::Halted { pc: 0xC001 }));

    cpu.reset().unwrap();
    assert_eq!(cpu.state(), CpuState::Fetching);
    assert_eq!(cpu.step(), Ok(2));
}

// ========== Bus faults ==========

#[test]
fn test_write_to_rom_halts_and_restores_registers() {
    // LDA #$55; STA $C100
    let mut cpu = setup_cpu(&[0xA9, 0x55, 0x8D, 0x00, 0xC1]);
    cpu.step().unwrap();
    let before = cpu.registers();

    assert_eq!(
        cpu.step(),
        Err(ExecutionError::Bus(BusError::ReadOnly(0xC100)))
    );
    assert_eq!(cpu.registers(), before);
    assert_eq!(cpu.pc(), 0xC002);
    assert_eq!(cpu.cycles(), 2);
    assert!(cpu.is_halted());
    assert_eq!(cpu.memory_mut().read(0xC100), Ok(0xEA));
    assert_eq!(cpu.step(), Err(ExecutionError::Halted { pc: 0xC002 }));
}

#[test]
fn test_read_unmapped_halts() {
    // LDX #$07; LDA $9000 (nothing mapped at 0x8000-0xBFFF)
    let mut cpu = setup_cpu(&[0xA2, 0x07, 0xAD, 0x00, 0x90]);
    cpu.step().unwrap();

    assert_eq!(
        cpu.step(),
        Err(ExecutionError::Bus(BusError::Unmapped(0x9000)))
    );
    assert_eq!(cpu.x(), 0x07);
    assert_eq!(cpu.pc(), 0xC002);
    assert!(cpu.is_halted());
}

#[test]
fn test_fetch_from_unmapped_halts() {
    // JMP $9000
    let mut cpu = setup_cpu(&[0x4C, 0x00, 0x90]);
    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0x9000);

    assert_eq!(
        cpu.step(),
        Err(ExecutionError::Bus(BusError::Unmapped(0x9000)))
    );
    assert!(cpu.is_halted());
}

#[test]
fn test_stack_fault_during_jsr_restores_stack_pointer() {
    // Stack page unmapped: RAM only at 0x0200 onwards
    let mut rom = Memory::rom(vec![0xEA; 0x4000]);
    rom.load_bytes(0x0000, &[0x20, 0x00, 0xC1]); // JSR $C100
    rom.load_bytes(0x3FFC, &[0x00, 0xC0]);
    let mut space = AddressSpace::new();
    space
        .register_device(0x0200, Box::new(Memory::ram(0x100)))
        .unwrap();
    space.register_device(0xC000, Box::new(rom)).unwrap();
    let mut cpu = CPU::new(space).unwrap();

    assert_eq!(
        cpu.step(),
        Err(ExecutionError::Bus(BusError::Unmapped(0x01FF)))
    );
    assert_eq!(cpu.sp(), 0xFF);
    assert_eq!(cpu.pc(), 0xC000);
}

// ========== Run loops ==========

#[test]
fn test_step_n_stops_at_first_error() {
    let mut cpu = setup_cpu(&[0xEA, 0xEA, 0x02, 0xEA]);

    assert_eq!(cpu.step_n(5), Err(ExecutionError::Halted { pc: 0xC002 }));
    assert_eq!(cpu.cycles(), 6);
}

#[test]
fn test_run_for_cycles_overshoots_by_at_most_one_instruction() {
    // JMP $C000 forever
    let mut cpu = setup_cpu(&[0x4C, 0x00, 0xC0]);

    let consumed = cpu.run_for_cycles(100).unwrap();
    assert_eq!(consumed, 102);
    assert_eq!(cpu.cycles(), 102);
}

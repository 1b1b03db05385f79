//! Tests for branches, jumps, subroutine calls and the stack instructions.

use cpu6502::{AddressSpace, Memory, Registers, CPU};

/// Helper function to create a CPU with reset vector at 0x8000
fn setup_cpu() -> CPU<AddressSpace> {
    let mut space = AddressSpace::new();
    space
        .register_device(0x0000, Box::new(Memory::ram(0x10000)))
        .unwrap();
    space.load_bytes(0xFFFC, &[0x00, 0x80]).unwrap();
    CPU::new(space).unwrap()
}

// ========== Branches ==========

#[test]
fn test_branch_not_taken() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load_bytes(0x8000, &[0xF0, 0x10]).unwrap(); // BEQ +16
    cpu.set_flag_z(false);

    assert_eq!(cpu.step(), Ok(2));
    assert_eq!(cpu.pc(), 0x8002);
}

#[test]
fn test_branch_taken_same_page() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load_bytes(0x8000, &[0xD0, 0x10]).unwrap(); // BNE +16
    cpu.set_flag_z(false);

    assert_eq!(cpu.step(), Ok(3));
    assert_eq!(cpu.pc(), 0x8012);
}

#[test]
fn test_branch_taken_backwards_across_page() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load_bytes(0x8000, &[0x90, 0xFC]).unwrap(); // BCC -4
    cpu.set_flag_c(false);

    assert_eq!(cpu.step(), Ok(4));
    assert_eq!(cpu.pc(), 0x7FFE);
}

#[test]
fn test_branch_page_measured_from_next_instruction() {
    let mut cpu = setup_cpu();
    // BVS at 0x80FD: next instruction at 0x80FF, target 0x8100
    cpu.memory_mut().load_bytes(0x80FD, &[0x70, 0x01]).unwrap();
    cpu.set_pc(0x80FD);
    cpu.set_flag_v(true);

    assert_eq!(cpu.step(), Ok(4));
    assert_eq!(cpu.pc(), 0x8100);
}

#[test]
fn test_every_branch_condition() {
    // (opcode, flag setter, value that takes the branch)
    let cases: [(u8, fn(&mut CPU<AddressSpace>, bool), bool); 8] = [
        (0x10, CPU::set_flag_n, false), // BPL
        (0x30, CPU::set_flag_n, true),  // BMI
        (0x50, CPU::set_flag_v, false), // BVC
        (0x70, CPU::set_flag_v, true),  // BVS
        (0x90, CPU::set_flag_c, false), // BCC
        (0xB0, CPU::set_flag_c, true),  // BCS
        (0xD0, CPU::set_flag_z, false), // BNE
        (0xF0, CPU::set_flag_z, true),  // BEQ
    ];

    for (opcode, set_flag, take) in cases {
        let mut cpu = setup_cpu();
        cpu.memory_mut().load_bytes(0x8000, &[opcode, 0x04]).unwrap();
        set_flag(&mut cpu, take);
        cpu.step().unwrap();
        assert_eq!(cpu.pc(), 0x8006, "opcode ${:02X} should branch", opcode);

        let mut cpu = setup_cpu();
        cpu.memory_mut().load_bytes(0x8000, &[opcode, 0x04]).unwrap();
        set_flag(&mut cpu, !take);
        cpu.step().unwrap();
        assert_eq!(cpu.pc(), 0x8002, "opcode ${:02X} should fall through", opcode);
    }
}

#[test]
fn test_countdown_loop() {
    let mut cpu = setup_cpu();
    // LDX #$03; loop: DEX; BNE loop; NOP
    cpu.memory_mut()
        .load_bytes(0x8000, &[0xA2, 0x03, 0xCA, 0xD0, 0xFD, 0xEA])
        .unwrap();

    // LDX + 3 * DEX + 2 taken BNE + 1 untaken BNE
    let cycles = cpu.step_n(1 + 3 + 3).unwrap();

    assert_eq!(cpu.x(), 0x00);
    assert_eq!(cpu.pc(), 0x8005);
    assert_eq!(cycles, 2 + 3 * 2 + 2 * 3 + 2);
}

// ========== Jumps and Subroutines ==========

#[test]
fn test_jmp_absolute() {
    let mut cpu = setup_cpu();
    cpu.memory_mut()
        .load_bytes(0x8000, &[0x4C, 0x34, 0x12])
        .unwrap();

    assert_eq!(cpu.step(), Ok(3));
    assert_eq!(cpu.pc(), 0x1234);
}

#[test]
fn test_jmp_indirect_page_wrap() {
    let mut cpu = setup_cpu();
    // JMP ($10FF): low byte from $10FF, high byte from $1000
    cpu.memory_mut()
        .load_bytes(0x8000, &[0x6C, 0xFF, 0x10])
        .unwrap();
    cpu.memory_mut().write(0x10FF, 0x00).unwrap();
    cpu.memory_mut().write(0x1000, 0x90).unwrap();
    cpu.memory_mut().write(0x1100, 0xA0).unwrap();

    assert_eq!(cpu.step(), Ok(5));
    assert_eq!(cpu.pc(), 0x9000);
}

#[test]
fn test_jsr_pushes_last_byte_address() {
    let mut cpu = setup_cpu();
    // JSR $9000
    cpu.memory_mut()
        .load_bytes(0x8000, &[0x20, 0x00, 0x90])
        .unwrap();

    assert_eq!(cpu.step(), Ok(6));
    assert_eq!(cpu.pc(), 0x9000);
    assert_eq!(cpu.sp(), 0xFD);
    assert_eq!(cpu.memory_mut().read(0x01FF), Ok(0x80));
    assert_eq!(cpu.memory_mut().read(0x01FE), Ok(0x02));
}

#[test]
fn test_jsr_rts_round_trip() {
    let mut cpu = setup_cpu();
    // JSR $9000; LDA #$01    /    $9000: LDX #$05; RTS
    cpu.memory_mut()
        .load_bytes(0x8000, &[0x20, 0x00, 0x90, 0xA9, 0x01])
        .unwrap();
    cpu.memory_mut()
        .load_bytes(0x9000, &[0xA2, 0x05, 0x60])
        .unwrap();

    let cycles = cpu.step_n(4).unwrap();

    assert_eq!(cpu.x(), 0x05);
    assert_eq!(cpu.a(), 0x01);
    assert_eq!(cpu.pc(), 0x8005);
    assert_eq!(cpu.sp(), 0xFF);
    assert_eq!(cycles, 6 + 2 + 6 + 2);
}

// ========== Stack ==========

#[test]
fn test_pha_pla_round_trip() {
    let mut cpu = setup_cpu();
    // LDA #$00 would set Z; PLA must restore the pushed value's flags
    // LDA #$99; PHA; LDA #$00; PLA
    cpu.memory_mut()
        .load_bytes(0x8000, &[0xA9, 0x99, 0x48, 0xA9, 0x00, 0x68])
        .unwrap();

    let cycles = cpu.step_n(4).unwrap();

    assert_eq!(cpu.a(), 0x99);
    assert!(cpu.flag_n());
    assert!(!cpu.flag_z());
    assert_eq!(cpu.sp(), 0xFF);
    assert_eq!(cycles, 2 + 3 + 2 + 4);
}

#[test]
fn test_php_sets_break_and_unused_in_pushed_copy() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x8000, 0x08).unwrap(); // PHP
    cpu.set_flag_c(true);

    assert_eq!(cpu.step(), Ok(3));
    assert_eq!(cpu.memory_mut().read(0x01FF), Ok(0x31));
    // The live register is unchanged
    assert!(!cpu.flag_b());
}

#[test]
fn test_plp_loads_flags() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x8000, 0x28).unwrap(); // PLP
    cpu.memory_mut().write(0x01FF, 0xCB).unwrap();
    cpu.set_sp(0xFE);

    assert_eq!(cpu.step(), Ok(4));
    assert_eq!(cpu.status(), 0xEB);
    assert!(cpu.flag_d());
    assert!(!cpu.flag_i());
}

#[test]
fn test_stack_pointer_wraps() {
    let mut cpu = setup_cpu();
    cpu.set_sp(0x00);
    cpu.set_a(0x11);
    // PHA; PLA
    cpu.memory_mut().load_bytes(0x8000, &[0x48, 0x68]).unwrap();

    cpu.step().unwrap();
    assert_eq!(cpu.sp(), 0xFF);
    assert_eq!(cpu.memory_mut().read(0x0100), Ok(0x11));

    cpu.step().unwrap();
    assert_eq!(cpu.sp(), 0x00);
    assert_eq!(cpu.a(), 0x11);
}

#[test]
fn test_nop() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x8000, 0xEA).unwrap();
    let before = cpu.registers();

    assert_eq!(cpu.step(), Ok(2));

    assert_eq!(
        cpu.registers(),
        Registers {
            pc: 0x8001,
            ..before
        }
    );
}

//! Property-based tests for arithmetic and CPU invariants.
//!
//! These tests use proptest to verify that the ALU and the step loop maintain their
//! invariants across all input combinations.

use cpu6502::{AddressSpace, ExecutionError, Memory, CPU, OPCODE_TABLE};
use proptest::prelude::*;

/// Helper function to create a CPU with reset vector at 0x8000
fn setup_cpu() -> CPU<AddressSpace> {
    let mut space = AddressSpace::new();
    space
        .register_device(0x0000, Box::new(Memory::ram(0x10000)))
        .unwrap();
    space.load_bytes(0xFFFC, &[0x00, 0x80]).unwrap();
    CPU::new(space).unwrap()
}

fn run_immediate(opcode: u8, a: u8, value: u8, carry: bool, decimal: bool) -> CPU<AddressSpace> {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load_bytes(0x8000, &[opcode, value]).unwrap();
    cpu.set_a(a);
    cpu.set_flag_c(carry);
    cpu.set_flag_d(decimal);
    cpu.step().unwrap();
    cpu
}

fn bcd(n: u8) -> u8 {
    ((n / 10) << 4) | (n % 10)
}

fn from_bcd(b: u8) -> u8 {
    (b >> 4) * 10 + (b & 0x0F)
}

proptest! {
    #[test]
    fn prop_adc_binary_matches_wide_add(
        a in any::<u8>(),
        value in any::<u8>(),
        carry in any::<bool>(),
    ) {
        let cpu = run_immediate(0x69, a, value, carry, false);
        let sum = a as u16 + value as u16 + carry as u16;

        prop_assert_eq!(cpu.a(), sum as u8);
        prop_assert_eq!(cpu.flag_c(), sum > 0xFF);
        prop_assert_eq!(cpu.flag_z(), sum as u8 == 0);
        prop_assert_eq!(cpu.flag_n(), sum as u8 & 0x80 != 0);

        let signed = a as i8 as i16 + value as i8 as i16 + carry as i16;
        prop_assert_eq!(cpu.flag_v(), !(-128..=127).contains(&signed));
    }

    #[test]
    fn prop_sbc_binary_matches_wide_subtract(
        a in any::<u8>(),
        value in any::<u8>(),
        carry in any::<bool>(),
    ) {
        let cpu = run_immediate(0xE9, a, value, carry, false);
        let diff = a as i16 - value as i16 - !carry as i16;

        prop_assert_eq!(cpu.a(), diff as u8);
        prop_assert_eq!(cpu.flag_c(), diff >= 0);

        let signed = a as i8 as i16 - value as i8 as i16 - !carry as i16;
        prop_assert_eq!(cpu.flag_v(), !(-128..=127).contains(&signed));
    }

    #[test]
    fn prop_adc_decimal_is_base_ten(x in 0u8..100, y in 0u8..100, carry in any::<bool>()) {
        let cpu = run_immediate(0x69, bcd(x), bcd(y), carry, true);
        let sum = x as u16 + y as u16 + carry as u16;

        prop_assert_eq!(from_bcd(cpu.a()) as u16, sum % 100);
        prop_assert_eq!(cpu.flag_c(), sum >= 100);
        prop_assert_eq!(cpu.flag_z(), sum % 100 == 0);
        prop_assert!(!cpu.flag_n());
        prop_assert!(!cpu.flag_v());
    }

    #[test]
    fn prop_sbc_decimal_is_base_ten(x in 0u8..100, y in 0u8..100, carry in any::<bool>()) {
        let cpu = run_immediate(0xE9, bcd(x), bcd(y), carry, true);
        let diff = x as i16 - y as i16 - !carry as i16;

        prop_assert_eq!(from_bcd(cpu.a()) as i16, diff.rem_euclid(100));
        prop_assert_eq!(cpu.flag_c(), diff >= 0);
        prop_assert!(!cpu.flag_n());
        prop_assert!(!cpu.flag_v());
    }

    #[test]
    fn prop_cmp_flags(a in any::<u8>(), value in any::<u8>()) {
        let cpu = run_immediate(0xC9, a, value, false, false);

        prop_assert_eq!(cpu.a(), a);
        prop_assert_eq!(cpu.flag_c(), a >= value);
        prop_assert_eq!(cpu.flag_z(), a == value);
        prop_assert_eq!(cpu.flag_n(), a.wrapping_sub(value) & 0x80 != 0);
    }

    #[test]
    fn prop_status_bit5_always_set(status in any::<u8>()) {
        let mut cpu = setup_cpu();
        cpu.set_status(status);
        prop_assert_eq!(cpu.status(), status | 0x20);
    }

    #[test]
    fn prop_step_error_contract(
        bytes in proptest::collection::vec(any::<u8>(), 3),
        a in any::<u8>(),
        x in any::<u8>(),
        y in any::<u8>(),
        p in any::<u8>(),
    ) {
        let mut cpu = setup_cpu();
        cpu.memory_mut().load_bytes(0x8000, &bytes).unwrap();
        cpu.set_a(a);
        cpu.set_x(x);
        cpu.set_y(y);
        cpu.set_status(p);
        let before = cpu.registers();

        match cpu.step() {
            Ok(cycles) => {
                let metadata = OPCODE_TABLE[bytes[0] as usize].unwrap();
                prop_assert!(cycles >= metadata.base_cycles as u64);
                prop_assert!(cycles <= metadata.base_cycles as u64 + 2);
                prop_assert_eq!(cpu.cycles(), cycles);
            }
            Err(ExecutionError::UnimplementedOpcode { opcode, address }) => {
                prop_assert_eq!(opcode, bytes[0]);
                prop_assert_eq!(address, 0x8000);
                prop_assert!(OPCODE_TABLE[opcode as usize].is_none());
                prop_assert_eq!(cpu.registers(), before);
                prop_assert_eq!(cpu.cycles(), 0);
            }
            Err(other) => prop_assert!(false, "unexpected error {:?}", other),
        }
    }
}

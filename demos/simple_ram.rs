//! Simple RAM example
//!
//! Demonstrates basic CPU initialization and execution over a 64KB RAM address space.
//!
//! This example shows:
//! - Booting a program with `BootConfig`
//! - Stepping instructions and inspecting state
//! - Decimal mode arithmetic
//! - How the CPU reports halting

use cpu6502::{AddressSpace, BootConfig, ExecutionError, CPU, DEFAULT_LOAD_ADDRESS, OPCODE_TABLE};

fn print_state(cpu: &CPU<AddressSpace>) {
    println!("  PC: 0x{:04X}", cpu.pc());
    println!("  SP: 0x{:02X} (Stack: 0x01{:02X})", cpu.sp(), cpu.sp());
    println!("  A:  0x{:02X}", cpu.a());
    println!("  X:  0x{:02X}", cpu.x());
    println!("  Y:  0x{:02X}", cpu.y());
    println!(
        "  Status: 0x{:02X} (NV-BDIZC: {:08b})",
        cpu.status(),
        cpu.status()
    );
    println!("  Cycles: {}\n", cpu.cycles());
}

fn main() {
    println!("6502 CPU Core - Simple RAM Example");
    println!("==================================\n");

    // SED; CLC; LDA #$19; ADC #$28; STA $10; LDX $10; INX; CLD; JAM
    let program = [
        0xF8, 0x18, 0xA9, 0x19, 0x69, 0x28, 0x85, 0x10, 0xA6, 0x10, 0xE8, 0xD8, 0x02,
    ];

    let mut cpu = match BootConfig::default().boot(&program) {
        Ok(cpu) => cpu,
        Err(err) => {
            eprintln!("boot failed: {}", err);
            return;
        }
    };

    println!(
        "Loaded {} bytes at 0x{:04X}\n",
        program.len(),
        DEFAULT_LOAD_ADDRESS
    );
    println!("CPU Initial State:");
    println!("-----------------");
    print_state(&cpu);

    println!("Executing:");
    println!("----------");
    loop {
        let pc = cpu.pc();
        let mnemonic = cpu
            .memory_mut()
            .read(pc)
            .ok()
            .and_then(|opcode| OPCODE_TABLE[opcode as usize])
            .map_or("???", |metadata| metadata.mnemonic());

        match cpu.step() {
            Ok(cycles) => println!("  0x{:04X}  {}  ({} cycles)", pc, mnemonic, cycles),
            Err(ExecutionError::Halted { pc }) => {
                println!("\nCPU halted at 0x{:04X}\n", pc);
                break;
            }
            Err(err) => {
                println!("\nStopped: {}\n", err);
                break;
            }
        }
    }

    println!("CPU Final State:");
    println!("----------------");
    print_state(&cpu);

    // 19 + 28 = 47 in BCD, then INX in binary gives 0x48
    println!("A = 0x{:02X} (BCD 19 + 28), X = 0x{:02X}", cpu.a(), cpu.x());
}

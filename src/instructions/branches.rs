//! # Branch Instructions
//!
//! This module implements the conditional branches:
//! BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS.
//!
//! All branch instructions use relative addressing with a signed 8-bit offset measured from
//! the next instruction. Cycle timing varies based on whether the branch is taken and
//! whether a page boundary is crossed:
//! - 2 cycles if branch not taken
//! - 3 cycles if branch taken to same page
//! - 4 cycles if branch taken to different page
//!
//! No flags are affected.

use crate::addressing::Operand;
use crate::memory::MemoryBus;
use crate::opcodes::Operation;
use crate::CPU;

/// Executes a conditional branch and returns the cycles owed beyond the base cost.
pub(crate) fn execute_branch<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operation: Operation,
    operand: Operand,
) -> u8 {
    let taken = match operation {
        Operation::Bcc => !cpu.flag_c,
        Operation::Bcs => cpu.flag_c,
        Operation::Beq => cpu.flag_z,
        Operation::Bne => !cpu.flag_z,
        Operation::Bmi => cpu.flag_n,
        Operation::Bpl => !cpu.flag_n,
        Operation::Bvc => !cpu.flag_v,
        Operation::Bvs => cpu.flag_v,
        _ => false,
    };

    match operand.address() {
        Some(target) if taken => {
            cpu.pc = target;
            if operand.page_crossed() {
                2
            } else {
                1
            }
        }
        _ => 0,
    }
}

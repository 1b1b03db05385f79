//! # Flag Instructions
//!
//! This module implements the status flag manipulation instructions:
//! - CLC / SEC: Clear / Set Carry
//! - CLD / SED: Clear / Set Decimal mode
//! - CLI / SEI: Clear / Set Interrupt Disable
//! - CLV: Clear Overflow
//!
//! All take 2 cycles and affect only the named flag.

use crate::memory::MemoryBus;
use crate::opcodes::Operation;
use crate::CPU;

pub(crate) fn execute_flag<M: MemoryBus>(cpu: &mut CPU<M>, operation: Operation) {
    match operation {
        Operation::Clc => cpu.flag_c = false,
        Operation::Sec => cpu.flag_c = true,
        Operation::Cld => cpu.flag_d = false,
        Operation::Sed => cpu.flag_d = true,
        Operation::Cli => cpu.flag_i = false,
        Operation::Sei => cpu.flag_i = true,
        Operation::Clv => cpu.flag_v = false,
        _ => {}
    }
}

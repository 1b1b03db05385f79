//! # CPU State and Execution
//!
//! This module contains the CPU struct representing the 6502 processor state and
//! the fetch-decode-execute-interrupt loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: Accumulator (A), index registers (X, Y)
//! - **Program counter** (PC): 16-bit address of next instruction
//! - **Stack pointer** (SP): 8-bit offset into stack page (0x0100-0x01FF)
//! - **Status flags**: N, V, B, D, I, Z, C (individual bool fields)
//! - **Cycle counter**: u64 monotonically increasing cycle count
//! - **Run state**: see [`CpuState`]
//!
//! ## Execution Model
//!
//! The CPU executes instructions via:
//! - `step()`: Execute one instruction or service one interrupt
//! - `step_n()`: Execute a fixed number of steps
//! - `run_for_cycles()`: Execute until cycle budget exhausted
//!
//! A step is atomic from the caller's point of view. If a bus access fails part-way,
//! the registers are rolled back to their values before the step, the CPU halts, and the
//! error is returned.

use crate::instructions;
use crate::memory::{BusError, MemoryBus};
use crate::{ExecutionError, OPCODE_TABLE};

/// Address of the NMI vector (little-endian).
pub const NMI_VECTOR: u16 = 0xFFFA;

/// Address of the reset vector (little-endian).
pub const RESET_VECTOR: u16 = 0xFFFC;

/// Address of the IRQ/BRK vector (little-endian).
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Cycles taken to service an IRQ or NMI.
pub const INTERRUPT_CYCLES: u64 = 7;

/// Base of the hardware stack page.
pub(crate) const STACK_BASE: u16 = 0x0100;

pub(crate) const FLAG_N: u8 = 0b1000_0000;
pub(crate) const FLAG_V: u8 = 0b0100_0000;
pub(crate) const FLAG_UNUSED: u8 = 0b0010_0000;
pub(crate) const FLAG_B: u8 = 0b0001_0000;
pub(crate) const FLAG_D: u8 = 0b0000_1000;
pub(crate) const FLAG_I: u8 = 0b0000_0100;
pub(crate) const FLAG_Z: u8 = 0b0000_0010;
pub(crate) const FLAG_C: u8 = 0b0000_0001;

/// Execution state of the CPU.
///
/// `Executing` and `ServicingInterrupt` are only held inside `step()`; between steps the
/// CPU is `Fetching` or `Halted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CpuState {
    /// Reset sequence in progress.
    Reset,
    /// Ready to begin the next instruction.
    Fetching,
    /// Resolving operands and executing an instruction.
    Executing,
    /// Pushing PC/P and jumping through an interrupt vector.
    ServicingInterrupt,
    /// Stopped by a JAM opcode or a bus fault. Only `reset()` leaves this state.
    Halted,
}

/// Snapshot of the programmer-visible registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Registers {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    /// Packed status register (NV1BDIZC).
    pub status: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Interrupt {
    Irq,
    Nmi,
}

/// 6502 CPU state and execution context.
///
/// The CPU struct contains all processor state including registers, flags, program
/// counter, stack pointer, and cycle counter. It owns its bus and performs every access
/// through the `MemoryBus` trait.
///
/// # Type Parameters
///
/// * `M` - Memory bus implementation (must implement `MemoryBus` trait)
///
/// # Examples
///
/// ```
/// use cpu6502::{AddressSpace, Memory, CPU};
///
/// let mut space = AddressSpace::new();
/// space.register_device(0x0000, Box::new(Memory::ram(0x10000))).unwrap();
/// space.load_bytes(0xFFFC, &[0x00, 0x02]).unwrap(); // reset vector -> 0x0200
/// space.load_bytes(0x0200, &[0xA9, 0x7F, 0x69, 0x01]).unwrap(); // LDA #$7F; ADC #$01
///
/// let mut cpu = CPU::new(space).unwrap();
/// assert_eq!(cpu.pc(), 0x0200);
/// assert_eq!(cpu.sp(), 0xFF);
/// assert_eq!(cpu.status(), 0x20);
///
/// assert_eq!(cpu.step_n(2), Ok(4));
/// assert_eq!(cpu.a(), 0x80);
/// assert!(cpu.flag_n());
/// assert!(cpu.flag_v());
/// ```
pub struct CPU<M: MemoryBus> {
    /// Accumulator register
    pub(crate) a: u8,

    /// X index register
    pub(crate) x: u8,

    /// Y index register
    pub(crate) y: u8,

    /// Program counter (address of next instruction)
    pub(crate) pc: u16,

    /// Stack pointer (0x0100 + sp gives full stack address)
    pub(crate) sp: u8,

    /// Negative flag (set if bit 7 of result is 1)
    pub(crate) flag_n: bool,

    /// Overflow flag (set on signed overflow)
    pub(crate) flag_v: bool,

    /// Break flag (set by BRK, cleared by hardware interrupts)
    pub(crate) flag_b: bool,

    /// Decimal mode flag (enables BCD arithmetic)
    pub(crate) flag_d: bool,

    /// Interrupt disable flag (blocks IRQ when set)
    pub(crate) flag_i: bool,

    /// Zero flag (set if result is zero)
    pub(crate) flag_z: bool,

    /// Carry flag (set on unsigned overflow, clear on borrow)
    pub(crate) flag_c: bool,

    /// Total CPU cycles executed since the last reset
    pub(crate) cycles: u64,

    pub(crate) state: CpuState,

    /// IRQ requested through `assert_irq`, held until serviced or withdrawn
    irq_requested: bool,

    /// NMI edge latched by `assert_nmi`, cleared when serviced
    nmi_pending: bool,

    /// Memory bus implementation
    pub(crate) memory: M,
}

impl<M: MemoryBus> CPU<M> {
    /// Creates a CPU attached to `memory` and runs the reset sequence.
    ///
    /// Fails if the reset vector cannot be read.
    pub fn new(memory: M) -> Result<Self, ExecutionError> {
        let mut cpu = Self {
            a: 0x00,
            x: 0x00,
            y: 0x00,
            pc: 0x0000,
            sp: 0xFF,
            flag_n: false,
            flag_v: false,
            flag_b: false,
            flag_d: false,
            flag_i: false,
            flag_z: false,
            flag_c: false,
            cycles: 0,
            state: CpuState::Reset,
            irq_requested: false,
            nmi_pending: false,
            memory,
        };
        cpu.reset()?;
        Ok(cpu)
    }

    /// Resets the processor.
    ///
    /// Sets A=X=Y=0, SP=0xFF, P=0x20, drops pending interrupts, zeroes the cycle counter
    /// and loads PC from the reset vector at 0xFFFC/0xFFFD. Callable from any state,
    /// including `Halted`. If the vector cannot be read the CPU is left `Halted`.
    pub fn reset(&mut self) -> Result<(), ExecutionError> {
        self.state = CpuState::Reset;
        self.a = 0x00;
        self.x = 0x00;
        self.y = 0x00;
        self.sp = 0xFF;
        self.set_status(FLAG_UNUSED);
        self.cycles = 0;
        self.irq_requested = false;
        self.nmi_pending = false;

        match self.memory.read_word(RESET_VECTOR) {
            Ok(pc) => {
                self.pc = pc;
                self.state = CpuState::Fetching;
                log::debug!("reset: PC=${:04X}", pc);
                Ok(())
            }
            Err(err) => {
                self.pc = 0x0000;
                self.state = CpuState::Halted;
                log::warn!("reset vector unreadable, CPU halted: {}", err);
                Err(err.into())
            }
        }
    }

    /// Executes one instruction, or services one pending interrupt, and returns the
    /// number of cycles consumed.
    ///
    /// A pending NMI is serviced first; a pending IRQ is serviced only while the
    /// Interrupt Disable flag is clear.
    ///
    /// # Errors
    ///
    /// - `ExecutionError::UnimplementedOpcode` if the opcode has no table entry. PC still
    ///   points at the opcode and the CPU can keep stepping once the caller intervenes.
    /// - `ExecutionError::Bus` if an access fails. Registers are restored to their
    ///   values before the step and the CPU halts.
    /// - `ExecutionError::Halted` if the CPU is halted.
    ///
    /// # Examples
    ///
    /// ```
    /// use cpu6502::{BootConfig, ExecutionError};
    ///
    /// // LDY #$0A; CPY #$08
    /// let mut cpu = BootConfig::default().boot(&[0xA0, 0x0A, 0xC0, 0x08]).unwrap();
    /// assert_eq!(cpu.step(), Ok(2));
    /// assert_eq!(cpu.step(), Ok(2));
    /// assert!(cpu.flag_c());
    /// assert!(!cpu.flag_z());
    ///
    /// // The next byte (0x00 in fresh RAM) is BRK; 0xFF has no table entry
    /// cpu.memory_mut().write(0x0204, 0xFF).unwrap();
    /// assert_eq!(
    ///     cpu.step(),
    ///     Err(ExecutionError::UnimplementedOpcode { opcode: 0xFF, address: 0x0204 })
    /// );
    /// ```
    pub fn step(&mut self) -> Result<u64, ExecutionError> {
        if self.state == CpuState::Halted {
            return Err(ExecutionError::Halted { pc: self.pc });
        }

        let snapshot = self.registers();
        let result = if self.nmi_pending {
            self.service_interrupt(Interrupt::Nmi)
        } else if !self.flag_i && self.irq_pending() {
            self.service_interrupt(Interrupt::Irq)
        } else {
            self.execute_instruction()
        };

        match result {
            Ok(cycles) => {
                self.cycles += cycles;
                if self.state != CpuState::Halted {
                    self.state = CpuState::Fetching;
                }
                Ok(cycles)
            }
            Err(ExecutionError::Bus(err)) => {
                self.restore(snapshot);
                self.state = CpuState::Halted;
                log::warn!("bus fault at PC=${:04X}, CPU halted: {}", snapshot.pc, err);
                Err(ExecutionError::Bus(err))
            }
            Err(err) => {
                self.state = CpuState::Fetching;
                Err(err)
            }
        }
    }

    /// Executes `count` steps and returns the total cycles consumed.
    ///
    /// Stops at the first error; cycles of the steps completed before it remain counted
    /// in [`cycles`](Self::cycles).
    pub fn step_n(&mut self, count: usize) -> Result<u64, ExecutionError> {
        let mut total = 0;
        for _ in 0..count {
            total += self.step()?;
        }
        Ok(total)
    }

    /// Runs the CPU for a specified number of cycles.
    ///
    /// Executes steps until the cycle budget is exhausted or an error occurs. Returns the
    /// actual number of cycles consumed, which may overshoot the budget by up to one
    /// instruction.
    pub fn run_for_cycles(&mut self, cycle_budget: u64) -> Result<u64, ExecutionError> {
        let mut consumed = 0;
        while consumed < cycle_budget {
            consumed += self.step()?;
        }
        Ok(consumed)
    }

    /// Requests a maskable interrupt.
    ///
    /// The request stays pending, across steps if the Interrupt Disable flag is set, until
    /// it is serviced or withdrawn with [`clear_irq`](Self::clear_irq).
    pub fn assert_irq(&mut self) {
        self.irq_requested = true;
    }

    /// Withdraws an IRQ requested with [`assert_irq`](Self::assert_irq).
    ///
    /// Device-held IRQ lines are unaffected; devices release them through their registers.
    pub fn clear_irq(&mut self) {
        self.irq_requested = false;
    }

    /// Requests a non-maskable interrupt, serviced at the start of the next step.
    pub fn assert_nmi(&mut self) {
        self.nmi_pending = true;
    }

    /// Returns true if an IRQ is requested by the host or held by a device.
    pub fn irq_pending(&self) -> bool {
        self.irq_requested || self.memory.irq_active()
    }

    /// Returns true if an NMI is waiting to be serviced.
    pub fn nmi_pending(&self) -> bool {
        self.nmi_pending
    }

    fn execute_instruction(&mut self) -> Result<u64, ExecutionError> {
        let address = self.pc;
        let opcode = self.memory.read(address)?;

        let Some(metadata) = OPCODE_TABLE[opcode as usize] else {
            log::warn!(
                "unimplemented opcode ${:02X} at ${:04X}",
                opcode,
                address
            );
            return Err(ExecutionError::UnimplementedOpcode { opcode, address });
        };

        self.state = CpuState::Executing;
        let operand = self.resolve_operand(metadata.addressing_mode)?;
        let extra = instructions::execute(self, metadata.operation, operand)?;

        let mut cycles = metadata.base_cycles as u64 + extra as u64;
        if operand.page_crossed() && metadata.operation.page_cross_penalty() {
            cycles += 1;
        }

        log::trace!(
            "${:04X}  {:02X}  {} {:?}  A={:02X} X={:02X} Y={:02X} SP={:02X} P={:02X}  +{}",
            address,
            opcode,
            metadata.mnemonic(),
            metadata.addressing_mode,
            self.a,
            self.x,
            self.y,
            self.sp,
            self.status(),
            cycles
        );

        Ok(cycles)
    }

    fn service_interrupt(&mut self, interrupt: Interrupt) -> Result<u64, ExecutionError> {
        self.state = CpuState::ServicingInterrupt;

        let vector = match interrupt {
            Interrupt::Irq => IRQ_VECTOR,
            Interrupt::Nmi => NMI_VECTOR,
        };

        let return_address = self.pc;
        self.push_word(return_address)?;
        self.flag_b = false;
        self.push(self.status())?;
        self.pc = self.memory.read_word(vector)?;

        // NMI leaves I alone
        match interrupt {
            Interrupt::Irq => {
                self.flag_i = true;
                self.irq_requested = false;
            }
            Interrupt::Nmi => self.nmi_pending = false,
        }

        log::debug!(
            "{:?} serviced: ${:04X} -> ${:04X}",
            interrupt,
            return_address,
            self.pc
        );

        Ok(INTERRUPT_CYCLES)
    }

    // ========== Stack ==========

    /// Pushes a byte to 0x0100 | SP and decrements SP (wrapping).
    pub(crate) fn push(&mut self, value: u8) -> Result<(), BusError> {
        self.memory.write(STACK_BASE | self.sp as u16, value)?;
        self.sp = self.sp.wrapping_sub(1);
        Ok(())
    }

    /// Increments SP (wrapping) and pulls the byte at 0x0100 | SP.
    pub(crate) fn pull(&mut self) -> Result<u8, BusError> {
        self.sp = self.sp.wrapping_add(1);
        self.memory.read(STACK_BASE | self.sp as u16)
    }

    /// Pushes a word high byte first, so it sits little-endian in memory.
    pub(crate) fn push_word(&mut self, value: u16) -> Result<(), BusError> {
        let [lo, hi] = value.to_le_bytes();
        self.push(hi)?;
        self.push(lo)
    }

    pub(crate) fn pull_word(&mut self) -> Result<u16, BusError> {
        let lo = self.pull()?;
        let hi = self.pull()?;
        Ok(u16::from_le_bytes([lo, hi]))
    }

    /// Sets Z and N from a result byte.
    pub(crate) fn update_nz(&mut self, value: u8) {
        self.flag_z = value == 0;
        self.flag_n = (value & 0x80) != 0;
    }

    fn restore(&mut self, registers: Registers) {
        self.a = registers.a;
        self.x = registers.x;
        self.y = registers.y;
        self.sp = registers.sp;
        self.pc = registers.pc;
        self.set_status(registers.status);
    }

    // ========== Register Getters ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the stack pointer value.
    ///
    /// Note: The full stack address is 0x0100 + SP. The stack grows downward from 0x01FF.
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// Returns the status register as a packed byte.
    ///
    /// Bit layout (NV-BDIZC):
    /// - Bit 7: N (Negative)
    /// - Bit 6: V (Overflow)
    /// - Bit 5: (unused, always 1)
    /// - Bit 4: B (Break)
    /// - Bit 3: D (Decimal)
    /// - Bit 2: I (Interrupt Disable)
    /// - Bit 1: Z (Zero)
    /// - Bit 0: C (Carry)
    pub fn status(&self) -> u8 {
        let mut status = FLAG_UNUSED;

        if self.flag_n {
            status |= FLAG_N;
        }
        if self.flag_v {
            status |= FLAG_V;
        }
        if self.flag_b {
            status |= FLAG_B;
        }
        if self.flag_d {
            status |= FLAG_D;
        }
        if self.flag_i {
            status |= FLAG_I;
        }
        if self.flag_z {
            status |= FLAG_Z;
        }
        if self.flag_c {
            status |= FLAG_C;
        }

        status
    }

    /// Returns a copy of all programmer-visible registers.
    pub fn registers(&self) -> Registers {
        Registers {
            a: self.a,
            x: self.x,
            y: self.y,
            sp: self.sp,
            pc: self.pc,
            status: self.status(),
        }
    }

    /// Returns the total number of CPU cycles executed since the last reset.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Returns the current run state.
    pub fn state(&self) -> CpuState {
        self.state
    }

    /// Returns true if the CPU is halted.
    pub fn is_halted(&self) -> bool {
        self.state == CpuState::Halted
    }

    // ========== Status Flag Getters ==========

    /// Returns true if the Negative flag is set.
    pub fn flag_n(&self) -> bool {
        self.flag_n
    }

    /// Returns true if the Overflow flag is set.
    pub fn flag_v(&self) -> bool {
        self.flag_v
    }

    /// Returns true if the Break flag is set.
    pub fn flag_b(&self) -> bool {
        self.flag_b
    }

    /// Returns true if the Decimal mode flag is set.
    pub fn flag_d(&self) -> bool {
        self.flag_d
    }

    /// Returns true if the Interrupt Disable flag is set.
    pub fn flag_i(&self) -> bool {
        self.flag_i
    }

    /// Returns true if the Zero flag is set.
    pub fn flag_z(&self) -> bool {
        self.flag_z
    }

    /// Returns true if the Carry flag is set.
    pub fn flag_c(&self) -> bool {
        self.flag_c
    }

    // ========== Memory Access ==========

    /// Returns a reference to the bus.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Returns a mutable reference to the bus.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    // ========== Setters (test and host setup) ==========

    /// Sets the accumulator.
    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    /// Sets the X index register.
    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    /// Sets the Y index register.
    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    /// Sets the program counter.
    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    /// Sets the stack pointer (offset into page 0x01).
    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    /// Unpacks a status byte into the flags. Bit 5 is ignored.
    pub fn set_status(&mut self, value: u8) {
        self.flag_n = value & FLAG_N != 0;
        self.flag_v = value & FLAG_V != 0;
        self.flag_b = value & FLAG_B != 0;
        self.flag_d = value & FLAG_D != 0;
        self.flag_i = value & FLAG_I != 0;
        self.flag_z = value & FLAG_Z != 0;
        self.flag_c = value & FLAG_C != 0;
    }

    /// Sets the Negative flag.
    pub fn set_flag_n(&mut self, value: bool) {
        self.flag_n = value;
    }

    /// Sets the Overflow flag.
    pub fn set_flag_v(&mut self, value: bool) {
        self.flag_v = value;
    }

    /// Sets the Break flag.
    pub fn set_flag_b(&mut self, value: bool) {
        self.flag_b = value;
    }

    /// Sets the Decimal flag.
    pub fn set_flag_d(&mut self, value: bool) {
        self.flag_d = value;
    }

    /// Sets the Interrupt-disable flag.
    pub fn set_flag_i(&mut self, value: bool) {
        self.flag_i = value;
    }

    /// Sets the Zero flag.
    pub fn set_flag_z(&mut self, value: bool) {
        self.flag_z = value;
    }

    /// Sets the Carry flag.
    pub fn set_flag_c(&mut self, value: bool) {
        self.flag_c = value;
    }
}

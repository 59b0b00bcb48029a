//! # CPU State and Execution
//!
//! The 8085 execution engine: register file, program counter, stack pointer,
//! and the fetch-decode-execute loop. The CPU is generic over the
//! [`MemoryBus`] trait and communicates with memory exclusively through it.
//!
//! ## Execution Model
//!
//! - [`Cpu::step`] executes one instruction.
//! - [`Cpu::run`] steps until the CPU leaves the `Running` state.
//! - [`Cpu::run_for_instructions`] bounds a run by instruction count.
//!
//! Execution is single-threaded and synchronous; a run ends in exactly one of
//! two terminal states. `Halted` means the HLT opcode was fetched. `Faulted`
//! means an out-of-range bus access or an unrecognized opcode stopped the
//! run; the [`Fault`] carries the offending address or byte together with the
//! program counter so a caller can report what stopped execution. Neither
//! condition is retried.

use log::{debug, trace, warn};
use thiserror::Error;

use crate::bus::{BusError, MemoryBus};
use crate::memory::{MEMORY_BASE, MEMORY_END};
use crate::opcodes::Instruction;
use crate::registers::{Operand, Register, RegisterFile, RegisterPair};

/// Unrecoverable condition that terminated a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Fault {
    /// A bus access addressed a byte outside the RAM window.
    #[error("out-of-range access at {addr:#06X} (pc = {pc:#06X})")]
    OutOfRange {
        /// The rejected address.
        addr: u16,
        /// Program counter at the time of the access.
        pc: u16,
    },

    /// A fetched byte matched no recognized opcode pattern.
    #[error("unknown instruction {opcode:#04X} at {pc:#06X}")]
    UnknownInstruction {
        /// The unrecognized opcode byte.
        opcode: u8,
        /// Address the byte was fetched from.
        pc: u16,
    },
}

/// Run state of the CPU.
///
/// `Halted` and `Faulted` are terminal: further [`Cpu::step`] calls are
/// no-ops until [`Cpu::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuState {
    /// Executing instructions.
    Running,
    /// The HLT opcode was fetched; the run completed successfully.
    Halted,
    /// An unrecoverable fault stopped the run.
    Faulted(Fault),
}

/// The 8085 execution engine.
///
/// # Type Parameters
///
/// * `M` - Memory bus implementation the CPU reads and writes through
///
/// # Examples
///
/// ```
/// use lib8085::{Bus, Cpu, CpuState, MEMORY_BASE};
///
/// let mut bus = Bus::new();
/// // MVI A, 0x42 / HLT
/// bus.load(MEMORY_BASE, &[0x3E, 0x42, 0x76]).unwrap();
///
/// let mut cpu = Cpu::new(bus);
/// cpu.run();
///
/// assert_eq!(cpu.state(), CpuState::Halted);
/// assert_eq!(cpu.a(), 0x42);
/// ```
pub struct Cpu<M: MemoryBus> {
    regs: RegisterFile,

    /// Program counter; points at the next byte to fetch.
    pc: u16,

    /// Stack pointer; written only by LXI SP in this instruction subset.
    sp: u16,

    state: CpuState,

    bus: M,
}

impl<M: MemoryBus> Cpu<M> {
    /// Creates a CPU in its power-on state: all registers zero, SP zero,
    /// PC at the base of the RAM window, state `Running`.
    pub fn new(bus: M) -> Self {
        Self {
            regs: RegisterFile::new(),
            pc: MEMORY_BASE,
            sp: 0,
            state: CpuState::Running,
            bus,
        }
    }

    /// Executes one instruction and returns the resulting run state.
    ///
    /// Fetches the byte at PC, decodes it, executes it, and advances PC one
    /// past the last byte the instruction consumed. Fetching the HLT opcode
    /// transitions to `Halted` with PC left at the halt byte and no register
    /// touched. An out-of-range access or unknown opcode transitions to
    /// `Faulted`. In a terminal state this is a no-op.
    pub fn step(&mut self) -> CpuState {
        if self.state != CpuState::Running {
            return self.state;
        }
        if let Err(fault) = self.step_inner() {
            warn!("fault: {fault}");
            self.state = CpuState::Faulted(fault);
        }
        self.state
    }

    /// Runs until the CPU halts or faults, returning the terminal state.
    ///
    /// Faults surface through the returned state and [`Cpu::fault`], not as
    /// an `Err`; the diagnostic stays inspectable on the CPU afterwards.
    pub fn run(&mut self) -> CpuState {
        while self.state == CpuState::Running {
            self.step();
        }
        self.state
    }

    /// Executes at most `limit` instructions, returning the count actually
    /// executed.
    ///
    /// Stops early when the CPU leaves the `Running` state. A caller wanting
    /// bounded execution of a possibly non-terminating program can treat an
    /// exhausted budget with the CPU still `Running` as an abnormal halt.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib8085::{Bus, Cpu, CpuState, MemoryBus, MEMORY_BASE};
    ///
    /// let mut bus = Bus::new();
    /// // MOV B, B forever; never halts on its own.
    /// for addr in MEMORY_BASE..MEMORY_BASE + 16 {
    ///     bus.write(addr, 0x40).unwrap();
    /// }
    ///
    /// let mut cpu = Cpu::new(bus);
    /// assert_eq!(cpu.run_for_instructions(10), 10);
    /// assert_eq!(cpu.state(), CpuState::Running);
    /// ```
    pub fn run_for_instructions(&mut self, limit: u64) -> u64 {
        let mut executed = 0;
        while executed < limit && self.state == CpuState::Running {
            self.step();
            executed += 1;
        }
        executed
    }

    /// Resets the CPU and clears the RAM window.
    ///
    /// Registers, SP, and PC return to their power-on values, the state
    /// returns to `Running`, and every byte of [0x2000, 0x27FF] is zeroed
    /// through the bus. Addresses the bus rejects are skipped, which cannot
    /// happen with the stock [`Bus`](crate::Bus).
    pub fn reset(&mut self) {
        self.regs.clear();
        self.pc = MEMORY_BASE;
        self.sp = 0;
        self.state = CpuState::Running;

        for addr in MEMORY_BASE..=MEMORY_END {
            let _ = self.bus.write(addr, 0);
        }
    }

    fn step_inner(&mut self) -> Result<(), Fault> {
        let pc = self.pc;
        let opcode = self.bus_read(pc)?;
        let instruction =
            Instruction::decode(opcode).ok_or(Fault::UnknownInstruction { opcode, pc })?;

        trace!("{pc:#06X}: {opcode:#04X} {instruction:?}");

        if instruction == Instruction::Halt {
            debug!("halted at {pc:#06X}");
            self.state = CpuState::Halted;
            return Ok(());
        }

        self.execute(instruction)?;

        // PC now points at the last consumed byte; move one past it.
        self.pc = self.pc.wrapping_add(1);
        Ok(())
    }

    fn execute(&mut self, instruction: Instruction) -> Result<(), Fault> {
        match instruction {
            Instruction::Mov { dst, src } => match (dst, src) {
                (Operand::Register(dst), Operand::Register(src)) => {
                    let value = self.regs.get(src);
                    self.regs.set(dst, value);
                }
                (Operand::Memory, Operand::Register(src)) => {
                    let addr = self.regs.hl();
                    let value = self.regs.get(src);
                    self.bus_write(addr, value)?;
                }
                (Operand::Register(dst), Operand::Memory) => {
                    let addr = self.regs.hl();
                    let value = self.bus_read(addr)?;
                    self.regs.set(dst, value);
                }
                // That encoding is the HLT opcode; decode never yields it.
                (Operand::Memory, Operand::Memory) => {
                    unreachable!("MOV M, M decodes as HLT")
                }
            },
            Instruction::Mvi { dst } => {
                let value = self.fetch_operand_byte()?;
                match dst {
                    Operand::Register(dst) => self.regs.set(dst, value),
                    Operand::Memory => {
                        let addr = self.regs.hl();
                        self.bus_write(addr, value)?;
                    }
                }
            }
            Instruction::Lxi { pair } => {
                let low = self.fetch_operand_byte()?;
                let high = self.fetch_operand_byte()?;
                match pair {
                    RegisterPair::BC => {
                        self.regs.set(Register::B, high);
                        self.regs.set(Register::C, low);
                    }
                    RegisterPair::DE => {
                        self.regs.set(Register::D, high);
                        self.regs.set(Register::E, low);
                    }
                    RegisterPair::HL => {
                        self.regs.set(Register::H, high);
                        self.regs.set(Register::L, low);
                    }
                    RegisterPair::SP => {
                        self.sp = combine_bytes(low, high);
                    }
                }
            }
            Instruction::Lda => {
                let addr = self.fetch_operand_word()?;
                let value = self.bus_read(addr)?;
                self.regs.set(Register::A, value);
            }
            Instruction::Sta => {
                let addr = self.fetch_operand_word()?;
                let value = self.regs.get(Register::A);
                self.bus_write(addr, value)?;
            }
            // Handled in step_inner before execution.
            Instruction::Halt => {}
        }
        Ok(())
    }

    /// Consumes the next immediate operand byte, advancing PC onto it.
    fn fetch_operand_byte(&mut self) -> Result<u8, Fault> {
        self.pc = self.pc.wrapping_add(1);
        self.bus_read(self.pc)
    }

    /// Consumes a 16-bit immediate operand, low byte first.
    fn fetch_operand_word(&mut self) -> Result<u16, Fault> {
        let low = self.fetch_operand_byte()?;
        let high = self.fetch_operand_byte()?;
        Ok(combine_bytes(low, high))
    }

    fn bus_read(&self, addr: u16) -> Result<u8, Fault> {
        let pc = self.pc;
        self.bus.read(addr).map_err(|e| fault_from_bus(e, pc))
    }

    fn bus_write(&mut self, addr: u16, value: u8) -> Result<(), Fault> {
        let pc = self.pc;
        self.bus.write(addr, value).map_err(|e| fault_from_bus(e, pc))
    }

    // ========== Read-only accessors ==========

    /// Returns the current value of any register.
    pub fn register(&self, reg: Register) -> u8 {
        self.regs.get(reg)
    }

    /// Returns the accumulator.
    pub fn a(&self) -> u8 {
        self.regs.get(Register::A)
    }

    /// Returns register B.
    pub fn b(&self) -> u8 {
        self.regs.get(Register::B)
    }

    /// Returns register C.
    pub fn c(&self) -> u8 {
        self.regs.get(Register::C)
    }

    /// Returns register D.
    pub fn d(&self) -> u8 {
        self.regs.get(Register::D)
    }

    /// Returns register E.
    pub fn e(&self) -> u8 {
        self.regs.get(Register::E)
    }

    /// Returns register H.
    pub fn h(&self) -> u8 {
        self.regs.get(Register::H)
    }

    /// Returns register L.
    pub fn l(&self) -> u8 {
        self.regs.get(Register::L)
    }

    /// Returns the program counter.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the stack pointer.
    pub fn sp(&self) -> u16 {
        self.sp
    }

    /// Returns the current run state.
    pub fn state(&self) -> CpuState {
        self.state
    }

    /// Returns the fault diagnostic if the CPU is in the `Faulted` state.
    pub fn fault(&self) -> Option<Fault> {
        match self.state {
            CpuState::Faulted(fault) => Some(fault),
            _ => None,
        }
    }

    /// Returns a shared reference to the bus.
    pub fn bus(&self) -> &M {
        &self.bus
    }

    /// Returns a mutable reference to the bus, e.g. for loading a program.
    pub fn bus_mut(&mut self) -> &mut M {
        &mut self.bus
    }

    /// Consumes the CPU and returns the bus.
    pub fn into_bus(self) -> M {
        self.bus
    }
}

/// Combines a low and a high byte into a 16-bit value, `(high << 8) | low`.
///
/// Immediate 16-bit operands are stored low byte first; this is the one
/// place the ordering is applied for LXI, LDA, and STA alike.
#[inline(always)]
fn combine_bytes(low: u8, high: u8) -> u16 {
    (high as u16) << 8 | low as u16
}

fn fault_from_bus(error: BusError, pc: u16) -> Fault {
    match error {
        BusError::OutOfRange { addr } => Fault::OutOfRange { addr, pc },
    }
}

impl<M: MemoryBus> std::fmt::Display for Cpu<M> {
    /// Formats a register dump for diagnostics.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "A:  {:#04X}", self.a())?;
        writeln!(f, "B:  {:#04X}", self.b())?;
        writeln!(f, "C:  {:#04X}", self.c())?;
        writeln!(f, "D:  {:#04X}", self.d())?;
        writeln!(f, "E:  {:#04X}", self.e())?;
        writeln!(f, "H:  {:#04X}", self.h())?;
        writeln!(f, "L:  {:#04X}", self.l())?;
        writeln!(f, "PC: {:#06X}", self.pc)?;
        write!(f, "SP: {:#06X}", self.sp)
    }
}

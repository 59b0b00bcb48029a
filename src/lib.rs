//! # 8085 CPU Emulator Core
//!
//! A functional emulator for the data-movement subset of the Intel 8085
//! instruction set: register-to-register moves, immediate loads,
//! register-pair immediate loads, direct memory load/store, and halt.
//!
//! The crate is built from three components, leaf-first:
//!
//! - [`AddressableMemory`] - a fixed 2KB byte store for the logical address
//!   window [0x2000, 0x27FF]
//! - [`Bus`] - mediates every CPU memory access and enforces the
//!   address-window invariant; the CPU is generic over the [`MemoryBus`]
//!   trait so the address map can evolve without touching the engine
//! - [`Cpu`] - the register file, program counter, stack pointer, and the
//!   fetch-decode-execute loop
//!
//! Opcodes are decoded by bitmask field extraction (see [`Instruction`]),
//! not a flat lookup table. Execution is deterministic batch semantics:
//! the first out-of-range access or unrecognized opcode is fatal to the run
//! and surfaces as a [`Fault`] on the terminal [`CpuState`].
//!
//! ## Quick Start
//!
//! ```rust
//! use lib8085::{Bus, Cpu, CpuState, MEMORY_BASE};
//!
//! // MVI B, 0x42 / MOV A, B / HLT
//! let mut bus = Bus::new();
//! bus.load(MEMORY_BASE, &[0x06, 0x42, 0x78, 0x76]).unwrap();
//!
//! let mut cpu = Cpu::new(bus);
//! cpu.run();
//!
//! assert_eq!(cpu.state(), CpuState::Halted);
//! assert_eq!(cpu.a(), 0x42);
//! assert_eq!(cpu.b(), 0x42);
//! assert_eq!(cpu.pc(), 0x2003);
//! ```
//!
//! Program loading and register display are left to the embedding
//! application: a loader places bytes through [`Bus::load`] (or validated
//! [`MemoryBus::write`] calls) before execution, and any display cadence is
//! built on the CPU's read-only accessors (a [`std::fmt::Display`] dump is
//! provided for convenience).

pub mod bus;
pub mod cpu;
pub mod memory;
pub mod opcodes;
pub mod registers;

pub use bus::{Bus, BusError, MemoryBus};
pub use cpu::{Cpu, CpuState, Fault};
pub use memory::{AddressableMemory, MEMORY_BASE, MEMORY_END, MEMORY_SIZE};
pub use opcodes::{Instruction, HALT, LDA, STA};
pub use registers::{Operand, Register, RegisterFile, RegisterPair};

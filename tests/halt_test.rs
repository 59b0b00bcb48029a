//! Tests for HLT terminal semantics.

use lib8085::{Bus, Cpu, CpuState, MEMORY_BASE};

fn setup_cpu(program: &[u8]) -> Cpu<Bus> {
    let mut bus = Bus::new();
    bus.load(MEMORY_BASE, program).unwrap();
    Cpu::new(bus)
}

#[test]
fn test_halt_only_program() {
    let mut cpu = setup_cpu(&[0x76]);
    cpu.run();

    assert_eq!(cpu.state(), CpuState::Halted);
    // PC stays at the halt byte; it is fetched but never stepped past.
    assert_eq!(cpu.pc(), MEMORY_BASE);
}

#[test]
fn test_halt_mutates_no_registers() {
    let mut cpu = setup_cpu(&[0x76]);
    cpu.run();

    assert_eq!(cpu.a(), 0x00);
    assert_eq!(cpu.b(), 0x00);
    assert_eq!(cpu.c(), 0x00);
    assert_eq!(cpu.d(), 0x00);
    assert_eq!(cpu.e(), 0x00);
    assert_eq!(cpu.h(), 0x00);
    assert_eq!(cpu.l(), 0x00);
    assert_eq!(cpu.sp(), 0x0000);
}

#[test]
fn test_halt_is_successful_termination() {
    let mut cpu = setup_cpu(&[0x76]);
    cpu.run();

    assert_eq!(cpu.fault(), None);
}

#[test]
fn test_bytes_after_halt_are_never_fetched() {
    // HLT followed by an unknown byte that would fault if reached.
    let mut cpu = setup_cpu(&[0x76, 0xFF]);
    cpu.run();

    assert_eq!(cpu.state(), CpuState::Halted);
}

#[test]
fn test_halt_leaves_pc_at_halt_byte_mid_program() {
    // MVI B, 0x42 / MOV A, B / HLT at 0x2003
    let mut cpu = setup_cpu(&[0x06, 0x42, 0x78, 0x76]);
    cpu.run();

    assert_eq!(cpu.state(), CpuState::Halted);
    assert_eq!(cpu.pc(), 0x2003);
}

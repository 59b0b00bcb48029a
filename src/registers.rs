//! # Register File
//!
//! The 8085's seven general-purpose 8-bit registers, addressed both by name
//! and by the 3-bit codes embedded in opcode bytes. The code `0b110` is
//! reserved: in an operand position it selects the memory cell addressed by
//! the H:L pair, never a real register, so it is modeled as a distinct
//! [`Operand`] variant rather than a register slot.

/// One of the seven 8-bit registers.
///
/// The discriminant of each variant is its 3-bit operand code as it appears
/// in MOV/MVI opcode bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Register {
    /// Accumulator (code `0b111`).
    A = 0b111,
    B = 0b000,
    C = 0b001,
    D = 0b010,
    E = 0b011,
    H = 0b100,
    L = 0b101,
}

impl Register {
    /// Decodes a 3-bit operand code into a register.
    ///
    /// Returns `None` for the reserved memory code `0b110` and for values
    /// that do not fit in 3 bits.
    pub fn from_code(code: u8) -> Option<Register> {
        match code {
            0b111 => Some(Register::A),
            0b000 => Some(Register::B),
            0b001 => Some(Register::C),
            0b010 => Some(Register::D),
            0b011 => Some(Register::E),
            0b100 => Some(Register::H),
            0b101 => Some(Register::L),
            _ => None,
        }
    }

    /// Returns the register's 3-bit operand code.
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// A register pair named by the 2-bit code in an LXI opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RegisterPair {
    /// B (high) and C (low), code `0b00`.
    BC = 0b00,
    /// D (high) and E (low), code `0b01`.
    DE = 0b01,
    /// H (high) and L (low), code `0b10`.
    HL = 0b10,
    /// The 16-bit stack pointer, code `0b11`.
    SP = 0b11,
}

impl RegisterPair {
    /// Decodes a 2-bit pair code. All four values are valid.
    pub fn from_code(code: u8) -> Option<RegisterPair> {
        match code {
            0b00 => Some(RegisterPair::BC),
            0b01 => Some(RegisterPair::DE),
            0b10 => Some(RegisterPair::HL),
            0b11 => Some(RegisterPair::SP),
            _ => None,
        }
    }
}

/// Operand position of a MOV/MVI instruction: a real register, or the memory
/// cell addressed through H:L (code `0b110`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Register(Register),
    /// Memory addressed by the H:L pair (H high byte, L low byte).
    Memory,
}

impl Operand {
    /// Decodes a 3-bit operand code.
    pub fn from_code(code: u8) -> Option<Operand> {
        match code {
            0b110 => Some(Operand::Memory),
            _ => Register::from_code(code).map(Operand::Register),
        }
    }
}

/// Storage for the seven registers, indexed by 3-bit register code.
///
/// Backed by a small fixed-size array; the reserved slot for code `0b110` is
/// unreachable because [`Register`] can never carry that code.
#[derive(Debug, Clone, Default)]
pub struct RegisterFile {
    regs: [u8; 8],
}

impl RegisterFile {
    /// Creates a register file with every register zeroed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current value of a register.
    #[inline(always)]
    pub fn get(&self, reg: Register) -> u8 {
        self.regs[reg.code() as usize]
    }

    /// Sets a register to a new value.
    #[inline(always)]
    pub fn set(&mut self, reg: Register, value: u8) {
        self.regs[reg.code() as usize] = value;
    }

    /// Returns the 16-bit address formed by H:L (H high, L low).
    #[inline(always)]
    pub fn hl(&self) -> u16 {
        (self.get(Register::H) as u16) << 8 | self.get(Register::L) as u16
    }

    /// Zeroes every register.
    pub fn clear(&mut self) {
        self.regs = [0; 8];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_codes() {
        assert_eq!(Register::A.code(), 0b111);
        assert_eq!(Register::B.code(), 0b000);
        assert_eq!(Register::C.code(), 0b001);
        assert_eq!(Register::D.code(), 0b010);
        assert_eq!(Register::E.code(), 0b011);
        assert_eq!(Register::H.code(), 0b100);
        assert_eq!(Register::L.code(), 0b101);
    }

    #[test]
    fn test_register_from_code_round_trip() {
        for reg in [
            Register::A,
            Register::B,
            Register::C,
            Register::D,
            Register::E,
            Register::H,
            Register::L,
        ] {
            assert_eq!(Register::from_code(reg.code()), Some(reg));
        }
    }

    #[test]
    fn test_memory_code_is_not_a_register() {
        assert_eq!(Register::from_code(0b110), None);
        assert_eq!(Operand::from_code(0b110), Some(Operand::Memory));
    }

    #[test]
    fn test_pair_codes() {
        assert_eq!(RegisterPair::from_code(0b00), Some(RegisterPair::BC));
        assert_eq!(RegisterPair::from_code(0b01), Some(RegisterPair::DE));
        assert_eq!(RegisterPair::from_code(0b10), Some(RegisterPair::HL));
        assert_eq!(RegisterPair::from_code(0b11), Some(RegisterPair::SP));
        assert_eq!(RegisterPair::from_code(0b100), None);
    }

    #[test]
    fn test_register_file_get_set() {
        let mut regs = RegisterFile::new();

        regs.set(Register::A, 0x42);
        regs.set(Register::B, 0x99);

        assert_eq!(regs.get(Register::A), 0x42);
        assert_eq!(regs.get(Register::B), 0x99);
        assert_eq!(regs.get(Register::C), 0x00);
    }

    #[test]
    fn test_hl_forms_pointer() {
        let mut regs = RegisterFile::new();

        regs.set(Register::H, 0x23);
        regs.set(Register::L, 0x45);

        assert_eq!(regs.hl(), 0x2345);
    }

    #[test]
    fn test_clear_zeroes_everything() {
        let mut regs = RegisterFile::new();
        regs.set(Register::H, 0xFF);
        regs.set(Register::A, 0xFF);

        regs.clear();

        assert_eq!(regs.get(Register::H), 0x00);
        assert_eq!(regs.get(Register::A), 0x00);
        assert_eq!(regs.hl(), 0x0000);
    }
}

//! # Opcode Decoding
//!
//! The data-movement subset of the 8085 instruction set, decoded by bitmask
//! rather than a flat 256-entry table. The instruction formats follow regular
//! bit-field layouts, so register identity is computed arithmetically from
//! subfields of the opcode byte instead of enumerating near-duplicate cases:
//!
//! ```text
//! MOV  01DDDSSS   DDD = destination code, SSS = source code
//! MVI  00DDD110   one immediate byte follows
//! LXI  00RP0001   RP = register pair, two immediate bytes follow (lo, hi)
//! LDA  00111010   two immediate address bytes follow (lo, hi)
//! STA  00110010   two immediate address bytes follow (lo, hi)
//! HLT  01110110   (the MOV M, M slot)
//! ```
//!
//! `0b110` in a DDD/SSS position selects the memory cell addressed by H:L.
//! The byte that would encode MOV M, M is the HLT opcode; it always decodes
//! as [`Instruction::Halt`], never as a memory-to-memory move.

use crate::registers::{Operand, RegisterPair};

/// Stops execution (the MOV M, M slot in the MOV block).
pub const HALT: u8 = 0x76;

/// Loads the accumulator from a direct 16-bit address.
pub const LDA: u8 = 0x3A;

/// Stores the accumulator to a direct 16-bit address.
pub const STA: u8 = 0x32;

const MOV_MASK: u8 = 0b1100_0000;
const MOV_BITS: u8 = 0b0100_0000;
const MVI_MASK: u8 = 0b1100_0111;
const MVI_BITS: u8 = 0b0000_0110;
const LXI_MASK: u8 = 0b1100_1111;
const LXI_BITS: u8 = 0b0000_0001;

/// A decoded instruction.
///
/// Instructions are transient: one is produced per fetched opcode byte,
/// executed, and discarded. Immediate operand bytes are not part of the
/// decode; the CPU fetches them from memory while executing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// HLT - stop execution.
    Halt,
    /// MOV dst, src - copy a byte between registers and/or memory via H:L.
    Mov { dst: Operand, src: Operand },
    /// MVI dst, data8 - load an immediate byte.
    Mvi { dst: Operand },
    /// LXI rp, data16 - load a register pair (or SP) with an immediate word.
    Lxi { pair: RegisterPair },
    /// LDA addr16 - load A from a direct address.
    Lda,
    /// STA addr16 - store A to a direct address.
    Sta,
}

impl Instruction {
    /// Decodes an opcode byte, or returns `None` for a byte that matches no
    /// recognized pattern.
    ///
    /// 0x00 is not special: it matches none of the patterns and decodes to
    /// `None` like any other unknown byte.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib8085::{Instruction, Operand, Register};
    ///
    /// // MOV A, B
    /// assert_eq!(
    ///     Instruction::decode(0x78),
    ///     Some(Instruction::Mov {
    ///         dst: Operand::Register(Register::A),
    ///         src: Operand::Register(Register::B),
    ///     })
    /// );
    ///
    /// assert_eq!(Instruction::decode(0x00), None);
    /// ```
    pub fn decode(opcode: u8) -> Option<Instruction> {
        // HLT occupies the MOV M, M slot and must win over the MOV pattern.
        if opcode == HALT {
            return Some(Instruction::Halt);
        }

        if opcode & MOV_MASK == MOV_BITS {
            let dst = Operand::from_code((opcode >> 3) & 0b111)?;
            let src = Operand::from_code(opcode & 0b111)?;
            return Some(Instruction::Mov { dst, src });
        }

        if opcode & MVI_MASK == MVI_BITS {
            let dst = Operand::from_code((opcode >> 3) & 0b111)?;
            return Some(Instruction::Mvi { dst });
        }

        if opcode & LXI_MASK == LXI_BITS {
            let pair = RegisterPair::from_code((opcode >> 4) & 0b11)?;
            return Some(Instruction::Lxi { pair });
        }

        match opcode {
            LDA => Some(Instruction::Lda),
            STA => Some(Instruction::Sta),
            _ => None,
        }
    }

    /// Total instruction size in bytes, opcode plus immediate operands.
    pub fn size_bytes(self) -> u8 {
        match self {
            Instruction::Halt | Instruction::Mov { .. } => 1,
            Instruction::Mvi { .. } => 2,
            Instruction::Lxi { .. } | Instruction::Lda | Instruction::Sta => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registers::Register;

    #[test]
    fn test_decode_halt() {
        assert_eq!(Instruction::decode(0x76), Some(Instruction::Halt));
    }

    #[test]
    fn test_decode_mov_register_to_register() {
        // MOV A, B = 01 111 000
        assert_eq!(
            Instruction::decode(0x78),
            Some(Instruction::Mov {
                dst: Operand::Register(Register::A),
                src: Operand::Register(Register::B),
            })
        );
        // MOV B, A = 01 000 111
        assert_eq!(
            Instruction::decode(0x47),
            Some(Instruction::Mov {
                dst: Operand::Register(Register::B),
                src: Operand::Register(Register::A),
            })
        );
    }

    #[test]
    fn test_decode_mov_memory_operands() {
        // MOV M, A = 01 110 111
        assert_eq!(
            Instruction::decode(0x77),
            Some(Instruction::Mov {
                dst: Operand::Memory,
                src: Operand::Register(Register::A),
            })
        );
        // MOV A, M = 01 111 110
        assert_eq!(
            Instruction::decode(0x7E),
            Some(Instruction::Mov {
                dst: Operand::Register(Register::A),
                src: Operand::Memory,
            })
        );
    }

    #[test]
    fn test_mov_m_m_is_halt_not_mov() {
        // 01 110 110 would be MOV M, M; that byte is the HLT opcode.
        assert_eq!(Instruction::decode(0b0111_0110), Some(Instruction::Halt));
    }

    #[test]
    fn test_decode_mvi_all_destinations() {
        let cases = [
            (0x3E, Operand::Register(Register::A)),
            (0x06, Operand::Register(Register::B)),
            (0x0E, Operand::Register(Register::C)),
            (0x16, Operand::Register(Register::D)),
            (0x1E, Operand::Register(Register::E)),
            (0x26, Operand::Register(Register::H)),
            (0x2E, Operand::Register(Register::L)),
            (0x36, Operand::Memory),
        ];
        for (opcode, dst) in cases {
            assert_eq!(
                Instruction::decode(opcode),
                Some(Instruction::Mvi { dst }),
                "opcode {opcode:#04X}"
            );
        }
    }

    #[test]
    fn test_decode_lxi_all_pairs() {
        assert_eq!(
            Instruction::decode(0x01),
            Some(Instruction::Lxi {
                pair: RegisterPair::BC
            })
        );
        assert_eq!(
            Instruction::decode(0x11),
            Some(Instruction::Lxi {
                pair: RegisterPair::DE
            })
        );
        assert_eq!(
            Instruction::decode(0x21),
            Some(Instruction::Lxi {
                pair: RegisterPair::HL
            })
        );
        assert_eq!(
            Instruction::decode(0x31),
            Some(Instruction::Lxi {
                pair: RegisterPair::SP
            })
        );
    }

    #[test]
    fn test_decode_lda_sta() {
        assert_eq!(Instruction::decode(0x3A), Some(Instruction::Lda));
        assert_eq!(Instruction::decode(0x32), Some(Instruction::Sta));
    }

    #[test]
    fn test_decode_unknown_bytes() {
        // 0x00 (the 8085 NOP slot) is deliberately not assigned a meaning.
        assert_eq!(Instruction::decode(0x00), None);
        // ALU block bytes are outside this subset.
        assert_eq!(Instruction::decode(0x80), None);
        assert_eq!(Instruction::decode(0xC3), None);
        assert_eq!(Instruction::decode(0xFF), None);
    }

    #[test]
    fn test_size_bytes() {
        assert_eq!(Instruction::decode(0x76).unwrap().size_bytes(), 1);
        assert_eq!(Instruction::decode(0x78).unwrap().size_bytes(), 1);
        assert_eq!(Instruction::decode(0x06).unwrap().size_bytes(), 2);
        assert_eq!(Instruction::decode(0x21).unwrap().size_bytes(), 3);
        assert_eq!(Instruction::decode(0x3A).unwrap().size_bytes(), 3);
        assert_eq!(Instruction::decode(0x32).unwrap().size_bytes(), 3);
    }
}

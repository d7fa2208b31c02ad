use rv32i_common::error::OpcodeError;
use rv32i_common::riscv::{BuiltinOpcode, InstructionType, Register};

use super::decoder::{self, decode_opcode};

/// A decoded RV32I instruction.
///
/// The register fields hold whatever bits sit at their positions in the word;
/// formats that do not use a field (e.g. `rd` of a store) simply ignore it.
/// `imm` carries the immediate of the instruction's format, already sign
/// extended, or the shift amount for `slli`/`srli`/`srai`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub word: u32,
    pub opcode: BuiltinOpcode,
    pub rd: Register,
    pub rs1: Register,
    pub rs2: Register,
    pub imm: i32,
}

impl Instruction {
    pub fn decode(word: u32) -> Result<Self, OpcodeError> {
        let opcode = decode_opcode(word)?;
        let imm = match opcode.ins_type() {
            InstructionType::RType => 0,
            InstructionType::IType => decoder::imm_i(word),
            InstructionType::ITypeShamt => decoder::rs2(word) as i32,
            InstructionType::SType => decoder::imm_s(word),
            InstructionType::BType => decoder::imm_b(word),
            InstructionType::UType => decoder::imm_u(word),
            InstructionType::JType => decoder::imm_j(word),
        };

        Ok(Self {
            word,
            opcode,
            rd: Register::from(decoder::rd(word)),
            rs1: Register::from(decoder::rs1(word)),
            rs2: Register::from(decoder::rs2(word)),
            imm,
        })
    }

    /// The immediate as an unsigned bit pattern.
    pub fn imm_bits(&self) -> u32 {
        self.imm as u32
    }

    pub fn is_branch_or_jump_instruction(&self) -> bool {
        self.opcode.is_branch_or_jump()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rv32i_common::riscv::encode_instruction;

    #[test]
    fn test_decode_picks_format_immediate() {
        let lui = Instruction::decode(0xabcde237).unwrap();
        assert_eq!(lui.opcode, BuiltinOpcode::LUI);
        assert_eq!(lui.rd, Register::X4);
        assert_eq!(lui.imm_bits(), 0xabcde000);

        let sw = Instruction::decode(encode_instruction(BuiltinOpcode::SW, 1, 2, -8i32 as u32)).unwrap();
        assert_eq!((sw.rs1, sw.rs2, sw.imm), (Register::X1, Register::X2, -8));

        let srai = Instruction::decode(encode_instruction(BuiltinOpcode::SRAI, 5, 6, 31)).unwrap();
        assert_eq!((srai.rd, srai.rs1, srai.imm), (Register::X5, Register::X6, 31));

        let add = Instruction::decode(0x002081b3).unwrap();
        assert_eq!(add.imm, 0);
        assert!(!add.is_branch_or_jump_instruction());
    }

    #[test]
    fn test_decode_rejects_illegal_word() {
        assert_eq!(
            Instruction::decode(0xffffffff),
            Err(OpcodeError::IllegalInstruction(0xffffffff))
        );
    }
}

//! Disassembly of decoded instructions.
//!
//! The mnemonic is left-aligned in a fixed column and the operands follow in
//! `rd, rs1, rs2/imm` order. Branch and `jal` targets are shown as absolute
//! addresses, which is why rendering needs the pc of the instruction.

use rv32i_common::constants::MNEMONIC_WIDTH;
use rv32i_common::riscv::{BuiltinOpcode::*, InstructionType};

use super::Instruction;

/// Text rendered for any word that is not an RV32I instruction.
pub const ILLEGAL_INSTRUCTION: &str = "ERROR: UNIMPLEMENTED INSTRUCTION";

// pred/succ sets of a fence, bit 3 = i, 2 = o, 1 = r, 0 = w
fn fence_set(bits: u32) -> String {
    "iorw"
        .chars()
        .enumerate()
        .filter(|(i, _)| bits & (0b1000 >> i) != 0)
        .map(|(_, c)| c)
        .collect()
}

impl Instruction {
    /// Render this instruction as it sits at address `pc`.
    pub fn render(&self, pc: u32) -> String {
        let Self { opcode, rd, rs1, rs2, imm, .. } = *self;

        let operands = match opcode {
            ECALL | EBREAK => return opcode.to_string(),
            FENCE => format!(
                "{},{}",
                fence_set((self.imm_bits() >> 4) & 0xf),
                fence_set(self.imm_bits() & 0xf)
            ),
            LUI | AUIPC => format!("{rd},0x{:05x}", self.imm_bits() >> 12),
            JAL => format!("{rd},0x{:08x}", pc.wrapping_add(self.imm_bits())),
            JALR | LB | LH | LW | LBU | LHU => format!("{rd},{imm}({rs1})"),
            _ => match opcode.ins_type() {
                InstructionType::RType => format!("{rd},{rs1},{rs2}"),
                InstructionType::IType | InstructionType::ITypeShamt => {
                    format!("{rd},{rs1},{imm}")
                }
                InstructionType::SType => format!("{rs2},{imm}({rs1})"),
                InstructionType::BType => {
                    format!("{rs1},{rs2},0x{:08x}", pc.wrapping_add(self.imm_bits()))
                }
                InstructionType::UType | InstructionType::JType => unreachable!(),
            },
        };

        format!("{:<width$}{operands}", opcode.mnemonic(), width = MNEMONIC_WIDTH)
    }
}

/// Render the word found at `pc`, whether or not it is a valid instruction.
pub fn render(pc: u32, word: u32) -> String {
    match Instruction::decode(word) {
        Ok(ins) => ins.render(pc),
        Err(_) => ILLEGAL_INSTRUCTION.to_string(),
    }
}

/// One disassembly listing line: `pppppppp: wwwwwwww  <instruction>`.
pub fn render_listing(pc: u32, word: u32) -> String {
    format!("{:08x}: {:08x}  {}", pc, word, render(pc, word))
}

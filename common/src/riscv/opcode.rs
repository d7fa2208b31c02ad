//! The RV32I base instruction set as a closed enumeration.
//!
//! Encodings follow the RISC-V Unprivileged ISA, chapter 2 (RV32I Base Integer
//! Instruction Set). Each variant knows its major opcode, its `funct3`/`funct7`
//! selectors where the format has them, and its encoding format.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use variant_count::VariantCount;

#[allow(clippy::unusual_byte_groupings)]
#[rustfmt::skip]
mod major {
    pub const OPC_LUI      : u8 = 0b_011_0111;
    pub const OPC_AUIPC    : u8 = 0b_001_0111;
    pub const OPC_JAL      : u8 = 0b_110_1111;
    pub const OPC_JALR     : u8 = 0b_110_0111;
    pub const OPC_BRANCH   : u8 = 0b_110_0011;
    pub const OPC_LOAD     : u8 = 0b_000_0011;
    pub const OPC_STORE    : u8 = 0b_010_0011;
    pub const OPC_ALU_IMM  : u8 = 0b_001_0011;
    pub const OPC_ALU      : u8 = 0b_011_0011;
    pub const OPC_MISC_MEM : u8 = 0b_000_1111;
    pub const OPC_SYSTEM   : u8 = 0b_111_0011;
}
pub use major::*;

/// Encoding format of an instruction; decides which immediate it carries.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum InstructionType {
    RType,
    IType,
    /// I-type whose immediate is a 5-bit shift amount with `funct7` above it.
    ITypeShamt,
    SType,
    BType,
    UType,
    JType,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize, VariantCount)]
#[allow(clippy::upper_case_acronyms)]
pub enum BuiltinOpcode {
    // R-type instructions
    ADD,  // Add
    SUB,  // Subtract
    SLL,  // Shift left logical
    SLT,  // Set less than
    SLTU, // Set less than unsigned
    XOR,  // Exclusive OR
    SRL,  // Shift right logical
    SRA,  // Shift right arithmetic
    OR,   // OR
    AND,  // AND

    // I-type instructions
    ADDI,   // Add immediate
    SLLI,   // Shift left logical (immediate)
    SLTI,   // Set less than immediate
    SLTIU,  // Set less than immediate unsigned
    XORI,   // Exclusive OR immediate
    SRLI,   // Shift right logical (immediate)
    SRAI,   // Shift right arithmetic (immediate)
    ORI,    // OR immediate
    ANDI,   // AND immediate
    LB,     // Load byte
    LH,     // Load halfword
    LW,     // Load word
    LBU,    // Load byte unsigned
    LHU,    // Load halfword unsigned
    JALR,   // Jump and link register
    ECALL,  // Environment call
    EBREAK, // Environment break
    FENCE,  // Fence (memory ordering)

    // S-type instructions
    SB, // Store byte
    SH, // Store halfword
    SW, // Store word

    // B-type instructions
    BEQ,  // Branch if equal
    BNE,  // Branch if not equal
    BLT,  // Branch if less than
    BGE,  // Branch if greater than or equal
    BLTU, // Branch if less than unsigned
    BGEU, // Branch if greater than or equal unsigned

    // U-type instructions
    LUI,   // Load upper immediate
    AUIPC, // Add upper immediate to PC

    // J-type instructions
    JAL, // Jump and link
}

impl BuiltinOpcode {
    /// Every instruction of the base set, in declaration order.
    #[rustfmt::skip]
    pub const ALL: [BuiltinOpcode; BuiltinOpcode::VARIANT_COUNT] = [
        Self::ADD, Self::SUB, Self::SLL, Self::SLT, Self::SLTU,
        Self::XOR, Self::SRL, Self::SRA, Self::OR, Self::AND,
        Self::ADDI, Self::SLLI, Self::SLTI, Self::SLTIU, Self::XORI,
        Self::SRLI, Self::SRAI, Self::ORI, Self::ANDI,
        Self::LB, Self::LH, Self::LW, Self::LBU, Self::LHU,
        Self::JALR, Self::ECALL, Self::EBREAK, Self::FENCE,
        Self::SB, Self::SH, Self::SW,
        Self::BEQ, Self::BNE, Self::BLT, Self::BGE, Self::BLTU, Self::BGEU,
        Self::LUI, Self::AUIPC,
        Self::JAL,
    ];

    pub fn mnemonic(&self) -> &'static str {
        match self {
            BuiltinOpcode::ADD => "add",
            BuiltinOpcode::SUB => "sub",
            BuiltinOpcode::SLL => "sll",
            BuiltinOpcode::SLT => "slt",
            BuiltinOpcode::SLTU => "sltu",
            BuiltinOpcode::XOR => "xor",
            BuiltinOpcode::SRL => "srl",
            BuiltinOpcode::SRA => "sra",
            BuiltinOpcode::OR => "or",
            BuiltinOpcode::AND => "and",

            BuiltinOpcode::ADDI => "addi",
            BuiltinOpcode::SLTI => "slti",
            BuiltinOpcode::SLTIU => "sltiu",
            BuiltinOpcode::XORI => "xori",
            BuiltinOpcode::ORI => "ori",
            BuiltinOpcode::ANDI => "andi",
            BuiltinOpcode::SLLI => "slli",
            BuiltinOpcode::SRLI => "srli",
            BuiltinOpcode::SRAI => "srai",
            BuiltinOpcode::LB => "lb",
            BuiltinOpcode::LH => "lh",
            BuiltinOpcode::LW => "lw",
            BuiltinOpcode::LBU => "lbu",
            BuiltinOpcode::LHU => "lhu",
            BuiltinOpcode::JALR => "jalr",
            BuiltinOpcode::ECALL => "ecall",
            BuiltinOpcode::EBREAK => "ebreak",
            BuiltinOpcode::FENCE => "fence",

            BuiltinOpcode::SB => "sb",
            BuiltinOpcode::SH => "sh",
            BuiltinOpcode::SW => "sw",

            BuiltinOpcode::BEQ => "beq",
            BuiltinOpcode::BNE => "bne",
            BuiltinOpcode::BLT => "blt",
            BuiltinOpcode::BGE => "bge",
            BuiltinOpcode::BLTU => "bltu",
            BuiltinOpcode::BGEU => "bgeu",

            BuiltinOpcode::LUI => "lui",
            BuiltinOpcode::AUIPC => "auipc",

            BuiltinOpcode::JAL => "jal",
        }
    }

    /// The 7-bit major opcode, bits [6:0] of the instruction word.
    pub fn raw(&self) -> u8 {
        match self {
            BuiltinOpcode::ADD
            | BuiltinOpcode::SUB
            | BuiltinOpcode::SLL
            | BuiltinOpcode::SLT
            | BuiltinOpcode::SLTU
            | BuiltinOpcode::XOR
            | BuiltinOpcode::SRL
            | BuiltinOpcode::SRA
            | BuiltinOpcode::OR
            | BuiltinOpcode::AND => OPC_ALU,

            BuiltinOpcode::ADDI
            | BuiltinOpcode::SLTI
            | BuiltinOpcode::SLTIU
            | BuiltinOpcode::XORI
            | BuiltinOpcode::ORI
            | BuiltinOpcode::ANDI
            | BuiltinOpcode::SLLI
            | BuiltinOpcode::SRLI
            | BuiltinOpcode::SRAI => OPC_ALU_IMM,

            BuiltinOpcode::LB
            | BuiltinOpcode::LH
            | BuiltinOpcode::LW
            | BuiltinOpcode::LBU
            | BuiltinOpcode::LHU => OPC_LOAD,

            BuiltinOpcode::JALR => OPC_JALR,
            BuiltinOpcode::ECALL | BuiltinOpcode::EBREAK => OPC_SYSTEM,
            BuiltinOpcode::FENCE => OPC_MISC_MEM,

            BuiltinOpcode::SB | BuiltinOpcode::SH | BuiltinOpcode::SW => OPC_STORE,

            BuiltinOpcode::BEQ
            | BuiltinOpcode::BNE
            | BuiltinOpcode::BLT
            | BuiltinOpcode::BGE
            | BuiltinOpcode::BLTU
            | BuiltinOpcode::BGEU => OPC_BRANCH,

            BuiltinOpcode::LUI => OPC_LUI,
            BuiltinOpcode::AUIPC => OPC_AUIPC,
            BuiltinOpcode::JAL => OPC_JAL,
        }
    }

    /// The `funct3` selector, or `None` for U- and J-type instructions.
    pub fn fn3(&self) -> Option<u8> {
        let fn3 = match self {
            BuiltinOpcode::ADD | BuiltinOpcode::SUB | BuiltinOpcode::ADDI => 0b000,
            BuiltinOpcode::SLL | BuiltinOpcode::SLLI => 0b001,
            BuiltinOpcode::SLT | BuiltinOpcode::SLTI => 0b010,
            BuiltinOpcode::SLTU | BuiltinOpcode::SLTIU => 0b011,
            BuiltinOpcode::XOR | BuiltinOpcode::XORI => 0b100,
            BuiltinOpcode::SRL | BuiltinOpcode::SRA => 0b101,
            BuiltinOpcode::SRLI | BuiltinOpcode::SRAI => 0b101,
            BuiltinOpcode::OR | BuiltinOpcode::ORI => 0b110,
            BuiltinOpcode::AND | BuiltinOpcode::ANDI => 0b111,

            BuiltinOpcode::LB | BuiltinOpcode::SB => 0b000,
            BuiltinOpcode::LH | BuiltinOpcode::SH => 0b001,
            BuiltinOpcode::LW | BuiltinOpcode::SW => 0b010,
            BuiltinOpcode::LBU => 0b100,
            BuiltinOpcode::LHU => 0b101,

            BuiltinOpcode::JALR
            | BuiltinOpcode::ECALL
            | BuiltinOpcode::EBREAK
            | BuiltinOpcode::FENCE => 0b000,

            BuiltinOpcode::BEQ => 0b000,
            BuiltinOpcode::BNE => 0b001,
            BuiltinOpcode::BLT => 0b100,
            BuiltinOpcode::BGE => 0b101,
            BuiltinOpcode::BLTU => 0b110,
            BuiltinOpcode::BGEU => 0b111,

            BuiltinOpcode::LUI | BuiltinOpcode::AUIPC | BuiltinOpcode::JAL => return None,
        };
        Some(fn3)
    }

    /// The `funct7` selector for R-type and shift-immediate instructions.
    pub fn fn7(&self) -> Option<u8> {
        match self.ins_type() {
            InstructionType::RType | InstructionType::ITypeShamt => match self {
                BuiltinOpcode::SUB | BuiltinOpcode::SRA | BuiltinOpcode::SRAI => Some(0b010_0000),
                _ => Some(0b000_0000),
            },
            _ => None,
        }
    }

    pub fn ins_type(&self) -> InstructionType {
        match self.raw() {
            OPC_ALU => InstructionType::RType,
            OPC_ALU_IMM => match self {
                BuiltinOpcode::SLLI | BuiltinOpcode::SRLI | BuiltinOpcode::SRAI => {
                    InstructionType::ITypeShamt
                }
                _ => InstructionType::IType,
            },
            OPC_STORE => InstructionType::SType,
            OPC_BRANCH => InstructionType::BType,
            OPC_LUI | OPC_AUIPC => InstructionType::UType,
            OPC_JAL => InstructionType::JType,
            _ => InstructionType::IType,
        }
    }

    /// Returns true for instructions that may set the pc to something other than pc + 4.
    pub fn is_branch_or_jump(&self) -> bool {
        matches!(
            self,
            BuiltinOpcode::BEQ
                | BuiltinOpcode::BNE
                | BuiltinOpcode::BLT
                | BuiltinOpcode::BGE
                | BuiltinOpcode::BLTU
                | BuiltinOpcode::BGEU
                | BuiltinOpcode::JAL
                | BuiltinOpcode::JALR
        )
    }
}

impl Display for BuiltinOpcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mnemonic())
    }
}

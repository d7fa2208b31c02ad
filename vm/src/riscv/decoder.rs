//! Field decoder for RV32I instruction words.
//!
//! Every function here is total: it accepts any 32-bit value and never fails,
//! except [`decode_opcode`] which reports words that are not RV32I instructions.
//! Bit positions follow the RISC-V Unprivileged ISA, section 2.2 (base
//! instruction formats) and 2.3 (immediate encoding variants).

use rv32i_common::error::OpcodeError;
use rv32i_common::riscv::opcode::*;
use rv32i_common::riscv::BuiltinOpcode;

fn bits(val: u32, start: u32, end: u32) -> u32 {
    debug_assert!(start <= end);
    debug_assert!(end < 32);

    (val << (31 - end)) >> (31 - end + start)
}

#[rustfmt::skip]
macro_rules! field {
    ($f:ident, $start:literal, $end:literal) => {
        #[doc=concat!("extract ", stringify!($f),
                      " field from instruction word, bits ",
                      $start, "-", $end)]
        pub fn $f(word: u32) -> u32 {
            bits(word, $start, $end)
        }
    };
}

field!(opcode, 0, 6);
field!(rd, 7, 11);
field!(funct3, 12, 14);
field!(rs1, 15, 19);
field!(rs2, 20, 24);
field!(funct7, 25, 31);

// The sign bit of every immediate is bit 31 of the word, so an arithmetic
// shift of the word itself performs the sign extension.
fn sx(word: u32) -> i32 {
    word as i32
}

/// extract immediate from instruction of type I, sign-extended from bit 11
pub fn imm_i(word: u32) -> i32 {
    sx(word) >> 20
}

/// extract immediate from instruction of type U, low 12 bits zero
pub fn imm_u(word: u32) -> i32 {
    sx(word & 0xffff_f000)
}

/// extract immediate from instruction of type S, sign-extended from bit 11
pub fn imm_s(word: u32) -> i32 {
    let mut imm = (sx(word) >> 20) & !0x1f;
    imm |= bits(word, 7, 11) as i32;
    imm
}

/// extract immediate from instruction of type B, sign-extended from bit 12
pub fn imm_b(word: u32) -> i32 {
    let mut imm = (sx(word) >> 19) & !0xfff;
    imm |= (bits(word, 7, 7) << 11) as i32;
    imm |= (bits(word, 25, 30) << 5) as i32;
    imm |= (bits(word, 8, 11) << 1) as i32;
    imm
}

/// extract immediate from instruction of type J, sign-extended from bit 20
pub fn imm_j(word: u32) -> i32 {
    let mut imm = (sx(word) >> 11) & !0xf_ffff;
    imm |= (bits(word, 12, 19) << 12) as i32;
    imm |= (bits(word, 20, 20) << 11) as i32;
    imm |= (bits(word, 21, 30) << 1) as i32;
    imm
}

/// Identify the instruction a word encodes from its (opcode, funct3, funct7)
/// selectors.
///
/// Any combination RV32I leaves undefined is an
/// [`OpcodeError::IllegalInstruction`].
pub fn decode_opcode(word: u32) -> Result<BuiltinOpcode, OpcodeError> {
    use BuiltinOpcode::*;

    let op = match (opcode(word) as u8, funct3(word), funct7(word)) {
        (OPC_LUI, _, _) => LUI,
        (OPC_AUIPC, _, _) => AUIPC,
        (OPC_JAL, _, _) => JAL,
        (OPC_JALR, 0b000, _) => JALR,

        (OPC_BRANCH, 0b000, _) => BEQ,
        (OPC_BRANCH, 0b001, _) => BNE,
        (OPC_BRANCH, 0b100, _) => BLT,
        (OPC_BRANCH, 0b101, _) => BGE,
        (OPC_BRANCH, 0b110, _) => BLTU,
        (OPC_BRANCH, 0b111, _) => BGEU,

        (OPC_LOAD, 0b000, _) => LB,
        (OPC_LOAD, 0b001, _) => LH,
        (OPC_LOAD, 0b010, _) => LW,
        (OPC_LOAD, 0b100, _) => LBU,
        (OPC_LOAD, 0b101, _) => LHU,

        (OPC_STORE, 0b000, _) => SB,
        (OPC_STORE, 0b001, _) => SH,
        (OPC_STORE, 0b010, _) => SW,

        (OPC_ALU_IMM, 0b000, _) => ADDI,
        (OPC_ALU_IMM, 0b010, _) => SLTI,
        (OPC_ALU_IMM, 0b011, _) => SLTIU,
        (OPC_ALU_IMM, 0b100, _) => XORI,
        (OPC_ALU_IMM, 0b110, _) => ORI,
        (OPC_ALU_IMM, 0b111, _) => ANDI,
        (OPC_ALU_IMM, 0b001, 0b000_0000) => SLLI,
        (OPC_ALU_IMM, 0b101, 0b000_0000) => SRLI,
        (OPC_ALU_IMM, 0b101, 0b010_0000) => SRAI,

        (OPC_ALU, 0b000, 0b000_0000) => ADD,
        (OPC_ALU, 0b000, 0b010_0000) => SUB,
        (OPC_ALU, 0b001, 0b000_0000) => SLL,
        (OPC_ALU, 0b010, 0b000_0000) => SLT,
        (OPC_ALU, 0b011, 0b000_0000) => SLTU,
        (OPC_ALU, 0b100, 0b000_0000) => XOR,
        (OPC_ALU, 0b101, 0b000_0000) => SRL,
        (OPC_ALU, 0b101, 0b010_0000) => SRA,
        (OPC_ALU, 0b110, 0b000_0000) => OR,
        (OPC_ALU, 0b111, 0b000_0000) => AND,

        (OPC_MISC_MEM, 0b000, _) => FENCE,

        (OPC_SYSTEM, 0b000, _) if rd(word) == 0 && rs1(word) == 0 => match imm_i(word) {
            0 => ECALL,
            1 => EBREAK,
            _ => return Err(OpcodeError::IllegalInstruction(word)),
        },

        _ => return Err(OpcodeError::IllegalInstruction(word)),
    };

    Ok(op)
}

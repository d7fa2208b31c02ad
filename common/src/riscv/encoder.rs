//! # Instruction Encoder for RV32I
//!
//! Turns an opcode plus three operands into the 32-bit instruction word the
//! simulator fetches. The operands follow the same convention for every format:
//!
//! | Format       | `op_a` | `op_b` | `op_c`                      |
//! |--------------|--------|--------|-----------------------------|
//! | R-type       | rd     | rs1    | rs2                         |
//! | I-type       | rd     | rs1    | 12-bit immediate            |
//! | I-type shamt | rd     | rs1    | 5-bit shift amount          |
//! | S-type       | rs1    | rs2    | 12-bit byte offset          |
//! | B-type       | rs1    | rs2    | 13-bit byte offset          |
//! | U-type       | rd     | -      | 20-bit upper immediate      |
//! | J-type       | rd     | -      | 21-bit byte offset          |
//!
//! Immediates are passed as `u32` bit patterns, so negative offsets are written
//! `-16i32 as u32`. The encoder is mostly used to assemble programs for tests:
//!
//! ```rust
//! use rv32i_common::riscv::{encode_instruction, BuiltinOpcode};
//!
//! // addi x1, x0, 5
//! assert_eq!(encode_instruction(BuiltinOpcode::ADDI, 1, 0, 5), 0x00500093);
//! ```

use crate::riscv::opcode::{BuiltinOpcode, InstructionType};

fn opcode_and_funct3(opcode: BuiltinOpcode) -> u32 {
    let fn3 = opcode.fn3().unwrap_or(0) as u32;
    (opcode.raw() as u32 & 0x7F) | (fn3 << 12)
}

fn encode_r_type(opcode: BuiltinOpcode, rd: u8, rs1: u8, rs2: u32) -> u32 {
    let rd = (rd as u32 & 0x1F) << 7;
    let rs1 = (rs1 as u32 & 0x1F) << 15;
    let rs2 = (rs2 & 0x1F) << 20;
    let funct7 = (opcode.fn7().unwrap_or(0) as u32) << 25;

    opcode_and_funct3(opcode) | rd | rs1 | rs2 | funct7
}

fn encode_i_type(opcode: BuiltinOpcode, rd: u8, rs1: u8, imm: u32) -> u32 {
    let rd = (rd as u32 & 0x1F) << 7;
    let rs1 = (rs1 as u32 & 0x1F) << 15;
    let imm = (imm & 0xFFF) << 20;

    opcode_and_funct3(opcode) | rd | rs1 | imm
}

fn encode_s_type(opcode: BuiltinOpcode, rs1: u8, rs2: u8, imm: u32) -> u32 {
    let rs1 = (rs1 as u32 & 0x1F) << 15;
    let rs2 = (rs2 as u32 & 0x1F) << 20;
    let imm_4_0 = (imm & 0x1F) << 7;
    let imm_11_5 = (imm & 0xFE0) << 20;

    imm_11_5 | rs2 | rs1 | imm_4_0 | opcode_and_funct3(opcode)
}

fn encode_b_type(opcode: BuiltinOpcode, rs1: u8, rs2: u8, imm: u32) -> u32 {
    let rs1 = (rs1 as u32 & 0x1F) << 15;
    let rs2 = (rs2 as u32 & 0x1F) << 20;

    let imm_11 = ((imm >> 11) & 0x1) << 7;
    let imm_4_1 = ((imm >> 1) & 0xF) << 8;
    let imm_10_5 = ((imm >> 5) & 0x3F) << 25;
    let imm_12 = ((imm >> 12) & 0x1) << 31;

    imm_12 | imm_10_5 | rs2 | rs1 | imm_4_1 | imm_11 | opcode_and_funct3(opcode)
}

fn encode_u_type(opcode: BuiltinOpcode, rd: u8, imm: u32) -> u32 {
    let rd = (rd as u32 & 0x1F) << 7;
    let imm = (imm << 12) & 0xFFFFF000;

    imm | rd | opcode.raw() as u32
}

fn encode_j_type(opcode: BuiltinOpcode, rd: u8, imm: u32) -> u32 {
    let rd = (rd as u32 & 0x1F) << 7;

    let imm_20 = ((imm >> 20) & 1) << 31;
    let imm_10_1 = ((imm >> 1) & 0x3FF) << 21;
    let imm_11 = ((imm >> 11) & 1) << 20;
    let imm_19_12 = ((imm >> 12) & 0xFF) << 12;

    imm_20 | imm_10_1 | imm_11 | imm_19_12 | rd | opcode.raw() as u32
}

/// Encodes an instruction into its 32-bit binary representation.
///
/// `ecall` and `ebreak` ignore the operands; their immediate is fixed by the ISA.
pub fn encode_instruction(opcode: BuiltinOpcode, op_a: u8, op_b: u8, op_c: u32) -> u32 {
    match opcode {
        BuiltinOpcode::ECALL => return encode_i_type(opcode, 0, 0, 0),
        BuiltinOpcode::EBREAK => return encode_i_type(opcode, 0, 0, 1),
        _ => {}
    }

    match opcode.ins_type() {
        InstructionType::RType | InstructionType::ITypeShamt => {
            encode_r_type(opcode, op_a, op_b, op_c)
        }
        InstructionType::IType => encode_i_type(opcode, op_a, op_b, op_c),
        InstructionType::SType => encode_s_type(opcode, op_a, op_b, op_c),
        InstructionType::BType => encode_b_type(opcode, op_a, op_b, op_c),
        InstructionType::UType => encode_u_type(opcode, op_a, op_c),
        InstructionType::JType => encode_j_type(opcode, op_a, op_c),
    }
}

/// Encodes a sequence of instructions into the little-endian byte image the
/// simulator loads at address 0.
pub fn encode_program(instructions: &[(BuiltinOpcode, u8, u8, u32)]) -> Vec<u8> {
    instructions
        .iter()
        .flat_map(|&(opcode, a, b, c)| encode_instruction(opcode, a, b, c).to_le_bytes())
        .collect()
}

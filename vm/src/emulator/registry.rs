//! # Instruction Executor Registry
//!
//! Maps every RV32I opcode to the function that executes it. The opcode
//! itself is the decoded `(opcode, funct3, funct7)` selector, so a lookup here
//! is the dispatch step of the fetch/decode/execute cycle.
//!
//! The executor functions are generic over the memory model; the registry is
//! instantiated once per memory type so dispatch stays static.

use std::collections::HashMap;

use rv32i_common::memory::MemoryProvider;

use super::instructions::{alu, branch, load_store, system};
use super::Annotation;
use crate::cpu::Cpu;
use crate::riscv::{BuiltinOpcode, Instruction};

pub type InstructionExecutorFn<M> = fn(&mut Cpu, &mut M, &Instruction) -> Annotation;

fn executor_for<M: MemoryProvider>(opcode: BuiltinOpcode) -> InstructionExecutorFn<M> {
    use BuiltinOpcode::*;

    match opcode {
        ADD => alu::add,
        SUB => alu::sub,
        SLL => alu::sll,
        SLT => alu::slt,
        SLTU => alu::sltu,
        XOR => alu::xor,
        SRL => alu::srl,
        SRA => alu::sra,
        OR => alu::or,
        AND => alu::and,

        ADDI => alu::addi,
        SLLI => alu::slli,
        SLTI => alu::slti,
        SLTIU => alu::sltiu,
        XORI => alu::xori,
        SRLI => alu::srli,
        SRAI => alu::srai,
        ORI => alu::ori,
        ANDI => alu::andi,

        LB => load_store::lb,
        LH => load_store::lh,
        LW => load_store::lw,
        LBU => load_store::lbu,
        LHU => load_store::lhu,

        JALR => branch::jalr,
        ECALL => system::ecall,
        EBREAK => system::ebreak,
        FENCE => system::fence,

        SB => load_store::sb,
        SH => load_store::sh,
        SW => load_store::sw,

        BEQ => branch::beq,
        BNE => branch::bne,
        BLT => branch::blt,
        BGE => branch::bge,
        BLTU => branch::bltu,
        BGEU => branch::bgeu,

        LUI => alu::lui,
        AUIPC => alu::auipc,
        JAL => branch::jal,
    }
}

pub struct InstructionExecutorRegistry<M> {
    builtins: HashMap<BuiltinOpcode, InstructionExecutorFn<M>>,
}

impl<M: MemoryProvider> Default for InstructionExecutorRegistry<M> {
    fn default() -> Self {
        Self {
            builtins: BuiltinOpcode::ALL
                .into_iter()
                .map(|opcode| (opcode, executor_for::<M>(opcode)))
                .collect(),
        }
    }
}

impl<M: MemoryProvider> InstructionExecutorRegistry<M> {
    pub fn get(&self, opcode: BuiltinOpcode) -> Option<InstructionExecutorFn<M>> {
        self.builtins.get(&opcode).copied()
    }

    pub fn len(&self) -> usize {
        self.builtins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builtins.is_empty()
    }
}

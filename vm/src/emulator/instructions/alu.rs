use rv32i_common::memory::MemoryProvider;

use super::executors;
use crate::cpu::{Cpu, Registers};
use crate::emulator::Annotation;
use crate::riscv::{Instruction, InstructionType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOp {
    Add,
    Sub,
    Sll,
    Slt,
    Sltu,
    Xor,
    Srl,
    Sra,
    Or,
    And,
}

impl AluOp {
    pub fn eval(self, x: u32, y: u32) -> u32 {
        let shamt = y & 0x1f;
        match self {
            AluOp::Add => x.wrapping_add(y),
            AluOp::Sub => x.wrapping_sub(y),
            AluOp::Sll => x << shamt,
            AluOp::Slt => ((x as i32) < (y as i32)) as u32,
            AluOp::Sltu => (x < y) as u32,
            AluOp::Xor => x ^ y,
            AluOp::Srl => x >> shamt,
            AluOp::Sra => ((x as i32) >> shamt) as u32,
            AluOp::Or => x | y,
            AluOp::And => x & y,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            AluOp::Add => "+",
            AluOp::Sub => "-",
            AluOp::Sll => "<<",
            AluOp::Slt => "<",
            AluOp::Sltu => "<U",
            AluOp::Xor => "^",
            AluOp::Srl | AluOp::Sra => ">>",
            AluOp::Or => "|",
            AluOp::And => "&",
        }
    }

    fn is_shift(self) -> bool {
        matches!(self, AluOp::Sll | AluOp::Srl | AluOp::Sra)
    }
}

// Register-register when the format is R-type, register-immediate otherwise.
fn execute<M: MemoryProvider>(cpu: &mut Cpu, _memory: &mut M, ins: &Instruction, op: AluOp) -> Annotation {
    let lhs = cpu.registers.get(ins.rs1);
    let mut rhs = match ins.opcode.ins_type() {
        InstructionType::RType => cpu.registers.get(ins.rs2),
        _ => ins.imm_bits(),
    };
    let value = op.eval(lhs, rhs);
    cpu.registers.set(ins.rd, value);

    if op.is_shift() {
        rhs &= 0x1f;
    }
    match op {
        AluOp::Slt | AluOp::Sltu => Annotation::Compare {
            rd: ins.rd,
            lhs,
            op: op.symbol(),
            rhs,
            value,
        },
        _ => Annotation::Binary {
            rd: ins.rd,
            lhs,
            op: op.symbol(),
            rhs,
            value,
        },
    }
}

executors!(execute, AluOp {
    add => Add, sub => Sub, sll => Sll, slt => Slt, sltu => Sltu,
    xor => Xor, srl => Srl, sra => Sra, or => Or, and => And,
    addi => Add, slti => Slt, sltiu => Sltu, xori => Xor, ori => Or, andi => And,
    slli => Sll, srli => Srl, srai => Sra,
});

pub fn lui<M: MemoryProvider>(cpu: &mut Cpu, _memory: &mut M, ins: &Instruction) -> Annotation {
    let value = ins.imm_bits();
    cpu.registers.set(ins.rd, value);
    Annotation::Set { rd: ins.rd, value }
}

pub fn auipc<M: MemoryProvider>(cpu: &mut Cpu, _memory: &mut M, ins: &Instruction) -> Annotation {
    let lhs = cpu.pc.value;
    let rhs = ins.imm_bits();
    let value = AluOp::Add.eval(lhs, rhs);
    cpu.registers.set(ins.rd, value);
    Annotation::Binary {
        rd: ins.rd,
        lhs,
        op: "+",
        rhs,
        value,
    }
}

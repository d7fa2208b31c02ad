use rv32i_common::cpu::jalr_target;
use rv32i_common::memory::MemoryProvider;

use super::executors;
use crate::cpu::{Cpu, Registers};
use crate::emulator::Annotation;
use crate::riscv::Instruction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchCond {
    Eq,
    Ne,
    Lt,
    Ge,
    Ltu,
    Geu,
}

impl BranchCond {
    pub fn eval(self, x: u32, y: u32) -> bool {
        match self {
            BranchCond::Eq => x == y,
            BranchCond::Ne => x != y,
            BranchCond::Lt => (x as i32) < (y as i32),
            BranchCond::Ge => (x as i32) >= (y as i32),
            BranchCond::Ltu => x < y,
            BranchCond::Geu => x >= y,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            BranchCond::Eq => "==",
            BranchCond::Ne => "!=",
            BranchCond::Lt => "<",
            BranchCond::Ge => ">=",
            BranchCond::Ltu => "<U",
            BranchCond::Geu => ">=U",
        }
    }
}

fn branch<M: MemoryProvider>(cpu: &mut Cpu, _memory: &mut M, ins: &Instruction, cond: BranchCond) -> Annotation {
    let lhs = cpu.registers.get(ins.rs1);
    let rhs = cpu.registers.get(ins.rs2);

    if cond.eval(lhs, rhs) {
        cpu.pc.branch(ins.imm);
    } else {
        cpu.pc.step();
    }

    Annotation::Branch {
        lhs,
        op: cond.symbol(),
        rhs,
        offset: ins.imm_bits(),
        target: cpu.pc.value,
    }
}

executors!(branch, BranchCond {
    beq => Eq, bne => Ne, blt => Lt, bge => Ge, bltu => Ltu, bgeu => Geu,
});

pub fn jal<M: MemoryProvider>(cpu: &mut Cpu, _memory: &mut M, ins: &Instruction) -> Annotation {
    let base = cpu.pc.value;
    let link = cpu.pc.target(4);

    cpu.pc.branch(ins.imm);
    cpu.registers.set(ins.rd, link);

    Annotation::Jump {
        rd: ins.rd,
        link,
        base,
        offset: ins.imm_bits(),
        masked: false,
        target: cpu.pc.value,
    }
}

pub fn jalr<M: MemoryProvider>(cpu: &mut Cpu, _memory: &mut M, ins: &Instruction) -> Annotation {
    // rs1 is read before rd is written; they may be the same register
    let base = cpu.registers.get(ins.rs1);
    let link = cpu.pc.target(4);
    let target = jalr_target(base, ins.imm);

    cpu.pc.jalr(base, ins.imm);
    cpu.registers.set(ins.rd, link);

    Annotation::Jump {
        rd: ins.rd,
        link,
        base,
        offset: ins.imm_bits(),
        masked: true,
        target,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::FlatMemory;
    use crate::riscv::{BuiltinOpcode, Register};
    use rv32i_common::riscv::encode_instruction;

    fn decode(op: BuiltinOpcode, a: u8, b: u8, c: i32) -> Instruction {
        Instruction::decode(encode_instruction(op, a, b, c as u32)).unwrap()
    }

    #[test]
    fn test_beq_taken_and_not_taken() {
        let mut memory = FlatMemory::new(16);
        let mut cpu = Cpu::default();
        cpu.pc.value = 0x30;

        let annotation = beq(&mut cpu, &mut memory, &decode(BuiltinOpcode::BEQ, 0, 0, 8));
        assert_eq!(cpu.pc, 0x38);
        assert_eq!(
            annotation.to_string(),
            "pc += (0x00000000 == 0x00000000 ? 0x00000008 : 4) = 0x00000038"
        );

        cpu.pc.value = 0x30;
        cpu.registers.set(Register::X1, 1);
        beq(&mut cpu, &mut memory, &decode(BuiltinOpcode::BEQ, 0, 1, 8));
        assert_eq!(cpu.pc, 0x34);
    }

    #[test]
    fn test_signed_and_unsigned_compares() {
        let mut memory = FlatMemory::new(16);
        let mut cpu = Cpu::default();
        cpu.registers.set(Register::X1, -1i32 as u32);
        cpu.registers.set(Register::X2, 1);

        blt(&mut cpu, &mut memory, &decode(BuiltinOpcode::BLT, 1, 2, -16));
        assert_eq!(cpu.pc, -16i32 as u32);

        cpu.pc.value = 0x100;
        bltu(&mut cpu, &mut memory, &decode(BuiltinOpcode::BLTU, 1, 2, 0x40));
        assert_eq!(cpu.pc, 0x104);

        bgeu(&mut cpu, &mut memory, &decode(BuiltinOpcode::BGEU, 1, 2, 0x40));
        assert_eq!(cpu.pc, 0x144);

        bge(&mut cpu, &mut memory, &decode(BuiltinOpcode::BGE, 1, 2, 0x40));
        assert_eq!(cpu.pc, 0x148);

        bne(&mut cpu, &mut memory, &decode(BuiltinOpcode::BNE, 1, 2, -8));
        assert_eq!(cpu.pc, 0x140);
    }

    #[test]
    fn test_jal() {
        let mut memory = FlatMemory::new(16);
        let mut cpu = Cpu::default();
        let annotation = jal(&mut cpu, &mut memory, &decode(BuiltinOpcode::JAL, 1, 0, 0x10));
        assert_eq!(cpu.pc, 0x10);
        assert_eq!(cpu.registers.get(Register::X1), 4);
        assert_eq!(
            annotation.to_string(),
            "x1 = 0x00000004,  pc = 0x00000000 + 0x00000010 = 0x00000010"
        );
    }

    #[test]
    fn test_jalr_clears_low_bit_and_reads_rs1_first() {
        let mut memory = FlatMemory::new(16);
        let mut cpu = Cpu::default();
        cpu.pc.value = 0x20;
        cpu.registers.set(Register::X1, 0x101);

        let annotation = jalr(&mut cpu, &mut memory, &decode(BuiltinOpcode::JALR, 1, 1, 4));
        assert_eq!(cpu.pc, 0x104);
        assert_eq!(cpu.registers.get(Register::X1), 0x24);
        assert_eq!(
            annotation.to_string(),
            "x1 = 0x00000024,  pc = (0x00000101 + 0x00000004) & 0xfffffffe = 0x00000104"
        );
    }
}

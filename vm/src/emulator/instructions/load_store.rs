use rv32i_common::memory::{MemAccessSize, MemoryProvider};

use crate::cpu::{Cpu, Registers};
use crate::emulator::Annotation;
use crate::riscv::Instruction;

fn sign_extend(value: u32, size: MemAccessSize) -> u32 {
    match size {
        MemAccessSize::Byte => value as u8 as i8 as i32 as u32,
        MemAccessSize::HalfWord => value as u16 as i16 as i32 as u32,
        MemAccessSize::Word => value,
    }
}

fn load<M: MemoryProvider>(
    cpu: &mut Cpu,
    memory: &mut M,
    ins: &Instruction,
    size: MemAccessSize,
    signed: bool,
) -> Annotation {
    let base = cpu.registers.get(ins.rs1);
    let address = base.wrapping_add(ins.imm_bits());

    let mut value = memory.read(address, size);
    if signed {
        value = sign_extend(value, size);
    }
    cpu.registers.set(ins.rd, value);

    Annotation::Load {
        rd: ins.rd,
        signed,
        bits: size.bits(),
        base,
        offset: ins.imm_bits(),
        value,
    }
}

fn store<M: MemoryProvider>(cpu: &mut Cpu, memory: &mut M, ins: &Instruction, size: MemAccessSize) -> Annotation {
    let base = cpu.registers.get(ins.rs1);
    let address = base.wrapping_add(ins.imm_bits());
    let value = match size {
        MemAccessSize::Byte => cpu.registers.get(ins.rs2) & 0xff,
        MemAccessSize::HalfWord => cpu.registers.get(ins.rs2) & 0xffff,
        MemAccessSize::Word => cpu.registers.get(ins.rs2),
    };

    memory.write(address, size, value);

    Annotation::Store {
        bits: size.bits(),
        base,
        offset: ins.imm_bits(),
        value,
    }
}

macro_rules! load_executors {
    ($($name:ident => ($size:ident, $signed:literal)),* $(,)?) => {
        $(
            pub fn $name<M: MemoryProvider>(cpu: &mut Cpu, memory: &mut M, ins: &Instruction) -> Annotation {
                load(cpu, memory, ins, MemAccessSize::$size, $signed)
            }
        )*
    };
}

load_executors! {
    lb => (Byte, true),
    lh => (HalfWord, true),
    lw => (Word, true),
    lbu => (Byte, false),
    lhu => (HalfWord, false),
}

super::executors!(store, MemAccessSize {
    sb => Byte, sh => HalfWord, sw => Word,
});

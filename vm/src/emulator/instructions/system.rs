use rv32i_common::memory::MemoryProvider;

use crate::cpu::{Cpu, HaltReason};
use crate::emulator::Annotation;
use crate::riscv::Instruction;

/// Environment calls have no behavior here beyond moving on.
pub fn ecall<M: MemoryProvider>(_cpu: &mut Cpu, _memory: &mut M, _ins: &Instruction) -> Annotation {
    Annotation::Ecall
}

pub fn ebreak<M: MemoryProvider>(cpu: &mut Cpu, _memory: &mut M, _ins: &Instruction) -> Annotation {
    cpu.halt(HaltReason::Ebreak { pc: cpu.pc.value });
    Annotation::Halt
}

// Single hart, no caches: ordering is already total.
pub fn fence<M: MemoryProvider>(_cpu: &mut Cpu, _memory: &mut M, _ins: &Instruction) -> Annotation {
    Annotation::Fence
}

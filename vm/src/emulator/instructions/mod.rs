//! Per-category instruction semantics.
//!
//! Every executor has the same shape, `fn(&mut Cpu, &mut M, &Instruction) -> Annotation`,
//! so the registry can hold them in one table. Executors update registers and
//! memory; only control transfers write the pc; the caller steps it otherwise.

pub mod alu;
pub mod branch;
pub mod load_store;
pub mod system;

/// Defines executors that forward to a shared implementation with a fixed
/// selector argument.
macro_rules! executors {
    ($body:path, $ty:ident { $($name:ident => $variant:ident),* $(,)? }) => {
        $(
            pub fn $name<M: rv32i_common::memory::MemoryProvider>(
                cpu: &mut crate::cpu::Cpu,
                memory: &mut M,
                ins: &crate::riscv::Instruction,
            ) -> crate::emulator::Annotation {
                $body(cpu, memory, ins, $ty::$variant)
            }
        )*
    };
}

pub(crate) use executors;

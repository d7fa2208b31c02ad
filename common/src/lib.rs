//! ISA-level definitions shared by the RV32I simulator crates.
//!
//! Everything in here is independent of how instructions are executed: the
//! register and opcode vocabularies, the instruction encoder used to build
//! test programs, the program counter helper, and the traits a register
//! file or memory must implement to be driven by the executor.

pub mod constants;
pub mod cpu;
pub mod error;
pub mod memory;
pub mod riscv;

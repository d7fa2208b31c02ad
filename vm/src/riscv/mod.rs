pub mod decoder;
mod display;
mod instruction;

pub use display::{render, render_listing, ILLEGAL_INSTRUCTION};
pub use instruction::Instruction;
pub use rv32i_common::riscv::{BuiltinOpcode, InstructionType, Register};

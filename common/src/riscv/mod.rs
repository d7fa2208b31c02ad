pub mod encoder;
pub mod opcode;
pub mod register;

pub use encoder::{encode_instruction, encode_program};
pub use opcode::{BuiltinOpcode, InstructionType};
pub use register::Register;

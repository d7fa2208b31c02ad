mod memory;
mod opcode;

pub use memory::MemoryError;
pub use opcode::OpcodeError;

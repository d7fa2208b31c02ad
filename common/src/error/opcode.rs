use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum OpcodeError {
    #[error("Illegal instruction: 0x{0:08x}")]
    IllegalInstruction(u32),
}

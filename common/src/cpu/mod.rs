mod pc;
mod registers;

pub use pc::{jalr_target, PC};
pub use registers::Registers;

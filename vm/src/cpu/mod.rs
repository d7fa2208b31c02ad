mod registerfile;
mod state;

pub use registerfile::RegisterFile;
pub use rv32i_common::cpu::{Registers, PC};
pub use state::{Cpu, HaltReason};

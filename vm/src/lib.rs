//! An instruction-set simulator for the RV32I base integer ISA.
//!
//! A flat binary image is loaded into [`memory::FlatMemory`] and handed to an
//! [`emulator::Simulator`], which can disassemble it or execute it one
//! instruction at a time until an `ebreak`, an illegal instruction, or an
//! instruction limit stops it.

pub mod cpu;
pub mod emulator;
pub mod error;
pub mod memory;
pub mod riscv;
pub mod trace;

pub use emulator::{RunSummary, Simulator, StopReason};
pub use memory::load_image;

use std::fmt::Display;

use crate::riscv::register::Register;

/// A general-purpose register file with `x0` hardwired to zero.
pub trait Registers: Display {
    /// Read a register; `x0` always reads as zero.
    fn get(&self, reg: Register) -> u32;

    /// Write a register; writes to `x0` are discarded.
    fn set(&mut self, reg: Register, value: u32);

    /// Put every register back into its power-on state.
    fn reset(&mut self);
}

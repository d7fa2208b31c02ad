use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub use crate::constants::NUM_REGISTERS;

/// One of the 32 general-purpose registers `x0`-`x31`.
///
/// Built from the 5-bit register fields of an instruction word, so every
/// value is a valid index into the register file.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Register {
    #[default]
    X0 = 0,
    X1 = 1,
    X2 = 2,
    X3 = 3,
    X4 = 4,
    X5 = 5,
    X6 = 6,
    X7 = 7,
    X8 = 8,
    X9 = 9,
    X10 = 10,
    X11 = 11,
    X12 = 12,
    X13 = 13,
    X14 = 14,
    X15 = 15,
    X16 = 16,
    X17 = 17,
    X18 = 18,
    X19 = 19,
    X20 = 20,
    X21 = 21,
    X22 = 22,
    X23 = 23,
    X24 = 24,
    X25 = 25,
    X26 = 26,
    X27 = 27,
    X28 = 28,
    X29 = 29,
    X30 = 30,
    X31 = 31,
}

#[rustfmt::skip]
const REGISTERS: [Register; NUM_REGISTERS] = [
    Register::X0,  Register::X1,  Register::X2,  Register::X3,
    Register::X4,  Register::X5,  Register::X6,  Register::X7,
    Register::X8,  Register::X9,  Register::X10, Register::X11,
    Register::X12, Register::X13, Register::X14, Register::X15,
    Register::X16, Register::X17, Register::X18, Register::X19,
    Register::X20, Register::X21, Register::X22, Register::X23,
    Register::X24, Register::X25, Register::X26, Register::X27,
    Register::X28, Register::X29, Register::X30, Register::X31,
];

impl From<u32> for Register {
    /// Only the low five bits are significant, matching the width of the
    /// `rd`/`rs1`/`rs2` fields.
    fn from(value: u32) -> Self {
        REGISTERS[(value & 0x1f) as usize]
    }
}

impl From<u8> for Register {
    fn from(value: u8) -> Self {
        Register::from(value as u32)
    }
}

impl Register {
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn iter() -> impl Iterator<Item = Register> {
        REGISTERS.into_iter()
    }
}

impl Display for Register {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.index())
    }
}

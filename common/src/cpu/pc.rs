use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// The program counter. Starts at 0 and only moves through the methods
/// below, so it never goes backwards unless an instruction says so.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PC {
    pub value: u32,
}

impl PC {
    // Increment PC by 4 bytes (standard instruction length)
    pub fn step(&mut self) {
        self.value = self.value.wrapping_add(4);
    }

    /// Address `offset` bytes away from the current pc, as used by branches and `jal`.
    pub fn target(&self, offset: i32) -> u32 {
        self.value.wrapping_add(offset as u32)
    }

    // Branch or jal: add an already sign-extended offset to PC
    pub fn branch(&mut self, offset: i32) {
        self.value = self.target(offset);
    }

    // Jump and Link Register: set PC to (rs1 + imm) with the low bit cleared
    pub fn jalr(&mut self, base: u32, offset: i32) {
        self.value = jalr_target(base, offset);
    }
}

/// `(base + offset) & !1`, the target of a `jalr`.
pub fn jalr_target(base: u32, offset: i32) -> u32 {
    base.wrapping_add(offset as u32) & !1
}

impl PartialEq<u32> for PC {
    fn eq(&self, other: &u32) -> bool {
        self.value == *other
    }
}

impl Display for PC {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:08x}", self.value)
    }
}

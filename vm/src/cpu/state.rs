//! Execution state of the simulated hart.

use std::fmt::Display;

use super::registerfile::RegisterFile;
use rv32i_common::cpu::{Registers, PC};

/// Why the machine stopped on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    /// An `ebreak` was executed at `pc`.
    Ebreak { pc: u32 },
    /// `word` at `pc` is not an RV32I instruction.
    IllegalInstruction { pc: u32, word: u32 },
}

impl Display for HaltReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HaltReason::Ebreak { pc } => write!(f, "Execution terminated by EBREAK at 0x{pc:08x}"),
            HaltReason::IllegalInstruction { pc, word } => write!(
                f,
                "Execution terminated by illegal instruction 0x{word:08x} at 0x{pc:08x}"
            ),
        }
    }
}

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Cpu {
    /// The general purpose 32-bit registers.
    pub registers: RegisterFile,

    /// The current program counter (PC).
    pub pc: PC,

    /// Set by `ebreak` or an illegal instruction; only `reset` clears it.
    pub halt_reason: Option<HaltReason>,

    /// Number of instructions dispatched since the last reset.
    pub instruction_counter: u64,
}

impl Cpu {
    pub fn reset(&mut self) {
        self.registers.reset();
        self.pc = PC::default();
        self.halt_reason = None;
        self.instruction_counter = 0;
    }

    pub fn halt(&mut self, reason: HaltReason) {
        self.halt_reason = Some(reason);
    }

    pub fn halted(&self) -> bool {
        self.halt_reason.is_some()
    }
}

/// The register dump followed by the pc on its own line.
impl Display for Cpu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.registers)?;
        writeln!(f, "{:>3} {}", "pc", self.pc)
    }
}

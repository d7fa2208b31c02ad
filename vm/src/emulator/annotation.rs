//! What an executed instruction did, in a form the trace can print.
//!
//! Every executor returns an [`Annotation`], so tracing never needs a second
//! code path through the instruction semantics.

use std::fmt::Display;

use crate::riscv::Register;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Annotation {
    /// `lui`: the immediate is the result.
    Set { rd: Register, value: u32 },

    /// ALU and `auipc` results: `rd = lhs <op> rhs`.
    Binary {
        rd: Register,
        lhs: u32,
        op: &'static str,
        rhs: u32,
        value: u32,
    },

    /// `slt`-family results.
    Compare {
        rd: Register,
        lhs: u32,
        op: &'static str,
        rhs: u32,
        value: u32,
    },

    /// `jal` (`base` is the pc) and `jalr` (`base` is rs1, `masked` is set).
    Jump {
        rd: Register,
        link: u32,
        base: u32,
        offset: u32,
        masked: bool,
        target: u32,
    },

    /// Conditional branches, taken or not.
    Branch {
        lhs: u32,
        op: &'static str,
        rhs: u32,
        offset: u32,
        target: u32,
    },

    Load {
        rd: Register,
        signed: bool,
        bits: u32,
        base: u32,
        offset: u32,
        value: u32,
    },

    Store {
        bits: u32,
        base: u32,
        offset: u32,
        value: u32,
    },

    Ecall,
    Halt,
    Fence,
}

impl Display for Annotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Annotation::Set { rd, value } => write!(f, "{rd} = 0x{value:08x}"),
            Annotation::Binary { rd, lhs, op, rhs, value } => {
                write!(f, "{rd} = 0x{lhs:08x} {op} 0x{rhs:08x} = 0x{value:08x}")
            }
            Annotation::Compare { rd, lhs, op, rhs, value } => {
                write!(f, "{rd} = (0x{lhs:08x} {op} 0x{rhs:08x}) ? 1 : 0 = 0x{value:08x}")
            }
            Annotation::Jump { rd, link, base, offset, masked: false, target } => write!(
                f,
                "{rd} = 0x{link:08x},  pc = 0x{base:08x} + 0x{offset:08x} = 0x{target:08x}"
            ),
            Annotation::Jump { rd, link, base, offset, masked: true, target } => write!(
                f,
                "{rd} = 0x{link:08x},  pc = (0x{base:08x} + 0x{offset:08x}) & 0xfffffffe = 0x{target:08x}"
            ),
            Annotation::Branch { lhs, op, rhs, offset, target } => write!(
                f,
                "pc += (0x{lhs:08x} {op} 0x{rhs:08x} ? 0x{offset:08x} : 4) = 0x{target:08x}"
            ),
            Annotation::Load { rd, signed, bits, base, offset, value } => write!(
                f,
                "{rd} = {}(m{bits}(0x{base:08x} + 0x{offset:08x})) = 0x{value:08x}",
                if signed { "sx" } else { "zx" }
            ),
            Annotation::Store { bits, base, offset, value } => {
                write!(f, "m{bits}(0x{base:08x} + 0x{offset:08x}) = 0x{value:08x}")
            }
            Annotation::Ecall => f.write_str("ECALL"),
            Annotation::Halt => f.write_str("HALT"),
            Annotation::Fence => f.write_str("fence"),
        }
    }
}

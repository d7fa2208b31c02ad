use std::fmt::Display;
use std::ops::Index;

use rv32i_common::constants::{NUM_REGISTERS, REGISTER_RESET_PATTERN};
use rv32i_common::cpu::Registers;

use crate::riscv::Register;

/// The 32 general-purpose registers. `x0` reads as zero and ignores writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegisterFile {
    registers: [u32; NUM_REGISTERS],
}

impl Default for RegisterFile {
    fn default() -> Self {
        let mut regs = Self {
            registers: [0; NUM_REGISTERS],
        };
        regs.reset();
        regs
    }
}

impl RegisterFile {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Registers for RegisterFile {
    fn get(&self, reg: Register) -> u32 {
        if reg == Register::X0 {
            0 // X0 is hardwired to zero
        } else {
            self.registers[reg.index()]
        }
    }

    fn set(&mut self, reg: Register, value: u32) {
        if reg != Register::X0 {
            self.registers[reg.index()] = value;
        }
    }

    fn reset(&mut self) {
        self.registers = [REGISTER_RESET_PATTERN; NUM_REGISTERS];
        self.registers[0] = 0;
    }
}

impl Index<Register> for RegisterFile {
    type Output = u32;

    fn index(&self, index: Register) -> &Self::Output {
        &self.registers[index.index()]
    }
}

/// Four rows of eight registers, each row labelled with its first register:
///
/// ```text
///  x0 00000000 f0f0f0f0 f0f0f0f0 f0f0f0f0 f0f0f0f0 f0f0f0f0 f0f0f0f0 f0f0f0f0
///  x8 f0f0f0f0 ...
/// ```
impl Display for RegisterFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (row, chunk) in self.registers.chunks(8).enumerate() {
            write!(f, "{:>3}", Register::from((row * 8) as u32).to_string())?;
            for value in chunk {
                write!(f, " {:08x}", value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_pattern() {
        let mut regs = RegisterFile::new();
        regs.set(Register::X5, 7);
        regs.reset();

        assert_eq!(regs.get(Register::X0), 0);
        for reg in Register::iter().skip(1) {
            assert_eq!(regs.get(reg), 0xf0f0f0f0);
        }
    }

    #[test]
    fn test_x0_is_hardwired() {
        let mut regs = RegisterFile::new();
        regs.set(Register::X0, 0xdeadbeef);
        assert_eq!(regs.get(Register::X0), 0);
        assert_eq!(regs[Register::X0], 0);

        regs.set(Register::X31, 0xdeadbeef);
        assert_eq!(regs.get(Register::X31), 0xdeadbeef);
    }

    #[test]
    fn test_dump_layout() {
        let mut regs = RegisterFile::new();
        regs.set(Register::X2, 0x1000);
        let dump = regs.to_string();
        let lines: Vec<&str> = dump.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            " x0 00000000 f0f0f0f0 00001000 f0f0f0f0 f0f0f0f0 f0f0f0f0 f0f0f0f0 f0f0f0f0"
        );
        assert!(lines[1].starts_with(" x8 f0f0f0f0"));
        assert!(lines[2].starts_with("x16 "));
        assert!(lines[3].starts_with("x24 "));
    }
}

//! # RV32I Simulator
//!
//! The [`Simulator`] owns the hart state and the memory for its whole life
//! and drives the fetch, decode, execute cycle:
//!
//! 1. Fetch the little-endian word at `pc`.
//! 2. Decode it; a word that is not RV32I halts the machine untouched.
//! 3. Dispatch through the opcode registry.
//! 4. Step `pc` by 4 unless the instruction transferred control or halted.
//!
//! Output is optional: every method that can produce text takes a
//! [`TraceSink`], and the state transitions are identical with or without one.
//!
//! ```rust
//! use rv32i_common::riscv::{encode_program, BuiltinOpcode::*};
//! use rv32i_vm::{emulator::Simulator, memory::FlatMemory};
//!
//! let image = encode_program(&[(ADDI, 1, 0, 5), (ADDI, 2, 0, 7), (ADD, 3, 1, 2), (EBREAK, 0, 0, 0)]);
//! let mut sim = Simulator::new(FlatMemory::from_image(0x100, &image).unwrap());
//!
//! sim.run(0, None);
//! assert!(sim.is_halted());
//! assert_eq!(sim.register(3), 12);
//! ```

use std::fmt::Display;

use rv32i_common::constants::{INSTRUCTION_WIDTH, WORD_SIZE};
use rv32i_common::memory::MemoryProvider;
use tracing::{debug, error, trace};

use super::registry::InstructionExecutorRegistry;
use crate::cpu::{Cpu, HaltReason, Registers};
use crate::memory::FlatMemory;
use crate::riscv::{render_listing, Instruction, Register, ILLEGAL_INSTRUCTION};
use crate::trace::{record_lines, TraceSink};

/// Why [`Simulator::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Halted(HaltReason),
    /// The instruction counter reached the limit; the machine is not halted.
    LimitReached(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub reason: StopReason,
    pub instruction_counter: u64,
}

impl Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.reason {
            StopReason::Halted(reason) => writeln!(f, "{reason}")?,
            StopReason::LimitReached(limit) => writeln!(f, "Instruction limit of {limit} reached")?,
        }
        write!(f, "{} instructions executed", self.instruction_counter)
    }
}

pub struct Simulator<M: MemoryProvider = FlatMemory> {
    pub cpu: Cpu,
    pub memory: M,
    registry: InstructionExecutorRegistry<M>,
    show_instructions: bool,
    show_registers: bool,
}

impl<M: MemoryProvider> Simulator<M> {
    /// Take ownership of a loaded memory. The hart starts in its reset state.
    pub fn new(memory: M) -> Self {
        Self {
            cpu: Cpu::default(),
            memory,
            registry: InstructionExecutorRegistry::default(),
            show_instructions: false,
            show_registers: false,
        }
    }

    /// Reset registers, pc, halt state and the instruction counter. Memory is kept.
    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    /// Emit a trace line for every executed instruction.
    pub fn set_show_instructions(&mut self, show: bool) {
        self.show_instructions = show;
    }

    /// Emit the register dump before every executed instruction.
    pub fn set_show_registers(&mut self, show: bool) {
        self.show_registers = show;
    }

    pub fn is_halted(&self) -> bool {
        self.cpu.halted()
    }

    pub fn halt_reason(&self) -> Option<HaltReason> {
        self.cpu.halt_reason
    }

    pub fn instruction_counter(&self) -> u64 {
        self.cpu.instruction_counter
    }

    pub fn pc(&self) -> u32 {
        self.cpu.pc.value
    }

    /// Value of register `x{index}`; the index is taken modulo 32.
    pub fn register(&self, index: u32) -> u32 {
        self.cpu.registers.get(Register::from(index))
    }

    /// The register file followed by the pc.
    pub fn dump(&self) -> String {
        self.cpu.to_string()
    }

    /// Render every word of memory, from address 0, without executing anything.
    pub fn disasm(&self, sink: &mut dyn TraceSink) {
        for pc in (0..self.memory.size()).step_by(WORD_SIZE) {
            sink.record(&render_listing(pc, self.memory.get32(pc)));
        }
    }

    /// Execute the instruction at `pc`. Does nothing once the machine has halted.
    pub fn tick(&mut self, sink: Option<&mut dyn TraceSink>) {
        let mut null = NullSink;
        self.step(sink.unwrap_or(&mut null));
    }

    /// Run until the machine halts or, if `limit` is not 0, until the
    /// instruction counter reaches `limit`.
    pub fn run(&mut self, limit: u64, sink: Option<&mut dyn TraceSink>) -> RunSummary {
        let mut null = NullSink;
        let sink = sink.unwrap_or(&mut null);

        let reason = loop {
            if let Some(reason) = self.cpu.halt_reason {
                break StopReason::Halted(reason);
            }
            if limit != 0 && self.cpu.instruction_counter >= limit {
                break StopReason::LimitReached(limit);
            }
            self.step(sink);
        };

        debug!(?reason, instructions = self.cpu.instruction_counter, "run stopped");
        RunSummary {
            reason,
            instruction_counter: self.cpu.instruction_counter,
        }
    }

    fn step(&mut self, sink: &mut dyn TraceSink) {
        if self.cpu.halted() {
            return;
        }

        if self.show_registers {
            record_lines(sink, &self.dump());
        }

        let pc = self.cpu.pc.value;
        let word = self.memory.get32(pc);
        self.cpu.instruction_counter += 1;

        let ins = match Instruction::decode(word) {
            Ok(ins) => ins,
            Err(err) => {
                error!("{err} at pc=0x{pc:08x}");
                self.cpu.halt(HaltReason::IllegalInstruction { pc, word });
                if self.show_instructions {
                    sink.record(&format!("{pc:08x}: {word:08x}  {ILLEGAL_INSTRUCTION}"));
                }
                return;
            }
        };

        let Some(executor) = self.registry.get(ins.opcode) else {
            error!("no executor for {} at pc=0x{pc:08x}", ins.opcode);
            self.cpu.halt(HaltReason::IllegalInstruction { pc, word });
            return;
        };
        let annotation = executor(&mut self.cpu, &mut self.memory, &ins);

        if !ins.is_branch_or_jump_instruction() && !self.cpu.halted() {
            self.cpu.pc.step();
        }

        let line = format!(
            "{pc:08x}: {word:08x}  {:<w$}// {annotation}",
            ins.render(pc),
            w = INSTRUCTION_WIDTH
        );
        trace!("{line}");
        if self.show_instructions {
            sink.record(&line);
        }
    }
}

// Stands in when the caller passes no sink.
struct NullSink;

impl TraceSink for NullSink {
    fn record(&mut self, _line: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use rv32i_common::riscv::{encode_program, BuiltinOpcode::*};

    fn simulator(program: &[(rv32i_common::riscv::BuiltinOpcode, u8, u8, u32)]) -> Simulator {
        Simulator::new(FlatMemory::from_image(0x40, &encode_program(program)).unwrap())
    }

    #[test]
    fn test_ebreak_leaves_pc_in_place() {
        let mut sim = simulator(&[(ADDI, 1, 0, 1), (EBREAK, 0, 0, 0)]);
        let summary = sim.run(0, None);

        assert_eq!(summary.reason, StopReason::Halted(HaltReason::Ebreak { pc: 4 }));
        assert_eq!(summary.instruction_counter, 2);
        assert_eq!(sim.pc(), 4);
        assert_eq!(
            summary.to_string(),
            "Execution terminated by EBREAK at 0x00000004\n2 instructions executed"
        );
    }

    #[test]
    fn test_limit_does_not_halt() {
        // jal x0, 0 spins forever
        let mut sim = simulator(&[(JAL, 0, 0, 0)]);
        let summary = sim.run(10, None);

        assert_eq!(summary.reason, StopReason::LimitReached(10));
        assert_eq!(sim.instruction_counter(), 10);
        assert!(!sim.is_halted());
    }

    #[test]
    fn test_ecall_and_fence_advance_pc() {
        let mut sim = simulator(&[(ECALL, 0, 0, 0), (FENCE, 0, 0, 0xff), (EBREAK, 0, 0, 0)]);
        let mut lines: Vec<String> = Vec::new();
        sim.set_show_instructions(true);
        sim.run(0, Some(&mut lines));

        assert_eq!(sim.pc(), 8);
        assert!(lines[0].ends_with("// ECALL"));
        assert!(lines[1].ends_with("// fence"));
        assert!(lines[2].ends_with("// HALT"));
    }

    #[test]
    fn test_trace_line_layout() {
        let mut sim = simulator(&[(ADDI, 1, 0, 5), (EBREAK, 0, 0, 0)]);
        let mut lines: Vec<String> = Vec::new();
        sim.set_show_instructions(true);
        sim.tick(Some(&mut lines));

        assert_eq!(
            lines,
            vec![format!(
                "00000000: 00500093  {:<35}// x1 = 0x00000000 + 0x00000005 = 0x00000005",
                "addi    x1,x0,5"
            )]
        );
    }

    #[test]
    fn test_show_registers_dumps_before_each_instruction() {
        let mut sim = simulator(&[(ADDI, 1, 0, 5), (EBREAK, 0, 0, 0)]);
        let mut lines: Vec<String> = Vec::new();
        sim.set_show_registers(true);
        sim.run(0, Some(&mut lines));

        // two instructions, five dump lines each, no trace lines
        assert_eq!(lines.len(), 10);
        assert!(lines[5].starts_with(" x0 00000000 00000005"));
        assert_eq!(lines[9], " pc 00000004");
    }

    #[test]
    fn test_illegal_instruction_is_traced() {
        let mut sim = Simulator::new(FlatMemory::from_image(16, &[0xff; 4]).unwrap());
        let mut lines: Vec<String> = Vec::new();
        sim.set_show_instructions(true);
        sim.run(0, Some(&mut lines));

        assert_eq!(lines, vec!["00000000: ffffffff  ERROR: UNIMPLEMENTED INSTRUCTION"]);
        assert_eq!(
            sim.halt_reason(),
            Some(HaltReason::IllegalInstruction { pc: 0, word: 0xffffffff })
        );
    }

    #[test]
    fn test_disasm_covers_memory() {
        let sim = simulator(&[(ADDI, 1, 0, 5), (EBREAK, 0, 0, 0)]);
        let mut lines: Vec<String> = Vec::new();
        sim.disasm(&mut lines);

        assert_eq!(lines.len(), 0x40 / 4);
        assert_eq!(lines[0], "00000000: 00500093  addi    x1,x0,5");
        assert_eq!(lines[1], "00000004: 00100073  ebreak");
        assert_eq!(lines[2], "00000008: a5a5a5a5  ERROR: UNIMPLEMENTED INSTRUCTION");
        assert_eq!(sim.pc(), 0);
    }

    #[test]
    fn test_reset_after_run() {
        let mut sim = simulator(&[(ADDI, 1, 0, 5), (EBREAK, 0, 0, 0)]);
        sim.run(0, None);
        sim.reset();

        assert!(!sim.is_halted());
        assert_eq!(sim.instruction_counter(), 0);
        assert_eq!(sim.register(1), 0xf0f0f0f0);
        assert_eq!(sim.memory.get32(0), 0x00500093);
    }
}

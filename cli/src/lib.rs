//! # rv32i
//!
//! Command-line front end of the RV32I simulator.
//!
//! ```sh
//! rv32i [-m hex-mem-size] [-l limit] [-d] [-i] [-r] [-z] infile
//! ```
//!
//! Settings not given on the command line come from `RV32I_SIM_*` environment
//! variables (see `rv32i-config`), then from built-in defaults.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rv32i_config::SimConfig;
use rv32i_vm::trace::{TraceSink, WriterSink};
use rv32i_vm::{load_image, Simulator};

#[derive(Debug, Parser)]
#[command(name = "rv32i", author, version, about, long_about = None)]
pub struct Opts {
    /// Memory size in hex (default 0x10000), rounded up to 16 bytes. The
    /// whole memory is allocated up front, so sizes near ffffffff need 4 GiB.
    #[arg(short = 'm', value_name = "HEX-MEM-SIZE", value_parser = parse_hex)]
    pub memory_size: Option<u32>,

    /// Stop after this many instructions; 0 runs until the program halts.
    #[arg(short = 'l', value_name = "LIMIT")]
    pub limit: Option<u64>,

    /// Print a disassembly of the whole memory before running.
    #[arg(short = 'd')]
    pub disasm: bool,

    /// Show each instruction as it executes.
    #[arg(short = 'i')]
    pub show_instructions: bool,

    /// Show the registers before each instruction.
    #[arg(short = 'r')]
    pub show_registers: bool,

    /// Dump the registers and memory after the run.
    #[arg(short = 'z')]
    pub dump: bool,

    /// Flat binary image loaded at address 0.
    pub infile: PathBuf,
}

fn parse_hex(s: &str) -> Result<u32, String> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    u32::from_str_radix(digits, 16).map_err(|err| format!("invalid hex value {s:?}: {err}"))
}

/// Command-line flags merged over the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub memory_size: u32,
    pub limit: u64,
    pub disasm: bool,
    pub show_instructions: bool,
    pub show_registers: bool,
    pub dump: bool,
}

impl Settings {
    pub fn resolve(opts: &Opts, config: &SimConfig) -> Self {
        Self {
            memory_size: opts.memory_size.unwrap_or(config.memorysize),
            limit: opts.limit.unwrap_or(config.limit),
            disasm: opts.disasm,
            show_instructions: opts.show_instructions || config.showinstructions,
            show_registers: opts.show_registers || config.showregisters,
            dump: opts.dump,
        }
    }
}

/// Load `infile`, then disassemble, run and dump it as `settings` ask,
/// writing every line to `out`.
pub fn execute<W: Write>(infile: &Path, settings: &Settings, out: W) -> anyhow::Result<W> {
    let memory = load_image(infile, settings.memory_size)
        .with_context(|| format!("cannot load {}", infile.display()))?;

    let mut sim = Simulator::new(memory);
    let mut sink = WriterSink::new(out);

    if settings.disasm {
        sim.disasm(&mut sink);
    }

    sim.reset();
    sim.set_show_instructions(settings.show_instructions);
    sim.set_show_registers(settings.show_registers);
    let summary = sim.run(settings.limit, Some(&mut sink));

    for line in summary.to_string().lines() {
        sink.record(line);
    }

    if settings.dump {
        for line in sim.dump().lines().chain(sim.memory.to_string().lines()) {
            sink.record(line);
        }
    }

    Ok(sink.finish()?)
}

pub fn setup_logger() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::IsTerminal::is_terminal(&std::io::stderr()))
                .with_file(false)
                .with_line_number(false),
        )
        .with(filter)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use rv32i_common::riscv::{encode_program, BuiltinOpcode::*};
    use rv32i_vm::error::{MemoryError, VMError, VMErrorKind};

    fn settings() -> Settings {
        Settings::resolve(&Opts::parse_from(["rv32i", "image.bin"]), &SimConfig::default())
    }

    fn image(program: &[(rv32i_common::riscv::BuiltinOpcode, u8, u8, u32)]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&encode_program(program)).unwrap();
        file
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("10000"), Ok(0x10000));
        assert_eq!(parse_hex("0x100"), Ok(0x100));
        assert_eq!(parse_hex("FF"), Ok(0xff));
        assert!(parse_hex("xyz").is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let opts = Opts::parse_from(["rv32i", "-m", "200", "-l", "5", "-i", "-z", "prog.bin"]);
        let config = SimConfig {
            memorysize: 0x4000,
            limit: 99,
            showinstructions: false,
            showregisters: true,
        };
        let settings = Settings::resolve(&opts, &config);

        assert_eq!(settings.memory_size, 0x200);
        assert_eq!(settings.limit, 5);
        assert!(settings.show_instructions);
        assert!(settings.show_registers);
        assert!(settings.dump);
        assert!(!settings.disasm);
        assert_eq!(opts.infile, PathBuf::from("prog.bin"));

        let defaults = Settings::resolve(&Opts::parse_from(["rv32i", "prog.bin"]), &config);
        assert_eq!((defaults.memory_size, defaults.limit), (0x4000, 99));
    }

    #[test]
    fn test_missing_infile_is_rejected() {
        assert!(Opts::try_parse_from(["rv32i", "-m", "100"]).is_err());
    }

    #[test]
    fn test_execute_reports_summary() {
        let file = image(&[(ADDI, 1, 0, 5), (EBREAK, 0, 0, 0)]);
        let out = execute(file.path(), &settings(), Vec::<u8>::new()).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "Execution terminated by EBREAK at 0x00000004\n2 instructions executed\n"
        );
    }

    #[test]
    fn test_execute_with_disasm_trace_and_dump() {
        let file = image(&[(ADDI, 1, 0, 5), (EBREAK, 0, 0, 0)]);
        let settings = Settings {
            memory_size: 0x10,
            disasm: true,
            show_instructions: true,
            dump: true,
            ..settings()
        };
        let out = execute(file.path(), &settings, Vec::<u8>::new()).unwrap();
        let lines: Vec<String> = String::from_utf8(out).unwrap().lines().map(String::from).collect();

        // 4 disassembly lines, 2 trace lines, 2 summary lines, 5 register lines, 1 memory line
        assert_eq!(lines.len(), 14);
        assert_eq!(lines[0], "00000000: 00500093  addi    x1,x0,5");
        assert!(lines[4].starts_with("00000000: 00500093  addi    x1,x0,5 "));
        assert!(lines[5].ends_with("// HALT"));
        assert_eq!(lines[8], " x0 00000000 00000005 f0f0f0f0 f0f0f0f0 f0f0f0f0 f0f0f0f0 f0f0f0f0 f0f0f0f0");
        assert_eq!(lines[12], " pc 00000004");
        assert!(lines[13].starts_with("00000000: 93 00 50 00 73 00 10 00  a5 a5"));
    }

    #[test]
    fn test_execute_rejects_oversized_image() {
        let file = image(&[(ADDI, 1, 0, 5); 8]);
        let settings = Settings {
            memory_size: 0x10,
            ..settings()
        };
        let err = execute(file.path(), &settings, Vec::<u8>::new()).unwrap_err();
        assert!(err.to_string().starts_with("cannot load"));
        assert!(format!("{err:#}").contains("Program too big"));

        let vm_err = err.downcast_ref::<VMError>().unwrap();
        assert!(matches!(
            vm_err.source,
            VMErrorKind::MemoryError(MemoryError::ImageTooLarge { len: 32, size: 16 })
        ));
        assert!(vm_err.location.file().ends_with("mod.rs"));
    }
}

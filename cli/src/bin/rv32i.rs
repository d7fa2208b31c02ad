use clap::Parser;

use rv32i_cli::{execute, setup_logger, Opts, Settings};
use rv32i_config::{Config, SimConfig};

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();
    setup_logger();

    let config = SimConfig::from_env()?;
    let settings = Settings::resolve(&opts, &config);

    if let Err(err) = execute(&opts.infile, &settings, std::io::stdout().lock()) {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
    Ok(())
}

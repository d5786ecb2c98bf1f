//! Binary entrypoint for the almanac report.
use almanac_cli::config::{ReportFormat, RunConfig, SeedMode, StrategyArg};
use almanac_cli::{init_logging, run};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "almanac")]
#[command(version, about = "Minimum location reachable from the almanac's seeds")]
struct Cli {
    /// Almanac file (default: data/input.txt, or ALMANAC_INPUT)
    input: Option<PathBuf>,

    /// YAML run configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// How the numbers of the `seeds:` line are read
    #[arg(long, value_enum)]
    mode: Option<SeedMode>,

    /// Evaluation strategy
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,

    /// Report format
    #[arg(long, value_enum)]
    format: Option<ReportFormat>,

    /// Skip the `seeds:` / `almanacs:` dump
    #[arg(long)]
    no_dump: bool,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    config.apply_env(|key| std::env::var(key).ok());

    if let Some(input) = cli.input {
        config.input = input;
    }
    if let Some(mode) = cli.mode {
        config.mode = mode;
    }
    if let Some(strategy) = cli.strategy {
        config.strategy = strategy.into();
    }
    if let Some(format) = cli.format {
        config.format = format;
    }
    if cli.no_dump {
        config.dump = false;
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&config, &mut out)?;
    Ok(())
}

//! Almanac CLI: loads an almanac, evaluates it and prints the report
pub mod config;
pub mod report;

use almanac_core::{Evaluator, Interval};
use almanac_in::{AlmanacParser, ParsedAlmanac};
use anyhow::Context;
use std::io::Write;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use config::{ReportFormat, RunConfig, SeedMode};
use report::{FinishedRanges, PlainProgress, RunReport};

/// `almanac` also matches the `almanac_cli`, `almanac_core` and `almanac_in` targets.
pub const DEFAULT_LOG_FILTER: &str = "warn,almanac=info";

/// Installs the stderr subscriber. `RUST_LOG` overrides the default filter.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Reads `config.input` and writes the report to `out`. Returns the minimum.
pub fn run<W: Write>(config: &RunConfig, out: &mut W) -> anyhow::Result<i64> {
    let contents = std::fs::read_to_string(&config.input)
        .with_context(|| format!("reading almanac {}", config.input.display()))?;
    run_str(config, &contents, out)
}

/// Same as [`run`] with the almanac text already in memory.
pub fn run_str<W: Write>(config: &RunConfig, contents: &str, out: &mut W) -> anyhow::Result<i64> {
    let parser = AlmanacParser::new()?;
    let parsed = parser.parse(contents).context("parsing almanac")?;
    let pipeline = parsed.pipeline().context("building pipeline")?;
    let seeds = seeds_for(&parsed, config.mode).context("reading seeds")?;

    info!(
        input = %config.input.display(),
        pipeline = %pipeline.pipeline_id(),
        seeds = seeds.len(),
        "almanac loaded"
    );

    let evaluator = Evaluator::new(config.strategy);
    let minimum = match config.format {
        ReportFormat::Plain => {
            if config.dump {
                report::write_dump(out, &seeds, &pipeline)?;
            }
            let mut progress = PlainProgress::new(&mut *out);
            let minimum = evaluator.run_observed(&seeds, &pipeline, &mut progress);
            progress.finish()?;
            report::write_minimum(out, minimum)?;
            minimum
        }
        ReportFormat::Json => {
            let mut finished = FinishedRanges::default();
            let minimum = evaluator.run_observed(&seeds, &pipeline, &mut finished);
            RunReport {
                mode: config.mode,
                strategy: config.strategy,
                seeds: &seeds,
                stages: pipeline.stages(),
                finished: &finished.0,
                minimum,
            }
            .write_json(out)?;
            minimum
        }
    };

    out.flush()?;
    Ok(minimum)
}

fn seeds_for(parsed: &ParsedAlmanac, mode: SeedMode) -> Result<Vec<Interval>, almanac_in::ParseError> {
    match mode {
        SeedMode::Ranges => parsed.seed_ranges(),
        SeedMode::Singles => Ok(parsed
            .seed_values()
            .iter()
            .map(|&seed| Interval::point(seed))
            .collect::<Result<Vec<_>, _>>()?),
    }
}

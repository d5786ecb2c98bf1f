//! Almanac Core: chained range-mapping engine
//!
//! A [`Stage`] is a piecewise translation table with an identity fallback;
//! a [`Pipeline`] threads a value through every stage in declaration order;
//! the [`Evaluator`] finds the minimum image of a set of seed intervals.
//!
//! # Flow
//!
//! ```text
//! (begin, len) pairs → Interval → Stage → Stage → ... → minimum
//! ```
//!
//! Construction validates bounds and can fail with [`CoreError`]. Once a
//! pipeline exists, `translate`, `map` and `run` are total.

pub mod error;
pub mod evaluator;
pub mod interval;
pub mod pipeline;
pub mod stage;

pub use error::CoreError;
pub use evaluator::{EvalObserver, Evaluator, Strategy};
pub use interval::{Interval, IntervalSet};
pub use pipeline::Pipeline;
pub use stage::{Rule, Stage, StageName, Translate};

/// Builds a stage from `(dest_begin, source_begin, source_length)` triples,
/// the `dest src len` line convention.
pub fn build_stage(
    from: impl Into<String>,
    to: impl Into<String>,
    rules: &[(i64, i64, i64)],
) -> Result<Stage, CoreError> {
    let rules = rules
        .iter()
        .map(|&(dest, source, length)| Rule::from_triple(dest, source, length))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Stage::new(from, to, rules))
}

pub fn build_pipeline(stages: Vec<Stage>) -> Pipeline {
    Pipeline::new(stages)
}

/// Seed intervals from `(begin, length)` pairs, in input order.
pub fn seed_set(pairs: &[(i64, i64)]) -> Result<Vec<Interval>, CoreError> {
    pairs
        .iter()
        .map(|&(begin, length)| Interval::from_length(begin, length))
        .collect()
}

/// Minimum location over every seed in the `(begin, length)` ranges, using
/// interval splitting.
pub fn evaluate(seed_pairs: &[(i64, i64)], pipeline: &Pipeline) -> Result<i64, CoreError> {
    let seeds = seed_set(seed_pairs)?;
    Ok(Evaluator::default().run(&seeds, pipeline))
}

/// Minimum location when every listed number is a seed on its own.
pub fn evaluate_values(seeds: &[i64], pipeline: &Pipeline) -> Result<i64, CoreError> {
    let seeds = seeds
        .iter()
        .map(|&seed| Interval::point(seed))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Evaluator::default().run(&seeds, pipeline))
}

/// Crate version
pub const ALMANAC_VERSION: &str = env!("CARGO_PKG_VERSION");

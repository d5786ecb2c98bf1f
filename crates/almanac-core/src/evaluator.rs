//! Evaluator: drives seed ranges through a pipeline and keeps the minimum
use crate::interval::{Interval, IntervalSet};
use crate::stage::Translate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{info, trace};

/// How seed ranges are pushed through the pipeline. Both strategies return
/// the same minimum for every input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Propagate whole intervals, splitting at rule boundaries.
    #[default]
    #[serde(alias = "interval-split")]
    Split,
    /// Map every integer individually.
    BruteForce,
}

/// Hooks called while a run is in progress.
pub trait EvalObserver {
    /// One call per pipeline invocation: a single integer under brute force,
    /// a fresh seed piece under interval splitting. `image` is the smallest
    /// mapped value of `seeds`.
    fn on_seed_mapped(&mut self, _seeds: Interval, _image: i64) {}

    /// Called once per seed range, in input order, after it is fully processed.
    fn on_range_finished(&mut self, _range: &Interval) {}
}

impl EvalObserver for () {}

#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    strategy: Strategy,
}

impl Evaluator {
    pub fn new(strategy: Strategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Minimum image of every seed. Stays at `i64::MAX` when no seed exists.
    pub fn run<M>(&self, seeds: &[Interval], mapping: &M) -> i64
    where
        M: Translate + ?Sized,
    {
        self.run_observed(seeds, mapping, &mut ())
    }

    pub fn run_observed<M, O>(&self, seeds: &[Interval], mapping: &M, observer: &mut O) -> i64
    where
        M: Translate + ?Sized,
        O: EvalObserver + ?Sized,
    {
        let minimum = match self.strategy {
            Strategy::Split => split(seeds, mapping, observer),
            Strategy::BruteForce => brute_force(seeds, mapping, observer),
        };

        info!(
            strategy = ?self.strategy,
            ranges = seeds.len(),
            minimum,
            "evaluation finished"
        );
        minimum
    }
}

fn brute_force<M, O>(seeds: &[Interval], mapping: &M, observer: &mut O) -> i64
where
    M: Translate + ?Sized,
    O: EvalObserver + ?Sized,
{
    let mut minimum = i64::MAX;
    let mut visited: HashSet<i64> = HashSet::new();

    for range in seeds {
        for x in range.values() {
            if !visited.insert(x) {
                continue;
            }
            let image = mapping.translate(x);
            // x < range.end, so x + 1 cannot overflow
            observer.on_seed_mapped(Interval::raw(x, x + 1), image);
            minimum = minimum.min(image);
        }
        trace!(%range, visited = visited.len(), "finished seed range");
        observer.on_range_finished(range);
    }

    minimum
}

fn split<M, O>(seeds: &[Interval], mapping: &M, observer: &mut O) -> i64
where
    M: Translate + ?Sized,
    O: EvalObserver + ?Sized,
{
    let mut minimum = i64::MAX;
    let mut covered = IntervalSet::new();

    for range in seeds {
        let fresh = covered.uncovered(range);
        covered.insert(*range);

        for piece in fresh {
            let image = mapping.translate_set(&IntervalSet::from_intervals([piece]));
            if let Some(low) = image.min() {
                observer.on_seed_mapped(piece, low);
                minimum = minimum.min(low);
            }
        }
        trace!(%range, covered = covered.len(), "finished seed range");
        observer.on_range_finished(range);
    }

    minimum
}

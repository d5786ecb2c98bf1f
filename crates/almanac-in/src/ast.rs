use almanac_core::{build_pipeline, build_stage, seed_set, Interval, Pipeline};

use crate::parser::ParseError;

/// One `<from>-to-<to> map:` block, rules kept as `(dest, src, len)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageSpec {
    pub from: String,
    pub to: String,
    pub rules: Vec<(i64, i64, i64)>,
    /// 1-based line of the header
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAlmanac {
    /// Numbers of the `seeds:` line, as written
    pub seeds: Vec<i64>,
    pub stages: Vec<StageSpec>,
}

impl ParsedAlmanac {
    /// Seed numbers read as `(begin, length)` pairs.
    pub fn seed_pairs(&self) -> Result<Vec<(i64, i64)>, ParseError> {
        if self.seeds.len() % 2 != 0 {
            return Err(ParseError::OddSeedCount(self.seeds.len()));
        }
        Ok(self.seeds.chunks_exact(2).map(|c| (c[0], c[1])).collect())
    }

    pub fn seed_ranges(&self) -> Result<Vec<Interval>, ParseError> {
        Ok(seed_set(&self.seed_pairs()?)?)
    }

    /// Seed numbers read as individual seeds.
    pub fn seed_values(&self) -> &[i64] {
        &self.seeds
    }

    pub fn pipeline(&self) -> Result<Pipeline, ParseError> {
        let stages = self
            .stages
            .iter()
            .map(|spec| build_stage(spec.from.as_str(), spec.to.as_str(), &spec.rules))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(build_pipeline(stages))
    }
}

//! Stage: one named piecewise translation table with identity fallback
use crate::error::CoreError;
use crate::interval::{Interval, IntervalSet};
use serde::Serialize;
use std::fmt;

/// Contract shared by everything that maps integers forward: a single
/// stage or a whole pipeline. Both operations are total.
pub trait Translate {
    /// Image of a single integer.
    fn translate(&self, x: i64) -> i64;

    /// Image of every integer in `input`, as a normalized set.
    fn translate_set(&self, input: &IntervalSet) -> IntervalSet;
}

/// `x -> dest_begin + (x - source.begin)` for `x` in `source`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rule {
    source: Interval,
    dest_begin: i64,
}

impl Rule {
    pub fn new(source: Interval, dest_begin: i64) -> Result<Self, CoreError> {
        let length = source
            .end()
            .checked_sub(source.begin())
            .ok_or(CoreError::SpanTooWide {
                begin: source.begin(),
                end: source.end(),
            })?;
        // The destination window must fit as well, so `apply` never overflows.
        dest_begin.checked_add(length).ok_or(CoreError::Overflow {
            begin: dest_begin,
            length,
        })?;
        Ok(Self { source, dest_begin })
    }

    /// Builds a rule from the `dest src len` line convention.
    pub fn from_triple(dest_begin: i64, source_begin: i64, length: i64) -> Result<Self, CoreError> {
        Self::new(Interval::from_length(source_begin, length)?, dest_begin)
    }

    pub fn source(&self) -> Interval {
        self.source
    }

    pub fn dest_begin(&self) -> i64 {
        self.dest_begin
    }

    pub fn matches(&self, x: i64) -> bool {
        self.source.contains(x)
    }

    /// Caller guarantees `self.matches(x)`.
    fn apply(&self, x: i64) -> i64 {
        self.dest_begin + (x - self.source.begin())
    }

    /// Caller guarantees `piece` lies inside `self.source`.
    fn apply_interval(&self, piece: &Interval) -> Interval {
        Interval::raw(
            self.dest_begin + (piece.begin() - self.source.begin()),
            self.dest_begin + (piece.end() - self.source.begin()),
        )
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Map({}, {}, {})",
            self.source.begin(),
            self.source.end(),
            self.dest_begin
        )
    }
}

/// `(from, to)` labels. Metadata only: never used for dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageName {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stage {
    name: StageName,
    rules: Vec<Rule>,
}

impl Stage {
    pub fn new(from: impl Into<String>, to: impl Into<String>, rules: Vec<Rule>) -> Self {
        Self {
            name: StageName {
                from: from.into(),
                to: to.into(),
            },
            rules,
        }
    }

    pub fn name(&self) -> &StageName {
        &self.name
    }

    /// Rules in declaration order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// First rule in declaration order that intersects `piece`, with the
    /// intersection. No earlier rule covers any integer of `piece`, so the
    /// intersection maps through this rule under first-match-wins.
    fn first_hit(&self, piece: &Interval) -> Option<(&Rule, Interval)> {
        self.rules
            .iter()
            .find_map(|rule| rule.source.intersect(piece).map(|hit| (rule, hit)))
    }
}

impl Translate for Stage {
    fn translate(&self, x: i64) -> i64 {
        self.rules
            .iter()
            .find(|rule| rule.matches(x))
            .map_or(x, |rule| rule.apply(x))
    }

    fn translate_set(&self, input: &IntervalSet) -> IntervalSet {
        let mut pending: Vec<Interval> = input.iter().copied().collect();
        let mut mapped = Vec::with_capacity(pending.len());

        while let Some(piece) = pending.pop() {
            match self.first_hit(&piece) {
                Some((rule, hit)) => {
                    mapped.push(rule.apply_interval(&hit));
                    let (below, above) = piece.remainders(&hit);
                    pending.extend(below);
                    pending.extend(above);
                }
                None => mapped.push(piece),
            }
        }

        IntervalSet::from_intervals(mapped)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Almanac({}, {}, [", self.name.from, self.name.to)?;
        for (i, rule) in self.rules.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", rule)?;
        }
        write!(f, "])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(begin: i64, end: i64) -> Interval {
        Interval::new(begin, end).unwrap()
    }

    fn seed_to_soil() -> Stage {
        Stage::new(
            "seed",
            "soil",
            vec![
                Rule::from_triple(50, 98, 2).unwrap(),
                Rule::from_triple(52, 50, 48).unwrap(),
            ],
        )
    }

    #[test]
    fn test_rule_inside_source_is_shifted() {
        let stage = Stage::new("a", "b", vec![Rule::new(iv(50, 98), 52).unwrap()]);
        assert_eq!(stage.translate(53), 55);
        assert_eq!(stage.translate(50), 52);
        assert_eq!(stage.translate(97), 99);
    }

    #[test]
    fn test_identity_fallback() {
        let stage = Stage::new("a", "b", vec![Rule::new(iv(50, 98), 52).unwrap()]);
        assert_eq!(stage.translate(10), 10);
        assert_eq!(stage.translate(98), 98);
        assert_eq!(stage.translate(-4), -4);
    }

    #[test]
    fn test_first_match_wins_on_overlap() {
        let stage = Stage::new(
            "a",
            "b",
            vec![Rule::new(iv(0, 10), 100).unwrap(), Rule::new(iv(5, 15), 500).unwrap()],
        );
        assert_eq!(stage.translate(7), 107);
        assert_eq!(stage.translate(12), 507);
    }

    #[test]
    fn test_empty_rule_maps_nothing() {
        let stage = Stage::new("a", "b", vec![Rule::new(iv(5, 5), 1000).unwrap()]);
        assert_eq!(stage.translate(5), 5);
        let set = IntervalSet::from_intervals([iv(0, 10)]);
        assert_eq!(stage.translate_set(&set), set);
    }

    #[test]
    fn test_rule_overflowing_destination_rejected() {
        assert!(matches!(
            Rule::from_triple(i64::MAX - 1, 0, 5),
            Err(CoreError::Overflow { .. })
        ));
        assert!(matches!(
            Rule::from_triple(0, 0, -5),
            Err(CoreError::NegativeLength { .. })
        ));
    }

    #[test]
    fn test_rule_with_unrepresentable_span_rejected() {
        let source = iv(i64::MIN, 1);
        assert_eq!(
            Rule::new(source, 0),
            Err(CoreError::SpanTooWide {
                begin: i64::MIN,
                end: 1
            })
        );
    }

    #[test]
    fn test_display_single_rule() {
        let stage = Stage::new("a", "b", vec![Rule::new(iv(0, 10), 100).unwrap()]);
        assert_eq!(stage.to_string(), "Almanac(a, b, [Map(0, 10, 100)])");
        assert_eq!(Stage::new("a", "b", vec![]).to_string(), "Almanac(a, b, [])");
    }

    #[test]
    fn test_translate_set_splits_at_rule_boundaries() {
        let stage = seed_to_soil();
        let out = stage.translate_set(&IntervalSet::from_intervals([iv(45, 100)]));
        // [45,50) identity, [50,98) -> [52,100), [98,100) -> [50,52)
        assert_eq!(out.iter().copied().collect::<Vec<_>>(), vec![iv(45, 100)]);

        let out = stage.translate_set(&IntervalSet::from_intervals([iv(96, 99)]));
        assert_eq!(out.iter().copied().collect::<Vec<_>>(), vec![iv(50, 51), iv(98, 100)]);
    }

    #[test]
    fn test_translate_set_agrees_with_pointwise_translate() {
        let stage = Stage::new(
            "a",
            "b",
            vec![
                Rule::new(iv(0, 10), 100).unwrap(),
                Rule::new(iv(5, 15), 500).unwrap(),
                Rule::new(iv(20, 22), -3).unwrap(),
            ],
        );
        let input = IntervalSet::from_intervals([iv(-2, 25)]);
        let expected = IntervalSet::from_intervals(
            (-2..25).map(|x| Interval::point(stage.translate(x)).unwrap()),
        );
        assert_eq!(stage.translate_set(&input), expected);
    }

    #[test]
    fn test_display_matches_report_format() {
        assert_eq!(
            seed_to_soil().to_string(),
            "Almanac(seed, soil, [Map(98, 100, 50) Map(50, 98, 52)])"
        );
    }
}

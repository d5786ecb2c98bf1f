//! Interval: half-open integer range `[begin, end)`
use crate::error::CoreError;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Interval {
    begin: i64,
    end: i64,
}

impl Interval {
    /// Rejects `begin > end`; `begin == end` is the empty interval.
    pub fn new(begin: i64, end: i64) -> Result<Self, CoreError> {
        if begin > end {
            return Err(CoreError::InvertedInterval { begin, end });
        }
        Ok(Self { begin, end })
    }

    /// Builds `[begin, begin + length)` from the `(begin, length)` input convention.
    pub fn from_length(begin: i64, length: i64) -> Result<Self, CoreError> {
        if length < 0 {
            return Err(CoreError::NegativeLength { begin, length });
        }
        let end = begin
            .checked_add(length)
            .ok_or(CoreError::Overflow { begin, length })?;
        Ok(Self { begin, end })
    }

    /// Single-integer interval `[value, value + 1)`.
    pub fn point(value: i64) -> Result<Self, CoreError> {
        Self::from_length(value, 1)
    }

    pub fn begin(&self) -> i64 {
        self.begin
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    pub fn len(&self) -> u64 {
        self.end.abs_diff(self.begin)
    }

    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    pub fn contains(&self, x: i64) -> bool {
        self.begin <= x && x < self.end
    }

    /// Overlapping part of both intervals, `None` when they are disjoint
    /// or either is empty.
    pub fn intersect(&self, other: &Interval) -> Option<Interval> {
        let begin = self.begin.max(other.begin);
        let end = self.end.min(other.end);
        (begin < end).then_some(Interval { begin, end })
    }

    /// Every integer of the interval, ascending.
    pub fn values(&self) -> std::ops::Range<i64> {
        self.begin..self.end
    }

    /// Parts of `self` strictly below and strictly above `other`.
    pub fn remainders(&self, other: &Interval) -> (Option<Interval>, Option<Interval>) {
        let below = Interval {
            begin: self.begin,
            end: self.end.min(other.begin),
        };
        let above = Interval {
            begin: self.begin.max(other.end),
            end: self.end,
        };
        (
            (below.begin < below.end).then_some(below),
            (above.begin < above.end).then_some(above),
        )
    }

    /// Bounds already known to be ordered.
    pub(crate) fn raw(begin: i64, end: i64) -> Self {
        debug_assert!(begin <= end);
        Self { begin, end }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.begin, self.end)
    }
}

/// Sorted, non-overlapping, non-adjacent set of non-empty intervals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntervalSet {
    intervals: Vec<Interval>,
}

impl IntervalSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes arbitrary intervals with a sorted sweep: empties dropped,
    /// overlapping and touching intervals merged.
    pub fn from_intervals<I>(intervals: I) -> Self
    where
        I: IntoIterator<Item = Interval>,
    {
        let mut sorted: Vec<Interval> = intervals.into_iter().filter(|i| !i.is_empty()).collect();
        sorted.sort_unstable();

        let mut merged: Vec<Interval> = Vec::with_capacity(sorted.len());
        for next in sorted {
            match merged.last_mut() {
                Some(last) if next.begin <= last.end => {
                    last.end = last.end.max(next.end);
                }
                _ => merged.push(next),
            }
        }

        Self { intervals: merged }
    }

    /// Adds `interval`, merging it with the run of intervals it overlaps or
    /// touches. Intervals outside that run are left in place.
    pub fn insert(&mut self, interval: Interval) {
        if interval.is_empty() {
            return;
        }
        let start = self.intervals.partition_point(|i| i.end < interval.begin);
        let stop = self.intervals.partition_point(|i| i.begin <= interval.end);

        let mut merged = interval;
        if start < stop {
            merged.begin = merged.begin.min(self.intervals[start].begin);
            merged.end = merged.end.max(self.intervals[stop - 1].end);
        }
        self.intervals.splice(start..stop, std::iter::once(merged));
    }

    /// Parts of `interval` not covered by this set, ascending.
    pub fn uncovered(&self, interval: &Interval) -> Vec<Interval> {
        let mut pieces = Vec::new();
        let mut cursor = interval.begin;

        for covered in &self.intervals {
            if covered.end <= cursor {
                continue;
            }
            if covered.begin >= interval.end {
                break;
            }
            if covered.begin > cursor {
                pieces.push(Interval {
                    begin: cursor,
                    end: covered.begin,
                });
            }
            cursor = cursor.max(covered.end);
            if cursor >= interval.end {
                break;
            }
        }

        if cursor < interval.end {
            pieces.push(Interval {
                begin: cursor,
                end: interval.end,
            });
        }
        pieces
    }

    /// Smallest integer in the set.
    pub fn min(&self) -> Option<i64> {
        self.intervals.first().map(Interval::begin)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Interval> {
        self.intervals.iter()
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }
}

impl IntoIterator for IntervalSet {
    type Item = Interval;
    type IntoIter = std::vec::IntoIter<Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.into_iter()
    }
}

//! Unified Error Model
use thiserror::Error;

/// Construction-time failures. Once a stage or pipeline exists, every
/// operation on it is total.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("INTERVAL/inverted: begin {begin} > end {end}")]
    InvertedInterval { begin: i64, end: i64 },

    #[error("INTERVAL/negative-length: {begin} with length {length}")]
    NegativeLength { begin: i64, length: i64 },

    #[error("INTERVAL/overflow: {begin} + {length} exceeds i64")]
    Overflow { begin: i64, length: i64 },

    #[error("INTERVAL/overflow: span [{begin}, {end}) exceeds i64")]
    SpanTooWide { begin: i64, end: i64 },
}

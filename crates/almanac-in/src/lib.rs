//! Almanac IN: text front end for the range-mapping engine
//!
//! Turns the textual almanac into the tuples the core consumes.
//!
//! # Example
//!
//! ```ignore
//! use almanac_in::parse_almanac;
//!
//! let parsed = parse_almanac("seeds: 79 14\n\nseed-to-soil map:\n52 50 48\n")?;
//! let pipeline = parsed.pipeline()?;
//! let minimum = almanac_core::evaluate(&parsed.seed_pairs()?, &pipeline)?;
//! ```

pub mod ast;
pub mod grammar;
pub mod parser;

pub use ast::{ParsedAlmanac, StageSpec};
pub use grammar::AlmanacGrammar;
pub use parser::{parse_almanac, AlmanacParser, ParseError};

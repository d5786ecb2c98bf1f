//! Line patterns for the almanac text format.
//!
//! The patterns are compiled once per [`AlmanacGrammar`] value and owned by
//! the parser that uses them; nothing here is process-global.

use regex::Regex;

/// Compiled line patterns ready for matching
#[derive(Debug, Clone)]
pub struct AlmanacGrammar {
    /// `seeds: 79 14 55 13`
    pub seeds: Regex,
    /// `seed-to-soil map:`
    pub header: Regex,
    /// `50 98 2`
    pub rule: Regex,
}

impl AlmanacGrammar {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            seeds: Regex::new(r"^seeds:\s*(?P<values>.*?)\s*$")?,
            header: Regex::new(r"^(?P<from>[A-Za-z0-9_]+)-to-(?P<to>[A-Za-z0-9_]+)\s+map:\s*$")?,
            rule: Regex::new(r"^\s*(?P<dest>-?\d+)\s+(?P<src>-?\d+)\s+(?P<len>-?\d+)\s*$")?,
        })
    }
}

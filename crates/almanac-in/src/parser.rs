use crate::ast::{ParsedAlmanac, StageSpec};
use crate::grammar::AlmanacGrammar;
use almanac_core::CoreError;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("PARSE/empty input")]
    Empty,
    #[error("PARSE/missing `seeds:` line at the top of the input")]
    MissingSeeds,
    #[error("PARSE/malformed line {line}: {content:?}")]
    MalformedInput { line: usize, content: String },
    #[error("PARSE/incomplete section at line {line} ({section}): {reason}")]
    IncompleteSection {
        line: usize,
        section: String,
        reason: String,
    },
    #[error("PARSE/odd seed count {0}: seeds come in (begin, length) pairs")]
    OddSeedCount(usize),
    #[error("BUILD/{0}")]
    Build(#[from] CoreError),
    #[error("PATTERN/{0}")]
    Pattern(#[from] regex::Error),
}

/// A blank-line delimited block, lines tagged with their 1-based number.
type Section<'a> = Vec<(usize, &'a str)>;

/// Parser owning its compiled grammar.
#[derive(Debug, Clone)]
pub struct AlmanacParser {
    grammar: AlmanacGrammar,
}

impl AlmanacParser {
    pub fn new() -> Result<Self, ParseError> {
        Ok(Self {
            grammar: AlmanacGrammar::new()?,
        })
    }

    /// Expects a `seeds:` line, then `<from>-to-<to> map:` blocks of
    /// `dest src len` lines, blocks separated by blank lines.
    pub fn parse(&self, input: &str) -> Result<ParsedAlmanac, ParseError> {
        let mut sections = split_sections(input).into_iter();
        let seeds_section = sections.next().ok_or(ParseError::Empty)?;
        let seeds = self.parse_seeds(&seeds_section)?;

        let stages = sections
            .map(|section| self.parse_stage(&section))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(seeds = seeds.len(), stages = stages.len(), "almanac parsed");
        Ok(ParsedAlmanac { seeds, stages })
    }

    fn parse_seeds(&self, section: &Section<'_>) -> Result<Vec<i64>, ParseError> {
        let (&(line, text), rest) = section.split_first().ok_or(ParseError::Empty)?;
        let caps = self
            .grammar
            .seeds
            .captures(text)
            .ok_or(ParseError::MissingSeeds)?;

        if let Some(&(line, extra)) = rest.first() {
            return Err(malformed(line, extra));
        }

        caps["values"]
            .split_whitespace()
            .map(|token| token.parse::<i64>().map_err(|_| malformed(line, text)))
            .collect()
    }

    fn parse_stage(&self, section: &Section<'_>) -> Result<StageSpec, ParseError> {
        let (&(line, header), body) = section.split_first().ok_or(ParseError::Empty)?;
        let caps = self
            .grammar
            .header
            .captures(header)
            .ok_or_else(|| ParseError::IncompleteSection {
                line,
                section: header.trim().to_string(),
                reason: "missing `<from>-to-<to> map:` header".to_string(),
            })?;

        if body.is_empty() {
            return Err(ParseError::IncompleteSection {
                line,
                section: header.trim().to_string(),
                reason: "no rule lines".to_string(),
            });
        }

        let rules = body
            .iter()
            .map(|&(rule_line, text)| self.parse_rule(rule_line, text))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(StageSpec {
            from: caps["from"].to_string(),
            to: caps["to"].to_string(),
            rules,
            line,
        })
    }

    fn parse_rule(&self, line: usize, text: &str) -> Result<(i64, i64, i64), ParseError> {
        let caps = self
            .grammar
            .rule
            .captures(text)
            .ok_or_else(|| malformed(line, text))?;
        let field = |name: &str| caps[name].parse::<i64>().map_err(|_| malformed(line, text));
        Ok((field("dest")?, field("src")?, field("len")?))
    }
}

/// Convenience wrapper compiling a fresh grammar for a single parse.
pub fn parse_almanac(input: &str) -> Result<ParsedAlmanac, ParseError> {
    AlmanacParser::new()?.parse(input)
}

fn malformed(line: usize, content: &str) -> ParseError {
    ParseError::MalformedInput {
        line,
        content: content.to_string(),
    }
}

fn split_sections(input: &str) -> Vec<Section<'_>> {
    let mut sections = Vec::new();
    let mut current: Section<'_> = Vec::new();

    for (idx, raw) in input.lines().enumerate() {
        let line = raw.trim_end();
        if line.trim().is_empty() {
            if !current.is_empty() {
                sections.push(std::mem::take(&mut current));
            }
            continue;
        }
        current.push((idx + 1, line));
    }
    if !current.is_empty() {
        sections.push(current);
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = "seeds: 79 14 55 13\n\nseed-to-soil map:\n50 98 2\n52 50 48\n\nsoil-to-fertilizer map:\n0 15 37\n";

    #[test]
    fn test_parse_small_almanac() {
        let parsed = parse_almanac(SMALL).unwrap();
        assert_eq!(parsed.seeds, vec![79, 14, 55, 13]);
        assert_eq!(parsed.stages.len(), 2);
        assert_eq!(parsed.stages[0].from, "seed");
        assert_eq!(parsed.stages[0].to, "soil");
        assert_eq!(parsed.stages[0].rules, vec![(50, 98, 2), (52, 50, 48)]);
        assert_eq!(parsed.stages[0].line, 3);
        assert_eq!(parsed.stages[1].line, 7);
    }

    #[test]
    fn test_crlf_and_extra_blank_lines() {
        let input = "seeds: 1 2\r\n\r\n\r\na-to-b map:\r\n5 0 3\r\n";
        let parsed = parse_almanac(input).unwrap();
        assert_eq!(parsed.seeds, vec![1, 2]);
        assert_eq!(parsed.stages[0].rules, vec![(5, 0, 3)]);
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(parse_almanac(""), Err(ParseError::Empty)));
        assert!(matches!(parse_almanac("\n\n  \n"), Err(ParseError::Empty)));
    }

    #[test]
    fn test_missing_seeds() {
        let err = parse_almanac("seed-to-soil map:\n50 98 2\n").unwrap_err();
        assert!(matches!(err, ParseError::MissingSeeds));
    }

    #[test]
    fn test_non_numeric_seed() {
        let err = parse_almanac("seeds: 79 x4\n").unwrap_err();
        assert!(matches!(err, ParseError::MalformedInput { line: 1, .. }));
    }

    #[test]
    fn test_malformed_rule_line() {
        let err = parse_almanac("seeds: 1 2\n\na-to-b map:\n5 0\n").unwrap_err();
        match err {
            ParseError::MalformedInput { line, content } => {
                assert_eq!(line, 4);
                assert_eq!(content, "5 0");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_number_out_of_range_is_malformed() {
        let err = parse_almanac("seeds: 1 2\n\na-to-b map:\n5 0 99999999999999999999\n").unwrap_err();
        assert!(matches!(err, ParseError::MalformedInput { line: 4, .. }));
    }

    #[test]
    fn test_section_without_header() {
        let err = parse_almanac("seeds: 1 2\n\n5 0 3\n").unwrap_err();
        assert!(matches!(err, ParseError::IncompleteSection { line: 3, .. }));
    }

    #[test]
    fn test_section_without_rules() {
        let err = parse_almanac("seeds: 1 2\n\na-to-b map:\n\nb-to-c map:\n1 2 3\n").unwrap_err();
        match err {
            ParseError::IncompleteSection { section, reason, .. } => {
                assert_eq!(section, "a-to-b map:");
                assert_eq!(reason, "no rule lines");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_odd_seed_count() {
        let parsed = parse_almanac("seeds: 1 2 3\n").unwrap();
        assert!(matches!(parsed.seed_pairs(), Err(ParseError::OddSeedCount(3))));
        assert_eq!(parsed.seed_values(), &[1, 2, 3]);
    }

    #[test]
    fn test_negative_rule_length_rejected_at_build() {
        let parsed = parse_almanac("seeds: 1 2\n\na-to-b map:\n5 0 -3\n").unwrap();
        assert!(matches!(
            parsed.pipeline(),
            Err(ParseError::Build(CoreError::NegativeLength { .. }))
        ));
    }

    #[test]
    fn test_parser_reusable() {
        let parser = AlmanacParser::new().unwrap();
        let first = parser.parse(SMALL).unwrap();
        let second = parser.parse(SMALL).unwrap();
        assert_eq!(first, second);
    }
}

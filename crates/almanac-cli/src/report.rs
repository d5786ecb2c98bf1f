//! Report rendering: the plain console report and its JSON counterpart
use almanac_core::{EvalObserver, Interval, Pipeline, Stage, Strategy};
use serde::Serialize;
use std::io::{self, Write};

use crate::config::SeedMode;

/// `seeds:` and `almanacs:` blocks printed before evaluation.
pub fn write_dump<W: Write + ?Sized>(out: &mut W, seeds: &[Interval], pipeline: &Pipeline) -> io::Result<()> {
    writeln!(out, "seeds:")?;
    for seed in seeds {
        writeln!(out, "Range{}", seed)?;
    }
    writeln!(out, "almanacs:")?;
    for stage in pipeline.stages() {
        writeln!(out, "{}", stage)?;
    }
    Ok(())
}

pub fn write_minimum<W: Write + ?Sized>(out: &mut W, minimum: i64) -> io::Result<()> {
    writeln!(out, "{}", minimum)
}

/// Streams `finished seed range Range(b, e)` lines as the evaluator completes
/// each range. The first write error is kept and later writes are skipped.
pub struct PlainProgress<'a, W: Write + ?Sized> {
    out: &'a mut W,
    error: Option<io::Error>,
}

impl<'a, W: Write + ?Sized> PlainProgress<'a, W> {
    pub fn new(out: &'a mut W) -> Self {
        Self { out, error: None }
    }

    pub fn finish(self) -> io::Result<()> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl<W: Write + ?Sized> EvalObserver for PlainProgress<'_, W> {
    fn on_range_finished(&mut self, range: &Interval) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = writeln!(self.out, "finished seed range Range{}", range) {
            self.error = Some(err);
        }
    }
}

/// Collects finished ranges for the JSON report.
#[derive(Debug, Default)]
pub struct FinishedRanges(pub Vec<Interval>);

impl EvalObserver for FinishedRanges {
    fn on_range_finished(&mut self, range: &Interval) {
        self.0.push(*range);
    }
}

#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub mode: SeedMode,
    pub strategy: Strategy,
    pub seeds: &'a [Interval],
    pub stages: &'a [Stage],
    pub finished: &'a [Interval],
    pub minimum: i64,
}

impl RunReport<'_> {
    pub fn write_json<W: Write>(&self, out: &mut W) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use almanac_core::{build_pipeline, build_stage};

    fn iv(begin: i64, end: i64) -> Interval {
        Interval::new(begin, end).unwrap()
    }

    #[test]
    fn test_dump_format() {
        let pipeline = build_pipeline(vec![build_stage("seed", "soil", &[(50, 98, 2), (52, 50, 48)]).unwrap()]);
        let mut out = Vec::new();
        write_dump(&mut out, &[iv(79, 93), iv(55, 68)], &pipeline).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "seeds:\nRange(79, 93)\nRange(55, 68)\nalmanacs:\nAlmanac(seed, soil, [Map(98, 100, 50) Map(50, 98, 52)])\n"
        );
    }

    #[test]
    fn test_progress_lines() {
        let mut out = Vec::new();
        let mut progress = PlainProgress::new(&mut out);
        progress.on_range_finished(&iv(79, 93));
        progress.on_range_finished(&iv(55, 68));
        progress.finish().unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "finished seed range Range(79, 93)\nfinished seed range Range(55, 68)\n"
        );
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_progress_keeps_write_error() {
        let mut broken = Broken;
        let mut progress = PlainProgress::new(&mut broken);
        progress.on_range_finished(&iv(0, 1));
        progress.on_range_finished(&iv(1, 2));
        let err = progress.finish().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn test_json_report() {
        let pipeline = build_pipeline(vec![build_stage("seed", "soil", &[(52, 50, 48)]).unwrap()]);
        let seeds = [iv(55, 68)];
        let report = RunReport {
            mode: SeedMode::Ranges,
            strategy: Strategy::Split,
            seeds: &seeds,
            stages: pipeline.stages(),
            finished: &seeds,
            minimum: 57,
        };
        let mut out = Vec::new();
        report.write_json(&mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["minimum"], 57);
        assert_eq!(value["mode"], "ranges");
        assert_eq!(value["strategy"], "split");
        assert_eq!(value["seeds"][0]["begin"], 55);
        assert_eq!(value["stages"][0]["name"]["from"], "seed");
        assert_eq!(value["stages"][0]["rules"][0]["dest_begin"], 52);
    }
}

//! Pipeline: ordered composition of stages
use crate::interval::IntervalSet;
use crate::stage::{Stage, Translate};
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Pipeline {
    stages: Vec<Stage>,
}

impl Pipeline {
    /// Stages run in exactly this order. Labels are not checked for
    /// continuity; a break in the chain is only logged.
    pub fn new(stages: Vec<Stage>) -> Self {
        for pair in stages.windows(2) {
            let (left, right) = (pair[0].name(), pair[1].name());
            if left.to != right.from {
                warn!(
                    "stage {}-to-{} feeds {}-to-{}: labels do not chain",
                    left.from, left.to, right.from, right.to
                );
            }
        }
        Self { stages }
    }

    /// Folds `x` through every stage in declaration order.
    pub fn map(&self, x: i64) -> i64 {
        self.translate(x)
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Label chain, e.g. `seed→soil→location`.
    pub fn pipeline_id(&self) -> String {
        let mut labels: Vec<&str> = Vec::with_capacity(self.stages.len() + 1);
        if let Some(first) = self.stages.first() {
            labels.push(first.name().from.as_str());
        }
        labels.extend(self.stages.iter().map(|s| s.name().to.as_str()));
        labels.join("→")
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl Translate for Pipeline {
    fn translate(&self, x: i64) -> i64 {
        self.stages.iter().fold(x, |value, stage| stage.translate(value))
    }

    fn translate_set(&self, input: &IntervalSet) -> IntervalSet {
        let mut current = input.clone();
        for stage in &self.stages {
            current = stage.translate_set(&current);
            debug!(
                stage = %format!("{}-to-{}", stage.name().from, stage.name().to),
                intervals = current.len(),
                "stage mapped"
            );
        }
        current
    }
}

//! Run configuration
//!
//! Layers, lowest precedence first: built-in defaults, an optional YAML
//! file, the `ALMANAC_INPUT` environment variable, command-line flags.

use almanac_core::Strategy;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable overriding the input path
pub const INPUT_ENV: &str = "ALMANAC_INPUT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("CONFIG/read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CONFIG/yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// How the numbers of the `seeds:` line are read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SeedMode {
    /// `(begin, length)` pairs
    #[default]
    Ranges,
    /// every number is one seed
    Singles,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ReportFormat {
    #[default]
    Plain,
    Json,
}

/// Command-line spelling of [`Strategy`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    Split,
    BruteForce,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Split => Strategy::Split,
            StrategyArg::BruteForce => Strategy::BruteForce,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RunConfig {
    pub input: PathBuf,
    pub mode: SeedMode,
    pub strategy: Strategy,
    pub format: ReportFormat,
    /// Print the parsed seeds and stages before evaluating
    pub dump: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data/input.txt"),
            mode: SeedMode::default(),
            strategy: Strategy::default(),
            format: ReportFormat::default(),
            dump: true,
        }
    }
}

impl RunConfig {
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(contents)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&contents)
    }

    /// Applies environment overrides; `lookup` is `std::env::var` outside tests.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(input) = lookup(INPUT_ENV).filter(|v| !v.is_empty()) {
            self.input = PathBuf::from(input);
        }
    }
}

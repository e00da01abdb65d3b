//! Tunable quiz parameters, optionally read from a TOML file.

use std::fs;
use std::io;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::models::{Module, Settings};

pub const DEFAULT_EXAM_SAMPLE_SIZE: NonZeroUsize = match NonZeroUsize::new(60) {
    Some(size) => size,
    None => NonZeroUsize::MIN,
};
pub const DEFAULT_PASS_THRESHOLD: usize = 45;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExamConfig {
    /// Questions drawn for an exam. Zero is rejected at parse time.
    pub sample_size: NonZeroUsize,
}

impl Default for ExamConfig {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_EXAM_SAMPLE_SIZE,
        }
    }
}

/// Correct answers needed to pass, per module.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PassThresholds {
    #[serde(rename = "K")]
    pub k: usize,
    #[serde(rename = "T1")]
    pub t1: usize,
}

impl Default for PassThresholds {
    fn default() -> Self {
        Self {
            k: DEFAULT_PASS_THRESHOLD,
            t1: DEFAULT_PASS_THRESHOLD,
        }
    }
}

impl PassThresholds {
    pub fn for_module(&self, module: Module) -> usize {
        match module {
            Module::K => self.k,
            Module::T1 => self.t1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    /// Initial values of the menu toggles.
    pub settings: Settings,
    pub exam: ExamConfig,
    pub pass_threshold: PassThresholds,
}

impl QuizConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

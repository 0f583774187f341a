// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Suite configuration loaded from TOML.
//!
//! Every key is optional; missing keys take the smoke-test defaults.

use std::fs;
use std::path::{Path, PathBuf};

use batterystats::ConsumptionType;
use serde::{Deserialize, Serialize};

use crate::harness::{BenchConfig, BenchError};

/// Repetitions for synchronous cases.
pub const DEFAULT_REPETITIONS: u32 = 1000;
/// Repetitions for the promise-style case.
pub const DEFAULT_PROMISE_REPETITIONS: u32 = 80;
/// Mean latency bound in microseconds.
pub const DEFAULT_TIMEOUT_MICROS: f64 = 70_000.0;
/// Application uid queried by the app cases.
pub const DEFAULT_APP_UID: i32 = 111;

/// Errors raised while loading a suite configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML for this schema.
    #[error("failed to parse suite config: {0}")]
    Parse(#[from] toml::de::Error),
    /// Values parsed but are out of range.
    #[error(transparent)]
    Invalid(#[from] BenchError),
}

/// Parameters shared by every case of the suite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SuiteConfig {
    /// Repetitions for synchronous cases.
    pub repetitions: u32,
    /// Repetitions for the asynchronous case.
    pub promise_repetitions: u32,
    /// Mean latency bound in microseconds.
    pub timeout_micros: f64,
    /// Uid passed to the app queries.
    pub app_uid: i32,
    /// Category passed to the hardware unit queries; long or short name.
    pub category: ConsumptionType,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            repetitions: DEFAULT_REPETITIONS,
            promise_repetitions: DEFAULT_PROMISE_REPETITIONS,
            timeout_micros: DEFAULT_TIMEOUT_MICROS,
            app_uid: DEFAULT_APP_UID,
            category: ConsumptionType::Idle,
        }
    }
}

impl SuiteConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&text)
    }

    /// Checks both harness configurations can be built.
    pub fn validate(&self) -> Result<(), BenchError> {
        self.sync_config()?;
        self.async_config()?;
        Ok(())
    }

    /// Harness configuration for the synchronous cases.
    pub fn sync_config(&self) -> Result<BenchConfig, BenchError> {
        BenchConfig::new(self.repetitions, self.timeout_micros)
    }

    /// Harness configuration for the asynchronous case.
    pub fn async_config(&self) -> Result<BenchConfig, BenchError> {
        BenchConfig::new(self.promise_repetitions, self.timeout_micros)
    }
}

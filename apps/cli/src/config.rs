// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI configuration loaded from environment variables.

use crate::error::CliError;
use shopgen_geometry::LayoutConfig;
use shopgen_processing::DEFAULT_VALID_DAYS;
use std::path::PathBuf;

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of worker threads for batch processing.
    pub worker_threads: usize,
    /// Optional JSON file overriding layout constants.
    pub layout_config: Option<PathBuf>,
    /// Days a quote stays valid after its issue date.
    pub quote_valid_days: u32,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            worker_threads: std::env::var("SHOPGEN_WORKER_THREADS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|n: &usize| *n > 0)
                .unwrap_or_else(num_cpus::get),
            layout_config: std::env::var("SHOPGEN_LAYOUT_CONFIG")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            quote_valid_days: std::env::var("SHOPGEN_QUOTE_VALID_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_VALID_DAYS),
        }
    }

    /// Layout constants: defaults, or the configured override file.
    pub fn load_layout(&self) -> Result<LayoutConfig, CliError> {
        let Some(path) = &self.layout_config else {
            return Ok(LayoutConfig::default());
        };
        let text = std::fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.display().to_string(),
            source,
        })?;
        LayoutConfig::from_json(&text).map_err(|source| CliError::Layout {
            path: path.display().to_string(),
            source,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

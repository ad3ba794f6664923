//! Configuration types

use serde::Deserialize;

/// Top-level configuration loaded from config.toml.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub report: ReportSettings,
}

/// Report knobs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Cutoff for ranked sections.
    pub top_n: usize,
    /// How many duplicate groups to keep as samples.
    pub duplicate_sample_size: usize,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            top_n: 5,
            duplicate_sample_size: 3,
        }
    }
}

//! Structured report model
//!
//! A report is an ordered sequence of named sections. Sections are computed
//! and failure-isolated independently: a failing section records its error
//! and never corrupts its siblings. The same `Report` value feeds the text
//! renderer and JSON serialization.

use serde::Serialize;

use crate::error::CatstatError;
use crate::stats::{DuplicateSummary, GroupStat, LevelStats, StructureCheck};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub title: String,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub title: String,
    #[serde(flatten)]
    pub body: SectionBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SectionBody {
    /// A single total.
    Count(u64),
    /// Cardinality of the distinct values at a field.
    Distinct { field: String, cardinality: u64 },
    /// Grouped counts with percentages.
    Groups(Vec<GroupStat>),
    /// Numeric field statistics plus distribution.
    Levels(LevelStats),
    /// Duplicate key analysis.
    Duplicates(DuplicateSummary),
    /// Field-presence validation of a sample record.
    Structure(StructureCheck),
    /// The section's computation failed; siblings are unaffected.
    Failed { error: String },
}

impl Report {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    /// Append a section, converting a failed computation into a `Failed`
    /// body instead of propagating.
    pub fn push(&mut self, title: impl Into<String>, body: Result<SectionBody, CatstatError>) {
        let title = title.into();
        let body = match body {
            Ok(body) => body,
            Err(e) => {
                log::warn!("report section '{}' failed: {}", title, e);
                SectionBody::Failed {
                    error: e.to_string(),
                }
            }
        };
        self.sections.push(Section { title, body });
    }

    /// Pretty-printed JSON rendering.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

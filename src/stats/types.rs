//! Result types for the aggregation operations

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

use crate::record::GroupKey;

/// Bucket ordering for grouped output.
///
/// Ties are broken by first-encountered order in the scan (stable sort).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Largest buckets first.
    #[default]
    CountDesc,
    /// Buckets by key, ascending.
    KeyAsc,
}

/// Ranking metric for top-N truncation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankBy {
    Count,
    Key,
}

/// A named auxiliary distinct-value set collected per bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistinctSpec {
    pub name: String,
    pub path: String,
}

/// What to compute for each bucket of a grouping.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    pub sort: SortOrder,
    pub distinct: Vec<DistinctSpec>,
}

impl Aggregation {
    /// Count-descending grouping with no auxiliary sets.
    pub fn by_count() -> Self {
        Self {
            sort: SortOrder::CountDesc,
            distinct: Vec::new(),
        }
    }

    /// Key-ascending grouping with no auxiliary sets.
    pub fn by_key() -> Self {
        Self {
            sort: SortOrder::KeyAsc,
            distinct: Vec::new(),
        }
    }

    /// Add a named distinct-value set collected at `path` within each bucket.
    pub fn with_distinct(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.distinct.push(DistinctSpec {
            name: name.into(),
            path: path.into(),
        });
        self
    }
}

/// Aggregate over one bucket of a grouping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupStat {
    pub key: GroupKey,
    pub count: u64,
    /// Share of the full record count, in percent.
    pub percentage: f64,
    /// Named auxiliary distinct-value sets, e.g. partners seen in this bucket.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, BTreeSet<GroupKey>>,
}

impl fmt::Display for GroupStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({:.1}%)", self.key, self.count, self.percentage)
    }
}

/// Statistics over a numeric field plus its per-value distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelStats {
    pub max: f64,
    pub min: f64,
    pub average: f64,
    /// Records where the field was absent; excluded from max/min/average.
    pub missing: u64,
    /// Per-level count/percentage, sorted by level ascending.
    pub distribution: Vec<GroupStat>,
}

/// One duplicated key with its occurrence count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicateGroup {
    pub key: GroupKey,
    pub count: u64,
    /// Distinct auxiliary values seen across the duplicates, when requested.
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub aux_values: BTreeSet<GroupKey>,
}

/// Duplicate analysis result.
///
/// Zero duplicate groups is a legitimate, reportable outcome, never an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicateSummary {
    pub total_groups: u64,
    /// First groups in discovery order, bounded by the configured sample cap.
    pub samples: Vec<DuplicateGroup>,
}

impl DuplicateSummary {
    pub fn is_empty(&self) -> bool {
        self.total_groups == 0
    }
}

/// Presence check for one required field path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldCheck {
    pub path: String,
    pub present: bool,
}

/// Structural validation of one representative record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StructureCheck {
    /// The source yielded no record to inspect.
    NoSample,
    Checked {
        fields: Vec<FieldCheck>,
        all_present: bool,
    },
}

impl StructureCheck {
    pub fn passed(&self) -> bool {
        matches!(
            self,
            StructureCheck::Checked {
                all_present: true,
                ..
            }
        )
    }
}

//! Aggregation operations over semi-structured records
//!
//! The reporter computes grouped counts, percentages, top-N rankings,
//! distinct-value cardinalities, duplicate groups, numeric field statistics,
//! and field-presence validation. Presentation lives elsewhere; everything
//! here returns structured values.

mod reporter;
mod types;

pub use reporter::StatsReporter;
pub use types::{
    Aggregation, DistinctSpec, DuplicateGroup, DuplicateSummary, FieldCheck, GroupStat,
    LevelStats, RankBy, SortOrder, StructureCheck,
};

pub(crate) use reporter::group_scan;

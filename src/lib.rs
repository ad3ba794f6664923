//! catstat library - descriptive statistics over semi-structured records
//!
//! A generic aggregation-and-reporting pipeline: grouped counts and
//! percentages, top-N rankings, distinct-value cardinalities, duplicate
//! detection, numeric field statistics, and structural field-presence
//! validation over catalog-style JSON records, with strictly separated text
//! and JSON presentation.

pub mod catalog;
pub mod config;
pub mod error;
pub mod record;
pub mod render;
pub mod report;
pub mod source;
pub mod stats;

// Re-export commonly used types for convenience
pub use catalog::ReportOptions;
pub use config::Config;
pub use error::CatstatError;
pub use record::GroupKey;
pub use report::{Report, Section, SectionBody};
pub use source::{MemorySource, RecordSource};
pub use stats::{Aggregation, GroupStat, RankBy, SortOrder, StatsReporter};

//! Record source collaborators
//!
//! The reporter never owns the data. It borrows a `RecordSource` over one
//! finite, externally-materialized snapshot; the caller owns the source
//! lifecycle (open before reporting, close after).

mod loader;
mod memory;

pub use loader::{load_records, parse_records};
pub use memory::MemorySource;

use std::collections::BTreeSet;

use serde_json::Value;

use crate::error::CatstatError;
use crate::record::{GroupKey, resolve_path};
use crate::stats::{Aggregation, GroupStat, group_scan};

/// A queryable snapshot of semi-structured records.
///
/// `scan` must be repeatable: every call yields the same records in the same
/// order. The remaining operations have provided implementations in terms of
/// `scan`; a source backed by a real store may override them to push work
/// down, but must return identical results.
pub trait RecordSource {
    /// One pass over the snapshot, in stable order.
    fn scan(&self) -> Box<dyn Iterator<Item = &Value> + '_>;

    /// Total record count.
    fn count(&self) -> Result<u64, CatstatError> {
        Ok(self.scan().count() as u64)
    }

    /// Distinct scalar values at `path`. Records without the field (or with a
    /// container there) are skipped.
    fn distinct(&self, path: &str) -> Result<BTreeSet<GroupKey>, CatstatError> {
        Ok(self
            .scan()
            .filter_map(|record| resolve_path(record, path))
            .filter_map(GroupKey::from_value)
            .collect())
    }

    /// First record matching `predicate`, in scan order.
    fn find_one(
        &self,
        predicate: &dyn Fn(&Value) -> bool,
    ) -> Result<Option<&Value>, CatstatError> {
        Ok(self.scan().find(|record| predicate(record)))
    }

    /// Grouped aggregation with the percentage denominator fixed at the
    /// snapshot's record count.
    ///
    /// Overriding implementations must preserve the ordering contract:
    /// requested sort order with ties in first-encountered scan order.
    fn group_aggregate(
        &self,
        path: &str,
        aggregation: &Aggregation,
    ) -> Result<Vec<GroupStat>, CatstatError> {
        let total = self.count()?;
        if total == 0 {
            return Err(CatstatError::EmptyInput);
        }
        Ok(group_scan(self.scan(), total, path, aggregation))
    }
}

//! The aggregation engine
//!
//! `StatsReporter` computes grouped statistics over a borrowed record source.
//! Every operation makes one pass per aggregation over a fresh `scan()`; the
//! percentage denominator is the record count taken at the start of the
//! operation.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde_json::Value;

use crate::error::CatstatError;
use crate::record::{GroupKey, resolve_path, value_type_name};
use crate::source::RecordSource;
use crate::stats::types::{
    Aggregation, DuplicateGroup, DuplicateSummary, FieldCheck, GroupStat, LevelStats, RankBy,
    SortOrder, StructureCheck,
};

/// Computes descriptive statistics over a record source.
///
/// The source handle is an explicit collaborator; its lifecycle (open before
/// reporting, close after) belongs to the caller.
pub struct StatsReporter<'a> {
    source: &'a dyn RecordSource,
}

impl<'a> StatsReporter<'a> {
    pub fn new(source: &'a dyn RecordSource) -> Self {
        Self { source }
    }

    /// Total record count. Zero is a valid return; only source failures error.
    pub fn count(&self) -> Result<u64, CatstatError> {
        self.source.count()
    }

    /// Distinct scalar values at `field_path`.
    ///
    /// Records missing the field are skipped, not treated as null-keyed.
    pub fn distinct_values(&self, field_path: &str) -> Result<BTreeSet<GroupKey>, CatstatError> {
        self.require_records()?;
        self.source.distinct(field_path)
    }

    /// Bucket records by the value at `group_field_path` and aggregate.
    ///
    /// Grouping is delegated to the source so a backing store may push it
    /// down; the default implementation computes it locally in one pass.
    pub fn group_and_aggregate(
        &self,
        group_field_path: &str,
        aggregation: &Aggregation,
    ) -> Result<Vec<GroupStat>, CatstatError> {
        self.require_records()?;
        self.source.group_aggregate(group_field_path, aggregation)
    }

    /// First `n` groups after a stable descending sort by the chosen metric.
    pub fn top_n(&self, grouped: &[GroupStat], n: usize, by: RankBy) -> Vec<GroupStat> {
        let mut ranked = grouped.to_vec();
        match by {
            RankBy::Count => ranked.sort_by(|a, b| b.count.cmp(&a.count)),
            RankBy::Key => ranked.sort_by(|a, b| b.key.cmp(&a.key)),
        }
        ranked.truncate(n);
        ranked
    }

    /// Groups at `key_field_path` occurring more than once, in discovery
    /// order, with up to `sample_cap` sample groups retained.
    ///
    /// An empty source or zero duplicates is a reportable result, not an
    /// error.
    pub fn find_duplicate_groups(
        &self,
        key_field_path: &str,
        aux_field_path: Option<&str>,
        sample_cap: usize,
    ) -> Result<DuplicateSummary, CatstatError> {
        let mut order: Vec<GroupKey> = Vec::new();
        let mut index: HashMap<GroupKey, usize> = HashMap::new();
        let mut counts: Vec<u64> = Vec::new();
        let mut aux: Vec<BTreeSet<GroupKey>> = Vec::new();

        for record in self.source.scan() {
            let Some(key) = extract_key(record, key_field_path) else {
                continue;
            };
            let slot = *index.entry(key.clone()).or_insert_with(|| {
                order.push(key);
                counts.push(0);
                aux.push(BTreeSet::new());
                counts.len() - 1
            });
            counts[slot] += 1;
            if let Some(aux_path) = aux_field_path {
                if let Some(aux_key) = extract_key(record, aux_path) {
                    aux[slot].insert(aux_key);
                }
            }
        }

        let mut total_groups = 0u64;
        let mut samples = Vec::new();
        for (slot, key) in order.into_iter().enumerate() {
            if counts[slot] <= 1 {
                continue;
            }
            total_groups += 1;
            if samples.len() < sample_cap {
                samples.push(DuplicateGroup {
                    key,
                    count: counts[slot],
                    aux_values: std::mem::take(&mut aux[slot]),
                });
            }
        }

        Ok(DuplicateSummary {
            total_groups,
            samples,
        })
    }

    /// Max/min/mean of a numeric field plus its ascending distribution.
    ///
    /// Records where the field is absent are excluded from the numeric
    /// statistics and tallied in `missing`; they are never coerced to zero. A
    /// present non-numeric value aborts with `MalformedValue`.
    pub fn level_statistics(&self, level_field_path: &str) -> Result<LevelStats, CatstatError> {
        self.require_records()?;

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut seen = 0u64;
        let mut missing = 0u64;

        for (index, record) in self.source.scan().enumerate() {
            let Some(value) = resolve_path(record, level_field_path) else {
                missing += 1;
                continue;
            };
            let Some(level) = value.as_f64() else {
                return Err(CatstatError::MalformedValue {
                    path: level_field_path.to_string(),
                    index,
                    found: value_type_name(value).to_string(),
                });
            };
            min = min.min(level);
            max = max.max(level);
            sum += level;
            seen += 1;
        }

        // Every record missing the field leaves no defined max/min/average.
        if seen == 0 {
            return Err(CatstatError::EmptyInput);
        }

        let distribution = self
            .source
            .group_aggregate(level_field_path, &Aggregation::by_key())?;

        Ok(LevelStats {
            max,
            min,
            average: sum / seen as f64,
            missing,
            distribution,
        })
    }

    /// Presence check of every required dotted path against one
    /// representative record.
    ///
    /// Returns `StructureCheck::NoSample` when the source yields nothing.
    pub fn validate_structure(
        &self,
        required_field_paths: &[&str],
    ) -> Result<StructureCheck, CatstatError> {
        let Some(sample) = self.source.find_one(&|_| true)? else {
            return Ok(StructureCheck::NoSample);
        };

        let fields: Vec<FieldCheck> = required_field_paths
            .iter()
            .map(|path| FieldCheck {
                path: (*path).to_string(),
                present: resolve_path(sample, path).is_some(),
            })
            .collect();
        let all_present = fields.iter().all(|f| f.present);

        Ok(StructureCheck::Checked {
            fields,
            all_present,
        })
    }

    fn require_records(&self) -> Result<u64, CatstatError> {
        let total = self.source.count()?;
        if total == 0 {
            return Err(CatstatError::EmptyInput);
        }
        Ok(total)
    }
}

fn extract_key(record: &Value, path: &str) -> Option<GroupKey> {
    resolve_path(record, path).and_then(GroupKey::from_value)
}

/// Single-pass local grouping used by the `RecordSource::group_aggregate`
/// default implementation.
///
/// Buckets accumulate in first-encountered order; the final stable sort
/// preserves that order for ties. `total` fixes the percentage denominator.
pub(crate) fn group_scan<'v>(
    records: impl Iterator<Item = &'v Value>,
    total: u64,
    group_field_path: &str,
    aggregation: &Aggregation,
) -> Vec<GroupStat> {
    struct Bucket {
        key: GroupKey,
        count: u64,
        extra: BTreeMap<String, BTreeSet<GroupKey>>,
    }

    let mut index: HashMap<GroupKey, usize> = HashMap::new();
    let mut buckets: Vec<Bucket> = Vec::new();

    for record in records {
        let Some(key) = extract_key(record, group_field_path) else {
            continue;
        };
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            buckets.push(Bucket {
                key,
                count: 0,
                extra: BTreeMap::new(),
            });
            buckets.len() - 1
        });
        buckets[slot].count += 1;
        for spec in &aggregation.distinct {
            if let Some(aux_key) = extract_key(record, &spec.path) {
                buckets[slot]
                    .extra
                    .entry(spec.name.clone())
                    .or_default()
                    .insert(aux_key);
            }
        }
    }

    let mut stats: Vec<GroupStat> = buckets
        .into_iter()
        .map(|bucket| GroupStat {
            key: bucket.key,
            count: bucket.count,
            percentage: bucket.count as f64 / total as f64 * 100.0,
            extra: bucket.extra,
        })
        .collect();

    match aggregation.sort {
        SortOrder::CountDesc => stats.sort_by(|a, b| b.count.cmp(&a.count)),
        SortOrder::KeyAsc => stats.sort_by(|a, b| a.key.cmp(&b.key)),
    }

    stats
}

#[cfg(test)]
#[path = "reporter_tests.rs"]
mod reporter_tests;

//! Prebuilt catalog reports
//!
//! Report definitions for the three catalog collections this tool audits:
//! offers carry `offer_id`/`partner`/`offer_type` plus a denormalized
//! `category` block, categories carry `level` and `metadata.total_products`,
//! products carry the denormalized category plus bookkeeping timestamps.
//!
//! Every section is computed independently; a failing section is recorded in
//! the report and the remaining sections still run.

use crate::report::{Report, SectionBody};
use crate::source::RecordSource;
use crate::stats::{Aggregation, RankBy, StatsReporter};

/// Knobs shared by the prebuilt reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    /// Cutoff for ranked sections.
    pub top_n: usize,
    /// How many duplicate groups to retain as samples.
    pub duplicate_sample_size: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            top_n: 5,
            duplicate_sample_size: 3,
        }
    }
}

/// Full offers collection analysis: volume, category depth, top categories,
/// duplicate offer ids across partners, offer types, and per-partner shares.
pub fn offers_report(source: &dyn RecordSource, options: &ReportOptions) -> Report {
    let reporter = StatsReporter::new(source);
    let mut report = Report::new("OFFERS CATALOG ANALYSIS");

    report.push("Total offers", reporter.count().map(SectionBody::Count));

    report.push(
        "Unique categories",
        reporter
            .distinct_values("category.path")
            .map(|set| SectionBody::Distinct {
                field: "category.path".to_string(),
                cardinality: set.len() as u64,
            }),
    );

    report.push(
        "Category depth",
        reporter
            .level_statistics("category.level")
            .map(SectionBody::Levels),
    );

    report.push(
        "Top categories by offer count",
        reporter
            .group_and_aggregate("category.path", &Aggregation::by_count())
            .map(|groups| {
                SectionBody::Groups(reporter.top_n(&groups, options.top_n, RankBy::Count))
            }),
    );

    report.push(
        "Duplicate offer ids",
        reporter
            .find_duplicate_groups("offer_id", Some("partner"), options.duplicate_sample_size)
            .map(SectionBody::Duplicates),
    );

    report.push(
        "Unique offer types",
        reporter
            .distinct_values("offer_type")
            .map(|set| SectionBody::Distinct {
                field: "offer_type".to_string(),
                cardinality: set.len() as u64,
            }),
    );

    report.push(
        "Top offer types",
        reporter
            .group_and_aggregate("offer_type", &Aggregation::by_count())
            .map(|groups| {
                SectionBody::Groups(reporter.top_n(&groups, options.top_n, RankBy::Count))
            }),
    );

    report.push(
        "Partners",
        reporter
            .group_and_aggregate(
                "partner",
                &Aggregation::by_count()
                    .with_distinct("categories", "category.path")
                    .with_distinct("offer_types", "offer_type"),
            )
            .map(SectionBody::Groups),
    );

    report
}

/// Volume ranking width in the categories summary.
const TOP_CATEGORIES_BY_VOLUME: usize = 3;

/// Categories collection summary: volume, level distribution, and the
/// heaviest categories by stored product volume.
pub fn categories_report(source: &dyn RecordSource, _options: &ReportOptions) -> Report {
    let reporter = StatsReporter::new(source);
    let mut report = Report::new("CATEGORIES SUMMARY");

    report.push("Total categories", reporter.count().map(SectionBody::Count));

    report.push(
        "Level distribution",
        reporter
            .group_and_aggregate("level", &Aggregation::by_key())
            .map(SectionBody::Groups),
    );

    // Buckets keyed by stored product volume, ranked by that volume; the
    // distinct name/path sets identify the categories at each volume.
    report.push(
        "Top categories by product volume",
        reporter
            .group_and_aggregate(
                "metadata.total_products",
                &Aggregation::by_key()
                    .with_distinct("names", "name")
                    .with_distinct("paths", "path"),
            )
            .map(|groups| {
                SectionBody::Groups(reporter.top_n(&groups, TOP_CATEGORIES_BY_VOLUME, RankBy::Key))
            }),
    );

    report
}

const PRODUCT_REQUIRED_FIELDS: &[&str] = &[
    "_id",
    "partner",
    "offer_id",
    "name",
    "type",
    "category",
    "created_at",
    "updated_at",
    "category.id",
    "category.name",
    "category.full_path",
    "category.breadcrumbs",
];

/// Products collection quick check: volume, top types, partner shares, and a
/// structural validation of one sample document.
pub fn products_report(source: &dyn RecordSource, options: &ReportOptions) -> Report {
    let reporter = StatsReporter::new(source);
    let mut report = Report::new("PRODUCTS QUICK CHECK");

    report.push("Total products", reporter.count().map(SectionBody::Count));

    report.push(
        "Top product types",
        reporter
            .group_and_aggregate("type", &Aggregation::by_count())
            .map(|groups| {
                SectionBody::Groups(reporter.top_n(&groups, options.top_n, RankBy::Count))
            }),
    );

    report.push(
        "Products per partner",
        reporter
            .group_and_aggregate("partner", &Aggregation::by_count())
            .map(SectionBody::Groups),
    );

    report.push(
        "Document structure",
        reporter
            .validate_structure(PRODUCT_REQUIRED_FIELDS)
            .map(SectionBody::Structure),
    );

    report
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod catalog_tests;

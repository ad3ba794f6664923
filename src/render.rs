//! Text rendering of reports
//!
//! Pure presentation over a computed `Report`: thousands-separated integers,
//! percentages at one or two decimal places, fixed-width columns, and label
//! truncation. Nothing here recomputes statistics.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use crate::record::GroupKey;
use crate::report::{Report, SectionBody};
use crate::stats::{DuplicateSummary, GroupStat, LevelStats, StructureCheck};

const RULE_WIDTH: usize = 70;

/// Width of group labels in tabular sections, ellipsis included.
pub const LABEL_WIDTH: usize = 50;

/// Render a report as padded console text.
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out, "{rule}").ok();
    writeln!(out, "{}", report.title).ok();
    writeln!(out, "{rule}").ok();

    for (index, section) in report.sections.iter().enumerate() {
        writeln!(out).ok();
        writeln!(out, "{}. {}:", index + 1, section.title).ok();
        match &section.body {
            SectionBody::Count(n) => {
                writeln!(out, "   {}", thousands(*n)).ok();
            }
            SectionBody::Distinct { field, cardinality } => {
                writeln!(
                    out,
                    "   {} distinct values of '{}'",
                    thousands(*cardinality),
                    field
                )
                .ok();
            }
            SectionBody::Groups(groups) => render_groups(&mut out, groups),
            SectionBody::Levels(stats) => render_levels(&mut out, stats),
            SectionBody::Duplicates(summary) => render_duplicates(&mut out, summary),
            SectionBody::Structure(check) => render_structure(&mut out, check),
            SectionBody::Failed { error } => {
                writeln!(out, "   section failed: {error}").ok();
            }
        }
    }

    out
}

fn render_groups(out: &mut String, groups: &[GroupStat]) {
    for (index, stat) in groups.iter().enumerate() {
        let label = truncate_label(&stat.key.to_string(), LABEL_WIDTH);
        writeln!(
            out,
            "   {}. {:<label_width$} {:>12}  {:.2}%",
            index + 1,
            label,
            thousands(stat.count),
            stat.percentage,
            label_width = LABEL_WIDTH,
        )
        .ok();
        for (name, values) in &stat.extra {
            writeln!(out, "      {}: {}", name, values.len()).ok();
        }
    }
}

fn render_levels(out: &mut String, stats: &LevelStats) {
    writeln!(
        out,
        "   max: {}, min: {}, average: {:.2}",
        stats.max, stats.min, stats.average
    )
    .ok();
    if stats.missing > 0 {
        writeln!(
            out,
            "   ({} records missing the field)",
            thousands(stats.missing)
        )
        .ok();
    }
    for stat in &stats.distribution {
        writeln!(
            out,
            "   level {}: {} ({:.1}%)",
            stat.key,
            thousands(stat.count),
            stat.percentage
        )
        .ok();
    }
}

fn render_duplicates(out: &mut String, summary: &DuplicateSummary) {
    if summary.is_empty() {
        writeln!(out, "   no duplicates found").ok();
        return;
    }
    writeln!(out, "   duplicate groups: {}", thousands(summary.total_groups)).ok();
    for (index, group) in summary.samples.iter().enumerate() {
        writeln!(
            out,
            "   {}. {}: {} occurrences",
            index + 1,
            group.key,
            group.count
        )
        .ok();
        if !group.aux_values.is_empty() {
            writeln!(out, "      values: {}", join_keys(&group.aux_values)).ok();
        }
    }
}

fn render_structure(out: &mut String, check: &StructureCheck) {
    match check {
        StructureCheck::NoSample => {
            writeln!(out, "   no sample record available").ok();
        }
        StructureCheck::Checked {
            fields,
            all_present,
        } => {
            for field in fields {
                let mark = if field.present { "ok" } else { "MISSING" };
                writeln!(out, "   {}: {}", field.path, mark).ok();
            }
            if *all_present {
                writeln!(out, "   all required fields present").ok();
            } else {
                writeln!(out, "   structure check failed").ok();
            }
        }
    }
}

fn join_keys(keys: &BTreeSet<GroupKey>) -> String {
    keys.iter()
        .map(|k| k.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Group integers into thousands with commas.
fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Cap a label at `max` characters, ellipsis included.
fn truncate_label(label: &str, max: usize) -> String {
    if label.chars().count() <= max {
        return label.to_string();
    }
    let kept: String = label.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatstatError;
    use crate::report::Report;
    use insta::assert_snapshot;
    use std::collections::BTreeMap;

    #[test]
    fn test_thousands_grouping() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_thousands_snapshot() {
        assert_snapshot!(thousands(9876543), @"9,876,543");
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("short", 50), "short");
        let long = "x".repeat(60);
        let truncated = truncate_label(&long, 50);
        assert_eq!(truncated.chars().count(), 50);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_truncate_label_snapshot() {
        assert_snapshot!(truncate_label("abcdefghij", 8), @"abcde...");
    }

    #[test]
    fn test_render_count_section() {
        let mut report = Report::new("demo");
        report.push("Total offers", Ok(SectionBody::Count(1234)));
        let rule = "=".repeat(70);
        let expected = format!("{rule}\ndemo\n{rule}\n\n1. Total offers:\n   1,234\n");
        assert_eq!(render_text(&report), expected);
    }

    #[test]
    fn test_render_groups_includes_extras_and_percentages() {
        let mut extra = BTreeMap::new();
        extra.insert(
            "categories".to_string(),
            BTreeSet::from([GroupKey::Str("Books".into()), GroupKey::Str("Toys".into())]),
        );
        let mut report = Report::new("demo");
        report.push(
            "Partners",
            Ok(SectionBody::Groups(vec![GroupStat {
                key: GroupKey::Str("acme".into()),
                count: 1500,
                percentage: 75.0,
                extra,
            }])),
        );
        let text = render_text(&report);
        assert!(text.contains("1. acme"));
        assert!(text.contains("1,500"));
        assert!(text.contains("75.00%"));
        assert!(text.contains("categories: 2"));
    }

    #[test]
    fn test_render_levels() {
        let mut report = Report::new("demo");
        report.push(
            "Category depth",
            Ok(SectionBody::Levels(LevelStats {
                max: 3.0,
                min: 1.0,
                average: 2.0,
                missing: 2,
                distribution: vec![GroupStat {
                    key: GroupKey::Int(1),
                    count: 1,
                    percentage: 25.0,
                    extra: BTreeMap::new(),
                }],
            })),
        );
        let text = render_text(&report);
        assert!(text.contains("max: 3, min: 1, average: 2.00"));
        assert!(text.contains("(2 records missing the field)"));
        assert!(text.contains("level 1: 1 (25.0%)"));
    }

    #[test]
    fn test_render_duplicates() {
        let mut report = Report::new("demo");
        report.push(
            "Duplicate offer ids",
            Ok(SectionBody::Duplicates(DuplicateSummary {
                total_groups: 2,
                samples: vec![crate::stats::DuplicateGroup {
                    key: GroupKey::Int(7),
                    count: 3,
                    aux_values: BTreeSet::from([
                        GroupKey::Str("seller1".into()),
                        GroupKey::Str("seller2".into()),
                    ]),
                }],
            })),
        );
        let text = render_text(&report);
        assert!(text.contains("duplicate groups: 2"));
        assert!(text.contains("1. 7: 3 occurrences"));
        assert!(text.contains("values: seller1, seller2"));
    }

    #[test]
    fn test_render_no_duplicates() {
        let mut report = Report::new("demo");
        report.push(
            "Duplicate offer ids",
            Ok(SectionBody::Duplicates(DuplicateSummary {
                total_groups: 0,
                samples: Vec::new(),
            })),
        );
        assert!(render_text(&report).contains("no duplicates found"));
    }

    #[test]
    fn test_render_structure() {
        let mut report = Report::new("demo");
        report.push(
            "Document structure",
            Ok(SectionBody::Structure(StructureCheck::Checked {
                fields: vec![
                    crate::stats::FieldCheck {
                        path: "partner".into(),
                        present: true,
                    },
                    crate::stats::FieldCheck {
                        path: "category.breadcrumbs".into(),
                        present: false,
                    },
                ],
                all_present: false,
            })),
        );
        let text = render_text(&report);
        assert!(text.contains("partner: ok"));
        assert!(text.contains("category.breadcrumbs: MISSING"));
        assert!(text.contains("structure check failed"));
    }

    #[test]
    fn test_render_failed_section() {
        let mut report = Report::new("demo");
        report.push("Broken", Err(CatstatError::EmptyInput));
        let text = render_text(&report);
        assert!(text.contains("section failed:"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut report = Report::new("demo");
        report.push("Total", Ok(SectionBody::Count(10)));
        assert_eq!(render_text(&report), render_text(&report));
    }
}

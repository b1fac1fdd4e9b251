//! Assemble the summary report from the stage outputs.

use crate::error::ExpandResult;
use crate::models::{MentionTable, MentionTotals, OverallAggregate, Report};

use super::aggregate::{aggregate_subjects, count_examinable, CategoryCounts, ExaminableCounts};
use super::expander::expand;
use super::scientists::{reduce_scientists, ScientistSummary};

/// Merge subject counts, examinable counts and unique scientists into a [`Report`].
///
/// `examinable` is `None` when the source table has no `Examinable` column;
/// the report then carries no `examinable` keys at all.
pub fn assemble(
    counts: &CategoryCounts,
    examinable: Option<ExaminableCounts>,
    scientists: ScientistSummary,
) -> Report {
    let overall = OverallAggregate {
        concept: MentionTotals::new(counts.totals.concept, examinable.map(|e| e.concept)),
        scientist: MentionTotals::new(counts.totals.scientist, examinable.map(|e| e.scientist)),
        unique: scientists.unique,
    };

    Report {
        subjects: counts.subjects,
        names: scientists.names,
        overall,
    }
}

/// A report together with the row counts behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltReport {
    pub report: Report,
    /// Rows after multi-valued cells were expanded
    pub expanded_rows: usize,
    /// Expanded rows whose subject is not a core subject
    pub excluded_rows: usize,
}

/// Run expansion, aggregation and reduction over a table and assemble the report.
pub fn build_report(table: &MentionTable) -> ExpandResult<BuiltReport> {
    let expanded = expand(table)?;

    let counts = aggregate_subjects(&expanded);
    let examinable = table.has_examinable.then(|| count_examinable(&expanded));
    let scientists = reduce_scientists(&expanded);

    Ok(BuiltReport {
        report: assemble(&counts, examinable, scientists),
        expanded_rows: expanded.len(),
        excluded_rows: counts.excluded,
    })
}

//! Expand multi-valued cells into one row per scientist.
//!
//! ```text
//! Name: "A;B"  Gender: "male;female"        Name: A  Gender: male
//! Nationality: "n1;n2"  Region: "r1;r2"  →  Name: B  Gender: female
//! ```
//!
//! The scientist name, gender, nationality, region and (when present)
//! examinable columns are zipped by position. Every one of them must
//! split into as many parts as the scientist name column.

use crate::error::{ExpandError, ExpandResult};
use crate::models::{columns, ExpandedRecord, MentionRecord, MentionTable};

/// Separator inside multi-valued cells.
pub const VALUE_SEPARATOR: char = ';';

/// Split a cell into its trimmed parts. A cell without separator yields one part.
pub fn split_cell(cell: &str) -> Vec<&str> {
    cell.split(VALUE_SEPARATOR).map(str::trim).collect()
}

fn check_len(
    record: &MentionRecord,
    column: &str,
    parts: &[&str],
    expected: usize,
) -> ExpandResult<()> {
    if parts.len() == expected {
        Ok(())
    } else {
        Err(ExpandError::LengthMismatch {
            line: record.line,
            column: column.to_string(),
            expected,
            found: parts.len(),
        })
    }
}

/// Expand one source row into `N` rows, `N` being the number of scientists on it.
pub fn expand_record(record: &MentionRecord) -> ExpandResult<Vec<ExpandedRecord>> {
    let names = split_cell(&record.scientists);
    let genders = split_cell(&record.genders);
    let nationalities = split_cell(&record.nationalities);
    let regions = split_cell(&record.regions);
    let examinable = record.examinable.as_deref().map(split_cell);

    let n = names.len();
    check_len(record, columns::GENDER, &genders, n)?;
    check_len(record, columns::NATIONALITY, &nationalities, n)?;
    check_len(record, columns::REGION, &regions, n)?;
    if let Some(parts) = &examinable {
        check_len(record, columns::EXAMINABLE, parts, n)?;
    }

    let rows = (0..n)
        .map(|i| ExpandedRecord {
            subject: record.subject.clone(),
            mention: record.mention.clone(),
            scientist: names[i].to_string(),
            gender: genders[i].to_string(),
            mention_type: record.mention_type.clone(),
            nationality: nationalities[i].to_string(),
            region: regions[i].to_string(),
            examinable: examinable.as_ref().map(|parts| parts[i].to_string()),
        })
        .collect();

    Ok(rows)
}

/// Expand every row of the table. Stops at the first malformed row.
pub fn expand(table: &MentionTable) -> ExpandResult<Vec<ExpandedRecord>> {
    let mut expanded = Vec::with_capacity(table.records.len());
    for record in &table.records {
        expanded.extend(expand_record(record)?);
    }
    Ok(expanded)
}

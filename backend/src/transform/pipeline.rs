//! High-level pipeline API: CSV file in, summary report out.
//!
//! # Example
//!
//! ```rust,ignore
//! use mention_stats::{summarize_csv, write_report, SummaryOptions};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let input = Path::new("curriculum.csv");
//!     let result = summarize_csv(input, &SummaryOptions::default())?;
//!     write_report(&result.report, &result.output_path)?;
//!     println!("{} unique scientists", result.report.names.len());
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PipelineResult;
use crate::logs::{log_info, log_info_indent, log_success, log_warning};
use crate::models::{MentionTable, Report};
use crate::parser::{mention_table, parse_bytes, ParseResult};
use crate::validation::check_report;

use super::report::build_report;

/// Suffix appended to the input stem to name the report.
pub const REPORT_SUFFIX: &str = "_SummaryStats.json";

/// Environment variable overriding the input encoding.
pub const ENV_ENCODING: &str = "MENTION_STATS_ENCODING";
/// Environment variable overriding the outer delimiter.
pub const ENV_DELIMITER: &str = "MENTION_STATS_DELIMITER";
/// Environment variable setting where reports are written.
pub const ENV_OUTPUT_DIR: &str = "MENTION_STATS_OUTPUT_DIR";

/// Options for the summary pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryOptions {
    /// Encoding label; auto-detected when `None`
    pub encoding: Option<String>,

    /// Outer CSV delimiter; auto-detected when `None`
    pub delimiter: Option<char>,

    /// Directory for the report; defaults to the input's directory
    pub output_dir: Option<PathBuf>,

    /// Skip schema validation of the assembled report
    pub skip_validation: bool,
}

impl SummaryOptions {
    /// Options from `MENTION_STATS_*` environment variables.
    ///
    /// Empty values are ignored, as is a delimiter longer than one character.
    pub fn from_env() -> Self {
        let var = |name: &str| {
            std::env::var(name)
                .ok()
                .filter(|v| !v.trim().is_empty())
        };

        let delimiter = var(ENV_DELIMITER).and_then(|v| {
            let v = if v == "\\t" { "\t".to_string() } else { v };
            let mut chars = v.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(c),
                _ => None,
            }
        });

        Self {
            encoding: var(ENV_ENCODING),
            delimiter,
            output_dir: var(ENV_OUTPUT_DIR).map(PathBuf::from),
            skip_validation: false,
        }
    }
}

/// Input table information
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CsvInfo {
    pub encoding: String,
    pub delimiter: char,
    pub headers: Vec<String>,
    pub row_count: usize,
    pub has_examinable: bool,
}

/// Result of a pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct SummaryResult {
    pub report: Report,

    /// Where the report belongs (not written by the pipeline itself)
    pub output_path: PathBuf,

    pub csv_info: CsvInfo,

    /// Rows after multi-valued cells were expanded
    pub expanded_rows: usize,

    /// Expanded rows whose subject is not a core subject
    pub excluded_rows: usize,
}

/// Report path for `input`: `<dir>/<stem>_SummaryStats.json`.
///
/// `dir` is `output_dir` when given, the input's own directory otherwise.
pub fn report_path(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report".to_string());

    let dir = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
    };

    dir.join(format!("{}{}", stem, REPORT_SUFFIX))
}

/// Summarize a CSV file.
///
/// 1. Reads the file, detecting encoding and delimiter
/// 2. Maps columns onto mention records
/// 3. Expands multi-valued cells
/// 4. Aggregates subjects, examinable counts and unique scientists
/// 5. Assembles and validates the report
pub fn summarize_csv(path: &Path, options: &SummaryOptions) -> PipelineResult<SummaryResult> {
    log_info(format!("📖 Reading {}", path.display()));
    let bytes = fs::read(path)?;

    let mut result = summarize_bytes(&bytes, options)?;
    result.output_path = report_path(path, options.output_dir.as_deref());
    Ok(result)
}

/// Summarize CSV bytes.
///
/// The returned `output_path` is derived from a placeholder name `report`.
pub fn summarize_bytes(
    bytes: &[u8],
    options: &SummaryOptions,
) -> PipelineResult<SummaryResult> {
    let parsed = parse_bytes(bytes, options.encoding.as_deref(), options.delimiter)?;
    log_success(format!("Encoding: {}", parsed.encoding));
    log_success(format!("Separator: '{}'", format_delimiter(parsed.delimiter)));
    log_success(format!("Read {} rows", parsed.rows.len()));

    let table = mention_table(&parsed)?;
    let csv_info = csv_info(&parsed, &table);
    if !table.has_examinable {
        log_info_indent("No Examinable column, examinable counts omitted", 1);
    }

    summarize_table(&table, options, csv_info)
}

fn csv_info(parsed: &ParseResult, table: &MentionTable) -> CsvInfo {
    CsvInfo {
        encoding: parsed.encoding.clone(),
        delimiter: parsed.delimiter,
        headers: parsed.headers.clone(),
        row_count: parsed.rows.len(),
        has_examinable: table.has_examinable,
    }
}

fn summarize_table(
    table: &MentionTable,
    options: &SummaryOptions,
    csv_info: CsvInfo,
) -> PipelineResult<SummaryResult> {
    log_info("⚙️  Expanding and aggregating...");
    let built = build_report(table)?;
    log_success(format!(
        "{} rows → {} mentions",
        table.records.len(),
        built.expanded_rows
    ));

    if built.excluded_rows > 0 {
        log_warning(format!(
            "{} mention(s) outside physics/chemistry/biology/environment \
             left out of subject totals",
            built.excluded_rows
        ));
    }
    log_success(format!("{} unique scientists", built.report.names.len()));

    if options.skip_validation {
        log_info("Schema validation skipped");
    } else {
        check_report(&built.report)?;
        log_success("Report matches schema");
    }

    Ok(SummaryResult {
        report: built.report,
        output_path: report_path(Path::new("report"), options.output_dir.as_deref()),
        csv_info,
        expanded_rows: built.expanded_rows,
        excluded_rows: built.excluded_rows,
    })
}

/// Pretty JSON with 4-space indentation.
pub fn to_pretty_json(report: &Report) -> PipelineResult<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    report.serialize(&mut serializer)?;
    // serde_json only ever writes UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write the report as pretty JSON, creating parent directories as needed.
pub fn write_report(report: &Report, path: &Path) -> PipelineResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, to_pretty_json(report)?)?;
    log_success(format!("💾 Report written to {}", path.display()));
    Ok(())
}

/// Printable form of a delimiter (`\t` for tab).
pub fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}

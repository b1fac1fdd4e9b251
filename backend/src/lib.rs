//! # mention-stats - Curriculum mention summaries
//!
//! Reads a table of curriculum mentions (concepts and scientists per core
//! subject) and produces a JSON summary: gender breakdowns per subject,
//! one record per unique scientist, and overall totals with a regional
//! distribution.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   CSV File  │────▶│   Parser    │────▶│  Transform  │────▶│ Report JSON │
//! │ (Latin-1/8) │     │  (auto-enc) │     │ (expand+agg)│     │ (validated) │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mention_stats::{summarize_csv, SummaryOptions};
//! use std::path::Path;
//!
//! let result = summarize_csv(Path::new("curriculum.csv"), &SummaryOptions::default()).unwrap();
//! println!("{} unique scientists", result.report.names.len());
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`models`] - Records, aggregates and the report
//! - [`parser`] - CSV reading with auto-detection
//! - [`transform`] - Expansion, aggregation and the pipeline
//! - [`validation`] - Report schema validation
//! - [`logs`] - Progress logging

// Core modules
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Transformation
pub mod transform;

// Validation
pub mod validation;

// Logging
pub mod logs;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{CsvError, ExpandError, PipelineError, ValidationError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    ExpandedRecord,
    GenderBucket,
    GenderCount,
    MentionKind,
    MentionRecord,
    MentionTable,
    MentionTotals,
    OverallAggregate,
    Report,
    ScientistAggregate,
    ScientistIndex,
    Subject,
    SubjectAggregate,
    SubjectBreakdown,
    UniqueTotals,
};

// =============================================================================
// Re-exports - CSV Parsing
// =============================================================================

pub use parser::{
    decode_content,
    detect_delimiter,
    detect_encoding,
    mention_table,
    parse_bytes,
    parse_str,
    ParseResult,
    RawRow,
};

// =============================================================================
// Re-exports - Transform stages
// =============================================================================

pub use transform::{
    aggregate_subjects,
    assemble,
    build_report,
    count_examinable,
    expand,
    expand_record,
    reduce_scientists,
    BuiltReport,
    CategoryCounts,
    ExaminableCounts,
    ScientistSummary,
};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use transform::pipeline::{
    format_delimiter,
    report_path,
    summarize_bytes,
    summarize_csv,
    to_pretty_json,
    write_report,
    CsvInfo,
    SummaryOptions,
    SummaryResult,
};

// =============================================================================
// Re-exports - Validation
// =============================================================================

pub use validation::{
    check_report,
    validate_summary_report,
    SUMMARY_REPORT_SCHEMA,
};

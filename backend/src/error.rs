//! Error types for the mention summary pipeline.
//!
//! - [`CsvError`] - reading, decoding and column mapping of the input table
//! - [`ExpandError`] - splitting multi-valued cells into atomic rows
//! - [`ValidationError`] - report schema validation
//! - [`PipelineError`] - top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// CSV Errors
// =============================================================================

/// Errors while reading the input table.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Unknown or unsupported encoding label.
    #[error("Unsupported encoding: {0}")]
    Encoding(String),

    /// Delimiter must be a single ASCII character.
    #[error("Invalid delimiter '{0}': must be a single ASCII character")]
    InvalidDelimiter(char),

    /// Invalid CSV format.
    #[error("Invalid CSV format: {0}")]
    Parse(#[from] csv::Error),

    /// No header line.
    #[error("CSV file is empty")]
    EmptyFile,

    /// A required column is absent from the header.
    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

// =============================================================================
// Expansion Errors
// =============================================================================

/// Errors while expanding multi-valued cells.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExpandError {
    /// A multi-valued column split into a different number of parts
    /// than the scientist name column on the same row.
    #[error(
        "Line {line}: column '{column}' has {found} value(s), expected {expected} to match 'Name of Scientist'"
    )]
    LengthMismatch {
        line: usize,
        column: String,
        expected: usize,
        found: usize,
    },
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors from report schema validation.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Schema validation failed.
    #[error("Report does not match schema: {errors:?}")]
    SchemaError { errors: Vec<String> },
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline errors.
///
/// This is the error type returned by [`crate::transform::pipeline::summarize_csv`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// CSV reading error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Row expansion error.
    #[error("Expansion error: {0}")]
    Expand(#[from] ExpandError),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Writing the report failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Report serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for expansion.
pub type ExpandResult<T> = Result<T, ExpandError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

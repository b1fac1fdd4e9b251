//! JSON Schema validation for summary reports.
//!
//! The report schema (Draft 7) is embedded at compile time from
//! `schemas/summary-report.json`. It pins the `subjects` / `names` /
//! `overall` layout downstream consumers read, including the optional
//! `examinable` counts.
//!
//! # Example
//!
//! ```rust,ignore
//! use serde_json::json;
//! use mention_stats::validate_summary_report;
//!
//! let report = json!({ "subjects": {}, "names": {}, "overall": {} });
//! assert!(validate_summary_report(&report).is_err());
//! ```

use serde_json::Value;

use crate::error::ValidationError;
use crate::models::Report;

/// The embedded report schema, as text.
pub const SUMMARY_REPORT_SCHEMA: &str = include_str!("../../schemas/summary-report.json");

/// Validate a JSON value against a JSON schema.
///
/// Returns every validation error message on failure.
pub fn validate(schema: &Value, data: &Value) -> Result<(), Vec<String>> {
    let validator = jsonschema::draft7::new(schema)
        .map_err(|e| vec![format!("Invalid schema: {}", e)])?;

    let errors: Vec<String> = validator
        .iter_errors(data)
        .map(|e| e.to_string())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn summary_schema() -> Result<Value, Vec<String>> {
    serde_json::from_str(SUMMARY_REPORT_SCHEMA)
        .map_err(|e| vec![format!("Invalid embedded schema: {}", e)])
}

/// Validate a report document (e.g. a previously written `_SummaryStats.json`).
pub fn validate_summary_report(data: &Value) -> Result<(), Vec<String>> {
    validate(&summary_schema()?, data)
}

/// Serialize an assembled report and validate it.
pub fn check_report(report: &Report) -> Result<(), ValidationError> {
    let value = serde_json::to_value(report).map_err(|e| ValidationError::SchemaError {
        errors: vec![e.to_string()],
    })?;

    validate_summary_report(&value).map_err(|errors| ValidationError::SchemaError { errors })
}

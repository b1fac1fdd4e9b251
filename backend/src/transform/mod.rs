//! Transformation module.
//!
//! Expanded rows flow through three reducers into one report:
//! - Expander: multi-valued cells to one row per scientist
//! - Aggregate: gender by mention type, per subject
//! - Scientists: unique scientists, gender split, regions
//! - Report: assembly
//! - Pipeline: file in, report out

pub mod aggregate;
pub mod expander;
pub mod pipeline;
pub mod report;
pub mod scientists;

pub use aggregate::{aggregate_subjects, count_examinable, CategoryCounts, ExaminableCounts};
pub use expander::{expand, expand_record, split_cell, VALUE_SEPARATOR};
pub use pipeline::*;
pub use report::{assemble, build_report, BuiltReport};
pub use scientists::{reduce_scientists, ScientistSummary};

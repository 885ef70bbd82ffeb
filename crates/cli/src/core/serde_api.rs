//! # jcmp JSON API
//!
//! Maps engine errors and failed comparisons onto the shared
//! [`StdError`] envelope.

use serde_json::{json, Value};

use super::errors::{CompareError, ErrorCategory};
use super::formats::CompareReport;
pub use jcmp_common::{StdError, StdResponse};

pub const MISMATCH_CODE: &str = "E_MISMATCH";

pub fn std_error_from_compare_error(error: &CompareError) -> StdError {
    let hints = error.recovery_hints();
    let mut std_error = StdError::new(error.error_code(), error.to_string())
        .with_actionable(error.is_recoverable())
        .with_details(error_details(error));
    if let Some(first) = hints.into_iter().next() {
        std_error = std_error.with_hint(first);
    }
    std_error
}

/// The error attached to a response whose comparison ran but failed.
pub fn mismatch_error(report: &CompareReport) -> StdError {
    let first = report
        .entries
        .first()
        .map(|e| e.to_string().replace('\n', " "))
        .unwrap_or_default();
    StdError::new(
        MISMATCH_CODE,
        format!("{} difference(s) found", report.entry_count),
    )
    .with_hint(first)
    .with_actionable(true)
}

fn error_details(error: &CompareError) -> Value {
    let category = match error.category() {
        ErrorCategory::Validation => "validation",
        ErrorCategory::Configuration => "configuration",
        ErrorCategory::System => "system",
    };
    let mut details = json!({ "category": category });
    match error {
        CompareError::Parse { side, source } => {
            details["side"] = json!(side);
            details["line"] = json!(source.line());
            details["column"] = json!(source.column());
        }
        CompareError::Io {
            operation, path, ..
        } => {
            details["operation"] = json!(operation);
            if let Some(p) = path {
                details["path"] = json!(p.display().to_string());
            }
        }
        CompareError::Malformed { path, .. } => {
            details["path"] = json!(path);
        }
        CompareError::Config { field, value, .. } => {
            details["field"] = json!(field);
            details["value"] = json!(value);
        }
        CompareError::UnknownMode { supported, .. }
        | CompareError::UnknownComparator { supported, .. } => {
            details["supported"] = json!(supported);
        }
    }
    details
}

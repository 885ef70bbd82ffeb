//! # jcmp Core Engine
//!
//! Structural comparison of JSON documents.
//!
//! ## Architecture
//!
//! - **Comparators**: [`JsonComparator`] implementations deciding how values,
//!   objects and arrays are compared ([`DefaultComparator`],
//!   [`SubsetArrayComparator`], [`ArraySizeComparator`])
//! - **Result**: [`ComparisonResult`] collects every mismatch with its path
//! - **Engine**: [`CompareEngine`] reads inputs, builds the configured
//!   comparator and summarizes the outcome
//!
//! Mismatches are data, not errors: only unreadable or unparsable inputs and
//! bad configuration surface as [`CompareError`].

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};

pub mod array_size;
pub mod comparator;
pub mod config;
pub mod errors;
pub mod formats;
pub mod matching;
pub mod mode;
pub mod result;
pub mod serde_api;
pub mod subset;
pub mod util;

pub use array_size::ArraySizeComparator;
pub use comparator::{DefaultComparator, JsonComparator};
pub use config::{ComparatorKind, CompareConfig};
pub use errors::{CompareError, CompareResult, ErrorCategory};
pub use formats::{CompareReport, OutputFormat};
pub use mode::CompareMode;
pub use result::{ComparisonResult, FailureKind, FieldFailure};
pub use subset::SubsetArrayComparator;

/// Compares two documents with `comparator`.
pub fn compare_json(
    expected: &Value,
    actual: &Value,
    comparator: &dyn JsonComparator,
) -> ComparisonResult {
    let mut result = ComparisonResult::new();
    comparator.compare_values("", expected, actual, &mut result);
    result
}

/// Parses both sides, then compares them. Invalid JSON is an error.
pub fn compare_json_str(
    expected: &str,
    actual: &str,
    comparator: &dyn JsonComparator,
) -> CompareResult<ComparisonResult> {
    let expected = parse_side("expected", expected)?;
    let actual = parse_side("actual", actual)?;
    Ok(compare_json(&expected, &actual, comparator))
}

fn parse_side(side: &str, text: &str) -> CompareResult<Value> {
    serde_json::from_str(text).map_err(|source| CompareError::parse(side, source))
}

/// Runs comparisons according to a [`CompareConfig`].
pub struct CompareEngine {
    config: CompareConfig,
    comparator: Box<dyn JsonComparator>,
}

impl CompareEngine {
    pub fn new(config: CompareConfig) -> Self {
        let comparator = build_comparator(&config);
        debug!(
            comparator = comparator.name(),
            mode = %config.mode,
            "compare engine ready"
        );
        Self { config, comparator }
    }

    pub fn config(&self) -> &CompareConfig {
        &self.config
    }

    pub fn comparator(&self) -> &dyn JsonComparator {
        self.comparator.as_ref()
    }

    pub fn compare_values(&self, expected: &Value, actual: &Value) -> ComparisonResult {
        let result = compare_json(expected, actual, self.comparator());
        info!(
            comparator = self.comparator.name(),
            passed = result.passed(),
            differences = result.len(),
            "comparison finished"
        );
        result
    }

    pub fn compare_str(&self, expected: &str, actual: &str) -> CompareResult<ComparisonResult> {
        let expected = parse_side("expected", expected)?;
        let actual = parse_side("actual", actual)?;
        Ok(self.compare_values(&expected, &actual))
    }

    pub fn compare_files(&self, expected: &Path, actual: &Path) -> CompareResult<ComparisonResult> {
        let expected_text = fs::read_to_string(expected)
            .map_err(|source| CompareError::io(expected.to_path_buf(), "read expected", source))?;
        let actual_text = fs::read_to_string(actual)
            .map_err(|source| CompareError::io(actual.to_path_buf(), "read actual", source))?;
        debug!(
            expected = %expected.display(),
            actual = %actual.display(),
            "comparing files"
        );
        self.compare_str(&expected_text, &actual_text)
    }

    /// Summary of `result` honoring the output settings.
    pub fn report(&self, result: &ComparisonResult) -> CompareReport {
        CompareReport::from_result(
            result,
            self.config.mode,
            self.config.comparator,
            self.config.output.max_entries,
        )
    }
}

fn build_comparator(config: &CompareConfig) -> Box<dyn JsonComparator> {
    let threshold = config.matching.warn_threshold;
    match config.comparator {
        ComparatorKind::Default => {
            Box::new(DefaultComparator::new(config.mode).with_warn_threshold(threshold))
        }
        ComparatorKind::Subset => {
            Box::new(SubsetArrayComparator::new(config.mode).with_warn_threshold(threshold))
        }
        ComparatorKind::ArraySize => Box::new(ArraySizeComparator::new(config.mode)),
    }
}

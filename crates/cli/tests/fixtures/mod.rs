//! # Test fixtures
//!
//! Metadata-style documents shaped like a project-generator service
//! response: capability sections holding arrays of records keyed by `id`.

use jcmp_cli::{compare_json, ComparisonResult, JsonComparator};
use serde_json::{json, Value};

mod metadata;

pub use metadata::*;

/// Compares and returns the result.
pub fn check(cmp: &dyn JsonComparator, expected: &Value, actual: &Value) -> ComparisonResult {
    compare_json(expected, actual, cmp)
}

/// Asserts a pass, printing every entry otherwise.
pub fn assert_passes(cmp: &dyn JsonComparator, expected: &Value, actual: &Value) {
    let result = check(cmp, expected, actual);
    assert!(result.passed(), "expected a pass, got:\n{}", result);
}

/// Builds `[{"id": <id>, "v": <v>}, ...]`.
pub fn records(pairs: &[(i64, &str)]) -> Value {
    Value::Array(
        pairs
            .iter()
            .map(|(id, v)| json!({"id": id, "v": v}))
            .collect(),
    )
}

/// Returns `value` with its top-level array reversed.
pub fn reversed(value: &Value) -> Value {
    let mut items = value.as_array().cloned().unwrap_or_default();
    items.reverse();
    Value::Array(items)
}

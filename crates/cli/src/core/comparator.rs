//! # Structural JSON comparison
//!
//! [`JsonComparator`] is the seam every comparison strategy plugs into. Its
//! three comparison methods recurse through `&self`, so a comparator that
//! overrides only [`JsonComparator::compare_array`] still sees its override
//! applied to arrays nested at any depth inside objects.
//!
//! The default behaviors are exposed as free functions (`compare_*_default`,
//! [`compare_array_by_matching`], ...) so overriding comparators can reuse
//! individual strategies.

use serde_json::{Map, Value};
use tracing::{debug, trace, warn};

use super::matching::maximum_matching;
use super::mode::CompareMode;
use super::result::{render, ComparisonResult, FailureKind};
use super::util::{
    array_of_objects_to_map, classify, find_unique_key, format_unique_key,
    is_usable_as_unique_key, json_type_name, qualify, Cardinality, ElementShape, SimpleKey,
};

/// Element counts above which the matching fallback logs a warning.
pub const DEFAULT_MATCHING_WARN_THRESHOLD: usize = 64;

pub trait JsonComparator: Send + Sync {
    /// Mode governing object extensibility and array ordering.
    fn mode(&self) -> CompareMode;

    /// Short name used in logs and reports.
    fn name(&self) -> &'static str;

    fn matching_warn_threshold(&self) -> usize {
        DEFAULT_MATCHING_WARN_THRESHOLD
    }

    fn compare_values(
        &self,
        prefix: &str,
        expected: &Value,
        actual: &Value,
        result: &mut ComparisonResult,
    ) {
        compare_values_default(self, prefix, expected, actual, result)
    }

    fn compare_object(
        &self,
        prefix: &str,
        expected: &Map<String, Value>,
        actual: &Map<String, Value>,
        result: &mut ComparisonResult,
    ) {
        compare_object_default(self, prefix, expected, actual, result)
    }

    fn compare_array(
        &self,
        prefix: &str,
        expected: &[Value],
        actual: &[Value],
        result: &mut ComparisonResult,
    ) {
        compare_array_default(self, prefix, expected, actual, result)
    }
}

/// Full structural equality under a [`CompareMode`].
#[derive(Debug, Clone)]
pub struct DefaultComparator {
    mode: CompareMode,
    warn_threshold: usize,
}

impl DefaultComparator {
    pub fn new(mode: CompareMode) -> Self {
        Self {
            mode,
            warn_threshold: DEFAULT_MATCHING_WARN_THRESHOLD,
        }
    }

    pub fn with_warn_threshold(mut self, threshold: usize) -> Self {
        self.warn_threshold = threshold;
        self
    }
}

impl Default for DefaultComparator {
    fn default() -> Self {
        Self::new(CompareMode::default())
    }
}

impl JsonComparator for DefaultComparator {
    fn mode(&self) -> CompareMode {
        self.mode
    }

    fn name(&self) -> &'static str {
        "default"
    }

    fn matching_warn_threshold(&self) -> usize {
        self.warn_threshold
    }
}

pub fn compare_values_default<C: JsonComparator + ?Sized>(
    cmp: &C,
    prefix: &str,
    expected: &Value,
    actual: &Value,
    result: &mut ComparisonResult,
) {
    match (expected, actual) {
        (Value::Number(e), Value::Number(a)) => {
            if SimpleKey::from_number(e) != SimpleKey::from_number(a) {
                result.fail_values(prefix, FailureKind::ValueMismatch, expected, actual);
            }
        }
        (Value::Object(e), Value::Object(a)) => cmp.compare_object(prefix, e, a, result),
        (Value::Array(e), Value::Array(a)) => cmp.compare_array(prefix, e, a, result),
        (e, a) if json_type_name(e) != json_type_name(a) => {
            result.fail(
                prefix,
                FailureKind::TypeMismatch,
                format!(
                    "Expected {} but got {} ({})",
                    json_type_name(e),
                    json_type_name(a),
                    render(a)
                ),
            );
        }
        (e, a) => {
            if e != a {
                result.fail_values(prefix, FailureKind::ValueMismatch, e, a);
            }
        }
    }
}

pub fn compare_object_default<C: JsonComparator + ?Sized>(
    cmp: &C,
    prefix: &str,
    expected: &Map<String, Value>,
    actual: &Map<String, Value>,
    result: &mut ComparisonResult,
) {
    for (key, expected_value) in expected {
        let path = qualify(prefix, key);
        match actual.get(key) {
            Some(actual_value) => cmp.compare_values(&path, expected_value, actual_value, result),
            None => result.missing(path, expected_value),
        }
    }
    if !cmp.mode().is_extensible() {
        for (key, actual_value) in actual {
            if !expected.contains_key(key) {
                result.unexpected(qualify(prefix, key), actual_value);
            }
        }
    }
}

pub fn compare_array_default<C: JsonComparator + ?Sized>(
    cmp: &C,
    prefix: &str,
    expected: &[Value],
    actual: &[Value],
    result: &mut ComparisonResult,
) {
    if expected.len() != actual.len() {
        result.fail(
            format!("{}[]", prefix),
            FailureKind::SizeMismatch,
            format!(
                "Expected {} values but got {}",
                expected.len(),
                actual.len()
            ),
        );
        return;
    }
    if expected.is_empty() {
        return;
    }

    if cmp.mode().has_strict_order() {
        compare_array_strict_order(cmp, prefix, expected, actual, result);
        return;
    }
    match classify(expected) {
        ElementShape::Empty => {}
        ElementShape::Simple => compare_array_of_simple_values(prefix, expected, actual, result),
        ElementShape::Objects => compare_array_of_objects(cmp, prefix, expected, actual, result),
        ElementShape::Mixed => {
            let candidates: Vec<&Value> = actual.iter().collect();
            compare_array_by_matching(cmp, prefix, expected, &candidates, result);
        }
    }
}

/// Position-by-position comparison, paths `prefix[i]`.
pub fn compare_array_strict_order<C: JsonComparator + ?Sized>(
    cmp: &C,
    prefix: &str,
    expected: &[Value],
    actual: &[Value],
    result: &mut ComparisonResult,
) {
    for (i, (e, a)) in expected.iter().zip(actual).enumerate() {
        cmp.compare_values(&format!("{}[{}]", prefix, i), e, a, result);
    }
}

/// Multiset equality of primitives: same values, same occurrence counts.
pub fn compare_array_of_simple_values(
    prefix: &str,
    expected: &[Value],
    actual: &[Value],
    result: &mut ComparisonResult,
) {
    let path = format!("{}[]", prefix);
    let expected_card = Cardinality::of(expected);
    let actual_card = Cardinality::of(actual);

    for (key, value, expected_count) in expected_card.iter() {
        let actual_count = actual_card.count(key);
        if actual_count == 0 {
            result.missing(path.clone(), value);
        } else if actual_count != expected_count {
            result.fail(
                path.clone(),
                FailureKind::Cardinality,
                format!(
                    "Expected {} occurrence(s) of {} but got {} occurrence(s)",
                    expected_count,
                    render(value),
                    actual_count
                ),
            );
        }
    }
    for (key, value, _) in actual_card.iter() {
        if expected_card.count(key) == 0 {
            result.unexpected(path.clone(), value);
        }
    }
}

/// Correlates records by a key unique in `expected` and usable in `actual`;
/// falls back to matching when there is none.
pub fn compare_array_of_objects<C: JsonComparator + ?Sized>(
    cmp: &C,
    prefix: &str,
    expected: &[Value],
    actual: &[Value],
    result: &mut ComparisonResult,
) {
    let key = match find_unique_key(expected) {
        Some(key) if is_usable_as_unique_key(&key, actual) => key,
        _ => {
            debug!(prefix, "no shared unique key, matching records pairwise");
            let candidates: Vec<&Value> = actual.iter().collect();
            compare_array_by_matching(cmp, prefix, expected, &candidates, result);
            return;
        }
    };
    debug!(prefix, key = %key, "correlating records by unique key");

    let (expected_index, actual_index) = match (
        array_of_objects_to_map(prefix, expected, &key),
        array_of_objects_to_map(prefix, actual, &key),
    ) {
        (Ok(e), Ok(a)) => (e, a),
        (Err(err), _) | (_, Err(err)) => {
            result.fail(
                format!("{}[]", prefix),
                FailureKind::NoUniqueKey,
                err.to_string(),
            );
            return;
        }
    };

    for (id, expected_obj) in expected_index.iter() {
        let path = format_unique_key(prefix, &key, &expected_obj[key.as_str()]);
        match actual_index.get(id) {
            Some(actual_obj) => cmp.compare_values(&path, expected_obj, actual_obj, result),
            None => result.missing(path, expected_obj),
        }
    }
    for (id, actual_obj) in actual_index.iter() {
        if !expected_index.contains(id) {
            let path = format_unique_key(prefix, &key, &actual_obj[key.as_str()]);
            result.unexpected(path, actual_obj);
        }
    }
}

/// Matches every expected element to a distinct candidate that compares
/// equal under `cmp`. Unmatched expected elements are reported as
/// [`FailureKind::NoMatch`] at `prefix[i]`; unmatched candidates are not
/// reported.
pub fn compare_array_by_matching<C: JsonComparator + ?Sized>(
    cmp: &C,
    prefix: &str,
    expected: &[Value],
    candidates: &[&Value],
    result: &mut ComparisonResult,
) {
    let threshold = cmp.matching_warn_threshold();
    if expected.len() > threshold || candidates.len() > threshold {
        warn!(
            prefix,
            expected = expected.len(),
            actual = candidates.len(),
            "matching large arrays element by element"
        );
    }

    let matching = maximum_matching(expected.len(), candidates.len(), |i, j| {
        passes(cmp, &expected[i], candidates[j])
    });
    trace!(prefix, matched = matching.size(), "matching finished");

    for i in matching.unmatched_left() {
        result.fail(
            format!("{}[{}]", prefix, i),
            FailureKind::NoMatch,
            format!(
                "Could not find match for element {}",
                compact(&expected[i])
            ),
        );
    }
}

/// Runs `cmp` on a scratch result.
pub fn passes<C: JsonComparator + ?Sized>(cmp: &C, expected: &Value, actual: &Value) -> bool {
    let mut scratch = ComparisonResult::new();
    cmp.compare_values("", expected, actual, &mut scratch);
    scratch.passed()
}

pub(crate) fn compact(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| render(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(mode: CompareMode, expected: Value, actual: Value) -> ComparisonResult {
        let cmp = DefaultComparator::new(mode);
        let mut result = ComparisonResult::new();
        cmp.compare_values("", &expected, &actual, &mut result);
        result
    }

    #[test]
    fn numbers_compare_numerically() {
        assert!(run(CompareMode::Strict, json!({"n": 1}), json!({"n": 1.0})).passed());
        let r = run(CompareMode::Strict, json!({"n": 1}), json!({"n": 2}));
        assert_eq!(r.failures()[0].field, "n");
        assert_eq!(r.failures()[0].kind, FailureKind::ValueMismatch);
    }

    #[test]
    fn type_mismatch_names_both_types() {
        let r = run(CompareMode::Lenient, json!({"n": "1"}), json!({"n": 1}));
        assert_eq!(r.failures()[0].kind, FailureKind::TypeMismatch);
        assert_eq!(r.failures()[0].message, "Expected string but got number (1)");
    }

    #[test]
    fn extensibility_follows_mode() {
        let expected = json!({"a": 1});
        let actual = json!({"a": 1, "b": 2});
        assert!(run(CompareMode::Lenient, expected.clone(), actual.clone()).passed());
        let r = run(CompareMode::NonExtensible, expected, actual);
        assert_eq!(r.unexpected_fields()[0].field, "b");
    }

    #[test]
    fn missing_field_is_reported_with_path() {
        let r = run(
            CompareMode::Lenient,
            json!({"a": {"b": 1, "c": 2}}),
            json!({"a": {"b": 1}}),
        );
        assert_eq!(r.missing_fields()[0].field, "a.c");
    }

    #[test]
    fn strict_order_compares_positions() {
        let r = run(CompareMode::Strict, json!([1, 2]), json!([2, 1]));
        let fields: Vec<_> = r.failures().iter().map(|f| f.field.as_str()).collect();
        assert_eq!(fields, vec!["[0]", "[1]"]);
        assert!(run(CompareMode::Lenient, json!([1, 2]), json!([2, 1])).passed());
    }

    #[test]
    fn length_mismatch_short_circuits() {
        let r = run(CompareMode::Lenient, json!([1, 2]), json!([1, 2, 3]));
        assert_eq!(r.len(), 1);
        assert_eq!(r.failures()[0].field, "[]");
        assert_eq!(r.failures()[0].message, "Expected 2 values but got 3");
    }

    #[test]
    fn simple_values_enforce_cardinality() {
        let r = run(CompareMode::Lenient, json!(["a", "a", "b"]), json!(["a", "b", "b"]));
        assert!(r.has_kind(FailureKind::Cardinality));
        assert_eq!(r.failures().len(), 2);

        let r = run(CompareMode::Lenient, json!(["a", "c"]), json!(["a", "d"]));
        assert_eq!(r.missing_fields()[0].expected, Some(json!("c")));
        assert_eq!(r.unexpected_fields()[0].actual, Some(json!("d")));
    }

    #[test]
    fn records_correlate_by_unique_key() {
        let r = run(
            CompareMode::Lenient,
            json!([{"id": 1, "v": "a"}, {"id": 2, "v": "b"}]),
            json!([{"id": 2, "v": "b"}, {"id": 1, "v": "x"}]),
        );
        assert_eq!(r.len(), 1);
        assert_eq!(r.failures()[0].field, "[id=1].v");
    }

    #[test]
    fn records_with_disjoint_ids_report_missing_and_unexpected() {
        let r = run(
            CompareMode::Lenient,
            json!([{"id": 1}, {"id": 2}]),
            json!([{"id": 1}, {"id": 3}]),
        );
        assert_eq!(r.missing_fields()[0].field, "[id=2]");
        assert_eq!(r.unexpected_fields()[0].field, "[id=3]");
    }

    #[test]
    fn records_without_key_fall_back_to_matching() {
        let r = run(
            CompareMode::Lenient,
            json!([{"k": 1, "v": [1]}, {"k": 1, "v": [2]}]),
            json!([{"k": 1, "v": [2]}, {"k": 1, "v": [1]}]),
        );
        assert!(r.passed(), "{}", r);

        let r = run(
            CompareMode::Lenient,
            json!([{"k": 1, "v": [1]}, {"k": 1, "v": [3]}]),
            json!([{"k": 1, "v": [2]}, {"k": 1, "v": [1]}]),
        );
        assert_eq!(r.len(), 1);
        assert_eq!(r.failures()[0].field, "[1]");
        assert_eq!(r.failures()[0].kind, FailureKind::NoMatch);
    }

    #[test]
    fn mixed_arrays_use_matching() {
        let r = run(
            CompareMode::Lenient,
            json!([[1, 2], "x", {"a": 1}]),
            json!([{"a": 1}, [2, 1], "x"]),
        );
        assert!(r.passed(), "{}", r);
    }

    #[test]
    fn nested_arrays_respect_mode() {
        let expected = json!({"deps": [{"id": "web", "tags": ["a", "b"]}]});
        let actual = json!({"deps": [{"id": "web", "tags": ["b", "a"]}]});
        assert!(run(CompareMode::NonExtensible, expected.clone(), actual.clone()).passed());
        let r = run(CompareMode::Strict, expected, actual);
        assert_eq!(r.failures()[0].field, "deps[0].tags[0]");
    }
}

//! # Lenient array-subset comparison
//!
//! [`SubsetArrayComparator`] treats every array in the expected document as a
//! subset of the corresponding actual array: actual elements that expected
//! does not reference are ignored instead of being reported. Records are
//! correlated through a key that is unique across the actual array, so
//! element order never matters.
//!
//! Objects are compared like [`DefaultComparator`](super::comparator::DefaultComparator)
//! under the configured mode (lenient by default).

use std::collections::HashSet;

use serde_json::Value;
use tracing::{debug, trace};

use super::comparator::{
    compare_array_by_matching, compact, JsonComparator, DEFAULT_MATCHING_WARN_THRESHOLD,
};
use super::mode::CompareMode;
use super::result::{render, ComparisonResult, FailureKind};
use super::util::{
    all_objects, array_of_objects_to_map, classify, find_unique_key, format_unique_key, id_of,
    Cardinality, ElementShape, SimpleKey,
};

#[derive(Debug, Clone)]
pub struct SubsetArrayComparator {
    mode: CompareMode,
    warn_threshold: usize,
}

impl SubsetArrayComparator {
    pub fn new(mode: CompareMode) -> Self {
        if mode.has_strict_order() {
            debug!(%mode, "array order is ignored by the subset comparator");
        }
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

impl Default for SubsetArrayComparator {
    fn default() -> Self {
        Self::new(CompareMode::Lenient)
    }
}

impl JsonComparator for SubsetArrayComparator {
    fn mode(&self) -> CompareMode {
        self.mode
    }

    fn name(&self) -> &'static str {
        "subset"
    }

    fn matching_warn_threshold(&self) -> usize {
        self.warn_threshold
    }

    fn compare_array(
        &self,
        prefix: &str,
        expected: &[Value],
        actual: &[Value],
        result: &mut ComparisonResult,
    ) {
        compare_array_subset(self, prefix, expected, actual, result)
    }
}

/// Checks that `expected` is contained in `actual`.
///
/// - More expected than actual elements: one size failure, nothing else.
/// - Primitives: every expected value must occur in actual at least as often.
/// - Records: correlated by a key unique across `actual`. When `actual`
///   holds only records and none of their fields is unique, the array fails
///   with [`FailureKind::NoUniqueKey`]; when `actual` also holds non-records,
///   elements are matched instead.
/// - Anything else: each expected element must match a distinct actual
///   element.
pub fn compare_array_subset<C: JsonComparator + ?Sized>(
    cmp: &C,
    prefix: &str,
    expected: &[Value],
    actual: &[Value],
    result: &mut ComparisonResult,
) {
    if expected.len() > actual.len() {
        result.fail(
            format!("{}[]", prefix),
            FailureKind::SizeMismatch,
            format!(
                "Expected array containing {} items to be a subset of array containing {} items",
                expected.len(),
                actual.len()
            ),
        );
        return;
    }

    let shape = classify(expected);
    trace!(prefix, ?shape, "subset comparison");
    match shape {
        ElementShape::Empty => {}
        ElementShape::Simple => compare_simple_subset(prefix, expected, actual, result),
        ElementShape::Objects => match find_unique_key(actual) {
            Some(key) => compare_keyed_subset(cmp, prefix, &key, expected, actual, result),
            None if !all_objects(actual) => {
                debug!(prefix, "actual array holds non-records, matching elements");
                compare_array_by_matching(cmp, prefix, expected, &all_of(actual), result);
            }
            None => {
                result.fail(
                    format!("{}[]", prefix),
                    FailureKind::NoUniqueKey,
                    format!(
                        "Could not find a field whose values are unique across the {} items of the actual array",
                        actual.len()
                    ),
                );
            }
        },
        ElementShape::Mixed => {
            compare_array_by_matching(cmp, prefix, expected, &all_of(actual), result);
        }
    }
}

/// Multiset containment of primitives.
fn compare_simple_subset(
    prefix: &str,
    expected: &[Value],
    actual: &[Value],
    result: &mut ComparisonResult,
) {
    let expected_card = Cardinality::of(expected);
    let actual_card = Cardinality::of(actual);
    for (key, value, wanted) in expected_card.iter() {
        let found = actual_card.count(key);
        if found == 0 {
            result.fail(
                format!("{}[]", prefix),
                FailureKind::ElementMismatch,
                format!("Expected {} to be contained in the array but none found", render(value)),
            );
        } else if found < wanted {
            result.fail(
                format!("{}[]", prefix),
                FailureKind::ElementMismatch,
                format!(
                    "Expected at least {} occurrence(s) of {} but got {}",
                    wanted,
                    render(value),
                    found
                ),
            );
        }
    }
}

fn compare_keyed_subset<C: JsonComparator + ?Sized>(
    cmp: &C,
    prefix: &str,
    key: &str,
    expected: &[Value],
    actual: &[Value],
    result: &mut ComparisonResult,
) {
    // Expected records that cannot be keyed are matched against all of actual.
    if !expected.iter().all(|e| id_of(e, key).is_some()) {
        debug!(prefix, key, "expected records lack the unique key, matching instead");
        compare_array_by_matching(cmp, prefix, expected, &all_of(actual), result);
        return;
    }

    let mut actual_by_id = match array_of_objects_to_map(prefix, actual, key) {
        Ok(index) => index,
        Err(err) => {
            result.fail(
                format!("{}[]", prefix),
                FailureKind::NoUniqueKey,
                err.to_string(),
            );
            return;
        }
    };
    let expected_ids: HashSet<SimpleKey> = expected.iter().filter_map(|e| id_of(e, key)).collect();
    let total = actual_by_id.len();
    actual_by_id.retain(|id| expected_ids.contains(id));
    if actual_by_id.is_empty() {
        debug!(prefix, key, "no actual record carries an expected id");
    }
    debug!(
        prefix,
        key,
        kept = actual_by_id.len(),
        ignored = total - actual_by_id.len(),
        "stripped actual array to expected ids"
    );

    for expected_obj in expected {
        let Some(id) = id_of(expected_obj, key) else {
            continue;
        };
        let path = format_unique_key(prefix, key, &expected_obj[key]);
        match actual_by_id.get(&id) {
            Some(actual_obj) => cmp.compare_values(&path, expected_obj, actual_obj, result),
            None => {
                trace!(path = %path, element = %compact(expected_obj), "no actual record");
                result.missing(path, expected_obj);
            }
        }
    }
}

fn all_of(actual: &[Value]) -> Vec<&Value> {
    actual.iter().collect()
}

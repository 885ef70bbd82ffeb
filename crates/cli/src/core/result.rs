//! Comparison result accumulator.
//!
//! A [`ComparisonResult`] is threaded by `&mut` through one comparison
//! traversal. Comparators append entries and never return early with an
//! error for data mismatches.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Classification of a single recorded mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Array lengths are incompatible with the comparison policy
    SizeMismatch,
    /// No field correlates the elements of an array
    NoUniqueKey,
    /// A correlated element differs or is absent
    ElementMismatch,
    /// JSON types differ (e.g. string vs number)
    TypeMismatch,
    /// Two primitives of the same type differ
    ValueMismatch,
    /// A primitive occurs a different number of times
    Cardinality,
    /// No actual element matches an expected element
    NoMatch,
    /// Expected field or element absent from actual
    Missing,
    /// Actual field or element absent from expected
    Unexpected,
}

/// One entry of a [`ComparisonResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldFailure {
    /// Path of the mismatch, e.g. `items[id=3].name`
    pub field: String,
    pub kind: FailureKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<Value>,
    pub message: String,
}

impl fmt::Display for FieldFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.field.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    failures: Vec<FieldFailure>,
    missing: Vec<FieldFailure>,
    unexpected: Vec<FieldFailure>,
}

impl ComparisonResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when nothing has been recorded.
    pub fn passed(&self) -> bool {
        self.failures.is_empty() && self.missing.is_empty() && self.unexpected.is_empty()
    }

    pub fn failed(&self) -> bool {
        !self.passed()
    }

    /// Records a failure that carries only a message.
    pub fn fail(&mut self, field: impl Into<String>, kind: FailureKind, message: impl Into<String>) {
        self.failures.push(FieldFailure {
            field: field.into(),
            kind,
            expected: None,
            actual: None,
            message: message.into(),
        });
    }

    /// Records a failure with both sides of the mismatch.
    pub fn fail_values(
        &mut self,
        field: impl Into<String>,
        kind: FailureKind,
        expected: &Value,
        actual: &Value,
    ) {
        let message = format!("Expected: {}\n     got: {}", render(expected), render(actual));
        self.failures.push(FieldFailure {
            field: field.into(),
            kind,
            expected: Some(expected.clone()),
            actual: Some(actual.clone()),
            message,
        });
    }

    /// Records an expected field (or keyed element) that actual lacks.
    pub fn missing(&mut self, field: impl Into<String>, expected: &Value) {
        let field = field.into();
        let message = format!("Expected: {}\n     but none found", render(expected));
        self.missing.push(FieldFailure {
            field,
            kind: FailureKind::Missing,
            expected: Some(expected.clone()),
            actual: None,
            message,
        });
    }

    /// Records an actual field (or keyed element) that expected does not name.
    pub fn unexpected(&mut self, field: impl Into<String>, actual: &Value) {
        let field = field.into();
        let message = format!("Unexpected: {}", render(actual));
        self.unexpected.push(FieldFailure {
            field,
            kind: FailureKind::Unexpected,
            expected: None,
            actual: Some(actual.clone()),
            message,
        });
    }

    pub fn failures(&self) -> &[FieldFailure] {
        &self.failures
    }

    pub fn missing_fields(&self) -> &[FieldFailure] {
        &self.missing
    }

    pub fn unexpected_fields(&self) -> &[FieldFailure] {
        &self.unexpected
    }

    /// Every entry, failures first, then missing, then unexpected.
    pub fn entries(&self) -> impl Iterator<Item = &FieldFailure> {
        self.failures
            .iter()
            .chain(self.missing.iter())
            .chain(self.unexpected.iter())
    }

    pub fn len(&self) -> usize {
        self.failures.len() + self.missing.len() + self.unexpected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passed()
    }

    /// True if any entry has the given kind.
    pub fn has_kind(&self, kind: FailureKind) -> bool {
        self.entries().any(|e| e.kind == kind)
    }

    /// One line per entry, suitable for assertion messages.
    pub fn message(&self) -> String {
        self.entries()
            .map(|e| e.to_string().replace('\n', " "))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl fmt::Display for ComparisonResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.passed() {
            return write!(f, "passed");
        }
        for entry in self.entries() {
            writeln!(f, "{}", entry)?;
        }
        Ok(())
    }
}

/// Values are rendered compactly; strings keep their quotes so `"1"` and `1`
/// stay distinguishable in messages.
pub(crate) fn render(value: &Value) -> String {
    match value {
        Value::Object(_) => "a JSON object".to_string(),
        Value::Array(_) => "a JSON array".to_string(),
        other => other.to_string(),
    }
}

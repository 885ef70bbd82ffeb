//! Array length assertions.
//!
//! With [`ArraySizeComparator`], an expected array does not describe
//! elements: `[n]` requires exactly `n` actual items and `[min, max]` an
//! inclusive range. Objects are compared as usual, so size assertions can
//! sit anywhere in a document.

use serde_json::Value;

use super::comparator::{compact, JsonComparator};
use super::mode::CompareMode;
use super::result::{ComparisonResult, FailureKind};

#[derive(Debug, Clone)]
pub struct ArraySizeComparator {
    mode: CompareMode,
}

impl ArraySizeComparator {
    pub fn new(mode: CompareMode) -> Self {
        Self { mode }
    }
}

impl Default for ArraySizeComparator {
    fn default() -> Self {
        Self::new(CompareMode::Lenient)
    }
}

/// Inclusive bounds parsed from an expected array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeBounds {
    pub min: u64,
    pub max: u64,
}

impl SizeBounds {
    /// Parses `[n]` or `[min, max]`.
    pub fn parse(expected: &[Value]) -> Result<Self, String> {
        let bounds: Option<Vec<u64>> = expected.iter().map(Value::as_u64).collect();
        match bounds.as_deref() {
            Some([n]) => Ok(SizeBounds { min: *n, max: *n }),
            Some([min, max]) if min <= max => Ok(SizeBounds {
                min: *min,
                max: *max,
            }),
            Some([min, max]) => Err(format!(
                "minimum size {} is greater than maximum size {}",
                min, max
            )),
            _ => Err(format!(
                "expected [n] or [min, max] with non-negative integers, got {}",
                compact(&Value::Array(expected.to_vec()))
            )),
        }
    }

    pub fn contains(&self, len: u64) -> bool {
        self.min <= len && len <= self.max
    }
}

impl JsonComparator for ArraySizeComparator {
    fn mode(&self) -> CompareMode {
        self.mode
    }

    fn name(&self) -> &'static str {
        "array-size"
    }

    fn compare_array(
        &self,
        prefix: &str,
        expected: &[Value],
        actual: &[Value],
        result: &mut ComparisonResult,
    ) {
        let path = format!("{}[]", prefix);
        let bounds = match SizeBounds::parse(expected) {
            Ok(bounds) => bounds,
            Err(reason) => {
                result.fail(path, FailureKind::SizeMismatch, reason);
                return;
            }
        };
        let len = actual.len() as u64;
        if bounds.contains(len) {
            return;
        }
        let message = if bounds.min == bounds.max {
            format!("Expected array of size {} but got {}", bounds.min, len)
        } else {
            format!(
                "Expected array of size between {} and {} but got {}",
                bounds.min, bounds.max, len
            )
        };
        result.fail(path, FailureKind::SizeMismatch, message);
    }
}

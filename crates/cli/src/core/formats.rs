//! # jcmp Output Formats
//!
//! A [`CompareReport`] is the serializable summary of one comparison. It is
//! emitted either inside the JSON response envelope or as a plain-text
//! report for terminals.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use super::config::ComparatorKind;
use super::mode::CompareMode;
use super::result::{ComparisonResult, FieldFailure};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `StdResponse` envelope on one line
    #[default]
    Json,
    /// Human-readable report
    Pretty,
}

impl OutputFormat {
    pub fn from_pretty_flag(pretty: bool) -> Self {
        if pretty {
            OutputFormat::Pretty
        } else {
            OutputFormat::Json
        }
    }
}

/// Serializable summary of a comparison.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompareReport {
    pub passed: bool,
    pub mode: CompareMode,
    pub comparator: ComparatorKind,
    /// Total number of recorded entries
    pub entry_count: usize,
    /// Entries listed, possibly truncated
    pub entries: Vec<FieldFailure>,
    /// Entries left out of `entries`
    pub omitted: usize,
}

impl CompareReport {
    /// Summarizes `result`, listing at most `max_entries` entries (0 = all).
    pub fn from_result(
        result: &ComparisonResult,
        mode: CompareMode,
        comparator: ComparatorKind,
        max_entries: usize,
    ) -> Self {
        let limit = if max_entries == 0 {
            usize::MAX
        } else {
            max_entries
        };
        let entries: Vec<FieldFailure> = result.entries().take(limit).cloned().collect();
        let entry_count = result.len();
        Self {
            passed: result.passed(),
            mode,
            comparator,
            entry_count,
            omitted: entry_count - entries.len(),
            entries,
        }
    }

    /// Plain-text rendering, one block per entry.
    pub fn to_pretty(&self) -> String {
        let mut out = String::new();
        let verdict = if self.passed { "PASS" } else { "FAIL" };
        let _ = writeln!(
            out,
            "{} ({} comparator, {} mode)",
            verdict, self.comparator, self.mode
        );
        if self.passed {
            return out;
        }
        let _ = writeln!(out, "{} difference(s):", self.entry_count);
        for entry in &self.entries {
            let field = if entry.field.is_empty() {
                "<root>"
            } else {
                entry.field.as_str()
            };
            let _ = writeln!(out, "  - {} [{:?}]", field, entry.kind);
            for line in entry.message.lines() {
                let _ = writeln!(out, "      {}", line.trim_start());
            }
        }
        if self.omitted > 0 {
            let _ = writeln!(out, "  ... {} more", self.omitted);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::result::FailureKind;
    use serde_json::json;

    fn sample() -> ComparisonResult {
        let mut result = ComparisonResult::new();
        result.fail_values("[id=1].v", FailureKind::ValueMismatch, &json!("a"), &json!("b"));
        result.missing("[id=2]", &json!({"id": 2}));
        result.fail("[]", FailureKind::NoUniqueKey, "no key");
        result
    }

    #[test]
    fn report_truncates_entries() {
        let report =
            CompareReport::from_result(&sample(), CompareMode::Lenient, ComparatorKind::Subset, 2);
        assert!(!report.passed);
        assert_eq!(report.entry_count, 3);
        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.omitted, 1);

        let all =
            CompareReport::from_result(&sample(), CompareMode::Lenient, ComparatorKind::Subset, 0);
        assert_eq!(all.omitted, 0);
    }

    #[test]
    fn pretty_report_lists_paths() {
        let report =
            CompareReport::from_result(&sample(), CompareMode::Strict, ComparatorKind::Default, 0);
        let text = report.to_pretty();
        assert!(text.starts_with("FAIL (default comparator, strict mode)"));
        assert!(text.contains("  - [id=1].v [ValueMismatch]"));
        assert!(text.contains("      got: \"b\""));
        assert!(text.contains("3 difference(s)"));
    }

    #[test]
    fn passing_report_is_one_line() {
        let report = CompareReport::from_result(
            &ComparisonResult::new(),
            CompareMode::Lenient,
            ComparatorKind::Subset,
            10,
        );
        assert_eq!(report.to_pretty(), "PASS (subset comparator, lenient mode)\n");
    }

    #[test]
    fn report_serializes_kinds_in_snake_case() {
        let report =
            CompareReport::from_result(&sample(), CompareMode::Lenient, ComparatorKind::Subset, 0);
        let v = serde_json::to_value(&report).unwrap();
        assert_eq!(v["entries"][0]["kind"], json!("value_mismatch"));
        assert_eq!(v["comparator"], json!("subset"));
        assert_eq!(v["mode"], json!("lenient"));
    }

    #[test]
    fn pretty_flag_selects_format() {
        assert_eq!(OutputFormat::from_pretty_flag(false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_pretty_flag(true), OutputFormat::Pretty);
    }
}

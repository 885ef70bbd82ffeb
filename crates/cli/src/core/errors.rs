//! # jcmp Error Types
//!
//! Errors raised by the comparison engine. Data mismatches are never errors:
//! they are recorded in a [`ComparisonResult`](super::result::ComparisonResult).
//! The variants here cover inputs that cannot be compared at all.
//!
//! ## Error Categories
//!
//! - **Validation**: unparsable JSON, values that break a utility's contract
//! - **Configuration**: unknown modes or comparators, bad config files
//! - **System**: I/O failures while reading inputs

use std::path::PathBuf;
use thiserror::Error;

/// Error categories used by the JSON envelope and exit-code mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorCategory {
    /// Malformed input data
    Validation,
    /// Invalid configuration values or files
    Configuration,
    /// I/O and other environment failures
    System,
}

/// Result type for all fallible engine operations.
pub type CompareResult<T> = Result<T, CompareError>;

#[derive(Debug, Error)]
pub enum CompareError {
    /// E_PARSE - One side of the comparison is not valid JSON
    #[error("Invalid JSON in {side} input: {source}")]
    Parse {
        /// Which input failed ("expected" or "actual")
        side: String,
        #[source]
        source: serde_json::Error,
    },

    /// E_IO - An input or configuration file could not be read
    #[error("I/O error in {operation}: {source}")]
    Io {
        operation: String,
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    /// E_MALFORMED - A value did not have the shape a utility requires
    ///
    /// Raised when, for instance, an array that must hold only records is
    /// indexed by a key and one of its elements is not a record.
    #[error("Malformed input at '{path}': {reason}")]
    Malformed { path: String, reason: String },

    /// E_CONFIG - A configuration value failed validation
    #[error("Invalid configuration for field '{field}': {reason}")]
    Config {
        field: String,
        value: String,
        reason: String,
    },

    /// E_UNKNOWN_MODE
    #[error("Unknown compare mode '{mode}'. Supported modes: {}", supported.join(", "))]
    UnknownMode {
        mode: String,
        supported: Vec<String>,
    },

    /// E_UNKNOWN_COMPARATOR
    #[error("Unknown comparator '{name}'. Supported comparators: {}", supported.join(", "))]
    UnknownComparator {
        name: String,
        supported: Vec<String>,
    },
}

impl CompareError {
    pub fn io<P, S>(path: P, operation: S, source: std::io::Error) -> Self
    where
        P: Into<Option<PathBuf>>,
        S: Into<String>,
    {
        Self::Io {
            operation: operation.into(),
            path: path.into(),
            source,
        }
    }

    pub fn parse(side: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Parse {
            side: side.into(),
            source,
        }
    }

    pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Returns the stable error code for this variant.
    pub fn error_code(&self) -> &'static str {
        match self {
            CompareError::Parse { .. } => "E_PARSE",
            CompareError::Io { .. } => "E_IO",
            CompareError::Malformed { .. } => "E_MALFORMED",
            CompareError::Config { .. } => "E_CONFIG",
            CompareError::UnknownMode { .. } => "E_UNKNOWN_MODE",
            CompareError::UnknownComparator { .. } => "E_UNKNOWN_COMPARATOR",
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            CompareError::Parse { .. } | CompareError::Malformed { .. } => {
                ErrorCategory::Validation
            }
            CompareError::Config { .. }
            | CompareError::UnknownMode { .. }
            | CompareError::UnknownComparator { .. } => ErrorCategory::Configuration,
            CompareError::Io { .. } => ErrorCategory::System,
        }
    }

    /// Suggestions shown alongside the error in the response envelope.
    pub fn recovery_hints(&self) -> Vec<String> {
        match self {
            CompareError::Parse { side, source } => vec![
                format!(
                    "Fix the {} document near line {}, column {}",
                    side,
                    source.line(),
                    source.column()
                ),
                "Pass --inline only when the arguments are JSON text, not paths".to_string(),
            ],
            CompareError::Io {
                operation,
                path,
                source,
            } => {
                let mut hints = vec![format!("Retry the '{}' operation", operation)];
                if let Some(p) = path {
                    hints.insert(0, format!("Check access to path: {:?}", p));
                }
                if source.kind() == std::io::ErrorKind::NotFound {
                    hints.insert(0, "The file does not exist".to_string());
                }
                hints
            }
            CompareError::Malformed { path, .. } => vec![format!(
                "Every element of the array at '{}' must be an object with a simple id",
                path
            )],
            CompareError::Config { field, .. } => vec![
                format!("Fix the '{}' configuration field", field),
                "Remove the field to fall back to its default".to_string(),
            ],
            CompareError::UnknownMode { supported, .. } => vec![format!(
                "Use one of the supported modes: {}",
                supported.join(", ")
            )],
            CompareError::UnknownComparator { supported, .. } => vec![format!(
                "Use one of the supported comparators: {}",
                supported.join(", ")
            )],
        }
    }

    pub fn is_recoverable(&self) -> bool {
        !matches!(self, CompareError::Io { .. })
    }
}

// # -----------------------------
// # crates/common/src/lib.rs
// # -----------------------------
pub mod env;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Standard JSON response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StdResponse<T> {
    /// Whether the operation succeeded
    pub success: bool,
    /// Timestamp of the response
    pub timestamp: DateTime<Utc>,
    /// Optional request identifier for tracing
    pub request_id: Option<Uuid>,
    /// Error information if operation failed
    pub error: Option<StdError>,
    /// Response data if operation succeeded
    pub data: Option<T>,
}

impl<T> StdResponse<T> {
    pub fn success(data: T, request_id: Option<Uuid>) -> Self {
        Self {
            success: true,
            timestamp: Utc::now(),
            request_id,
            error: None,
            data: Some(data),
        }
    }

    /// A response that carries data but reports `success: false`, used when
    /// the operation ran to completion and its verdict is negative.
    pub fn rejected(data: T, error: StdError, request_id: Option<Uuid>) -> Self {
        Self {
            success: false,
            timestamp: Utc::now(),
            request_id,
            error: Some(error),
            data: Some(data),
        }
    }

    pub fn error(error: StdError, request_id: Option<Uuid>) -> Self {
        Self {
            success: false,
            timestamp: Utc::now(),
            request_id,
            error: Some(error),
            data: None,
        }
    }
}

/// Standard error information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StdError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional detailed error information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    /// Hints for error resolution
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Whether the error is actionable by the user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actionable: Option<bool>,
}

impl StdError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            hint: None,
            actionable: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_actionable(mut self, actionable: bool) -> Self {
        self.actionable = Some(actionable);
        self
    }
}

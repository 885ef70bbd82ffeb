//! # jcmp Library
//!
//! Structural JSON comparison with lenient array-subset semantics.

pub mod core;

// Re-export core types for convenience
pub use core::{
    compare_json, compare_json_str, ArraySizeComparator, ComparatorKind, CompareConfig,
    CompareEngine, CompareError, CompareMode, CompareReport, CompareResult, ComparisonResult,
    DefaultComparator, FailureKind, FieldFailure, JsonComparator, OutputFormat,
    SubsetArrayComparator,
};
pub use jcmp_common::{StdError, StdResponse};

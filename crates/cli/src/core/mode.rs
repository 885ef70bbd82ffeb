//! Compare modes for the structural comparator family.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::{CompareError, CompareResult};

/// How strictly objects and arrays are compared.
///
/// | mode | extensible | strict order |
/// |---|---|---|
/// | `Strict` | no | yes |
/// | `Lenient` | yes | no |
/// | `NonExtensible` | no | no |
/// | `StrictOrder` | yes | yes |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CompareMode {
    Strict,
    #[default]
    Lenient,
    NonExtensible,
    StrictOrder,
}

impl CompareMode {
    pub const ALL: [CompareMode; 4] = [
        CompareMode::Strict,
        CompareMode::Lenient,
        CompareMode::NonExtensible,
        CompareMode::StrictOrder,
    ];

    /// Whether actual objects may carry fields expected does not name.
    pub fn is_extensible(self) -> bool {
        matches!(self, CompareMode::Lenient | CompareMode::StrictOrder)
    }

    /// Whether arrays are compared position by position.
    pub fn has_strict_order(self) -> bool {
        matches!(self, CompareMode::Strict | CompareMode::StrictOrder)
    }

    /// Returns the mode with the given flags.
    pub fn from_flags(extensible: bool, strict_order: bool) -> Self {
        match (extensible, strict_order) {
            (false, true) => CompareMode::Strict,
            (true, false) => CompareMode::Lenient,
            (false, false) => CompareMode::NonExtensible,
            (true, true) => CompareMode::StrictOrder,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CompareMode::Strict => "strict",
            CompareMode::Lenient => "lenient",
            CompareMode::NonExtensible => "non-extensible",
            CompareMode::StrictOrder => "strict-order",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            CompareMode::Strict => "No extra fields, arrays compared in order",
            CompareMode::Lenient => "Extra fields allowed, array order ignored",
            CompareMode::NonExtensible => "No extra fields, array order ignored",
            CompareMode::StrictOrder => "Extra fields allowed, arrays compared in order",
        }
    }

    fn supported() -> Vec<String> {
        Self::ALL.iter().map(|m| m.as_str().to_string()).collect()
    }
}

impl FromStr for CompareMode {
    type Err = CompareError;

    fn from_str(s: &str) -> CompareResult<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "strict" => Ok(CompareMode::Strict),
            "lenient" => Ok(CompareMode::Lenient),
            "non-extensible" | "nonextensible" => Ok(CompareMode::NonExtensible),
            "strict-order" | "strictorder" => Ok(CompareMode::StrictOrder),
            _ => Err(CompareError::UnknownMode {
                mode: s.to_string(),
                supported: Self::supported(),
            }),
        }
    }
}

impl fmt::Display for CompareMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_round_trip_through_from_flags() {
        for mode in CompareMode::ALL {
            assert_eq!(
                CompareMode::from_flags(mode.is_extensible(), mode.has_strict_order()),
                mode
            );
        }
    }

    #[test]
    fn parse_accepts_spellings() {
        assert_eq!("STRICT".parse::<CompareMode>().unwrap(), CompareMode::Strict);
        assert_eq!(
            "non_extensible".parse::<CompareMode>().unwrap(),
            CompareMode::NonExtensible
        );
        assert_eq!(
            "strict-order".parse::<CompareMode>().unwrap(),
            CompareMode::StrictOrder
        );
        let err = "loose".parse::<CompareMode>().unwrap_err();
        assert_eq!(err.error_code(), "E_UNKNOWN_MODE");
    }

    #[test]
    fn serde_uses_kebab_case() {
        let v = serde_json::to_value(CompareMode::NonExtensible).unwrap();
        assert_eq!(v, serde_json::json!("non-extensible"));
    }
}

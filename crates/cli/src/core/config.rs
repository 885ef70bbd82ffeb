//! # jcmp Configuration
//!
//! Settings for the comparison engine and its output.
//!
//! ## Configuration Loading
//!
//! Sources, lowest precedence first:
//! 1. Built-in defaults
//! 2. Configuration file (`--config`, `JCMP_CONFIG`, or `jcmp.toml` in the
//!    working directory)
//! 3. Environment variables (`JCMP_*`)
//! 4. Command-line flags, applied by the binary
//!
//! ```toml
//! mode = "lenient"
//! comparator = "subset"
//!
//! [output]
//! pretty = false
//! max_entries = 50
//!
//! [matching]
//! warn_threshold = 64
//! ```

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use jcmp_common::env::{clamp, parse_env_bool, parse_env_string, parse_env_usize};

use super::comparator::DEFAULT_MATCHING_WARN_THRESHOLD;
use super::errors::{CompareError, CompareResult};
use super::mode::CompareMode;

const DEFAULT_MAX_ENTRIES: usize = 50;
const MAX_ENTRIES_CEILING: usize = 10_000;
const DEFAULT_CONFIG_FILE: &str = "jcmp.toml";

/// Which comparator the engine runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ComparatorKind {
    /// Full structural equality under the mode
    Default,
    /// Arrays are compared as subsets
    #[default]
    Subset,
    /// Expected arrays are size bounds
    ArraySize,
}

impl ComparatorKind {
    pub const ALL: [ComparatorKind; 3] = [
        ComparatorKind::Default,
        ComparatorKind::Subset,
        ComparatorKind::ArraySize,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ComparatorKind::Default => "default",
            ComparatorKind::Subset => "subset",
            ComparatorKind::ArraySize => "array-size",
        }
    }
}

impl FromStr for ComparatorKind {
    type Err = CompareError;

    fn from_str(s: &str) -> CompareResult<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "default" | "strict-equality" => Ok(ComparatorKind::Default),
            "subset" | "lenient-subset" => Ok(ComparatorKind::Subset),
            "array-size" | "size" => Ok(ComparatorKind::ArraySize),
            _ => Err(CompareError::UnknownComparator {
                name: s.to_string(),
                supported: Self::ALL.iter().map(|k| k.as_str().to_string()).collect(),
            }),
        }
    }
}

impl fmt::Display for ComparatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    pub mode: CompareMode,
    pub comparator: ComparatorKind,
    pub output: OutputConfig,
    pub matching: MatchingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Human-readable report instead of the JSON envelope
    pub pretty: bool,
    /// Entries listed in a report; 0 lists all
    pub max_entries: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: false,
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Array length above which element matching logs a warning
    pub warn_threshold: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            warn_threshold: DEFAULT_MATCHING_WARN_THRESHOLD,
        }
    }
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self::builtin_defaults()
    }
}

impl CompareConfig {
    /// Returns the base defaults without reading disk or environment.
    pub fn builtin_defaults() -> Self {
        Self {
            mode: CompareMode::Lenient,
            comparator: ComparatorKind::Subset,
            output: OutputConfig::default(),
            matching: MatchingConfig::default(),
        }
    }

    /// Parses a TOML document on top of the built-in defaults.
    pub fn from_toml_str(contents: &str) -> CompareResult<Self> {
        let config: Self = toml::from_str(contents).map_err(|err| CompareError::Config {
            field: "<file>".to_string(),
            value: String::new(),
            reason: err.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from the given path, applying environment overrides.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> CompareResult<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref).map_err(|source| {
            CompareError::io(path_ref.to_path_buf(), "read config", source)
        })?;
        let mut config = Self::from_toml_str(&contents).map_err(|err| match err {
            CompareError::Config { field, reason, .. } => CompareError::Config {
                field,
                value: path_ref.display().to_string(),
                reason,
            },
            other => other,
        })?;
        debug!(path = %path_ref.display(), "loaded configuration file");
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Loads configuration from standard sources.
    ///
    /// An explicit path that fails to load is an error. A discovered
    /// `jcmp.toml` that fails to load is logged and skipped.
    pub fn from_sources(path_override: Option<PathBuf>) -> CompareResult<Self> {
        let explicit = path_override.is_some() || parse_env_string("JCMP_CONFIG").is_some();
        if let Some(path) = Self::discover_config_path(path_override) {
            match Self::load_from_path(&path) {
                Ok(config) => return Ok(config),
                Err(err) if explicit => return Err(err),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "ignoring unreadable config file")
                }
            }
        }

        let mut config = Self::builtin_defaults();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Checks values that deserialize fine but cannot be used.
    pub fn validate(&self) -> CompareResult<()> {
        if self.matching.warn_threshold == 0 {
            return Err(CompareError::Config {
                field: "matching.warn_threshold".to_string(),
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.output.max_entries > MAX_ENTRIES_CEILING {
            return Err(CompareError::Config {
                field: "output.max_entries".to_string(),
                value: self.output.max_entries.to_string(),
                reason: format!("must not exceed {}", MAX_ENTRIES_CEILING),
            });
        }
        Ok(())
    }

    /// Applies environment variable overrides using the `JCMP_*` namespace.
    pub fn apply_env_overrides(&mut self) -> CompareResult<()> {
        if let Some(value) = parse_env_string("JCMP_MODE") {
            self.mode = value.parse()?;
        }
        if let Some(value) = parse_env_string("JCMP_COMPARATOR") {
            self.comparator = value.parse()?;
        }
        if let Some(pretty) = parse_env_bool("JCMP_PRETTY") {
            self.output.pretty = pretty;
        }
        if let Some(max) = parse_env_usize("JCMP_MAX_ENTRIES") {
            self.output.max_entries = clamp(max, 0, MAX_ENTRIES_CEILING);
        }
        Ok(())
    }

    /// Discovers the configuration path to use.
    fn discover_config_path(path_override: Option<PathBuf>) -> Option<PathBuf> {
        if let Some(path) = path_override {
            return Some(path);
        }

        if let Some(from_env) = parse_env_string("JCMP_CONFIG") {
            return Some(PathBuf::from(from_env));
        }

        let candidate = env::current_dir().ok()?.join(DEFAULT_CONFIG_FILE);
        candidate.exists().then_some(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::tempdir;

    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        for key in [
            "JCMP_MODE",
            "JCMP_COMPARATOR",
            "JCMP_PRETTY",
            "JCMP_MAX_ENTRIES",
            "JCMP_CONFIG",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn defaults_are_lenient_subset() {
        let config = CompareConfig::default();
        assert_eq!(config.mode, CompareMode::Lenient);
        assert_eq!(config.comparator, ComparatorKind::Subset);
        assert_eq!(config.output.max_entries, 50);
        assert!(!config.output.pretty);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = CompareConfig::from_toml_str(
            r#"
            mode = "non-extensible"

            [output]
            pretty = true
            "#,
        )
        .unwrap();
        assert_eq!(config.mode, CompareMode::NonExtensible);
        assert_eq!(config.comparator, ComparatorKind::Subset);
        assert!(config.output.pretty);
        assert_eq!(config.output.max_entries, 50);
        assert_eq!(config.matching.warn_threshold, 64);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = CompareConfig::from_toml_str(r#"mode = "fuzzy""#).unwrap_err();
        assert_eq!(err.error_code(), "E_CONFIG");

        let err = CompareConfig::from_toml_str("[matching]\nwarn_threshold = 0").unwrap_err();
        assert!(err.to_string().contains("matching.warn_threshold"));
    }

    #[test]
    fn loads_file_then_env() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();

        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("jcmp.toml");
        fs::write(&path, "comparator = \"default\"\nmode = \"strict\"\n").unwrap();

        env::set_var("JCMP_MODE", "strict-order");
        env::set_var("JCMP_MAX_ENTRIES", "999999");
        let config = CompareConfig::load_from_path(&path).unwrap();
        clear_env();

        assert_eq!(config.comparator, ComparatorKind::Default);
        assert_eq!(config.mode, CompareMode::StrictOrder);
        assert_eq!(config.output.max_entries, 10_000);
    }

    #[test]
    fn invalid_env_mode_is_an_error() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("JCMP_COMPARATOR", "fuzzy");
        let err = CompareConfig::from_sources(None).unwrap_err();
        clear_env();
        assert_eq!(err.error_code(), "E_UNKNOWN_COMPARATOR");
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let err =
            CompareConfig::from_sources(Some(PathBuf::from("/no/such/jcmp.toml"))).unwrap_err();
        assert_eq!(err.error_code(), "E_IO");
    }

    #[test]
    fn comparator_kind_parses() {
        assert_eq!(
            "array_size".parse::<ComparatorKind>().unwrap(),
            ComparatorKind::ArraySize
        );
        assert_eq!(
            "lenient-subset".parse::<ComparatorKind>().unwrap(),
            ComparatorKind::Subset
        );
        assert!("nope".parse::<ComparatorKind>().is_err());
    }
}

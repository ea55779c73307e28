use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::diagnostics::ConfigError;

/// Default bound on reductions simulated for a single lookahead.
pub const DEFAULT_REDUCTION_LIMIT: usize = 100_000;

/// Knobs for a [`crate::Parser`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Try inserting a zero-width missing token before skipping input.
    pub insert_missing: bool,
    /// Consecutive reductions allowed for one lookahead before it is treated
    /// as not viable.
    pub reduction_limit: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { insert_missing: true, reduction_limit: DEFAULT_REDUCTION_LIMIT }
    }
}

// ---- TOML deserialization types ----

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    #[serde(default)]
    recovery: TomlRecovery,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlRecovery {
    #[serde(default = "default_insert_missing")]
    insert_missing: bool,
    #[serde(default = "default_reduction_limit")]
    reduction_limit: usize,
}

impl Default for TomlRecovery {
    fn default() -> Self {
        Self { insert_missing: default_insert_missing(), reduction_limit: default_reduction_limit() }
    }
}

fn default_insert_missing() -> bool {
    true
}

fn default_reduction_limit() -> usize {
    DEFAULT_REDUCTION_LIMIT
}

impl ParseOptions {
    /// Parse options from TOML text. `path` is only used in error messages.
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: TomlConfig =
            toml::from_str(content).map_err(|e| ConfigError::invalid(e.to_string(), path.to_path_buf()))?;
        if config.recovery.reduction_limit == 0 {
            return Err(ConfigError::invalid(
                "recovery.reduction_limit must be at least 1",
                path.to_path_buf(),
            ));
        }
        Ok(Self {
            insert_missing: config.recovery.insert_missing,
            reduction_limit: config.recovery.reduction_limit,
        })
    }

    /// Load options from a TOML file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::io(e.to_string(), PathBuf::from(path)))?;
        Self::from_toml_str(&content, path)
    }
}

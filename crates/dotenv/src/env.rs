//! Environment variable configuration for the store builder.
//!
//! Responsibilities:
//! - Read `DOTENV_*` variables and apply them to a `StoreBuilder`.
//! - Provide a helper for reading env vars with empty/whitespace filtering.
//!
//! Does NOT handle:
//! - Loading env files (see `store/`).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Search paths and names are appended after any already on the builder.
//! - Invalid boolean values return DotenvError::InvalidValue.

use crate::constants::{ENV_FILE_ENCODING, ENV_FILE_NAMES, ENV_SEARCH_PATH, ENV_SHORT_CIRCUIT};
use crate::error::{DotenvError, Result};
use crate::store::StoreBuilder;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_bool(var: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(DotenvError::InvalidValue {
            var: var.to_string(),
            message: "must be true, false, 1 or 0".to_string(),
        }),
    }
}

impl StoreBuilder {
    /// Returns a builder with the `DOTENV_*` environment configuration applied.
    ///
    /// - `DOTENV_PATH`: search directories to append.
    /// - `DOTENV_FILENAMES`: comma-separated file names to append.
    /// - `DOTENV_SHORT_CIRCUIT`: `true`/`1` enables short-circuit mode, `false`/`0` disables it.
    /// - `DOTENV_ENCODING`: encoding label for every candidate.
    pub fn from_env(&self) -> Result<Self> {
        let mut builder = self.clone();

        if let Some(paths) = env_var_or_none(ENV_SEARCH_PATH) {
            for path in std::env::split_paths(&paths).filter(|p| !p.as_os_str().is_empty()) {
                builder = builder.add_path(path);
            }
        }
        if let Some(names) = env_var_or_none(ENV_FILE_NAMES) {
            for name in names.split(',').map(str::trim).filter(|n| !n.is_empty()) {
                builder = builder.add_name(name);
            }
        }
        if let Some(flag) = env_var_or_none(ENV_SHORT_CIRCUIT) {
            builder = if parse_bool(ENV_SHORT_CIRCUIT, &flag)? {
                builder.short_circuit()
            } else {
                builder.without_short_circuit()
            };
        }
        if let Some(encoding) = env_var_or_none(ENV_FILE_ENCODING) {
            builder = builder.file_encoding(Some(encoding));
        }

        Ok(builder)
    }
}

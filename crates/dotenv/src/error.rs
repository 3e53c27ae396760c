//! Error types for env-file discovery and loading.
//!
//! Responsibilities:
//! - Define error variants for every failure surfaced by stores, parsers and repositories.
//! - Classify errors so callers can tell "nothing found" apart from real defects.
//!
//! Does NOT handle:
//! - Filesystem transport errors (see `store::filesystem::FilesystemError`). The reader
//!   folds those into "absent"; the last one is chained as the source of
//!   `UnreadableFiles`.
//!
//! Invariants:
//! - `UnreadableFiles` is the only variant `Dotenv::safe_load` recovers from.
//! - Parse errors NEVER include raw env-file line contents to prevent secret leakage.

use std::path::PathBuf;
use thiserror::Error;

use crate::store::encoding::EncodingError;
use crate::store::FilesystemError;

/// Result type alias for dotenv operations.
pub type Result<T> = std::result::Result<T, DotenvError>;

/// Errors that can occur while reading and loading env files.
#[derive(Error, Debug)]
pub enum DotenvError {
    /// The store was built without any candidate path.
    #[error("At least one environment file path must be provided.")]
    NoPathsProvided,

    /// None of the candidate files could be read.
    #[error("Unable to read any of the environment file(s) at [{}].", join_paths(.paths))]
    UnreadableFiles {
        paths: Vec<PathBuf>,
        /// Why the last candidate was absent.
        #[source]
        source: Option<FilesystemError>,
    },

    /// A candidate file exists but its bytes are not valid text in the declared encoding.
    #[error("Invalid encoding in environment file at {}: {source}", .path.display())]
    InvalidEncoding {
        path: PathBuf,
        #[source]
        source: EncodingError,
    },

    /// The concatenated content failed to parse.
    ///
    /// SAFETY: Only the byte index is recorded, never the offending line.
    #[error("Failed to parse environment file content at position {error_index}")]
    InvalidFile { error_index: usize },

    /// A repository refused a variable name or value it cannot represent.
    #[error("Invalid environment variable name or value for '{name}'")]
    InvalidName { name: String },

    /// An environment configuration variable held an unusable value.
    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },
}

impl DotenvError {
    /// Check if this error means no candidate file could be read at all.
    pub fn is_unreadable(&self) -> bool {
        matches!(self, Self::UnreadableFiles { .. })
    }

    /// Check if this error was caused by malformed file bytes.
    pub fn is_encoding_error(&self) -> bool {
        matches!(self, Self::InvalidEncoding { .. })
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

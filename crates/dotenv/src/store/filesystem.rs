//! Filesystem capability used by the store to fetch raw file bytes.
//!
//! Responsibilities:
//! - Define the injected `Filesystem` trait the reader probes candidates through.
//! - Provide `TokioFilesystem`, the default implementation over `tokio::fs`.
//!
//! Does NOT handle:
//! - Text decoding (see `encoding.rs`).
//! - Deciding which failures are fatal (see `reader.rs`).

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors a filesystem capability may report for a single path.
#[derive(Error, Debug)]
pub enum FilesystemError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The capability itself determined the content cannot be text.
    #[error("Invalid encoding in {}: {message}", .path.display())]
    Encoding { path: PathBuf, message: String },
}

impl FilesystemError {
    /// Build an error from an I/O failure, separating "not found" from other failures.
    pub fn from_io(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == ErrorKind::NotFound {
            Self::NotFound(path.to_path_buf())
        } else {
            Self::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Asynchronous access to file content by path.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Filesystem: Send + Sync {
    /// Fetch the full content of `path` as raw bytes.
    async fn get(&self, path: &Path) -> Result<Vec<u8>, FilesystemError>;
}

/// Filesystem backed by the tokio runtime's blocking-pool file I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFilesystem;

#[async_trait]
impl Filesystem for TokioFilesystem {
    async fn get(&self, path: &Path) -> Result<Vec<u8>, FilesystemError> {
        tokio::fs::read(path)
            .await
            .map_err(|e| FilesystemError::from_io(path, e))
    }
}

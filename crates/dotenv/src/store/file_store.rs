//! File-backed store: turns candidate paths into one text blob.
//!
//! Responsibilities:
//! - Refuse to scan when there are no candidate paths.
//! - Run the ordered scan and join the contents with newlines.
//! - Report every attempted path, and the last absence cause, when nothing could be read.
//!
//! Does NOT handle:
//! - Parsing the blob (see `parser.rs`).
//! - Recovering from "nothing found" (see `Dotenv::safe_load`).
//!
//! Invariants:
//! - No I/O happens when the candidate list is empty.
//! - Each `read()` performs a fresh scan; nothing is cached between calls.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::Store;
use super::filesystem::Filesystem;
use super::reader::read_all;
use crate::error::{DotenvError, Result};

/// Store that reads env files from a filesystem.
#[derive(Clone)]
pub struct FileStore {
    filesystem: Arc<dyn Filesystem>,
    file_paths: Vec<PathBuf>,
    short_circuit: bool,
    file_encoding: Option<String>,
}

impl FileStore {
    /// Create a new file store over already-resolved candidate paths.
    pub fn new(
        filesystem: Arc<dyn Filesystem>,
        file_paths: Vec<PathBuf>,
        short_circuit: bool,
        file_encoding: Option<String>,
    ) -> Self {
        Self {
            filesystem,
            file_paths,
            short_circuit,
            file_encoding,
        }
    }

    /// Candidate paths, in probe order.
    pub fn file_paths(&self) -> &[PathBuf] {
        &self.file_paths
    }

    pub fn short_circuit(&self) -> bool {
        self.short_circuit
    }

    pub fn file_encoding(&self) -> Option<&str> {
        self.file_encoding.as_deref()
    }
}

impl std::fmt::Debug for FileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStore")
            .field("file_paths", &self.file_paths)
            .field("short_circuit", &self.short_circuit)
            .field("file_encoding", &self.file_encoding)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Store for FileStore {
    async fn read(&self) -> Result<String> {
        if self.file_paths.is_empty() {
            return Err(DotenvError::NoPathsProvided);
        }

        let mut contents = read_all(
            self.filesystem.as_ref(),
            &self.file_paths,
            self.short_circuit,
            self.file_encoding.as_deref(),
        )
        .await?;

        if contents.is_empty() {
            debug!(
                candidates = self.file_paths.len(),
                "No env file candidate could be read"
            );
            return Err(DotenvError::UnreadableFiles {
                paths: self.file_paths.clone(),
                source: contents.take_last_absence(),
            });
        }

        debug!(files = contents.len(), "Read env file content");
        Ok(contents.concat())
    }
}

//! Testing utilities for store and loader tests.
//!
//! Available when running tests or when the `test-utils` feature is enabled.
//!
//! # Example
//! ```ignore
//! use async_dotenv::testing::MemoryFilesystem;
//!
//! let fs = MemoryFilesystem::new().with_file("config/.env", "A=1");
//! // ... run a store over `fs`, then inspect `fs.probes()`
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::store::{Filesystem, FilesystemError};

#[derive(Debug, Clone)]
enum FileEntry {
    Bytes(Vec<u8>),
    IoError,
    EncodingError,
}

/// In-memory filesystem that records every path it is asked for.
///
/// Paths not registered behave as missing files.
#[derive(Debug, Default)]
pub struct MemoryFilesystem {
    files: HashMap<PathBuf, FileEntry>,
    probes: Mutex<Vec<PathBuf>>,
}

impl MemoryFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a text file.
    pub fn with_file(self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.with_bytes(path, content.as_bytes().to_vec())
    }

    /// Register a file with arbitrary bytes.
    pub fn with_bytes(mut self, path: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
        self.files.insert(path.into(), FileEntry::Bytes(bytes));
        self
    }

    /// Register a path that exists but fails with an I/O error when read.
    pub fn with_io_error(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.insert(path.into(), FileEntry::IoError);
        self
    }

    /// Register a path the filesystem itself reports as having invalid encoding.
    pub fn with_encoding_error(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.insert(path.into(), FileEntry::EncodingError);
        self
    }

    /// Every path requested so far, in request order.
    pub fn probes(&self) -> Vec<PathBuf> {
        self.probes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn probe_count(&self) -> usize {
        self.probes().len()
    }
}

#[async_trait]
impl Filesystem for MemoryFilesystem {
    async fn get(&self, path: &Path) -> Result<Vec<u8>, FilesystemError> {
        self.probes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(path.to_path_buf());

        match self.files.get(path) {
            Some(FileEntry::Bytes(bytes)) => Ok(bytes.clone()),
            Some(FileEntry::IoError) => Err(FilesystemError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            }),
            Some(FileEntry::EncodingError) => Err(FilesystemError::Encoding {
                path: path.to_path_buf(),
                message: "binary content".to_string(),
            }),
            None => Err(FilesystemError::NotFound(path.to_path_buf())),
        }
    }
}

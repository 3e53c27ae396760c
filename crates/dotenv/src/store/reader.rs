//! Sequential probing of candidate env files.
//!
//! Responsibilities:
//! - Read one candidate and classify it as absent, content, or invalid.
//! - Scan candidates in order, honoring short-circuit mode.
//!
//! Does NOT handle:
//! - Failing when nothing was found (see `file_store.rs`).
//!
//! Invariants:
//! - Candidates are read one at a time, in order; path `i + 1` is never requested
//!   before the outcome of path `i` is known.
//! - Missing or unreadable files never abort a scan; invalid content always does,
//!   unless short-circuiting stopped the scan before reaching it.
//! - In short-circuit mode the aggregate holds at most one entry.

use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};

use super::encoding::{EncodingError, to_utf8};
use super::filesystem::{Filesystem, FilesystemError};
use crate::error::{DotenvError, Result};

/// Outcome of probing a single candidate file.
#[derive(Debug)]
pub enum ReadOutcome {
    /// The file does not exist or could not be opened.
    Absent(FilesystemError),
    /// The file was read and decoded.
    Content(String),
    /// The file exists but its content is not valid text.
    Invalid(DotenvError),
}

/// Successfully read contents, keyed by path, in discovery order.
#[derive(Debug, Default)]
pub struct AggregateContent {
    entries: Vec<(PathBuf, String)>,
    last_absence: Option<FilesystemError>,
}

impl AggregateContent {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Content read from `path`, if it was part of the scan result.
    pub fn get(&self, path: &Path) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, content)| content.as_str())
    }

    /// Paths in the order they were read.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().map(|(p, _)| p.as_path())
    }

    /// Contents in the order they were read.
    pub fn contents(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, c)| c.as_str())
    }

    /// Join all contents with a single newline.
    pub fn concat(&self) -> String {
        self.contents().collect::<Vec<_>>().join("\n")
    }

    /// Why the most recent absent candidate could not be read.
    pub fn last_absence(&self) -> Option<&FilesystemError> {
        self.last_absence.as_ref()
    }

    /// Take the most recent absence cause, leaving `None`.
    pub fn take_last_absence(&mut self) -> Option<FilesystemError> {
        self.last_absence.take()
    }

    fn insert(&mut self, path: PathBuf, content: String) {
        self.entries.push((path, content));
    }
}

/// Probe a single candidate file.
pub async fn read_one(
    filesystem: &dyn Filesystem,
    path: &Path,
    encoding: Option<&str>,
) -> ReadOutcome {
    let bytes = match filesystem.get(path).await {
        Ok(bytes) => bytes,
        Err(FilesystemError::Encoding { path, message }) => {
            warn!(
                path = %path.display(),
                reason = %message,
                "Filesystem rejected env file encoding"
            );
            return ReadOutcome::Invalid(DotenvError::InvalidEncoding {
                path,
                source: EncodingError::Rejected(message),
            });
        }
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Env file candidate absent");
            return ReadOutcome::Absent(e);
        }
    };

    match to_utf8(&bytes, encoding) {
        Ok(text) => {
            debug!(path = %path.display(), bytes = bytes.len(), "Read env file candidate");
            ReadOutcome::Content(text)
        }
        Err(source) => {
            warn!(path = %path.display(), error = %source, "Env file has invalid encoding");
            ReadOutcome::Invalid(DotenvError::InvalidEncoding {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

/// Read candidate files in order and collect their contents.
///
/// Absent files are skipped; the cause of the last one is kept on the result. The
/// first invalid file aborts the scan and its error is returned. With `short_circuit`
/// set, scanning stops after the first file that produced content, so later invalid
/// files are never read.
pub async fn read_all(
    filesystem: &dyn Filesystem,
    paths: &[PathBuf],
    short_circuit: bool,
    encoding: Option<&str>,
) -> Result<AggregateContent> {
    let mut output = AggregateContent::default();

    for (index, path) in paths.iter().enumerate() {
        match read_one(filesystem, path, encoding).await {
            ReadOutcome::Content(content) => {
                output.insert(path.clone(), content);
                if short_circuit {
                    trace!(
                        path = %path.display(),
                        skipped = paths.len() - index - 1,
                        "Short-circuiting env file scan"
                    );
                    break;
                }
            }
            ReadOutcome::Absent(cause) => output.last_absence = Some(cause),
            ReadOutcome::Invalid(error) => return Err(error),
        }
    }

    Ok(output)
}

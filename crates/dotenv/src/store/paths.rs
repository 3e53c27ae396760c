//! Candidate path resolution.

use std::path::{Path, PathBuf};

/// Returns the candidate file paths for the given search directories and file names.
///
/// Directories form the outer loop and names the inner loop, so every name is tried
/// in the first directory before any name is tried in the second. Duplicates are kept
/// and will be probed once per occurrence.
pub fn file_paths<D, N>(search_paths: &[D], file_names: &[N]) -> Vec<PathBuf>
where
    D: AsRef<Path>,
    N: AsRef<Path>,
{
    search_paths
        .iter()
        .flat_map(|dir| file_names.iter().map(move |name| dir.as_ref().join(name)))
        .collect()
}

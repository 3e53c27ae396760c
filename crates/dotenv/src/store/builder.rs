//! Store builder implementation.
//!
//! Responsibilities:
//! - Accumulate search paths, file names, short-circuit mode and encoding.
//! - Resolve candidate paths and construct a `FileStore`.
//!
//! Does NOT handle:
//! - Reading environment configuration (delegated to `env.rs`).
//!
//! Invariants / Assumptions:
//! - Every `with_*`/`add_*` method returns a new builder; the receiver is left untouched,
//!   so a partially configured builder can be reused as a template.
//! - A builder created with `with_no_names()` and never given a name resolves to an
//!   empty candidate list, which the store rejects at read time.

use std::path::PathBuf;
use std::sync::Arc;

use super::file_store::FileStore;
use super::filesystem::Filesystem;
use super::paths::file_paths;
use crate::constants::DEFAULT_NAME;

/// Immutable accumulator for `FileStore` options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreBuilder {
    paths: Vec<PathBuf>,
    names: Vec<String>,
    short_circuit: bool,
    file_encoding: Option<String>,
}

impl StoreBuilder {
    /// Create a builder with no file names.
    pub fn with_no_names() -> Self {
        Self::default()
    }

    /// Create a builder seeded with the default `.env` file name.
    pub fn with_default_name() -> Self {
        Self {
            names: vec![DEFAULT_NAME.to_string()],
            ..Self::default()
        }
    }

    /// Returns a builder with the given search directory appended.
    pub fn add_path(&self, path: impl Into<PathBuf>) -> Self {
        let mut next = self.clone();
        next.paths.push(path.into());
        next
    }

    /// Returns a builder with the given file name appended.
    pub fn add_name(&self, name: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.names.push(name.into());
        next
    }

    /// Returns a builder with short-circuit mode enabled.
    pub fn short_circuit(&self) -> Self {
        Self {
            short_circuit: true,
            ..self.clone()
        }
    }

    pub(crate) fn without_short_circuit(&self) -> Self {
        Self {
            short_circuit: false,
            ..self.clone()
        }
    }

    /// Returns a builder with the given file encoding label (or UTF-8 when `None`).
    pub fn file_encoding(&self, encoding: Option<impl Into<String>>) -> Self {
        Self {
            file_encoding: encoding.map(Into::into),
            ..self.clone()
        }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_short_circuit(&self) -> bool {
        self.short_circuit
    }

    pub fn encoding(&self) -> Option<&str> {
        self.file_encoding.as_deref()
    }

    /// Build a file store reading through `filesystem`.
    pub fn make(&self, filesystem: Arc<dyn Filesystem>) -> FileStore {
        FileStore::new(
            filesystem,
            file_paths(&self.paths, &self.names),
            self.short_circuit,
            self.file_encoding.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryFilesystem;
    use std::path::Path;

    #[test]
    fn test_default_name_seed() {
        assert_eq!(StoreBuilder::with_default_name().names(), [".env"]);
        assert!(StoreBuilder::with_no_names().names().is_empty());
    }

    #[test]
    fn test_mutators_leave_receiver_unchanged() {
        let base = StoreBuilder::with_no_names().add_path("config");
        let snapshot = base.clone();

        let local = base.add_name(".env.local");
        let strict = base.short_circuit().file_encoding(Some("latin1"));

        assert_eq!(base, snapshot);
        assert_eq!(local.names(), [".env.local"]);
        assert!(!local.is_short_circuit());
        assert!(strict.names().is_empty());
        assert!(strict.is_short_circuit());
        assert_eq!(strict.encoding(), Some("latin1"));
    }

    #[test]
    fn test_file_encoding_none_resets_label() {
        let builder = StoreBuilder::with_default_name()
            .file_encoding(Some("UTF-16LE"))
            .file_encoding(None::<String>);
        assert_eq!(builder.encoding(), None);
    }

    #[test]
    fn test_make_resolves_candidates_in_order() {
        let store = StoreBuilder::with_no_names()
            .add_path("d1")
            .add_path("d2")
            .add_name("n1")
            .add_name("n2")
            .short_circuit()
            .make(Arc::new(MemoryFilesystem::new()));

        assert_eq!(
            store.file_paths(),
            [
                Path::new("d1").join("n1"),
                Path::new("d1").join("n2"),
                Path::new("d2").join("n1"),
                Path::new("d2").join("n2"),
            ]
        );
        assert!(store.short_circuit());
        assert_eq!(store.file_encoding(), None);
    }

    #[test]
    fn test_no_names_resolves_to_empty_candidates() {
        let store = StoreBuilder::with_no_names()
            .add_path("config")
            .make(Arc::new(MemoryFilesystem::new()));
        assert!(store.file_paths().is_empty());
    }
}

//! Variable repositories that loaded entries are written into.
//!
//! Responsibilities:
//! - Define the `Repository` seam used by the loader and exposed by `Dotenv`.
//! - Provide in-memory, process-environment and immutable repositories.
//!
//! Does NOT handle:
//! - Parsing or interpolation (see `parser.rs`).
//!
//! Invariants:
//! - `set` returns `Ok(false)` when a repository declines a write by policy.
//! - `ProcessEnvRepository` never passes a name or value to `std::env::set_var` that
//!   the platform would reject.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Mutex, RwLock};

use tracing::debug;

use crate::error::{DotenvError, Result};

/// Key/value storage for environment variables.
pub trait Repository: Send + Sync {
    /// Get the value of `name`, if set.
    fn get(&self, name: &str) -> Option<String>;

    /// Set `name` to `value`. Returns whether the value was written.
    fn set(&self, name: &str, value: &str) -> Result<bool>;

    /// Check whether `name` is set.
    fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

/// Repository backed by an in-memory map; never touches the process environment.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    values: RwLock<BTreeMap<String, String>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all stored variables.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.values
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Repository for MemoryRepository {
    fn get(&self, name: &str) -> Option<String> {
        self.values
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(name)
            .cloned()
    }

    fn set(&self, name: &str, value: &str) -> Result<bool> {
        self.values
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(name.to_string(), value.to_string());
        Ok(true)
    }
}

/// Repository backed by the process environment.
///
/// Writing mutates global process state. Callers must not load into the process
/// environment while other threads read or write environment variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvRepository;

impl ProcessEnvRepository {
    fn is_valid(name: &str, value: &str) -> bool {
        !name.is_empty() && !name.contains(['=', '\0']) && !value.contains('\0')
    }
}

impl Repository for ProcessEnvRepository {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn set(&self, name: &str, value: &str) -> Result<bool> {
        if !Self::is_valid(name, value) {
            return Err(DotenvError::InvalidName {
                name: name.to_string(),
            });
        }
        // SAFETY: name and value were checked above; concurrent environment access is
        // excluded by this type's documented contract.
        unsafe {
            std::env::set_var(name, value);
        }
        Ok(true)
    }
}

/// Repository that never overwrites a variable which was already set before this
/// wrapper first wrote it.
#[derive(Debug)]
pub struct ImmutableRepository<R> {
    inner: R,
    written: Mutex<HashSet<String>>,
}

impl<R: Repository> ImmutableRepository<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            written: Mutex::new(HashSet::new()),
        }
    }
}

impl<R: Repository> Repository for ImmutableRepository<R> {
    fn get(&self, name: &str) -> Option<String> {
        self.inner.get(name)
    }

    fn set(&self, name: &str, value: &str) -> Result<bool> {
        let mut written = self
            .written
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if !written.contains(name) && self.inner.has(name) {
            debug!(variable = name, "Keeping existing variable");
            return Ok(false);
        }

        let stored = self.inner.set(name, value)?;
        if stored {
            written.insert(name.to_string());
        }
        Ok(stored)
    }
}

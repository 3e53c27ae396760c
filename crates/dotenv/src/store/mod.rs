//! Env-file discovery and content acquisition.
//!
//! Responsibilities:
//! - Resolve candidate paths from search directories and file names.
//! - Probe candidates through an injected `Filesystem`, in order, optionally short-circuiting.
//! - Validate file bytes as text and join the results into one blob for the parser.
//!
//! Does NOT handle:
//! - Parsing or interpolation (see `parser.rs`).
//! - Storing variables (see `repository.rs`).
//!
//! Invariants / Assumptions:
//! - Stores and builders are immutable values; concurrent reads never share state.
//! - All file I/O goes through the `Filesystem` trait.

mod builder;
pub mod encoding;
mod file_store;
mod filesystem;
pub mod paths;
pub mod reader;
mod string_store;

use async_trait::async_trait;

use crate::error::Result;

pub use builder::StoreBuilder;
pub use encoding::EncodingError;
pub use file_store::FileStore;
pub use filesystem::{Filesystem, FilesystemError, TokioFilesystem};
pub use reader::{AggregateContent, ReadOutcome};
pub use string_store::StringStore;

/// Source of the raw env-file text handed to the parser.
#[async_trait]
pub trait Store: Send + Sync {
    /// Read the content of the environment file(s).
    async fn read(&self) -> Result<String>;
}

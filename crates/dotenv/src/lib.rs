//! Asynchronous `.env` loading.
//!
//! This crate finds env files across a set of search directories, reads them through an
//! injected filesystem, and loads the parsed variables into a repository.
//!
//! ```no_run
//! use async_dotenv::Dotenv;
//!
//! # async fn run() -> async_dotenv::Result<()> {
//! let dotenv = Dotenv::create_immutable(["."], None, true, None);
//! let loaded = dotenv.safe_load().await?;
//! println!("loaded {} variables", loaded.len());
//! # Ok(())
//! # }
//! ```

pub mod constants;
mod dotenv;
mod env;
mod error;
mod loader;
pub mod parser;
pub mod repository;
pub mod store;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use dotenv::Dotenv;
pub use env::env_var_or_none;
pub use error::{DotenvError, Result};
pub use loader::{LoadedVariables, load_entries};
pub use parser::{Entry, EnvFileParser, Parser, Value};
pub use repository::{ImmutableRepository, MemoryRepository, ProcessEnvRepository, Repository};
pub use store::{
    AggregateContent, EncodingError, FileStore, Filesystem, FilesystemError, ReadOutcome, Store,
    StoreBuilder, StringStore, TokioFilesystem,
};

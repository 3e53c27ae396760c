//! Top-level loading API.
//!
//! Responsibilities:
//! - Wire a store, parser and repository together.
//! - Provide `load()` and the recovering `safe_load()`.
//! - Offer preset constructors for the common repository choices.
//!
//! Invariants / Assumptions:
//! - `safe_load()` only recovers from `DotenvError::UnreadableFiles`; encoding, parse and
//!   configuration errors always propagate.
//! - Constructors taking no filesystem read through `TokioFilesystem`.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::error::{DotenvError, Result};
use crate::loader::{LoadedVariables, load_entries};
use crate::parser::{EnvFileParser, Parser};
use crate::repository::{ImmutableRepository, MemoryRepository, ProcessEnvRepository, Repository};
use crate::store::{Filesystem, Store, StoreBuilder, StringStore, TokioFilesystem};

/// Reads env files and loads their variables into a repository.
pub struct Dotenv {
    store: Box<dyn Store>,
    parser: Box<dyn Parser>,
    repository: Arc<dyn Repository>,
}

impl Dotenv {
    /// Create a new dotenv instance from its collaborators.
    pub fn new(
        store: Box<dyn Store>,
        parser: Box<dyn Parser>,
        repository: Arc<dyn Repository>,
    ) -> Self {
        Self {
            store,
            parser,
            repository,
        }
    }

    /// Create a dotenv instance reading the files described by `builder`.
    pub fn from_builder(
        builder: &StoreBuilder,
        filesystem: Arc<dyn Filesystem>,
        repository: Arc<dyn Repository>,
    ) -> Self {
        Self::new(
            Box::new(builder.make(filesystem)),
            Box::new(EnvFileParser),
            repository,
        )
    }

    /// Create a dotenv instance searching `paths` for `names`.
    ///
    /// When `names` is `None`, the default `.env` name is used.
    pub fn create<P>(
        repository: Arc<dyn Repository>,
        filesystem: Arc<dyn Filesystem>,
        paths: impl IntoIterator<Item = P>,
        names: Option<Vec<String>>,
        short_circuit: bool,
        file_encoding: Option<String>,
    ) -> Self
    where
        P: Into<PathBuf>,
    {
        let mut builder = match names {
            None => StoreBuilder::with_default_name(),
            Some(names) => names
                .into_iter()
                .fold(StoreBuilder::with_no_names(), |b, name| b.add_name(name)),
        };
        for path in paths {
            builder = builder.add_path(path);
        }
        if short_circuit {
            builder = builder.short_circuit();
        }

        Self::from_builder(&builder.file_encoding(file_encoding), filesystem, repository)
    }

    /// Create a dotenv instance that writes into the process environment.
    pub fn create_mutable<P: Into<PathBuf>>(
        paths: impl IntoIterator<Item = P>,
        names: Option<Vec<String>>,
        short_circuit: bool,
        file_encoding: Option<String>,
    ) -> Self {
        Self::create(
            Arc::new(ProcessEnvRepository),
            Arc::new(TokioFilesystem),
            paths,
            names,
            short_circuit,
            file_encoding,
        )
    }

    /// Create a dotenv instance that writes into the process environment without
    /// overwriting variables that are already set.
    pub fn create_immutable<P: Into<PathBuf>>(
        paths: impl IntoIterator<Item = P>,
        names: Option<Vec<String>>,
        short_circuit: bool,
        file_encoding: Option<String>,
    ) -> Self {
        Self::create(
            Arc::new(ImmutableRepository::new(ProcessEnvRepository)),
            Arc::new(TokioFilesystem),
            paths,
            names,
            short_circuit,
            file_encoding,
        )
    }

    /// Create a dotenv instance backed by an in-memory repository.
    pub fn create_array_backed<P: Into<PathBuf>>(
        paths: impl IntoIterator<Item = P>,
        names: Option<Vec<String>>,
        short_circuit: bool,
        file_encoding: Option<String>,
    ) -> Self {
        Self::create(
            Arc::new(MemoryRepository::new()),
            Arc::new(TokioFilesystem),
            paths,
            names,
            short_circuit,
            file_encoding,
        )
    }

    /// Parse `content` and resolve its variables without touching the process environment.
    ///
    /// `${NAME}` references only see entries defined earlier in `content`.
    pub async fn parse(content: &str) -> Result<LoadedVariables> {
        Self::new(
            Box::new(StringStore::new(content)),
            Box::new(EnvFileParser),
            Arc::new(MemoryRepository::new()),
        )
        .load()
        .await
    }

    /// Read and load the environment file(s).
    pub async fn load(&self) -> Result<LoadedVariables> {
        let content = self.store.read().await?;
        let entries = self.parser.parse(&content)?;
        load_entries(self.repository.as_ref(), entries)
    }

    /// Read and load the environment file(s), returning nothing if no file could be read.
    pub async fn safe_load(&self) -> Result<LoadedVariables> {
        match self.load().await {
            Err(DotenvError::UnreadableFiles { paths, .. }) => {
                debug!(candidates = paths.len(), "No env file found, continuing without one");
                Ok(LoadedVariables::new())
            }
            other => other,
        }
    }

    /// The repository variables are loaded into.
    pub fn repository(&self) -> &Arc<dyn Repository> {
        &self.repository
    }
}

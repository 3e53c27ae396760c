//! Integration tests for loading env files from disk.
//!
//! Invariants / Assumptions:
//! - Tests that write to the process environment are `#[serial]`, use variable names no
//!   other test touches, and restore them through `temp_env`.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::fs;
use std::sync::Arc;

use serial_test::serial;
use tempfile::TempDir;

use async_dotenv::{Dotenv, DotenvError, MemoryRepository, StoreBuilder, TokioFilesystem};

#[tokio::test]
async fn test_short_circuit_prefers_first_directory() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    fs::write(first.path().join(".env"), "SOURCE=first\n").unwrap();
    fs::write(second.path().join(".env"), "SOURCE=second\nEXTRA=1\n").unwrap();

    let dotenv = Dotenv::create_array_backed([first.path(), second.path()], None, true, None);
    let loaded = dotenv.load().await.unwrap();

    assert_eq!(loaded.get("SOURCE").map(String::as_str), Some("first"));
    assert!(!loaded.contains_key("EXTRA"));
}

#[tokio::test]
async fn test_without_short_circuit_later_files_override() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    fs::write(first.path().join(".env"), "SOURCE=first\nONLY_FIRST=1").unwrap();
    fs::write(second.path().join(".env"), "SOURCE=second").unwrap();

    let dotenv = Dotenv::create_array_backed([first.path(), second.path()], None, false, None);
    let loaded = dotenv.load().await.unwrap();

    assert_eq!(loaded.get("SOURCE").map(String::as_str), Some("second"));
    assert_eq!(loaded.get("ONLY_FIRST").map(String::as_str), Some("1"));
}

#[tokio::test]
async fn test_missing_files_fail_load_but_not_safe_load() {
    let dir = TempDir::new().unwrap();
    let dotenv = Dotenv::create_array_backed([dir.path()], None, true, None);

    match dotenv.load().await {
        Err(DotenvError::UnreadableFiles { paths, .. }) => {
            assert_eq!(paths, vec![dir.path().join(".env")]);
        }
        other => panic!("expected UnreadableFiles, got {other:?}"),
    }
    assert!(dotenv.safe_load().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_safe_load_surfaces_invalid_encoding() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".env"), [b'K', b'=', 0xE9, b'\n']).unwrap();
    let dotenv = Dotenv::create_array_backed([dir.path()], None, true, None);

    let err = dotenv.safe_load().await.unwrap_err();

    match err {
        DotenvError::InvalidEncoding { path, .. } => assert_eq!(path, dir.path().join(".env")),
        other => panic!("expected InvalidEncoding, got {other}"),
    }
}

#[tokio::test]
async fn test_declared_encoding_reads_legacy_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".env"), [b'K', b'=', 0xE9, b'\n']).unwrap();
    let dotenv = Dotenv::create_array_backed(
        [dir.path()],
        None,
        true,
        Some("windows-1252".to_string()),
    );

    let loaded = dotenv.load().await.unwrap();

    assert_eq!(loaded.get("K").map(String::as_str), Some("é"));
}

#[tokio::test]
async fn test_directory_named_like_candidate_is_absent() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join(".env")).unwrap();
    fs::write(dir.path().join(".env.local"), "A=1").unwrap();

    let store = StoreBuilder::with_default_name()
        .add_name(".env.local")
        .add_path(dir.path())
        .make(Arc::new(TokioFilesystem));
    let dotenv = Dotenv::new(
        Box::new(store),
        Box::new(async_dotenv::EnvFileParser),
        Arc::new(MemoryRepository::new()),
    );

    let loaded = dotenv.load().await.unwrap();
    assert_eq!(loaded.get("A").map(String::as_str), Some("1"));
}

/// Run a load future to completion inside a `temp_env` closure.
fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Runtime::new().unwrap().block_on(future)
}

#[test]
#[serial]
fn test_mutable_load_sets_process_environment() {
    let name = "_DOTENV_IT_MUTABLE";
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".env"), format!("{name}=from-file")).unwrap();

    temp_env::with_var_unset(name, || {
        let dotenv = Dotenv::create_mutable([dir.path()], None, true, None);
        block_on(dotenv.load()).unwrap();

        assert_eq!(std::env::var(name).as_deref(), Ok("from-file"));
    });
}

#[test]
#[serial]
fn test_mutable_load_interpolates_newly_written_values() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".env"),
        "_DOTENV_IT_MODE=new\n_DOTENV_IT_COPY=\"${_DOTENV_IT_MODE}\"\n",
    )
    .unwrap();

    temp_env::with_vars(
        [("_DOTENV_IT_MODE", Some("old")), ("_DOTENV_IT_COPY", None)],
        || {
            let dotenv = Dotenv::create_mutable([dir.path()], None, true, None);
            let loaded = block_on(dotenv.load()).unwrap();

            assert_eq!(loaded.get("_DOTENV_IT_COPY").map(String::as_str), Some("new"));
            assert_eq!(std::env::var("_DOTENV_IT_MODE").as_deref(), Ok("new"));
            assert_eq!(std::env::var("_DOTENV_IT_COPY").as_deref(), Ok("new"));
        },
    );
}

#[test]
#[serial]
fn test_immutable_load_keeps_existing_process_values() {
    let name = "_DOTENV_IT_IMMUTABLE";
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".env"), format!("{name}=from-file")).unwrap();

    temp_env::with_var(name, Some("preset"), || {
        let dotenv = Dotenv::create_immutable([dir.path()], None, true, None);
        let loaded = block_on(dotenv.load()).unwrap();

        assert!(!loaded.contains_key(name));
        assert_eq!(std::env::var(name).as_deref(), Ok("preset"));
    });
}

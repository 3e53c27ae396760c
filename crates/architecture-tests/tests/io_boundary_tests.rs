//! Purpose: Enforce that env-file I/O only happens through the `Filesystem` capability.
//!
//! The store layer receives its filesystem by injection so tests can count and order
//! probes. A direct `std::fs`/`tokio::fs` call anywhere else in the store would bypass
//! that and make probe-order guarantees untestable.
//!
//! Non-scope: This test does not verify runtime behavior; it only checks source code
//! patterns. Code after the first `#[cfg(test)]` in a file is ignored.
//!
//! Invariants:
//! - Only `store/filesystem.rs` may call into `std::fs` or `tokio::fs`.
//! - Library code never writes to stdout/stderr; diagnostics go through `tracing`.

use std::fs;
use std::path::{Path, PathBuf};

/// Files allowed to perform direct filesystem I/O, with justification.
const IO_ALLOWED_FILES: &[(&str, &str)] = &[(
    "store/filesystem.rs",
    "Home of the Filesystem trait and its tokio-backed implementation",
)];

const DIRECT_IO_PATTERNS: &[&str] = &["std::fs", "tokio::fs", "File::open"];

const STDIO_PATTERNS: &[&str] = &["println!", "eprintln!", "print!(", "dbg!("];

#[test]
fn test_store_io_goes_through_filesystem_capability() {
    let store_dir = library_src().join("store");
    assert!(
        store_dir.exists(),
        "store/ directory not found at {:?}",
        store_dir
    );

    let mut violations = Vec::new();

    for path in rust_files(&store_dir) {
        let path_str = path.to_string_lossy().replace('\\', "/");
        if IO_ALLOWED_FILES
            .iter()
            .any(|(suffix, _)| path_str.ends_with(suffix))
        {
            continue;
        }

        let content = non_test_source(&path);
        for pattern in DIRECT_IO_PATTERNS {
            if content.contains(pattern) {
                violations.push(format!(
                    "{}: uses {} - read files through the injected Filesystem instead",
                    path.display(),
                    pattern
                ));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "Found direct filesystem access in the store layer:\n{}",
        violations.join("\n")
    );
}

#[test]
fn test_library_code_logs_through_tracing() {
    let mut violations = Vec::new();

    for path in rust_files(&library_src()) {
        if path.ends_with("lib.rs") {
            // Crate docs contain a `no_run` usage example.
            continue;
        }
        let content = non_test_source(&path);
        for pattern in STDIO_PATTERNS {
            if content.contains(pattern) {
                violations.push(format!(
                    "{}: uses {} - emit a tracing event instead",
                    path.display(),
                    pattern
                ));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "Found direct stdio output in library code:\n{}",
        violations.join("\n")
    );
}

#[test]
fn test_allowed_files_list_is_consistent() {
    for (pattern, justification) in IO_ALLOWED_FILES {
        assert!(!pattern.is_empty(), "Allowed file pattern must not be empty");
        assert!(
            !justification.is_empty(),
            "Justification for '{}' must not be empty",
            pattern
        );
        assert!(
            library_src().join(pattern).exists(),
            "Allowed file '{}' does not exist",
            pattern
        );
    }
}

/// Source directory of the `async-dotenv` library crate.
fn library_src() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("dotenv")
        .join("src")
}

/// Source text of `path` up to its first `#[cfg(test)]` item.
fn non_test_source(path: &Path) -> String {
    let content = fs::read_to_string(path).expect("Failed to read file");
    match content.find("#[cfg(test)]") {
        Some(idx) => content[..idx].to_string(),
        None => content,
    }
}

/// Recursively find all .rs files in a directory.
fn rust_files(dir: &Path) -> Vec<PathBuf> {
    walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "rs"))
        .map(|e| e.into_path())
        .collect()
}

//! Centralized constants for env-file discovery.

// =============================================================================
// File Names
// =============================================================================

/// Conventional env-file name used by `StoreBuilder::with_default_name()`.
pub const DEFAULT_NAME: &str = ".env";

// =============================================================================
// Environment Configuration
// =============================================================================

/// Search directories, in the platform's path-list syntax.
pub const ENV_SEARCH_PATH: &str = "DOTENV_PATH";

/// Comma-separated candidate file names.
pub const ENV_FILE_NAMES: &str = "DOTENV_FILENAMES";

/// Whether to stop at the first readable file.
pub const ENV_SHORT_CIRCUIT: &str = "DOTENV_SHORT_CIRCUIT";

/// Encoding label applied to every candidate file.
pub const ENV_FILE_ENCODING: &str = "DOTENV_ENCODING";

//! Byte-to-text validation for env-file content.
//!
//! Responsibilities:
//! - Decode raw file bytes into UTF-8 text, strictly (no replacement characters).
//! - Resolve declared encoding labels through the WHATWG label table.
//!
//! Invariants:
//! - Without a declared label, input must already be valid UTF-8.
//! - A leading byte-order mark is removed from the decoded text.

use encoding_rs::Encoding;
use thiserror::Error;

const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Errors produced while validating file bytes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// The declared label does not name a known encoding.
    #[error("Illegal character encoding [{0}] specified.")]
    UnknownLabel(String),

    /// The bytes are not valid in the resolved encoding.
    #[error("File content is not valid {encoding}.")]
    Malformed { encoding: &'static str },

    /// The filesystem capability refused the content as text.
    #[error("{0}")]
    Rejected(String),
}

/// Decode `bytes` into UTF-8 text using the declared encoding label, or UTF-8 when `None`.
pub fn to_utf8(bytes: &[u8], label: Option<&str>) -> Result<String, EncodingError> {
    let encoding = match label {
        Some(label) => Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| EncodingError::UnknownLabel(label.to_string()))?,
        None => encoding_rs::UTF_8,
    };

    let decoded = encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .ok_or(EncodingError::Malformed {
            encoding: encoding.name(),
        })?;

    Ok(match decoded.strip_prefix(BYTE_ORDER_MARK) {
        Some(rest) => rest.to_string(),
        None => decoded.into_owned(),
    })
}

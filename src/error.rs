//! Error types for erlterm
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using CodecError
pub type Result<T> = std::result::Result<T, CodecError>;

/// Unified error type for encode/decode/transport operations
///
/// Both directions are all-or-nothing: on failure no partial term and no
/// truncated byte sequence is ever handed back to the caller.
#[derive(Debug, Error)]
pub enum CodecError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Decode Errors
    // -------------------------------------------------------------------------
    #[error("Bad version byte: expected {expected}, found {found}")]
    VersionMismatch { expected: u8, found: u8 },

    #[error("Unknown tag {tag} at offset {offset}")]
    UnknownTag { tag: u8, offset: usize },

    #[error("Unsupported tag {tag} ({name})")]
    UnsupportedTag { tag: u8, name: &'static str },

    #[error("Buffer underrun at offset {offset}: needed {needed} bytes, {available} available")]
    BufferUnderrun {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Improper list: tail is not the empty list")]
    ImproperList,

    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Malformed float literal at offset {offset}")]
    InvalidFloat { offset: usize },

    // -------------------------------------------------------------------------
    // Encode Errors
    // -------------------------------------------------------------------------
    #[error("Cannot encode {kind}: {reason}")]
    UnsupportedValue { kind: &'static str, reason: String },

    // -------------------------------------------------------------------------
    // Shared Errors
    // -------------------------------------------------------------------------
    #[error("Compression error: {0}")]
    Compression(String),

    #[error("Nesting depth exceeded limit of {limit}")]
    DepthExceeded { limit: usize },

    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("Frame of {len} bytes exceeds maximum of {max}")]
    FrameTooLarge { len: usize, max: usize },
}

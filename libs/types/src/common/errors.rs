//! Error types for identifier validation
//!
//! Identifiers arrive from hosts as raw bytes or hex strings; malformed input
//! is reported here rather than silently truncated or padded.

use thiserror::Error;

/// Errors that can occur while constructing an identifier
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Input is not valid hexadecimal
    #[error("Invalid hex string '{input}': {reason}")]
    InvalidHex { input: String, reason: String },

    /// Decoded input has the wrong number of bytes
    #[error("Invalid identifier length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

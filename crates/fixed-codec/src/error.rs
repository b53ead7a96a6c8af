//! Error types for fixed-width encoding/decoding and GUID text parsing.

use thiserror::Error;

/// Stable error codes for decode failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// E001: Buffer shorter than the requested decode
    InsufficientLength,
    /// E002: Start position outside the buffer
    InvalidOffset,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::InsufficientLength => "E001",
            ErrorCode::InvalidOffset => "E002",
        }
    }
}

/// Error during binary decoding.
///
/// Both variants are raised before any byte is read, so a failed decode never
/// yields a partial value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("[E001] insufficient length reading {context}: need {needed} bytes, {available} available")]
    InsufficientLength {
        context: &'static str,
        needed: usize,
        available: usize,
    },

    #[error("[E002] offset {offset} out of range for buffer of length {len}")]
    InvalidOffset { offset: usize, len: usize },
}

impl DecodeError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DecodeError::InsufficientLength { .. } => ErrorCode::InsufficientLength,
            DecodeError::InvalidOffset { .. } => ErrorCode::InvalidOffset,
        }
    }
}

/// Error during binary encoding into a caller-supplied buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("output buffer too small: need {needed} bytes, {available} available")]
    BufferTooSmall { needed: usize, available: usize },
}

/// Error parsing the textual form of a GUID.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseGuidError {
    #[error("invalid GUID length: expected 32 hex digits, found {len}")]
    InvalidLength { len: usize },

    #[error("invalid character {found:?} at position {index}")]
    InvalidCharacter { found: char, index: usize },

    #[error("invalid group layout: expected 8-4-4-4-12")]
    InvalidGroup,
}

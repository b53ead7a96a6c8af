//! Fixed-width binary codec for GUIDs and little-endian integers.
//!
//! This crate decodes and encodes two fixed-size binary shapes:
//! - a 128-bit GUID in its 16-byte mixed-endian layout
//!   (`u32` LE, `u16` LE, `u16` LE, 8 raw bytes)
//! - a 32-bit unsigned integer in little-endian order at an offset
//!
//! # Quick Start
//!
//! ```rust
//! use fixed_codec::{decode_guid, decode_uint32_le, encode_guid};
//!
//! let bytes = [
//!     0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08,
//!     0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x0E, 0x0F, 0x10,
//! ];
//! let guid = decode_guid(&bytes).unwrap();
//! assert_eq!(guid.to_string(), "04030201-0605-0807-090a-0b0c0d0e0f10");
//! assert_eq!(encode_guid(&guid), bytes);
//!
//! assert_eq!(decode_uint32_le(&[0x00, 0x78, 0x56, 0x34, 0x12], 1).unwrap(), 0x12345678);
//! ```
//!
//! # Modules
//!
//! - [`model`]: The [`Guid`] value type
//! - [`codec`]: Decoders, encoders and the GUID staging strategies
//! - [`error`]: Error types
//! - [`limits`]: Size constants
//!
//! # Staging strategies
//!
//! GUID decoding can stage input bytes on the heap, in a pooled buffer, on
//! the stack (zeroed or uninitialized), or read them in place. All strategies
//! return identical values; pick one with [`DecodeOptions`].
//!
//! # Errors
//!
//! Length and offset are validated before any byte is read. Failures are
//! reported as [`DecodeError::InsufficientLength`] or
//! [`DecodeError::InvalidOffset`] and are logged at `debug` level through the
//! `log` facade.

pub mod codec;
pub mod error;
pub mod limits;
pub mod model;

// Re-export commonly used types at crate root
pub use codec::{
    DecodeOptions, GuidStrategy, Reader, ScratchPool, Writer, decode_guid, decode_guid_at,
    decode_guid_with, decode_guid_with_options, decode_uint16_le, decode_uint32_le, encode_guid,
    encode_guid_into, encode_uint32_le_into,
};
pub use error::{DecodeError, EncodeError, ErrorCode, ParseGuidError};
pub use model::Guid;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

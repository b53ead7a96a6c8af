//! Data model types.
//!
//! - [`Guid`]: 128-bit identifier with mixed-endian wire layout

pub mod guid;

pub use guid::Guid;

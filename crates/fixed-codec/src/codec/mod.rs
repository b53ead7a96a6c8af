//! Binary encoding/decoding for fixed-width values.

pub mod guid;
pub mod primitives;
pub mod scratch;

pub use guid::{
    DecodeOptions, GuidStrategy, decode_guid, decode_guid_at, decode_guid_with,
    decode_guid_with_options, encode_guid, encode_guid_into,
};
pub use primitives::{Reader, Writer, decode_uint16_le, decode_uint32_le, encode_uint32_le_into};
pub use scratch::{ScratchLease, ScratchPool};

//! Size constants for fixed-width decoding.

/// Encoded size of a GUID.
pub const GUID_LEN: usize = 16;

/// Encoded size of a `u32`.
pub const U32_LEN: usize = 4;

/// Encoded size of a `u16`.
pub const U16_LEN: usize = 2;

/// Maximum number of idle buffers a [`ScratchPool`](crate::codec::ScratchPool)
/// retains. Buffers returned beyond this are dropped.
pub const MAX_POOLED_BUFFERS: usize = 64;

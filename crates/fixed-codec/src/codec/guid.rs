//! GUID encoding/decoding.
//!
//! [`decode_guid_at`] is the reference decoder: bounds check, then read the
//! four fields through a [`Reader`]. The other [`GuidStrategy`] variants stage
//! the 16 input bytes differently before building the same value, and must
//! always agree with it.

use std::mem::MaybeUninit;
use std::ptr;

use crate::codec::primitives::{Reader, check_bounds};
use crate::codec::scratch::ScratchPool;
use crate::error::{DecodeError, EncodeError};
use crate::limits::GUID_LEN;
use crate::model::Guid;

/// How the 16 input bytes are staged before a [`Guid`] is built from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuidStrategy {
    /// A fresh heap `Vec<u8>` per call.
    HeapBuffer,
    /// A buffer leased from [`ScratchPool::shared`].
    PooledBuffer,
    /// A zero-initialized array on the stack.
    #[default]
    StackBuffer,
    /// An uninitialized array on the stack, fully written before it is read.
    UninitStackBuffer,
    /// Read the input bytes directly as a `Guid` (little-endian targets only).
    Reinterpret,
}

impl GuidStrategy {
    /// Every strategy, in declaration order.
    pub const ALL: [GuidStrategy; 5] = [
        GuidStrategy::HeapBuffer,
        GuidStrategy::PooledBuffer,
        GuidStrategy::StackBuffer,
        GuidStrategy::UninitStackBuffer,
        GuidStrategy::Reinterpret,
    ];

    /// Short name used for bench ids and logs.
    pub fn name(&self) -> &'static str {
        match self {
            GuidStrategy::HeapBuffer => "heap_buffer",
            GuidStrategy::PooledBuffer => "pooled_buffer",
            GuidStrategy::StackBuffer => "stack_buffer",
            GuidStrategy::UninitStackBuffer => "uninit_stack_buffer",
            GuidStrategy::Reinterpret => "reinterpret",
        }
    }
}

/// Options for GUID decoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    pub strategy: GuidStrategy,
}

impl DecodeOptions {
    /// Default options (stack buffer).
    pub fn new() -> Self {
        Self::default()
    }

    /// Options using the direct reinterpretation path.
    pub fn fast() -> Self {
        Self {
            strategy: GuidStrategy::Reinterpret,
        }
    }

    /// Sets the staging strategy.
    pub fn with_strategy(mut self, strategy: GuidStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

// =============================================================================
// DECODING
// =============================================================================

/// Decodes a GUID from the first 16 bytes of `bytes`.
///
/// ```rust
/// use fixed_codec::decode_guid;
///
/// let bytes = [1u8, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16];
/// let guid = decode_guid(&bytes).unwrap();
/// assert_eq!(guid.data1(), 0x04030201);
/// ```
#[inline]
pub fn decode_guid(bytes: &[u8]) -> Result<Guid, DecodeError> {
    decode_guid_at(bytes, 0)
}

/// Decodes a GUID from the 16 bytes starting at `offset`.
pub fn decode_guid_at(bytes: &[u8], offset: usize) -> Result<Guid, DecodeError> {
    check_bounds(bytes, offset, GUID_LEN, "guid")?;
    let mut reader = Reader::at(bytes, offset)?;
    reader.read_guid("guid")
}

/// Decodes a GUID at `offset` using the strategy in `options`.
pub fn decode_guid_with_options(
    bytes: &[u8],
    offset: usize,
    options: &DecodeOptions,
) -> Result<Guid, DecodeError> {
    decode_guid_with(options.strategy, bytes, offset)
}

/// Decodes a GUID at `offset` using an explicit strategy.
pub fn decode_guid_with(
    strategy: GuidStrategy,
    bytes: &[u8],
    offset: usize,
) -> Result<Guid, DecodeError> {
    let range = check_bounds(bytes, offset, GUID_LEN, "guid")?;
    let src = &bytes[range];
    Ok(match strategy {
        GuidStrategy::HeapBuffer => via_heap(src),
        GuidStrategy::PooledBuffer => via_pool(src, ScratchPool::shared()),
        GuidStrategy::StackBuffer => via_stack(src),
        GuidStrategy::UninitStackBuffer => {
            let mut scratch = MaybeUninit::uninit();
            via_uninit(src, &mut scratch)
        }
        GuidStrategy::Reinterpret => via_reinterpret(src),
    })
}

// Each helper below receives exactly GUID_LEN bytes; check_bounds has
// already run.

fn via_heap(src: &[u8]) -> Guid {
    let mut buf = vec![0u8; GUID_LEN];
    buf.copy_from_slice(src);
    let mut staged = [0u8; GUID_LEN];
    staged.copy_from_slice(&buf);
    Guid::from_bytes(staged)
}

fn via_pool(src: &[u8], pool: &ScratchPool) -> Guid {
    let mut lease = pool.lease();
    // Full overwrite: the lease may hold a previous borrower's bytes.
    lease.copy_from_slice(src);
    Guid::from_bytes(*lease)
}

fn via_stack(src: &[u8]) -> Guid {
    let mut staged = [0u8; GUID_LEN];
    staged.copy_from_slice(src);
    Guid::from_bytes(staged)
}

/// Stages `src` into caller-provided, possibly uninitialized memory.
///
/// All 16 bytes of `scratch` are written before any is read, so its prior
/// contents never reach the result.
fn via_uninit(src: &[u8], scratch: &mut MaybeUninit<[u8; GUID_LEN]>) -> Guid {
    debug_assert_eq!(src.len(), GUID_LEN);
    // SAFETY: `src` has exactly GUID_LEN bytes and `scratch` is GUID_LEN bytes
    // of exclusively borrowed memory; the regions cannot overlap. After the
    // copy every byte of `scratch` is initialized.
    let staged = unsafe {
        ptr::copy_nonoverlapping(src.as_ptr(), scratch.as_mut_ptr().cast::<u8>(), GUID_LEN);
        scratch.assume_init_ref()
    };
    Guid::from_bytes(*staged)
}

#[cfg(target_endian = "little")]
fn via_reinterpret(src: &[u8]) -> Guid {
    debug_assert_eq!(src.len(), GUID_LEN);
    // SAFETY: `Guid` is `repr(C)` with fields u32, u16, u16, [u8; 8] and no
    // padding, so it is 16 bytes and every bit pattern is valid. On a
    // little-endian target its in-memory layout is the wire layout.
    // `read_unaligned` removes the alignment requirement on `src`.
    unsafe { ptr::read_unaligned(src.as_ptr().cast::<Guid>()) }
}

#[cfg(not(target_endian = "little"))]
fn via_reinterpret(src: &[u8]) -> Guid {
    via_stack(src)
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes a GUID to its 16-byte wire layout.
#[inline]
pub fn encode_guid(guid: &Guid) -> [u8; GUID_LEN] {
    guid.to_bytes()
}

/// Writes a GUID into the first 16 bytes of `out`.
pub fn encode_guid_into(guid: &Guid, out: &mut [u8]) -> Result<(), EncodeError> {
    if out.len() < GUID_LEN {
        return Err(EncodeError::BufferTooSmall {
            needed: GUID_LEN,
            available: out.len(),
        });
    }
    out[..GUID_LEN].copy_from_slice(&guid.to_bytes());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::primitives::Writer;
    use proptest::prelude::*;

    const SAMPLE: [u8; 16] = [
        0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x0E, 0x0F,
        0x10,
    ];

    const SENTINEL: u8 = 0xA5;

    #[test]
    fn test_decode_sample() {
        let g = decode_guid(&SAMPLE).unwrap();
        assert_eq!(g.data1(), 0x04030201);
        assert_eq!(g.data2(), 0x0605);
        assert_eq!(g.data3(), 0x0807);
        assert_eq!(g.data4(), &[0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x0E, 0x0F, 0x10]);
    }

    #[test]
    fn test_all_strategies_decode_sample() {
        let expected = decode_guid(&SAMPLE).unwrap();
        for strategy in GuidStrategy::ALL {
            assert_eq!(
                decode_guid_with(strategy, &SAMPLE, 0).unwrap(),
                expected,
                "strategy {}",
                strategy.name()
            );
        }
    }

    #[test]
    fn test_boundary_lengths() {
        assert!(decode_guid(&SAMPLE).is_ok());
        assert_eq!(
            decode_guid(&SAMPLE[..15]),
            Err(DecodeError::InsufficientLength {
                context: "guid",
                needed: 16,
                available: 15
            })
        );
        for strategy in GuidStrategy::ALL {
            assert!(matches!(
                decode_guid_with(strategy, &SAMPLE[..15], 0),
                Err(DecodeError::InsufficientLength { available: 15, .. })
            ));
        }
    }

    #[test]
    fn test_longer_buffer_uses_first_sixteen() {
        let mut data = SAMPLE.to_vec();
        data.extend_from_slice(&[0xff; 8]);
        assert_eq!(decode_guid(&data).unwrap(), Guid::from_bytes(SAMPLE));
    }

    #[test]
    fn test_decode_at_offset() {
        let mut data = vec![0xEE; 3];
        data.extend_from_slice(&SAMPLE);
        assert_eq!(decode_guid_at(&data, 3).unwrap(), Guid::from_bytes(SAMPLE));
        assert!(matches!(
            decode_guid_at(&data, 4),
            Err(DecodeError::InsufficientLength { available: 15, .. })
        ));
        assert!(matches!(
            decode_guid_at(&data, data.len()),
            Err(DecodeError::InvalidOffset { .. })
        ));
    }

    #[test]
    fn test_options() {
        assert_eq!(DecodeOptions::default().strategy, GuidStrategy::StackBuffer);
        let opts = DecodeOptions::new().with_strategy(GuidStrategy::PooledBuffer);
        assert_eq!(
            decode_guid_with_options(&SAMPLE, 0, &opts).unwrap(),
            decode_guid_with_options(&SAMPLE, 0, &DecodeOptions::fast()).unwrap()
        );
    }

    #[test]
    fn test_encode_into() {
        let g = Guid::from_bytes(SAMPLE);
        let mut out = [0u8; 20];
        encode_guid_into(&g, &mut out).unwrap();
        assert_eq!(&out[..16], &SAMPLE);
        assert_eq!(&out[16..], &[0; 4]);

        let mut small = [0u8; 15];
        assert_eq!(
            encode_guid_into(&g, &mut small),
            Err(EncodeError::BufferTooSmall { needed: 16, available: 15 })
        );
    }

    #[test]
    fn test_writer_roundtrip() {
        let a = Guid::from_bytes(SAMPLE);
        let b = Guid::new_random();

        let mut writer = Writer::new();
        writer.write_guid(&a);
        writer.write_guid(&b);

        let mut reader = Reader::new(writer.as_bytes());
        assert_eq!(reader.read_guid("a").unwrap(), a);
        assert_eq!(reader.read_guid("b").unwrap(), b);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_pooled_sentinel_does_not_leak() {
        let pool = ScratchPool::new(4);
        pool.seed(SENTINEL);
        let g = via_pool(&SAMPLE, &pool);
        assert_eq!(g.to_bytes(), SAMPLE);
        // The lease went back, now holding the input bytes.
        assert_eq!(pool.idle_len(), 1);
    }

    #[test]
    fn test_uninit_sentinel_does_not_leak() {
        let mut scratch = MaybeUninit::new([SENTINEL; GUID_LEN]);
        let g = via_uninit(&SAMPLE, &mut scratch);
        assert_eq!(g.to_bytes(), SAMPLE);
    }

    proptest! {
        #[test]
        fn prop_encode_decode_roundtrip(bytes: [u8; 16]) {
            let g = Guid::from_bytes(bytes);
            prop_assert_eq!(decode_guid(&encode_guid(&g)).unwrap(), g);
        }

        #[test]
        fn prop_strategies_agree(
            data in proptest::collection::vec(any::<u8>(), 16..48),
            offset in 0usize..32,
        ) {
            let oracle = decode_guid_at(&data, offset);
            for strategy in GuidStrategy::ALL {
                prop_assert_eq!(decode_guid_with(strategy, &data, offset), oracle.clone());
            }
        }

        #[test]
        fn prop_sentinel_never_leaks(bytes: [u8; 16], sentinel: u8) {
            let pool = ScratchPool::new(2);
            pool.seed(sentinel);
            prop_assert_eq!(via_pool(&bytes, &pool).to_bytes(), bytes);

            let mut scratch = MaybeUninit::new([sentinel; GUID_LEN]);
            prop_assert_eq!(via_uninit(&bytes, &mut scratch).to_bytes(), bytes);
        }
    }
}

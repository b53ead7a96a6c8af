//! Primitive encoding/decoding for fixed-width little-endian values.

use log::debug;

use crate::error::{DecodeError, EncodeError};
use crate::limits::{GUID_LEN, U16_LEN, U32_LEN};
use crate::model::Guid;

// =============================================================================
// VALIDATION
// =============================================================================

/// Checks that `width` bytes are available at `offset` and returns the range.
///
/// An offset at or past the end of a non-empty buffer is an invalid start
/// position; a valid start with too few bytes after it is a short buffer.
/// An empty buffer always reports a short buffer at offset 0.
#[inline]
pub fn check_bounds(
    data: &[u8],
    offset: usize,
    width: usize,
    context: &'static str,
) -> Result<std::ops::Range<usize>, DecodeError> {
    let len = data.len();
    if offset >= len && !(offset == 0 && len == 0) {
        debug!("rejecting {} decode: offset {} outside buffer of {}", context, offset, len);
        return Err(DecodeError::InvalidOffset { offset, len });
    }
    let available = len - offset;
    if available < width {
        debug!("rejecting {} decode: {} of {} bytes available", context, available, width);
        return Err(DecodeError::InsufficientLength {
            context,
            needed: width,
            available,
        });
    }
    Ok(offset..offset + width)
}

// =============================================================================
// DECODING
// =============================================================================

/// Reader for decoding fixed-width binary data.
///
/// Wraps a byte slice and provides methods for reading primitives
/// with bounds checking and error handling.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader from a byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Creates a reader positioned at `offset`.
    pub fn at(data: &'a [u8], offset: usize) -> Result<Self, DecodeError> {
        if offset > data.len() {
            return Err(DecodeError::InvalidOffset {
                offset,
                len: data.len(),
            });
        }
        Ok(Self { data, pos: offset })
    }

    /// Returns the current position in the data.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the remaining bytes.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Returns the number of remaining bytes.
    pub fn remaining_len(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns true if all data has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Reads exactly n bytes.
    #[inline]
    pub fn read_bytes(&mut self, n: usize, context: &'static str) -> Result<&'a [u8], DecodeError> {
        let available = self.remaining_len();
        if n > available {
            return Err(DecodeError::InsufficientLength {
                context,
                needed: n,
                available,
            });
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Reads a fixed-size array.
    #[inline]
    pub fn read_array<const N: usize>(&mut self, context: &'static str) -> Result<[u8; N], DecodeError> {
        let bytes = self.read_bytes(N, context)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Reads a little-endian u16.
    #[inline]
    pub fn read_u16_le(&mut self, context: &'static str) -> Result<u16, DecodeError> {
        Ok(u16::from_le_bytes(self.read_array::<U16_LEN>(context)?))
    }

    /// Reads a little-endian u32.
    #[inline]
    pub fn read_u32_le(&mut self, context: &'static str) -> Result<u32, DecodeError> {
        Ok(u32::from_le_bytes(self.read_array::<U32_LEN>(context)?))
    }

    /// Reads a GUID field by field.
    ///
    /// Length is checked up front so a short buffer never consumes a
    /// partial GUID.
    #[inline]
    pub fn read_guid(&mut self, context: &'static str) -> Result<Guid, DecodeError> {
        let available = self.remaining_len();
        if available < GUID_LEN {
            return Err(DecodeError::InsufficientLength {
                context,
                needed: GUID_LEN,
                available,
            });
        }
        let data1 = self.read_u32_le(context)?;
        let data2 = self.read_u16_le(context)?;
        let data3 = self.read_u16_le(context)?;
        let data4 = self.read_array::<8>(context)?;
        Ok(Guid::from_fields(data1, data2, data3, data4))
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Writer for encoding binary data.
#[derive(Debug, Clone, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    /// Creates a new writer.
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Creates a new writer with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Returns the written bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Returns a reference to the written bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Returns the number of bytes written.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if no bytes have been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Writes raw bytes.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Writes a little-endian u16.
    #[inline]
    pub fn write_u16_le(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a little-endian u32.
    #[inline]
    pub fn write_u32_le(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a GUID in its 16-byte wire layout.
    #[inline]
    pub fn write_guid(&mut self, guid: &Guid) {
        self.buf.extend_from_slice(&guid.to_bytes());
    }
}

// =============================================================================
// FREE FUNCTIONS
// =============================================================================

/// Decodes a little-endian u32 starting at `offset`.
///
/// Fails with [`DecodeError::InvalidOffset`] when `offset` is not inside the
/// buffer and with [`DecodeError::InsufficientLength`] when fewer than four
/// bytes follow it.
#[inline]
pub fn decode_uint32_le(bytes: &[u8], offset: usize) -> Result<u32, DecodeError> {
    let range = check_bounds(bytes, offset, U32_LEN, "u32")?;
    let b = &bytes[range];
    Ok(u32::from(b[0]) | u32::from(b[1]) << 8 | u32::from(b[2]) << 16 | u32::from(b[3]) << 24)
}

/// Decodes a little-endian u16 starting at `offset`.
#[inline]
pub fn decode_uint16_le(bytes: &[u8], offset: usize) -> Result<u16, DecodeError> {
    let range = check_bounds(bytes, offset, U16_LEN, "u16")?;
    let b = &bytes[range];
    Ok(u16::from(b[0]) | u16::from(b[1]) << 8)
}

/// Writes `value` little-endian into the first four bytes of `out`.
pub fn encode_uint32_le_into(value: u32, out: &mut [u8]) -> Result<(), EncodeError> {
    if out.len() < U32_LEN {
        return Err(EncodeError::BufferTooSmall {
            needed: U32_LEN,
            available: out.len(),
        });
    }
    out[..U32_LEN].copy_from_slice(&value.to_le_bytes());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_u32_le_basic() {
        assert_eq!(decode_uint32_le(&[0x78, 0x56, 0x34, 0x12], 0), Ok(0x12345678));
    }

    #[test]
    fn test_u32_le_offset() {
        let data = [0x00, 0x78, 0x56, 0x34, 0x12];
        assert_eq!(decode_uint32_le(&data, 1), Ok(0x12345678));
    }

    #[test]
    fn test_u32_le_short_after_offset() {
        let data = [0x00, 0x78, 0x56, 0x34, 0x12];
        assert_eq!(
            decode_uint32_le(&data, 2),
            Err(DecodeError::InsufficientLength {
                context: "u32",
                needed: 4,
                available: 3
            })
        );
    }

    #[test]
    fn test_u32_le_offset_out_of_range() {
        let data = [0u8; 5];
        assert_eq!(
            decode_uint32_le(&data, 5),
            Err(DecodeError::InvalidOffset { offset: 5, len: 5 })
        );
        assert!(matches!(
            decode_uint32_le(&data, usize::MAX),
            Err(DecodeError::InvalidOffset { .. })
        ));
    }

    #[test]
    fn test_u32_le_empty_buffer() {
        assert!(matches!(
            decode_uint32_le(&[], 0),
            Err(DecodeError::InsufficientLength { available: 0, .. })
        ));
    }

    #[test]
    fn test_u32_ascii_body() {
        // "123456789101112" read from index 3 is "4567"
        let body = b"123456789101112";
        assert_eq!(decode_uint32_le(body, 3), Ok(u32::from_le_bytes(*b"4567")));
    }

    #[test]
    fn test_u16_le() {
        assert_eq!(decode_uint16_le(&[0xff, 0x34, 0x12], 1), Ok(0x1234));
        assert!(matches!(
            decode_uint16_le(&[0x34, 0x12], 1),
            Err(DecodeError::InsufficientLength { needed: 2, available: 1, .. })
        ));
    }

    #[test]
    fn test_encode_u32_into() {
        let mut out = [0u8; 6];
        encode_uint32_le_into(0x12345678, &mut out).unwrap();
        assert_eq!(out, [0x78, 0x56, 0x34, 0x12, 0, 0]);

        let mut small = [0u8; 3];
        assert_eq!(
            encode_uint32_le_into(1, &mut small),
            Err(EncodeError::BufferTooSmall { needed: 4, available: 3 })
        );
    }

    #[test]
    fn test_reader_sequence() {
        let mut writer = Writer::new();
        writer.write_u32_le(0xdeadbeef);
        writer.write_u16_le(0xcafe);
        writer.write_bytes(&[1, 2, 3]);

        let mut reader = Reader::new(writer.as_bytes());
        assert_eq!(reader.read_u32_le("a").unwrap(), 0xdeadbeef);
        assert_eq!(reader.read_u16_le("b").unwrap(), 0xcafe);
        assert_eq!(reader.remaining(), &[1, 2, 3]);
        assert!(matches!(
            reader.read_u32_le("c"),
            Err(DecodeError::InsufficientLength { needed: 4, available: 3, .. })
        ));
        // Failed read does not advance
        assert_eq!(reader.position(), 6);
    }

    #[test]
    fn test_reader_guid_short_does_not_advance() {
        let data = [0u8; 15];
        let mut reader = Reader::new(&data);
        assert!(reader.read_guid("guid").is_err());
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_reader_at_past_end() {
        assert!(Reader::at(&[0u8; 4], 4).is_ok());
        assert!(matches!(
            Reader::at(&[0u8; 4], 5),
            Err(DecodeError::InvalidOffset { offset: 5, len: 4 })
        ));
    }

    proptest! {
        #[test]
        fn prop_u32_matches_std(data in proptest::collection::vec(any::<u8>(), 0..32), offset in 0usize..40) {
            let ours = decode_uint32_le(&data, offset);
            match data.get(offset..offset.saturating_add(4)) {
                Some(b) if offset < data.len() => {
                    let expected = u32::from_le_bytes([b[0], b[1], b[2], b[3]]);
                    prop_assert_eq!(ours, Ok(expected));
                }
                _ => prop_assert!(ours.is_err()),
            }
        }

        #[test]
        fn prop_u32_encode_decode(value: u32) {
            let mut out = [0u8; 4];
            encode_uint32_le_into(value, &mut out).unwrap();
            prop_assert_eq!(decode_uint32_le(&out, 0), Ok(value));
        }
    }
}

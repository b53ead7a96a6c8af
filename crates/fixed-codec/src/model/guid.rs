//! The GUID value type and its textual form.
//!
//! A GUID is stored as four fields whose 16-byte wire layout is mixed-endian:
//! `data1` (u32 LE), `data2` (u16 LE), `data3` (u16 LE), then `data4` as
//! eight raw bytes. This is not the big-endian RFC 4122 byte order.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use uuid::Uuid;

use crate::error::ParseGuidError;
use crate::limits::GUID_LEN;

/// A 128-bit globally-unique identifier.
///
/// `#[repr(C)]` with no padding: size 16, alignment 4. Equality, hashing and
/// ordering all operate on the 16-byte wire representation.
#[derive(Clone, Copy)]
#[repr(C)]
pub struct Guid {
    data1: u32,
    data2: u16,
    data3: u16,
    data4: [u8; 8],
}

const _: () = assert!(std::mem::size_of::<Guid>() == GUID_LEN);

impl Guid {
    /// The all-zero GUID.
    pub const NIL: Guid = Guid::from_fields(0, 0, 0, [0; 8]);

    /// Builds a GUID from its four fields.
    pub const fn from_fields(data1: u32, data2: u16, data3: u16, data4: [u8; 8]) -> Self {
        Self {
            data1,
            data2,
            data3,
            data4,
        }
    }

    /// Builds a GUID from its 16-byte wire layout.
    pub const fn from_bytes(b: [u8; GUID_LEN]) -> Self {
        Self {
            data1: u32::from_le_bytes([b[0], b[1], b[2], b[3]]),
            data2: u16::from_le_bytes([b[4], b[5]]),
            data3: u16::from_le_bytes([b[6], b[7]]),
            data4: [b[8], b[9], b[10], b[11], b[12], b[13], b[14], b[15]],
        }
    }

    /// Generates a random (version 4) GUID.
    pub fn new_random() -> Self {
        Self::from(Uuid::new_v4())
    }

    pub const fn data1(&self) -> u32 {
        self.data1
    }

    pub const fn data2(&self) -> u16 {
        self.data2
    }

    pub const fn data3(&self) -> u16 {
        self.data3
    }

    pub const fn data4(&self) -> &[u8; 8] {
        &self.data4
    }

    /// Returns the 16-byte wire layout.
    pub const fn to_bytes(&self) -> [u8; GUID_LEN] {
        let a = self.data1.to_le_bytes();
        let b = self.data2.to_le_bytes();
        let c = self.data3.to_le_bytes();
        let d = self.data4;
        [
            a[0], a[1], a[2], a[3], b[0], b[1], c[0], c[1], d[0], d[1], d[2], d[3], d[4], d[5],
            d[6], d[7],
        ]
    }

    /// Returns true for [`Guid::NIL`].
    pub fn is_nil(&self) -> bool {
        *self == Self::NIL
    }
}

impl Default for Guid {
    fn default() -> Self {
        Self::NIL
    }
}

impl PartialEq for Guid {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for Guid {}

impl Hash for Guid {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_bytes().hash(state);
    }
}

impl PartialOrd for Guid {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Guid {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_bytes().cmp(&other.to_bytes())
    }
}

// =============================================================================
// UUID INTEROP
// =============================================================================

impl From<Uuid> for Guid {
    fn from(uuid: Uuid) -> Self {
        Self::from_bytes(uuid.to_bytes_le())
    }
}

impl From<Guid> for Uuid {
    fn from(guid: Guid) -> Self {
        Uuid::from_bytes_le(guid.to_bytes())
    }
}

// =============================================================================
// TEXT
// =============================================================================

impl fmt::Display for Guid {
    /// Lower-case hyphenated `8-4-4-4-12` form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &self.data4;
        write!(
            f,
            "{:08x}-{:04x}-{:04x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
            self.data1, self.data2, self.data3, d[0], d[1], d[2], d[3], d[4], d[5], d[6], d[7]
        )
    }
}

impl fmt::Debug for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Guid({})", self)
    }
}

/// Hyphen positions in the 36-character form.
const HYPHENS: [usize; 4] = [8, 13, 18, 23];

impl FromStr for Guid {
    type Err = ParseGuidError;

    /// Parses `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`, the same wrapped in
    /// braces, or 32 bare hex digits. Hex digits are case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = match s.strip_prefix('{') {
            Some(rest) => rest.strip_suffix('}').ok_or(ParseGuidError::InvalidGroup)?,
            None => s,
        };
        let base = if inner.len() == s.len() { 0 } else { 1 };

        let bytes = inner.as_bytes();
        let hyphenated = match bytes.len() {
            32 => false,
            36 => true,
            _ => {
                let digits = inner.chars().filter(|c| *c != '-').count();
                return Err(ParseGuidError::InvalidLength { len: digits });
            }
        };

        // The RFC text form is big-endian per field, which is exactly the
        // value order of (data1, data2, data3, data4).
        let mut be = [0u8; GUID_LEN];
        let mut nibble = 0usize;
        for (index, &c) in bytes.iter().enumerate() {
            if hyphenated && HYPHENS.contains(&index) {
                if c != b'-' {
                    return Err(ParseGuidError::InvalidGroup);
                }
                continue;
            }
            let value = hex_value(c).ok_or_else(|| ParseGuidError::InvalidCharacter {
                found: inner[index..].chars().next().unwrap_or('?'),
                index: base + index,
            })?;
            be[nibble / 2] |= value << (if nibble % 2 == 0 { 4 } else { 0 });
            nibble += 1;
        }

        Ok(Self {
            data1: u32::from_be_bytes([be[0], be[1], be[2], be[3]]),
            data2: u16::from_be_bytes([be[4], be[5]]),
            data3: u16::from_be_bytes([be[6], be[7]]),
            data4: [be[8], be[9], be[10], be[11], be[12], be[13], be[14], be[15]],
        })
    }
}

#[inline]
fn hex_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

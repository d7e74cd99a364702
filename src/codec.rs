//! Boundary-tag encoding
//!
//! Every block starts with a one-byte header and ends with a one-byte footer.
//! Both bytes hold the same tag:
//!
//! ```text
//!   bit  7 6 5 4 3 2 1 | 0
//!       +--------------+---+
//!       |  block size  | a |   a = 1 when allocated
//!       +--------------+---+
//! ```
//!
//! Seven bits of size bound a block (and therefore the arena) to 127 bytes.

use crate::arena::Arena;
use crate::error::{HeapError, Result};

/// Largest block size a one-byte tag can represent
pub const MAX_BLOCK_SIZE: usize = 127;

/// Header plus footer
pub const TAG_OVERHEAD: usize = 2;

/// Smallest block that carries its own header and footer
pub const MIN_BLOCK_SIZE: usize = TAG_OVERHEAD;

/// Decoded header/footer byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag {
    /// Total block size, header and footer included
    pub size: usize,
    /// Allocation bit
    pub allocated: bool,
}

impl Tag {
    pub fn new(size: usize, allocated: bool) -> Self {
        Tag { size, allocated }
    }

    /// Encode into a single tag byte
    ///
    /// # Errors
    ///
    /// Returns `EncodingOverflow` if `size` needs more than seven bits.
    pub fn encode(&self) -> Result<u8> {
        encode(self.size, self.allocated)
    }

    /// Payload capacity of the block this tag describes
    pub fn payload_size(&self) -> usize {
        self.size.saturating_sub(TAG_OVERHEAD)
    }
}

impl From<u8> for Tag {
    fn from(byte: u8) -> Self {
        Tag {
            size: (byte >> 1) as usize,
            allocated: byte & 1 == 1,
        }
    }
}

/// Encode `size` and `allocated` into a tag byte
pub fn encode(size: usize, allocated: bool) -> Result<u8> {
    if size > MAX_BLOCK_SIZE {
        return Err(HeapError::EncodingOverflow(size));
    }
    Ok(pack(size, allocated))
}

/// Tag byte for a size already known to be at most `MAX_BLOCK_SIZE`
pub(crate) fn pack(size: usize, allocated: bool) -> u8 {
    debug_assert!(size <= MAX_BLOCK_SIZE);
    ((size as u8) << 1) | allocated as u8
}

/// Decode the tag byte stored at `start`
pub fn decode(arena: &Arena, start: usize) -> Tag {
    Tag::from(arena.as_bytes()[start])
}

/// Write the same tag at both ends of `[start, start + size)`
///
/// Nothing is written if the size does not encode.
pub fn write_header_and_footer(
    arena: &mut Arena,
    start: usize,
    size: usize,
    allocated: bool,
) -> Result<()> {
    let byte = encode(size, allocated)?;
    if size == 0 || start + size > arena.len() {
        return Err(HeapError::Corrupted {
            offset: start,
            reason: format!("block of size {} does not fit in the arena", size),
        });
    }

    let bytes = arena.bytes_mut();
    bytes[start] = byte;
    bytes[start + size - 1] = byte;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_layout() {
        assert_eq!(encode(127, false).unwrap(), 0xFE);
        assert_eq!(encode(127, true).unwrap(), 0xFF);
        assert_eq!(encode(6, true).unwrap(), 13);
        assert_eq!(encode(0, false).unwrap(), 0);
    }

    #[test]
    fn test_encode_overflow() {
        assert!(matches!(encode(128, false), Err(HeapError::EncodingOverflow(128))));
        assert!(Tag::new(200, true).encode().is_err());
    }

    #[test]
    fn test_tag_from_byte() {
        let tag = Tag::from(13u8);
        assert_eq!(tag.size, 6);
        assert!(tag.allocated);
        assert_eq!(tag.payload_size(), 4);

        let tag = Tag::from(254u8);
        assert_eq!(tag.size, 127);
        assert!(!tag.allocated);
    }

    #[test]
    fn test_header_and_footer_match() {
        let mut arena = Arena::new(20).unwrap();
        write_header_and_footer(&mut arena, 0, 8, true).unwrap();
        write_header_and_footer(&mut arena, 8, 12, false).unwrap();

        let bytes = arena.as_bytes();
        assert_eq!(bytes[0], bytes[7]);
        assert_eq!(bytes[8], bytes[19]);
        assert_eq!(decode(&arena, 0), Tag::new(8, true));
        assert_eq!(decode(&arena, 8), Tag::new(12, false));
    }

    #[test]
    fn test_write_rejects_block_past_end() {
        let mut arena = Arena::new(10).unwrap();
        let before = arena.as_bytes().to_vec();

        assert!(write_header_and_footer(&mut arena, 4, 8, false).is_err());
        assert_eq!(arena.as_bytes(), &before[..]);
    }
}

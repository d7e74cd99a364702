//! Heap consistency checks
//!
//! Verifies the invariants the allocator maintains between calls. Only raw
//! debug writes (see [`crate::debug`]) can break them.

use crate::arena::Arena;
use crate::codec::{self, MIN_BLOCK_SIZE};
use crate::error::{HeapError, Result};

/// Check that the arena is a well-formed block sequence
///
/// # Rules
/// - Blocks tile `[0, len)` with no gap or overlap
/// - Every block is at least a header plus a footer
/// - Header and footer bytes are identical
/// - No two neighbouring blocks are both free
/// - Free payload is all zeros
///
/// # Errors
///
/// Returns `Corrupted` naming the offset of the first offending block.
pub fn verify(arena: &Arena) -> Result<()> {
    let bytes = arena.as_bytes();
    let mut offset = 0;
    let mut prev_free = false;

    while offset < arena.len() {
        let tag = codec::decode(arena, offset);

        if tag.size < MIN_BLOCK_SIZE {
            return Err(corrupted(offset, format!("block size {} is too small", tag.size)));
        }
        if offset + tag.size > arena.len() {
            return Err(corrupted(
                offset,
                format!("block size {} runs past the arena end", tag.size),
            ));
        }

        let footer = bytes[offset + tag.size - 1];
        if footer != bytes[offset] {
            return Err(corrupted(
                offset,
                format!("header {} and footer {} differ", bytes[offset], footer),
            ));
        }

        if !tag.allocated {
            if prev_free {
                return Err(corrupted(offset, "adjacent free blocks".to_string()));
            }
            let payload = &bytes[offset + 1..offset + tag.size - 1];
            if let Some(pos) = payload.iter().position(|&b| b != 0) {
                return Err(corrupted(
                    offset + 1 + pos,
                    "free payload is not zeroed".to_string(),
                ));
            }
        }

        prev_free = !tag.allocated;
        offset += tag.size;
    }

    Ok(())
}

fn corrupted(offset: usize, reason: String) -> HeapError {
    HeapError::Corrupted { offset, reason }
}

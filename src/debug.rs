//! Raw memory access for debugging
//!
//! These bypass the allocator entirely: a write may land on a header or
//! footer and leave the heap in a state [`crate::validation::verify`] rejects.
//! Only the arena bounds are enforced.

use crate::arena::Arena;
use crate::error::{HeapError, Result};

/// Copy `data` into the arena starting at `offset`
pub fn write_mem(arena: &mut Arena, offset: usize, data: &[u8]) -> Result<()> {
    let end = checked_end(arena, offset, data.len())?;
    arena.bytes_mut()[offset..end].copy_from_slice(data);
    tracing::debug!(offset, len = data.len(), "raw write");
    Ok(())
}

/// Borrow `count` bytes starting at `offset`
pub fn read_mem(arena: &Arena, offset: usize, count: usize) -> Result<&[u8]> {
    let end = checked_end(arena, offset, count)?;
    Ok(&arena.as_bytes()[offset..end])
}

/// Render bytes as decimal values joined by dashes, e.g. `12-0-0-12`
pub fn format_mem(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| b.to_string())
        .collect::<Vec<_>>()
        .join("-")
}

fn checked_end(arena: &Arena, offset: usize, len: usize) -> Result<usize> {
    offset
        .checked_add(len)
        .filter(|&end| end <= arena.len())
        .ok_or(HeapError::InvalidAddress(offset))
}

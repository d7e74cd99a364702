//! Block traversal
//!
//! Adjacency is derived from the tags alone: the header of a block gives its
//! size and therefore the next block, and the footer just before a block gives
//! the size of the previous one. There are no link pointers.

use crate::arena::Arena;
use crate::codec::{self, Tag, TAG_OVERHEAD};
use serde::{Deserialize, Serialize};

/// A block as seen through its header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Offset of the header byte
    pub start: usize,
    /// Total size including header and footer
    pub size: usize,
    pub allocated: bool,
}

impl Block {
    /// Offset handed to callers: the byte after the header
    pub fn payload_offset(&self) -> usize {
        self.start + 1
    }

    pub fn payload_size(&self) -> usize {
        self.size.saturating_sub(TAG_OVERHEAD)
    }

    /// One past the footer
    pub fn end(&self) -> usize {
        self.start + self.size
    }

    pub fn is_free(&self) -> bool {
        !self.allocated
    }
}

/// Decode the block whose header sits at `start`
pub fn block_at(arena: &Arena, start: usize) -> Block {
    let Tag { size, allocated } = codec::decode(arena, start);
    Block {
        start,
        size,
        allocated,
    }
}

/// Start of the block following the one at `start`
///
/// `None` at the end of the arena. A zero size tag also ends the walk since
/// it cannot advance.
pub fn next_block(arena: &Arena, start: usize) -> Option<usize> {
    let size = codec::decode(arena, start).size;
    if size == 0 {
        return None;
    }

    let next = start + size;
    if next >= arena.len() {
        None
    } else {
        Some(next)
    }
}

/// Start of the block preceding the one at `start`, read from its footer
pub fn prev_block(arena: &Arena, start: usize) -> Option<usize> {
    if start == 0 || start > arena.len() {
        return None;
    }

    let prev_size = codec::decode(arena, start - 1).size;
    if prev_size == 0 || prev_size > start {
        return None;
    }
    Some(start - prev_size)
}

/// Walk every block from offset 0
pub fn blocks(arena: &Arena) -> Blocks<'_> {
    Blocks {
        arena,
        current: Some(0),
    }
}

/// Find the block whose header is exactly at `start`
///
/// Only offsets reachable by walking from the arena start count, so a
/// byte in the middle of a payload is never mistaken for a header.
pub fn find_block(arena: &Arena, start: usize) -> Option<Block> {
    blocks(arena)
        .take_while(|block| block.start <= start)
        .find(|block| block.start == start)
}

/// Iterator over blocks in address order
pub struct Blocks<'a> {
    arena: &'a Arena,
    current: Option<usize>,
}

impl<'a> Iterator for Blocks<'a> {
    type Item = Block;

    fn next(&mut self) -> Option<Block> {
        let start = self.current?;
        let block = block_at(self.arena, start);
        self.current = next_block(self.arena, start);
        Some(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::write_header_and_footer;

    /// [alloc 6][free 4][alloc 10] in a 20 byte arena
    fn three_blocks() -> Arena {
        let mut arena = Arena::new(20).unwrap();
        write_header_and_footer(&mut arena, 0, 6, true).unwrap();
        write_header_and_footer(&mut arena, 6, 4, false).unwrap();
        write_header_and_footer(&mut arena, 10, 10, true).unwrap();
        arena
    }

    #[test]
    fn test_next_block() {
        let arena = three_blocks();
        assert_eq!(next_block(&arena, 0), Some(6));
        assert_eq!(next_block(&arena, 6), Some(10));
        assert_eq!(next_block(&arena, 10), None);
    }

    #[test]
    fn test_prev_block() {
        let arena = three_blocks();
        assert_eq!(prev_block(&arena, 0), None);
        assert_eq!(prev_block(&arena, 6), Some(0));
        assert_eq!(prev_block(&arena, 10), Some(6));
    }

    #[test]
    fn test_blocks_iterator() {
        let arena = three_blocks();
        let all: Vec<Block> = blocks(&arena).collect();

        assert_eq!(all.len(), 3);
        assert_eq!(all[1], Block { start: 6, size: 4, allocated: false });
        assert_eq!(all[2].payload_offset(), 11);
        assert_eq!(all[2].payload_size(), 8);
        assert_eq!(all.iter().map(|b| b.size).sum::<usize>(), 20);
    }

    #[test]
    fn test_find_block_only_matches_headers() {
        let arena = three_blocks();
        assert_eq!(find_block(&arena, 6).map(|b| b.size), Some(4));
        assert!(find_block(&arena, 7).is_none());
        assert!(find_block(&arena, 19).is_none());
        assert!(find_block(&arena, 500).is_none());
    }

    #[test]
    fn test_zero_size_tag_stops_walk() {
        let mut arena = three_blocks();
        arena.bytes_mut()[6] = 0;

        let all: Vec<Block> = blocks(&arena).collect();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].size, 0);
    }
}

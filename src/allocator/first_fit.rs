//! First-fit placement
//!
//! Scans blocks in address order and stops at the first free block with
//! enough payload capacity. Cheap, but tends to pile small fragments up at
//! the low end of the arena.

use crate::allocator::PlacementPolicy;
use crate::arena::Arena;
use crate::block;
use crate::error::{HeapError, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FirstFit;

impl PlacementPolicy for FirstFit {
    fn find(&self, arena: &Arena, size: usize) -> Result<usize> {
        let found = block::blocks(arena)
            .find(|block| block.is_free() && block.payload_size() >= size)
            .map(|block| block.start);

        tracing::trace!(size, ?found, "first-fit scan");
        found.ok_or(HeapError::OutOfMemory { requested: size })
    }

    fn name(&self) -> &'static str {
        "first-fit"
    }
}

//! Allocate and release over an explicitly passed arena
//!
//! The engine holds only the placement strategy. The arena is borrowed for
//! the duration of each call, so one engine can drive any number of arenas.
//!
//! ```text
//!   allocate(3) from a free block of 12:
//!
//!   before  [F12|0 0 0 0 0 0 0 0 0 0|F12]
//!   after   [A5|. . .|A5][F7|0 0 0 0 0|F7]
//!            ^ payload offset returned = start + 1
//! ```

use crate::allocator::{Placement, PlacementPolicy};
use crate::arena::Arena;
use crate::block::{self, Block};
use crate::codec::{self, MAX_BLOCK_SIZE, MIN_BLOCK_SIZE, TAG_OVERHEAD};
use crate::error::{HeapError, Result};
use tracing::{debug, warn};

/// Implicit free-list allocator with boundary tags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Allocator {
    placement: Placement,
}

impl Allocator {
    pub fn new(placement: Placement) -> Self {
        Allocator { placement }
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Allocate `size` payload bytes and return the payload offset
    ///
    /// The chosen block is split when the leftover can hold a block of its
    /// own (at least a header and a footer); otherwise the whole block is
    /// handed out.
    ///
    /// # Errors
    ///
    /// - `EncodingOverflow` if `size` itself exceeds what a tag can hold
    /// - `OutOfMemory` if no free block is large enough
    /// - `Corrupted` if the chosen block's tag is not a valid block
    ///
    /// The arena is untouched on error.
    pub fn allocate(&self, arena: &mut Arena, size: usize) -> Result<usize> {
        if size > MAX_BLOCK_SIZE {
            return Err(HeapError::EncodingOverflow(size));
        }
        let needed = size + TAG_OVERHEAD;

        let start = self.placement.find(arena, size)?;
        let block = block::block_at(arena, start);
        check_in_bounds(arena, &block)?;

        let remainder = block.size - needed;
        if remainder >= MIN_BLOCK_SIZE {
            codec::write_header_and_footer(arena, start, needed, true)?;
            codec::write_header_and_footer(arena, start + needed, remainder, false)?;
            debug!(
                size,
                start,
                remainder,
                strategy = self.placement.name(),
                "allocated with split"
            );
        } else {
            codec::write_header_and_footer(arena, start, block.size, true)?;
            debug!(
                size,
                start,
                block_size = block.size,
                strategy = self.placement.name(),
                "allocated whole block"
            );
        }

        Ok(block.payload_offset())
    }

    /// Release the block whose payload starts at `payload_offset`
    ///
    /// The block is merged with a free successor and a free predecessor, and
    /// the payload of the resulting free block is zeroed.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAddress` unless `payload_offset` is the payload start
    /// of an allocated block. Double frees land here too. The arena is
    /// untouched on error.
    pub fn release(&self, arena: &mut Arena, payload_offset: usize) -> Result<()> {
        let start = payload_offset
            .checked_sub(1)
            .ok_or(HeapError::InvalidAddress(payload_offset))?;

        let block = match block::find_block(arena, start) {
            Some(block) if block.allocated => block,
            Some(_) => {
                warn!(payload_offset, "release of a block that is already free");
                return Err(HeapError::InvalidAddress(payload_offset));
            }
            None => {
                warn!(payload_offset, "release of an address that is not a payload start");
                return Err(HeapError::InvalidAddress(payload_offset));
            }
        };
        check_in_bounds(arena, &block)?;

        let mut merged_start = block.start;
        let mut merged_end = block.end();

        if let Some(next) = block::next_block(arena, block.start) {
            let next = block::block_at(arena, next);
            if next.is_free() && next.end() <= arena.len() {
                debug!(start = block.start, next = next.start, "coalescing with next");
                merged_end = next.end();
            }
        }

        if let Some(prev) = block::prev_block(arena, block.start) {
            let prev = block::block_at(arena, prev);
            if prev.is_free() && prev.end() == block.start {
                debug!(start = block.start, prev = prev.start, "coalescing with previous");
                merged_start = prev.start;
            }
        }

        let merged_size = merged_end - merged_start;
        arena.zero(merged_start + 1, merged_end - 1);
        codec::write_header_and_footer(arena, merged_start, merged_size, false)?;

        debug!(
            payload_offset,
            merged_start,
            merged_size,
            "released"
        );
        Ok(())
    }
}

fn check_in_bounds(arena: &Arena, block: &Block) -> Result<()> {
    if block.size < MIN_BLOCK_SIZE {
        return Err(HeapError::Corrupted {
            offset: block.start,
            reason: format!("block size {} is too small", block.size),
        });
    }
    if block.end() > arena.len() {
        return Err(HeapError::Corrupted {
            offset: block.start,
            reason: format!("block size {} runs past the arena end", block.size),
        });
    }
    Ok(())
}

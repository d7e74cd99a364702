//! Best-fit placement

use crate::allocator::PlacementPolicy;
use crate::arena::Arena;
use crate::block::{self, Block};
use crate::error::{HeapError, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BestFit;

impl PlacementPolicy for BestFit {
    /// Smallest sufficient free block; ties go to the lowest address
    fn find(&self, arena: &Arena, size: usize) -> Result<usize> {
        let mut best: Option<Block> = None;

        for candidate in block::blocks(arena) {
            if candidate.allocated || candidate.payload_size() < size {
                continue;
            }
            // Strict less-than keeps the first block among equals
            if best.map_or(true, |b| candidate.payload_size() < b.payload_size()) {
                best = Some(candidate);
            }
        }

        tracing::trace!(size, found = ?best.map(|b| b.start), "best-fit scan");
        best.map(|b| b.start)
            .ok_or(HeapError::OutOfMemory { requested: size })
    }

    fn name(&self) -> &'static str {
        "best-fit"
    }
}

//! Heap introspection
//!
//! - [`snapshot`] lists every block, largest payload first
//! - [`stats`] summarizes usage and external fragmentation

use crate::arena::Arena;
use crate::block;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One line of the block list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockInfo {
    pub payload_size: usize,
    pub payload_offset: usize,
    pub allocated: bool,
}

impl fmt::Display for BlockInfo {
    /// `payload_size-payload_offset-allocated|free`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}",
            self.payload_size,
            self.payload_offset,
            if self.allocated { "allocated" } else { "free" }
        )
    }
}

/// All blocks sorted by descending payload size
///
/// The sort is unstable: blocks with equal payload sizes come out in no
/// particular order.
pub fn snapshot(arena: &Arena) -> Vec<BlockInfo> {
    let mut list: Vec<BlockInfo> = block::blocks(arena)
        .map(|block| BlockInfo {
            payload_size: block.payload_size(),
            payload_offset: block.payload_offset(),
            allocated: block.allocated,
        })
        .collect();

    list.sort_unstable_by(|a, b| b.payload_size.cmp(&a.payload_size));
    list
}

/// Usage summary of an arena
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeapStats {
    pub arena_len: usize,
    pub blocks: usize,
    pub allocated_blocks: usize,
    pub free_blocks: usize,
    /// Payload bytes handed out
    pub allocated_bytes: usize,
    /// Payload bytes available in free blocks
    pub free_bytes: usize,
    pub largest_free_payload: usize,
    /// 0.0 when all free payload is in one block, approaching 1.0 as it
    /// scatters
    pub fragmentation: f64,
}

pub fn stats(arena: &Arena) -> HeapStats {
    let mut stats = HeapStats {
        arena_len: arena.len(),
        blocks: 0,
        allocated_blocks: 0,
        free_blocks: 0,
        allocated_bytes: 0,
        free_bytes: 0,
        largest_free_payload: 0,
        fragmentation: 0.0,
    };

    for block in block::blocks(arena) {
        stats.blocks += 1;
        if block.allocated {
            stats.allocated_blocks += 1;
            stats.allocated_bytes += block.payload_size();
        } else {
            stats.free_blocks += 1;
            stats.free_bytes += block.payload_size();
            stats.largest_free_payload = stats.largest_free_payload.max(block.payload_size());
        }
    }

    if stats.free_bytes > 0 {
        stats.fragmentation =
            1.0 - stats.largest_free_payload as f64 / stats.free_bytes as f64;
    }
    stats
}

impl fmt::Display for HeapStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "arena: {} bytes, {} blocks", self.arena_len, self.blocks)?;
        writeln!(
            f,
            "allocated: {} blocks, {} payload bytes",
            self.allocated_blocks, self.allocated_bytes
        )?;
        writeln!(
            f,
            "free: {} blocks, {} payload bytes (largest {})",
            self.free_blocks, self.free_bytes, self.largest_free_payload
        )?;
        write!(f, "fragmentation: {:.3}", self.fragmentation)
    }
}

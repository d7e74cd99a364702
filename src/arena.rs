//! Fixed-size byte arena backing the simulated heap

use crate::codec::{self, MAX_BLOCK_SIZE, MIN_BLOCK_SIZE};
use crate::error::{HeapError, Result};

/// Default arena length. The whole arena must fit in one block tag.
pub const ARENA_SIZE: usize = 127;

/// The simulated heap
///
/// Owns the bytes and nothing else. Block structure lives entirely inside
/// the bytes and is interpreted by [`crate::codec`] and [`crate::block`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arena {
    bytes: Vec<u8>,
}

impl Arena {
    /// Create an arena of `len` bytes holding one free block
    ///
    /// # Errors
    ///
    /// Returns `InvalidArenaSize` unless `2 <= len <= 127`.
    pub fn new(len: usize) -> Result<Self> {
        if !(MIN_BLOCK_SIZE..=MAX_BLOCK_SIZE).contains(&len) {
            return Err(HeapError::InvalidArenaSize(len));
        }

        Ok(Self::fresh(len))
    }

    /// One free block of `len` bytes; `len` must already be validated
    fn fresh(len: usize) -> Self {
        let mut arena = Arena {
            bytes: vec![0u8; len],
        };
        arena.reset();
        arena
    }

    /// Return to the initial state: one zeroed free block spanning everything
    pub fn reset(&mut self) {
        self.bytes.fill(0);
        let len = self.bytes.len();
        let tag = codec::pack(len, false);
        self.bytes[0] = tag;
        self.bytes[len - 1] = tag;
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Zero `[start, end)`
    pub(crate) fn zero(&mut self, start: usize, end: usize) {
        if start < end {
            self.bytes[start..end].fill(0);
        }
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::fresh(ARENA_SIZE)
    }
}

//! # heapsim - Boundary-Tag Allocator Simulator
//!
//! `heapsim` models, byte for byte, the classic implicit free-list allocator
//! over a fixed arena of at most 127 bytes:
//!
//! - **One-byte boundary tags**: header and footer both hold `(size << 1) | allocated`
//! - **First-fit and best-fit** placement
//! - **Split on allocate** when the leftover can stand as its own block
//! - **Coalesce on release** with both neighbours
//!
//! ```text
//!   offset 0                                                     len
//!   +----+---------+----+----+-----------------------------+----+
//!   | A6 | payload | A6 | F8 |        zeroed payload       | F8 |  ...
//!   +----+---------+----+----+-----------------------------+----+
//!    hdr             ftr  hdr                               ftr
//! ```
//!
//! ## Crate Structure
//!
//! - [`codec`] - tag byte encoding
//! - [`arena`] - the byte buffer
//! - [`block`] - next/previous traversal derived from tags
//! - [`allocator`] - placement strategies and the allocate/release engine
//! - [`snapshot`] - block listing and usage statistics
//! - [`validation`] - heap consistency checker
//! - [`debug`] - raw memory reads and writes
//! - [`command`], [`shell`] - the line-oriented command interpreter
//! - [`config`] - TOML configuration
//!
//! ## Quick Start
//!
//! ```rust
//! use heapsim::{Allocator, Arena, Placement, Result};
//!
//! # fn main() -> Result<()> {
//! let mut arena = Arena::default();
//! let allocator = Allocator::new(Placement::BestFit);
//!
//! let p = allocator.allocate(&mut arena, 10)?;
//! assert_eq!(p, 1);
//!
//! allocator.release(&mut arena, p)?;
//! assert_eq!(arena, Arena::default());
//! # Ok(())
//! # }
//! ```
//!
//! ## Limitations
//!
//! - **Single-threaded**: every call needs exclusive access to the whole arena
//! - **Fixed size**: the arena never grows or shrinks
//! - **No alignment** beyond byte granularity

pub mod allocator;
pub mod arena;
pub mod block;
pub mod codec;
pub mod command;
pub mod config;
pub mod debug;
pub mod error;
pub mod shell;
pub mod snapshot;
pub mod validation;

pub use allocator::{Allocator, BestFit, FirstFit, Placement, PlacementPolicy};
pub use arena::{Arena, ARENA_SIZE};
pub use block::Block;
pub use command::Command;
pub use config::SimConfig;
pub use error::{HeapError, Result};
pub use shell::{Flow, Shell};
pub use snapshot::{BlockInfo, HeapStats};

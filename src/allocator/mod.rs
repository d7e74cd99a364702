//! Placement strategies and the allocator engine
//!
//! The engine is strategy-agnostic:
//! - First-fit: take the lowest-addressed free block that is large enough
//! - Best-fit: take the smallest free block that is large enough

pub mod best_fit;
pub mod engine;
pub mod first_fit;

use crate::arena::Arena;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use best_fit::BestFit;
pub use engine::Allocator;
pub use first_fit::FirstFit;

/// Free block search
///
/// Implementations scan the arena and return the header offset of a free
/// block whose payload capacity is at least `size`.
pub trait PlacementPolicy {
    /// Find a free block with room for `size` payload bytes
    ///
    /// Returns `OutOfMemory` when no free block qualifies.
    fn find(&self, arena: &Arena, size: usize) -> Result<usize>;

    /// Human-readable strategy name
    fn name(&self) -> &'static str;
}

/// Strategy selected once at start-up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Placement {
    #[default]
    #[serde(alias = "FirstFit")]
    FirstFit,
    #[serde(alias = "BestFit")]
    BestFit,
}

impl Placement {
    /// Legacy start-up argument: exactly `BestFit` selects best-fit,
    /// anything else selects first-fit
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            Some("BestFit") => Placement::BestFit,
            _ => Placement::FirstFit,
        }
    }
}

impl PlacementPolicy for Placement {
    fn find(&self, arena: &Arena, size: usize) -> Result<usize> {
        match self {
            Placement::FirstFit => FirstFit.find(arena, size),
            Placement::BestFit => BestFit.find(arena, size),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Placement::FirstFit => FirstFit.name(),
            Placement::BestFit => BestFit.name(),
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Placement {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "first-fit" | "first_fit" | "firstfit" => Ok(Placement::FirstFit),
            "best-fit" | "best_fit" | "bestfit" => Ok(Placement::BestFit),
            _ => Err(format!(
                "Invalid placement strategy '{}'. Valid options: first-fit, best-fit",
                s
            )),
        }
    }
}

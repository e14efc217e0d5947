//! Build configuration for the quadtree
//!
//! Every build carries its own [`Config`], so trees with different minimum
//! cell sizes can be built side by side without interfering.

use crate::{QuadtreeError, Result};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How dead branches are removed after subdivision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum PruneMode {
    /// Remove a child only while the running leaf count of its parent is
    /// still zero after visiting it.
    ///
    /// Once an earlier sibling (in slot order) has contributed a leaf, later
    /// siblings are kept even if their own subtree holds no leaf. This is the
    /// historical behavior and stays the default so existing outputs do not
    /// change.
    #[default]
    Cumulative,
    /// Remove every child whose own subtree holds no leaf.
    PerChild,
}

/// Configuration for a quadtree build
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Nodes whose width is at or below this size become leaves.
    /// Must be finite and greater than zero.
    /// Default: 1.0
    pub min_size: f64,
    /// Starting value for the maximum leaf depth reported by a traversal.
    /// The reported value is only raised above this, never lowered.
    /// Default: 0
    pub initial_max_depth: u32,
    /// Pruning strategy applied after subdivision.
    /// Default: [`PruneMode::Cumulative`]
    pub prune_mode: PruneMode,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl Default for Config {
    fn default() -> Self {
        Self {
            min_size: 1.0,
            initial_max_depth: 0,
            prune_mode: PruneMode::default(),
        }
    }
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl Config {
    /// Default configuration with the given minimum cell size
    pub fn with_min_size(min_size: f64) -> Self {
        Self {
            min_size,
            ..Self::default()
        }
    }

    /// Replace the prune mode
    pub fn prune_mode(mut self, prune_mode: PruneMode) -> Self {
        self.prune_mode = prune_mode;
        self
    }

    /// Replace the initial max depth
    pub fn initial_max_depth(mut self, initial_max_depth: u32) -> Self {
        self.initial_max_depth = initial_max_depth;
        self
    }

    /// Check that the configuration can drive a terminating build
    pub fn validate(&self) -> Result<()> {
        if !self.min_size.is_finite() || self.min_size <= 0.0 {
            return Err(QuadtreeError::InvalidMinSize {
                min_size: self.min_size,
            });
        }
        Ok(())
    }
}

//! Feature Quadtree - Feature-driven spatial subdivision
//!
//! This library partitions a 2D axis-aligned region into a quadtree that only
//! refines where a caller-supplied predicate reports a "feature of interest".
//! After subdivision, branches that lead to no leaf cell are pruned and the
//! surviving hierarchy is flattened into an ordered list of all nodes and an
//! ordered list of leaf nodes.
//!
//! # Architecture
//!
//! - **[`Node`]**: One quadrant of space, owning up to four children
//! - **[`Feature`]**: Extension point deciding where to subdivide and how to derive child payloads
//! - **[`QuadTree`]**: Builder that subdivides, prunes and traverses a root node
//! - **[`Traversal`]**: Pre-order flattening of a built tree into nodes and leaves
//! - **[`Config`]**: Per-build settings (minimum cell size, prune mode, initial max depth)
//!
//! # Example
//!
//! ```
//! use feature_quadtree::{Config, Node, QuadTree, bounds, features};
//!
//! let rect = bounds::try_rect(0.0, 0.0, 8.0, 8.0).unwrap();
//! let near_origin = features::from_fn(|r| r.min().x == 0.0 && r.min().y == 0.0);
//! let tree = QuadTree::build(Node::root(rect, near_origin), Config::with_min_size(4.0)).unwrap();
//!
//! let traversal = tree.traverse();
//! assert_eq!(traversal.leaves().len(), 1);
//! assert_eq!(traversal.max_depth(), 1);
//! ```

pub mod bounds;
mod config;
pub mod features;
mod node;
mod tree;

// Public API exports
pub use config::{Config, PruneMode};
pub use features::{CircleOutline, FeatureFn, PointCluster};
pub use node::{Feature, Node, NodeKind, Quadrant};
pub use tree::{BuildStats, QuadTree, Traversal};

/// Error types for quadtree construction
#[derive(Debug, thiserror::Error)]
pub enum QuadtreeError {
    #[error("Invalid minimum cell size {min_size}: must be finite and greater than zero")]
    InvalidMinSize { min_size: f64 },

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, QuadtreeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_exports() {
        // Verify that all public types are accessible
        let _: fn(f64) -> Config = Config::with_min_size;
        let _: fn() -> Config = Config::default;
        let _: fn(geo::Rect<f64>, ()) -> Node<()> = Node::root;
    }

    #[test]
    fn test_error_messages() {
        let err = QuadtreeError::InvalidMinSize { min_size: -1.0 };
        assert!(err.to_string().contains("-1"));

        let err = QuadtreeError::InvalidGeometry("min_x > max_x".to_string());
        assert_eq!(err.to_string(), "Invalid geometry: min_x > max_x");
    }
}

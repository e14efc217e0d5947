//! Feature Quadtree command line tool
//!
//! Builds a quadtree over a square region centered at the origin, refined
//! around one of the built-in features, and prints what survived pruning.

mod logging;
mod settings;

use clap::Parser;
use feature_quadtree::{CircleOutline, Node, PointCluster, QuadTree, bounds};
use geo::{Coord, Point};
use rand::{Rng, SeedableRng, rngs::StdRng};
use settings::{FeatureCommand, Settings};

fn main() -> anyhow::Result<()> {
    let settings = Settings::parse();
    let _guard = logging::setup_logging_and_profiling();

    tracing::info!("Feature Quadtree v{}", env!("CARGO_PKG_VERSION"));

    let extent = settings.extent;
    let rect = bounds::try_rect(-extent, -extent, extent, extent)?;
    let config = settings.config();

    match &settings.feature {
        FeatureCommand::Circle { radius } => {
            let circle = CircleOutline::new(Coord { x: 0.0, y: 0.0 }, *radius)?;
            tracing::info!("Refining along circle outline of radius {}", radius);
            let tree = QuadTree::build(Node::root(rect, circle), config)?;
            report(&tree, settings.list_leaves);
        }
        FeatureCommand::Points {
            count,
            min_points,
            seed,
        } => {
            let points = random_points(*count, extent, *seed);
            tracing::info!(
                "Refining around {} random points (seed {}, at least {} per cell)",
                points.len(),
                seed,
                min_points
            );
            let cluster = PointCluster::new(points, *min_points)?;
            let tree = QuadTree::build(Node::root(rect, cluster), config)?;
            report(&tree, settings.list_leaves);
        }
    }

    Ok(())
}

/// Uniformly scattered points inside the root square
fn random_points(count: usize, extent: f64, seed: u64) -> Vec<Point<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            Point::new(
                rng.random_range(-extent..=extent),
                rng.random_range(-extent..=extent),
            )
        })
        .collect()
}

/// Print build statistics and, optionally, every leaf
fn report<F>(tree: &QuadTree<F>, list_leaves: bool) {
    let stats = tree.stats();
    tracing::info!(
        "Build finished: {} leaves, {} nodes, max depth {}",
        stats.leaf_count,
        stats.node_count,
        stats.max_depth
    );

    println!(
        "leaves: {}  nodes: {}  max depth: {}  pruned: {}",
        stats.leaf_count, stats.node_count, stats.max_depth, stats.pruned_count
    );

    if list_leaves {
        for leaf in tree.traverse().leaves() {
            let rect = leaf.bounds();
            println!(
                "{} {:.4} {:.4} {:.4} {:.4}",
                leaf.depth(),
                rect.min().x,
                rect.min().y,
                rect.max().x,
                rect.max().y
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_points_stay_in_extent() {
        let points = random_points(100, 2.0, 1);
        assert_eq!(points.len(), 100);
        for point in &points {
            assert!(point.x().abs() <= 2.0 && point.y().abs() <= 2.0);
        }
    }

    #[test]
    fn test_random_points_are_seeded() {
        assert_eq!(random_points(10, 1.0, 42), random_points(10, 1.0, 42));
        assert_ne!(random_points(10, 1.0, 42), random_points(10, 1.0, 43));
    }
}

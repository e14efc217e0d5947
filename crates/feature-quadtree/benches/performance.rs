//! Performance benchmarks for feature-quadtree
//!
//! Run with: cargo bench --package feature-quadtree

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use feature_quadtree::{CircleOutline, Config, Node, PointCluster, PruneMode, QuadTree, bounds};
use geo::{Coord, Point};

/// Generate points along a noisy spiral so clusters form at several scales
fn generate_points(count: usize) -> Vec<Point<f64>> {
    (0..count)
        .map(|i| {
            let t = i as f64 / count as f64;
            let angle = t * 40.0;
            let radius = 0.2 + t * 1.6 + (t * 300.0).sin() * 0.01;
            Point::new(angle.cos() * radius, angle.sin() * radius)
        })
        .collect()
}

// ============================================================================
// Core Benchmarks - Key performance indicators
// ============================================================================

fn bench_circle_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("circle_build");
    let rect = bounds::try_rect(-2.0, -2.0, 2.0, 2.0).unwrap();
    let circle = CircleOutline::new(Coord { x: 0.0, y: 0.0 }, 1.5).unwrap();

    for min_size in [0.05, 0.01, 0.002] {
        group.bench_with_input(
            BenchmarkId::from_parameter(min_size),
            &min_size,
            |b, &min_size| {
                b.iter(|| {
                    QuadTree::build(Node::root(rect, circle), Config::with_min_size(min_size))
                        .unwrap()
                })
            },
        );
    }

    group.finish();
}

fn bench_point_cluster_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("point_cluster_build");
    let rect = bounds::try_rect(-2.0, -2.0, 2.0, 2.0).unwrap();

    for count in [1_000, 10_000] {
        let points = generate_points(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &points, |b, points| {
            b.iter(|| {
                let cluster = PointCluster::new(points.clone(), 4).unwrap();
                QuadTree::build(Node::root(rect, cluster), Config::with_min_size(0.01)).unwrap()
            })
        });
    }

    group.finish();
}

fn bench_prune_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("prune_mode");
    let rect = bounds::try_rect(-2.0, -2.0, 2.0, 2.0).unwrap();
    let circle = CircleOutline::new(Coord { x: 0.3, y: -0.2 }, 1.1).unwrap();

    for mode in [PruneMode::Cumulative, PruneMode::PerChild] {
        let config = Config::with_min_size(0.005).prune_mode(mode);
        group.bench_function(format!("{:?}", mode), |b| {
            b.iter(|| QuadTree::build(Node::root(rect, circle), config.clone()).unwrap())
        });
    }

    group.finish();
}

fn bench_traverse(c: &mut Criterion) {
    let rect = bounds::try_rect(-2.0, -2.0, 2.0, 2.0).unwrap();
    let circle = CircleOutline::new(Coord { x: 0.0, y: 0.0 }, 1.5).unwrap();
    let tree = QuadTree::build(Node::root(rect, circle), Config::with_min_size(0.002)).unwrap();

    c.bench_function("traverse", |b| b.iter(|| tree.traverse().leaves().len()));
}

fn bench_build_many(c: &mut Criterion) {
    let config = Config::with_min_size(0.01);

    c.bench_function("build_many_16", |b| {
        b.iter(|| {
            let roots: Vec<_> = (0..16)
                .map(|i| {
                    let rect = bounds::try_rect(-2.0, -2.0, 2.0, 2.0).unwrap();
                    let radius = 0.5 + i as f64 * 0.08;
                    Node::root(rect, CircleOutline::new(Coord { x: 0.0, y: 0.0 }, radius).unwrap())
                })
                .collect();
            QuadTree::build_many(roots, &config).unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_circle_build,
    bench_point_cluster_build,
    bench_prune_modes,
    bench_traverse,
    bench_build_many,
);
criterion_main!(benches);

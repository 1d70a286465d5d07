//! Differential correctness tests for the k-NN graph builder.
//!
//! Compares `knn_graph_with_params` (brute force and kd-tree searches) against
//! a reference that fully sorts every candidate of every point.

use pointgraph::transforms::SearchStrategy;
use pointgraph::{knn_graph_with_params, Edge, KnnGraphParams, PointCloud};
use rand::prelude::*;

// ────────────────── Full-sort reference ──────────────────

/// O(n^2 log n) reference: rank every candidate by (squared distance, index).
fn reference_edges(points: &[[f32; 3]], k: usize, self_loops: bool) -> Vec<Edge> {
    let mut edges = Vec::new();
    for (i, p) in points.iter().enumerate() {
        let mut ranked: Vec<(f32, usize)> = points
            .iter()
            .enumerate()
            .filter(|&(j, _)| self_loops || j != i)
            .map(|(j, q)| {
                let dx = p[0] - q[0];
                let dy = p[1] - q[1];
                let dz = p[2] - q[2];
                (dx * dx + dy * dy + dz * dz, j)
            })
            .collect();
        ranked.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        edges.extend(ranked.into_iter().take(k).map(|(_, j)| Edge::new(i, j)));
    }
    edges
}

fn random_points(rng: &mut StdRng, n: usize, extent: f32) -> Vec<[f32; 3]> {
    (0..n)
        .map(|_| {
            [
                rng.gen_range(-extent..extent),
                rng.gen_range(-extent..extent),
                rng.gen_range(-extent..extent),
            ]
        })
        .collect()
}

fn grid_points(side: usize) -> Vec<[f32; 3]> {
    let mut pts = Vec::with_capacity(side * side * side);
    for ix in 0..side {
        for iy in 0..side {
            for iz in 0..side {
                pts.push([ix as f32, iy as f32, iz as f32]);
            }
        }
    }
    pts
}

fn build(points: &[[f32; 3]], k: usize, self_loops: bool, search: SearchStrategy) -> Vec<Edge> {
    let params = KnnGraphParams {
        self_loops,
        search,
        ..KnnGraphParams::new(k)
    };
    knn_graph_with_params(&PointCloud::from_points(points), &params)
        .expect("valid input")
        .edges
}

// ────────────────── 1. Differential correctness ──────────────────

#[test]
fn differential_random_small_clouds() {
    let mut rng = StdRng::seed_from_u64(42);

    for trial in 0..200 {
        let n = rng.gen_range(1..80);
        let k = rng.gen_range(1..12);
        let self_loops = rng.gen_bool(0.3);
        let points = random_points(&mut rng, n, 20.0);

        let expected = reference_edges(&points, k, self_loops);
        assert_eq!(
            build(&points, k, self_loops, SearchStrategy::BruteForce),
            expected,
            "trial {}: n={}, k={}, loop={} (brute force)",
            trial,
            n,
            k,
            self_loops
        );
        assert_eq!(
            build(&points, k, self_loops, SearchStrategy::KdTree),
            expected,
            "trial {}: n={}, k={}, loop={} (kd-tree)",
            trial,
            n,
            k,
            self_loops
        );
    }
}

#[test]
fn differential_medium_clouds() {
    let mut rng = StdRng::seed_from_u64(99);

    for trial in 0..5 {
        let n = rng.gen_range(500..1500);
        let k = rng.gen_range(4..16);
        let points = random_points(&mut rng, n, 50.0);

        let expected = reference_edges(&points, k, false);
        assert_eq!(
            build(&points, k, false, SearchStrategy::KdTree),
            expected,
            "trial {}: n={}, k={}",
            trial,
            n,
            k
        );
    }
}

#[test]
fn auto_search_above_threshold_matches_reference() {
    let mut rng = StdRng::seed_from_u64(7);
    let n = pointgraph::transforms::KDTREE_MIN_POINTS + 10;
    let points = random_points(&mut rng, n, 100.0);
    assert_eq!(
        build(&points, 6, false, SearchStrategy::Auto),
        reference_edges(&points, 6, false)
    );
}

// ────────────────── 2. Ties ──────────────────

#[test]
fn grid_ties_resolved_by_index() {
    // Every interior grid point has six neighbours at distance 1.
    let points = grid_points(4);
    for k in [1, 3, 6, 7, 20] {
        let expected = reference_edges(&points, k, false);
        assert_eq!(
            build(&points, k, false, SearchStrategy::BruteForce),
            expected,
            "k={}",
            k
        );
        assert_eq!(
            build(&points, k, false, SearchStrategy::KdTree),
            expected,
            "k={}",
            k
        );
    }
}

#[test]
fn duplicate_points_rank_by_index() {
    let points = vec![[1.0, 1.0, 1.0]; 6];
    let edges = build(&points, 2, false, SearchStrategy::BruteForce);
    let targets: Vec<usize> = edges.iter().map(|e| e.target).collect();
    assert_eq!(targets, vec![1, 2, 0, 2, 0, 1, 0, 1, 0, 1, 0, 1]);
    assert_eq!(build(&points, 2, false, SearchStrategy::KdTree), edges);
}

#[test]
fn loop_with_duplicates_prefers_lower_index() {
    // Points 0 and 1 coincide; with self-loops both are at distance 0 from
    // point 1 and the lower index wins.
    let points = vec![[0.0, 0.0, 0.0], [0.0, 0.0, 0.0], [3.0, 0.0, 0.0]];
    let edges = build(&points, 1, true, SearchStrategy::BruteForce);
    assert_eq!(edges, vec![Edge::new(0, 0), Edge::new(1, 0), Edge::new(2, 2)]);
}

use pointgraph_spatial::{squared_distance, KdTree, Neighbor};

use crate::Metric;

/// Ranking distance between two positions under `metric`.
///
/// Euclidean ranking uses the squared distance; only the order matters.
pub fn metric_distance(metric: Metric, a: &[f32; 3], b: &[f32; 3]) -> f32 {
    match metric {
        Metric::Euclidean => squared_distance(a, b),
        Metric::Cosine => cosine_distance(a, b),
    }
}

/// `1 - cos(a, b)`; a zero-length vector counts as orthogonal to everything.
pub fn cosine_distance(a: &[f32; 3], b: &[f32; 3]) -> f32 {
    let dot = a[0] * b[0] + a[1] * b[1] + a[2] * b[2];
    let norms = (squared_distance(a, &[0.0; 3]) * squared_distance(b, &[0.0; 3])).sqrt();
    if norms == 0.0 {
        return 1.0;
    }
    1.0 - dot / norms
}

/// The `k` best candidates for `points[query]` by full scan, ranked by
/// [`Neighbor::rank`].
///
/// `k` must be at least 1. The query index itself is a candidate only when
/// `self_loops` is set.
pub fn brute_force(
    points: &[[f32; 3]],
    query: usize,
    k: usize,
    self_loops: bool,
    metric: Metric,
) -> Vec<Neighbor> {
    let q = &points[query];
    let mut candidates: Vec<Neighbor> = points
        .iter()
        .enumerate()
        .filter(|&(j, _)| self_loops || j != query)
        .map(|(j, p)| Neighbor {
            index: j,
            distance: metric_distance(metric, q, p),
        })
        .collect();

    // Partition so the first k are the k best, then order just those.
    if k < candidates.len() {
        candidates.select_nth_unstable_by(k - 1, Neighbor::rank);
        candidates.truncate(k);
    }
    candidates.sort_unstable_by(Neighbor::rank);
    candidates
}

/// Same selection as [`brute_force`] with the Euclidean metric, answered by
/// the kd-tree.
pub fn kdtree(
    tree: &KdTree,
    points: &[[f32; 3]],
    query: usize,
    k: usize,
    self_loops: bool,
) -> Vec<Neighbor> {
    let exclude = (!self_loops).then_some(query);
    tree.knn_exact(&points[query], k, exclude)
}

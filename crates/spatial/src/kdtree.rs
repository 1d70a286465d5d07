use kiddo::float::distance::SquaredEuclidean;
use kiddo::immutable::float::kdtree::ImmutableKdTree;
use pointgraph_core::PointCloud;
use std::cmp::Ordering;
use std::num::NonZero;

/// A candidate neighbour of some query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub index: usize,
    /// Ranking distance. Tree queries report squared Euclidean distance.
    pub distance: f32,
}

impl Neighbor {
    /// Total order used for every k-NN ranking: ascending distance, then
    /// ascending index.
    pub fn rank(a: &Neighbor, b: &Neighbor) -> Ordering {
        a.distance
            .total_cmp(&b.distance)
            .then_with(|| a.index.cmp(&b.index))
    }
}

#[inline]
pub fn squared_distance(a: &[f32; 3], b: &[f32; 3]) -> f32 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    dx * dx + dy * dy + dz * dz
}

/// A KdTree for k-NN queries on 3D point clouds.
///
/// Built on top of kiddo v5's `ImmutableKdTree`, which uses a cache-optimized
/// layout for faster queries than the mutable variant. The tree is built once
/// and cannot be modified afterwards.
///
/// Positions are kept alongside the tree so distances reported by queries are
/// computed with [`squared_distance`], the same arithmetic a brute-force scan
/// uses. That keeps tree results bit-identical to the scan.
#[derive(Debug, Clone)]
pub struct KdTree {
    tree: ImmutableKdTree<f32, u32, 3, 32>,
    points: Vec<[f32; 3]>,
}

impl KdTree {
    /// Build a KdTree from a PointCloud.
    ///
    /// All coordinates are expected to be finite; callers filter or reject
    /// NaN/inf points beforehand.
    pub fn build(cloud: &PointCloud) -> Self {
        let points = cloud.positions();
        let tree = ImmutableKdTree::new_from_slice(&points);
        Self { tree, points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Find up to `k` nearest neighbours to `query`, sorted by ascending
    /// distance.
    ///
    /// Among points at equal distance the choice is left to kiddo; use
    /// [`KdTree::knn_exact`] when the index tie-break matters.
    ///
    /// Returns empty if `k == 0`, the tree is empty, or the query is not finite.
    pub fn knn(&self, query: &[f32; 3], k: usize) -> Vec<Neighbor> {
        if self.is_empty() || !query.iter().all(|v| v.is_finite()) {
            return Vec::new();
        }
        let Some(nz_k) = NonZero::new(k.min(self.len())) else {
            return Vec::new();
        };

        self.tree
            .nearest_n::<SquaredEuclidean>(query, nz_k)
            .into_iter()
            .map(|nn| self.neighbor(query, nn.item as usize))
            .collect()
    }

    /// The `k` nearest neighbours of `query` under [`Neighbor::rank`],
    /// optionally excluding one index (the query point itself).
    ///
    /// The result equals a full brute-force ranking truncated to `k`: the
    /// k-th distance is found with a k-NN query, then every point within that
    /// distance is gathered so no tie at the boundary is lost.
    pub fn knn_exact(&self, query: &[f32; 3], k: usize, exclude: Option<usize>) -> Vec<Neighbor> {
        let want = k + usize::from(exclude.is_some());
        let nearest = self.knn(query, want);
        let Some(kth) = nearest.iter().map(|nn| nn.distance).reduce(f32::max) else {
            return Vec::new();
        };

        let mut candidates = self.candidates_within(query, kth);
        if let Some(skip) = exclude {
            candidates.retain(|nn| nn.index != skip);
        }
        candidates.sort_unstable_by(Neighbor::rank);
        candidates.truncate(k);
        candidates
    }

    // kiddo's `within_unsorted` uses strict `<`. The radius is padded by an
    // epsilon so points exactly on the boundary are returned; the result may
    // hold a few points just outside it.
    fn candidates_within(&self, query: &[f32; 3], sq_radius: f32) -> Vec<Neighbor> {
        let padded = sq_radius + f32::EPSILON * sq_radius.max(1.0);
        self.tree
            .within_unsorted::<SquaredEuclidean>(query, padded)
            .into_iter()
            .map(|nn| self.neighbor(query, nn.item as usize))
            .collect()
    }

    fn neighbor(&self, query: &[f32; 3], index: usize) -> Neighbor {
        Neighbor {
            index,
            distance: squared_distance(query, &self.points[index]),
        }
    }
}

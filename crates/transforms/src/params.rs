use serde::{Deserialize, Serialize};

use crate::GraphError;

/// Point count from which [`SearchStrategy::Auto`] switches to the kd-tree.
pub const KDTREE_MIN_POINTS: usize = 4096;

/// Direction of emitted edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flow {
    /// `(i, j)` for each neighbour `j` of point `i`.
    #[default]
    CenterToNeighbor,
    /// `(j, i)`; same edge order, every edge reversed.
    NeighborToCenter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Ranked by squared Euclidean distance.
    #[default]
    Euclidean,
    /// Ranked by `1 - cos(p_i, p_j)` of the position vectors.
    Cosine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// Kd-tree for Euclidean clouds of at least [`KDTREE_MIN_POINTS`] points,
    /// brute force otherwise.
    #[default]
    Auto,
    BruteForce,
    KdTree,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeAttrKind {
    Distance,
    Displacement,
}

/// Parameters of the k-NN graph transform.
///
/// Deserialises from JSON with every field optional; missing fields take the
/// [`Default`] values (`k = 6`, no self-loops, directed, Euclidean).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnnGraphParams {
    pub k: usize,
    /// Keep the point itself as a neighbour candidate.
    #[serde(rename = "loop")]
    pub self_loops: bool,
    pub force_undirected: bool,
    pub flow: Flow,
    pub metric: Metric,
    pub search: SearchStrategy,
    pub edge_attr: Option<EdgeAttrKind>,
    /// Fail on an empty cloud instead of returning an empty graph.
    pub require_points: bool,
}

impl Default for KnnGraphParams {
    fn default() -> Self {
        Self {
            k: 6,
            self_loops: false,
            force_undirected: false,
            flow: Flow::default(),
            metric: Metric::default(),
            search: SearchStrategy::default(),
            edge_attr: None,
            require_points: false,
        }
    }
}

impl KnnGraphParams {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), GraphError> {
        if self.k < 1 {
            return Err(GraphError::InvalidArgument(format!(
                "k must be at least 1, got {}",
                self.k
            )));
        }
        if self.metric == Metric::Cosine && self.search == SearchStrategy::KdTree {
            return Err(GraphError::InvalidArgument(
                "kd-tree search only supports the euclidean metric".to_string(),
            ));
        }
        Ok(())
    }

    /// Concrete strategy for a cloud of `num_points` points; never `Auto`.
    pub fn resolve_search(&self, num_points: usize) -> SearchStrategy {
        match self.search {
            SearchStrategy::Auto
                if self.metric == Metric::Euclidean && num_points >= KDTREE_MIN_POINTS =>
            {
                SearchStrategy::KdTree
            }
            SearchStrategy::Auto => SearchStrategy::BruteForce,
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_six_neighbour_transform() {
        let params = KnnGraphParams::default();
        assert_eq!(params.k, 6);
        assert!(!params.self_loops);
        assert!(!params.force_undirected);
        assert_eq!(params.flow, Flow::CenterToNeighbor);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn k_zero_is_invalid() {
        let err = KnnGraphParams::new(0).validate().unwrap_err();
        assert!(matches!(err, GraphError::InvalidArgument(_)));
    }

    #[test]
    fn cosine_kdtree_is_invalid() {
        let params = KnnGraphParams {
            metric: Metric::Cosine,
            search: SearchStrategy::KdTree,
            ..KnnGraphParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(GraphError::InvalidArgument(_))
        ));
    }

    #[test]
    fn auto_search_resolution() {
        let params = KnnGraphParams::default();
        assert_eq!(params.resolve_search(10), SearchStrategy::BruteForce);
        assert_eq!(
            params.resolve_search(KDTREE_MIN_POINTS),
            SearchStrategy::KdTree
        );

        let cosine = KnnGraphParams {
            metric: Metric::Cosine,
            ..KnnGraphParams::default()
        };
        assert_eq!(
            cosine.resolve_search(KDTREE_MIN_POINTS * 2),
            SearchStrategy::BruteForce
        );

        let forced = KnnGraphParams {
            search: SearchStrategy::KdTree,
            ..KnnGraphParams::default()
        };
        assert_eq!(forced.resolve_search(3), SearchStrategy::KdTree);
    }

    #[test]
    fn deserializes_partial_json() {
        let params: KnnGraphParams = serde_json::from_str(
            r#"{"k": 3, "loop": true, "flow": "neighbor_to_center", "edge_attr": "distance"}"#,
        )
        .unwrap();
        assert_eq!(params.k, 3);
        assert!(params.self_loops);
        assert_eq!(params.flow, Flow::NeighborToCenter);
        assert_eq!(params.edge_attr, Some(EdgeAttrKind::Distance));
        assert_eq!(params.metric, Metric::Euclidean);
        assert!(!params.require_points);
    }
}

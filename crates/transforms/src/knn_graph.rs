use pointgraph_core::{Edge, Graph, PointCloud};
use pointgraph_spatial::{KdTree, Neighbor};
use rayon::prelude::*;

use crate::edges::{edge_attr, to_undirected};
use crate::neighbors;
use crate::{Flow, GraphError, KnnGraphParams, SearchStrategy};

/// Connect every point to its `k` nearest neighbours by Euclidean distance.
///
/// Edges are `(i, j)` grouped by source `i` ascending; inside a group they
/// follow ascending distance, ties broken by ascending neighbour index.
/// When fewer than `k` candidates exist every candidate is taken, so clouds
/// with `N <= k + 1` connect each point to all others. An empty cloud gives an
/// empty graph.
///
/// # Errors
///
/// - [`GraphError::InvalidArgument`] if `k == 0`.
/// - [`GraphError::NonFinitePoint`] if any coordinate is NaN or infinite.
pub fn knn_graph(cloud: &PointCloud, k: usize, self_loops: bool) -> Result<Graph, GraphError> {
    let params = KnnGraphParams {
        k,
        self_loops,
        ..KnnGraphParams::default()
    };
    knn_graph_with_params(cloud, &params)
}

/// Same as [`knn_graph`] with the full parameter set.
///
/// With `force_undirected` the reverse of every edge is added and the result
/// is sorted by `(source, target)`; `flow` has no effect then. Otherwise
/// `Flow::NeighborToCenter` reverses each edge in place, keeping the order.
/// The optional edge attribute is computed on the final edge list.
pub fn knn_graph_with_params(
    cloud: &PointCloud,
    params: &KnnGraphParams,
) -> Result<Graph, GraphError> {
    params.validate()?;

    if cloud.is_empty() {
        if params.require_points {
            return Err(GraphError::EmptyInput);
        }
        return Ok(Graph::new(cloud.clone()));
    }
    if let Some(index) = cloud.first_non_finite() {
        return Err(GraphError::NonFinitePoint { index });
    }

    let n = cloud.len();
    let candidates = if params.self_loops { n } else { n - 1 };
    let k = params.k.min(candidates);
    if k < params.k {
        log::debug!(
            "k-NN graph: {} points leave {} candidates per point, using k = {} instead of {}",
            n,
            candidates,
            k,
            params.k
        );
    }
    if k == 0 {
        return Ok(Graph::new(cloud.clone()));
    }

    let points = cloud.positions();
    let search = params.resolve_search(n);
    log::debug!("k-NN graph: {} points, k = {}, {:?} search", n, k, search);

    // Each point's selection is independent; the indexed collect keeps
    // source order.
    let selected: Vec<Vec<Neighbor>> = match search {
        SearchStrategy::KdTree => {
            let tree = KdTree::build(cloud);
            (0..n)
                .into_par_iter()
                .map(|i| neighbors::kdtree(&tree, &points, i, k, params.self_loops))
                .collect()
        }
        _ => (0..n)
            .into_par_iter()
            .map(|i| neighbors::brute_force(&points, i, k, params.self_loops, params.metric))
            .collect(),
    };

    let mut edges: Vec<Edge> = Vec::with_capacity(n * k);
    for (i, nbrs) in selected.iter().enumerate() {
        edges.extend(nbrs.iter().map(|nn| Edge::new(i, nn.index)));
    }

    if params.force_undirected {
        edges = to_undirected(edges);
    } else if params.flow == Flow::NeighborToCenter {
        for e in &mut edges {
            *e = e.reversed();
        }
    }

    let attr = params.edge_attr.map(|kind| edge_attr(&points, &edges, kind));
    let graph = Graph::from_edges(cloud.clone(), edges);
    Ok(match attr {
        Some(attr) => graph.with_edge_attr(attr),
        None => graph,
    })
}

/// The k-NN graph construction as a reusable function value, for use as a
/// per-sample pre-transform.
pub fn knn_graph_transform(
    params: KnnGraphParams,
) -> impl Fn(&PointCloud) -> Result<Graph, GraphError> + Send + Sync + Clone {
    move |cloud| knn_graph_with_params(cloud, &params)
}

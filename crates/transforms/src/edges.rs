use pointgraph_core::{Edge, EdgeAttr};
use pointgraph_spatial::squared_distance;

use crate::EdgeAttrKind;

/// Add the reverse of every edge, then sort by `(source, target)` and drop
/// duplicates.
pub fn to_undirected(edges: Vec<Edge>) -> Vec<Edge> {
    let mut all = Vec::with_capacity(edges.len() * 2);
    for e in edges {
        all.push(e);
        all.push(e.reversed());
    }
    all.sort_unstable();
    all.dedup();
    all
}

/// Attribute column for `edges` over node positions `points`.
pub fn edge_attr(points: &[[f32; 3]], edges: &[Edge], kind: EdgeAttrKind) -> EdgeAttr {
    match kind {
        EdgeAttrKind::Distance => EdgeAttr::Distance(
            edges
                .iter()
                .map(|e| squared_distance(&points[e.source], &points[e.target]).sqrt())
                .collect(),
        ),
        EdgeAttrKind::Displacement => EdgeAttr::Displacement(
            edges
                .iter()
                .map(|e| {
                    let s = points[e.source];
                    let t = points[e.target];
                    [t[0] - s[0], t[1] - s[1], t[2] - s[2]]
                })
                .collect(),
        ),
    }
}

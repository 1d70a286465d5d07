#![forbid(unsafe_code)]

pub mod edges;
pub mod error;
pub mod knn_graph;
pub mod neighbors;
pub mod params;

pub use error::GraphError;
pub use knn_graph::{knn_graph, knn_graph_transform, knn_graph_with_params};
pub use params::{EdgeAttrKind, Flow, KnnGraphParams, Metric, SearchStrategy, KDTREE_MIN_POINTS};

//! k-nearest-neighbour graphs over 3D point clouds.
//!
//! Re-exports the workspace crates:
//! - [`core`]: `PointCloud` and `Graph`.
//! - [`spatial`]: kd-tree used by large-cloud searches.
//! - [`transforms`]: the k-NN graph construction.
//! - [`datasets`]: ShapeNet part-segmentation reader.
#![forbid(unsafe_code)]

pub use pointgraph_core as core;
pub use pointgraph_datasets as datasets;
pub use pointgraph_spatial as spatial;
pub use pointgraph_transforms as transforms;

pub use pointgraph_core::{Edge, EdgeAttr, Features, Graph, PointCloud};
pub use pointgraph_transforms::{knn_graph, knn_graph_with_params, GraphError, KnnGraphParams};

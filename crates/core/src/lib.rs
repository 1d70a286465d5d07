#![forbid(unsafe_code)]

pub mod cloud;
pub mod graph;

pub use cloud::{Features, PointCloud};
pub use graph::{Edge, EdgeAttr, Graph};

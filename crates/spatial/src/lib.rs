#![forbid(unsafe_code)]

pub mod kdtree;

pub use kdtree::{squared_distance, KdTree, Neighbor};

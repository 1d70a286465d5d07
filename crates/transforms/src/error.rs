use thiserror::Error;

/// Errors raised while building a graph from a point cloud.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("point cloud has no points")]
    EmptyInput,

    #[error("point {index} has a non-finite coordinate")]
    NonFinitePoint { index: usize },
}

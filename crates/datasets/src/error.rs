use std::path::PathBuf;

use thiserror::Error;

use crate::Category;

pub type Result<T> = std::result::Result<T, DatasetError>;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{}:{line}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("split file not found: {}", .0.display())]
    MissingSplitFile(PathBuf),

    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("{}: part label {label} does not belong to {category}", .path.display())]
    InvalidPartLabel {
        path: PathBuf,
        label: u8,
        category: Category,
    },

    #[error("pre-transform failed on shape {shape_id}: {source}")]
    Transform {
        shape_id: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

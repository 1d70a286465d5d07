#![forbid(unsafe_code)]

pub mod category;
pub mod config;
pub mod error;
pub mod shapenet;

pub use category::Category;
pub use config::{ShapeNetConfig, Split};
pub use error::DatasetError;
pub use shapenet::{
    knn_pre_transform, load_samples, load_shapenet, read_sample, read_split, GraphSample, Sample,
    ShapeEntry, ShapeNet,
};

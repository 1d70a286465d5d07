//! Read the Airplane category of an extracted ShapeNet part-segmentation
//! dataset and build a 6-nearest-neighbour graph for every shape.
//!
//! ```text
//! cargo run --release --example shapenet_knn -- ShapeNet_Transformed
//! ```
//! Set `RUST_LOG=info` for progress output.

use log::LevelFilter;
use pointgraph::datasets::{knn_pre_transform, load_shapenet, Category, ShapeNetConfig};
use pointgraph::KnnGraphParams;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let root = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "ShapeNet_Transformed".to_string());
    let config = ShapeNetConfig::new(root).with_categories([Category::Airplane]);

    let dataset = load_shapenet(&config, knn_pre_transform(KnnGraphParams::new(6)))?;
    log::info!("{} graphs", dataset.len());
    if let Some(first) = dataset.get(0) {
        log::info!(
            "first: {} {} with {} nodes, {} edges",
            first.category,
            first.shape_id,
            first.graph.num_nodes(),
            first.graph.num_edges()
        );
    }
    Ok(())
}

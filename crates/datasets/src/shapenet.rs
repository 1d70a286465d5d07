use std::convert::Infallible;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use pointgraph_core::{Features, Graph, PointCloud};
use pointgraph_transforms::{knn_graph_transform, GraphError, KnnGraphParams};
use rayon::prelude::*;

use crate::error::Result;
use crate::{Category, DatasetError, ShapeNetConfig};

const SPLIT_DIR: &str = "train_test_split";

/// One shape listed in a split file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeEntry {
    pub category: Category,
    pub shape_id: String,
    pub path: PathBuf,
}

/// A parsed shape before any pre-transform.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub category: Category,
    pub shape_id: String,
    /// Positions, plus normals as 3-wide features when requested.
    pub cloud: PointCloud,
    /// Global part label of each point.
    pub part_labels: Vec<u8>,
}

/// A sample whose cloud went through the k-NN graph transform.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphSample {
    pub category: Category,
    pub shape_id: String,
    pub graph: Graph,
    pub part_labels: Vec<u8>,
}

/// Loaded samples in split-file order.
#[derive(Debug, Clone)]
pub struct ShapeNet<T> {
    pub config: ShapeNetConfig,
    pub samples: Vec<T>,
}

impl<T> ShapeNet<T> {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&T> {
        self.samples.get(i)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.samples.iter()
    }
}

/// Read every shape selected by `config`, apply `pre_transform` to each, and
/// collect the results.
///
/// Files are parsed and transformed in parallel; the output keeps the order
/// of the split lists. Shapes whose file holds no points are skipped.
///
/// # Errors
///
/// Fails on the first unreadable or malformed file, and wraps a failing
/// pre-transform in [`DatasetError::Transform`].
pub fn load_shapenet<T, E, F>(config: &ShapeNetConfig, pre_transform: F) -> Result<ShapeNet<T>>
where
    T: Send,
    E: std::error::Error + Send + Sync + 'static,
    F: Fn(Sample) -> std::result::Result<T, E> + Sync,
{
    let start = Instant::now();
    let entries = read_split(config)?;
    log::info!(
        "ShapeNet: {} shapes selected from {:?} split of {}",
        entries.len(),
        config.split,
        config.root.display()
    );

    let loaded: Vec<Option<T>> = entries
        .par_iter()
        .map(|entry| {
            let sample = read_sample(entry, config.include_normals)?;
            if sample.cloud.is_empty() {
                log::warn!("ShapeNet: skipping empty shape {}", entry.path.display());
                return Ok(None);
            }
            let shape_id = sample.shape_id.clone();
            pre_transform(sample)
                .map(Some)
                .map_err(|e| DatasetError::Transform {
                    shape_id,
                    source: Box::new(e),
                })
        })
        .collect::<Result<_>>()?;

    let samples: Vec<T> = loaded.into_iter().flatten().collect();
    log::info!(
        "ShapeNet: loaded {} samples in {:?}",
        samples.len(),
        start.elapsed()
    );

    Ok(ShapeNet {
        config: config.clone(),
        samples,
    })
}

/// [`load_shapenet`] without a pre-transform.
pub fn load_samples(config: &ShapeNetConfig) -> Result<ShapeNet<Sample>> {
    load_shapenet(config, Ok::<Sample, Infallible>)
}

/// Pre-transform that replaces each sample's cloud by its k-NN graph.
pub fn knn_pre_transform(
    params: KnnGraphParams,
) -> impl Fn(Sample) -> std::result::Result<GraphSample, GraphError> + Send + Sync + Clone {
    let build = knn_graph_transform(params);
    move |sample| {
        let graph = build(&sample.cloud)?;
        Ok(GraphSample {
            category: sample.category,
            shape_id: sample.shape_id,
            graph,
            part_labels: sample.part_labels,
        })
    }
}

/// Entries of the split lists named by `config.split`, filtered by category.
pub fn read_split(config: &ShapeNetConfig) -> Result<Vec<ShapeEntry>> {
    let raw = config.raw_dir();
    let mut entries = Vec::new();

    for part in config.split.parts() {
        let list_path = raw
            .join(SPLIT_DIR)
            .join(format!("shuffled_{part}_file_list.json"));
        if !list_path.is_file() {
            return Err(DatasetError::MissingSplitFile(list_path));
        }
        let text = fs::read_to_string(&list_path).map_err(|source| DatasetError::Io {
            path: list_path.clone(),
            source,
        })?;
        let listed: Vec<String> =
            serde_json::from_str(&text).map_err(|source| DatasetError::Json {
                path: list_path.clone(),
                source,
            })?;

        for (i, item) in listed.iter().enumerate() {
            // "shape_data/<synset>/<shape_id>"
            let mut parts = item.rsplitn(3, '/');
            let (Some(shape_id), Some(synset)) = (parts.next(), parts.next()) else {
                return Err(DatasetError::Parse {
                    path: list_path.clone(),
                    line: i + 1,
                    message: format!("malformed split entry {item:?}"),
                });
            };
            let category = Category::from_synset(synset)
                .ok_or_else(|| DatasetError::UnknownCategory(synset.to_string()))?;
            if !config.selects(category) {
                continue;
            }
            entries.push(ShapeEntry {
                category,
                shape_id: shape_id.to_string(),
                path: raw.join(synset).join(format!("{shape_id}.txt")),
            });
        }
    }

    Ok(entries)
}

/// Parse one shape file: whitespace-separated `x y z nx ny nz label` rows.
pub fn read_sample(entry: &ShapeEntry, include_normals: bool) -> Result<Sample> {
    let text = fs::read_to_string(&entry.path).map_err(|source| DatasetError::Io {
        path: entry.path.clone(),
        source,
    })?;
    parse_sample(&text, entry, include_normals)
}

fn parse_sample(text: &str, entry: &ShapeEntry, include_normals: bool) -> Result<Sample> {
    let mut x = Vec::new();
    let mut y = Vec::new();
    let mut z = Vec::new();
    let mut normals = Vec::new();
    let mut part_labels = Vec::new();
    let allowed = entry.category.part_labels();

    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let row = parse_row(line).map_err(|message| parse_error(&entry.path, i + 1, message))?;

        let label = row[6];
        if label < 0.0 || label > f32::from(u8::MAX) || label.fract() != 0.0 {
            return Err(parse_error(
                &entry.path,
                i + 1,
                format!("part label {label} is not a small non-negative integer"),
            ));
        }
        let label = label as u8;
        if !allowed.contains(&label) {
            return Err(DatasetError::InvalidPartLabel {
                path: entry.path.clone(),
                label,
                category: entry.category,
            });
        }

        x.push(row[0]);
        y.push(row[1]);
        z.push(row[2]);
        if include_normals {
            normals.extend_from_slice(&row[3..6]);
        }
        part_labels.push(label);
    }

    let mut cloud = PointCloud::from_xyz(x, y, z);
    if include_normals && !cloud.is_empty() {
        cloud = cloud.with_features(Features::new(3, normals));
    }

    Ok(Sample {
        category: entry.category,
        shape_id: entry.shape_id.clone(),
        cloud,
        part_labels,
    })
}

fn parse_row(line: &str) -> std::result::Result<[f32; 7], String> {
    let mut row = [0.0f32; 7];
    let mut count = 0;
    for token in line.split_whitespace() {
        if count == row.len() {
            return Err(format!("expected 7 columns, found more in {line:?}"));
        }
        row[count] = token
            .parse::<f32>()
            .map_err(|e| format!("invalid number {token:?}: {e}"))?;
        count += 1;
    }
    if count != row.len() {
        return Err(format!("expected 7 columns, found {count}"));
    }
    Ok(row)
}

fn parse_error(path: &Path, line: usize, message: String) -> DatasetError {
    DatasetError::Parse {
        path: path.to_path_buf(),
        line,
        message,
    }
}

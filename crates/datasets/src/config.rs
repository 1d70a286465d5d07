use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::{Category, DatasetError};

/// Which of the benchmark's split lists to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    Val,
    Test,
    #[default]
    TrainVal,
    All,
}

impl Split {
    /// Split list file stems in read order.
    pub fn parts(self) -> &'static [&'static str] {
        match self {
            Split::Train => &["train"],
            Split::Val => &["val"],
            Split::Test => &["test"],
            Split::TrainVal => &["train", "val"],
            Split::All => &["train", "val", "test"],
        }
    }
}

/// Where and what to read.
///
/// ```json
/// { "root": "ShapeNet", "categories": ["Airplane"], "split": "trainval" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeNetConfig {
    /// Dataset root; files are read from `<root>/raw`.
    pub root: PathBuf,
    /// Categories to keep. Empty keeps all sixteen.
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub split: Split,
    /// Store the per-point normals as a 3-wide feature matrix.
    #[serde(default = "default_include_normals")]
    pub include_normals: bool,
}

fn default_include_normals() -> bool {
    true
}

impl ShapeNetConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            categories: Vec::new(),
            split: Split::default(),
            include_normals: default_include_normals(),
        }
    }

    pub fn with_categories(mut self, categories: impl IntoIterator<Item = Category>) -> Self {
        self.categories = categories.into_iter().collect();
        self
    }

    pub fn with_split(mut self, split: Split) -> Self {
        self.split = split;
        self
    }

    pub fn with_normals(mut self, include_normals: bool) -> Self {
        self.include_normals = include_normals;
        self
    }

    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text).map_err(|source| DatasetError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn raw_dir(&self) -> PathBuf {
        self.root.join("raw")
    }

    pub fn selects(&self, category: Category) -> bool {
        self.categories.is_empty() || self.categories.contains(&category)
    }
}

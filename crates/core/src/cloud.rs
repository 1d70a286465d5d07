/// An indexed set of 3D points stored as structure-of-arrays.
///
/// A point's identity is its index `0..len()`. Per-point feature vectors are
/// optional and, when present, hold exactly one row per point.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    pub x: Vec<f32>,
    pub y: Vec<f32>,
    pub z: Vec<f32>,
    pub features: Option<Features>,
}

/// Row-major per-point feature matrix (`len() * dim` values).
#[derive(Debug, Clone, PartialEq)]
pub struct Features {
    pub dim: usize,
    pub values: Vec<f32>,
}

impl Features {
    pub fn new(dim: usize, values: Vec<f32>) -> Self {
        assert!(dim > 0, "feature dimension must be positive");
        assert_eq!(
            values.len() % dim,
            0,
            "feature values must be a multiple of dim"
        );
        Self { dim, values }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.values.len() / self.dim
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn row(&self, i: usize) -> &[f32] {
        let start = i * self.dim;
        &self.values[start..start + self.dim]
    }
}

impl PointCloud {
    pub fn new() -> Self {
        Self {
            x: Vec::new(),
            y: Vec::new(),
            z: Vec::new(),
            features: None,
        }
    }

    pub fn from_xyz(x: Vec<f32>, y: Vec<f32>, z: Vec<f32>) -> Self {
        assert_eq!(x.len(), y.len(), "x and y must have same length");
        assert_eq!(x.len(), z.len(), "x and z must have same length");

        Self {
            x,
            y,
            z,
            features: None,
        }
    }

    pub fn from_points(points: &[[f32; 3]]) -> Self {
        let mut x = Vec::with_capacity(points.len());
        let mut y = Vec::with_capacity(points.len());
        let mut z = Vec::with_capacity(points.len());

        for p in points {
            x.push(p[0]);
            y.push(p[1]);
            z.push(p[2]);
        }

        Self::from_xyz(x, y, z)
    }

    pub fn from_array(data: &[f32], num_points: usize) -> Self {
        assert_eq!(
            data.len(),
            num_points * 3,
            "interleaved xyz input must have num_points * 3 floats"
        );

        let mut x = Vec::with_capacity(num_points);
        let mut y = Vec::with_capacity(num_points);
        let mut z = Vec::with_capacity(num_points);

        for chunk in data.chunks_exact(3).take(num_points) {
            x.push(chunk[0]);
            y.push(chunk[1]);
            z.push(chunk[2]);
        }

        Self::from_xyz(x, y, z)
    }

    /// Attach a feature matrix.
    ///
    /// # Panics
    ///
    /// Panics if the feature row count differs from the point count.
    pub fn with_features(mut self, features: Features) -> Self {
        assert_eq!(
            features.len(),
            self.len(),
            "feature rows must match point count"
        );
        self.features = Some(features);
        self
    }

    pub fn len(&self) -> usize {
        debug_assert_eq!(self.x.len(), self.y.len());
        debug_assert_eq!(self.x.len(), self.z.len());
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn point(&self, i: usize) -> [f32; 3] {
        [self.x[i], self.y[i], self.z[i]]
    }

    pub fn feature(&self, i: usize) -> Option<&[f32]> {
        self.features.as_ref().map(|f| f.row(i))
    }

    pub fn iter_points(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .zip(&self.z)
            .map(|((x, y), z)| [*x, *y, *z])
    }

    /// Positions as a contiguous array-of-structs copy.
    pub fn positions(&self) -> Vec<[f32; 3]> {
        self.iter_points().collect()
    }

    /// Index of the first point with a NaN or infinite coordinate.
    pub fn first_non_finite(&self) -> Option<usize> {
        self.iter_points()
            .position(|p| !p.iter().all(|v| v.is_finite()))
    }

    pub fn to_array(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.len() * 3);
        for p in self.iter_points() {
            out.extend_from_slice(&p);
        }
        out
    }
}

impl Default for PointCloud {
    fn default() -> Self {
        Self::new()
    }
}

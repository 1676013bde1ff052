use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Result, check_len};

/// A 3D point or vector sampled once per animation frame
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Trajectory {
    frames: Vec<Vector3<f64>>,
}

impl Trajectory {
    /// Create a trajectory from per-frame vectors
    pub fn new(frames: Vec<Vector3<f64>>) -> Self {
        Self { frames }
    }

    /// Create a trajectory from `[x, y, z]` rows, one row per frame
    ///
    /// # Example
    /// ```rust
    /// use marker_geometry::Trajectory;
    ///
    /// let knee = Trajectory::from_rows(&[[0.1, 0.5, 0.0], [0.1, 0.52, 0.0]]);
    /// assert_eq!(knee.len(), 2);
    /// ```
    pub fn from_rows(rows: &[[f64; 3]]) -> Self {
        Self::new(rows.iter().map(|r| Vector3::new(r[0], r[1], r[2])).collect())
    }

    /// Create a trajectory holding the same vector for `len` frames
    pub fn constant(value: Vector3<f64>, len: usize) -> Self {
        Self::new(vec![value; len])
    }

    /// Number of frames
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// True when the trajectory holds no frames
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Per-frame values
    pub fn frames(&self) -> &[Vector3<f64>] {
        &self.frames
    }

    /// Value at a single frame
    pub fn get(&self, frame: usize) -> Option<&Vector3<f64>> {
        self.frames.get(frame)
    }

    /// Apply `f` to each aligned pair of frames
    fn zip_map<T>(
        &self,
        other: &Trajectory,
        f: impl Fn(&Vector3<f64>, &Vector3<f64>) -> T,
    ) -> Result<Vec<T>> {
        check_len(self.len(), other.len())?;
        Ok(self
            .frames
            .iter()
            .zip(&other.frames)
            .map(|(a, b)| f(a, b))
            .collect())
    }

    /// Elementwise midpoint of two point trajectories
    pub fn mid_point(a: &Trajectory, b: &Trajectory) -> Result<Trajectory> {
        a.zip_map(b, |p, q| (p + q) * 0.5).map(Trajectory::new)
    }

    /// Vector from `from` to `to` at every frame
    pub fn vector_between(from: &Trajectory, to: &Trajectory) -> Result<Trajectory> {
        to.zip_map(from, |t, f| t - f).map(Trajectory::new)
    }

    /// Per-frame dot product
    pub fn dot(&self, other: &Trajectory) -> Result<Vec<f64>> {
        self.zip_map(other, |a, b| a.dot(b))
    }

    /// Per-frame cross product `self × other`
    pub fn cross(&self, other: &Trajectory) -> Result<Trajectory> {
        self.zip_map(other, |a, b| a.cross(b)).map(Trajectory::new)
    }

    /// Per-frame Euclidean length
    pub fn norms(&self) -> Vec<f64> {
        self.frames.iter().map(|v| v.norm()).collect()
    }

    /// Unit vectors per frame
    ///
    /// Zero-length frames have no direction and come back as NaN vectors.
    pub fn normalized(&self) -> Trajectory {
        Trajectory::new(
            self.frames
                .iter()
                .map(|v| {
                    v.try_normalize(f64::EPSILON)
                        .unwrap_or_else(|| Vector3::repeat(f64::NAN))
                })
                .collect(),
        )
    }

    /// Unsigned angle between two vector trajectories, in `[0, π]` per frame
    ///
    /// # Example
    /// ```rust
    /// use marker_geometry::Trajectory;
    /// use std::f64::consts::FRAC_PI_2;
    ///
    /// let a = Trajectory::from_rows(&[[1.0, 0.0, 0.0]]);
    /// let b = Trajectory::from_rows(&[[0.0, 3.0, 0.0]]);
    /// let angle = Trajectory::angle(&a, &b).unwrap();
    /// assert!((angle[0] - FRAC_PI_2).abs() < 1e-12);
    /// ```
    pub fn angle(a: &Trajectory, b: &Trajectory) -> Result<Vec<f64>> {
        a.zip_map(b, |u, v| {
            let cos = u.dot(v) / (u.norm() * v.norm());
            cos.clamp(-1.0, 1.0).acos()
        })
    }

    /// Iterate over the per-frame values
    pub fn iter(&self) -> std::slice::Iter<'_, Vector3<f64>> {
        self.frames.iter()
    }
}

impl From<Vec<Vector3<f64>>> for Trajectory {
    fn from(frames: Vec<Vector3<f64>>) -> Self {
        Self::new(frames)
    }
}

impl FromIterator<Vector3<f64>> for Trajectory {
    fn from_iter<I: IntoIterator<Item = Vector3<f64>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a Vector3<f64>;
    type IntoIter = std::slice::Iter<'a, Vector3<f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

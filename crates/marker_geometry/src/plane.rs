use log::warn;
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Result, Trajectory, check_len};

/// A plane through three marker trajectories, one plane per frame
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Plane {
    /// Point the plane passes through at each frame (the first marker)
    anchor: Trajectory,

    /// Unit normal `(p2 - p1) × (p3 - p1)` at each frame
    normal: Trajectory,
}

impl Plane {
    /// Create the plane through `p1`, `p2` and `p3` at every frame
    ///
    /// Frames where the three markers are collinear have no defined normal;
    /// their normal is NaN and a warning is logged.
    pub fn new(p1: &Trajectory, p2: &Trajectory, p3: &Trajectory) -> Result<Self> {
        check_len(p1.len(), p2.len())?;
        check_len(p1.len(), p3.len())?;

        let v12 = Trajectory::vector_between(p1, p2)?;
        let v13 = Trajectory::vector_between(p1, p3)?;
        let normal = v12.cross(&v13)?.normalized();

        let degenerate = normal.iter().filter(|n| n.x.is_nan()).count();
        if degenerate > 0 {
            warn!(
                "Plane is undefined in {} of {} frames (collinear markers)",
                degenerate,
                normal.len()
            );
        }

        Ok(Self {
            anchor: p1.clone(),
            normal,
        })
    }

    /// Number of frames
    pub fn len(&self) -> usize {
        self.normal.len()
    }

    /// True when the plane holds no frames
    pub fn is_empty(&self) -> bool {
        self.normal.is_empty()
    }

    /// Per-frame unit normal vector
    pub fn normal_vector(&self) -> &Trajectory {
        &self.normal
    }

    /// Point the plane passes through at each frame
    pub fn anchor(&self) -> &Trajectory {
        &self.anchor
    }

    /// Signed distance from the plane to `points` along the normal
    pub fn signed_distance(&self, points: &Trajectory) -> Result<Vec<f64>> {
        let offset = Trajectory::vector_between(&self.anchor, points)?;
        self.normal.dot(&offset)
    }

    /// `+1.0` when a point lies on the normal side of the plane (or on it),
    /// `-1.0` otherwise
    pub fn above_or_below(&self, points: &Trajectory) -> Result<Vec<f64>> {
        Ok(self
            .signed_distance(points)?
            .into_iter()
            .map(|d| if d >= 0.0 { 1.0 } else { -1.0 })
            .collect())
    }

    /// In-plane component of each vector: `v - (v · n) n`
    pub fn project_vector(&self, vectors: &Trajectory) -> Result<Trajectory> {
        check_len(self.len(), vectors.len())?;
        Ok(self
            .normal
            .iter()
            .zip(vectors)
            .map(|(n, v)| v - n * n.dot(v))
            .collect())
    }

    /// Normal at a single frame
    pub fn normal_at(&self, frame: usize) -> Option<&Vector3<f64>> {
        self.normal.get(frame)
    }
}

use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Error, Plane, Result, Trajectory, check_len};

/// A coordinate axis
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Signed per-frame angles of a vector within the xy, xz and yz planes
///
/// Each angle is measured from the first named axis toward the second, in
/// radians within `[-π, π]`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlaneAngles {
    pub xy: Vec<f64>,
    pub xz: Vec<f64>,
    pub yz: Vec<f64>,
}

impl PlaneAngles {
    /// Number of frames
    pub fn len(&self) -> usize {
        self.xy.len()
    }

    /// True when no frames are present
    pub fn is_empty(&self) -> bool {
        self.xy.is_empty()
    }
}

/// Anything that can decompose a vector trajectory into plane angles
pub trait ProjectionAngles {
    /// Project `vector` onto the xy, xz and yz planes of this frame
    fn projection_angles(&self, vector: &Trajectory) -> Result<PlaneAngles>;
}

/// An origin and three unit axes per frame
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoordinateSystem {
    origin: Trajectory,
    x_axis: Trajectory,
    y_axis: Trajectory,
    z_axis: Trajectory,
}

impl CoordinateSystem {
    /// Create a coordinate system from explicit axis directions
    ///
    /// Axes are normalized per frame; orthogonality is the caller's
    /// responsibility.
    pub fn from_axes(
        origin: Trajectory,
        x_axis: &Trajectory,
        y_axis: &Trajectory,
        z_axis: &Trajectory,
    ) -> Result<Self> {
        check_len(origin.len(), x_axis.len())?;
        check_len(origin.len(), y_axis.len())?;
        check_len(origin.len(), z_axis.len())?;
        Ok(Self {
            origin,
            x_axis: x_axis.normalized(),
            y_axis: y_axis.normalized(),
            z_axis: z_axis.normalized(),
        })
    }

    /// A world-aligned coordinate system at `origin`
    pub fn world(origin: Trajectory) -> Self {
        let len = origin.len();
        Self {
            origin,
            x_axis: Trajectory::constant(Vector3::x(), len),
            y_axis: Trajectory::constant(Vector3::y(), len),
            z_axis: Trajectory::constant(Vector3::z(), len),
        }
    }

    /// Build a right-handed frame from a plane
    ///
    /// The `along` axis points from `origin` toward `axis_point`, flattened
    /// into the plane. The `normal` axis is the plane normal. The remaining
    /// axis completes a right-handed frame.
    ///
    /// # Example
    /// ```rust
    /// use marker_geometry::{Axis, CoordinateSystem, Plane, Trajectory};
    ///
    /// let hip = Trajectory::from_rows(&[[0.0, 0.0, 0.0]]);
    /// let knee = Trajectory::from_rows(&[[0.0, -1.0, 0.0]]);
    /// let toe = Trajectory::from_rows(&[[1.0, 0.0, 0.0]]);
    /// let plane = Plane::new(&hip, &knee, &toe).unwrap();
    ///
    /// let frame =
    ///     CoordinateSystem::from_plane(&plane, hip.clone(), &knee, Axis::Y, Axis::Z).unwrap();
    /// assert!((frame.y_axis().frames()[0].y + 1.0).abs() < 1e-12);
    /// ```
    pub fn from_plane(
        plane: &Plane,
        origin: Trajectory,
        axis_point: &Trajectory,
        along: Axis,
        normal: Axis,
    ) -> Result<Self> {
        if along == normal {
            return Err(Error::InvalidAxisPair { along, normal });
        }
        check_len(plane.len(), origin.len())?;

        let direction = Trajectory::vector_between(&origin, axis_point)?;
        let along_axis = plane.project_vector(&direction)?.normalized();
        let normal_axis = plane.normal_vector().clone();
        let third_axis = if (along.index() + 1) % 3 == normal.index() {
            along_axis.cross(&normal_axis)?
        } else {
            normal_axis.cross(&along_axis)?
        };

        let third = 3 - along.index() - normal.index();
        let mut axes: [Trajectory; 3] = Default::default();
        axes[along.index()] = along_axis;
        axes[normal.index()] = normal_axis;
        axes[third] = third_axis;

        let [x_axis, y_axis, z_axis] = axes;
        Ok(Self {
            origin,
            x_axis,
            y_axis,
            z_axis,
        })
    }

    /// Number of frames
    pub fn len(&self) -> usize {
        self.origin.len()
    }

    /// True when no frames are present
    pub fn is_empty(&self) -> bool {
        self.origin.is_empty()
    }

    /// Origin at each frame
    pub fn origin(&self) -> &Trajectory {
        &self.origin
    }

    /// Unit x axis at each frame
    pub fn x_axis(&self) -> &Trajectory {
        &self.x_axis
    }

    /// Unit y axis at each frame
    pub fn y_axis(&self) -> &Trajectory {
        &self.y_axis
    }

    /// Unit z axis at each frame
    pub fn z_axis(&self) -> &Trajectory {
        &self.z_axis
    }

    /// Components of `vector` along the local x, y and z axes
    pub fn local_components(&self, vector: &Trajectory) -> Result<Trajectory> {
        let cx = self.x_axis.dot(vector)?;
        let cy = self.y_axis.dot(vector)?;
        let cz = self.z_axis.dot(vector)?;
        Ok(cx
            .into_iter()
            .zip(cy)
            .zip(cz)
            .map(|((x, y), z)| Vector3::new(x, y, z))
            .collect())
    }
}

impl ProjectionAngles for CoordinateSystem {
    fn projection_angles(&self, vector: &Trajectory) -> Result<PlaneAngles> {
        let local = self.local_components(vector)?;
        Ok(PlaneAngles {
            xy: local.iter().map(|c| c.y.atan2(c.x)).collect(),
            xz: local.iter().map(|c| c.z.atan2(c.x)).collect(),
            yz: local.iter().map(|c| c.z.atan2(c.y)).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};
    use test_log::test;

    #[test]
    fn test_world_projection_angles() {
        let frame = CoordinateSystem::world(Trajectory::constant(Vector3::zeros(), 3));
        let v = Trajectory::from_rows(&[[1.0, 1.0, 0.0], [0.0, 0.0, 1.0], [-1.0, 0.0, -1.0]]);
        let angles = frame.projection_angles(&v).unwrap();

        assert_relative_eq!(angles.xy[0], FRAC_PI_4, epsilon = 1e-12);
        assert_relative_eq!(angles.xz[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(angles.yz[0], 0.0, epsilon = 1e-12);

        assert_relative_eq!(angles.xz[1], FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(angles.yz[1], FRAC_PI_2, epsilon = 1e-12);

        assert_relative_eq!(angles.xy[2], PI, epsilon = 1e-12);
        assert_relative_eq!(angles.xz[2], -3.0 * FRAC_PI_4, epsilon = 1e-12);
        assert_relative_eq!(angles.yz[2], -FRAC_PI_2, epsilon = 1e-12);
        assert_eq!(angles.len(), 3);
    }

    #[test]
    fn test_from_plane_is_right_handed() {
        let origin = Trajectory::from_rows(&[[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]]);
        let p2 = Trajectory::from_rows(&[[0.0, 2.0, 0.0], [1.0, 3.0, 1.0]]);
        let p3 = Trajectory::from_rows(&[[2.0, 0.0, 0.0], [1.0, 1.0, 3.0]]);
        let plane = Plane::new(&origin, &p2, &p3).unwrap();

        for (along, normal) in [
            (Axis::X, Axis::Y),
            (Axis::X, Axis::Z),
            (Axis::Y, Axis::Z),
            (Axis::Z, Axis::Y),
        ] {
            let frame = CoordinateSystem::from_plane(&plane, origin.clone(), &p2, along, normal)
                .unwrap();
            for i in 0..frame.len() {
                let x = frame.x_axis().frames()[i];
                let y = frame.y_axis().frames()[i];
                let z = frame.z_axis().frames()[i];
                assert_relative_eq!(x.cross(&y), z, epsilon = 1e-12);
                assert_relative_eq!(x.dot(&y), 0.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_from_plane_axis_direction() {
        let origin = Trajectory::from_rows(&[[0.0, 0.0, 0.0]]);
        let axis_point = Trajectory::from_rows(&[[0.0, 0.0, 5.0]]);
        let side = Trajectory::from_rows(&[[1.0, 0.0, 0.0]]);
        let plane = Plane::new(&origin, &axis_point, &side).unwrap();

        let frame =
            CoordinateSystem::from_plane(&plane, origin.clone(), &axis_point, Axis::Z, Axis::X)
                .unwrap();
        assert_relative_eq!(frame.z_axis().frames()[0], Vector3::z(), epsilon = 1e-12);
        // (0,0,5) x (1,0,0) points along +y
        assert_relative_eq!(frame.x_axis().frames()[0], Vector3::y(), epsilon = 1e-12);
        assert_relative_eq!(frame.y_axis().frames()[0], -Vector3::x(), epsilon = 1e-12);
    }

    #[test]
    fn test_from_plane_rejects_same_axis() {
        let origin = Trajectory::constant(Vector3::zeros(), 1);
        let plane = Plane::new(
            &origin,
            &Trajectory::constant(Vector3::x(), 1),
            &Trajectory::constant(Vector3::y(), 1),
        )
        .unwrap();
        let err = CoordinateSystem::from_plane(&plane, origin.clone(), &origin, Axis::Y, Axis::Y)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidAxisPair { .. }));
    }

    #[test]
    fn test_from_axes_normalizes() {
        let origin = Trajectory::constant(Vector3::zeros(), 1);
        let frame = CoordinateSystem::from_axes(
            origin,
            &Trajectory::from_rows(&[[2.0, 0.0, 0.0]]),
            &Trajectory::from_rows(&[[0.0, 3.0, 0.0]]),
            &Trajectory::from_rows(&[[0.0, 0.0, 4.0]]),
        )
        .unwrap();
        assert_relative_eq!(frame.x_axis().frames()[0].norm(), 1.0);
        assert_relative_eq!(frame.y_axis().frames()[0].norm(), 1.0);
        assert_relative_eq!(frame.z_axis().frames()[0].norm(), 1.0);
    }

    #[test]
    fn test_projection_length_mismatch() {
        let frame = CoordinateSystem::world(Trajectory::constant(Vector3::zeros(), 2));
        let v = Trajectory::from_rows(&[[1.0, 0.0, 0.0]]);
        assert!(frame.projection_angles(&v).is_err());
    }
}

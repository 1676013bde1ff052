//! # Marker Geometry
//!
//! Batched 3D primitives for motion-capture marker trajectories. Every type
//! here holds one value per animation frame, and every operation works on the
//! whole sequence at once.
//!
//! ## Features
//!
//! - [`Trajectory`]: per-frame points or vectors with midpoint, dot, cross
//!   and angle operations
//! - [`Plane`]: a plane through three marker trajectories, with a per-frame
//!   normal and a side-of-plane test
//! - [`CoordinateSystem`]: a local frame that decomposes vectors into signed
//!   angles within its xy, xz and yz planes
//!
//! ## Example
//!
//! ```rust
//! use marker_geometry::{Plane, Trajectory};
//!
//! let a = Trajectory::from_rows(&[[0.0, 0.0, 0.0]]);
//! let b = Trajectory::from_rows(&[[1.0, 0.0, 0.0]]);
//! let c = Trajectory::from_rows(&[[0.0, 1.0, 0.0]]);
//! let plane = Plane::new(&a, &b, &c).unwrap();
//!
//! let above = Trajectory::from_rows(&[[0.0, 0.0, 2.0]]);
//! assert_eq!(plane.above_or_below(&above).unwrap(), vec![1.0]);
//! ```

pub mod coordinate_system;
pub mod plane;
pub mod trajectory;

pub use coordinate_system::{Axis, CoordinateSystem, PlaneAngles, ProjectionAngles};
pub use nalgebra::Vector3;
pub use plane::Plane;
pub use trajectory::Trajectory;

/// Common result type for this library
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for trajectory geometry
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Two trajectories that must be aligned frame by frame are not
    #[error("Expected {expected} frames, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// A coordinate system needs distinct axes
    #[error("Invalid axis pair: {along:?} and {normal:?} must differ")]
    InvalidAxisPair { along: Axis, normal: Axis },
}

/// Fail with [`Error::LengthMismatch`] unless `actual == expected`.
pub(crate) fn check_len(expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::LengthMismatch { expected, actual })
    }
}

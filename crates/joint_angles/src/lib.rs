//! # Joint Angles
//!
//! Clinically meaningful joint angles from 3D marker trajectories. Each joint
//! gets a [`JointAngles`] result holding three per-frame series:
//!
//! - flexion/extension and abduction/adduction, read as signed angles of a
//!   segment vector inside chosen planes of a local coordinate system
//! - internal/external rotation, read as the twist between two segments
//!
//! Every series can be zeroed against a calibration frame. Zeroed angles are
//! wrapped back into `(-π, π]` so that crossing the ±180° boundary does not
//! corrupt the sequence.
//!
//! ## Example
//!
//! ```rust
//! use joint_angles::{JointAngles, PlaneSequence, ZeroFrameSpec};
//! use marker_geometry::{CoordinateSystem, Trajectory, Vector3};
//!
//! let frame = CoordinateSystem::world(Trajectory::constant(Vector3::zeros(), 3));
//! let shank = Trajectory::from_rows(&[[1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]]);
//!
//! let mut knee = JointAngles::with_zero_frame(ZeroFrameSpec::Uniform(0));
//! let planes = PlaneSequence::parse(&[Some("xy"), None]).unwrap();
//! knee.flex_abd(&frame, &shank, planes, [1.0, 1.0]).unwrap();
//!
//! let degrees = knee.flexion().unwrap().series().to_degrees();
//! assert!((degrees[2] - 90.0).abs() < 1e-9);
//! assert!(knee.abduction().is_none());
//! ```

pub mod calibration;
pub mod joint;
pub mod planes;
pub mod readout;
pub mod series;

pub use calibration::{JointAxis, ZeroFrame, ZeroFrameSpec};
pub use joint::{AngleProvenance, AxisAngles, JointAngles, JointId};
pub use planes::{AnglePlane, PlaneSequence};
pub use readout::{DegreeRow, DegreeTable};
pub use series::AngleSeries;

/// Common result type for this library
pub type Result<T> = std::result::Result<T, Error>;

/// Broad category of an [`Error`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller passed a malformed value
    InvalidArgument,
    /// The result is not in a state that allows the operation
    PreconditionViolation,
    /// No axis carries data to answer the question
    DomainGap,
}

/// Error types for joint angle extraction
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Zero frame slice with the wrong number of entries
    #[error("Zero frame must have 3 entries (flexion, abduction, rotation), got {actual}")]
    InvalidZeroFrameLength { actual: usize },

    /// Calibration frame outside the series
    #[error("Zero frame {frame} for {axis} is out of range for {len} frames")]
    ZeroFrameOutOfRange {
        axis: JointAxis,
        frame: usize,
        len: usize,
    },

    /// Plane sequence with the wrong number of entries
    #[error(
        "Plane sequence must have 2 entries (flexion plane, abduction plane), got {actual}"
    )]
    InvalidPlaneSequenceLength { actual: usize },

    /// Plane name other than xy, xz, zx or yz
    #[error("Unknown plane '{name}', expected one of xy, xz, zx, yz")]
    UnknownPlane { name: String },

    /// Axis index other than 0, 1 or 2
    #[error("Axis index must be 0, 1 or 2, got {index}")]
    InvalidAxisIndex { index: usize },

    /// Calibration frame whose angle is undefined, e.g. collinear markers
    #[error("Zero frame {frame} for {axis} has no defined angle")]
    DegenerateZeroFrame { axis: JointAxis, frame: usize },

    /// Frame outside the computed series
    #[error("Frame {frame} is out of range for {len} frames")]
    FrameOutOfRange { frame: usize, len: usize },

    /// Reading a result before any angles were computed
    #[error("Joint angles are empty, compute angles first")]
    EmptyResult,

    /// Re-zeroing an axis that was never computed
    #[error("The {axis} angle has not been computed")]
    AxisNotComputed { axis: JointAxis },

    /// All three axes are absent
    #[error("Flexion, abduction and rotation are all absent")]
    NoAngles,

    #[error(transparent)]
    Geometry(#[from] marker_geometry::Error),
}

impl Error {
    /// Broad category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidZeroFrameLength { .. }
            | Error::ZeroFrameOutOfRange { .. }
            | Error::InvalidPlaneSequenceLength { .. }
            | Error::UnknownPlane { .. }
            | Error::InvalidAxisIndex { .. }
            | Error::DegenerateZeroFrame { .. }
            | Error::FrameOutOfRange { .. }
            | Error::Geometry(_) => ErrorKind::InvalidArgument,
            Error::EmptyResult | Error::AxisNotComputed { .. } => ErrorKind::PreconditionViolation,
            Error::NoAngles => ErrorKind::DomainGap,
        }
    }
}

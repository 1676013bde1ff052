use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One of the three anatomical angles of a joint
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum JointAxis {
    Flexion,
    Abduction,
    Rotation,
}

impl JointAxis {
    /// All axes in index order
    pub const ALL: [JointAxis; 3] = [
        JointAxis::Flexion,
        JointAxis::Abduction,
        JointAxis::Rotation,
    ];

    /// Position of this axis in per-axis triples
    pub fn index(self) -> usize {
        match self {
            JointAxis::Flexion => 0,
            JointAxis::Abduction => 1,
            JointAxis::Rotation => 2,
        }
    }
}

impl TryFrom<usize> for JointAxis {
    type Error = Error;

    fn try_from(index: usize) -> Result<Self> {
        JointAxis::ALL
            .get(index)
            .copied()
            .ok_or(Error::InvalidAxisIndex { index })
    }
}

impl fmt::Display for JointAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JointAxis::Flexion => "flexion",
            JointAxis::Abduction => "abduction",
            JointAxis::Rotation => "rotation",
        };
        f.write_str(name)
    }
}

/// How a caller asks for zero calibration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZeroFrameSpec {
    /// Do not zero any axis
    NoCalibration,
    /// One optional frame per axis: flexion, abduction, rotation
    PerAxis([Option<usize>; 3]),
    /// The same frame for every axis
    Uniform(usize),
}

impl ZeroFrameSpec {
    /// Build a per-axis spec from a slice that must hold exactly three entries
    ///
    /// # Example
    /// ```rust
    /// use joint_angles::ZeroFrameSpec;
    ///
    /// let spec = ZeroFrameSpec::from_slice(&[Some(0), None, Some(10)]).unwrap();
    /// assert_eq!(spec, ZeroFrameSpec::PerAxis([Some(0), None, Some(10)]));
    /// assert!(ZeroFrameSpec::from_slice(&[Some(0)]).is_err());
    /// ```
    pub fn from_slice(frames: &[Option<usize>]) -> Result<Self> {
        let frames: [Option<usize>; 3] = frames
            .try_into()
            .map_err(|_| Error::InvalidZeroFrameLength {
                actual: frames.len(),
            })?;
        Ok(ZeroFrameSpec::PerAxis(frames))
    }
}

impl From<usize> for ZeroFrameSpec {
    fn from(frame: usize) -> Self {
        ZeroFrameSpec::Uniform(frame)
    }
}

impl From<[Option<usize>; 3]> for ZeroFrameSpec {
    fn from(frames: [Option<usize>; 3]) -> Self {
        ZeroFrameSpec::PerAxis(frames)
    }
}

/// Resolved calibration frame per axis
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ZeroFrame([Option<usize>; 3]);

impl ZeroFrame {
    /// Calibration frame for `axis`, if zeroing is enabled for it
    pub fn get(&self, axis: JointAxis) -> Option<usize> {
        self.0[axis.index()]
    }

    /// All three entries in axis order
    pub fn as_array(&self) -> [Option<usize>; 3] {
        self.0
    }

    /// Calibration frame for `axis`, checked against a series of `len` frames
    pub(crate) fn checked(&self, axis: JointAxis, len: usize) -> Result<Option<usize>> {
        match self.get(axis) {
            Some(frame) if frame >= len => Err(Error::ZeroFrameOutOfRange { axis, frame, len }),
            frame => Ok(frame),
        }
    }
}

impl Default for ZeroFrame {
    fn default() -> Self {
        ZeroFrame([Some(0); 3])
    }
}

impl From<ZeroFrameSpec> for ZeroFrame {
    fn from(spec: ZeroFrameSpec) -> Self {
        match spec {
            ZeroFrameSpec::NoCalibration => ZeroFrame([None; 3]),
            ZeroFrameSpec::PerAxis(frames) => ZeroFrame(frames),
            ZeroFrameSpec::Uniform(frame) => ZeroFrame([Some(frame); 3]),
        }
    }
}

use std::fmt;
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::calibration::JointAxis;
use crate::joint::JointAngles;
use crate::{Error, Result};

/// The three axes of a joint at one frame, in degrees
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DegreeRow {
    pub frame: usize,
    pub flexion: Option<f64>,
    pub abduction: Option<f64>,
    pub rotation: Option<f64>,
}

/// Consecutive [`DegreeRow`]s over a frame range
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DegreeTable {
    pub rows: Vec<DegreeRow>,
}

impl DegreeTable {
    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// One axis as a column, `None` where the axis is absent
    pub fn column(&self, axis: JointAxis) -> Vec<Option<f64>> {
        self.rows
            .iter()
            .map(|row| match axis {
                JointAxis::Flexion => row.flexion,
                JointAxis::Abduction => row.abduction,
                JointAxis::Rotation => row.rotation,
            })
            .collect()
    }
}

impl JointAngles {
    /// Frames covered by the data, `0..N`
    ///
    /// N comes from the first computed axis in flexion, abduction, rotation
    /// order.
    pub fn frame_range(&self) -> Result<Range<usize>> {
        if self.is_empty() {
            return Err(Error::EmptyResult);
        }
        JointAxis::ALL
            .iter()
            .find_map(|&axis| self.axis(axis))
            .map(|computed| 0..computed.series().len())
            .ok_or(Error::NoAngles)
    }

    /// All three axes in degrees at one frame
    pub fn frame_readout(&self, frame: usize) -> Result<DegreeRow> {
        let range = self.frame_range()?;
        if !range.contains(&frame) {
            return Err(Error::FrameOutOfRange {
                frame,
                len: range.end,
            });
        }
        Ok(self.row(frame))
    }

    /// Rows of degrees over `frame_range`, or over all frames when `None`
    ///
    /// The end of an explicit range is clamped to the available frames.
    pub fn degree_table(&self, frame_range: Option<Range<usize>>) -> Result<DegreeTable> {
        let available = self.frame_range()?;
        let range = match frame_range {
            Some(range) => range.start..range.end.min(available.end),
            None => available,
        };
        Ok(DegreeTable {
            rows: range.map(|frame| self.row(frame)).collect(),
        })
    }

    fn row(&self, frame: usize) -> DegreeRow {
        let degrees = |axis| {
            self.axis(axis)
                .and_then(|computed| computed.series().get(frame))
                .map(f64::to_degrees)
        };
        DegreeRow {
            frame,
            flexion: degrees(JointAxis::Flexion),
            abduction: degrees(JointAxis::Abduction),
            rotation: degrees(JointAxis::Rotation),
        }
    }
}

impl fmt::Display for JointAngles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JointAngles '{}'", self.id())?;
        if self.is_empty() {
            return write!(f, " (empty)");
        }
        let frames = self.frame_range().map(|range| range.end).unwrap_or(0);
        write!(f, " (frames: {}", frames)?;
        for axis in JointAxis::ALL {
            match self.axis(axis).map(|computed| computed.provenance().plane) {
                Some(Some(plane)) => write!(f, ", {}: {}", axis, plane)?,
                Some(None) => write!(f, ", {}: yes", axis)?,
                None => write!(f, ", {}: -", axis)?,
            }
        }
        write!(f, ")")
    }
}

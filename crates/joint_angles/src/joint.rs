use std::fmt;

use log::{debug, trace, warn};
use marker_geometry::{Plane, ProjectionAngles, Trajectory};
use uuid::Uuid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::calibration::{JointAxis, ZeroFrame, ZeroFrameSpec};
use crate::planes::{AnglePlane, PlaneSequence};
use crate::series::{AngleSeries, wrap_to_pi};
use crate::{Error, Result};

/// Opaque identifier that tells joint angle results apart in a pipeline
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JointId(Uuid);

impl JointId {
    /// Create a new random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for JointId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How an axis series was produced
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AngleProvenance {
    /// Projection plane, absent for rotation
    pub plane: Option<AnglePlane>,

    /// Angle subtracted from every frame, absent when not zeroed
    pub zero_angle: Option<f64>,

    /// Calibration frame the zero angle was read from
    pub zero_frame: Option<usize>,

    /// Multiplier applied to the series
    pub flip_sign: f64,
}

/// One computed axis: the series and the record of how it was made
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AxisAngles {
    series: AngleSeries,
    provenance: AngleProvenance,
}

impl AxisAngles {
    /// Per-frame angles in radians
    pub fn series(&self) -> &AngleSeries {
        &self.series
    }

    /// How the series was produced
    pub fn provenance(&self) -> &AngleProvenance {
        &self.provenance
    }
}

/// Zero `raw` against its value at `zero_frame`, if any
///
/// Returns the wrapped series and the angle that was subtracted. A
/// non-finite angle at the calibration frame would poison every frame, so it
/// is rejected.
fn zero_series(
    axis: JointAxis,
    raw: &AngleSeries,
    zero_frame: Option<usize>,
) -> Result<(AngleSeries, Option<f64>)> {
    match zero_frame.and_then(|frame| raw.get(frame).map(|angle| (frame, angle))) {
        Some((frame, zero_angle)) if !zero_angle.is_finite() => {
            Err(Error::DegenerateZeroFrame { axis, frame })
        }
        Some((_, zero_angle)) => Ok((raw.offset_by(zero_angle), Some(zero_angle))),
        None => Ok((raw.clone(), None)),
    }
}

fn check_flip_sign(flip_sign: f64) {
    if flip_sign.abs() != 1.0 {
        warn!("flip_sign {} is not +/-1 and will rescale the angles", flip_sign);
    }
}

/// Flexion, abduction and rotation of one joint over a whole recording
///
/// A result starts empty. It is filled by [`JointAngles::flex_abd`] and/or
/// [`JointAngles::compute_rotation`], in either order, and read many times
/// after that.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JointAngles {
    id: JointId,
    is_empty: bool,
    zero_frame: ZeroFrame,
    flexion: Option<AxisAngles>,
    abduction: Option<AxisAngles>,
    rotation: Option<AxisAngles>,
}

impl JointAngles {
    /// Create an empty result that zeroes every axis at frame 0
    pub fn new() -> Self {
        Self {
            id: JointId::new(),
            is_empty: true,
            zero_frame: ZeroFrame::default(),
            flexion: None,
            abduction: None,
            rotation: None,
        }
    }

    /// Create an empty result with the given calibration
    pub fn with_zero_frame(spec: ZeroFrameSpec) -> Self {
        let mut angles = Self::new();
        angles.set_zero_frame(spec);
        angles
    }

    /// Replace the calibration frames
    ///
    /// Zeroing happens during extraction, so this must be called before
    /// [`JointAngles::flex_abd`] or [`JointAngles::compute_rotation`] to take
    /// effect.
    pub fn set_zero_frame(&mut self, spec: ZeroFrameSpec) {
        self.zero_frame = spec.into();
    }

    /// Current calibration frames
    pub fn zero_frame(&self) -> ZeroFrame {
        self.zero_frame
    }

    /// Identifier of this result
    pub fn id(&self) -> JointId {
        self.id
    }

    /// True until an extraction call has completed
    pub fn is_empty(&self) -> bool {
        self.is_empty
    }

    /// Flexion, if computed
    pub fn flexion(&self) -> Option<&AxisAngles> {
        self.flexion.as_ref()
    }

    /// Abduction, if computed
    pub fn abduction(&self) -> Option<&AxisAngles> {
        self.abduction.as_ref()
    }

    /// Rotation, if computed
    pub fn rotation(&self) -> Option<&AxisAngles> {
        self.rotation.as_ref()
    }

    /// The given axis, if computed
    pub fn axis(&self, axis: JointAxis) -> Option<&AxisAngles> {
        match axis {
            JointAxis::Flexion => self.flexion.as_ref(),
            JointAxis::Abduction => self.abduction.as_ref(),
            JointAxis::Rotation => self.rotation.as_ref(),
        }
    }

    fn axis_mut(&mut self, axis: JointAxis) -> &mut Option<AxisAngles> {
        match axis {
            JointAxis::Flexion => &mut self.flexion,
            JointAxis::Abduction => &mut self.abduction,
            JointAxis::Rotation => &mut self.rotation,
        }
    }

    /// Compute flexion and abduction of `target_vector` in `coordinate_system`
    ///
    /// The raw angle for each axis is read from the plane named in
    /// `plane_seq`, zeroed against the calibration frame, wrapped into
    /// `(-π, π]` and finally multiplied by that axis's `flip_sign`. A `None`
    /// plane leaves the axis absent.
    ///
    /// # Example
    /// ```rust
    /// use joint_angles::{JointAngles, PlaneSequence};
    /// use marker_geometry::{CoordinateSystem, Trajectory, Vector3};
    ///
    /// let frame = CoordinateSystem::world(Trajectory::constant(Vector3::zeros(), 2));
    /// let shank = Trajectory::from_rows(&[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
    ///
    /// let mut knee = JointAngles::new();
    /// knee.flex_abd(&frame, &shank, PlaneSequence::default(), [1.0, 1.0]).unwrap();
    ///
    /// let flexion = knee.flexion().unwrap().series();
    /// assert!((flexion[1] - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    /// ```
    pub fn flex_abd<C>(
        &mut self,
        coordinate_system: &C,
        target_vector: &Trajectory,
        plane_seq: PlaneSequence,
        flip_sign: [f64; 2],
    ) -> Result<()>
    where
        C: ProjectionAngles + ?Sized,
    {
        let raw = coordinate_system.projection_angles(target_vector)?;

        let mut computed = [None, None];
        let requested = [
            (JointAxis::Flexion, plane_seq.flexion),
            (JointAxis::Abduction, plane_seq.abduction),
        ];
        for (slot, (axis, plane)) in requested.into_iter().enumerate() {
            let Some(plane) = plane else {
                continue;
            };
            let series = plane.select(&raw);
            let zero_frame = self.zero_frame.checked(axis, series.len())?;
            let (zeroed, zero_angle) = zero_series(axis, &series, zero_frame)?;

            check_flip_sign(flip_sign[slot]);
            computed[slot] = Some(AxisAngles {
                series: zeroed.scaled(flip_sign[slot]),
                provenance: AngleProvenance {
                    plane: Some(plane),
                    zero_angle,
                    zero_frame,
                    flip_sign: flip_sign[slot],
                },
            });
        }

        debug!(
            "joint {}: flexion/abduction from planes {:?}/{:?} over {} frames, zero frames {:?}",
            self.id,
            plane_seq.flexion,
            plane_seq.abduction,
            raw.len(),
            self.zero_frame.as_array()
        );

        let [flexion, abduction] = computed;
        self.flexion = flexion;
        self.abduction = abduction;
        self.is_empty = false;
        Ok(())
    }

    /// Compute the twist between two segments
    ///
    /// Segment 1 is given by `pt1a`/`pt1b` and segment 2 by `pt2a`/`pt2b`.
    /// Each segment's plane passes through its own two points and the
    /// midpoint of the other pair. The rotation is the angle between the
    /// two plane normals, signed by the side of plane 2 that `pt1a` lies on
    /// and multiplied by `flip_sign`, then zeroed against the rotation
    /// calibration frame.
    ///
    /// # Example
    /// ```rust
    /// use joint_angles::{JointAngles, ZeroFrameSpec};
    /// use marker_geometry::Trajectory;
    ///
    /// // Thigh epicondyles above, shank malleoli below, shank twisted by 0.5 rad
    /// let (c, s) = (0.5_f64.cos(), 0.5_f64.sin());
    /// let pt1a = Trajectory::from_rows(&[[1.0, 0.0, 1.0]]);
    /// let pt1b = Trajectory::from_rows(&[[-1.0, 0.0, 1.0]]);
    /// let pt2a = Trajectory::from_rows(&[[-c, -s, -1.0]]);
    /// let pt2b = Trajectory::from_rows(&[[c, s, -1.0]]);
    ///
    /// let mut knee = JointAngles::with_zero_frame(ZeroFrameSpec::NoCalibration);
    /// knee.compute_rotation(&pt1a, &pt1b, &pt2a, &pt2b, 1.0).unwrap();
    ///
    /// let rotation = knee.rotation().unwrap().series();
    /// assert!((rotation[0] - 0.5).abs() < 1e-9);
    /// ```
    pub fn compute_rotation(
        &mut self,
        pt1a: &Trajectory,
        pt1b: &Trajectory,
        pt2a: &Trajectory,
        pt2b: &Trajectory,
        flip_sign: f64,
    ) -> Result<()> {
        let pt1mid = Trajectory::mid_point(pt1a, pt1b)?;
        let pt2mid = Trajectory::mid_point(pt2a, pt2b)?;
        let plane1 = Plane::new(pt1a, pt1b, &pt2mid)?;
        let plane2 = Plane::new(pt2a, pt2b, &pt1mid)?;

        let unsigned = Trajectory::angle(plane1.normal_vector(), plane2.normal_vector())?;
        let side = plane2.above_or_below(pt1a)?;
        check_flip_sign(flip_sign);
        let signed: AngleSeries = unsigned
            .iter()
            .zip(&side)
            .map(|(angle, sign)| angle * sign * flip_sign)
            .collect();

        let zero_frame = self.zero_frame.checked(JointAxis::Rotation, signed.len())?;
        let (zeroed, zero_angle) = zero_series(JointAxis::Rotation, &signed, zero_frame)?;

        debug!(
            "joint {}: rotation over {} frames, zero frame {:?}",
            self.id,
            zeroed.len(),
            zero_frame
        );

        self.rotation = Some(AxisAngles {
            // Unzeroed rotation still goes through the (-π, π] wrap
            series: zeroed.wrapped(),
            provenance: AngleProvenance {
                plane: None,
                zero_angle,
                zero_frame,
                flip_sign,
            },
        });
        self.is_empty = false;
        Ok(())
    }

    /// Re-zero a stored axis against its current calibration frame
    ///
    /// `idx` is 0, 1 or 2 for flexion, abduction or rotation. The result is
    /// returned and the stored series is left untouched; see
    /// [`JointAngles::apply_zero_by_idx`] to keep it.
    pub fn zero_by_idx(&self, idx: usize) -> Result<AngleSeries> {
        let axis = JointAxis::try_from(idx)?;
        self.rezeroed(axis).map(|(series, _)| series)
    }

    /// Re-zero a stored axis and keep the result
    ///
    /// The provenance keeps describing the stored series: its zero angle
    /// becomes the total offset from the unzeroed angle, in the same domain
    /// extraction records it in (before the flip for flexion and abduction,
    /// after it for rotation), and its zero frame becomes the current one.
    /// Without a calibration frame for the axis nothing changes.
    pub fn apply_zero_by_idx(&mut self, idx: usize) -> Result<()> {
        let axis = JointAxis::try_from(idx)?;
        let (series, offset) = self.rezeroed(axis)?;
        let Some(offset) = offset else {
            return Ok(());
        };
        let zero_frame = self.zero_frame.get(axis);
        if let Some(stored) = self.axis_mut(axis) {
            let provenance = stored.provenance;
            let unflipped = match axis {
                JointAxis::Rotation => offset,
                JointAxis::Flexion | JointAxis::Abduction => offset * provenance.flip_sign,
            };
            stored.series = series;
            stored.provenance = AngleProvenance {
                zero_angle: Some(wrap_to_pi(provenance.zero_angle.unwrap_or(0.0) + unflipped)),
                zero_frame,
                ..provenance
            };
        }
        Ok(())
    }

    fn rezeroed(&self, axis: JointAxis) -> Result<(AngleSeries, Option<f64>)> {
        let stored = self.axis(axis).ok_or(Error::AxisNotComputed { axis })?;
        let zero_frame = self.zero_frame.checked(axis, stored.series.len())?;
        trace!("joint {}: re-zeroing {} at frame {:?}", self.id, axis, zero_frame);
        zero_series(axis, &stored.series, zero_frame)
    }
}

impl Default for JointAngles {
    fn default() -> Self {
        Self::new()
    }
}

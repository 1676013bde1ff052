use std::f64::consts::{PI, TAU};
use std::ops::Index;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Bring an angle difference back into `(-π, π]`
///
/// The two corrections are independent: subtracting one angle in `[-π, π]`
/// from another can cross at most one boundary. Inputs exactly at `-π` are
/// left as they are.
///
/// # Example
/// ```rust
/// use joint_angles::series::wrap_to_pi;
///
/// let wrapped = wrap_to_pi(-6.0);
/// assert!((wrapped - (std::f64::consts::TAU - 6.0)).abs() < 1e-12);
/// ```
pub fn wrap_to_pi(angle: f64) -> f64 {
    let angle = if angle > PI { angle - TAU } else { angle };
    if angle < -PI { angle + TAU } else { angle }
}

/// A signed angle per animation frame, in radians
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AngleSeries(Vec<f64>);

impl AngleSeries {
    /// Create a series from per-frame angles in radians
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    /// Number of frames
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the series holds no frames
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Per-frame angles in radians
    pub fn values(&self) -> &[f64] {
        &self.0
    }

    /// Angle at a single frame
    pub fn get(&self, frame: usize) -> Option<f64> {
        self.0.get(frame).copied()
    }

    /// Subtract `zero_angle` from every frame and wrap into `(-π, π]`
    pub fn offset_by(&self, zero_angle: f64) -> AngleSeries {
        self.0.iter().map(|a| wrap_to_pi(a - zero_angle)).collect()
    }

    /// Wrap every frame into `(-π, π]` without offsetting
    pub fn wrapped(&self) -> AngleSeries {
        self.offset_by(0.0)
    }

    /// Multiply every frame by `factor`
    pub fn scaled(&self, factor: f64) -> AngleSeries {
        self.0.iter().map(|a| a * factor).collect()
    }

    /// Per-frame angles in degrees
    pub fn to_degrees(&self) -> Vec<f64> {
        self.0.iter().map(|a| a.to_degrees()).collect()
    }

    /// Iterate over the per-frame angles
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.0.iter()
    }

    /// Consume the series, returning the raw angles
    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl From<Vec<f64>> for AngleSeries {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl FromIterator<f64> for AngleSeries {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Index<usize> for AngleSeries {
    type Output = f64;

    fn index(&self, frame: usize) -> &f64 {
        &self.0[frame]
    }
}

impl<'a> IntoIterator for &'a AngleSeries {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use test_log::test;

    #[test]
    fn test_wrap_to_pi_boundaries() {
        assert_eq!(wrap_to_pi(0.0), 0.0);
        assert_eq!(wrap_to_pi(PI), PI);
        assert_eq!(wrap_to_pi(-PI), -PI);
        assert_relative_eq!(wrap_to_pi(PI + 0.5), -PI + 0.5, epsilon = 1e-12);
        assert_relative_eq!(wrap_to_pi(-PI - 0.5), PI - 0.5, epsilon = 1e-12);
        assert_eq!(wrap_to_pi(TAU), 0.0);
        assert_eq!(wrap_to_pi(-TAU), 0.0);
    }

    #[test]
    fn test_offset_by_stays_in_range() {
        let steps = 73;
        let sample = |i: usize| -PI + TAU * i as f64 / (steps - 1) as f64;
        let raw: AngleSeries = (0..steps).map(sample).collect();

        for zero in 0..steps {
            let shifted = raw.offset_by(raw[zero]);
            assert_eq!(shifted[zero], 0.0);
            for a in &shifted {
                assert!((-PI..=PI).contains(a), "{a} escaped [-pi, pi]");
            }
        }
    }

    #[test]
    fn test_offset_by_wraps_negative() {
        let raw = AngleSeries::new(vec![3.0, -3.0]);
        let zeroed = raw.offset_by(raw[0]);
        assert_eq!(zeroed[0], 0.0);
        assert_relative_eq!(zeroed[1], TAU - 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_scaled_twice_is_identity() {
        let raw = AngleSeries::new(vec![0.25, -1.5, 3.1]);
        assert_eq!(raw.scaled(-1.0).scaled(-1.0), raw);
    }

    #[test]
    fn test_to_degrees() {
        let s = AngleSeries::new(vec![PI, -PI / 2.0]);
        let deg = s.to_degrees();
        assert_relative_eq!(deg[0], 180.0, epsilon = 1e-12);
        assert_relative_eq!(deg[1], -90.0, epsilon = 1e-12);
    }

    #[test]
    fn test_accessors() {
        let s: AngleSeries = vec![0.1, 0.2].into();
        assert_eq!(s.len(), 2);
        assert!(!s.is_empty());
        assert_eq!(s.get(1), Some(0.2));
        assert_eq!(s.get(2), None);
        assert_eq!(s.values(), &[0.1, 0.2]);
        assert_eq!(s.wrapped(), s);
        assert_eq!(s.into_inner(), vec![0.1, 0.2]);
    }
}

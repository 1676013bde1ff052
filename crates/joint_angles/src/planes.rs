use std::fmt;
use std::str::FromStr;

use marker_geometry::PlaneAngles;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{AngleSeries, Error, Result};

/// A cardinal plane of a local coordinate system
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AnglePlane {
    Xy,
    /// Also accepted as `"zx"`
    Xz,
    Yz,
}

impl AnglePlane {
    /// The raw projection angle series that belongs to this plane
    pub fn select(self, angles: &PlaneAngles) -> AngleSeries {
        let raw = match self {
            AnglePlane::Xy => &angles.xy,
            AnglePlane::Xz => &angles.xz,
            AnglePlane::Yz => &angles.yz,
        };
        AngleSeries::new(raw.clone())
    }
}

impl FromStr for AnglePlane {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "xy" => Ok(AnglePlane::Xy),
            "xz" | "zx" => Ok(AnglePlane::Xz),
            "yz" => Ok(AnglePlane::Yz),
            _ => Err(Error::UnknownPlane {
                name: name.to_string(),
            }),
        }
    }
}

impl fmt::Display for AnglePlane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnglePlane::Xy => "xy",
            AnglePlane::Xz => "xz",
            AnglePlane::Yz => "yz",
        };
        f.write_str(name)
    }
}

/// Planes for flexion and abduction, in that order
///
/// A `None` slot skips that axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlaneSequence {
    pub flexion: Option<AnglePlane>,
    pub abduction: Option<AnglePlane>,
}

impl PlaneSequence {
    /// Create a plane sequence
    pub fn new(flexion: Option<AnglePlane>, abduction: Option<AnglePlane>) -> Self {
        Self { flexion, abduction }
    }

    /// Parse plane names, flexion first and abduction second
    ///
    /// # Example
    /// ```rust
    /// use joint_angles::{AnglePlane, PlaneSequence};
    ///
    /// let planes = PlaneSequence::parse(&[Some("zx"), None]).unwrap();
    /// assert_eq!(planes.flexion, Some(AnglePlane::Xz));
    /// assert_eq!(planes.abduction, None);
    ///
    /// assert!(PlaneSequence::parse(&[Some("xy")]).is_err());
    /// assert!(PlaneSequence::parse(&[Some("xy"), Some("ab")]).is_err());
    /// ```
    pub fn parse(names: &[Option<&str>]) -> Result<Self> {
        let [flexion, abduction] = names else {
            return Err(Error::InvalidPlaneSequenceLength {
                actual: names.len(),
            });
        };
        Ok(Self {
            flexion: flexion.map(str::parse::<AnglePlane>).transpose()?,
            abduction: abduction.map(str::parse::<AnglePlane>).transpose()?,
        })
    }
}

impl Default for PlaneSequence {
    fn default() -> Self {
        Self::new(Some(AnglePlane::Xy), Some(AnglePlane::Xz))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_parse_names() {
        assert_eq!("xy".parse::<AnglePlane>().unwrap(), AnglePlane::Xy);
        assert_eq!("xz".parse::<AnglePlane>().unwrap(), AnglePlane::Xz);
        assert_eq!("zx".parse::<AnglePlane>().unwrap(), AnglePlane::Xz);
        assert_eq!("yz".parse::<AnglePlane>().unwrap(), AnglePlane::Yz);

        let err = "XY".parse::<AnglePlane>().unwrap_err();
        assert!(matches!(err, Error::UnknownPlane { ref name } if name == "XY"));
    }

    #[test]
    fn test_sequence_length() {
        for names in [&[][..], &[None][..], &[None, None, None][..]] {
            let err = PlaneSequence::parse(names).unwrap_err();
            assert!(
                matches!(err, Error::InvalidPlaneSequenceLength { actual } if actual == names.len())
            );
        }
    }

    #[test]
    fn test_sequence_default() {
        let planes = PlaneSequence::default();
        assert_eq!(planes, PlaneSequence::parse(&[Some("xy"), Some("xz")]).unwrap());
    }

    #[test]
    fn test_select() {
        let angles = PlaneAngles {
            xy: vec![0.1],
            xz: vec![0.2],
            yz: vec![0.3],
        };
        assert_eq!(AnglePlane::Xy.select(&angles).values(), &[0.1]);
        assert_eq!(AnglePlane::Xz.select(&angles).values(), &[0.2]);
        assert_eq!(AnglePlane::Yz.select(&angles).values(), &[0.3]);
    }

    #[test]
    fn test_display_round_trip() {
        for plane in [AnglePlane::Xy, AnglePlane::Xz, AnglePlane::Yz] {
            assert_eq!(plane.to_string().parse::<AnglePlane>().unwrap(), plane);
        }
    }
}

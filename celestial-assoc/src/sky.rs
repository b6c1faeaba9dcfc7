//! Sky positions, coordinate frames and the spherical geometry used by the
//! spatial filters and the association likelihood.
//!
//! Positions are stored in degrees. Angular separation uses the Vincenty
//! formula, which stays accurate from coincident points to antipodes.
//! Frame conversion between equatorial (ICRS/J2000) and galactic coordinates
//! is a fixed rotation, so it needs no epoch.

use crate::errors::{AssocError, AssocResult, InvalidArgumentKind};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const PI: f64 = std::f64::consts::PI;
pub const DEG_TO_RAD: f64 = PI / 180.0;
pub const RAD_TO_DEG: f64 = 180.0 / PI;

/// Rotation from galactic to ICRS unit vectors, rows indexed by galactic axis.
///
/// Derived from the IAU galactic pole (RA 192.859508°, Dec 27.128336°) and
/// the galactic centre direction (Liu, Zhu & Zhang 2011, A&A 526, A16).
#[allow(clippy::excessive_precision)]
const GALACTIC_TO_ICRS: [[f64; 3]; 3] = [
    [
        -0.054875560416215368492398900454,
        -0.873437090234885048760383168409,
        -0.483835015548713226831774175116,
    ],
    [
        0.494109427875583673525222371358,
        -0.444829629960011178146614061616,
        0.746982244497218890527388004556,
    ],
    [
        -0.867666149019004701181616534570,
        -0.198076373431201528180486091412,
        0.455983776175066922272100478348,
    ],
];

/// Spherical coordinate system a position is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CoordinateFrame {
    /// Right ascension / declination (ICRS, J2000).
    #[default]
    Equatorial,
    /// Galactic longitude / latitude (l, b).
    Galactic,
}

impl fmt::Display for CoordinateFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equatorial => f.write_str("equatorial"),
            Self::Galactic => f.write_str("galactic"),
        }
    }
}

/// A point on the celestial sphere, in degrees.
///
/// Longitude is normalized into `[0, 360)` on construction; latitude must lie
/// in `[-90, 90]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawSkyPosition"))]
pub struct SkyPosition {
    lon: f64,
    lat: f64,
    frame: CoordinateFrame,
}

/// Unvalidated wire form; deserialization goes through [`SkyPosition::new`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawSkyPosition {
    lon: f64,
    lat: f64,
    #[serde(default)]
    frame: CoordinateFrame,
}

#[cfg(feature = "serde")]
impl TryFrom<RawSkyPosition> for SkyPosition {
    type Error = AssocError;

    fn try_from(raw: RawSkyPosition) -> AssocResult<Self> {
        Self::new(raw.lon, raw.lat, raw.frame)
    }
}

impl SkyPosition {
    /// # Errors
    /// [`InvalidArgumentKind::Coordinate`] if either angle is non-finite or
    /// the latitude is outside `[-90, 90]`.
    pub fn new(lon_deg: f64, lat_deg: f64, frame: CoordinateFrame) -> AssocResult<Self> {
        if !lon_deg.is_finite() || !lat_deg.is_finite() {
            return Err(AssocError::invalid_argument(
                InvalidArgumentKind::Coordinate,
                format!("non-finite position ({}, {})", lon_deg, lat_deg),
            ));
        }
        if !(-90.0..=90.0).contains(&lat_deg) {
            return Err(AssocError::invalid_argument(
                InvalidArgumentKind::Coordinate,
                format!("latitude {} outside [-90, 90]", lat_deg),
            ));
        }
        Ok(Self {
            lon: normalize_lon(lon_deg),
            lat: lat_deg,
            frame,
        })
    }

    pub fn equatorial(ra_deg: f64, dec_deg: f64) -> AssocResult<Self> {
        Self::new(ra_deg, dec_deg, CoordinateFrame::Equatorial)
    }

    pub fn galactic(l_deg: f64, b_deg: f64) -> AssocResult<Self> {
        Self::new(l_deg, b_deg, CoordinateFrame::Galactic)
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn frame(&self) -> CoordinateFrame {
        self.frame
    }

    /// Express this position in `frame`. Returns a copy if the frame already matches.
    pub fn to_frame(&self, frame: CoordinateFrame) -> Self {
        if frame == self.frame {
            return *self;
        }
        let v = self.unit_vector();
        let m = &GALACTIC_TO_ICRS;
        let rotated = match frame {
            // galactic -> equatorial: M^T * v
            CoordinateFrame::Equatorial => [
                m[0][0] * v[0] + m[1][0] * v[1] + m[2][0] * v[2],
                m[0][1] * v[0] + m[1][1] * v[1] + m[2][1] * v[2],
                m[0][2] * v[0] + m[1][2] * v[1] + m[2][2] * v[2],
            ],
            // equatorial -> galactic: M * v
            CoordinateFrame::Galactic => [
                m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
                m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
                m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
            ],
        };
        Self::from_unit_vector(rotated, frame)
    }

    /// Great-circle distance to `other` in degrees. `other` is converted into
    /// this position's frame first.
    pub fn separation_deg(&self, other: &SkyPosition) -> f64 {
        let other = other.to_frame(self.frame);
        angular_separation_deg(self.lon, self.lat, other.lon, other.lat)
    }

    /// Bearing of `other` as seen from this position, in radians east of north.
    pub fn position_angle_rad(&self, other: &SkyPosition) -> f64 {
        let other = other.to_frame(self.frame);
        position_angle_rad(self.lon, self.lat, other.lon, other.lat)
    }

    fn unit_vector(&self) -> [f64; 3] {
        let (sin_lat, cos_lat) = libm::sincos(self.lat * DEG_TO_RAD);
        let (sin_lon, cos_lon) = libm::sincos(self.lon * DEG_TO_RAD);
        [cos_lon * cos_lat, sin_lon * cos_lat, sin_lat]
    }

    fn from_unit_vector(v: [f64; 3], frame: CoordinateFrame) -> Self {
        let d2 = v[0] * v[0] + v[1] * v[1];
        let lon = if d2 != 0.0 {
            libm::atan2(v[1], v[0]) * RAD_TO_DEG
        } else {
            0.0
        };
        let lat = if d2 != 0.0 || v[2] != 0.0 {
            libm::atan2(v[2], libm::sqrt(d2)) * RAD_TO_DEG
        } else {
            0.0
        };
        Self {
            lon: normalize_lon(lon),
            lat: lat.clamp(-90.0, 90.0),
            frame,
        }
    }
}

impl fmt::Display for SkyPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (lon_name, lat_name) = match self.frame {
            CoordinateFrame::Equatorial => ("RA", "Dec"),
            CoordinateFrame::Galactic => ("l", "b"),
        };
        write!(
            f,
            "{} {:.6}° {} {:+.6}°",
            lon_name, self.lon, lat_name, self.lat
        )
    }
}

/// Wrap a longitude into `[0, 360)`.
pub fn normalize_lon(lon_deg: f64) -> f64 {
    let wrapped = libm::fmod(lon_deg, 360.0);
    let wrapped = if wrapped < 0.0 { wrapped + 360.0 } else { wrapped };
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Signed longitude difference `lon2 - lon1` wrapped into `[-180, 180]`.
pub fn lon_difference(lon1_deg: f64, lon2_deg: f64) -> f64 {
    let d = libm::fmod(lon2_deg - lon1_deg, 360.0);
    if d > 180.0 {
        d - 360.0
    } else if d < -180.0 {
        d + 360.0
    } else {
        d
    }
}

/// Angular distance between two points on the sphere, in degrees (Vincenty).
pub fn angular_separation_deg(lon1_deg: f64, lat1_deg: f64, lon2_deg: f64, lat2_deg: f64) -> f64 {
    angular_separation_rad(lon1_deg, lat1_deg, lon2_deg, lat2_deg) * RAD_TO_DEG
}

/// Angular distance between two points on the sphere, in radians (Vincenty).
pub fn angular_separation_rad(lon1_deg: f64, lat1_deg: f64, lon2_deg: f64, lat2_deg: f64) -> f64 {
    let (sin_lat1, cos_lat1) = libm::sincos(lat1_deg * DEG_TO_RAD);
    let (sin_lat2, cos_lat2) = libm::sincos(lat2_deg * DEG_TO_RAD);
    let (sin_dlon, cos_dlon) = libm::sincos((lon2_deg - lon1_deg) * DEG_TO_RAD);

    let num = libm::sqrt(
        (cos_lat2 * sin_dlon).powi(2)
            + (cos_lat1 * sin_lat2 - sin_lat1 * cos_lat2 * cos_dlon).powi(2),
    );
    let den = sin_lat1 * sin_lat2 + cos_lat1 * cos_lat2 * cos_dlon;

    libm::atan2(num, den)
}

/// Position angle of point 2 as seen from point 1, radians east of north.
pub fn position_angle_rad(lon1_deg: f64, lat1_deg: f64, lon2_deg: f64, lat2_deg: f64) -> f64 {
    let (sin_lat1, cos_lat1) = libm::sincos(lat1_deg * DEG_TO_RAD);
    let (sin_lat2, cos_lat2) = libm::sincos(lat2_deg * DEG_TO_RAD);
    let (sin_dlon, cos_dlon) = libm::sincos((lon2_deg - lon1_deg) * DEG_TO_RAD);

    libm::atan2(
        sin_dlon * cos_lat2,
        cos_lat1 * sin_lat2 - sin_lat1 * cos_lat2 * cos_dlon,
    )
}

//! Input records and the immutable entries built from them.

use crate::sky::{CoordinateFrame, SkyPosition};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One row handed over by an external catalog loader.
///
/// Position fields are optional so a loader can pass through rows with
/// missing values; [`Catalog::from_records`](super::Catalog::from_records)
/// rejects them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CatalogRecord {
    pub id: String,
    /// Longitude (RA or l), in degrees.
    pub lon: Option<f64>,
    /// Latitude (Dec or b), in degrees.
    pub lat: Option<f64>,
    pub frame: CoordinateFrame,
}

impl CatalogRecord {
    pub fn new(id: impl Into<String>, lon: f64, lat: f64, frame: CoordinateFrame) -> Self {
        Self {
            id: id.into(),
            lon: Some(lon),
            lat: Some(lat),
            frame,
        }
    }

    pub fn equatorial(id: impl Into<String>, ra_deg: f64, dec_deg: f64) -> Self {
        Self::new(id, ra_deg, dec_deg, CoordinateFrame::Equatorial)
    }

    pub fn galactic(id: impl Into<String>, l_deg: f64, b_deg: f64) -> Self {
        Self::new(id, l_deg, b_deg, CoordinateFrame::Galactic)
    }
}

impl<S: Into<String>> From<(S, f64, f64, CoordinateFrame)> for CatalogRecord {
    fn from((id, lon, lat, frame): (S, f64, f64, CoordinateFrame)) -> Self {
        Self::new(id, lon, lat, frame)
    }
}

/// A catalog source: identifier plus position, tagged with its catalog's name.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub catalog_name: String,
    pub id: String,
    pub position: SkyPosition,
}

impl fmt::Display for CatalogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.catalog_name,
            self.id,
            self.position.lon(),
            self.position.lat()
        )
    }
}

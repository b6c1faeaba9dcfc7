//! Two-stage circular selection over catalog entries.
//!
//! The coarse stage is an axis-aligned longitude/latitude box around the
//! search center. Its longitude half-width is `radius / cos(lat_edge)`, where
//! `lat_edge` is the box edge closest to a pole, so it always contains the
//! whole search circle. Boxes that reach a pole, or whose half-width reaches
//! 180°, drop the longitude test entirely.
//!
//! The exact stage keeps entries whose great-circle distance from the center
//! is within the radius. Both stages preserve catalog order.

use super::record::CatalogEntry;
use crate::sky::{lon_difference, SkyPosition, DEG_TO_RAD};

/// Slack added to the box so that entries sitting exactly on the circle are
/// not lost to rounding before the exact test sees them.
const BOX_MARGIN_DEG: f64 = 1e-7;

#[derive(Debug, Clone, Copy)]
pub(crate) struct SearchBox {
    lat_min: f64,
    lat_max: f64,
    lon_center: f64,
    /// `None` when every longitude must be accepted.
    lon_half_width: Option<f64>,
}

impl SearchBox {
    pub(crate) fn around(center: &SkyPosition, radius_deg: f64) -> Self {
        let lat_min = center.lat() - radius_deg - BOX_MARGIN_DEG;
        let lat_max = center.lat() + radius_deg + BOX_MARGIN_DEG;

        let lon_half_width = if lat_max >= 90.0 || lat_min <= -90.0 {
            None
        } else {
            let lat_edge = libm::fmax(libm::fabs(lat_min), libm::fabs(lat_max));
            let half_width = (radius_deg + BOX_MARGIN_DEG) / libm::cos(lat_edge * DEG_TO_RAD);
            (half_width < 180.0).then_some(half_width)
        };

        Self {
            lat_min,
            lat_max,
            lon_center: center.lon(),
            lon_half_width,
        }
    }

    pub(crate) fn contains(&self, position: &SkyPosition) -> bool {
        let lat = position.lat();
        if lat < self.lat_min || lat > self.lat_max {
            return false;
        }
        match self.lon_half_width {
            None => true,
            Some(half_width) => {
                libm::fabs(lon_difference(self.lon_center, position.lon())) <= half_width
            }
        }
    }
}

/// Stage 1: entries inside the bounding box. `center` must already be in the
/// entries' frame.
pub(crate) fn coarse_stage<'a>(
    entries: &'a [CatalogEntry],
    center: &SkyPosition,
    radius_deg: f64,
) -> impl Iterator<Item = &'a CatalogEntry> {
    let search_box = SearchBox::around(center, radius_deg);
    entries
        .iter()
        .filter(move |entry| search_box.contains(&entry.position))
}

/// Stage 2: keep candidates within `radius_deg` of `center`.
pub(crate) fn exact_stage<'a>(
    candidates: impl Iterator<Item = &'a CatalogEntry>,
    center: SkyPosition,
    radius_deg: f64,
) -> impl Iterator<Item = &'a CatalogEntry> {
    candidates.filter(move |entry| center.separation_deg(&entry.position) <= radius_deg)
}

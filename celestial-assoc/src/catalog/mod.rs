//! In-memory reference catalogs.
//!
//! A [`Catalog`] is built once from [`CatalogRecord`]s supplied by an
//! external loader and is read-only afterwards. It answers two spatial
//! questions:
//!
//! - [`Catalog::select_circle`]: which entries lie within a radius of a point,
//!   via a coarse bounding-box pass followed by an exact great-circle pass
//!   (see the `select` submodule)
//! - [`Catalog::local_density`]: how many entries per square degree surround
//!   a point, used as the chance-coincidence rate by the association engine

mod record;
mod select;

pub use record::{CatalogEntry, CatalogRecord};

use crate::errors::{AssocError, AssocResult, InvalidArgumentKind};
use crate::sky::{CoordinateFrame, SkyPosition, PI};
use std::fmt;

/// Radius of the region used to estimate local source density, in degrees.
pub const DEFAULT_DENSITY_RADIUS_DEG: f64 = 4.0;

/// An immutable collection of sources from one reference catalog.
///
/// All entries share [`Catalog::frame`].
#[derive(Debug, Clone)]
pub struct Catalog {
    name: String,
    frame: CoordinateFrame,
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Build a catalog from loader records, keeping their order.
    ///
    /// # Errors
    /// [`AssocError::CatalogBuild`] if `records` is empty, if any record has a
    /// missing or non-finite coordinate or a latitude outside `[-90, 90]`, or
    /// if the records do not all share one coordinate frame.
    pub fn from_records<I>(name: impl Into<String>, records: I) -> AssocResult<Self>
    where
        I: IntoIterator<Item = CatalogRecord>,
    {
        let name = name.into();
        let mut frame = None;
        let mut entries = Vec::new();

        for (index, record) in records.into_iter().enumerate() {
            let (lon, lat) = match (record.lon, record.lat) {
                (Some(lon), Some(lat)) => (lon, lat),
                _ => {
                    return Err(AssocError::catalog_build(
                        &name,
                        format!("record {} ({}) is missing a position field", index, record.id),
                    ))
                }
            };

            match frame {
                None => frame = Some(record.frame),
                Some(f) if f != record.frame => {
                    return Err(AssocError::catalog_build(
                        &name,
                        format!(
                            "record {} ({}) is {} but the catalog is {}",
                            index, record.id, record.frame, f
                        ),
                    ))
                }
                Some(_) => {}
            }

            let position = SkyPosition::new(lon, lat, record.frame).map_err(|e| {
                AssocError::catalog_build(
                    &name,
                    format!("record {} ({}) has a bad position: {}", index, record.id, e),
                )
            })?;

            entries.push(CatalogEntry {
                catalog_name: name.clone(),
                id: record.id,
                position,
            });
        }

        let Some(frame) = frame else {
            return Err(AssocError::catalog_build(&name, "no catalog records"));
        };

        tracing::debug!(catalog = %name, %frame, entries = entries.len(), "built catalog");

        Ok(Self {
            name,
            frame,
            entries,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn frame(&self) -> CoordinateFrame {
        self.frame
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CatalogEntry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Entries within `radius_deg` of `center`, in catalog order.
    ///
    /// `center` may be in either frame; it is converted to the catalog frame.
    /// A radius of zero selects only entries coincident with `center`.
    ///
    /// # Errors
    /// [`InvalidArgumentKind::Radius`] if `radius_deg` is negative or non-finite.
    pub fn select_circle(
        &self,
        center: &SkyPosition,
        radius_deg: f64,
    ) -> AssocResult<Vec<&CatalogEntry>> {
        check_radius(radius_deg, true)?;
        let center = center.to_frame(self.frame);
        let candidates = select::coarse_stage(&self.entries, &center, radius_deg);
        Ok(select::exact_stage(candidates, center, radius_deg).collect())
    }

    /// The coarse bounding-box candidates for a circle, before the exact
    /// distance test. Always a superset of [`Catalog::select_circle`].
    pub fn coarse_candidates(
        &self,
        center: &SkyPosition,
        radius_deg: f64,
    ) -> AssocResult<Vec<&CatalogEntry>> {
        check_radius(radius_deg, true)?;
        let center = center.to_frame(self.frame);
        Ok(select::coarse_stage(&self.entries, &center, radius_deg).collect())
    }

    pub fn count_in_circle(&self, center: &SkyPosition, radius_deg: f64) -> AssocResult<usize> {
        check_radius(radius_deg, true)?;
        let center = center.to_frame(self.frame);
        let candidates = select::coarse_stage(&self.entries, &center, radius_deg);
        Ok(select::exact_stage(candidates, center, radius_deg).count())
    }

    /// Catalog sources per square degree within `radius_deg` of `center`.
    ///
    /// Uses the flat-sky area `π r²`.
    ///
    /// # Errors
    /// [`InvalidArgumentKind::Radius`] if `radius_deg <= 0` or is non-finite.
    pub fn local_density(&self, center: &SkyPosition, radius_deg: f64) -> AssocResult<f64> {
        check_radius(radius_deg, false)?;
        let count = self.count_in_circle(center, radius_deg)?;
        Ok(count as f64 / (PI * radius_deg * radius_deg))
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl fmt::Display for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} entries, {})",
            self.name,
            self.entries.len(),
            self.frame
        )
    }
}

fn check_radius(radius_deg: f64, allow_zero: bool) -> AssocResult<()> {
    let ok = radius_deg.is_finite() && (radius_deg > 0.0 || (allow_zero && radius_deg == 0.0));
    if ok {
        Ok(())
    } else {
        Err(AssocError::invalid_argument(
            InvalidArgumentKind::Radius,
            format!("radius {} must be finite and positive", radius_deg),
        ))
    }
}

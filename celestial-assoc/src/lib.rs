//! Probabilistic counterpart association against in-memory sky catalogs.
//!
//! Given the position of a source with a circular or elliptical error, finds
//! entries of a reference catalog that are plausible counterparts and scores
//! each with a posterior association probability. The probability weighs a
//! Gaussian positional likelihood against the chance of an unrelated catalog
//! source landing that close, estimated from the local catalog density.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`sky`] | [`SkyPosition`], [`CoordinateFrame`], angular separation, position angle, galactic ↔ equatorial |
//! | [`catalog`] | [`Catalog`] built from [`CatalogRecord`]s, two-stage circle selection, local density |
//! | [`registry`] | [`CatalogRegistry`], eager and lazily loaded named catalogs |
//! | [`association`] | [`ErrorModel`], likelihood/posterior, [`AssociationEngine`] |
//! | [`config`] | [`EngineConfig`] (density radius, candidate cut) |
//! | [`errors`] | [`AssocError`] and [`AssocResult`] |
//!
//! # Quick Start
//!
//! ```
//! use celestial_assoc::{
//!     AssociationEngine, CatalogRecord, CatalogRegistry, ErrorModel, SkyPosition,
//! };
//!
//! let mut registry = CatalogRegistry::new();
//! registry.register_catalog(
//!     "obj-blazar",
//!     vec![CatalogRecord::equatorial("CRATES J2253+1608", 343.4906, 16.1482)],
//! )?;
//!
//! let engine = AssociationEngine::new(&registry);
//! let position = SkyPosition::equatorial(343.495, 16.149)?;
//! let error = ErrorModel::circular(0.016 / 2.45)?;
//!
//! let results = engine.query(&position, error, "obj-blazar", 0.33, 0.8)?;
//! assert_eq!(results.len(), 1);
//! # Ok::<(), celestial_assoc::AssocError>(())
//! ```
//!
//! # Result Order
//!
//! Query results are sorted by **ascending** posterior probability, so the
//! strongest association is the last element. [`best_first`] reverses this.
//!
//! # Features
//!
//! - **`serde`** — `Serialize`/`Deserialize` for positions, frames, error
//!   models, catalog records and [`EngineConfig`].

pub mod association;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod registry;
pub mod sky;

pub use association::{
    best_first, AssociationEngine, AssociationQuery, AssociationResult, ErrorInput, ErrorModel,
};
pub use catalog::{Catalog, CatalogEntry, CatalogRecord, DEFAULT_DENSITY_RADIUS_DEG};
pub use config::EngineConfig;
pub use errors::{AssocError, AssocResult, InvalidArgumentKind};
pub use registry::CatalogRegistry;
pub use sky::{CoordinateFrame, SkyPosition};

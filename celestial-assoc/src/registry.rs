//! Named collection of reference catalogs.
//!
//! Catalogs are published once and never mutated. They can be registered
//! eagerly from records, inserted prebuilt, or registered lazily with a
//! loader that runs on first use. Each lazy catalog has its own
//! initialization cell, so loading one catalog never blocks queries against
//! another.

use crate::catalog::{Catalog, CatalogRecord};
use crate::errors::{AssocError, AssocResult};
use once_cell::sync::OnceCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

type Loader = Box<dyn Fn() -> AssocResult<Vec<CatalogRecord>> + Send + Sync>;

struct CatalogSlot {
    cell: OnceCell<Arc<Catalog>>,
    loader: Option<Loader>,
}

impl CatalogSlot {
    fn loaded(catalog: Catalog) -> Self {
        Self {
            cell: OnceCell::with_value(Arc::new(catalog)),
            loader: None,
        }
    }

    fn lazy(loader: Loader) -> Self {
        Self {
            cell: OnceCell::new(),
            loader: Some(loader),
        }
    }

    fn get(&self, name: &str) -> AssocResult<Arc<Catalog>> {
        self.cell
            .get_or_try_init(|| {
                let loader = self.loader.as_ref().ok_or_else(|| {
                    AssocError::catalog_build(name, "catalog has neither data nor loader")
                })?;
                tracing::debug!(catalog = name, "loading catalog on first use");
                let records = loader().map_err(|e| match e {
                    AssocError::CatalogBuild { .. } => e,
                    other => AssocError::catalog_build(name, other.to_string()),
                })?;
                Catalog::from_records(name, records).map(Arc::new)
            })
            .cloned()
    }
}

/// Catalogs keyed by caller-supplied name.
///
/// `Send + Sync`: once populated, a registry can be shared across threads
/// and queried concurrently.
#[derive(Default)]
pub struct CatalogRegistry {
    catalogs: BTreeMap<String, CatalogSlot>,
}

impl CatalogRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from `records` and publish it under `name`.
    ///
    /// # Errors
    /// [`AssocError::CatalogBuild`] if the records are invalid or `name` is
    /// already registered. Other catalogs are unaffected.
    pub fn register_catalog<I>(&mut self, name: impl Into<String>, records: I) -> AssocResult<()>
    where
        I: IntoIterator<Item = CatalogRecord>,
    {
        let name = name.into();
        self.check_vacant(&name)?;
        let catalog = Catalog::from_records(name.clone(), records)?;
        tracing::info!(
            catalog = %name,
            entries = catalog.len(),
            frame = %catalog.frame(),
            "registered catalog"
        );
        self.catalogs.insert(name, CatalogSlot::loaded(catalog));
        Ok(())
    }

    /// Publish an already built catalog under its own name.
    pub fn insert_catalog(&mut self, catalog: Catalog) -> AssocResult<()> {
        let name = catalog.name().to_string();
        self.check_vacant(&name)?;
        tracing::info!(
            catalog = %name,
            entries = catalog.len(),
            frame = %catalog.frame(),
            "registered catalog"
        );
        self.catalogs.insert(name, CatalogSlot::loaded(catalog));
        Ok(())
    }

    /// Register `name` with a loader that is run once, on first lookup.
    ///
    /// If the loader (or building the catalog from its records) fails, the
    /// lookup returns [`AssocError::CatalogBuild`] and the next lookup tries
    /// again.
    pub fn register_lazy<F>(&mut self, name: impl Into<String>, loader: F) -> AssocResult<()>
    where
        F: Fn() -> AssocResult<Vec<CatalogRecord>> + Send + Sync + 'static,
    {
        let name = name.into();
        self.check_vacant(&name)?;
        tracing::info!(catalog = %name, "registered lazy catalog");
        self.catalogs
            .insert(name, CatalogSlot::lazy(Box::new(loader)));
        Ok(())
    }

    /// Look up a catalog, loading it first if it was registered lazily.
    ///
    /// # Errors
    /// [`AssocError::UnknownCatalog`] if `name` is not registered;
    /// [`AssocError::CatalogBuild`] if a lazy load fails.
    pub fn catalog(&self, name: &str) -> AssocResult<Arc<Catalog>> {
        let slot = self
            .catalogs
            .get(name)
            .ok_or_else(|| AssocError::unknown_catalog(name))?;
        slot.get(name)
    }

    pub fn catalog_names(&self) -> BTreeSet<String> {
        self.catalogs.keys().cloned().collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.catalogs.contains_key(name)
    }

    /// Whether `name` is registered and its data is in memory.
    pub fn is_loaded(&self, name: &str) -> bool {
        self.catalogs
            .get(name)
            .is_some_and(|slot| slot.cell.get().is_some())
    }

    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }

    fn check_vacant(&self, name: &str) -> AssocResult<()> {
        if self.catalogs.contains_key(name) {
            return Err(AssocError::catalog_build(name, "catalog is already registered"));
        }
        Ok(())
    }
}

impl fmt::Debug for CatalogRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.catalogs
                    .iter()
                    .map(|(name, slot)| (name, slot.cell.get().map(|c| c.len()))),
            )
            .finish()
    }
}

//! Counterpart search against registered catalogs.
//!
//! [`AssociationEngine::run`] takes an [`AssociationQuery`], selects
//! candidates within `search_sigma` major axes of the query position, scores
//! each with [`posterior_probability`], drops those at or below the threshold
//! and returns the rest **in ascending order of probability**. The weakest
//! surviving match comes first and the best match last; use [`best_first`]
//! for the reverse.

use super::error_model::ErrorModel;
use super::probability::{positional_likelihood, posterior_probability};
use crate::catalog::{Catalog, CatalogEntry};
use crate::config::EngineConfig;
use crate::errors::{AssocError, AssocResult, InvalidArgumentKind};
use crate::registry::CatalogRegistry;
use crate::sky::{SkyPosition, DEG_TO_RAD};
use std::collections::BTreeMap;

pub const DEFAULT_PRIOR_PROB: f64 = 0.5;
pub const DEFAULT_PROB_THRESHOLD: f64 = 0.5;

/// Parameters for one association query.
#[derive(Debug, Clone, PartialEq)]
pub struct AssociationQuery {
    /// Position of the source to associate. Either frame is accepted.
    pub position: SkyPosition,
    pub error: ErrorModel,
    /// Name of a catalog in the engine's registry.
    pub catalog: String,
    /// Prior probability that the counterpart is in this catalog at all, in (0, 1).
    pub prior_prob: f64,
    /// Results with posterior `<=` this value are dropped.
    pub prob_threshold: f64,
}

impl AssociationQuery {
    pub fn new(position: SkyPosition, error: ErrorModel, catalog: impl Into<String>) -> Self {
        Self {
            position,
            error,
            catalog: catalog.into(),
            prior_prob: DEFAULT_PRIOR_PROB,
            prob_threshold: DEFAULT_PROB_THRESHOLD,
        }
    }

    pub fn with_prior(mut self, prior_prob: f64) -> Self {
        self.prior_prob = prior_prob;
        self
    }

    pub fn with_threshold(mut self, prob_threshold: f64) -> Self {
        self.prob_threshold = prob_threshold;
        self
    }

    fn validate(&self) -> AssocResult<()> {
        self.error.validate()?;
        if !(self.prior_prob > 0.0 && self.prior_prob < 1.0) {
            return Err(AssocError::invalid_argument(
                InvalidArgumentKind::PriorProbability,
                format!("prior {} outside (0, 1)", self.prior_prob),
            ));
        }
        if !(0.0..=1.0).contains(&self.prob_threshold) {
            return Err(AssocError::invalid_argument(
                InvalidArgumentKind::Threshold,
                format!("threshold {} outside [0, 1]", self.prob_threshold),
            ));
        }
        Ok(())
    }
}

/// A candidate counterpart and its posterior association probability.
#[derive(Debug, Clone, PartialEq)]
pub struct AssociationResult {
    pub probability: f64,
    pub entry: CatalogEntry,
    /// Distance from the query position, in degrees.
    pub separation_deg: f64,
}

/// Scores query positions against the catalogs of a [`CatalogRegistry`].
///
/// Holds no per-query state; a single engine can serve concurrent queries.
#[derive(Debug, Clone, Copy)]
pub struct AssociationEngine<'r> {
    registry: &'r CatalogRegistry,
    config: EngineConfig,
}

impl<'r> AssociationEngine<'r> {
    pub fn new(registry: &'r CatalogRegistry) -> Self {
        Self {
            registry,
            config: EngineConfig::default(),
        }
    }

    /// # Errors
    /// [`InvalidArgumentKind::Radius`] if the configuration is invalid.
    pub fn with_config(registry: &'r CatalogRegistry, config: EngineConfig) -> AssocResult<Self> {
        config.validate()?;
        Ok(Self { registry, config })
    }

    pub fn registry(&self) -> &'r CatalogRegistry {
        self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Positional form of [`AssociationEngine::run`].
    pub fn query(
        &self,
        position: &SkyPosition,
        error: ErrorModel,
        catalog_name: &str,
        prior_prob: f64,
        prob_threshold: f64,
    ) -> AssocResult<Vec<AssociationResult>> {
        let query = AssociationQuery {
            position: *position,
            error,
            catalog: catalog_name.to_string(),
            prior_prob,
            prob_threshold,
        };
        self.run(&query)
    }

    /// Find counterparts of `query.position` in `query.catalog`.
    ///
    /// Results are sorted by ascending probability; entries with equal
    /// probability keep catalog order.
    ///
    /// # Errors
    /// [`AssocError::InvalidArgument`] for an invalid error model, prior or
    /// threshold; [`AssocError::UnknownCatalog`] if the catalog is not
    /// registered; [`AssocError::CatalogBuild`] if a lazily registered
    /// catalog fails to load.
    pub fn run(&self, query: &AssociationQuery) -> AssocResult<Vec<AssociationResult>> {
        query.validate()?;
        let catalog = self.registry.catalog(&query.catalog)?;
        self.score(&catalog, query)
    }

    /// Run `query` against every registered catalog, ignoring `query.catalog`.
    ///
    /// Any failure aborts the whole call.
    pub fn query_all(
        &self,
        query: &AssociationQuery,
    ) -> AssocResult<BTreeMap<String, Vec<AssociationResult>>> {
        query.validate()?;
        let mut results = BTreeMap::new();
        for name in self.registry.catalog_names() {
            let catalog = self.registry.catalog(&name)?;
            let matches = self.score(&catalog, query)?;
            results.insert(name, matches);
        }
        Ok(results)
    }

    fn score(
        &self,
        catalog: &Catalog,
        query: &AssociationQuery,
    ) -> AssocResult<Vec<AssociationResult>> {
        let search_radius = self.config.search_sigma * query.error.major_deg();
        let candidates = catalog.select_circle(&query.position, search_radius)?;

        if candidates.is_empty() {
            tracing::debug!(
                catalog = catalog.name(),
                position = %query.position,
                search_radius,
                "no candidates"
            );
            return Ok(Vec::new());
        }

        let chance_prob = catalog.local_density(&query.position, self.config.density_radius_deg)?;
        let center = query.position.to_frame(catalog.frame());

        let mut results: Vec<AssociationResult> = candidates
            .into_iter()
            .map(|entry| {
                let separation_deg = center.separation_deg(&entry.position);
                let posang = center.position_angle_rad(&entry.position);
                let pos_prob =
                    positional_likelihood(separation_deg * DEG_TO_RAD, posang, &query.error);
                AssociationResult {
                    probability: posterior_probability(pos_prob, chance_prob, query.prior_prob),
                    entry: entry.clone(),
                    separation_deg,
                }
            })
            .collect();

        let n_candidates = results.len();
        results.retain(|r| r.probability > query.prob_threshold);
        results.sort_by(|a, b| a.probability.total_cmp(&b.probability));

        tracing::debug!(
            catalog = catalog.name(),
            position = %query.position,
            search_radius,
            chance_prob,
            candidates = n_candidates,
            associations = results.len(),
            "association query"
        );

        Ok(results)
    }
}

/// Reorder ascending results so the most probable match comes first.
/// Entries with equal probability keep their relative order.
pub fn best_first(mut results: Vec<AssociationResult>) -> Vec<AssociationResult> {
    results.sort_by(|a, b| b.probability.total_cmp(&a.probability));
    results
}

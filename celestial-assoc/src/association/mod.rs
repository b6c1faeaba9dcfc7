//! Bayesian counterpart association.
//!
//! - [`error_model`] — circular or elliptical positional error, and the
//!   validated conversion from raw error arguments
//! - [`probability`] — Gaussian positional likelihood and the posterior odds
//! - [`engine`] — [`AssociationEngine`] tying catalogs, likelihood and
//!   thresholds together

pub mod engine;
pub mod error_model;
pub mod probability;

pub use engine::{
    best_first, AssociationEngine, AssociationQuery, AssociationResult, DEFAULT_PRIOR_PROB,
    DEFAULT_PROB_THRESHOLD,
};
pub use error_model::{ErrorInput, ErrorModel};
pub use probability::{gaussian_exponent, positional_likelihood, posterior_probability};

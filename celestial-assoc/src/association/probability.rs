//! Likelihood and posterior for a single candidate counterpart.
//!
//! The positional likelihood is a normalized 2-D elliptical Gaussian on the
//! tangent plane:
//!
//! ```text
//! phi      = posang - error_angle
//! delta    = ½ · angsep² · ((cos phi / major)² + (sin phi / minor)²)
//! pos_prob = exp(-delta) / (2π · major · minor)
//! ```
//!
//! with all angles in radians. The posterior that the candidate is the true
//! counterpart comes from the odds form of Bayes' rule:
//!
//! ```text
//! posterior = 1 / (1 + chance · (1 - prior) / (pos_prob · prior))
//! ```
//!
//! The tangent-plane approximation holds because candidates are cut at a
//! few sigma before these are evaluated.

use super::error_model::ErrorModel;
use crate::sky::PI;

/// Gaussian exponent `delta` for a candidate at `angsep_rad` along bearing
/// `posang_rad` (east of north).
pub fn gaussian_exponent(angsep_rad: f64, posang_rad: f64, error: &ErrorModel) -> f64 {
    let (major, minor, angle) = error.axes_rad();
    let (sin_phi, cos_phi) = libm::sincos(posang_rad - angle);
    0.5 * angsep_rad * angsep_rad * ((cos_phi / major).powi(2) + (sin_phi / minor).powi(2))
}

/// Positional likelihood density (per steradian) of a candidate.
pub fn positional_likelihood(angsep_rad: f64, posang_rad: f64, error: &ErrorModel) -> f64 {
    let (major, minor, _) = error.axes_rad();
    let delta = gaussian_exponent(angsep_rad, posang_rad, error);
    libm::exp(-delta) / (2.0 * PI * major * minor)
}

/// Posterior association probability from likelihood, chance rate and prior.
///
/// A likelihood of zero (the exponent underflowed) gives a posterior of zero.
/// The result is always within `[0, 1]`.
pub fn posterior_probability(pos_prob: f64, chance_prob: f64, prior_prob: f64) -> f64 {
    if pos_prob <= 0.0 || pos_prob.is_nan() {
        return 0.0;
    }
    let arg = chance_prob * (1.0 - prior_prob) / (pos_prob * prior_prob);
    let posterior = 1.0 / (1.0 + arg);
    if posterior.is_nan() {
        0.0
    } else {
        posterior.clamp(0.0, 1.0)
    }
}

//! GARCH options — configuration for estimation workflows.
//!
//! Purpose
//! -------
//! Collect configuration knobs for GARCH(1,1) estimation in one place,
//! making the workflow explicit and reproducible: the variance-seed policy,
//! maximum-likelihood optimizer options, and σ²-guards used during
//! recursion. Cross-cutting configuration stays out of low-level recursion
//! code; call sites pass explicit, validated options instead of ad-hoc
//! flags or process-wide state.
//!
//! Invariants & assumptions
//! ------------------------
//! - [`GarchOptions`] assumes its components (`VarianceInit`, `MLEOptions`,
//!   `SigmaGuards`) have already been validated by their own builders; it
//!   imposes no additional cross-field checks.
//! - Estimation uses `f64` throughout; positivity/finiteness constraints are
//!   enforced by the component types.
use crate::{
    optimization::loglik_optimizer::MLEOptions,
    volatility::{
        core::guards::SigmaGuards,
        errors::{GarchError, GarchResult},
    },
};

/// Seed policy for the first element of the conditional-variance recursion.
///
/// The GARCH recursion needs a value for `σ²_0`. The default policy seeds it
/// with the unconditional sample variance of the fitting window; a fixed
/// override exists for controlled experiments and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VarianceInit {
    /// Seed `σ²_0` with the sample variance of the residual window.
    SampleVariance,
    /// Seed `σ²_0` with a fixed, strictly positive value.
    Fixed(f64),
}

impl VarianceInit {
    /// Sample-variance seeding (the default).
    pub const fn sample_variance() -> Self {
        VarianceInit::SampleVariance
    }

    /// Fixed seeding with a validated strictly positive value.
    ///
    /// # Errors
    /// Returns [`GarchError::InvalidInitVariance`] for non-finite or
    /// non-positive values.
    pub fn fixed(value: f64) -> GarchResult<Self> {
        if !value.is_finite() || value <= 0.0 {
            return Err(GarchError::InvalidInitVariance { value });
        }
        Ok(VarianceInit::Fixed(value))
    }
}

/// Estimation-time configuration for GARCH(1,1) models.
///
/// Bundles the variance-seed policy (`init`), optimizer configuration
/// (`mle_opts`: tolerances, iteration cap, line search), and the σ²-guards
/// (`sigma_guards`) consumed by the recursion on every step.
///
/// Each field is assumed to come from its own validated builder or default;
/// this type is a plain carrier with no additional validation.
#[derive(Debug, Clone, PartialEq)]
pub struct GarchOptions {
    /// Seed policy for `σ²_0`.
    pub init: VarianceInit,
    /// Optimizer configuration used during MLE.
    pub mle_opts: MLEOptions,
    /// Bounds applied to each σ²_t during recursion.
    pub sigma_guards: SigmaGuards,
}

impl GarchOptions {
    /// Bundle already-validated components into a [`GarchOptions`].
    pub fn new(init: VarianceInit, mle_opts: MLEOptions, sigma_guards: SigmaGuards) -> Self {
        GarchOptions { init, mle_opts, sigma_guards }
    }
}

impl Default for GarchOptions {
    /// Sample-variance seeding, default optimizer settings (gradient
    /// tolerance 1e-6, 300-iteration cap, More–Thuente line search), and
    /// wide σ²-guards.
    fn default() -> Self {
        GarchOptions {
            init: VarianceInit::SampleVariance,
            mle_opts: MLEOptions::default(),
            sigma_guards: SigmaGuards::default(),
        }
    }
}

//! numerical_stability — numerically robust transformations for MLE.
//!
//! Purpose
//! -------
//! Collect numerically stable scalar transforms used to map unconstrained
//! optimizer parameters into the constrained GARCH(1,1) parameter space.
//! This module centralizes the small numeric tolerances and transform logic
//! so the rest of the optimization and volatility layers can assume
//! well-conditioned `f64` arithmetic.
//!
//! Key behaviors
//! -------------
//! - Provide stable scalar transforms (`safe_softplus`, its inverse, and
//!   `safe_logistic`) for mapping unconstrained reals into strictly
//!   positive or (0, 1) parameters without overflow/underflow.
//! - Implement a stationarity-aware fixed-arity softmax (`safe_softmax2`)
//!   from two logits to `(α, β, slack)` with `α + β < 1` by construction.
//! - Centralize the shared tolerances (`STATIONARITY_MARGIN`, `LOGIT_EPS`)
//!   so downstream modules apply consistent guards.
//!
//! Conventions
//! -----------
//! - GARCH parameter layout in θ-space is
//!   `θ = (θ_ω, θ_α, θ_β[, θ_ν])` with `ω = softplus(θ_ω)`,
//!   `(α, β, slack) = safe_softmax2(θ_α, θ_β)`, and (Student-t only)
//!   `ν = 2 + softplus(θ_ν)`.
//! - This module never logs, performs I/O, or touches global state; it is
//!   pure numerical helpers suitable for tight inner loops.
//!
//! Downstream usage
//! ----------------
//! - `volatility::core::params` uses these transforms in both directions
//!   (`from_theta` / `to_theta`).
//! - Optimizer code reuses `STATIONARITY_MARGIN` as the shared slack margin
//!   when validating fitted parameters.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{
    LOGIT_EPS, STATIONARITY_MARGIN, safe_logistic, safe_softmax2, safe_softmax2_deriv,
    safe_softplus, safe_softplus_inv,
};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::transformations::{
        LOGIT_EPS, STATIONARITY_MARGIN, safe_logistic, safe_softmax2, safe_softmax2_deriv,
        safe_softplus, safe_softplus_inv,
    };
}

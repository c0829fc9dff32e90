//! optimization — MLE stack, numerical helpers, and unified error surface.
//!
//! Purpose
//! -------
//! Provide a cohesive optimization layer for model fitting, combining an
//! Argmin-backed log-likelihood optimizer, numerically stable parameter
//! transforms, and a single error/result surface. Callers implement a
//! log-likelihood, choose tolerances, and obtain fitted parameters and
//! diagnostics without touching backend solver details.
//!
//! Key behaviors
//! -------------
//! - Expose a high-level API for **maximizing log-likelihoods** `ℓ(θ)`
//!   (`loglik_optimizer`), including configuration of solvers and stopping
//!   criteria.
//! - Supply shared numerical primitives (`numerical_stability`) for mapping
//!   unconstrained parameters into the constrained GARCH parameter space.
//! - Normalize configuration issues, numerical failures, and backend solver
//!   errors into a single enum (`errors::OptError`) with a common result
//!   alias (`OptResult<T>`).
//!
//! Conventions
//! -----------
//! - All solvers conceptually maximize a log-likelihood `ℓ(θ)` by minimizing
//!   an internal cost `c(θ) = -ℓ(θ)`; user-facing APIs and outcomes are
//!   expressed in terms of `ℓ`.
//! - Parameters and gradients are represented using `ndarray`-based aliases
//!   (`Theta`, `Grad`); mapping between unconstrained θ-space and structured
//!   model parameters `(ω, α, β[, ν])` is handled by the
//!   numerical-stability helpers and the volatility layer.
//! - Public optimization entrypoints that can fail return `OptResult<T>`;
//!   callers never see raw Argmin errors or model-specific error enums.
//! - This module and its submodules avoid I/O and logging (beyond the
//!   optional `obs_slog` observer); higher layers are responsible for
//!   reporting progress and diagnostics.
//!
//! Downstream usage
//! ----------------
//! - `volatility::models::garch` implements `LogLikelihood` for the GARCH
//!   model and calls `maximize` with a parameter guess, residual data, and
//!   `MLEOptions` to obtain an `OptimOutcome`.
//! - The volatility parameter layer uses `numerical_stability` for stable
//!   transforms and the shared stationarity margin.

pub mod errors;
pub mod loglik_optimizer;
pub mod numerical_stability;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{OptError, OptResult};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::loglik_optimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
}

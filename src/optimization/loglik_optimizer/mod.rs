//! loglik_optimizer — Argmin-backed maximum-likelihood estimation.
//!
//! Purpose
//! -------
//! Provide a small, uniform API for maximizing user-defined log-likelihoods
//! with L-BFGS: implement [`LogLikelihood`] for your model, choose
//! [`MLEOptions`], and call [`maximize`].
//!
//! Key behaviors
//! -------------
//! - Convert maximization of `ℓ(θ)` into minimization of `c(θ) = -ℓ(θ)`
//!   behind the scenes (`adapter`).
//! - Fall back to robust finite-difference gradients when a model does not
//!   implement an analytic gradient.
//! - Normalize solver results into [`OptimOutcome`] with explicit
//!   convergence/iteration-cap reporting.
//!
//! Downstream usage
//! ----------------
//! - The GARCH model implements [`LogLikelihood`] over its residual data and
//!   calls [`maximize`] from `fit`; no other module needs to touch Argmin
//!   types directly.

pub mod adapter;
pub mod api;
pub mod builders;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::maximize;
pub use self::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
pub use self::types::{
    Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente,
    MoreThuenteLS, Theta,
};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::{
        Cost, Grad, LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Theta, Tolerances,
        maximize,
    };
}

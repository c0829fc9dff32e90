//! volatility — GARCH(1,1) stack: core numerics, models, simulation, errors.
//!
//! Purpose
//! -------
//! Provide a cohesive conditional-heteroscedasticity layer that bundles
//! validated series containers, innovation distributions, the σ²-recursion,
//! model-level fitting/forecasting, and shared error types under a single
//! namespace. This is the surface the risk layer (rolling forecasts, VaR)
//! depends on.
//!
//! Key behaviors
//! -------------
//! - Collect core numerical and structural building blocks in [`core`]:
//!   residual/return containers, innovation families, σ²-recursions,
//!   parameter mappings, guard rails, validation, and configuration.
//! - Expose the user-facing GARCH(1,1) API in [`models`] via
//!   [`GarchModel`]: MLE in θ-space and multi-step variance forecasts.
//! - Provide seeded path simulation in [`simulation`] for consistency
//!   checks and examples.
//! - Centralize volatility-specific error types in [`errors`]
//!   (`GarchError`, `ParamError`, and the `GarchResult` / `ParamResult`
//!   aliases).
//!
//! Invariants & assumptions
//! ------------------------
//! - Residual data are carried in validated [`ResidualSeries`] instances:
//!   non-empty with finite entries.
//! - Unconstrained optimizer vectors θ have length 3 (normal) or 4
//!   (Student-t with jointly estimated shape); parameter mappings enforce
//!   positivity and a strict stationarity margin.
//! - σ² paths are clamped by [`SigmaGuards`] rather than letting
//!   NaNs/infinities propagate; fitted *parameters* are validated, never
//!   clamped.
//! - Scratch buffers are single-owner and not thread-safe; concurrent use
//!   of one [`GarchModel`] instance is not supported. Fitted parameter
//!   snapshots are immutable values and safe to share.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based throughout; series store the oldest observation
//!   first.
//! - The volatility stack performs no I/O and no logging; error conditions
//!   surface as `GarchResult` / `ParamResult`.
//!
//! Downstream usage
//! ----------------
//! - Typical flow:
//!   1. Construct a [`ResidualSeries`] from externally computed residuals.
//!   2. Choose an [`Innovation`] family and [`GarchOptions`].
//!   3. Build a [`GarchModel`] via `GarchModel::new(innovation, options, n)`.
//!   4. Fit by MLE with `fit(theta0, &data)` (use `default_theta0` for the
//!      conventional starting point).
//!   5. Forecast with `predict(horizon)` or hand the fitted snapshot to the
//!      rolling forecaster in the risk layer.

pub mod core;
pub mod errors;
pub mod models;
pub mod simulation;

// ---- Re-exports (primary public surface) ----------------------------------
//
// The “everyday” types most users need. More specialized items (validation
// helpers, the raw recursion functions) remain under their submodules.

pub use self::core::{
    GarchOptions, GarchParams, Innovation, MIN_FIT_OBS, ResidualSeries, ReturnSeries,
    SigmaGuards, VarianceForecast, VarianceInit,
};

pub use self::errors::{GarchError, GarchResult, ParamError, ParamResult};

pub use self::models::GarchModel;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use garch_var::volatility::prelude::*;
//
// to import the main volatility-model surface in a single line.

pub mod prelude {
    pub use super::{
        GarchError, GarchModel, GarchOptions, GarchParams, GarchResult, Innovation,
        ParamError, ParamResult, ResidualSeries, ReturnSeries, SigmaGuards, VarianceForecast,
        VarianceInit,
    };
}

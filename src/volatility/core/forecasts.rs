//! Out-of-sample σ²-forecasting for GARCH(1,1) — roll the variance recursion
//! beyond the sample without allocations.
//!
//! Purpose
//! -------
//! Provide allocation-free out-of-sample variance forecasting by separating
//! forecast storage from recursion logic and reusing a preallocated buffer.
//!
//! Key behaviors
//! -------------
//! - Produce the exact 1-step forecast from the fitted forecast-origin state
//!   `σ²_{T+1} = ω + α·ε_T² + β·σ²_T`.
//! - Extend to horizons `h ≥ 2` with the mean-reverting recursion
//!   `σ²_{T+h} = ω + (α + β)·σ²_{T+h−1}`, which follows from `E[ε²] = σ²`
//!   and converges geometrically to the unconditional variance
//!   `ω / (1 − α − β)`.
//! - Clamp each forecast using [`SigmaGuards`] for numerical stability.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based; `sigma2_forecast[i]` stores the (i+1)-step-ahead
//!   forecast `σ̂²_{T+i+1}`.
//! - The buffer may be longer than a given request; entries past the
//!   requested horizon keep their previous contents.
use ndarray::Array1;
use std::cell::RefCell;

use crate::volatility::{
    core::{guards::SigmaGuards, params::GarchParams, variance::guard_sigma2},
    errors::{GarchError, GarchResult},
};

/// Reusable buffer for out-of-sample σ²-forecast paths.
///
/// Lets forecasting routines run allocation-free by writing results into
/// preallocated storage; construct once with the maximum horizon and reuse
/// across calls. Interior mutability via `RefCell` keeps the buffer
/// writable behind shared references; intended for single-threaded use.
#[derive(Debug, Clone, PartialEq)]
pub struct VarianceForecast {
    /// Preallocated forecast path; `sigma2_forecast[i]` holds `σ̂²_{T+i+1}`
    /// after a forecasting routine has run.
    pub sigma2_forecast: RefCell<Array1<f64>>,
}

impl VarianceForecast {
    /// Create a zero-initialized forecast buffer for the given horizon.
    pub fn new(horizon: usize) -> Self {
        Self { sigma2_forecast: RefCell::new(Array1::zeros(horizon)) }
    }
}

/// Roll the GARCH(1,1) variance recursion forward for a fixed horizon and
/// write σ̂² into a preallocated buffer.
///
/// For each step `i` in `0..horizon`:
/// - `i == 0`: `σ̂²_{T+1} = ω + α·ε_T² + β·σ²_T` from the fitted
///   forecast-origin state in `params`.
/// - `i >= 1`: `σ̂²_{T+i+1} = ω + (α + β)·σ̂²_{T+i}`.
///
/// Each value is clamped into `[guards.min, guards.max]` after computation.
///
/// # Returns
/// The final forecast `σ̂²_{T+horizon}`.
///
/// # Errors
/// - [`GarchError::InvalidHorizon`] when `horizon == 0`.
///
/// # Panics
/// - May panic if `forecast_result` has capacity below `horizon`; buffer
///   sizing is treated as a logic error in the caller.
pub fn forecast_recursion(
    params: &GarchParams, horizon: usize, forecast_result: &VarianceForecast,
    guards: &SigmaGuards,
) -> GarchResult<f64> {
    if horizon == 0 {
        return Err(GarchError::InvalidHorizon { horizon });
    }
    let persistence = params.persistence();
    let mut forecast = forecast_result.sigma2_forecast.borrow_mut();
    forecast[0] = guard_sigma2(params.one_step_variance(), guards);
    for i in 1..horizon {
        forecast[i] = guard_sigma2(params.omega + persistence * forecast[i - 1], guards);
    }
    Ok(forecast[horizon - 1])
}

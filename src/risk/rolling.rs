//! Rolling 1-step-ahead volatility forecasting with periodic re-estimation.
//!
//! Purpose
//! -------
//! Orchestrate repeated fit/forecast cycles over a moving or expanding data
//! window, producing exactly one 1-step-ahead conditional-volatility
//! forecast per out-of-sample point and re-fitting the GARCH(1,1)
//! parameters at a configurable cadence.
//!
//! Key behaviors
//! -------------
//! - Partition the residual series into an initial in-sample window of
//!   `window_size` observations and a trailing out-of-sample region.
//! - Refit whenever `i % refit_every == 0` (including `i == 0`); between
//!   refits, advance the variance state with the stale parameters and the
//!   newly observed residuals.
//! - On a failed refit, either stop and return the partial forecasts
//!   (strict policy) or carry the last successful parameters forward
//!   (lenient policy) — an explicit configuration choice, never silent.
//!
//! Invariants & assumptions
//! ------------------------
//! - **No lookahead**: the estimation window for the forecast at target
//!   index `T` always ends at index `T − 1` inclusive; the forecast itself
//!   uses only residuals at indices `< T`.
//! - Exactly one [`ForecastPoint`] per out-of-sample index, in strictly
//!   increasing time order.
//! - Refit count equals `ceil(n_oos / refit_every)` when every refit
//!   succeeds.
//! - Refits are strictly ordered, synchronous steps; each refit's window
//!   depends on prior state being finalized.
use crate::{
    risk::errors::{RiskError, RiskResult},
    volatility::{
        core::{
            data::{ResidualSeries, ReturnSeries},
            distribution::Innovation,
            options::GarchOptions,
            params::GarchParams,
            validation::MIN_FIT_OBS,
            variance::guard_sigma2,
        },
        errors::GarchError,
        models::garch::GarchModel,
    },
};

/// Window regime for the rolling scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowMode {
    /// Fixed-size window of the most recent `window_size` observations,
    /// ending strictly before the forecast target.
    Moving,
    /// Anchored window growing from the start of the series through the
    /// point just before the forecast target.
    Expanding,
}

/// Policy applied when a scheduled refit fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefitPolicy {
    /// Stop the roll at the failed refit and return the partial forecasts
    /// with an abort record.
    Strict,
    /// Carry the last successful parameters forward and keep forecasting.
    /// A failure of the *first* refit still aborts (nothing to carry).
    Lenient,
}

/// Configuration of a rolling forecast run.
///
/// Validated at construction: `window_size` must exceed the minimum
/// fitting length and `refit_every` must be at least 1.
#[derive(Debug, Clone, PartialEq)]
pub struct RollConfig {
    /// In-sample window length.
    pub window_size: usize,
    /// Refit cadence in out-of-sample steps.
    pub refit_every: usize,
    /// Moving or expanding window regime.
    pub window_mode: WindowMode,
    /// Strict or lenient refit-failure handling.
    pub refit_policy: RefitPolicy,
    /// Innovation family for every refit (starting shape for Student-t).
    pub innovation: Innovation,
    /// Estimation options handed to every refit.
    pub garch_options: GarchOptions,
}

impl RollConfig {
    /// Construct a validated rolling configuration.
    ///
    /// # Errors
    /// - [`RiskError::InvalidWindowSize`] when `window_size <= MIN_FIT_OBS`.
    /// - [`RiskError::InvalidRefitCadence`] when `refit_every == 0`.
    pub fn new(
        window_size: usize, refit_every: usize, window_mode: WindowMode,
        refit_policy: RefitPolicy, innovation: Innovation, garch_options: GarchOptions,
    ) -> RiskResult<Self> {
        if window_size <= MIN_FIT_OBS {
            return Err(RiskError::InvalidWindowSize { window_size, min: MIN_FIT_OBS + 1 });
        }
        if refit_every == 0 {
            return Err(RiskError::InvalidRefitCadence { refit_every });
        }
        Ok(RollConfig {
            window_size,
            refit_every,
            window_mode,
            refit_policy,
            innovation,
            garch_options,
        })
    }
}

/// One 1-step-ahead volatility forecast.
///
/// `params` is the governing parameter snapshot with its forecast-origin
/// state advanced to this point's origin, so
/// `params.one_step_variance() == sigma_forecast²` (up to guard clamping)
/// and every forecast remains auditable after later refits supersede the
/// parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPoint {
    /// Target index of the forecast (0-based position in the full series).
    pub time_index: usize,
    /// Predicted conditional standard deviation for `time_index`.
    pub sigma_forecast: f64,
    /// Parameter snapshot (including the innovation distribution) used.
    pub params: GarchParams,
}

/// Record of a refit failure that stopped the roll.
#[derive(Debug, Clone, PartialEq)]
pub struct RollAbort {
    /// Out-of-sample step at which the refit failed (0-based).
    pub step: usize,
    /// Forecast target index of the failed step.
    pub time_index: usize,
    /// The underlying fit error.
    pub error: GarchError,
}

/// Result of a rolling forecast run.
///
/// Partial results are always preserved: when `aborted` is `Some`, the
/// forecasts computed before the failure are still present.
#[derive(Debug, Clone, PartialEq)]
pub struct RollOutcome {
    /// One forecast per completed out-of-sample step, in time order.
    pub forecasts: Vec<ForecastPoint>,
    /// Number of successful refits.
    pub refits: usize,
    /// Number of refit failures bridged by the lenient policy.
    pub carried_refits: usize,
    /// Abort record when the roll stopped early.
    pub aborted: Option<RollAbort>,
}

impl RollOutcome {
    /// Whether the roll covered the full out-of-sample region.
    pub fn is_complete(&self) -> bool {
        self.aborted.is_none()
    }
}

/// Orchestrates rolling fit/forecast cycles. Stateless; all run state lives
/// in locals of [`RollingForecaster::roll`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RollingForecaster;

impl RollingForecaster {
    /// Run the rolling forecast over the out-of-sample region.
    ///
    /// ## Procedure
    /// For each out-of-sample index `i` (target `T = window_size + i`):
    /// 1. If `i % refit_every == 0`, refit on the current window — moving
    ///    mode uses `[T − window_size, T)`, expanding mode `[0, T)`.
    /// 2. Compute the 1-step forecast
    ///    `σ̂²_T = ω + α·ε²_{T−1} + β·σ²_{T−1}` from the governing
    ///    (possibly stale) parameters and the most recent residual/variance
    ///    pair, clamped by the configured σ²-guards.
    /// 3. Emit a [`ForecastPoint`] for target `T`.
    ///
    /// ## Errors
    /// - [`RiskError::SeriesLengthMismatch`] when residuals and returns are
    ///   misaligned.
    /// - [`RiskError::SeriesTooShort`] when no out-of-sample point exists.
    ///
    /// Refit failures do **not** surface as `Err`: they are reported in the
    /// outcome (abort record under the strict policy or after a first-refit
    /// failure; `carried_refits` under the lenient policy), with all
    /// forecasts computed so far preserved.
    pub fn roll(
        residuals: &ResidualSeries, returns: &ReturnSeries, config: &RollConfig,
    ) -> RiskResult<RollOutcome> {
        let n = residuals.len();
        if returns.len() != n {
            return Err(RiskError::SeriesLengthMismatch {
                residuals: n,
                returns: returns.len(),
            });
        }
        if n < config.window_size + 1 {
            return Err(RiskError::SeriesTooShort { len: n, required: config.window_size + 1 });
        }

        let n_oos = n - config.window_size;
        let data = residuals.view();
        let guards = &config.garch_options.sigma_guards;
        let mut forecasts: Vec<ForecastPoint> = Vec::with_capacity(n_oos);
        let mut refits = 0usize;
        let mut carried_refits = 0usize;
        let mut current: Option<GarchParams> = None;
        // Forecast-origin state under the governing parameters:
        // (ε_{T−1}, σ²_{T−1}).
        let mut resid_prev = 0.0;
        let mut sigma2_prev = 0.0;

        for i in 0..n_oos {
            let target = config.window_size + i;
            let mut refreshed = false;

            if i % config.refit_every == 0 {
                let start = match config.window_mode {
                    WindowMode::Moving => target - config.window_size,
                    WindowMode::Expanding => 0,
                };
                match Self::fit_window(residuals, start, target, config) {
                    Ok(params) => {
                        resid_prev = params.resid_last;
                        sigma2_prev = params.sigma2_last;
                        current = Some(params);
                        refits += 1;
                        refreshed = true;
                    }
                    Err(error) => match (config.refit_policy, current.is_some()) {
                        (RefitPolicy::Lenient, true) => {
                            carried_refits += 1;
                        }
                        _ => {
                            return Ok(RollOutcome {
                                forecasts,
                                refits,
                                carried_refits,
                                aborted: Some(RollAbort { step: i, time_index: target, error }),
                            });
                        }
                    },
                }
            }

            if !refreshed {
                // Advance the state to the new origin: the residual at
                // T − 1 was observed, and the previous forecast is
                // σ²_{T−1} under the unchanged parameters.
                resid_prev = data[target - 1];
                sigma2_prev = forecasts
                    .last()
                    .map(|p| p.sigma_forecast * p.sigma_forecast)
                    .unwrap_or(sigma2_prev);
            }

            let governing = current
                .as_ref()
                .expect("refit at i == 0 either succeeds or aborts the roll");
            let point_params = GarchParams {
                resid_last: resid_prev,
                sigma2_last: sigma2_prev,
                ..governing.clone()
            };
            let sigma2_forecast = guard_sigma2(point_params.one_step_variance(), guards);
            forecasts.push(ForecastPoint {
                time_index: target,
                sigma_forecast: sigma2_forecast.sqrt(),
                params: point_params,
            });
        }

        Ok(RollOutcome { forecasts, refits, carried_refits, aborted: None })
    }

    /// Fit a fresh GARCH model on `residuals[start..end)` and extract the
    /// fitted parameter snapshot.
    fn fit_window(
        residuals: &ResidualSeries, start: usize, end: usize, config: &RollConfig,
    ) -> Result<GarchParams, GarchError> {
        let window = residuals.window(start, end)?;
        let mut model =
            GarchModel::new(config.innovation, config.garch_options.clone(), window.len());
        let theta0 = model.default_theta0(&window)?;
        model.fit(theta0, &window)?;
        model.fitted_params.take().ok_or(GarchError::ModelNotFitted)
    }
}

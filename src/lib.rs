//! garch_var — rolling GARCH(1,1) volatility forecasting and Value-at-Risk.
//!
//! Purpose
//! -------
//! Serve as the crate root for the GARCH-based VaR engine: fitting a
//! GARCH(1,1) conditional-variance model to mean-model residuals by maximum
//! likelihood, producing 1-step-ahead volatility forecasts through a
//! rolling re-estimation scheme, converting forecasts into quantile-based
//! VaR thresholds under normal or standardized Student-t innovations, and
//! backtesting the resulting exception counts against Binomial exceedance
//! bounds.
//!
//! Key behaviors
//! -------------
//! - Expose the volatility stack (`volatility`): validated series
//!   containers, innovation distributions, the σ²-recursion, and the
//!   GARCH(1,1) fit/forecast API.
//! - Expose the risk stack (`risk`): the rolling forecaster over moving or
//!   expanding windows and the pure VaR estimators (GARCH-conditional and
//!   delta-normal).
//! - Expose the backtesting stack (`statistical_tests`): the Kupiec
//!   exceedance-bounds test with its proportion-of-failures statistic.
//! - Expose the generic maximum-likelihood layer (`optimization`): an
//!   Argmin-backed L-BFGS wrapper over a `LogLikelihood` trait, with
//!   numerically stable constraint transforms.
//!
//! Invariants & assumptions
//! ------------------------
//! - The conditional mean model is an external collaborator: callers supply
//!   an already-computed residual series and a mean forecast per time index.
//!   This crate never performs mean-model selection or estimation.
//! - All configuration is carried in explicit, validated option records
//!   passed per call; there is no process-wide mutable state.
//! - Fitting is deterministic for identical inputs, initial guesses, and
//!   options; simulation takes an explicit RNG seed.
//!
//! Downstream usage
//! ----------------
//! - Typical flow: build a `ResidualSeries` and `ReturnSeries`, configure a
//!   `RollConfig`, call `RollingForecaster::roll`, map the forecasts to VaR
//!   thresholds with `risk::var::garch_var_series`, and evaluate them with
//!   `statistical_tests::kupiec::KupiecOutcome::backtest`.

pub mod optimization;
pub mod risk;
pub mod statistical_tests;
pub mod volatility;

//! risk — rolling volatility forecasting and VaR estimation.
//!
//! Purpose
//! -------
//! Turn fitted GARCH(1,1) dynamics into out-of-sample risk numbers: the
//! rolling forecaster produces one 1-step-ahead volatility forecast per
//! out-of-sample point under a configurable re-estimation scheme, and the
//! VaR estimators convert forecasts (or a constant volatility) into signed
//! return thresholds.
//!
//! Key behaviors
//! -------------
//! - [`rolling`]: moving/expanding windows, refit cadence, strict/lenient
//!   refit-failure policies, no-lookahead forecasting.
//! - [`var`]: pure GARCH-conditional and delta-normal estimators plus the
//!   threshold-series helper over the external mean-model collaborator.
//! - [`errors`]: the risk-layer error surface ([`RiskError`]).
//!
//! Downstream usage
//! ----------------
//! - Feed `RollOutcome::forecasts` into `var::garch_var_series`, then hand
//!   the thresholds with the realized returns to
//!   `statistical_tests::kupiec` for backtesting.

pub mod errors;
pub mod rolling;
pub mod var;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{RiskError, RiskResult};
pub use self::rolling::{
    ForecastPoint, RefitPolicy, RollAbort, RollConfig, RollOutcome, RollingForecaster,
    WindowMode,
};
pub use self::var::{VaRThreshold, delta_normal_var, garch_var, garch_var_series, sample_std};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::{
        ForecastPoint, RefitPolicy, RiskError, RiskResult, RollConfig, RollOutcome,
        RollingForecaster, VaRThreshold, WindowMode, delta_normal_var, garch_var,
        garch_var_series, sample_std,
    };
}

//! Errors for the risk layer (rolling forecasts and VaR estimation).
//!
//! [`RiskError`] covers configuration problems of the rolling scheme,
//! series-alignment failures, and out-of-domain inputs to the VaR
//! estimators. Refit failures inside a roll are *not* errors of the roll
//! call itself: they are reported through the roll outcome (abort record or
//! carried-refit counter) so partial results are never discarded without
//! signal.
use crate::volatility::errors::GarchError;

/// Result alias for risk-layer operations.
pub type RiskResult<T> = Result<T, RiskError>;

#[derive(Debug, Clone, PartialEq)]
pub enum RiskError {
    /// Window size must exceed the minimum fitting length.
    InvalidWindowSize { window_size: usize, min: usize },

    /// Refit cadence must be at least 1.
    InvalidRefitCadence { refit_every: usize },

    /// Series too short for the requested window (needs at least one
    /// out-of-sample point).
    SeriesTooShort { len: usize, required: usize },

    /// Residual and return series lengths differ.
    SeriesLengthMismatch { residuals: usize, returns: usize },

    /// VaR level must lie strictly inside (0, 1).
    InvalidVarLevel { level: f64 },

    /// Volatility input must be finite and strictly positive.
    InvalidSigma { value: f64 },

    /// Mean input must be finite.
    InvalidMean { value: f64 },

    /// Window for the constant-volatility estimate needs at least two
    /// observations.
    WindowTooSmall { len: usize },

    /// Underlying distribution evaluation failed.
    Distribution { text: String },
}

impl std::error::Error for RiskError {}

impl std::fmt::Display for RiskError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskError::InvalidWindowSize { window_size, min } => {
                write!(f, "Window size {window_size} must be at least {min} observations.")
            }
            RiskError::InvalidRefitCadence { refit_every } => {
                write!(f, "Refit cadence must be at least 1; got: {refit_every}")
            }
            RiskError::SeriesTooShort { len, required } => {
                write!(f, "Series length {len} is below the required minimum of {required}.")
            }
            RiskError::SeriesLengthMismatch { residuals, returns } => {
                write!(
                    f,
                    "Residual and return series must be aligned: {residuals} residuals vs {returns} returns"
                )
            }
            RiskError::InvalidVarLevel { level } => {
                write!(f, "VaR level must lie in (0, 1); got: {level}")
            }
            RiskError::InvalidSigma { value } => {
                write!(f, "Volatility must be finite and strictly positive; got: {value}")
            }
            RiskError::InvalidMean { value } => {
                write!(f, "Mean forecast must be finite; got: {value}")
            }
            RiskError::WindowTooSmall { len } => {
                write!(f, "Constant-volatility window needs at least 2 observations; got: {len}")
            }
            RiskError::Distribution { text } => {
                write!(f, "Distribution error: {text}")
            }
        }
    }
}

impl From<GarchError> for RiskError {
    fn from(err: GarchError) -> Self {
        match err {
            GarchError::InvalidQuantileLevel { level } => RiskError::InvalidVarLevel { level },
            other => RiskError::Distribution { text: other.to_string() },
        }
    }
}

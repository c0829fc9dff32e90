//! statistical_tests::errors — error types for backtest routines.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias for the VaR backtesting layer,
//! keeping validation and runtime failures localized behind a clean
//! surface.
//!
//! Conventions
//! -----------
//! - Error messages are phrased in terms of domain constraints (e.g.,
//!   "level must lie in (0, 1)", "aligned sequences") rather than
//!   low-level details.
//! - `statrs` construction failures are normalized into
//!   [`BacktestError::Distribution`].
use statrs::distribution::BinomialError;

/// Result alias for backtest operations.
pub type BacktestResult<T> = Result<T, BacktestError>;

/// Error conditions for VaR backtesting.
#[derive(Debug, Clone, PartialEq)]
pub enum BacktestError {
    /// Realized returns and thresholds differ in length.
    DimensionMismatch { left: usize, right: usize },

    /// Input sequences are empty.
    EmptySeries,

    /// A data element is non-finite.
    NonFiniteData { index: usize, value: f64 },

    /// VaR level must lie strictly inside (0, 1).
    InvalidLevel { level: f64 },

    /// Test confidence must lie strictly inside (0, 1).
    InvalidConfidence { value: f64 },

    /// Underlying distribution construction failed.
    Distribution { text: String },
}

impl std::error::Error for BacktestError {}

impl std::fmt::Display for BacktestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BacktestError::DimensionMismatch { left, right } => {
                write!(
                    f,
                    "Realized returns and thresholds must be aligned: {left} vs {right} observations"
                )
            }
            BacktestError::EmptySeries => {
                write!(f, "Backtest input sequences are empty.")
            }
            BacktestError::NonFiniteData { index, value } => {
                write!(f, "Backtest input at index {index} is non-finite: {value}")
            }
            BacktestError::InvalidLevel { level } => {
                write!(f, "VaR level must lie in (0, 1); got: {level}")
            }
            BacktestError::InvalidConfidence { value } => {
                write!(f, "Test confidence must lie in (0, 1); got: {value}")
            }
            BacktestError::Distribution { text } => {
                write!(f, "Distribution error: {text}")
            }
        }
    }
}

impl From<BinomialError> for BacktestError {
    fn from(err: BinomialError) -> Self {
        BacktestError::Distribution { text: err.to_string() }
    }
}

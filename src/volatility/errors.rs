//! Errors for the GARCH volatility stack (data validation, distribution
//! parameters, recursion invariants, and fit failures).
//!
//! This module defines a model error type, [`GarchError`], and a parameter
//! error type, [`ParamError`], used across the volatility layer. Both
//! implement `Display`/`Error` and convert between each other where layers
//! meet.
//!
//! ## Conventions
//! - **Indices are 0-based** and refer to positions in the residual series.
//! - Residuals and returns must be **finite**; negative and zero values are
//!   valid.
//! - Optimizer/backend errors are normalized to
//!   [`GarchError::OptimizationFailed`] with a human-readable status;
//!   non-convergence within the iteration budget is the distinct
//!   [`GarchError::FitFailed`].
//! - Estimated parameters that violate positivity or stationarity are
//!   rejected via [`ParamError`] — never silently clamped.
use statrs::distribution::{NormalError, StudentsTError};

use crate::optimization::errors::OptError;

/// Crate-wide result alias for GARCH operations that may produce [`GarchError`].
pub type GarchResult<T> = Result<T, GarchError>;

/// Result alias for parameter-construction/validation paths that may produce
/// [`ParamError`].
pub type ParamResult<T> = Result<T, ParamError>;

/// Unified error type for GARCH volatility modeling.
///
/// Covers input/data validation, distribution configuration, recursion and
/// likelihood invariants, and estimation failures.
#[derive(Debug, Clone, PartialEq)]
pub enum GarchError {
    // ---- Input/data validation ----
    /// Series is empty.
    EmptySeries,

    /// A data point is NaN/±inf.
    NonFiniteData { index: usize, value: f64 },

    /// Series is shorter than the minimum required for fitting.
    InsufficientData { len: usize, min: usize },

    /// Sample variance of the fitting window is non-positive (degenerate input).
    DegenerateVariance { value: f64 },

    /// Residual and sigma sequences differ in length.
    DimensionMismatch { left: usize, right: usize },

    // ---- Distribution ----
    /// Student-t shape (degrees of freedom) must be finite and > 2.
    InvalidShape { shape: f64, reason: &'static str },

    /// Quantile level must lie strictly inside (0, 1).
    InvalidQuantileLevel { level: f64 },

    /// Density/log-pdf input must be finite.
    InvalidDensityInput { value: f64 },

    /// Conditional scale passed to the log-likelihood must be finite and > 0.
    InvalidSigmaLogLik { value: f64 },

    /// Underlying statrs distribution construction failed.
    DistributionError { text: String },

    // ---- Options validation ----
    /// Sigma guards must be finite with 0 < min < max.
    InvalidSigmaGuards { min: f64, max: f64, reason: &'static str },

    /// VarianceInit::Fixed(v) must be finite and > 0.
    InvalidInitVariance { value: f64 },

    // ---- Model lifecycle ----
    /// Forecast/inspection requested before a successful fit.
    ModelNotFitted,

    /// Forecast horizon must be at least 1.
    InvalidHorizon { horizon: usize },

    /// Optimizer stopped without satisfying a convergence tolerance
    /// (iteration budget exhausted).
    FitFailed { status: String },

    /// Optimizer/backend failure during estimation.
    OptimizationFailed { status: String },

    // ---- Parameters (flattened from ParamError) ----
    /// Omega must be finite and > 0.
    InvalidOmega { value: f64 },

    /// Alpha must be finite and non-negative.
    InvalidAlpha { value: f64 },

    /// Beta must be finite and non-negative.
    InvalidBeta { value: f64 },

    /// Model not stationary (alpha + beta >= 1).
    StationarityViolated { coeff_sum: f64 },

    /// Slack must be non-negative.
    InvalidSlack { value: f64 },

    /// Last-residual state must be finite.
    InvalidLastResidual { value: f64 },

    /// Last-variance state must be finite and > 0.
    InvalidLastVariance { value: f64 },

    /// Theta length mismatch for GarchParams.
    ThetaLengthMismatch { expected: usize, actual: usize },

    /// Unconstrained theta entries must be finite.
    InvalidThetaInput { index: usize, value: f64 },
}

impl std::error::Error for GarchError {}

impl std::fmt::Display for GarchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Input/data validation ----
            GarchError::EmptySeries => {
                write!(f, "Input series is empty.")
            }
            GarchError::NonFiniteData { index, value } => {
                write!(f, "Data point at index {index} is non-finite: {value}")
            }
            GarchError::InsufficientData { len, min } => {
                write!(f, "Series length {len} is below the minimum of {min} observations.")
            }
            GarchError::DegenerateVariance { value } => {
                write!(f, "Sample variance must be strictly positive; got: {value}")
            }
            GarchError::DimensionMismatch { left, right } => {
                write!(f, "Sequence lengths differ: {left} vs {right}")
            }

            // ---- Distribution ----
            GarchError::InvalidShape { shape, reason } => {
                write!(f, "Student-t shape must be finite and > 2; got: {shape}. {reason}")
            }
            GarchError::InvalidQuantileLevel { level } => {
                write!(f, "Quantile level must lie in (0, 1); got: {level}")
            }
            GarchError::InvalidDensityInput { value } => {
                write!(f, "Density input must be finite; got: {value}")
            }
            GarchError::InvalidSigmaLogLik { value } => {
                write!(
                    f,
                    "Conditional scale for log-likelihood must be strictly positive and finite; got: {value}"
                )
            }
            GarchError::DistributionError { text } => {
                write!(f, "Distribution error: {text}")
            }

            // ---- Options validation ----
            GarchError::InvalidSigmaGuards { min, max, reason } => {
                write!(
                    f,
                    "Sigma guards must be finite with 0 < min ({min}) < max ({max}); {reason}"
                )
            }
            GarchError::InvalidInitVariance { value } => {
                write!(f, "VarianceInit::Fixed must be finite and > 0; got: {value}")
            }

            // ---- Model lifecycle ----
            GarchError::ModelNotFitted => {
                write!(f, "Model has not been fitted yet.")
            }
            GarchError::InvalidHorizon { horizon } => {
                write!(f, "Forecast horizon must be at least 1; got: {horizon}")
            }
            GarchError::FitFailed { status } => {
                write!(f, "Fit failed to converge within the iteration budget: {status}")
            }
            GarchError::OptimizationFailed { status } => {
                write!(f, "Optimization failed: {status}")
            }

            // ---- Parameters ----
            GarchError::InvalidOmega { value } => {
                write!(f, "Invalid omega parameter: {value}, must be finite and > 0")
            }
            GarchError::InvalidAlpha { value } => {
                write!(f, "Invalid alpha: {value}, must be finite and non-negative")
            }
            GarchError::InvalidBeta { value } => {
                write!(f, "Invalid beta: {value}, must be finite and non-negative")
            }
            GarchError::StationarityViolated { coeff_sum } => {
                write!(
                    f,
                    "Model not stationary: sum of alpha and beta is {coeff_sum}, which is >= 1"
                )
            }
            GarchError::InvalidSlack { value } => {
                write!(f, "Invalid slack value: {value}, must be non-negative")
            }
            GarchError::InvalidLastResidual { value } => {
                write!(f, "Invalid last residual state: {value}, must be finite")
            }
            GarchError::InvalidLastVariance { value } => {
                write!(f, "Invalid last variance state: {value}, must be finite and > 0")
            }
            GarchError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, actual {actual}")
            }
            GarchError::InvalidThetaInput { index, value } => {
                write!(f, "Invalid theta input at index {index}: {value}, must be finite")
            }
        }
    }
}

impl From<NormalError> for GarchError {
    fn from(err: NormalError) -> Self {
        GarchError::DistributionError { text: err.to_string() }
    }
}

impl From<StudentsTError> for GarchError {
    fn from(err: StudentsTError) -> Self {
        GarchError::DistributionError { text: err.to_string() }
    }
}

impl From<OptError> for GarchError {
    fn from(err: OptError) -> Self {
        GarchError::OptimizationFailed { status: err.to_string() }
    }
}

impl From<ParamError> for GarchError {
    fn from(err: ParamError) -> Self {
        match err {
            ParamError::InvalidOmega { value } => GarchError::InvalidOmega { value },
            ParamError::InvalidAlpha { value } => GarchError::InvalidAlpha { value },
            ParamError::InvalidBeta { value } => GarchError::InvalidBeta { value },
            ParamError::StationarityViolated { coeff_sum } => {
                GarchError::StationarityViolated { coeff_sum }
            }
            ParamError::InvalidSlack { value } => GarchError::InvalidSlack { value },
            ParamError::InvalidShape { value } => GarchError::InvalidShape {
                shape: value,
                reason: "Shape estimated outside the admissible region.",
            },
            ParamError::InvalidLastResidual { value } => GarchError::InvalidLastResidual { value },
            ParamError::InvalidLastVariance { value } => GarchError::InvalidLastVariance { value },
            ParamError::ThetaLengthMismatch { expected, actual } => {
                GarchError::ThetaLengthMismatch { expected, actual }
            }
            ParamError::InvalidThetaInput { index, value } => {
                GarchError::InvalidThetaInput { index, value }
            }
        }
    }
}

/// Parameter-level error type for [`crate::volatility::core::params::GarchParams`].
///
/// Raised when a candidate parameter set violates positivity, stationarity,
/// or state-finiteness constraints. Parameter sets failing these checks are
/// rejected outright rather than being clamped into the feasible region.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamError {
    /// Omega must be finite and > 0.
    InvalidOmega { value: f64 },

    /// Alpha must be finite and non-negative.
    InvalidAlpha { value: f64 },

    /// Beta must be finite and non-negative.
    InvalidBeta { value: f64 },

    /// Stationarity requires alpha + beta < 1.
    StationarityViolated { coeff_sum: f64 },

    /// Slack must be non-negative.
    InvalidSlack { value: f64 },

    /// Student-t shape must be finite and > 2.
    InvalidShape { value: f64 },

    /// Last residual must be finite.
    InvalidLastResidual { value: f64 },

    /// Last conditional variance must be finite and > 0.
    InvalidLastVariance { value: f64 },

    /// Theta length mismatch.
    ThetaLengthMismatch { expected: usize, actual: usize },

    /// Theta entries must be finite.
    InvalidThetaInput { index: usize, value: f64 },
}

impl std::error::Error for ParamError {}

impl std::fmt::Display for ParamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamError::InvalidOmega { value } => {
                write!(f, "Invalid omega parameter: {value}, must be finite and > 0")
            }
            ParamError::InvalidAlpha { value } => {
                write!(f, "Invalid alpha: {value}, must be finite and non-negative")
            }
            ParamError::InvalidBeta { value } => {
                write!(f, "Invalid beta: {value}, must be finite and non-negative")
            }
            ParamError::StationarityViolated { coeff_sum } => {
                write!(
                    f,
                    "Model not stationary: sum of alpha and beta is {coeff_sum}, which is >= 1"
                )
            }
            ParamError::InvalidSlack { value } => {
                write!(f, "Invalid slack value: {value}, must be non-negative")
            }
            ParamError::InvalidShape { value } => {
                write!(f, "Invalid Student-t shape: {value}, must be finite and > 2")
            }
            ParamError::InvalidLastResidual { value } => {
                write!(f, "Invalid last residual state: {value}, must be finite")
            }
            ParamError::InvalidLastVariance { value } => {
                write!(f, "Invalid last variance state: {value}, must be finite and > 0")
            }
            ParamError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, actual {actual}")
            }
            ParamError::InvalidThetaInput { index, value } => {
                write!(f, "Invalid theta input at index {index}: {value}, must be finite")
            }
        }
    }
}

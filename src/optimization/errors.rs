//! Errors for the maximum-likelihood optimization layer.
//!
//! This module defines [`OptError`], the unified error surface for the
//! log-likelihood optimizer: configuration problems (tolerances, line
//! search, L-BFGS memory), gradient and parameter validation failures,
//! non-finite objective values, and normalized Argmin backend errors.
//!
//! ## Conventions
//! - Model-layer errors raised inside `LogLikelihood::value`/`grad` are
//!   converted into `OptError` so the optimizer never leaks foreign enums.
//! - Argmin runtime errors are downcast where possible and otherwise
//!   wrapped as [`OptError::BackendError`] with their display text.
use argmin::core::{ArgminError, Error};

use crate::volatility::errors::{GarchError, ParamError};

/// Crate-wide result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Gradient ----
    /// Implies that FD should be used
    GradientNotImplemented,

    /// Gradient dimensions do not match parameter dimensions.
    GradientDimMismatch {
        expected: usize,
        found: usize,
    },

    /// Gradient elements need to be finite
    InvalidGradient {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    // ---- MLEOptions ----
    /// Gradient tolerance needs to be positive and finite.
    InvalidTolGrad {
        tol: f64,
        reason: &'static str,
    },
    /// Cost change tolerance needs to be positive and finite.
    InvalidTolCost {
        tol: f64,
        reason: &'static str,
    },
    /// Maximum iterations needs to be positive.
    InvalidMaxIter {
        max_iter: usize,
        reason: &'static str,
    },
    /// At least one tolerance must be provided.
    NoTolerancesProvided,

    /// Invalid line searcher name.
    InvalidLineSearch {
        name: String,
        reason: &'static str,
    },

    /// lbfgs_mem needs to be at least 1.
    InvalidLBFGSMem {
        mem: usize,
        reason: &'static str,
    },

    // ---- Cost function ----
    /// Cost function returned a non-finite value.
    NonFiniteCost {
        value: f64,
    },

    // ---- Optimizer outcome ----
    /// Estimated parameters must be finite.
    InvalidThetaHat {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    /// Theta hat is missing
    MissingThetaHat,

    // ---- Argmin ---
    /// Wrapper for argmin::InvalidParameter
    InvalidParameter {
        text: String,
    },
    /// Wrapper for argmin::NotImplemented
    NotImplemented {
        text: String,
    },
    /// Wrapper for argmin::NotInitialized
    NotInitialized {
        text: String,
    },
    /// Wrapper for argmin::ConditionViolated
    ConditionViolated {
        text: String,
    },
    /// Wrapper for argmin::CheckPointNotFound
    CheckPointNotFound {
        text: String,
    },
    /// Wrapper for argmin::PotentialBug
    PotentialBug {
        text: String,
    },
    /// Wrapper for argmin::ImpossibleError
    ImpossibleError {
        text: String,
    },
    /// Wrapper for other argmin::Error types
    BackendError {
        text: String,
    },

    // ---- GARCH log-likelihood ----
    /// Invalid residual input to the log-likelihood function.
    InvalidLogLikInput {
        value: f64,
    },
    /// Invalid conditional scale in the log-likelihood function.
    InvalidSigmaLogLik {
        value: f64,
    },
    /// Student-t shape parameter is invalid (<= 2 or non-finite).
    InvalidShapeParam {
        shape: f64,
    },
    /// Underlying distribution construction failed.
    DistributionError {
        text: String,
    },

    // ---- Param Errors ----
    /// Model not stationary (alpha + beta >= 1).
    StationarityViolated {
        coeff_sum: f64,
    },

    /// Theta length mismatch for GarchParams.
    ThetaLengthMismatch {
        expected: usize,
        actual: usize,
    },

    /// Omega must be finite and > 0.
    InvalidOmega {
        value: f64,
    },

    /// Alpha must be finite and non-negative.
    InvalidAlpha {
        value: f64,
    },

    /// Beta must be finite and non-negative.
    InvalidBeta {
        value: f64,
    },

    /// Slack value must be non-negative.
    InvalidSlack {
        value: f64,
    },

    /// Unconstrained optimization input must have finite values.
    InvalidThetaInput {
        index: usize,
        value: f64,
    },

    // ---- Fallback ----
    UnknownError,
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Gradient ----
            OptError::GradientNotImplemented => {
                write!(f, "Gradient optimization not implemented")
            }
            OptError::GradientDimMismatch { expected, found } => {
                write!(f, "Gradient dimension mismatch: expected {expected}, found {found}")
            }
            OptError::InvalidGradient { index, value, reason } => {
                write!(f, "Invalid gradient at index {index}: {value}: {reason}")
            }

            // ---- MLEOptions ----
            OptError::InvalidTolGrad { tol, reason } => {
                write!(f, "Invalid gradient tolerance {tol}: {reason}")
            }
            OptError::InvalidTolCost { tol, reason } => {
                write!(f, "Invalid cost function change tolerance {tol}: {reason}")
            }
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }
            OptError::NoTolerancesProvided => {
                write!(f, "No tolerances provided")
            }
            OptError::InvalidLineSearch { name, reason } => {
                write!(f, "Invalid line searcher '{name}': {reason}")
            }
            OptError::InvalidLBFGSMem { mem, reason } => {
                write!(f, "Invalid L-BFGS memory {mem}: {reason}")
            }

            // ---- Cost function ----
            OptError::NonFiniteCost { value } => {
                write!(f, "Non-finite cost value: {value}")
            }

            // ---- Optimizer outcome ----
            OptError::InvalidThetaHat { index, value, reason } => {
                write!(f, "Invalid estimated parameter at index {index}: {value}: {reason}")
            }
            OptError::MissingThetaHat => {
                write!(f, "Missing estimated parameters (theta hat)")
            }

            // ---- Argmin ----
            OptError::InvalidParameter { text } => {
                write!(f, "Invalid parameter: {text}")
            }
            OptError::NotImplemented { text } => {
                write!(f, "Not implemented: {text}")
            }
            OptError::NotInitialized { text } => {
                write!(f, "Not initialized: {text}")
            }
            OptError::ConditionViolated { text } => {
                write!(f, "Condition violated: {text}")
            }
            OptError::CheckPointNotFound { text } => {
                write!(f, "Checkpoint not found: {text}")
            }
            OptError::PotentialBug { text } => {
                write!(f, "Potential bug: {text}")
            }
            OptError::ImpossibleError { text } => {
                write!(f, "Impossible error: {text}")
            }
            OptError::BackendError { text } => {
                write!(f, "Backend error: {text}")
            }

            // ---- GARCH log-likelihood ----
            OptError::InvalidLogLikInput { value } => {
                write!(f, "Invalid input to log-likelihood function: {value}")
            }
            OptError::InvalidSigmaLogLik { value } => {
                write!(f, "Invalid conditional scale in log-likelihood function: {value}")
            }
            OptError::InvalidShapeParam { shape } => {
                write!(f, "Invalid Student-t shape parameter: {shape}, must be finite and > 2")
            }
            OptError::DistributionError { text } => {
                write!(f, "Distribution error: {text}")
            }

            // ---- Param Errors ----
            OptError::StationarityViolated { coeff_sum } => {
                write!(
                    f,
                    "Model not stationary: sum of alpha and beta is {coeff_sum}, which is >= 1"
                )
            }
            OptError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, actual {actual}")
            }
            OptError::InvalidOmega { value } => {
                write!(f, "Invalid omega parameter: {value}, must be finite and > 0")
            }
            OptError::InvalidAlpha { value } => {
                write!(f, "Invalid alpha: {value}, must be finite and non-negative")
            }
            OptError::InvalidBeta { value } => {
                write!(f, "Invalid beta: {value}, must be finite and non-negative")
            }
            OptError::InvalidSlack { value } => {
                write!(f, "Invalid slack value: {value}, must be non-negative")
            }
            OptError::InvalidThetaInput { index, value } => {
                write!(f, "Invalid theta input at index {index}: {value}, must be finite")
            }

            // ---- Fallback ----
            OptError::UnknownError => {
                write!(f, "Unknown error")
            }
        }
    }
}

impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        match original_err.downcast() {
            Ok(opt_err) => match opt_err {
                ArgminError::InvalidParameter { text } => OptError::InvalidParameter { text },
                ArgminError::NotImplemented { text } => OptError::NotImplemented { text },
                ArgminError::NotInitialized { text } => OptError::NotInitialized { text },
                ArgminError::ConditionViolated { text } => OptError::ConditionViolated { text },
                ArgminError::CheckpointNotFound { text } => OptError::CheckPointNotFound { text },
                ArgminError::PotentialBug { text } => OptError::PotentialBug { text },
                ArgminError::ImpossibleError { text } => OptError::ImpossibleError { text },
                _ => OptError::UnknownError,
            },
            Err(err) => OptError::BackendError { text: err.to_string() },
        }
    }
}

impl From<GarchError> for OptError {
    fn from(err: GarchError) -> Self {
        match err {
            GarchError::NonFiniteData { value, .. } => OptError::InvalidLogLikInput { value },
            GarchError::InvalidSigmaLogLik { value } => OptError::InvalidSigmaLogLik { value },
            GarchError::InvalidShape { shape, .. } => OptError::InvalidShapeParam { shape },
            GarchError::DistributionError { text } => OptError::DistributionError { text },
            _ => OptError::UnknownError,
        }
    }
}

impl From<ParamError> for OptError {
    fn from(err: ParamError) -> Self {
        match err {
            ParamError::StationarityViolated { coeff_sum } => {
                OptError::StationarityViolated { coeff_sum }
            }
            ParamError::ThetaLengthMismatch { expected, actual } => {
                OptError::ThetaLengthMismatch { expected, actual }
            }
            ParamError::InvalidOmega { value } => OptError::InvalidOmega { value },
            ParamError::InvalidAlpha { value } => OptError::InvalidAlpha { value },
            ParamError::InvalidBeta { value } => OptError::InvalidBeta { value },
            ParamError::InvalidSlack { value } => OptError::InvalidSlack { value },
            ParamError::InvalidShape { value } => OptError::InvalidShapeParam { shape: value },
            ParamError::InvalidThetaInput { index, value } => {
                OptError::InvalidThetaInput { index, value }
            }
            _ => OptError::UnknownError,
        }
    }
}

//! σ²-guards for GARCH models — enforce lower/upper bounds on the variance
//! recursion.
//!
//! Purpose
//! -------
//! Provide a small, validated container for the bounds applied to the
//! conditional-variance process `σ²_t` during recursion and likelihood
//! evaluation, keeping log terms well-defined and preventing numeric
//! underflow toward zero or overflow during optimization.
//!
//! Key behaviors
//! -------------
//! - Construct [`SigmaGuards`] values that enforce strict positivity and
//!   finiteness of the variance lower/upper bounds.
//! - Reject invalid guard configurations via typed errors (`GarchError`)
//!   instead of panicking at call sites.
//! - Expose simple `min`/`max` fields that the recursion code uses to clamp
//!   each σ²_t.
//!
//! Invariants & assumptions
//! ------------------------
//! - `0.0 < min < max`, both finite, for every constructed guard.
//! - Callers choose bounds reasonable for the scale of their residuals;
//!   this module only enforces basic numeric sanity.
//!
//! Conventions
//! -----------
//! - Guards are expressed in **variance** units (σ², not σ).
//! - Invalid configurations return `GarchError::InvalidSigmaGuards` rather
//!   than panicking.
use crate::volatility::errors::{GarchError, GarchResult};

/// Lower/upper bounds for the GARCH σ² recursion.
///
/// Clamping each computed σ²_t into `[min, max]` prevents `log(0)` in the
/// likelihood and keeps the recursion numerically safe while the optimizer
/// explores the parameter space. The fitted parameters themselves are never
/// clamped — only the variance path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SigmaGuards {
    /// Lower bound for σ² (strictly > 0).
    pub min: f64,
    /// Upper bound for σ² (must be > `min`).
    pub max: f64,
}

impl SigmaGuards {
    /// Construct validated σ² bounds from a `(min, max)` tuple.
    ///
    /// # Errors
    /// Returns [`GarchError::InvalidSigmaGuards`] when:
    /// - `min >= max`,
    /// - either bound is not finite,
    /// - or `min <= 0.0`, which would make log-likelihood terms ill-defined.
    pub fn new(value: (f64, f64)) -> GarchResult<Self> {
        if value.0 >= value.1 {
            return Err(GarchError::InvalidSigmaGuards {
                min: value.0,
                max: value.1,
                reason: "Sigma guards must have min < max.",
            });
        }

        if !value.0.is_finite() || !value.1.is_finite() {
            return Err(GarchError::InvalidSigmaGuards {
                min: value.0,
                max: value.1,
                reason: "Sigma guards must be finite.",
            });
        }

        if value.0 <= 0.0 {
            return Err(GarchError::InvalidSigmaGuards {
                min: value.0,
                max: value.1,
                reason: "Sigma guards must be strictly positive.",
            });
        }

        Ok(SigmaGuards { min: value.0, max: value.1 })
    }
}

impl Default for SigmaGuards {
    /// Wide default bounds `(1e-12, 1e12)` suitable for daily-return scales;
    /// tighten for series measured in percentage points if clamping is
    /// observed.
    fn default() -> Self {
        SigmaGuards { min: 1e-12, max: 1e12 }
    }
}

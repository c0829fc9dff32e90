//! Innovation distributions for GARCH return models.
//!
//! This module defines [`Innovation`], which enumerates the supported
//! return-innovation distributions: standard normal and **standardized**
//! Student-t. The Student-t variant is scaled to unit variance, so the
//! conditional scale σ_t carries all time variation and the shape parameter
//! ν only controls tail thickness.
//!
//! ## Standardization
//! If `T ~ t_ν` with ν > 2, then `U = T / s` with `s = sqrt(ν / (ν − 2))`
//! has unit variance. Quantiles and densities of `U` follow by change of
//! variables:
//!
//! ```text
//! q_U(p) = q_T(p) / s          f_U(u) = s · f_T(s·u)
//! ```
//!
//! ## Numerics
//! - Quantiles delegate to `statrs` inverse CDFs (`ContinuousCDF`).
//! - Per-observation likelihood terms use
//!   `log f(x/σ) − log σ`, evaluated in log space throughout.
//! - The shape is validated as finite and > 2 at construction; when it is
//!   estimated jointly with the GARCH parameters, the θ-space map
//!   `ν = 2 + softplus(θ_ν)` keeps every iterate admissible.
use crate::volatility::{
    core::validation::{validate_loglik_inputs, validate_quantile_level, validate_shape},
    errors::{GarchError, GarchResult},
};
use ndarray::ArrayView1;
use statrs::distribution::{Continuous, ContinuousCDF, Normal, StudentsT};
use statrs::function::gamma;

/// Innovation (error) distributions for GARCH models.
///
/// Variants encode the standard normal and the standardized (unit-variance)
/// Student-t. Both integrate with the σ² recursion through
/// [`Innovation::ln_pdf_scaled`], and with VaR estimation through
/// [`Innovation::quantile`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Innovation {
    /// Standard normal innovations.
    Normal,
    /// Standardized Student-t innovations with shape (degrees of freedom)
    /// ν > 2, scaled to unit variance.
    StudentT {
        shape: f64,
    },
}

impl Innovation {
    /// Standard normal innovations. Requires no parameters and always succeeds.
    pub const fn normal() -> Self {
        Innovation::Normal
    }

    /// Standardized Student-t innovations with shape `ν > 2`.
    ///
    /// # Errors
    /// Returns [`GarchError::InvalidShape`] if `shape` is not finite or ≤ 2.
    pub fn student_t(shape: f64) -> GarchResult<Self> {
        validate_shape(shape).map_err(|_| GarchError::InvalidShape {
            shape,
            reason: "Standardized Student-t requires finite variance.",
        })?;
        Ok(Innovation::StudentT { shape })
    }

    /// The shape parameter, when this family has one.
    pub fn shape(&self) -> Option<f64> {
        match self {
            Innovation::Normal => None,
            Innovation::StudentT { shape } => Some(*shape),
        }
    }

    /// Whether the family carries a shape parameter that is estimated
    /// jointly with the GARCH coefficients.
    pub fn has_shape_param(&self) -> bool {
        matches!(self, Innovation::StudentT { .. })
    }

    /// Quantile (inverse CDF) of the standardized innovation at level `p`.
    ///
    /// For Student-t, the raw t_ν quantile is scaled by `sqrt((ν − 2)/ν)` to
    /// match the unit-variance parameterization.
    ///
    /// # Errors
    /// - [`GarchError::InvalidQuantileLevel`] when `p` ∉ (0, 1).
    /// - Propagates `statrs` construction failures as
    ///   [`GarchError::DistributionError`].
    pub fn quantile(&self, p: f64) -> GarchResult<f64> {
        validate_quantile_level(p)?;
        match self {
            Innovation::Normal => Ok(Normal::new(0.0, 1.0)?.inverse_cdf(p)),
            Innovation::StudentT { shape } => {
                let t = StudentsT::new(0.0, 1.0, *shape)?;
                Ok(t.inverse_cdf(p) * ((shape - 2.0) / shape).sqrt())
            }
        }
    }

    /// Density of the standardized innovation at `x`.
    ///
    /// # Errors
    /// - [`GarchError::InvalidDensityInput`] for non-finite `x`.
    /// - Propagates `statrs` construction failures.
    pub fn density(&self, x: f64) -> GarchResult<f64> {
        if !x.is_finite() {
            return Err(GarchError::InvalidDensityInput { value: x });
        }
        match self {
            Innovation::Normal => Ok(Normal::new(0.0, 1.0)?.pdf(x)),
            Innovation::StudentT { shape } => {
                let s = (shape / (shape - 2.0)).sqrt();
                Ok(s * StudentsT::new(0.0, 1.0, *shape)?.pdf(s * x))
            }
        }
    }

    /// Per-observation log-likelihood contribution for a residual `x` with
    /// conditional scale `sigma`.
    ///
    /// The GARCH model assumes `x = sigma · ε` with `Var[ε] = 1`. By the
    /// change-of-variables formula,
    /// `log f_X(x | sigma) = log f_ε(x/sigma) − log(sigma)`.
    /// Evaluating in log space avoids the rounding error of dividing the
    /// density by σ and taking the log afterwards.
    ///
    /// # Arguments
    /// - `x`: observed residual (must be finite).
    /// - `sigma`: conditional standard deviation for the same time point
    ///   (must be finite and > 0).
    ///
    /// # Errors
    /// Returns a `GarchError` if inputs are invalid or the underlying
    /// distribution constructor in `statrs` rejects its parameters.
    pub fn ln_pdf_scaled(&self, x: f64, sigma: f64) -> GarchResult<f64> {
        validate_loglik_inputs(x, sigma)?;
        let ln_sigma = sigma.ln();
        let eps = x / sigma;
        match self {
            Innovation::Normal => Ok(Normal::new(0.0, 1.0)?.ln_pdf(eps) - ln_sigma),
            Innovation::StudentT { shape } => {
                let s = (shape / (shape - 2.0)).sqrt();
                Ok(s.ln() + StudentsT::new(0.0, 1.0, *shape)?.ln_pdf(s * eps) - ln_sigma)
            }
        }
    }

    /// Derivative of the per-observation log-likelihood with respect to the
    /// conditional **variance** `s = σ²`, holding the residual fixed.
    ///
    /// Used by the analytic gradient: combined with the variance
    /// sensitivities `∂σ²_t/∂(ω, α, β)` via the chain rule. For the normal
    /// family this is `(x² − s) / (2s²)`; for the standardized Student-t
    /// with `w = 1 + x²/(s(ν − 2))`,
    ///
    /// ```text
    /// ∂ℓ_t/∂s = (ν + 1)·x² / (2 s² (ν − 2) w) − 1 / (2s)
    /// ```
    ///
    /// Inputs are assumed pre-validated (finite `x`, positive `s`); this is
    /// an inner-loop helper, not a public validation boundary.
    pub fn dlnpdf_dsigma2(&self, x: f64, sigma2: f64) -> f64 {
        match self {
            Innovation::Normal => (x * x - sigma2) / (2.0 * sigma2 * sigma2),
            Innovation::StudentT { shape } => {
                let w = 1.0 + x * x / (sigma2 * (shape - 2.0));
                (shape + 1.0) * x * x / (2.0 * sigma2 * sigma2 * (shape - 2.0) * w)
                    - 1.0 / (2.0 * sigma2)
            }
        }
    }

    /// Derivative of the per-observation log-likelihood with respect to the
    /// Student-t shape `ν`, holding residual and variance fixed.
    ///
    /// With `z² = x²/s` and `w = 1 + z²/(ν − 2)`:
    ///
    /// ```text
    /// ∂ℓ_t/∂ν = −1/(2(ν−2)) + ψ((ν+1)/2)/2 − ψ(ν/2)/2
    ///           − ln(w)/2 + (ν+1)·z² / (2 (ν−2)² w)
    /// ```
    ///
    /// Returns `None` for the normal family (no shape parameter).
    pub fn dlnpdf_dshape(&self, x: f64, sigma2: f64) -> Option<f64> {
        match self {
            Innovation::Normal => None,
            Innovation::StudentT { shape } => {
                let z2 = x * x / sigma2;
                let w = 1.0 + z2 / (shape - 2.0);
                Some(
                    -1.0 / (2.0 * (shape - 2.0))
                        + 0.5 * gamma::digamma((shape + 1.0) / 2.0)
                        - 0.5 * gamma::digamma(shape / 2.0)
                        - 0.5 * w.ln()
                        + (shape + 1.0) * z2 / (2.0 * (shape - 2.0) * (shape - 2.0) * w),
                )
            }
        }
    }

    /// Total log-likelihood of a residual series under a conditional
    /// **variance** path.
    ///
    /// Sums [`Innovation::ln_pdf_scaled`] over the aligned pairs
    /// `(residuals[t], sqrt(sigma2[t]))`.
    ///
    /// # Errors
    /// - [`GarchError::DimensionMismatch`] when the two sequences differ in
    ///   length.
    /// - [`GarchError::EmptySeries`] when both are empty.
    /// - Propagates per-observation errors from `ln_pdf_scaled`.
    pub fn log_likelihood(
        &self, residuals: ArrayView1<f64>, sigma2: ArrayView1<f64>,
    ) -> GarchResult<f64> {
        if residuals.len() != sigma2.len() {
            return Err(GarchError::DimensionMismatch {
                left: residuals.len(),
                right: sigma2.len(),
            });
        }
        if residuals.is_empty() {
            return Err(GarchError::EmptySeries);
        }
        residuals
            .iter()
            .zip(sigma2.iter())
            .try_fold(0.0, |acc, (&x, &s2)| Ok(acc + self.ln_pdf_scaled(x, s2.sqrt())?))
    }
}

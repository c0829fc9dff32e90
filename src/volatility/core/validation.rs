//! Validation helpers for the GARCH volatility stack.
//!
//! Centralizes the consistency checks shared by data containers, parameter
//! constructors, and the likelihood driver:
//!
//! - **Series checks**: [`validate_series`] (non-empty, finite entries) and
//!   [`validate_fit_length`] (minimum observation count for estimation).
//! - **Parameter checks**: [`validate_omega`], [`validate_alpha`],
//!   [`validate_beta`], [`validate_stationarity_and_slack`],
//!   [`validate_shape`], [`validate_last_state`].
//! - **θ-space checks**: [`validate_theta`] (length and finiteness of the
//!   unconstrained optimizer vector).
//! - **Likelihood inputs**: [`validate_loglik_inputs`] (finite residual,
//!   strictly positive finite scale).
//! - **Quantile levels**: [`validate_quantile_level`] (strictly inside (0, 1)).
//!
//! All helpers return typed errors ([`GarchError`] / [`ParamError`]) instead
//! of panicking, so call sites can assume clean inputs after a successful
//! check without re-validating basic properties.
use ndarray::ArrayView1;

use crate::volatility::errors::{GarchError, GarchResult, ParamError, ParamResult};

/// Minimum number of observations required to fit a GARCH(1,1) model.
///
/// Fitting windows must contain **more** than this many observations; three
/// (plus one shape) parameters estimated on fewer points give the optimizer
/// too little curvature to produce a meaningful maximum.
pub const MIN_FIT_OBS: usize = 30;

/// Validate that a series is non-empty with all entries finite.
///
/// # Errors
/// - [`GarchError::EmptySeries`] for an empty input.
/// - [`GarchError::NonFiniteData`] with the first offending index/value.
pub fn validate_series(data: ArrayView1<f64>) -> GarchResult<()> {
    if data.is_empty() {
        return Err(GarchError::EmptySeries);
    }
    for (index, &value) in data.iter().enumerate() {
        if !value.is_finite() {
            return Err(GarchError::NonFiniteData { index, value });
        }
    }
    Ok(())
}

/// Validate that a fitting window exceeds the minimum observation count.
///
/// # Errors
/// Returns [`GarchError::InsufficientData`] when `len <= MIN_FIT_OBS`.
pub fn validate_fit_length(len: usize) -> GarchResult<()> {
    if len <= MIN_FIT_OBS {
        return Err(GarchError::InsufficientData { len, min: MIN_FIT_OBS + 1 });
    }
    Ok(())
}

/// Validate an unconstrained optimizer vector θ.
///
/// Checks length against `expected` (3 for normal innovations, 4 when a
/// Student-t shape is estimated) and finiteness of every entry.
///
/// # Errors
/// - [`ParamError::ThetaLengthMismatch`] on wrong dimension.
/// - [`ParamError::InvalidThetaInput`] on the first non-finite entry.
pub fn validate_theta(theta: ArrayView1<f64>, expected: usize) -> ParamResult<()> {
    if theta.len() != expected {
        return Err(ParamError::ThetaLengthMismatch { expected, actual: theta.len() });
    }
    for (index, &value) in theta.iter().enumerate() {
        if !value.is_finite() {
            return Err(ParamError::InvalidThetaInput { index, value });
        }
    }
    Ok(())
}

/// Validate `omega > 0` and finite.
pub fn validate_omega(omega: f64) -> ParamResult<()> {
    if !omega.is_finite() || omega <= 0.0 {
        return Err(ParamError::InvalidOmega { value: omega });
    }
    Ok(())
}

/// Validate `alpha >= 0` and finite.
pub fn validate_alpha(alpha: f64) -> ParamResult<()> {
    if !alpha.is_finite() || alpha < 0.0 {
        return Err(ParamError::InvalidAlpha { value: alpha });
    }
    Ok(())
}

/// Validate `beta >= 0` and finite.
pub fn validate_beta(beta: f64) -> ParamResult<()> {
    if !beta.is_finite() || beta < 0.0 {
        return Err(ParamError::InvalidBeta { value: beta });
    }
    Ok(())
}

/// Validate strict stationarity with non-negative slack.
///
/// Requires `alpha + beta < 1` and `slack >= 0`. The slack is the residual
/// mass of the scaled-simplex parameterization; a negative value indicates a
/// corrupted mapping rather than a merely borderline parameter set.
///
/// # Errors
/// - [`ParamError::StationarityViolated`] when `alpha + beta >= 1`.
/// - [`ParamError::InvalidSlack`] when `slack < 0` or non-finite.
pub fn validate_stationarity_and_slack(alpha: f64, beta: f64, slack: f64) -> ParamResult<()> {
    let coeff_sum = alpha + beta;
    if coeff_sum >= 1.0 {
        return Err(ParamError::StationarityViolated { coeff_sum });
    }
    if !slack.is_finite() || slack < 0.0 {
        return Err(ParamError::InvalidSlack { value: slack });
    }
    Ok(())
}

/// Validate a Student-t shape parameter: finite and strictly greater than 2
/// (finite variance requirement for the standardized parameterization).
pub fn validate_shape(shape: f64) -> ParamResult<()> {
    if !shape.is_finite() || shape <= 2.0 {
        return Err(ParamError::InvalidShape { value: shape });
    }
    Ok(())
}

/// Validate the forecast-origin state carried in a parameter snapshot.
///
/// # Errors
/// - [`ParamError::InvalidLastResidual`] for a non-finite residual.
/// - [`ParamError::InvalidLastVariance`] for a non-positive or non-finite
///   variance.
pub fn validate_last_state(resid_last: f64, sigma2_last: f64) -> ParamResult<()> {
    if !resid_last.is_finite() {
        return Err(ParamError::InvalidLastResidual { value: resid_last });
    }
    if !sigma2_last.is_finite() || sigma2_last <= 0.0 {
        return Err(ParamError::InvalidLastVariance { value: sigma2_last });
    }
    Ok(())
}

/// Validate per-observation log-likelihood inputs.
///
/// # Errors
/// - [`GarchError::InvalidDensityInput`] for a non-finite residual.
/// - [`GarchError::InvalidSigmaLogLik`] for a non-positive or non-finite
///   conditional scale.
pub fn validate_loglik_inputs(x: f64, sigma: f64) -> GarchResult<()> {
    if !x.is_finite() {
        return Err(GarchError::InvalidDensityInput { value: x });
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(GarchError::InvalidSigmaLogLik { value: sigma });
    }
    Ok(())
}

/// Validate a quantile level strictly inside (0, 1).
pub fn validate_quantile_level(level: f64) -> GarchResult<()> {
    if !level.is_finite() || level <= 0.0 || level >= 1.0 {
        return Err(GarchError::InvalidQuantileLevel { level });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover the accept/reject branches of each validation helper.
    // Behavior of the validated quantities inside recursions and fits is
    // covered by the variance, params, and model tests.
    // -------------------------------------------------------------------------

    #[test]
    fn series_validation_accepts_finite_and_rejects_empty_or_nan() {
        let ok = array![0.1, -0.2, 0.0];
        assert!(validate_series(ok.view()).is_ok());

        let empty = ndarray::Array1::<f64>::zeros(0);
        assert!(matches!(validate_series(empty.view()), Err(GarchError::EmptySeries)));

        let bad = array![0.1, f64::NAN];
        assert!(matches!(
            validate_series(bad.view()),
            Err(GarchError::NonFiniteData { index: 1, .. })
        ));
    }

    #[test]
    fn fit_length_threshold_is_strict() {
        assert!(matches!(
            validate_fit_length(MIN_FIT_OBS),
            Err(GarchError::InsufficientData { .. })
        ));
        assert!(validate_fit_length(MIN_FIT_OBS + 1).is_ok());
    }

    #[test]
    fn theta_validation_checks_length_and_finiteness() {
        let theta = array![0.0, 0.1, 0.2];
        assert!(validate_theta(theta.view(), 3).is_ok());
        assert!(matches!(
            validate_theta(theta.view(), 4),
            Err(ParamError::ThetaLengthMismatch { expected: 4, actual: 3 })
        ));
        let bad = array![0.0, f64::INFINITY, 0.2];
        assert!(matches!(
            validate_theta(bad.view(), 3),
            Err(ParamError::InvalidThetaInput { index: 1, .. })
        ));
    }

    #[test]
    fn parameter_domain_checks() {
        assert!(validate_omega(0.05).is_ok());
        assert!(matches!(validate_omega(0.0), Err(ParamError::InvalidOmega { .. })));
        assert!(validate_alpha(0.0).is_ok());
        assert!(matches!(validate_alpha(-0.1), Err(ParamError::InvalidAlpha { .. })));
        assert!(validate_beta(0.9).is_ok());
        assert!(matches!(validate_beta(f64::NAN), Err(ParamError::InvalidBeta { .. })));
    }

    #[test]
    fn stationarity_rejects_unit_root_and_negative_slack() {
        assert!(validate_stationarity_and_slack(0.1, 0.85, 0.05).is_ok());
        assert!(matches!(
            validate_stationarity_and_slack(0.3, 0.7, 0.0),
            Err(ParamError::StationarityViolated { .. })
        ));
        assert!(matches!(
            validate_stationarity_and_slack(0.1, 0.2, -0.01),
            Err(ParamError::InvalidSlack { .. })
        ));
    }

    #[test]
    fn shape_must_exceed_two() {
        assert!(validate_shape(4.5).is_ok());
        assert!(matches!(validate_shape(2.0), Err(ParamError::InvalidShape { .. })));
        assert!(matches!(validate_shape(f64::INFINITY), Err(ParamError::InvalidShape { .. })));
    }

    #[test]
    fn loglik_inputs_and_quantile_levels() {
        assert!(validate_loglik_inputs(-0.02, 0.01).is_ok());
        assert!(matches!(
            validate_loglik_inputs(f64::NAN, 0.01),
            Err(GarchError::InvalidDensityInput { .. })
        ));
        assert!(matches!(
            validate_loglik_inputs(0.0, 0.0),
            Err(GarchError::InvalidSigmaLogLik { .. })
        ));
        assert!(validate_quantile_level(0.05).is_ok());
        assert!(matches!(
            validate_quantile_level(1.0),
            Err(GarchError::InvalidQuantileLevel { .. })
        ));
    }
}

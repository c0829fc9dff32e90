//! Value-at-Risk estimators: GARCH-conditional and delta-normal.
//!
//! Purpose
//! -------
//! Convert a conditional mean, a volatility figure, and a distribution
//! quantile into a signed VaR threshold — the return level below which a
//! loss counts as an exception. Both estimators are pure functions with no
//! internal state:
//!
//! ```text
//! garch_var        = mean + σ̂_t · q_dist(level)        (time-varying σ̂_t)
//! delta_normal_var = mean + σ_const · Φ⁻¹(level)        (constant σ)
//! ```
//!
//! For the loss tail (`level < 0.5`) the quantile is negative, so
//! thresholds sit below the mean. The conditional mean is supplied by the
//! external mean-model collaborator as a `mean_forecast(time_index)`
//! function; this module never estimates means.
//!
//! Conventions
//! -----------
//! - `level` is the tail probability of the VaR (0.05 for 95% VaR, 0.01
//!   for 99% VaR); any value strictly inside (0, 1) is accepted.
//! - The fitted σ is used exactly as produced — no presentation-time
//!   rescaling is applied anywhere in this crate.
use crate::{
    risk::{
        errors::{RiskError, RiskResult},
        rolling::ForecastPoint,
    },
    volatility::core::{distribution::Innovation, variance::sample_variance},
};
use ndarray::ArrayView1;

/// A signed VaR threshold for one time step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VaRThreshold {
    /// Target index of the threshold (aligned with the forecast).
    pub time_index: usize,
    /// Tail probability of the VaR.
    pub level: f64,
    /// Return level below which a loss is an exception.
    pub value: f64,
}

fn validate_level(level: f64) -> RiskResult<()> {
    if !level.is_finite() || level <= 0.0 || level >= 1.0 {
        return Err(RiskError::InvalidVarLevel { level });
    }
    Ok(())
}

fn validate_mean_sigma(mean: f64, sigma: f64) -> RiskResult<()> {
    if !mean.is_finite() {
        return Err(RiskError::InvalidMean { value: mean });
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(RiskError::InvalidSigma { value: sigma });
    }
    Ok(())
}

/// GARCH-conditional VaR: `mean + sigma_forecast · q(level)` under the
/// forecast's innovation distribution.
///
/// # Errors
/// - [`RiskError::InvalidVarLevel`] for `level` outside (0, 1).
/// - [`RiskError::InvalidMean`] / [`RiskError::InvalidSigma`] for
///   non-finite or non-positive inputs.
pub fn garch_var(
    mean: f64, sigma_forecast: f64, innovation: &Innovation, level: f64,
) -> RiskResult<f64> {
    validate_level(level)?;
    validate_mean_sigma(mean, sigma_forecast)?;
    Ok(mean + sigma_forecast * innovation.quantile(level)?)
}

/// Delta-normal VaR: `mean + sigma_constant · Φ⁻¹(level)` with a constant,
/// unconditional volatility (no time variation).
///
/// # Errors
/// Same input conditions as [`garch_var`].
pub fn delta_normal_var(mean: f64, sigma_constant: f64, level: f64) -> RiskResult<f64> {
    validate_level(level)?;
    validate_mean_sigma(mean, sigma_constant)?;
    Ok(mean + sigma_constant * Innovation::normal().quantile(level)?)
}

/// Sample standard deviation over a fixed in-sample window, the
/// `sigma_constant` input of the delta-normal estimator.
///
/// # Errors
/// - [`RiskError::WindowTooSmall`] for fewer than two observations.
/// - [`RiskError::InvalidSigma`] for a degenerate (zero-variance) window.
pub fn sample_std(window: ArrayView1<f64>) -> RiskResult<f64> {
    if window.len() < 2 {
        return Err(RiskError::WindowTooSmall { len: window.len() });
    }
    let sd = sample_variance(window).sqrt();
    if !sd.is_finite() || sd <= 0.0 {
        return Err(RiskError::InvalidSigma { value: sd });
    }
    Ok(sd)
}

/// Map a forecast series to VaR thresholds at a common level.
///
/// `mean_forecast` is the external mean-model collaborator: it returns the
/// conditional mean for a given time index. Each threshold uses the
/// distribution snapshot embedded in its forecast point, so thresholds stay
/// consistent with the parameters that produced the volatility forecast.
///
/// # Errors
/// Propagates the scalar estimator's validation errors; the first failing
/// point aborts the mapping.
pub fn garch_var_series<F>(
    mean_forecast: F, forecasts: &[ForecastPoint], level: f64,
) -> RiskResult<Vec<VaRThreshold>>
where
    F: Fn(usize) -> f64,
{
    forecasts
        .iter()
        .map(|point| {
            let mean = mean_forecast(point.time_index);
            let value = garch_var(mean, point.sigma_forecast, &point.params.innovation, level)?;
            Ok(VaRThreshold { time_index: point.time_index, level, value })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover the closed-form identities of both estimators, the
    // tail-direction sign convention, and input validation. Threshold
    // alignment with rolling forecasts is covered by the integration suite.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // At the 5% level the normal-GARCH VaR must equal
    // mean − 1.6448536·σ within numerical tolerance.
    fn normal_garch_var_matches_closed_form_at_5pct() {
        let var = garch_var(0.001, 0.02, &Innovation::normal(), 0.05).unwrap();
        let expected = 0.001 - 1.6448536 * 0.02;
        assert!((var - expected).abs() < 1e-6);
    }

    #[test]
    // Purpose
    // -------
    // With identical inputs, a Student-t VaR must sit below the normal VaR
    // in the loss tail (heavier tails → more conservative threshold).
    fn student_t_var_is_more_conservative_in_loss_tail() {
        let normal = garch_var(0.0, 0.02, &Innovation::normal(), 0.01).unwrap();
        let heavy =
            garch_var(0.0, 0.02, &Innovation::student_t(5.0).unwrap(), 0.01).unwrap();
        assert!(heavy < normal);
    }

    #[test]
    fn delta_normal_var_uses_the_normal_quantile() {
        let var = delta_normal_var(0.0, 0.015, 0.05).unwrap();
        assert!((var - (-1.6448536 * 0.015)).abs() < 1e-6);
    }

    #[test]
    fn estimators_validate_inputs() {
        assert!(matches!(
            garch_var(0.0, 0.02, &Innovation::normal(), 1.0),
            Err(RiskError::InvalidVarLevel { .. })
        ));
        assert!(matches!(
            garch_var(f64::NAN, 0.02, &Innovation::normal(), 0.05),
            Err(RiskError::InvalidMean { .. })
        ));
        assert!(matches!(
            delta_normal_var(0.0, 0.0, 0.05),
            Err(RiskError::InvalidSigma { .. })
        ));
    }

    #[test]
    fn sample_std_rejects_tiny_and_degenerate_windows() {
        assert!(matches!(
            sample_std(array![0.01].view()),
            Err(RiskError::WindowTooSmall { len: 1 })
        ));
        assert!(matches!(
            sample_std(array![0.01, 0.01, 0.01].view()),
            Err(RiskError::InvalidSigma { .. })
        ));
        let sd = sample_std(array![0.01, -0.02, 0.005, 0.0].view()).unwrap();
        assert!(sd > 0.0);
    }
}

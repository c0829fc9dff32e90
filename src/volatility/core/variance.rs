//! σ²-recursion for GARCH(1,1): training path and likelihood driver.
//!
//! Implements the in-sample conditional-variance recursion and the
//! log-likelihood accumulation used by the optimizer on every iterate.
//!
//! ## Model convention (Bollerslev)
//! `σ²_t = ω + α·ε²_{t−1} + β·σ²_{t−1}` for `t ≥ 1`, seeded with
//! `σ²_0 = unconditional sample variance` of the fitting window (or a fixed
//! override from [`VarianceInit`]).
//!
//! ## What this module does
//! - Seeds `σ²_0` from the configured [`VarianceInit`] policy, rejecting
//!   degenerate (non-positive) sample variances.
//! - Runs the σ²-recursion over the sample **in place**, writing into the
//!   model's preallocated scratch buffer (no heap allocations per iterate).
//! - Clamps each `σ²_t` to [`SigmaGuards`] for numerical safety; the
//!   likelihood is evaluated at the clamped value.
//! - Accumulates the total log-likelihood under the iterate's innovation
//!   snapshot.
//!
//! ## Invariants (enforced upstream)
//! - `ω > 0`; `α, β ≥ 0`; `α + β < 1 − margin` — under these the recursion
//!   produces a strictly positive variance path for any finite residuals.
use crate::volatility::{
    core::{
        data::ResidualSeries,
        guards::SigmaGuards,
        options::VarianceInit,
        params::GarchWorkSpace,
    },
    errors::{GarchError, GarchResult},
    models::garch::GarchModel,
};
use ndarray::ArrayView1;

/// Unbiased sample variance (denominator `n − 1`) of a series.
///
/// Callers guarantee `n ≥ 2` via the fit-length validation; for a
/// constant series the result is 0.0, which the seed policy rejects as
/// degenerate.
pub fn sample_variance(data: ArrayView1<f64>) -> f64 {
    let n = data.len() as f64;
    let mean = data.sum() / n;
    data.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / (n - 1.0)
}

/// Clamp a σ² value into `[guards.min, guards.max]`.
///
/// Used in training and forecasting to prevent numerical underflow/overflow
/// from propagating through the recursion.
pub fn guard_sigma2(value: f64, guards: &SigmaGuards) -> f64 {
    if value < guards.min {
        guards.min
    } else if value > guards.max {
        guards.max
    } else {
        value
    }
}

/// Resolve the σ²-seed for a fitting window under the configured policy.
///
/// # Errors
/// Returns [`GarchError::DegenerateVariance`] when sample-variance seeding
/// encounters a non-positive variance (constant or near-constant window).
pub fn resolve_seed(init: &VarianceInit, residuals: &ResidualSeries) -> GarchResult<f64> {
    let seed = match init {
        VarianceInit::SampleVariance => sample_variance(residuals.view()),
        VarianceInit::Fixed(value) => *value,
    };
    if !seed.is_finite() || seed <= 0.0 {
        return Err(GarchError::DegenerateVariance { value: seed });
    }
    Ok(seed)
}

/// Compute the conditional-variance path **in place** for a GARCH(1,1)
/// iterate.
///
/// Writes `σ²_t` for `t = 0..n−1` into `model.scratch.sigma2_buf[..n]`,
/// where `n = residuals.len()`:
///
/// ```text
/// σ²_0 = seed (sample variance or fixed override)
/// σ²_t = ω + α·ε²_{t−1} + β·σ²_{t−1}        t = 1..n−1
/// ```
///
/// Each value is clamped into the configured [`SigmaGuards`].
///
/// # Side effects
/// - Overwrites the first `n` entries of the σ² scratch buffer. No heap
///   allocations.
///
/// # Errors
/// - Propagates [`GarchError::DegenerateVariance`] from seed resolution.
pub fn compute_sigma2(
    params: &GarchWorkSpace, residuals: &ResidualSeries, model: &GarchModel,
) -> GarchResult<()> {
    let guards = &model.options.sigma_guards;
    let seed = resolve_seed(&model.options.init, residuals)?;
    let data = residuals.view();
    let n = data.len();

    let mut sigma2_buf = model.scratch.sigma2_buf.borrow_mut();
    sigma2_buf[0] = guard_sigma2(seed, guards);
    for t in 1..n {
        let eps_prev = data[t - 1];
        let next = params.omega + params.alpha * eps_prev * eps_prev + params.beta * sigma2_buf[t - 1];
        sigma2_buf[t] = guard_sigma2(next, guards);
    }
    Ok(())
}

/// Evaluate the total log-likelihood `ℓ(θ)` for a GARCH(1,1) iterate.
///
/// This driver:
/// 1) Calls [`compute_sigma2`] to (re)compute and store the σ² path in the
///    model's scratch buffer.
/// 2) Accumulates per-observation terms under the iterate's innovation
///    snapshot using the change of variables
///    `log f_X(ε_t | σ_t) = log f(ε_t/σ_t) − log σ_t`.
///
/// # Returns
/// The scalar log-likelihood `ℓ(θ)`.
///
/// # Errors
/// Propagates seed, data, and innovation-pdf errors. If any σ² was clamped
/// by guards, the likelihood is evaluated at the clamped value.
pub fn likelihood_driver(
    model: &GarchModel, workspace: &GarchWorkSpace, residuals: &ResidualSeries,
) -> GarchResult<f64> {
    compute_sigma2(workspace, residuals, model)?;
    let innovation = workspace.innovation(&model.innovation);
    let binding = model.scratch.sigma2_buf.borrow();
    let n = residuals.len();
    innovation.log_likelihood(residuals.view(), binding.slice(ndarray::s![..n]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::numerical_stability::transformations::STATIONARITY_MARGIN;
    use crate::volatility::core::{
        distribution::Innovation, guards::SigmaGuards, options::GarchOptions,
        options::VarianceInit,
    };
    use crate::volatility::models::garch::GarchModel;
    use ndarray::Array1;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The positivity invariant of the σ² path under valid parameters.
    // - Degenerate-variance rejection for constant windows.
    // - Constant-parameter recursions (α = β = 0) where σ²_t = ω after the
    //   seed, and guard clamping.
    //
    // They intentionally DO NOT cover:
    // - Realistic parameter estimation (model and integration tests).
    // -------------------------------------------------------------------------

    fn alternating_residuals(n: usize) -> ResidualSeries {
        let data =
            Array1::from_iter((0..n).map(|t| if t % 2 == 0 { 0.01 } else { -0.013 }));
        ResidualSeries::new(data).expect("finite residuals")
    }

    fn workspace(omega: f64, alpha: f64, beta: f64) -> GarchWorkSpace {
        let slack = 1.0 - STATIONARITY_MARGIN - alpha - beta;
        GarchWorkSpace { omega, alpha, beta, slack, shape: None }
    }

    #[test]
    // Purpose
    // -------
    // For all valid stationary parameters the recursion must keep every
    // σ²_t strictly positive (positivity invariant).
    fn sigma2_path_is_strictly_positive() {
        // Arrange
        let n = 64;
        let residuals = alternating_residuals(n);
        let model = GarchModel::new(Innovation::normal(), GarchOptions::default(), n);
        let params = workspace(1e-5, 0.1, 0.85);

        // Act
        compute_sigma2(&params, &residuals, &model).expect("recursion should succeed");

        // Assert
        let buf = model.scratch.sigma2_buf.borrow();
        assert!(buf.slice(ndarray::s![..n]).iter().all(|&v| v > 0.0));
    }

    #[test]
    // Purpose
    // -------
    // A constant residual window has zero sample variance; sample-variance
    // seeding must reject it as degenerate input.
    fn constant_window_is_rejected_as_degenerate() {
        let data = Array1::from_elem(40, 0.01);
        let residuals = ResidualSeries::new(data).unwrap();
        let err = resolve_seed(&VarianceInit::SampleVariance, &residuals).unwrap_err();
        assert!(matches!(err, GarchError::DegenerateVariance { .. }));
    }

    #[test]
    // Purpose
    // -------
    // With α = β = 0 the recursion degenerates to σ²_0 = seed and σ²_t = ω
    // for t ≥ 1, making the path easy to verify exactly.
    fn constant_params_give_seed_then_omega() {
        // Arrange
        let n = 8;
        let residuals = alternating_residuals(n);
        let seed = 0.5;
        let omega = 2.0;
        let opts = GarchOptions::new(
            VarianceInit::fixed(seed).unwrap(),
            Default::default(),
            SigmaGuards::new((1e-12, 1e6)).unwrap(),
        );
        let model = GarchModel::new(Innovation::normal(), opts, n);
        let params = workspace(omega, 0.0, 0.0);

        // Act
        compute_sigma2(&params, &residuals, &model).unwrap();

        // Assert
        let buf = model.scratch.sigma2_buf.borrow();
        assert!((buf[0] - seed).abs() < 1e-12);
        for t in 1..n {
            assert!((buf[t] - omega).abs() < 1e-12);
        }
    }

    #[test]
    // Purpose
    // -------
    // Guards must clamp an over-large ω into the configured maximum.
    fn guards_clamp_large_omega() {
        let n = 6;
        let residuals = alternating_residuals(n);
        let opts = GarchOptions::new(
            VarianceInit::fixed(1.0).unwrap(),
            Default::default(),
            SigmaGuards::new((1e-12, 10.0)).unwrap(),
        );
        let model = GarchModel::new(Innovation::normal(), opts, n);
        let params = workspace(1_000.0, 0.0, 0.0);

        compute_sigma2(&params, &residuals, &model).unwrap();

        let buf = model.scratch.sigma2_buf.borrow();
        for t in 1..n {
            assert!((buf[t] - 10.0).abs() < 1e-12);
        }
    }

    #[test]
    // Purpose
    // -------
    // The likelihood driver must agree with evaluating the innovation
    // log-likelihood directly on the recursion output.
    fn likelihood_driver_matches_manual_evaluation() {
        let n = 32;
        let residuals = alternating_residuals(n);
        let model = GarchModel::new(Innovation::normal(), GarchOptions::default(), n);
        let params = workspace(1e-5, 0.05, 0.9);

        let ll = likelihood_driver(&model, &params, &residuals).unwrap();

        compute_sigma2(&params, &residuals, &model).unwrap();
        let buf = model.scratch.sigma2_buf.borrow();
        let manual = Innovation::normal()
            .log_likelihood(residuals.view(), buf.slice(ndarray::s![..n]))
            .unwrap();
        assert!((ll - manual).abs() < 1e-12);
    }
}

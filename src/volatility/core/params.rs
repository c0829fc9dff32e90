//! GARCH(1,1) parameterization and scratch workspace.
//!
//! This module provides the **model-space** parameter container
//! [`GarchParams`], the optimizer-facing **workspace** [`GarchWorkSpace`],
//! and the **scratch buffer** [`GarchScratch`] reused by likelihood and
//! forecasting routines. It also implements the numerically stable mapping
//! between model space and the **optimizer-space vector** θ.
//!
//! ## Mapping conventions
//! - `θ₀ = softplus⁻¹(ω)` ensures `ω > 0`.
//! - `(α, β, slack)` live on a **scaled simplex** of total mass
//!   `(1 − margin)`, enforcing strict stationarity. The optimizer space
//!   stores **log-odds relative to slack** (slack is the softmax baseline
//!   with implicit logit 0).
//! - When the innovation family is Student-t, `θ₃` maps to the shape via
//!   `ν = 2 + softplus(θ₃)`, keeping `ν > 2` for every iterate.
//!
//! ## Stationarity and slack
//! - Strict stationarity is enforced via a small safety margin (1e-6), so
//!   `α + β < 1 − margin` holds by construction during optimization.
//! - `slack ≥ 0` completes the mass: `α + β + slack = 1 − margin`.
//!
//! ## Invariants validated by constructors
//! - `ω > 0`, `α ≥ 0`, `β ≥ 0`, `α + β < 1` with `slack ≥ 0`
//! - `shape > 2` when present
//! - `resid_last` finite, `sigma2_last` finite and > 0 (forecast-origin
//!   state carried for 1-step forecasting)
use crate::{
    optimization::numerical_stability::transformations::{
        LOGIT_EPS, STATIONARITY_MARGIN, safe_softmax2, safe_softplus, safe_softplus_inv,
    },
    volatility::{
        core::{
            distribution::Innovation,
            validation::{
                validate_alpha, validate_beta, validate_last_state, validate_omega,
                validate_shape, validate_stationarity_and_slack, validate_theta,
            },
        },
        errors::ParamResult,
    },
};
use ndarray::{Array1, ArrayView1};
use std::cell::RefCell;

/// Scratch workspace for GARCH estimation.
///
/// Holds the conditional-variance buffer reused across likelihood
/// evaluations so the σ² recursion runs allocation-free inside the
/// optimizer's inner loop. The buffer is zero-initialized at construction
/// and overwritten on every recursion pass.
///
/// Interior mutability via `RefCell` keeps the recursion callable from
/// shared references; a single instance is intended for use on one thread
/// at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct GarchScratch {
    /// Conditional-variance path buffer, length equal to the sample size.
    pub sigma2_buf: RefCell<Array1<f64>>,
}

impl GarchScratch {
    /// Construct a scratch workspace sized for a series of length `n`.
    pub fn new(n: usize) -> GarchScratch {
        GarchScratch { sigma2_buf: RefCell::new(Array1::zeros(n)) }
    }
}

/// Optimizer-facing view of the GARCH(1,1) parameters at a θ iterate.
///
/// Maps an unconstrained θ into model space without constructing a full
/// validated snapshot: the softplus/softmax transforms guarantee the
/// domain constraints for every finite θ, so per-iterate validation is
/// limited to shape/finiteness of θ itself. Used by the likelihood driver
/// on every optimizer step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GarchWorkSpace {
    /// ω > 0
    pub omega: f64,
    /// α ≥ 0
    pub alpha: f64,
    /// β ≥ 0
    pub beta: f64,
    /// slack ≥ 0 with α + β + slack = 1 − margin
    pub slack: f64,
    /// Student-t shape ν > 2 when the family estimates one.
    pub shape: Option<f64>,
}

impl GarchWorkSpace {
    /// Map an unconstrained optimizer vector θ into model space.
    ///
    /// Layout: `θ = [θ_ω, θ_α, θ_β]` for normal innovations,
    /// `θ = [θ_ω, θ_α, θ_β, θ_ν]` when a Student-t shape is estimated.
    ///
    /// # Errors
    /// - [`ParamError::ThetaLengthMismatch`](crate::volatility::errors::ParamError::ThetaLengthMismatch)
    ///   on wrong dimension.
    /// - [`ParamError::InvalidThetaInput`](crate::volatility::errors::ParamError::InvalidThetaInput)
    ///   on non-finite entries.
    pub fn from_theta(theta: ArrayView1<f64>, estimates_shape: bool) -> ParamResult<Self> {
        let dim = if estimates_shape { 4 } else { 3 };
        validate_theta(theta, dim)?;
        let omega = safe_softplus(theta[0]);
        let (alpha, beta, slack) = safe_softmax2(theta[1], theta[2]);
        let shape = if estimates_shape { Some(2.0 + safe_softplus(theta[3])) } else { None };
        Ok(GarchWorkSpace { omega, alpha, beta, slack, shape })
    }

    /// Unconditional (long-run) variance `ω / (1 − α − β)` implied by the
    /// current iterate. Finite for every workspace because the simplex map
    /// keeps `α + β` strictly below 1.
    pub fn uncond_variance(&self) -> f64 {
        self.omega / (1.0 - self.alpha - self.beta)
    }

    /// Innovation snapshot for this iterate, given the requested family.
    ///
    /// Normal stays normal; for Student-t families the estimated shape from
    /// θ replaces the family's starting shape.
    pub fn innovation(&self, family: &Innovation) -> Innovation {
        match (family, self.shape) {
            (Innovation::StudentT { .. }, Some(shape)) => Innovation::StudentT { shape },
            _ => Innovation::Normal,
        }
    }
}

/// Constrained **model-space** parameters for a fitted GARCH(1,1) model.
///
/// Invariants are validated at construction; one immutable instance is
/// produced per fit/refit cycle, so forecasts retain the exact parameters
/// (and distribution snapshot) that produced them. The forecast-origin
/// state `(resid_last, sigma2_last)` is carried so a snapshot alone can
/// roll the variance recursion one step ahead.
#[derive(Debug, Clone, PartialEq)]
pub struct GarchParams {
    /// ω > 0
    pub omega: f64,
    /// α ≥ 0
    pub alpha: f64,
    /// β ≥ 0
    pub beta: f64,
    /// slack ≥ 0
    pub slack: f64,
    /// Innovation snapshot (fitted shape for Student-t).
    pub innovation: Innovation,
    /// Last in-sample residual ε_T at the forecast origin.
    pub resid_last: f64,
    /// Last in-sample conditional variance σ²_T at the forecast origin.
    pub sigma2_last: f64,
}

impl GarchParams {
    /// Create validated model-space parameters.
    ///
    /// Validates `ω > 0`, `α ≥ 0`, `β ≥ 0`, stationarity with non-negative
    /// slack, the Student-t shape (when present), and finiteness of the
    /// forecast-origin state. Returns an error if any check fails; on
    /// success the parameters satisfy strict stationarity.
    pub fn new(
        omega: f64, alpha: f64, beta: f64, slack: f64, innovation: Innovation, resid_last: f64,
        sigma2_last: f64,
    ) -> ParamResult<Self> {
        validate_omega(omega)?;
        validate_alpha(alpha)?;
        validate_beta(beta)?;
        validate_stationarity_and_slack(alpha, beta, slack)?;
        if let Some(shape) = innovation.shape() {
            validate_shape(shape)?;
        }
        validate_last_state(resid_last, sigma2_last)?;
        Ok(GarchParams { omega, alpha, beta, slack, innovation, resid_last, sigma2_last })
    }

    /// Build validated model-space parameters from an optimizer-space vector
    /// θ and the forecast-origin state.
    ///
    /// ### Inputs
    /// - `theta`: optimizer-space parameters (see [`GarchWorkSpace::from_theta`]
    ///   for the layout).
    /// - `family`: the requested innovation family; for Student-t the shape
    ///   estimated in θ replaces the family's starting shape.
    /// - `resid_last` / `sigma2_last`: last residual and conditional
    ///   variance of the fitting window, cached for 1-step forecasting.
    ///
    /// ### Behavior
    /// Recovers `(ω, α, β, slack[, ν])` through the stable transforms, then
    /// re-validates every domain constraint — the transforms guarantee them
    /// for finite θ, but a fitted parameter set is re-checked rather than
    /// trusted (estimates violating constraints are rejected, not clamped).
    pub fn from_theta(
        theta: ArrayView1<f64>, family: &Innovation, resid_last: f64, sigma2_last: f64,
    ) -> ParamResult<Self> {
        let workspace = GarchWorkSpace::from_theta(theta, family.has_shape_param())?;
        GarchParams::new(
            workspace.omega,
            workspace.alpha,
            workspace.beta,
            workspace.slack,
            workspace.innovation(family),
            resid_last,
            sigma2_last,
        )
    }

    /// Map model-space parameters to **optimizer-space** θ.
    ///
    /// Inverse of [`GarchParams::from_theta`]:
    /// 1. `θ₀ = softplus⁻¹(ω)`.
    /// 2. Normalize `(α, β, slack)` to probabilities on the scaled simplex,
    ///    clamp tiny components to `LOGIT_EPS`, and store
    ///    `ln(π) − ln(π_slack)` in the α/β slots.
    /// 3. For Student-t, `θ₃ = softplus⁻¹(ν − 2)`.
    ///
    /// Returns a newly allocated `Array1<f64>` of length 3 or 4. Assumes
    /// this instance already satisfies the model-space invariants.
    pub fn to_theta(&self) -> Array1<f64> {
        let denom_inv = 1.0 / (1.0 - STATIONARITY_MARGIN);
        let pi_alpha = (self.alpha * denom_inv).max(LOGIT_EPS);
        let pi_beta = (self.beta * denom_inv).max(LOGIT_EPS);
        let pi_slack = (self.slack * denom_inv).max(LOGIT_EPS);
        let log_slack = pi_slack.ln();

        let dim = if self.innovation.has_shape_param() { 4 } else { 3 };
        let mut theta = Array1::<f64>::zeros(dim);
        theta[0] = safe_softplus_inv(self.omega);
        theta[1] = pi_alpha.ln() - log_slack;
        theta[2] = pi_beta.ln() - log_slack;
        if let Some(shape) = self.innovation.shape() {
            theta[3] = safe_softplus_inv(shape - 2.0);
        }
        theta
    }

    /// Unconditional (long-run) variance of the process:
    ///
    /// ```text
    /// σ̄² = ω / (1 − α − β)
    /// ```
    ///
    /// Requires strict stationarity, which is enforced at construction.
    /// Useful as a baseline forecast and for sanity checks.
    pub fn uncond_variance(&self) -> f64 {
        self.omega / (1.0 - self.alpha - self.beta)
    }

    /// Persistence of the variance process, `α + β`. Values near 1 imply
    /// slowly decaying volatility clusters.
    pub fn persistence(&self) -> f64 {
        self.alpha + self.beta
    }

    /// One-step-ahead conditional variance from the cached forecast-origin
    /// state:
    ///
    /// ```text
    /// σ²_{T+1} = ω + α·ε_T² + β·σ²_T
    /// ```
    pub fn one_step_variance(&self) -> f64 {
        self.omega + self.alpha * self.resid_last * self.resid_last + self.beta * self.sigma2_last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::volatility::errors::ParamError;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Workspace mapping from θ: domain constraints hold for arbitrary
    //   finite inputs, and the shape slot is honored.
    // - GarchParams construction/validation, including rejection paths.
    // - The θ round-trip: to_theta followed by from_theta reproduces the
    //   parameters to near machine precision.
    // - The one-step variance identity used by the rolling forecaster.
    // -------------------------------------------------------------------------

    fn fitted_params(innovation: Innovation) -> GarchParams {
        let alpha = 0.08;
        let beta = 0.9;
        let slack = 1.0 - STATIONARITY_MARGIN - alpha - beta;
        GarchParams::new(2e-6, alpha, beta, slack, innovation, -0.012, 1.8e-4)
            .expect("valid parameter set")
    }

    #[test]
    // Purpose
    // -------
    // For arbitrary finite θ the workspace must land strictly inside the
    // constrained region: ω > 0, α, β ≥ 0, α + β < 1.
    fn workspace_maps_any_finite_theta_into_domain() {
        for &(t0, t1, t2) in &[(0.0, 0.0, 0.0), (-8.0, 3.0, -4.0), (15.0, -20.0, 20.0)] {
            let theta = array![t0, t1, t2];
            let ws = GarchWorkSpace::from_theta(theta.view(), false).unwrap();
            assert!(ws.omega > 0.0);
            assert!(ws.alpha >= 0.0 && ws.beta >= 0.0 && ws.slack >= 0.0);
            assert!(ws.alpha + ws.beta < 1.0);
            assert!(ws.shape.is_none());
            assert!(ws.uncond_variance().is_finite());
        }
    }

    #[test]
    fn workspace_estimated_shape_stays_above_two() {
        let theta = array![0.0, 0.0, 0.0, -30.0];
        let ws = GarchWorkSpace::from_theta(theta.view(), true).unwrap();
        let shape = ws.shape.unwrap();
        assert!(shape > 2.0);

        let theta_len_err = GarchWorkSpace::from_theta(array![0.0, 0.0, 0.0].view(), true);
        assert!(matches!(theta_len_err, Err(ParamError::ThetaLengthMismatch { .. })));
    }

    #[test]
    fn params_reject_constraint_violations() {
        let innovation = Innovation::normal();
        assert!(matches!(
            GarchParams::new(0.0, 0.1, 0.8, 0.1, innovation, 0.0, 1.0),
            Err(ParamError::InvalidOmega { .. })
        ));
        assert!(matches!(
            GarchParams::new(1e-6, 0.5, 0.5, 0.0, innovation, 0.0, 1.0),
            Err(ParamError::StationarityViolated { .. })
        ));
        assert!(matches!(
            GarchParams::new(1e-6, 0.1, 0.8, 0.1, innovation, 0.0, 0.0),
            Err(ParamError::InvalidLastVariance { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // to_theta → from_theta must reproduce (ω, α, β, ν) to high precision
    // for both innovation families.
    //
    // Given
    // -----
    // - A stationary parameter set with slack completing the scaled simplex.
    //
    // Expect
    // ------
    // - Round-tripped parameters within 1e-9 of the originals.
    fn theta_round_trip_reproduces_parameters() {
        for innovation in [Innovation::normal(), Innovation::student_t(7.5).unwrap()] {
            // Arrange
            let params = fitted_params(innovation);

            // Act
            let theta = params.to_theta();
            let back = GarchParams::from_theta(
                theta.view(),
                &innovation,
                params.resid_last,
                params.sigma2_last,
            )
            .unwrap();

            // Assert
            assert!((back.omega - params.omega).abs() < 1e-9);
            assert!((back.alpha - params.alpha).abs() < 1e-9);
            assert!((back.beta - params.beta).abs() < 1e-9);
            match (back.innovation.shape(), params.innovation.shape()) {
                (Some(a), Some(b)) => assert!((a - b).abs() < 1e-9),
                (None, None) => {}
                other => panic!("shape mismatch after round trip: {other:?}"),
            }
        }
    }

    #[test]
    fn one_step_variance_matches_recursion_formula() {
        let params = fitted_params(Innovation::normal());
        let expected = params.omega
            + params.alpha * params.resid_last * params.resid_last
            + params.beta * params.sigma2_last;
        assert!((params.one_step_variance() - expected).abs() < 1e-15);
        assert!((params.persistence() - 0.98).abs() < 1e-12);
    }
}

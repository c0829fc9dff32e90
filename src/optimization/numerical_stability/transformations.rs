//! Numerical stability utilities.
//!
//! Provides safe implementations of common nonlinear transforms
//! that are prone to overflow/underflow in naïve form.
//! The functions here follow guarded strategies similar to those
//! in major ML libraries (e.g. PyTorch, TensorFlow), using explicit
//! cutoffs (`x > 20.0`) to keep `f64` arithmetic in a well-conditioned regime.
//!
//! # Provided items
//! - [`STATIONARITY_MARGIN`]: a small ε buffer (default 1e-6).
//!   Used to enforce strict inequalities in stability constraints
//!   (α + β < 1 in the GARCH(1,1) variance recursion).
//! - [`LOGIT_EPS`]: clamp floor applied before taking logs of tiny
//!   probabilities in the inverse softmax map.
//! - [`safe_softplus(x)`]: stable version of `ln(1 + exp(x))`,
//!   mapping ℝ → (0, ∞) without overflow.
//! - [`safe_softplus_inv(x)`]: inverse of softplus, mapping
//!   (0, ∞) → ℝ without catastrophic cancellation.
//! - [`safe_logistic(x)`]: stable sigmoid, the derivative of softplus.
//! - [`safe_softmax2(a, b)`]: max-shift softmax over the logits
//!   `(a, b, 0)` scaled to total mass `1 − margin`, yielding the
//!   constrained `(α, β, slack)` triple.
//!
//! # Rationale
//! These transforms let the optimizer run over unconstrained ℝⁿ while the
//! model parameters stay strictly inside the stationarity region, so no
//! iterate ever produces an explosive variance recursion.

/// Safety margin for strict stationarity in GARCH models.
///
/// The covariance-stationarity condition requires `alpha + beta < 1`.
/// This margin enforces the inequality *strictly* by reserving a small
/// buffer (default = 1e-6), so the recursion always runs inside the
/// stable region and the unconditional variance `omega / (1 - alpha - beta)`
/// stays finite for every optimizer iterate.
pub const STATIONARITY_MARGIN: f64 = 1e-6;

/// Floor applied to normalized probabilities before taking logs in the
/// inverse softmax map (`to_theta`), avoiding `ln(0)`.
pub const LOGIT_EPS: f64 = 1e-12;

/// Numerically stable softplus: `softplus(x) = ln(1 + exp(x))`.
///
/// Computes softplus without overflow for large positive `x` and
/// with good precision for large negative `x`. This implementation
/// uses a simple piecewise guard:
///
/// - For sufficiently large `x`, `softplus(x) ≈ x + ln1p(exp(-x)) ≈ x`.
/// - Otherwise, it falls back to `ln1p(exp(x))`.
///
/// The cutoff used here (`x > 20.0`) is a practical threshold that
/// keeps the calculation in a well-conditioned regime for `f64`.
pub fn safe_softplus(x: f64) -> f64 {
    if x > 20.0 { x } else { x.exp().ln_1p() }
}

/// Stable inverse of softplus on `(0, ∞)`: solves for `t` in
/// `softplus(t) = x`, returning `t = ln(exp(x) - 1)`.
///
/// Direct evaluation of `ln(exp(x) - 1)` can overflow or lose precision.
/// This implementation mirrors the guarded strategy of `safe_softplus`:
///
/// - For sufficiently large `x`, `exp(-x)` is tiny and
///   `ln(exp(x) - 1) ≈ x + ln(1 - exp(-x)) ≈ x`.
/// - Otherwise, it uses `ln(expm1(x))`.
///
/// # Parameters
/// - `x`: a positive real (the softplus output), must be finite and `> 0`.
pub fn safe_softplus_inv(x: f64) -> f64 {
    if x > 20.0 { x } else { x.exp_m1().ln() }
}

/// Numerically stable logistic sigmoid `σ(x) = 1 / (1 + exp(-x))`.
///
/// Splits on the sign of `x` so the exponential argument is always
/// non-positive, preventing overflow in either tail. `σ` is the derivative
/// of [`safe_softplus`], used when chaining gradients through the ω map.
pub fn safe_logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Jacobian–vector product of [`safe_softmax2`]: map model-space gradient
/// components `(d_alpha, d_beta)` into logit space.
///
/// With `K = 1 − STATIONARITY_MARGIN`, `p_a = alpha/K`, `p_b = beta/K`
/// the softmax Jacobian gives
///
/// ```text
/// ∂ℓ/∂θ_α = K·[d_alpha·p_a(1 − p_a) − d_beta·p_a·p_b]
/// ∂ℓ/∂θ_β = K·[d_beta·p_b(1 − p_b) − d_alpha·p_a·p_b]
/// ```
///
/// `alpha`/`beta` must come from the same `safe_softmax2` evaluation the
/// gradient refers to.
///
/// # Returns
/// `(grad_theta_alpha, grad_theta_beta)`.
pub fn safe_softmax2_deriv(alpha: f64, beta: f64, d_alpha: f64, d_beta: f64) -> (f64, f64) {
    let k = 1.0 - STATIONARITY_MARGIN;
    let p_a = alpha / k;
    let p_b = beta / k;
    let g_a = k * (d_alpha * p_a * (1.0 - p_a) - d_beta * p_a * p_b);
    let g_b = k * (d_beta * p_b * (1.0 - p_b) - d_alpha * p_a * p_b);
    (g_a, g_b)
}

/// Max-shift softmax over the logits `(a, b, 0)`, scaled to total mass
/// `1 − STATIONARITY_MARGIN`.
///
/// The third component (implicit logit 0) is the *slack* of the
/// stationarity constraint: the returned triple satisfies
///
/// ```text
/// alpha, beta, slack >= 0
/// alpha + beta + slack = 1 - STATIONARITY_MARGIN
/// ```
///
/// so `alpha + beta < 1` holds strictly for every finite input, which is
/// exactly the GARCH(1,1) covariance-stationarity constraint. Subtracting
/// the running maximum before exponentiating keeps the evaluation finite
/// for logits of any magnitude.
///
/// # Returns
/// `(alpha, beta, slack)`.
pub fn safe_softmax2(a: f64, b: f64) -> (f64, f64, f64) {
    let m = a.max(b).max(0.0);
    let ea = (a - m).exp();
    let eb = (b - m).exp();
    let es = (-m).exp();
    let denom = ea + eb + es;
    let scale = (1.0 - STATIONARITY_MARGIN) / denom;
    (ea * scale, eb * scale, es * scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Agreement of the guarded transforms with their naïve formulas on a
    //   safe input grid.
    // - Tail behavior of softplus/logistic for large |x|.
    // - Mass conservation and non-negativity of the scaled softmax triple.
    //
    // They intentionally DO NOT cover:
    // - The parameter-space mappings built on top of these primitives (those
    //   are tested in volatility::core::params).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that safe_softplus matches ln(1 + exp(x)) on moderate inputs
    // and degenerates to the identity for large x.
    fn safe_softplus_matches_naive_and_tail() {
        for &x in &[-5.0, -1.0, 0.0, 1.0, 5.0] {
            let naive = (1.0_f64 + x.exp()).ln();
            assert!((safe_softplus(x) - naive).abs() < 1e-12);
        }
        assert_eq!(safe_softplus(500.0), 500.0);
    }

    #[test]
    // Purpose
    // -------
    // Verify that safe_softplus_inv is the left inverse of safe_softplus
    // across several magnitudes.
    fn softplus_roundtrip() {
        for &x in &[-3.0, -0.5, 0.0, 0.5, 3.0, 25.0] {
            let y = safe_softplus(x);
            assert!((safe_softplus_inv(y) - x).abs() < 1e-9);
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify logistic symmetry σ(-x) = 1 - σ(x) and saturation in the tails.
    fn logistic_symmetry_and_tails() {
        for &x in &[-4.0, -1.0, 0.0, 1.0, 4.0] {
            assert!((safe_logistic(-x) - (1.0 - safe_logistic(x))).abs() < 1e-12);
        }
        assert!(safe_logistic(40.0) > 1.0 - 1e-12);
        assert!(safe_logistic(-40.0) < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Check the softmax Jacobian–vector product against central finite
    // differences of the forward map in a low-dimensional sweep.
    fn softmax2_deriv_matches_finite_differences() {
        let h = 1e-6;
        for &(ta, tb) in &[(0.3, -0.7), (-1.2, 0.4), (0.0, 0.0)] {
            // Directional objective g(θ) = 2·α(θ) − 3·β(θ).
            let (d_alpha, d_beta) = (2.0, -3.0);
            let (alpha, beta, _) = safe_softmax2(ta, tb);
            let (g_a, g_b) = safe_softmax2_deriv(alpha, beta, d_alpha, d_beta);

            let eval = |a: f64, b: f64| {
                let (al, be, _) = safe_softmax2(a, b);
                d_alpha * al + d_beta * be
            };
            let fd_a = (eval(ta + h, tb) - eval(ta - h, tb)) / (2.0 * h);
            let fd_b = (eval(ta, tb + h) - eval(ta, tb - h)) / (2.0 * h);
            assert!((g_a - fd_a).abs() < 1e-8, "theta_alpha: {g_a} vs {fd_a}");
            assert!((g_b - fd_b).abs() < 1e-8, "theta_beta: {g_b} vs {fd_b}");
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that safe_softmax2 conserves the scaled mass and keeps every
    // component non-negative, including for extreme logits.
    fn softmax2_mass_and_nonnegativity() {
        for &(a, b) in &[(0.0, 0.0), (2.0, -1.0), (-30.0, 30.0), (100.0, 100.0)] {
            let (alpha, beta, slack) = safe_softmax2(a, b);
            assert!(alpha >= 0.0 && beta >= 0.0 && slack >= 0.0);
            let total = alpha + beta + slack;
            assert!((total - (1.0 - STATIONARITY_MARGIN)).abs() < 1e-12);
            assert!(alpha + beta < 1.0);
        }
    }
}

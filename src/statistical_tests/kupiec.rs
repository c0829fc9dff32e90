//! statistical_tests::kupiec — VaR exception backtest with binomial bounds.
//!
//! Purpose
//! -------
//! Evaluate a sequence of VaR thresholds against realized returns: count
//! exceptions (returns strictly below their threshold), compare the count
//! against two-sided Binomial exceedance bounds, and report the Kupiec
//! (1995) proportion-of-failures likelihood-ratio statistic with its χ²(1)
//! p-value.
//!
//! Key behaviors
//! -------------
//! - Exception rule: observation `t` is an exception iff
//!   `realized[t] < thresholds[t]` (strict; equality is not an exception).
//! - Bounds: the `(1 − confidence)/2` and `1 − (1 − confidence)/2`
//!   quantiles of `Binomial(total, level)`, computed by inverting the CDF.
//! - Verdict: `Accept` iff `lower ≤ exceptions ≤ upper`, otherwise
//!   `Reject`.
//! - POF statistic:
//!   `LR = −2·[ℓ(p) − ℓ(N/T)]` where `ℓ(π) = (T−N)·ln(1−π) + N·ln(π)`,
//!   with the defining limits applied at `N ∈ {0, T}`; asymptotically
//!   χ²(1) under correct coverage.
//!
//! Conventions
//! -----------
//! - This is a pure, stateless evaluation over fixed-size aligned
//!   sequences; input validation is delegated to
//!   `statistical_tests::validation`.
//! - Counts are reported as `u64`, probabilities as `f64` in [0, 1].
use crate::statistical_tests::{
    errors::BacktestResult,
    validation::validate_backtest_input,
};
use statrs::distribution::{Binomial, ChiSquared, ContinuousCDF, DiscreteCDF};

/// Conventional two-sided confidence of the binomial tolerance band,
/// yielding the 2.5th/97.5th percentile bounds.
pub const DEFAULT_CONFIDENCE: f64 = 0.95;

/// Accept/reject verdict of the exceedance-bounds test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Exception count lies inside the binomial tolerance bounds.
    Accept,
    /// Exception count falls outside the bounds (too few or too many).
    Reject,
}

/// Per-observation backtest record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExceptionRecord {
    /// Position in the backtest window (0-based).
    pub time_index: usize,
    /// Realized return at this position.
    pub realized_return: f64,
    /// VaR threshold at this position.
    pub threshold: f64,
    /// Whether the return breached the threshold.
    pub is_exception: bool,
}

/// Outcome of a VaR exception backtest.
///
/// Holds the exception count, the two-sided binomial bounds at the test
/// confidence, the accept/reject verdict, and the Kupiec POF statistic
/// with its asymptotic p-value. A compact value object that does not own
/// the original data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KupiecOutcome {
    exceptions: u64,
    total: u64,
    lower_bound: u64,
    upper_bound: u64,
    verdict: Verdict,
    lr_stat: f64,
    p_value: f64,
}

impl KupiecOutcome {
    /// Run the exception backtest over aligned realized returns and VaR
    /// thresholds.
    ///
    /// # Arguments
    /// - `realized`: realized returns of the out-of-sample window.
    /// - `thresholds`: VaR thresholds, index-aligned with `realized`.
    /// - `level`: tail probability of the VaR (e.g. 0.05).
    /// - `confidence`: two-sided confidence of the binomial tolerance band
    ///   ([`DEFAULT_CONFIDENCE`] for the conventional 2.5%/97.5% bounds).
    ///
    /// # Errors
    /// - Validation failures from
    ///   [`validate_backtest_input`](crate::statistical_tests::validation::validate_backtest_input)
    ///   (misaligned/empty/non-finite inputs, out-of-range probabilities).
    /// - [`BacktestError::Distribution`](crate::statistical_tests::errors::BacktestError::Distribution)
    ///   if the binomial construction is rejected.
    pub fn backtest(
        realized: &[f64], thresholds: &[f64], level: f64, confidence: f64,
    ) -> BacktestResult<Self> {
        validate_backtest_input(realized, thresholds, level, confidence)?;
        let total = realized.len() as u64;
        let exceptions =
            realized.iter().zip(thresholds.iter()).filter(|(r, t)| r < t).count() as u64;

        let binomial = Binomial::new(level, total)?;
        let tail = (1.0 - confidence) / 2.0;
        let lower_bound = binomial.inverse_cdf(tail);
        let upper_bound = binomial.inverse_cdf(1.0 - tail);
        let verdict = if lower_bound <= exceptions && exceptions <= upper_bound {
            Verdict::Accept
        } else {
            Verdict::Reject
        };

        let lr_stat = pof_statistic(exceptions, total, level);
        let p_value = 1.0 - ChiSquared::new(1.0).expect("freedom = 1").cdf(lr_stat);

        Ok(KupiecOutcome { exceptions, total, lower_bound, upper_bound, verdict, lr_stat, p_value })
    }

    /// Number of exceptions observed.
    pub fn exceptions(&self) -> u64 {
        self.exceptions
    }

    /// Number of backtested observations.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Lower binomial tolerance bound (inclusive).
    pub fn lower_bound(&self) -> u64 {
        self.lower_bound
    }

    /// Upper binomial tolerance bound (inclusive).
    pub fn upper_bound(&self) -> u64 {
        self.upper_bound
    }

    /// Accept/reject verdict of the bounds test.
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// Kupiec proportion-of-failures likelihood-ratio statistic.
    pub fn lr_stat(&self) -> f64 {
        self.lr_stat
    }

    /// Asymptotic χ²(1) p-value of the POF statistic.
    pub fn p_value(&self) -> f64 {
        self.p_value
    }
}

/// Per-observation exception records for aligned inputs.
///
/// Applies the same strict-inequality rule as the aggregate backtest;
/// useful for exception-clustering diagnostics downstream.
///
/// # Errors
/// Same validation conditions as [`KupiecOutcome::backtest`] (level and
/// confidence are not involved here, so only the sequence checks apply).
pub fn exception_records(
    realized: &[f64], thresholds: &[f64],
) -> BacktestResult<Vec<ExceptionRecord>> {
    // Reuse the full validator with neutral probabilities.
    validate_backtest_input(realized, thresholds, 0.5, 0.5)?;
    Ok(realized
        .iter()
        .zip(thresholds.iter())
        .enumerate()
        .map(|(time_index, (&realized_return, &threshold))| ExceptionRecord {
            time_index,
            realized_return,
            threshold,
            is_exception: realized_return < threshold,
        })
        .collect())
}

/// Kupiec POF likelihood-ratio statistic.
///
/// `ℓ(π) = (T−N)·ln(1−π) + N·ln(π)` evaluated at the nominal level `p` and
/// at the observed frequency `N/T`; terms with zero counts contribute zero
/// (their defining limit). Returns `−2·[ℓ(p) − ℓ(N/T)]`, floored at zero
/// against rounding noise.
fn pof_statistic(exceptions: u64, total: u64, level: f64) -> f64 {
    let n = exceptions as f64;
    let t = total as f64;
    let observed = n / t;

    let term = |count: f64, pi: f64| if count > 0.0 { count * pi.ln() } else { 0.0 };
    let ll_null = term(t - n, 1.0 - level) + term(n, level);
    let ll_alt = term(t - n, 1.0 - observed) + term(n, observed);
    (-2.0 * (ll_null - ll_alt)).max(0.0)
}

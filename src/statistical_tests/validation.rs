//! statistical_tests::validation — shared input guards for backtests.
//!
//! Purpose
//! -------
//! Centralize input validation for the backtesting routines: sequence
//! alignment, non-emptiness, finiteness, and the (0, 1) domains of the VaR
//! level and test confidence. This avoids duplicating checks across test
//! statistics.
//!
//! Conventions
//! -----------
//! - This module is purely about *validation*; it performs no I/O and does
//!   not allocate beyond error construction.
//! - Errors are reported via the crate-local [`BacktestError`] enum.
use crate::statistical_tests::errors::{BacktestError, BacktestResult};

/// Validate backtest inputs: aligned, non-empty, finite sequences and
/// in-range level/confidence.
///
/// # Errors
/// - [`BacktestError::DimensionMismatch`] when the sequences differ in
///   length.
/// - [`BacktestError::EmptySeries`] when both are empty.
/// - [`BacktestError::NonFiniteData`] for the first NaN/±∞ in either
///   sequence (thresholds are checked after returns).
/// - [`BacktestError::InvalidLevel`] / [`BacktestError::InvalidConfidence`]
///   for probabilities outside (0, 1).
pub fn validate_backtest_input(
    realized: &[f64], thresholds: &[f64], level: f64, confidence: f64,
) -> BacktestResult<()> {
    if realized.len() != thresholds.len() {
        return Err(BacktestError::DimensionMismatch {
            left: realized.len(),
            right: thresholds.len(),
        });
    }
    if realized.is_empty() {
        return Err(BacktestError::EmptySeries);
    }
    for (index, &value) in realized.iter().chain(thresholds.iter()).enumerate() {
        if !value.is_finite() {
            return Err(BacktestError::NonFiniteData { index: index % realized.len(), value });
        }
    }
    if !level.is_finite() || level <= 0.0 || level >= 1.0 {
        return Err(BacktestError::InvalidLevel { level });
    }
    if !confidence.is_finite() || confidence <= 0.0 || confidence >= 1.0 {
        return Err(BacktestError::InvalidConfidence { value: confidence });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover all error branches of `validate_backtest_input` and
    // a success path. The backtest statistics themselves are tested in the
    // kupiec module.
    // -------------------------------------------------------------------------

    #[test]
    fn accepts_aligned_finite_inputs() {
        assert!(validate_backtest_input(&[0.01, -0.02], &[-0.03, -0.04], 0.05, 0.95).is_ok());
    }

    #[test]
    fn rejects_misalignment_and_emptiness() {
        assert!(matches!(
            validate_backtest_input(&[0.01], &[], 0.05, 0.95),
            Err(BacktestError::DimensionMismatch { left: 1, right: 0 })
        ));
        assert!(matches!(
            validate_backtest_input(&[], &[], 0.05, 0.95),
            Err(BacktestError::EmptySeries)
        ));
    }

    #[test]
    fn rejects_non_finite_data_and_bad_probabilities() {
        assert!(matches!(
            validate_backtest_input(&[f64::NAN], &[0.0], 0.05, 0.95),
            Err(BacktestError::NonFiniteData { .. })
        ));
        assert!(matches!(
            validate_backtest_input(&[0.0], &[0.0], 0.0, 0.95),
            Err(BacktestError::InvalidLevel { .. })
        ));
        assert!(matches!(
            validate_backtest_input(&[0.0], &[0.0], 0.05, 1.0),
            Err(BacktestError::InvalidConfidence { .. })
        ));
    }
}

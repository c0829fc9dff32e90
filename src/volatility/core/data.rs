//! Series containers for the GARCH/VaR stack.
//!
//! Purpose
//! -------
//! Provide small, validated containers for the two ordered series this crate
//! consumes: mean-model residuals (the GARCH input) and realized simple
//! returns (the backtest input). This module centralizes input validation so
//! downstream code can assume clean, finite data.
//!
//! Key behaviors
//! -------------
//! - [`ResidualSeries`] and [`ReturnSeries`] enforce non-emptiness and
//!   finiteness at construction; both are immutable once built.
//! - Neither container rescales or transforms its input; the mean model that
//!   produced the residuals is an external collaborator.
//!
//! Invariants & assumptions
//! ------------------------
//! - All entries are finite (`NaN`/±∞ rejected); negative and zero values
//!   are valid for both series.
//! - Residuals and returns are index-aligned by the caller: entry `t` of
//!   each refers to the same time period. Alignment is re-checked at the
//!   call sites that consume both (rolling forecasts, backtests).
//!
//! Conventions
//! -----------
//! - Indexing is 0-based; the oldest observation sits at index 0.
//! - Series are carried as `ndarray::Array1<f64>` and exposed by view.
use ndarray::{Array1, ArrayView1};

use crate::volatility::{core::validation::validate_series, errors::GarchResult};

/// Validated mean-model residual series.
///
/// The residual at index `t` is the return at `t` minus the conditional mean
/// model's fitted value for `t`, computed externally. This is the sole data
/// input to GARCH estimation; the fit treats it as read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct ResidualSeries {
    data: Array1<f64>,
}

impl ResidualSeries {
    /// Construct a validated [`ResidualSeries`] from raw residuals.
    ///
    /// # Errors
    /// - [`GarchError::EmptySeries`](crate::volatility::errors::GarchError::EmptySeries)
    ///   for an empty input.
    /// - [`GarchError::NonFiniteData`](crate::volatility::errors::GarchError::NonFiniteData)
    ///   with the first offending index/value.
    pub fn new(data: Array1<f64>) -> GarchResult<Self> {
        validate_series(data.view())?;
        Ok(ResidualSeries { data })
    }

    /// View of the underlying residuals.
    pub fn view(&self) -> ArrayView1<'_, f64> {
        self.data.view()
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the series is empty. Always `false` after construction; kept
    /// for API symmetry with standard containers.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Construct a new validated series from a contiguous window of this one.
    ///
    /// The window bounds follow the usual half-open convention `[start, end)`.
    /// Finiteness holds by construction, so only emptiness can fail here.
    pub fn window(&self, start: usize, end: usize) -> GarchResult<Self> {
        ResidualSeries::new(self.data.slice(ndarray::s![start..end]).to_owned())
    }
}

/// Validated realized simple-return series.
///
/// Used by the rolling forecaster (for index alignment) and the backtester
/// (exception counting against VaR thresholds); never an input to the
/// variance recursion itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnSeries {
    data: Array1<f64>,
}

impl ReturnSeries {
    /// Construct a validated [`ReturnSeries`] from raw returns.
    ///
    /// # Errors
    /// Same conditions as [`ResidualSeries::new`].
    pub fn new(data: Array1<f64>) -> GarchResult<Self> {
        validate_series(data.view())?;
        Ok(ReturnSeries { data })
    }

    /// View of the underlying returns.
    pub fn view(&self) -> ArrayView1<'_, f64> {
        self.data.view()
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the series is empty. Always `false` after construction.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

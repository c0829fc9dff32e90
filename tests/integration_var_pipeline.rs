//! Integration tests for the GARCH rolling-VaR pipeline.
//!
//! Purpose
//! -------
//! - Validate the end-to-end flow: simulated residual data, through MLE
//!   fitting and rolling 1-step forecasts, to VaR thresholds and the
//!   Kupiec exceedance backtest.
//! - Exercise realistic parameter regimes (persistent volatility, both
//!   innovation families, moving and expanding windows) rather than toy
//!   edge cases only.
//!
//! Coverage
//! --------
//! - `volatility::simulation`: seeded data generation.
//! - `volatility::models::garch::GarchModel`:
//!   - Estimator consistency on a long simulated sample.
//!   - Fit determinism for identical inputs and options.
//!   - Multi-step forecast behavior after a fit.
//! - `risk::rolling` + `risk::var`:
//!   - Forecast-count and alignment invariants at pipeline scale.
//!   - Threshold construction over the external mean collaborator.
//! - `statistical_tests::kupiec`:
//!   - Coverage of a correctly specified model's VaR over a long
//!     out-of-sample window, and verdict/bounds consistency.
//!
//! Exclusions
//! ----------
//! - Fine-grained validation of low-level building blocks (guards,
//!   validation routines, transforms) — covered by unit tests.
//! - The no-lookahead law and refit-failure policies — covered by unit
//!   tests in `risk::rolling`.
use garch_var::{
    risk::{
        RefitPolicy, RollConfig, RollingForecaster, WindowMode, delta_normal_var,
        garch_var_series, sample_std,
    },
    statistical_tests::{DEFAULT_CONFIDENCE, KupiecOutcome, Verdict, exception_records},
    volatility::{
        core::{
            data::{ResidualSeries, ReturnSeries},
            distribution::Innovation,
            options::GarchOptions,
        },
        models::garch::GarchModel,
        simulation::{SimOpts, simulate},
    },
};
use ndarray::s;

/// True data-generating coefficients used across the suite: persistent but
/// comfortably stationary daily-return dynamics.
const TRUE_OMEGA: f64 = 2e-6;
const TRUE_ALPHA: f64 = 0.08;
const TRUE_BETA: f64 = 0.88;

/// Purpose
/// -------
/// Simulate a residual series from the reference GARCH(1,1) process with a
/// generous burn-in so the sample is effectively stationary.
///
/// Parameters
/// ----------
/// - `n`: sample length.
/// - `seed`: RNG seed; fixed per test for reproducibility.
/// - `innovation`: innovation family of the data-generating process.
fn simulated_series(n: usize, seed: u64, innovation: &Innovation) -> ResidualSeries {
    let path = simulate(TRUE_OMEGA, TRUE_ALPHA, TRUE_BETA, innovation, &SimOpts::new(n, 500, seed))
        .expect("simulation should accept the reference coefficients");
    ResidualSeries::new(path).expect("simulated paths are finite")
}

/// Purpose
/// -------
/// Fit a fresh GARCH model on the given residuals with default options and
/// the conventional initial guess, returning the fitted model.
fn fit_model(data: &ResidualSeries, innovation: Innovation) -> GarchModel {
    let mut model = GarchModel::new(innovation, GarchOptions::default(), data.len());
    let theta0 = model.default_theta0(data).expect("admissible fitting window");
    model.fit(theta0, data).expect("fit should converge on simulated data");
    model
}

#[test]
// Purpose
// -------
// Estimator consistency: fitting on a long sample simulated from known
// coefficients must recover them to within stated tolerances.
//
// Given
// -----
// - 8000 observations simulated from (ω, α, β) = (2e-6, 0.08, 0.88) with
//   normal innovations.
//
// Expect
// ------
// - α and β within ±0.05 absolute of the truth.
// - Implied unconditional variance within ±10% relative of the truth.
// - Persistence α + β within ±10% relative.
// - The fitted variance path is strictly positive throughout.
fn fit_recovers_simulated_parameters() {
    // Arrange
    let data = simulated_series(8000, 42, &Innovation::normal());

    // Act
    let model = fit_model(&data, Innovation::normal());
    let params = model.fitted_params.as_ref().expect("populated after fit");

    // Assert
    assert!((params.alpha - TRUE_ALPHA).abs() < 0.05, "alpha estimate {}", params.alpha);
    assert!((params.beta - TRUE_BETA).abs() < 0.05, "beta estimate {}", params.beta);

    let true_uncond = TRUE_OMEGA / (1.0 - TRUE_ALPHA - TRUE_BETA);
    let fitted_uncond = params.uncond_variance();
    assert!(
        (fitted_uncond - true_uncond).abs() / true_uncond < 0.10,
        "unconditional variance {fitted_uncond} vs {true_uncond}"
    );

    let true_persistence = TRUE_ALPHA + TRUE_BETA;
    assert!((params.persistence() - true_persistence).abs() / true_persistence < 0.10);

    let path = model.variance_path().expect("path available after fit");
    assert!(path.iter().all(|&v| v > 0.0));
}

#[test]
// Purpose
// -------
// Determinism: two fits on identical data with identical options and
// initial guesses must produce identical parameter estimates.
fn refitting_identical_data_is_deterministic() {
    // Arrange
    let data = simulated_series(1000, 9, &Innovation::normal());

    // Act
    let first = fit_model(&data, Innovation::normal());
    let second = fit_model(&data, Innovation::normal());

    // Assert
    let a = &first.results.as_ref().unwrap().theta_hat;
    let b = &second.results.as_ref().unwrap().theta_hat;
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(b.iter()) {
        assert!((x - y).abs() < 1e-12, "theta components diverged: {x} vs {y}");
    }
}

#[test]
// Purpose
// -------
// Joint Student-t estimation: fitting a t-family model on t-generated data
// must produce an admissible fitted shape and stationary coefficients.
//
// Given
// -----
// - 4000 observations simulated with standardized Student-t(6) innovations.
//
// Expect
// ------
// - The fitted shape is finite and within a wide admissible band (2.5, 30).
// - Fitted coefficients remain stationary with positive ω.
fn student_t_shape_is_estimated_jointly() {
    // Arrange
    let innovation = Innovation::student_t(6.0).expect("valid starting shape");
    let data = simulated_series(4000, 17, &innovation);

    // Act
    let model = fit_model(&data, innovation);
    let params = model.fitted_params.as_ref().unwrap();

    // Assert
    let shape = params.innovation.shape().expect("t family carries a shape");
    assert!(shape > 2.5 && shape < 30.0, "implausible fitted shape {shape}");
    assert!(params.omega > 0.0);
    assert!(params.persistence() < 1.0);
}

#[test]
// Purpose
// -------
// Multi-step forecasts from a fitted model must be positive and converge
// toward the fitted unconditional variance as the horizon grows.
fn multi_step_forecasts_mean_revert() {
    // Arrange
    let data = simulated_series(2000, 23, &Innovation::normal());
    let mut model = fit_model(&data, Innovation::normal());
    let uncond = model.fitted_params.as_ref().unwrap().uncond_variance();

    // Act
    let far = model.predict(500).expect("forecast after fit");

    // Assert
    assert!(far > 0.0);
    assert!((far - uncond).abs() / uncond < 0.05, "horizon-500 forecast {far} vs {uncond}");
    let near = model.predict(1).expect("1-step forecast");
    assert!(near > 0.0);
}

#[test]
// Purpose
// -------
// End-to-end pipeline: rolling forecasts over a long out-of-sample window,
// VaR thresholds from the external mean collaborator, and the Kupiec
// backtest. For a correctly specified model the exception frequency must
// sit near the nominal level, and the reported verdict must agree with the
// reported bounds.
//
// Given
// -----
// - 1100 simulated observations, window 600, refit every 100, moving mode,
//   strict policy, 5% VaR, zero conditional mean (the simulation's truth).
//
// Expect
// ------
// - Exactly 500 forecasts, aligned with targets 600..1100.
// - 500 thresholds, all below the mean for the 5% level.
// - Exception frequency within a wide (0.005, 0.15) band around 5%.
// - Verdict consistent with the binomial bounds; bounds bracket the
//   binomial mean of 25.
fn rolling_var_pipeline_backtests_cleanly() {
    // Arrange
    let n = 1100;
    let window_size = 600;
    let level = 0.05;
    let series = simulated_series(n, 71, &Innovation::normal());
    let residuals = series.clone();
    let returns = ReturnSeries::new(series.view().to_owned()).unwrap();
    let config = RollConfig::new(
        window_size,
        100,
        WindowMode::Moving,
        RefitPolicy::Strict,
        Innovation::normal(),
        GarchOptions::default(),
    )
    .unwrap();

    // Act
    let outcome = RollingForecaster::roll(&residuals, &returns, &config).unwrap();
    assert!(outcome.is_complete(), "no refit should fail on clean simulated data");
    let thresholds =
        garch_var_series(|_t| 0.0, &outcome.forecasts, level).expect("threshold mapping");
    let realized: Vec<f64> =
        outcome.forecasts.iter().map(|p| returns.view()[p.time_index]).collect();
    let threshold_values: Vec<f64> = thresholds.iter().map(|t| t.value).collect();
    let backtest =
        KupiecOutcome::backtest(&realized, &threshold_values, level, DEFAULT_CONFIDENCE).unwrap();

    // Assert: forecast alignment and threshold direction.
    assert_eq!(outcome.forecasts.len(), n - window_size);
    assert_eq!(outcome.refits, 5);
    for (k, threshold) in thresholds.iter().enumerate() {
        assert_eq!(threshold.time_index, window_size + k);
        assert!(threshold.value < 0.0, "5% threshold should sit below the zero mean");
    }

    // Assert: coverage near nominal and verdict/bounds consistency.
    let total = backtest.total();
    assert_eq!(total, (n - window_size) as u64);
    let rate = backtest.exceptions() as f64 / total as f64;
    assert!(rate > 0.005 && rate < 0.15, "exception rate {rate} implausible for a correct model");
    assert!(backtest.lower_bound() <= 25 && 25 <= backtest.upper_bound());
    let in_bounds = backtest.lower_bound() <= backtest.exceptions()
        && backtest.exceptions() <= backtest.upper_bound();
    match backtest.verdict() {
        Verdict::Accept => assert!(in_bounds),
        Verdict::Reject => assert!(!in_bounds),
    }

    // Exception records agree with the aggregate count.
    let records = exception_records(&realized, &threshold_values).unwrap();
    let record_count = records.iter().filter(|r| r.is_exception).count() as u64;
    assert_eq!(record_count, backtest.exceptions());
}

#[test]
// Purpose
// -------
// Delta-normal thresholds built from a fixed in-sample standard deviation
// are constant over time and comparable in magnitude to the GARCH
// thresholds' average for a stationary sample.
fn delta_normal_thresholds_are_constant_and_comparable() {
    // Arrange
    let n = 900;
    let window_size = 700;
    let level = 0.05;
    let series = simulated_series(n, 31, &Innovation::normal());
    let in_sample_sd = sample_std(series.view().slice_move(s![..window_size])).unwrap();

    // Act
    let threshold = delta_normal_var(0.0, in_sample_sd, level).unwrap();

    // Assert
    assert!(threshold < 0.0);
    let uncond_sd = (TRUE_OMEGA / (1.0 - TRUE_ALPHA - TRUE_BETA)).sqrt();
    let reference = -1.6448536 * uncond_sd;
    assert!(
        (threshold - reference).abs() / reference.abs() < 0.5,
        "delta-normal threshold {threshold} far from reference {reference}"
    );
}

#[test]
// Purpose
// -------
// Expanding-window rolls must satisfy the same count/ordering invariants
// as moving-window rolls.
fn expanding_window_roll_covers_the_out_of_sample_region() {
    // Arrange
    let n = 760;
    let window_size = 640;
    let series = simulated_series(n, 53, &Innovation::normal());
    let returns = ReturnSeries::new(series.view().to_owned()).unwrap();
    let config = RollConfig::new(
        window_size,
        60,
        WindowMode::Expanding,
        RefitPolicy::Lenient,
        Innovation::normal(),
        GarchOptions::default(),
    )
    .unwrap();

    // Act
    let outcome = RollingForecaster::roll(&series, &returns, &config).unwrap();

    // Assert
    assert!(outcome.is_complete());
    assert_eq!(outcome.forecasts.len(), n - window_size);
    assert_eq!(outcome.refits, 2);
    let mut last_index = window_size - 1;
    for point in &outcome.forecasts {
        assert_eq!(point.time_index, last_index + 1);
        last_index = point.time_index;
        assert!(point.sigma_forecast > 0.0);
    }
}

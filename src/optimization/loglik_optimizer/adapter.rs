//! Adapter that exposes a user `LogLikelihood` as an `argmin` problem.
//!
//! Maximizing a log-likelihood `ℓ(θ)` becomes minimizing the cost
//! `c(θ) = -ℓ(θ)`. A user-supplied analytic gradient (of `ℓ`) is negated to
//! match; without one, the gradient is finite-differenced from the **cost**
//! closure directly, so that branch needs no sign flip.
use std::cell::RefCell;

use crate::optimization::{
    errors::OptError,
    loglik_optimizer::{
        traits::LogLikelihood,
        types::{Cost, Grad, Theta},
        validation::validate_grad,
    },
};
use argmin::core::{CostFunction, Error, Gradient};
use finitediff::FiniteDiff;

/// Bridges a user `LogLikelihood` to `argmin`'s `CostFunction` and `Gradient`.
///
/// - `CostFunction::cost` returns `-ℓ(θ)` (negative log-likelihood).
/// - `Gradient::gradient` returns `-∇ℓ(θ)` when the model provides an
///   analytic gradient, and a finite-difference gradient of the cost
///   otherwise.
#[derive(Debug, Clone)]
pub struct ArgMinAdapter<'a, F: LogLikelihood> {
    pub f: &'a F,
    pub data: &'a F::Data,
}

impl<'a, F: LogLikelihood> ArgMinAdapter<'a, F> {
    /// Construct a new adapter over a user `LogLikelihood` and its data.
    pub fn new(f: &'a F, data: &'a F::Data) -> Self {
        Self { f, data }
    }
}

impl<'a, F: LogLikelihood> CostFunction for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Output = Cost;

    /// Evaluate the cost `c(θ) = -ℓ(θ)`.
    ///
    /// # Errors
    /// Propagates any `OptError` from the user’s `value`, and rejects
    /// non-finite objective values as `NonFiniteCost`.
    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        let output = self.f.value(theta, self.data)?;
        if !output.is_finite() {
            return Err((OptError::NonFiniteCost { value: output }).into());
        }
        Ok(-output)
    }
}

impl<'a, F: LogLikelihood> Gradient for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Gradient = Grad;

    /// Evaluate the gradient of the cost at `θ`.
    ///
    /// With an analytic model gradient: validate it (dimension, finiteness)
    /// and return its negation. Without one
    /// (`OptError::GradientNotImplemented`): finite-difference the cost,
    /// preferring central differences and falling back to forward
    /// differences when a cost evaluation failed mid-stencil or the central
    /// result fails validation.
    ///
    /// The FD closure must return `f64`, so errors raised inside it cannot
    /// propagate through `?`; the first one is parked in a `RefCell` slot
    /// and the closure yields `NaN`, turning back into a real error after
    /// the stencil completes.
    ///
    /// # Errors
    /// - Propagates model errors other than `GradientNotImplemented`.
    /// - Propagates any error captured from cost evaluations during FD.
    /// - Returns validation errors for wrong-dimension or non-finite
    ///   gradients.
    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, Error> {
        let dim = theta.len();
        match self.f.grad(theta, self.data) {
            Ok(g) => {
                validate_grad(&g, dim)?;
                Ok(-g)
            }
            Err(OptError::GradientNotImplemented) => {
                let parked_err: RefCell<Option<Error>> = RefCell::new(None);
                let cost_fn = |theta: &Theta| -> f64 {
                    match self.cost(theta) {
                        Ok(val) => val,
                        Err(e) => {
                            let mut slot = parked_err.borrow_mut();
                            if slot.is_none() {
                                *slot = Some(e);
                            }
                            f64::NAN
                        }
                    }
                };
                let central = theta.central_diff(&cost_fn);
                if parked_err.borrow().is_none() && validate_grad(&central, dim).is_ok() {
                    return Ok(central);
                }
                forward_diff_with_capture(theta, &cost_fn, &parked_err)
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Forward-difference gradient of `func` at `theta`, with error capture.
///
/// Clears the parked-error slot, runs `forward_diff`, surfaces any error
/// captured during evaluation, and validates the resulting gradient before
/// returning it.
fn forward_diff_with_capture<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, parked_err: &RefCell<Option<Error>>,
) -> Result<Grad, Error> {
    parked_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    if let Some(err) = parked_err.take() {
        return Err(err);
    }
    validate_grad(&fd_grad, theta.len())?;
    Ok(fd_grad)
}

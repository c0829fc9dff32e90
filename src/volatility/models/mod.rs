//! models — user-facing GARCH model APIs.
//!
//! Hosts the GARCH(1,1) model type ([`garch::GarchModel`]) that composes
//! the core building blocks (data, distributions, recursion, options) into
//! the fit/predict surface consumed by the risk layer.

pub mod garch;

pub use self::garch::GarchModel;

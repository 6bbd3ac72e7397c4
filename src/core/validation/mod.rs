//! Reload-and-compare validation of mutations

mod outcome;
mod validator;

pub use outcome::{Observation, Outcome, classify};
pub use validator::{Check, LineSnapshot, validate_checks};

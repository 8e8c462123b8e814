#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::cast_precision_loss, clippy::module_name_repetitions)]

//! Benchmark objective functions consumed by the step-size environment.
//!
//! The environment only depends on the [`ObjectiveSuite`] and [`Objective`]
//! traits. [`BbobSuite`] is the built-in implementation: the first twelve
//! noiseless BBOB functions with instance-seeded shifts and rotations.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

mod bbob;
mod transform;

pub use bbob::{BbobFunction, BbobProblem, BbobSuite};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SuiteError {
    #[error("unsupported problem type: {0}")]
    UnsupportedProblemType(String),
    #[error("unknown function index {index} (suite provides 1..={available})")]
    UnknownFunction { index: usize, available: usize },
    #[error("dimension mismatch: objective expects {expected}, got {found}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("dimension must be positive")]
    ZeroDimension,
}

/// Benchmark family identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProblemType {
    Bbob,
}

impl FromStr for ProblemType {
    type Err = SuiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bbob" => Ok(ProblemType::Bbob),
            _ => Err(SuiteError::UnsupportedProblemType(s.to_string())),
        }
    }
}

impl fmt::Display for ProblemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProblemType::Bbob => write!(f, "bbob"),
        }
    }
}

/// A scalar objective `f: R^dim -> R`, lower is better.
pub trait Objective: Send {
    /// Evaluates the objective at `x`.
    ///
    /// # Errors
    ///
    /// Fails when `x` does not have [`Objective::dimension`] components.
    fn evaluate(&self, x: &[f64]) -> Result<f64, SuiteError>;

    /// Length of the input vectors this objective accepts.
    fn dimension(&self) -> usize;

    /// Short human readable identifier, e.g. `bbob_f001_i01_d40`.
    fn name(&self) -> &str;
}

/// Source of indexable objective functions.
pub trait ObjectiveSuite: Send {
    /// Returns the objective at the 1-based `function_index`.
    ///
    /// # Errors
    ///
    /// Fails for unsupported families, zero dimension or an index the suite
    /// does not provide.
    fn get_problem(
        &self,
        problem_type: ProblemType,
        dimension: usize,
        instance: u32,
        function_index: usize,
    ) -> Result<Box<dyn Objective>, SuiteError>;
}

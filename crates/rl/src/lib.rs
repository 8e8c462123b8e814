#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::cast_precision_loss, clippy::module_name_repetitions)]

//! # Step-size control as a reinforcement learning task
//!
//! [`EsEnv`] wraps an isotropic evolution strategy ([`es::Es`]) and turns each
//! generation into one agent-environment transition. The agent emits a scalar
//! in `[-1, 1]` that rescales the step size, observes
//! `(normalized log sigma, success ratio)`, and is rewarded with the relative
//! improvement of the best fitness found so far.
//!
//! Episodes run until the evaluation budget is spent. In
//! [`Mode::Training`] every finished episode is logged and the environment
//! moves on to the next of twelve benchmark problems; [`Mode::Testing`] keeps
//! the problem fixed and grants a slightly longer budget.

use thiserror::Error;

pub mod config;
pub mod env;
pub mod episode;
pub mod es_env;
pub mod mode;
pub mod reward;
pub mod space;

pub use config::EnvConfig;
pub use env::{Env, Info, ResetOptions, Transition};
pub use episode::{EpisodeLog, EpisodeRecord};
pub use es_env::{next_problem_index, EnvState, EsEnv, PROBLEM_ROTATION};
pub use mode::Mode;
pub use reward::{improvement_ratio, normalized_log_sigma, scaling_factor, success_ratio};
pub use space::BoxSpace;

#[derive(Error, Debug)]
pub enum EnvError {
    #[error(transparent)]
    Es(#[from] es::EsError),
    #[error(transparent)]
    Suite(#[from] suite::SuiteError),
    #[error("objective evaluation failed: {0}")]
    Objective(suite::SuiteError),
    #[error("invalid action: {0}")]
    InvalidAction(String),
    #[error("invalid config: {0}")]
    Config(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

use std::collections::HashMap;

use crate::space::BoxSpace;
use crate::EnvError;

/// Extra diagnostics attached to a transition. Empty for [`crate::EsEnv`].
pub type Info = HashMap<String, f64>;

/// Result of one [`Env::step`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub observation: Vec<f64>,
    pub reward: f64,
    pub terminated: bool,
    pub truncated: bool,
    pub info: Info,
}

impl Transition {
    /// Whether the episode ended for either reason.
    #[must_use]
    pub fn done(&self) -> bool {
        self.terminated || self.truncated
    }
}

/// Optional knobs for [`Env::reset`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResetOptions {
    /// Jump the problem rotation to this 1-based index before the episode.
    pub problem_index: Option<usize>,
}

/// Reinforcement learning environment trait.
///
/// Modeled on the Gymnasium interface: [`step`] advances the environment by
/// one action and returns the new observation, the reward, and whether the
/// episode terminated or was truncated.
///
/// [`step`]: Env::step
pub trait Env {
    /// Reset the environment to the start of a new episode and return the
    /// initial observation. A `seed` reseeds the environment's random stream.
    ///
    /// # Errors
    ///
    /// Fails when `options` are invalid for this environment.
    fn reset(&mut self, seed: Option<u64>, options: Option<ResetOptions>) -> Result<Vec<f64>, EnvError>;

    /// Advance the environment by one action.
    ///
    /// # Errors
    ///
    /// Fails on malformed actions and on fatal errors of the underlying
    /// simulation.
    fn step(&mut self, action: &[f64]) -> Result<Transition, EnvError>;

    fn observation_space(&self) -> BoxSpace;

    fn action_space(&self) -> BoxSpace;

    /// Size of the observation vector.
    fn obs_size(&self) -> usize {
        self.observation_space().shape()
    }

    /// Size of the action vector.
    fn action_size(&self) -> usize {
        self.action_space().shape()
    }
}

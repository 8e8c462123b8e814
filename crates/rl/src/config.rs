use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::es_env::PROBLEM_ROTATION;
use crate::mode::Mode;
use crate::EnvError;

pub const DEFAULT_DIM: usize = 40;
pub const DEFAULT_FES_MAX: usize = 5_000;
pub const DEFAULT_SIGMA_0: f64 = 0.5;
pub const DEFAULT_POPULATION_SIZE: usize = 10;

/// Construction parameters of an [`crate::EsEnv`].
///
/// Deserializes from JSON; every missing field falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    /// Benchmark family, e.g. `"bbob"`.
    pub problem_type: String,
    pub instance: u32,
    pub dim: usize,
    /// Evaluation budget of one training episode.
    pub fes_max: usize,
    pub sigma_0: f64,
    /// Starting position in the 1-based problem rotation.
    pub problem_index: usize,
    pub seed: Option<u64>,
    pub population_size: usize,
    pub mode: Mode,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            problem_type: "bbob".to_string(),
            instance: 1,
            dim: DEFAULT_DIM,
            fes_max: DEFAULT_FES_MAX,
            sigma_0: DEFAULT_SIGMA_0,
            problem_index: 1,
            seed: None,
            population_size: DEFAULT_POPULATION_SIZE,
            mode: Mode::Training,
        }
    }
}

impl EnvConfig {
    /// Parses a JSON document.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON or unknown field types.
    pub fn from_json(json: &str) -> Result<Self, EnvError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON config file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EnvError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Checks the numeric fields.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::Config`] naming the first offending field.
    pub fn validate(&self) -> Result<(), EnvError> {
        if self.dim == 0 {
            return Err(EnvError::Config("dim must be positive".into()));
        }
        if self.population_size == 0 {
            return Err(EnvError::Config("population_size must be positive".into()));
        }
        if self.fes_max == 0 {
            return Err(EnvError::Config("fes_max must be positive".into()));
        }
        if !self.sigma_0.is_finite() || self.sigma_0 <= 0.0 {
            return Err(EnvError::Config(format!(
                "sigma_0 must be finite and positive, got {}",
                self.sigma_0
            )));
        }
        if !(1..=PROBLEM_ROTATION).contains(&self.problem_index) {
            return Err(EnvError::Config(format!(
                "problem_index must be in 1..={PROBLEM_ROTATION}, got {}",
                self.problem_index
            )));
        }
        Ok(())
    }
}

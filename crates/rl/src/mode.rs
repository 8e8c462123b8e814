use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::EnvError;

/// Termination policy of an [`crate::EsEnv`].
///
/// `Training` ends an episode once `fes_max` evaluations are spent and
/// rotates to the next problem. `Testing` allows two extra generations and
/// leaves the problem and the episode log alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Training,
    Testing,
}

impl Mode {
    /// Evaluation budget of one episode.
    #[must_use]
    pub fn eval_budget(self, fes_max: usize, population_size: usize) -> usize {
        match self {
            Mode::Training => fes_max,
            Mode::Testing => fes_max + 2 * population_size,
        }
    }

    #[must_use]
    pub fn is_exhausted(self, countevals: usize, fes_max: usize, population_size: usize) -> bool {
        countevals >= self.eval_budget(fes_max, population_size)
    }

    /// Whether a natural termination records the episode and advances the
    /// problem rotation.
    #[must_use]
    pub fn rotates_problems(self) -> bool {
        matches!(self, Mode::Training)
    }
}

impl FromStr for Mode {
    type Err = EnvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "training" | "train" => Ok(Mode::Training),
            "testing" | "test" => Ok(Mode::Testing),
            other => Err(EnvError::Config(format!("unknown mode {other:?}"))),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Training => write!(f, "training"),
            Mode::Testing => write!(f, "testing"),
        }
    }
}

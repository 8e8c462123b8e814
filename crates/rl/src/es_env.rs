//! The step-size adaptation environment.

use es::Es;
use rand::rngs::StdRng;
use rand::SeedableRng;
use suite::{BbobSuite, Objective, ObjectiveSuite, ProblemType};

use crate::config::EnvConfig;
use crate::env::{Env, Info, ResetOptions, Transition};
use crate::episode::{EpisodeLog, EpisodeRecord};
use crate::mode::Mode;
use crate::reward::{improvement_ratio, normalized_log_sigma, scaling_factor, success_ratio};
use crate::space::BoxSpace;
use crate::EnvError;

/// Number of problems the training rotation cycles through.
pub const PROBLEM_ROTATION: usize = 12;
/// Width of the observation vector.
pub const OBS_SIZE: usize = 2;
/// Width of the action vector.
pub const ACTION_SIZE: usize = 1;

/// Next 1-based index of the problem rotation, wrapping 12 back to 1.
#[must_use]
pub fn next_problem_index(index: usize) -> usize {
    match (index + 1) % PROBLEM_ROTATION {
        0 => PROBLEM_ROTATION,
        next => next,
    }
}

/// Lifecycle of an [`EsEnv`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvState {
    /// Constructed, `reset` never called.
    Uninitialized,
    /// Mid-episode, ready for the next `step`.
    Ready,
    /// The last `step` ended the episode.
    Terminated,
}

/// Evolution strategy wrapped as a reinforcement learning environment.
///
/// One `step` runs one ES generation: the action rescales sigma, the
/// population is evaluated on the active objective, and the transition
/// reports `(normalized log sigma, success ratio)` together with the
/// improvement ratio of the best fitness as reward.
///
/// Each instance owns its random stream, so independent instances are
/// reproducible in isolation and can be moved to separate threads.
pub struct EsEnv {
    config: EnvConfig,
    problem_type: ProblemType,
    suite: Box<dyn ObjectiveSuite>,
    problem: Box<dyn Objective>,
    es: Es,
    rng: StdRng,
    mode: Mode,
    state: EnvState,
    problem_index: usize,
    countevals: usize,
    current_best_fitness: Option<f64>,
    previous_best_fitness: Option<f64>,
    cumulative_reward: f64,
    episode_index: u64,
    success_ratios: Vec<f64>,
    episode_log: EpisodeLog,
}

impl EsEnv {
    /// Builds an environment on the built-in BBOB suite.
    ///
    /// # Errors
    ///
    /// Fails on invalid config values, unsupported problem families or a
    /// problem the suite cannot provide.
    pub fn new(config: EnvConfig) -> Result<Self, EnvError> {
        Self::with_suite(config, Box::new(BbobSuite::new()))
    }

    /// Builds an environment drawing its objectives from `suite`.
    ///
    /// # Errors
    ///
    /// Same as [`EsEnv::new`].
    pub fn with_suite(config: EnvConfig, suite: Box<dyn ObjectiveSuite>) -> Result<Self, EnvError> {
        config.validate()?;
        let problem_type: ProblemType = config.problem_type.parse()?;
        let problem = suite.get_problem(problem_type, config.dim, config.instance, config.problem_index)?;
        if problem.dimension() != config.dim {
            return Err(EnvError::Config(format!(
                "objective {} has dimension {}, expected {}",
                problem.name(),
                problem.dimension(),
                config.dim
            )));
        }
        let es = Es::new(config.dim, config.sigma_0, config.population_size)?;
        let rng = config.seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        tracing::debug!(
            problem = problem.name(),
            dim = config.dim,
            population_size = config.population_size,
            fes_max = config.fes_max,
            "environment created"
        );
        Ok(Self {
            problem_type,
            suite,
            problem,
            es,
            rng,
            mode: config.mode,
            state: EnvState::Uninitialized,
            problem_index: config.problem_index,
            countevals: 0,
            current_best_fitness: None,
            previous_best_fitness: None,
            cumulative_reward: 0.0,
            episode_index: 0,
            success_ratios: Vec::new(),
            episode_log: EpisodeLog::new(),
            config,
        })
    }

    /// Builds `n` independent environments on the BBOB suite. Seeded configs
    /// give instance `i` the seed `seed + i`.
    ///
    /// # Errors
    ///
    /// Same as [`EsEnv::new`].
    pub fn vectorized(config: &EnvConfig, n: usize) -> Result<Vec<Self>, EnvError> {
        (0..n as u64)
            .map(|i| {
                let mut cfg = config.clone();
                cfg.seed = config.seed.map(|s| s.wrapping_add(i));
                Self::new(cfg)
            })
            .collect()
    }

    /// Switches the termination policy. Counters are left untouched.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Evaluates `x` on the active objective.
    ///
    /// # Errors
    ///
    /// Propagates the objective's error as [`EnvError::Objective`].
    pub fn evaluate_fitness(&self, x: &[f64]) -> Result<f64, EnvError> {
        self.problem.evaluate(x).map_err(EnvError::Objective)
    }

    fn load_problem(&mut self, index: usize) -> Result<(), EnvError> {
        self.problem = self
            .suite
            .get_problem(self.problem_type, self.config.dim, self.config.instance, index)?;
        self.problem_index = index;
        Ok(())
    }

    /// Moves on to the next problem and logs the finished episode. Nothing
    /// is recorded when the suite cannot provide the next problem.
    fn finish_episode(&mut self) -> Result<(), EnvError> {
        let finished = self.problem_index;
        self.load_problem(next_problem_index(finished))?;
        self.episode_index += 1;
        let best_fitness = self.current_best_fitness.filter(|f| f.is_finite());
        self.episode_log.push(EpisodeRecord {
            episode: self.episode_index,
            problem_index: finished,
            best_fitness,
            cumulative_reward: self.cumulative_reward,
        });
        tracing::info!(
            episode = self.episode_index,
            problem = finished,
            best_fitness = ?best_fitness,
            cumulative_reward = self.cumulative_reward,
            "episode finished"
        );
        tracing::debug!(problem = self.problem.name(), "rotated to next problem");
        Ok(())
    }

    #[must_use]
    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> EnvState {
        self.state
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn es(&self) -> &Es {
        &self.es
    }

    #[must_use]
    pub fn sigma(&self) -> f64 {
        self.es.sigma()
    }

    #[must_use]
    pub fn problem(&self) -> &dyn Objective {
        self.problem.as_ref()
    }

    #[must_use]
    pub fn problem_index(&self) -> usize {
        self.problem_index
    }

    #[must_use]
    pub fn countevals(&self) -> usize {
        self.countevals
    }

    #[must_use]
    pub fn current_best_fitness(&self) -> Option<f64> {
        self.current_best_fitness
    }

    #[must_use]
    pub fn previous_best_fitness(&self) -> Option<f64> {
        self.previous_best_fitness
    }

    #[must_use]
    pub fn cumulative_reward(&self) -> f64 {
        self.cumulative_reward
    }

    /// Number of naturally terminated training episodes so far.
    #[must_use]
    pub fn episode_index(&self) -> u64 {
        self.episode_index
    }

    /// Success ratio of every generation of the current episode.
    #[must_use]
    pub fn success_ratios(&self) -> &[f64] {
        &self.success_ratios
    }

    #[must_use]
    pub fn episode_log(&self) -> &EpisodeLog {
        &self.episode_log
    }
}

impl Env for EsEnv {
    fn reset(&mut self, seed: Option<u64>, options: Option<ResetOptions>) -> Result<Vec<f64>, EnvError> {
        if let Some(index) = options.and_then(|o| o.problem_index) {
            if !(1..=PROBLEM_ROTATION).contains(&index) {
                return Err(EnvError::Config(format!(
                    "problem_index must be in 1..={PROBLEM_ROTATION}, got {index}"
                )));
            }
            self.load_problem(index)?;
        }
        if let Some(seed) = seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
        self.es = Es::new(self.config.dim, self.config.sigma_0, self.config.population_size)?;
        self.current_best_fitness = None;
        self.previous_best_fitness = None;
        self.countevals = 0;
        self.cumulative_reward = 0.0;
        self.success_ratios.clear();
        self.state = EnvState::Ready;
        Ok(vec![0.0; OBS_SIZE])
    }

    fn step(&mut self, action: &[f64]) -> Result<Transition, EnvError> {
        let action = *action
            .first()
            .ok_or_else(|| EnvError::InvalidAction("empty action".into()))?;
        if !action.is_finite() {
            return Err(EnvError::InvalidAction(format!("non-finite action {action}")));
        }
        if self.state == EnvState::Terminated {
            tracing::warn!("step called on a terminated episode without reset");
        }

        let population = self.es.ask(&mut self.rng);
        self.es.scale_sigma(scaling_factor(action));

        let fitness = population
            .iter()
            .map(|x| self.problem.evaluate(x))
            .collect::<Result<Vec<f64>, _>>()
            .map_err(EnvError::Objective)?;
        self.es.tell(&population, &fitness)?;

        let generation_best = fitness.iter().copied().fold(f64::INFINITY, f64::min);
        self.current_best_fitness = Some(match self.previous_best_fitness {
            Some(previous) => previous.min(generation_best),
            None => generation_best,
        });

        let success = success_ratio(&fitness, self.previous_best_fitness);
        let reward = improvement_ratio(self.previous_best_fitness, self.current_best_fitness);
        self.cumulative_reward += reward;
        self.success_ratios.push(success);
        let observation = vec![normalized_log_sigma(self.es.sigma()), success];

        let population_size = self.config.population_size;
        self.countevals += population_size;
        tracing::debug!(
            countevals = self.countevals,
            sigma = self.es.sigma(),
            best_fitness = ?self.current_best_fitness,
            reward,
            "generation done"
        );

        let terminated = self
            .mode
            .is_exhausted(self.countevals, self.config.fes_max, population_size);
        if terminated && self.mode.rotates_problems() {
            self.finish_episode()?;
        }
        self.previous_best_fitness = self.current_best_fitness;
        self.state = if terminated {
            EnvState::Terminated
        } else {
            EnvState::Ready
        };

        Ok(Transition {
            observation,
            reward,
            terminated,
            truncated: false,
            info: Info::new(),
        })
    }

    fn observation_space(&self) -> BoxSpace {
        BoxSpace::uniform(OBS_SIZE, -1.0, 1.0)
    }

    fn action_space(&self) -> BoxSpace {
        BoxSpace::uniform(ACTION_SIZE, -1.0, 1.0)
    }
}

//! # Rollout driver
//!
//! Runs a fixed number of episodes of [`rl::EsEnv`] under a baseline
//! [`Policy`], logging a summary per episode and optionally exporting the
//! environment's episode log as JSON.

use anyhow::{Context, Result};
use rl::{Env, EnvConfig, EsEnv};
use std::path::PathBuf;

use crate::policy::{Policy, PolicyKind};

/// Settings of one `esgym` run beyond the environment config.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub episodes: usize,
    pub policy: PolicyKind,
    /// Action for [`PolicyKind::Constant`].
    pub action: f64,
    pub episode_log: Option<PathBuf>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            episodes: 12,
            policy: PolicyKind::Constant,
            action: 0.0,
            episode_log: None,
        }
    }
}

/// What happened in one rolled-out episode.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeSummary {
    pub problem_index: usize,
    pub problem: String,
    pub generations: usize,
    pub countevals: usize,
    pub best_fitness: Option<f64>,
    pub cumulative_reward: f64,
    pub final_sigma: f64,
}

/// Rolls out `options.episodes` episodes and returns their summaries.
///
/// # Errors
///
/// Returns any error produced by environment construction, stepping, or
/// writing the episode log.
pub fn run(config: EnvConfig, options: &RunOptions) -> Result<Vec<EpisodeSummary>> {
    let mut policy = Policy::new(options.policy, options.action, config.seed);
    let mut env = EsEnv::new(config).context("failed to build environment")?;
    tracing::info!(
        problem = env.problem().name(),
        mode = %env.mode(),
        episodes = options.episodes,
        policy = ?options.policy,
        "starting rollout"
    );

    let mut summaries = Vec::with_capacity(options.episodes);
    for episode in 0..options.episodes {
        let mut obs = env.reset(None, None)?;
        let problem_index = env.problem_index();
        let problem = env.problem().name().to_string();
        let mut generations = 0;
        let (countevals, best_fitness, cumulative_reward, final_sigma) = loop {
            let action = policy.act(&obs);
            let transition = env
                .step(&[action])
                .with_context(|| format!("episode {episode} generation {generations} on {problem}"))?;
            generations += 1;
            let done = transition.done();
            obs = transition.observation;
            if done {
                break (
                    env.countevals(),
                    env.current_best_fitness(),
                    env.cumulative_reward(),
                    env.sigma(),
                );
            }
        };
        tracing::info!(
            episode,
            problem = %problem,
            generations,
            best_fitness = ?best_fitness,
            cumulative_reward,
            "episode complete"
        );
        summaries.push(EpisodeSummary {
            problem_index,
            problem,
            generations,
            countevals,
            best_fitness,
            cumulative_reward,
            final_sigma,
        });
    }

    if let Some(path) = &options.episode_log {
        env.episode_log()
            .write_json(path)
            .with_context(|| format!("failed to write episode log to {}", path.display()))?;
        tracing::info!(path = %path.display(), records = env.episode_log().len(), "episode log written");
    }
    Ok(summaries)
}

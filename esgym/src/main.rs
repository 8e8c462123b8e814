//! # esgym
//!
//! Entry point for the esgym binary.
//!
//! Builds an [`rl::EsEnv`] from a JSON config file and command line
//! overrides, then rolls out a baseline step-size policy for a number of
//! episodes. Set `RUST_LOG=debug` to see every generation.

use anyhow::Result;
use clap::Parser;
use esgym::app::{self, RunOptions};
use esgym::policy::PolicyKind;
use rl::{EnvConfig, Mode};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "esgym", about = "Roll out step-size policies on the ES environment")]
struct Cli {
    /// JSON environment config; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    problem_type: Option<String>,
    #[arg(long)]
    instance: Option<u32>,
    #[arg(long)]
    dim: Option<usize>,
    #[arg(long)]
    fes_max: Option<usize>,
    #[arg(long)]
    population_size: Option<usize>,
    #[arg(long)]
    sigma0: Option<f64>,
    #[arg(long)]
    problem_index: Option<usize>,
    #[arg(long)]
    seed: Option<u64>,
    /// `training` or `testing`.
    #[arg(long)]
    mode: Option<Mode>,
    #[arg(long, default_value_t = 12)]
    episodes: usize,
    #[arg(long, value_enum, default_value_t = PolicyKind::Constant)]
    policy: PolicyKind,
    /// Action emitted by the constant policy.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    action: f64,
    /// Where to write the episode log as JSON.
    #[arg(long)]
    episode_log: Option<PathBuf>,
}

impl Cli {
    fn env_config(&self) -> Result<EnvConfig> {
        let mut config = match &self.config {
            Some(path) => EnvConfig::load(path)?,
            None => EnvConfig::default(),
        };
        if let Some(v) = &self.problem_type {
            config.problem_type.clone_from(v);
        }
        if let Some(v) = self.instance {
            config.instance = v;
        }
        if let Some(v) = self.dim {
            config.dim = v;
        }
        if let Some(v) = self.fes_max {
            config.fes_max = v;
        }
        if let Some(v) = self.population_size {
            config.population_size = v;
        }
        if let Some(v) = self.sigma0 {
            config.sigma_0 = v;
        }
        if let Some(v) = self.problem_index {
            config.problem_index = v;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(v) = self.mode {
            config.mode = v;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = cli.env_config()?;
    let options = RunOptions {
        episodes: cli.episodes,
        policy: cli.policy,
        action: cli.action,
        episode_log: cli.episode_log.clone(),
    };

    let summaries = app::run(config, &options)?;
    let total: f64 = summaries.iter().map(|s| s.cumulative_reward).sum();
    tracing::info!(
        episodes = summaries.len(),
        mean_reward = total / summaries.len().max(1) as f64,
        "rollout finished"
    );
    Ok(())
}

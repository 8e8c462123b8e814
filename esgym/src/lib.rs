//! # esgym: step-size control as a reinforcement learning environment
//!
//! ## Overview
//!
//! esgym exposes the mutation strength (sigma) of an evolution strategy as
//! the action of a Gymnasium-style environment. An agent observes the
//! optimizer once per generation, rescales sigma, and is rewarded for
//! relative progress of the best fitness found so far. Episodes cycle through
//! a rotation of twelve benchmark problems so that a learned controller has
//! to generalize across landscapes.
//!
//! ## Project Architecture
//!
//! -   **`esgym`:** The crate you are currently viewing. It re-exports the
//!     other crates and ships the `esgym` binary, which rolls out baseline
//!     policies and exports the episode log.
//! -   **[`es`]:** An isotropic (μ,λ) evolution strategy with `ask`/`tell`.
//!     Its step size is controlled from outside and always clamped to
//!     `[1e-20, 100]`.
//! -   **[`suite`]:** The objective-function interface plus a built-in suite
//!     of the first twelve noiseless BBOB functions.
//! -   **[`rl`]:** The [`rl::Env`] trait and [`rl::EsEnv`], which turns one
//!     ES generation into one transition and manages episodes, termination
//!     modes and the problem rotation.
//!
//! ## Getting Started
//!
//! ```no_run
//! use esgym::rl::{Env, EnvConfig, EsEnv};
//!
//! let mut env = EsEnv::new(EnvConfig { dim: 10, seed: Some(0), ..EnvConfig::default() })?;
//! let mut obs = env.reset(None, None)?;
//! loop {
//!     let action = if obs[1] > 0.2 { 0.5 } else { -0.5 };
//!     let t = env.step(&[action])?;
//!     obs = t.observation;
//!     if t.terminated {
//!         break;
//!     }
//! }
//! # Ok::<(), esgym::rl::EnvError>(())
//! ```

pub mod app;
pub mod policy;

pub use es;
pub use rl;
pub use suite;

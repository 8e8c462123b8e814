#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]

//! Isotropic (μ,λ) evolution strategy with an externally controlled step size.
//!
//! [`Es`] keeps a Gaussian search distribution `mean + sigma * N(0, I)`.
//! [`Es::ask`] samples a population from it and [`Es::tell`] moves the mean
//! towards the best-ranked candidates. The step size is never adapted here:
//! callers drive it through [`Es::set_sigma`] / [`Es::scale_sigma`], and every
//! write goes through [`clamp_sigma`].

use rand::Rng;
use rand_distr::StandardNormal;
use std::cmp::Ordering;
use thiserror::Error;

/// Lower bound for the global step size.
pub const SIGMA_MIN: f64 = 1e-20;
/// Upper bound for the global step size.
pub const SIGMA_MAX: f64 = 100.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EsError {
    #[error("invalid dimension for {context}: expected {expected}, found {found}")]
    InvalidDimension {
        context: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("population size must be positive, got {0}")]
    InvalidPopulationSize(usize),
    #[error("initial step size must be finite and positive, got {0}")]
    InvalidSigma(f64),
}

/// A generation worth of candidate vectors.
pub type Population = Vec<Vec<f64>>;

/// Clamps a step size into `[SIGMA_MIN, SIGMA_MAX]`.
#[must_use]
pub fn clamp_sigma(sigma: f64) -> f64 {
    SIGMA_MIN.max(SIGMA_MAX.min(sigma))
}

/// Ascending fitness order with every NaN after all numbers, whatever its sign.
fn fitness_order(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        _ => a.total_cmp(&b),
    }
}

/// Log-proportional recombination weights for the best `mu` candidates.
fn recombination_weights(mu: usize) -> Vec<f64> {
    let log_half = (mu as f64 + 0.5).ln();
    let raw: Vec<f64> = (1..=mu).map(|i| log_half - (i as f64).ln()).collect();
    let sum: f64 = raw.iter().sum();
    raw.iter().map(|w| w / sum).collect()
}

/// Search state of the evolution strategy.
#[derive(Clone, Debug)]
pub struct Es {
    mean: Vec<f64>,
    sigma: f64,
    population_size: usize,
    weights: Vec<f64>,
    generation: u64,
}

impl Es {
    /// Creates a strategy centred on the origin of `dim`-dimensional space.
    ///
    /// # Errors
    ///
    /// Fails when `dim` or `population_size` is zero, or when `sigma_0` is
    /// not a finite positive number.
    pub fn new(dim: usize, sigma_0: f64, population_size: usize) -> Result<Self, EsError> {
        if dim == 0 {
            return Err(EsError::InvalidDimension {
                context: "search space",
                expected: 1,
                found: 0,
            });
        }
        Self::with_mean(vec![0.0; dim], sigma_0, population_size)
    }

    /// Creates a strategy centred on `mean`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Es::new`], with the dimension taken from `mean`.
    pub fn with_mean(mean: Vec<f64>, sigma_0: f64, population_size: usize) -> Result<Self, EsError> {
        if mean.is_empty() {
            return Err(EsError::InvalidDimension {
                context: "search space",
                expected: 1,
                found: 0,
            });
        }
        if population_size == 0 {
            return Err(EsError::InvalidPopulationSize(population_size));
        }
        if !sigma_0.is_finite() || sigma_0 <= 0.0 {
            return Err(EsError::InvalidSigma(sigma_0));
        }
        let mu = (population_size / 2).max(1);
        Ok(Self {
            mean,
            sigma: clamp_sigma(sigma_0),
            population_size,
            weights: recombination_weights(mu),
            generation: 0,
        })
    }

    #[must_use]
    pub fn dim(&self) -> usize {
        self.mean.len()
    }

    #[must_use]
    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    #[must_use]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    #[must_use]
    pub fn population_size(&self) -> usize {
        self.population_size
    }

    /// Number of completed `tell` calls.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Sets the step size, clamped into `[SIGMA_MIN, SIGMA_MAX]`.
    pub fn set_sigma(&mut self, sigma: f64) {
        self.sigma = clamp_sigma(sigma);
    }

    /// Multiplies the step size by `factor` and clamps the result.
    pub fn scale_sigma(&mut self, factor: f64) {
        self.set_sigma(self.sigma * factor);
    }

    /// Lazily samples `population_size` candidates from the current
    /// distribution. Every item consumes `dim` normals from `rng`.
    pub fn samples<'a, R: Rng>(&'a self, rng: &'a mut R) -> impl Iterator<Item = Vec<f64>> + 'a {
        (0..self.population_size).map(move |_| {
            self.mean
                .iter()
                .map(|m| {
                    let z: f64 = rng.sample(StandardNormal);
                    m + self.sigma * z
                })
                .collect()
        })
    }

    /// Samples a full population with the step size in effect right now.
    pub fn ask<R: Rng>(&self, rng: &mut R) -> Population {
        self.samples(rng).collect()
    }

    /// Recombines the best half of `population` (lower fitness is better)
    /// into the new mean. The step size is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`EsError::InvalidDimension`] when the population, the fitness
    /// slice or any candidate has the wrong length.
    pub fn tell(&mut self, population: &[Vec<f64>], fitness: &[f64]) -> Result<(), EsError> {
        if population.len() != self.population_size {
            return Err(EsError::InvalidDimension {
                context: "population",
                expected: self.population_size,
                found: population.len(),
            });
        }
        if fitness.len() != population.len() {
            return Err(EsError::InvalidDimension {
                context: "fitness",
                expected: population.len(),
                found: fitness.len(),
            });
        }
        if let Some(bad) = population.iter().find(|x| x.len() != self.dim()) {
            return Err(EsError::InvalidDimension {
                context: "candidate",
                expected: self.dim(),
                found: bad.len(),
            });
        }

        let mut order: Vec<usize> = (0..population.len()).collect();
        order.sort_by(|&a, &b| fitness_order(fitness[a], fitness[b]));

        let mut mean = vec![0.0; self.dim()];
        for (w, &idx) in self.weights.iter().zip(&order) {
            for (m, x) in mean.iter_mut().zip(&population[idx]) {
                *m += w * x;
            }
        }
        self.mean = mean;
        self.generation += 1;
        tracing::trace!(generation = self.generation, sigma = self.sigma, "es mean updated");
        Ok(())
    }
}

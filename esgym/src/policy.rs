//! Baseline controllers used to exercise the environment without an agent.

use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyKind {
    /// Always emit the same action.
    Constant,
    /// Uniform random action in `[-1, 1]`.
    Random,
    /// One-fifth success rule: grow sigma when more than 20% of offspring improve.
    OneFifth,
}

pub enum Policy {
    Constant(f64),
    Random(fastrand::Rng),
    OneFifth,
}

impl Policy {
    /// `action` is used by [`PolicyKind::Constant`], `seed` by
    /// [`PolicyKind::Random`].
    #[must_use]
    pub fn new(kind: PolicyKind, action: f64, seed: Option<u64>) -> Self {
        match kind {
            PolicyKind::Constant => Policy::Constant(action.clamp(-1.0, 1.0)),
            PolicyKind::Random => Policy::Random(seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed)),
            PolicyKind::OneFifth => Policy::OneFifth,
        }
    }

    /// Picks an action for observation `(normalized log sigma, success ratio)`.
    pub fn act(&mut self, obs: &[f64]) -> f64 {
        match self {
            Policy::Constant(a) => *a,
            Policy::Random(rng) => rng.f64() * 2.0 - 1.0,
            Policy::OneFifth => {
                let success = obs.get(1).copied().unwrap_or(0.2);
                // actions 0, -0.6 and -1/3 scale sigma by 1.25, 0.8 and 1.0
                if success > 0.2 {
                    0.0
                } else if success < 0.2 {
                    -0.6
                } else {
                    -1.0 / 3.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_is_clamped_into_action_space() {
        let mut p = Policy::new(PolicyKind::Constant, 3.0, None);
        assert_eq!(p.act(&[0.0, 0.0]), 1.0);
    }

    #[test]
    fn random_is_seeded_and_bounded() {
        let mut a = Policy::new(PolicyKind::Random, 0.0, Some(4));
        let mut b = Policy::new(PolicyKind::Random, 0.0, Some(4));
        for _ in 0..100 {
            let x = a.act(&[0.0, 0.0]);
            assert_eq!(x, b.act(&[0.0, 0.0]));
            assert!((-1.0..=1.0).contains(&x));
        }
    }

    #[test]
    fn one_fifth_shrinks_on_failure() {
        let mut p = Policy::new(PolicyKind::OneFifth, 0.0, None);
        assert!(p.act(&[0.5, 0.0]) < p.act(&[0.5, 0.5]));
    }
}

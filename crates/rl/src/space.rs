use rand::Rng;

/// Axis-aligned box `[low_i, high_i]` used for observation and action spaces.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSpace {
    pub low: Vec<f64>,
    pub high: Vec<f64>,
}

impl BoxSpace {
    /// Box with the same bounds on every one of `dim` axes.
    #[must_use]
    pub fn uniform(dim: usize, low: f64, high: f64) -> Self {
        Self {
            low: vec![low; dim],
            high: vec![high; dim],
        }
    }

    #[must_use]
    pub fn shape(&self) -> usize {
        self.low.len()
    }

    #[must_use]
    pub fn contains(&self, x: &[f64]) -> bool {
        x.len() == self.shape()
            && x
                .iter()
                .zip(self.low.iter().zip(&self.high))
                .all(|(v, (lo, hi))| (lo..=hi).contains(&v))
    }

    /// Uniform sample from the box.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Vec<f64> {
        self.low
            .iter()
            .zip(&self.high)
            .map(|(&lo, &hi)| rng.gen_range(lo..=hi))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn contains_checks_shape_and_bounds() {
        let space = BoxSpace::uniform(2, -1.0, 1.0);
        assert!(space.contains(&[0.0, 1.0]));
        assert!(!space.contains(&[0.0, 1.5]));
        assert!(!space.contains(&[0.0]));
        assert!(!space.contains(&[f64::NAN, 0.0]));
    }

    #[test]
    fn samples_lie_inside() {
        let space = BoxSpace::uniform(3, -1.0, 1.0);
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..100 {
            assert!(space.contains(&space.sample(&mut rng)));
        }
    }
}

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use std::f64::consts::PI;

use crate::transform::{f_pen, lambda, mat_vec, ratio, rotation, sub, t_asy, t_osz, t_osz_vec, Matrix};
use crate::{Objective, ObjectiveSuite, ProblemType, SuiteError};

/// The noiseless BBOB functions this suite provides, in BBOB order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BbobFunction {
    Sphere,
    EllipsoidSeparable,
    RastriginSeparable,
    BucheRastrigin,
    LinearSlope,
    AttractiveSector,
    StepEllipsoid,
    Rosenbrock,
    RosenbrockRotated,
    Ellipsoid,
    Discus,
    BentCigar,
}

impl BbobFunction {
    pub const COUNT: usize = 12;

    const ALL: [BbobFunction; Self::COUNT] = [
        BbobFunction::Sphere,
        BbobFunction::EllipsoidSeparable,
        BbobFunction::RastriginSeparable,
        BbobFunction::BucheRastrigin,
        BbobFunction::LinearSlope,
        BbobFunction::AttractiveSector,
        BbobFunction::StepEllipsoid,
        BbobFunction::Rosenbrock,
        BbobFunction::RosenbrockRotated,
        BbobFunction::Ellipsoid,
        BbobFunction::Discus,
        BbobFunction::BentCigar,
    ];

    /// Looks up a function by its 1-based BBOB index.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        index.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    /// 1-based BBOB index.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize + 1
    }
}

/// One instantiated BBOB problem.
///
/// Shift, optimal value and rotations are drawn from a generator seeded by
/// `(function, instance, dimension)`, so the same triple always yields the
/// same landscape.
#[derive(Debug, Clone)]
pub struct BbobProblem {
    function: BbobFunction,
    dim: usize,
    x_opt: Vec<f64>,
    f_opt: f64,
    r: Matrix,
    q: Matrix,
    name: String,
}

impl BbobProblem {
    /// # Errors
    ///
    /// Fails with [`SuiteError::ZeroDimension`] when `dim` is zero.
    pub fn new(function: BbobFunction, dim: usize, instance: u32) -> Result<Self, SuiteError> {
        if dim == 0 {
            return Err(SuiteError::ZeroDimension);
        }
        let seed = function.index() as u64 + 10_000 * u64::from(instance) + ((dim as u64) << 32);
        let mut rng = StdRng::seed_from_u64(seed);

        let mut x_opt: Vec<f64> = (0..dim)
            .map(|_| 8.0 * (1e4 * rng.gen::<f64>()).floor() / 1e4 - 4.0)
            .collect();
        match function {
            BbobFunction::LinearSlope => {
                for v in &mut x_opt {
                    *v = if *v >= 0.0 { 5.0 } else { -5.0 };
                }
            }
            BbobFunction::BucheRastrigin => {
                for v in x_opt.iter_mut().step_by(2) {
                    *v = v.abs();
                }
            }
            BbobFunction::Rosenbrock | BbobFunction::RosenbrockRotated => {
                for v in &mut x_opt {
                    *v *= 0.75;
                }
            }
            _ => {}
        }

        let num: f64 = rng.sample(StandardNormal);
        let den: f64 = rng.sample(StandardNormal);
        let f_opt = ((100.0 * num / den).round() / 100.0).clamp(-1000.0, 1000.0);
        let f_opt = if f_opt.is_nan() { 0.0 } else { f_opt };

        let r = rotation(dim, &mut rng);
        let q = rotation(dim, &mut rng);
        let name = format!("bbob_f{:03}_i{:02}_d{:02}", function.index(), instance, dim);
        Ok(Self { function, dim, x_opt, f_opt, r, q, name })
    }

    #[must_use]
    pub fn function(&self) -> BbobFunction {
        self.function
    }

    #[must_use]
    pub fn x_opt(&self) -> &[f64] {
        &self.x_opt
    }

    #[must_use]
    pub fn f_opt(&self) -> f64 {
        self.f_opt
    }

    fn raw(&self, x: &[f64]) -> f64 {
        let d = self.dim;
        match self.function {
            BbobFunction::Sphere => sub(x, &self.x_opt).iter().map(|z| z * z).sum(),
            BbobFunction::EllipsoidSeparable => ellipsoid(&t_osz_vec(&sub(x, &self.x_opt))),
            BbobFunction::RastriginSeparable => {
                let z = lambda(&t_asy(&t_osz_vec(&sub(x, &self.x_opt)), 0.2), 10.0);
                rastrigin(&z)
            }
            BbobFunction::BucheRastrigin => {
                let z: Vec<f64> = sub(x, &self.x_opt)
                    .iter()
                    .enumerate()
                    .map(|(i, &v)| {
                        let z = t_osz(v);
                        let s = 10f64.powf(0.5 * ratio(i, d));
                        if z > 0.0 && i % 2 == 0 {
                            10.0 * s * z
                        } else {
                            s * z
                        }
                    })
                    .collect();
                rastrigin(&z) + 100.0 * f_pen(x)
            }
            BbobFunction::LinearSlope => x
                .iter()
                .zip(&self.x_opt)
                .enumerate()
                .map(|(i, (&xi, &oi))| {
                    let z = if oi * xi < 25.0 { xi } else { oi };
                    let s = oi.signum() * 10f64.powf(ratio(i, d));
                    5.0 * s.abs() - s * z
                })
                .sum(),
            BbobFunction::AttractiveSector => {
                let z = mat_vec(&self.q, &lambda(&mat_vec(&self.r, &sub(x, &self.x_opt)), 10.0));
                let sum: f64 = z
                    .iter()
                    .zip(&self.x_opt)
                    .map(|(&zi, &oi)| {
                        let s = if zi * oi > 0.0 { 100.0 } else { 1.0 };
                        (s * zi).powi(2)
                    })
                    .sum();
                t_osz(sum).powf(0.9)
            }
            BbobFunction::StepEllipsoid => {
                let z_hat = lambda(&mat_vec(&self.r, &sub(x, &self.x_opt)), 10.0);
                let z_tilde: Vec<f64> = z_hat
                    .iter()
                    .map(|&v| {
                        if v.abs() > 0.5 {
                            (0.5 + v).floor()
                        } else {
                            (0.5 + 10.0 * v).floor() / 10.0
                        }
                    })
                    .collect();
                let z = mat_vec(&self.q, &z_tilde);
                let weighted: f64 = z
                    .iter()
                    .enumerate()
                    .map(|(i, zi)| 10f64.powf(2.0 * ratio(i, d)) * zi * zi)
                    .sum();
                0.1 * (z_hat[0].abs() / 1e4).max(weighted) + f_pen(x)
            }
            BbobFunction::Rosenbrock => {
                let scale = rosenbrock_scale(d);
                let z: Vec<f64> = sub(x, &self.x_opt).iter().map(|v| scale * v + 1.0).collect();
                rosenbrock(&z)
            }
            BbobFunction::RosenbrockRotated => {
                let scale = rosenbrock_scale(d);
                let z: Vec<f64> = mat_vec(&self.r, x).iter().map(|v| scale * v + 0.5).collect();
                rosenbrock(&z)
            }
            BbobFunction::Ellipsoid => {
                ellipsoid(&t_osz_vec(&mat_vec(&self.r, &sub(x, &self.x_opt))))
            }
            BbobFunction::Discus => {
                let z = t_osz_vec(&mat_vec(&self.r, &sub(x, &self.x_opt)));
                1e6 * z[0] * z[0] + z[1..].iter().map(|v| v * v).sum::<f64>()
            }
            BbobFunction::BentCigar => {
                let z = mat_vec(&self.r, &t_asy(&mat_vec(&self.r, &sub(x, &self.x_opt)), 0.5));
                z[0] * z[0] + 1e6 * z[1..].iter().map(|v| v * v).sum::<f64>()
            }
        }
    }
}

fn ellipsoid(z: &[f64]) -> f64 {
    let d = z.len();
    z.iter()
        .enumerate()
        .map(|(i, v)| 10f64.powf(6.0 * ratio(i, d)) * v * v)
        .sum()
}

fn rastrigin(z: &[f64]) -> f64 {
    let d = z.len() as f64;
    let cos_sum: f64 = z.iter().map(|v| (2.0 * PI * v).cos()).sum();
    10.0 * (d - cos_sum) + z.iter().map(|v| v * v).sum::<f64>()
}

fn rosenbrock(z: &[f64]) -> f64 {
    z.windows(2)
        .map(|w| 100.0 * (w[0] * w[0] - w[1]).powi(2) + (w[0] - 1.0).powi(2))
        .sum()
}

fn rosenbrock_scale(dim: usize) -> f64 {
    ((dim as f64).sqrt() / 8.0).max(1.0)
}

impl Objective for BbobProblem {
    fn evaluate(&self, x: &[f64]) -> Result<f64, SuiteError> {
        if x.len() != self.dim {
            return Err(SuiteError::DimensionMismatch {
                expected: self.dim,
                found: x.len(),
            });
        }
        Ok(self.raw(x) + self.f_opt)
    }

    fn dimension(&self) -> usize {
        self.dim
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Built-in suite serving [`BbobProblem`]s for `ProblemType::Bbob`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BbobSuite;

impl BbobSuite {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ObjectiveSuite for BbobSuite {
    fn get_problem(
        &self,
        problem_type: ProblemType,
        dimension: usize,
        instance: u32,
        function_index: usize,
    ) -> Result<Box<dyn Objective>, SuiteError> {
        match problem_type {
            ProblemType::Bbob => {}
        }
        let function = BbobFunction::from_index(function_index).ok_or(SuiteError::UnknownFunction {
            index: function_index,
            available: BbobFunction::COUNT,
        })?;
        Ok(Box::new(BbobProblem::new(function, dimension, instance)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips_for_all_functions() {
        for i in 1..=BbobFunction::COUNT {
            assert_eq!(BbobFunction::from_index(i).unwrap().index(), i);
        }
        assert!(BbobFunction::from_index(0).is_none());
        assert!(BbobFunction::from_index(13).is_none());
    }

    #[test]
    fn optimum_value_reached_at_x_opt() {
        let exact = [
            BbobFunction::Sphere,
            BbobFunction::EllipsoidSeparable,
            BbobFunction::RastriginSeparable,
            BbobFunction::BucheRastrigin,
            BbobFunction::Ellipsoid,
            BbobFunction::Discus,
            BbobFunction::BentCigar,
            BbobFunction::Rosenbrock,
        ];
        for function in exact {
            let p = BbobProblem::new(function, 5, 1).unwrap();
            let f = p.evaluate(p.x_opt()).unwrap();
            assert!((f - p.f_opt()).abs() < 1e-9, "{function:?}: {f} vs {}", p.f_opt());
        }
    }

    #[test]
    fn name_encodes_function_instance_dimension() {
        let p = BbobProblem::new(BbobFunction::Discus, 40, 3).unwrap();
        assert_eq!(p.name(), "bbob_f011_i03_d40");
    }
}

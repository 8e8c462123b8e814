//! Building blocks shared by the BBOB functions.

use rand::Rng;
use rand_distr::StandardNormal;

pub(crate) type Matrix = Vec<Vec<f64>>;

/// `i / (dim - 1)`, or zero in one dimension.
pub(crate) fn ratio(i: usize, dim: usize) -> f64 {
    if dim > 1 {
        i as f64 / (dim - 1) as f64
    } else {
        0.0
    }
}

/// Oscillation transform applied elementwise.
pub(crate) fn t_osz(v: f64) -> f64 {
    if v == 0.0 {
        return 0.0;
    }
    let x_hat = v.abs().ln();
    let (c1, c2) = if v > 0.0 { (10.0, 7.9) } else { (5.5, 3.1) };
    v.signum() * (x_hat + 0.049 * ((c1 * x_hat).sin() + (c2 * x_hat).sin())).exp()
}

pub(crate) fn t_osz_vec(x: &[f64]) -> Vec<f64> {
    x.iter().map(|&v| t_osz(v)).collect()
}

/// Asymmetry transform with strength `beta`.
pub(crate) fn t_asy(x: &[f64], beta: f64) -> Vec<f64> {
    let dim = x.len();
    x.iter()
        .enumerate()
        .map(|(i, &v)| {
            if v > 0.0 {
                v.powf(1.0 + beta * ratio(i, dim) * v.sqrt())
            } else {
                v
            }
        })
        .collect()
}

/// Diagonal conditioning `alpha^(0.5 * i / (dim - 1))`.
pub(crate) fn lambda(x: &[f64], alpha: f64) -> Vec<f64> {
    let dim = x.len();
    x.iter()
        .enumerate()
        .map(|(i, &v)| alpha.powf(0.5 * ratio(i, dim)) * v)
        .collect()
}

/// Boundary penalty outside `[-5, 5]^dim`.
pub(crate) fn f_pen(x: &[f64]) -> f64 {
    x.iter().map(|v| (v.abs() - 5.0).max(0.0).powi(2)).sum()
}

pub(crate) fn mat_vec(m: &Matrix, x: &[f64]) -> Vec<f64> {
    m.iter()
        .map(|row| row.iter().zip(x).map(|(a, b)| a * b).sum())
        .collect()
}

pub(crate) fn sub(x: &[f64], y: &[f64]) -> Vec<f64> {
    x.iter().zip(y).map(|(a, b)| a - b).collect()
}

/// Random orthogonal matrix from Gram-Schmidt over Gaussian rows.
pub(crate) fn rotation<R: Rng>(dim: usize, rng: &mut R) -> Matrix {
    let mut rows: Matrix = Vec::with_capacity(dim);
    while rows.len() < dim {
        let mut v: Vec<f64> = (0..dim).map(|_| rng.sample(StandardNormal)).collect();
        for r in &rows {
            let dot: f64 = r.iter().zip(&v).map(|(a, b)| a * b).sum();
            for (vi, ri) in v.iter_mut().zip(r) {
                *vi -= dot * ri;
            }
        }
        let norm = v.iter().map(|a| a * a).sum::<f64>().sqrt();
        // resample on a (numerically) dependent draw
        if norm > 1e-10 {
            rows.push(v.into_iter().map(|a| a / norm).collect());
        }
    }
    rows
}

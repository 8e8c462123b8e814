//! Pure signal computations behind each transition.

/// Success ratio reported for the first generation of an episode.
pub const NEUTRAL_SUCCESS_RATIO: f64 = 0.2;
/// Improvement credited when the best fitness crosses from positive to negative.
pub const SIGN_CROSSING_BONUS: f64 = 0.1;

/// Maps an action in `[-1, 1]` onto a step-size multiplier in `[0.5, 2.0]`.
#[must_use]
pub fn scaling_factor(action: f64) -> f64 {
    action * 0.75 + 1.25
}

/// Sign-aware relative improvement between two consecutive best fitnesses.
///
/// * either side missing: `0`
/// * `previous > 0`, `current < 0`: [`SIGN_CROSSING_BONUS`]
/// * `previous > 0`, `current >= 0`: `(previous - current) / |previous|`
/// * `previous < 0`: `(previous - current) / |current|`, `0` if `current == 0`
/// * `previous == 0` (or NaN): `0`
#[must_use]
pub fn improvement_ratio(previous: Option<f64>, current: Option<f64>) -> f64 {
    let (Some(prev), Some(cur)) = (previous, current) else {
        return 0.0;
    };
    if prev > 0.0 {
        if cur < 0.0 {
            SIGN_CROSSING_BONUS
        } else {
            (prev - cur) / prev.abs()
        }
    } else if prev < 0.0 {
        if cur == 0.0 {
            0.0
        } else {
            (prev - cur) / cur.abs()
        }
    } else {
        0.0
    }
}

/// Fraction of `fitness` strictly better than `previous_best`.
#[must_use]
pub fn success_ratio(fitness: &[f64], previous_best: Option<f64>) -> f64 {
    match previous_best {
        None => NEUTRAL_SUCCESS_RATIO,
        Some(_) if fitness.is_empty() => 0.0,
        Some(best) => fitness.iter().filter(|&&f| f < best).count() as f64 / fitness.len() as f64,
    }
}

/// Rescales the order of magnitude of `sigma` into roughly `(0, 1]`.
///
/// With `L = floor(log10(sigma))` and `lead = sigma / 10^L` this is
/// `(L + 0.1 * lead + 20) / 22.1`, monotone over `[1e-20, 100]`.
#[must_use]
pub fn normalized_log_sigma(sigma: f64) -> f64 {
    let log_sigma = sigma.log10().floor();
    let leading = sigma / 10f64.powf(log_sigma);
    (log_sigma + 0.1 * leading + 20.0) / 22.1
}

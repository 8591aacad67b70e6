//! Sampling and summary statistics shared by the engine stages.
//!
//! Every sampler takes the random source explicitly so callers can seed a
//! run and replay it.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use std::cmp::Ordering;

/// Uniform draw in `[0, 1)`.
pub fn unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen::<f64>()
}

/// Uniform draw in `[low, high)`. A degenerate range returns `low`.
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, low: f64, high: f64) -> f64 {
    low + unit(rng) * (high - low)
}

/// Draw centred on zero: `(U - 0.5) * width`, so the result lies in
/// `[-width/2, width/2)`.
pub fn centered<R: Rng + ?Sized>(rng: &mut R, width: f64) -> f64 {
    (unit(rng) - 0.5) * width
}

/// True with probability `p`.
pub fn bernoulli<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    unit(rng) < p
}

/// Normal draw. Falls back to `mean` when `std_dev` is negative or not finite.
pub fn normal<R: Rng + ?Sized>(rng: &mut R, mean: f64, std_dev: f64) -> f64 {
    match Normal::new(mean, std_dev) {
        Ok(dist) => dist.sample(rng),
        Err(_) => mean,
    }
}

/// Arithmetic mean; `None` for an empty slice.
pub fn mean(xs: &[f64]) -> Option<f64> {
    if xs.is_empty() {
        return None;
    }
    Some(xs.iter().sum::<f64>() / xs.len() as f64)
}

/// Population variance (divides by N).
pub fn population_variance(xs: &[f64]) -> Option<f64> {
    let m = mean(xs)?;
    Some(xs.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / xs.len() as f64)
}

/// Population standard deviation (divides by N).
pub fn population_std(xs: &[f64]) -> Option<f64> {
    population_variance(xs).map(f64::sqrt)
}

/// Ascending copy ordered by `f64::total_cmp`.
pub fn sorted_copy(xs: &[f64]) -> Vec<f64> {
    let mut v = xs.to_vec();
    v.sort_by(f64::total_cmp);
    v
}

/// Nearest-rank percentile over an ascending slice: the element at index
/// `floor(N * p)`, no interpolation. The index is capped at `N - 1`.
pub fn percentile_nearest_rank(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&p) {
        return None;
    }
    let idx = ((sorted.len() as f64) * p).floor() as usize;
    sorted.get(idx.min(sorted.len() - 1)).copied()
}

/// Smallest and largest element.
pub fn min_max(xs: &[f64]) -> Option<(f64, f64)> {
    let first = *xs.first()?;
    Some(xs.iter().fold((first, first), |(lo, hi), &x| {
        let lo = match x.partial_cmp(&lo) {
            Some(Ordering::Less) => x,
            _ => lo,
        };
        let hi = match x.partial_cmp(&hi) {
            Some(Ordering::Greater) => x,
            _ => hi,
        };
        (lo, hi)
    }))
}

#![deny(warnings)]

//! Monte Carlo profit simulation under demand, cost and disruption volatility.
//!
//! Samples are drawn in fixed-size chunks on the rayon pool. Each chunk owns a
//! ChaCha stream derived from the run seed and its chunk index, so a seed
//! reproduces the same samples in the same order on any number of threads.

use pricing_core::round::money;
use pricing_core::stats;
use pricing_core::{PricingError, ProfitScenario, ValidationError};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Baseline and volatility assumptions of the simulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    /// Forecast revenue per period before volatility.
    pub base_revenue: f64,
    /// Costs per period before volatility.
    pub base_costs: f64,
    /// Full width of the demand multiplier band (0.4 = ±20%).
    pub demand_swing: f64,
    /// Full width of the cost multiplier band (0.2 = ±10%).
    pub cost_swing: f64,
    /// Chance of a supply disruption per sample.
    pub disruption_probability: f64,
    /// Revenue multiplier during a disruption.
    pub disruption_factor: f64,
    /// Sample count when the caller does not give one.
    pub default_samples: usize,
    /// Larger requests are clamped to this.
    pub max_samples: usize,
    /// Samples per worker chunk.
    pub chunk_size: usize,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            base_revenue: 50_000.0,
            base_costs: 30_000.0,
            demand_swing: 0.4,
            cost_swing: 0.2,
            disruption_probability: 0.05,
            disruption_factor: 0.5,
            default_samples: 1000,
            max_samples: 100_000,
            chunk_size: 1024,
        }
    }
}

/// Summary statistics over the profit samples.
///
/// Percentiles use nearest-rank indexing `floor(N * p)` over the sorted
/// samples, no interpolation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProfitStatistics {
    pub mean_profit: f64,
    /// Population standard deviation.
    pub std_profit: f64,
    pub min_profit: f64,
    pub max_profit: f64,
    pub percentile_5: f64,
    pub percentile_25: f64,
    pub percentile_50: f64,
    pub percentile_75: f64,
    pub percentile_95: f64,
}

/// Full result of a simulation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    pub profit_samples: Vec<f64>,
    pub statistics: ProfitStatistics,
    pub scenarios: Vec<ProfitScenario>,
    /// Sample count actually drawn, after clamping.
    pub samples: usize,
    pub seed: u64,
}

/// Draw one profit outcome, rounded to cents.
///
/// Consumes three uniforms: demand, cost, disruption.
pub fn sample_profit<R: Rng + ?Sized>(params: &SimulationParams, rng: &mut R) -> f64 {
    let demand_multiplier = 1.0 + stats::centered(rng, params.demand_swing);
    let revenue = params.base_revenue * demand_multiplier;
    let cost_multiplier = 1.0 + stats::centered(rng, params.cost_swing);
    let costs = params.base_costs * cost_multiplier;
    let disruption = if stats::bernoulli(rng, params.disruption_probability) {
        params.disruption_factor
    } else {
        1.0
    };
    money(revenue * disruption - costs)
}

/// Resolve a requested sample count: reject non-positive, clamp oversize.
pub fn resolve_sample_count(
    requested: Option<i64>,
    params: &SimulationParams,
) -> Result<usize, PricingError> {
    let n = match requested {
        None => return Ok(params.default_samples.clamp(1, params.max_samples.max(1))),
        Some(n) if n <= 0 => {
            return Err(ValidationError::NonPositiveCount {
                field: "samples",
                value: n,
            }
            .into())
        }
        Some(n) => usize::try_from(n).unwrap_or(usize::MAX),
    };
    if n > params.max_samples {
        warn!(requested = n, max = params.max_samples, "clamping sample count");
        return Ok(params.max_samples.max(1));
    }
    Ok(n)
}

/// Draw `samples` profit outcomes across the worker pool.
pub fn draw_samples(samples: usize, seed: u64, params: &SimulationParams) -> Vec<f64> {
    let chunk = params.chunk_size.max(1);
    let n_chunks = samples.div_ceil(chunk);
    let chunks: Vec<Vec<f64>> = (0..n_chunks)
        .into_par_iter()
        .map(|c| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            rng.set_stream(c as u64);
            let len = chunk.min(samples - c * chunk);
            (0..len).map(|_| sample_profit(params, &mut rng)).collect()
        })
        .collect();
    chunks.into_iter().flatten().collect()
}

/// Summary statistics; `DivisionUndefined` for an empty sample set.
pub fn summarize(samples: &[f64]) -> Result<ProfitStatistics, PricingError> {
    const EMPTY: PricingError = PricingError::DivisionUndefined("statistics over zero samples");
    let sorted = stats::sorted_copy(samples);
    let pct = |p: f64| stats::percentile_nearest_rank(&sorted, p).ok_or(EMPTY);
    let mean = stats::mean(samples).ok_or(EMPTY)?;
    let std = stats::population_std(samples).ok_or(EMPTY)?;
    let (min, max) = stats::min_max(&sorted).ok_or(EMPTY)?;
    Ok(ProfitStatistics {
        mean_profit: money(mean),
        std_profit: money(std),
        min_profit: min,
        max_profit: max,
        percentile_5: pct(0.05)?,
        percentile_25: pct(0.25)?,
        percentile_50: pct(0.5)?,
        percentile_75: pct(0.75)?,
        percentile_95: pct(0.95)?,
    })
}

/// Labelled percentile scenarios with fixed display probabilities.
pub fn scenarios(statistics: &ProfitStatistics) -> Vec<ProfitScenario> {
    [
        ("Pessimistic (5th percentile)", statistics.percentile_5, 0.05),
        ("Conservative (25th percentile)", statistics.percentile_25, 0.25),
        ("Expected (Median)", statistics.percentile_50, 0.5),
        ("Optimistic (95th percentile)", statistics.percentile_95, 0.95),
    ]
    .into_iter()
    .map(|(label, profit, probability)| ProfitScenario {
        scenario: label.to_string(),
        profit,
        probability,
    })
    .collect()
}

/// Run a full simulation of `samples` draws.
pub fn run_simulation(
    samples: usize,
    seed: u64,
    params: &SimulationParams,
) -> Result<SimulationOutcome, PricingError> {
    if samples == 0 {
        return Err(ValidationError::NonPositiveCount {
            field: "samples",
            value: 0,
        }
        .into());
    }
    let profit_samples = draw_samples(samples, seed, params);
    let statistics = summarize(&profit_samples)?;
    debug!(
        samples,
        seed,
        mean = statistics.mean_profit,
        p5 = statistics.percentile_5,
        "monte carlo complete"
    );
    Ok(SimulationOutcome {
        scenarios: scenarios(&statistics),
        profit_samples,
        statistics,
        samples,
        seed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn thousand_samples_with_ordered_percentiles() {
        let out = run_simulation(1000, 42, &SimulationParams::default()).unwrap();
        assert_eq!(out.profit_samples.len(), 1000);
        let s = &out.statistics;
        assert!(s.min_profit <= s.percentile_5);
        assert!(s.percentile_5 <= s.percentile_25);
        assert!(s.percentile_25 <= s.percentile_50);
        assert!(s.percentile_50 <= s.percentile_75);
        assert!(s.percentile_75 <= s.percentile_95);
        assert!(s.percentile_95 <= s.max_profit);
        // revenue 40k..60k, costs 27k..33k, disruptions halve revenue
        assert!(s.min_profit > -13_000.0 && s.max_profit < 33_000.0);
        assert!(s.mean_profit > 15_000.0 && s.mean_profit < 25_000.0);
        assert_eq!(out.scenarios.len(), 4);
        assert_eq!(out.scenarios[2].profit, s.percentile_50);
        assert_eq!(out.scenarios[3].probability, 0.95);
    }

    #[test]
    fn seed_reproduces_regardless_of_pool_size() {
        let p = SimulationParams {
            chunk_size: 64,
            ..SimulationParams::default()
        };
        let single = rayon::ThreadPoolBuilder::new().num_threads(1).build().unwrap();
        let many = rayon::ThreadPoolBuilder::new().num_threads(4).build().unwrap();
        let a = single.install(|| draw_samples(1000, 7, &p));
        let b = many.install(|| draw_samples(1000, 7, &p));
        assert_eq!(a, b);
        assert_ne!(a, draw_samples(1000, 8, &p));
    }

    #[test]
    fn disruption_always_on_shifts_profit_down() {
        let p = SimulationParams {
            disruption_probability: 1.0,
            ..SimulationParams::default()
        };
        let out = run_simulation(500, 3, &p).unwrap();
        // revenue 20k..30k minus costs 27k..33k
        assert!(out.statistics.max_profit < 3_000.0);
    }

    #[test]
    fn sample_count_resolution() {
        let p = SimulationParams::default();
        assert_eq!(resolve_sample_count(None, &p).unwrap(), 1000);
        assert_eq!(resolve_sample_count(Some(250), &p).unwrap(), 250);
        assert_eq!(resolve_sample_count(Some(5_000_000), &p).unwrap(), 100_000);
        assert!(resolve_sample_count(Some(0), &p).is_err());
        assert!(resolve_sample_count(Some(-3), &p).is_err());
        assert!(run_simulation(0, 1, &p).is_err());
    }

    #[test]
    fn summarize_population_std() {
        let s = summarize(&[1.0, 3.0]).unwrap();
        assert_eq!(s.mean_profit, 2.0);
        assert_eq!(s.std_profit, 1.0);
        assert_eq!(s.percentile_50, 3.0);
        assert!(summarize(&[]).is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]
        #[test]
        fn any_size_yields_exact_count(n in 1usize..3_000, seed in any::<u64>()) {
            let out = run_simulation(n, seed, &SimulationParams::default()).unwrap();
            prop_assert_eq!(out.profit_samples.len(), n);
            prop_assert!(out.statistics.percentile_5 <= out.statistics.percentile_95);
        }
    }
}

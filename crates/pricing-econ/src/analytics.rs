//! Lightweight reporting view: demand trend, category seasonality and
//! revenue sensitivity to price moves.
//!
//! These are illustrative series for dashboards and are not bound by the
//! per-SKU contracts of the forecaster and optimizer.

use pricing_core::round::{money, round_dp};
use pricing_core::{stats, Category};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

const BASE_LEVEL: f64 = 1000.0;
const TREND_PER_PERIOD: f64 = 20.0;
const SEASONAL_AMPLITUDE: f64 = 200.0;
const SEASON_PERIODS: f64 = 12.0;
const NOISE_WIDTH: f64 = 100.0;
const HISTORY_PERIODS: u32 = 12;
const HORIZON_PERIODS: u32 = 4;
const FORECAST_OPTIMISM: f64 = 50.0;

/// One period of the demand series; `actual` is absent for future periods.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DemandPoint {
    pub period: u32,
    pub actual: Option<f64>,
    pub forecast: f64,
}

/// Seasonality index of a category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeasonalityIndex {
    pub category: Category,
    pub index: f64,
}

/// Revenue impact (percent) of a price change (percent).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SensitivityPoint {
    pub price_change: i32,
    pub revenue_impact: f64,
}

fn level(i: u32) -> f64 {
    let t = f64::from(i);
    BASE_LEVEL + t * TREND_PER_PERIOD + SEASONAL_AMPLITUDE * (t / SEASON_PERIODS * 2.0 * PI).sin()
}

/// Twelve historical periods followed by a four-period forecast.
pub fn demand_series<R: Rng + ?Sized>(rng: &mut R) -> Vec<DemandPoint> {
    let mut out = Vec::with_capacity((HISTORY_PERIODS + HORIZON_PERIODS) as usize);
    for i in 0..HISTORY_PERIODS {
        let base = level(i);
        out.push(DemandPoint {
            period: i + 1,
            actual: Some(round_dp(base + stats::centered(rng, NOISE_WIDTH), 0)),
            forecast: round_dp(base, 0),
        });
    }
    for i in HISTORY_PERIODS..HISTORY_PERIODS + HORIZON_PERIODS {
        out.push(DemandPoint {
            period: i + 1,
            actual: None,
            forecast: round_dp(level(i) + FORECAST_OPTIMISM, 0),
        });
    }
    out
}

/// Seasonality index in [0.5, 2.0) for every category.
pub fn seasonality<R: Rng + ?Sized>(rng: &mut R) -> Vec<SeasonalityIndex> {
    Category::ALL
        .iter()
        .map(|&category| SeasonalityIndex {
            category,
            index: stats::uniform(rng, 0.5, 2.0),
        })
        .collect()
}

/// Revenue impact of price changes from -20% to +20% in 5% steps.
pub fn price_sensitivity<R: Rng + ?Sized>(elasticity: f64, rng: &mut R) -> Vec<SensitivityPoint> {
    (-20..=20)
        .step_by(5)
        .map(|change| {
            let c = f64::from(change);
            let impact = (c + c * elasticity) * 0.1 + stats::centered(rng, 2.0);
            SensitivityPoint {
                price_change: change,
                revenue_impact: money(impact),
            }
        })
        .collect()
}

//! Demand forecasting from the demand index.
//!
//! Stand-in for a time-series model: the base demand scales with the
//! index and a uniform noise band spreads the prediction.

use pricing_core::stats;
use pricing_core::{DemandForecast, Sku};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Forecaster tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastParams {
    /// Units per point of demand index.
    pub demand_scale: f64,
    /// Lower bound on base demand before noise.
    pub min_base_demand: f64,
    /// Half-width of the multiplicative noise band (0.2 = ±20%).
    pub noise_band: f64,
    /// Lowest reported confidence.
    pub confidence_floor: f64,
    /// Confidence spread above the floor.
    pub confidence_span: f64,
}

impl Default for ForecastParams {
    fn default() -> Self {
        Self {
            demand_scale: 20.0,
            min_base_demand: 5.0,
            noise_band: 0.2,
            confidence_floor: 0.75,
            confidence_span: 0.2,
        }
    }
}

/// Forecast one SKU. Draws the noise factor first, then the confidence.
pub fn forecast_sku<R: Rng + ?Sized>(
    sku: &Sku,
    params: &ForecastParams,
    rng: &mut R,
) -> DemandForecast {
    let base = (sku.demand_index * params.demand_scale).max(params.min_base_demand);
    let noise = stats::uniform(rng, 1.0 - params.noise_band, 1.0 + params.noise_band);
    let units = (base * noise).round().clamp(0.0, u32::MAX as f64) as u32;
    let confidence = params.confidence_floor + stats::unit(rng) * params.confidence_span;
    DemandForecast {
        sku_id: sku.id.clone(),
        predicted_units: units,
        confidence,
    }
}

/// Forecast every SKU, preserving input order.
pub fn forecast_demand<R: Rng + ?Sized>(
    skus: &[Sku],
    params: &ForecastParams,
    rng: &mut R,
) -> Vec<DemandForecast> {
    let out: Vec<DemandForecast> = skus.iter().map(|s| forecast_sku(s, params, rng)).collect();
    debug!(skus = out.len(), "demand forecast complete");
    out
}

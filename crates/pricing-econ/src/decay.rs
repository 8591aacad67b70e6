//! Lifecycle value model.
//!
//! Perishables decay exponentially as expiry approaches, electronics
//! depreciate linearly down to a floor, other categories hold value.

use pricing_core::{Category, Sku, ValueDecay};
use serde::{Deserialize, Serialize};

/// Decay tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayParams {
    /// Exponential rate per day short of the shelf horizon.
    pub perishable_rate: f64,
    /// Shelf horizon in days; a perishable at the horizon keeps full value.
    pub shelf_horizon_days: f64,
    /// Value lost per percent of depreciation.
    pub electronics_rate: f64,
    /// Lowest electronics decay factor.
    pub electronics_floor: f64,
    /// Cap the perishable factor at 1 when expiry lies beyond the horizon.
    pub clamp_perishable: bool,
}

impl Default for DecayParams {
    fn default() -> Self {
        Self {
            perishable_rate: 0.1,
            shelf_horizon_days: 30.0,
            electronics_rate: 0.01,
            electronics_floor: 0.5,
            clamp_perishable: false,
        }
    }
}

/// Decay factor for one SKU.
///
/// Perishables without `days_to_expiry` are rejected by validation upstream;
/// here they keep full value.
pub fn decay_factor(sku: &Sku, params: &DecayParams) -> f64 {
    match sku.category {
        Category::Perishable => {
            let Some(days) = sku.days_to_expiry else {
                return 1.0;
            };
            let f = (-params.perishable_rate * (params.shelf_horizon_days - f64::from(days))).exp();
            if params.clamp_perishable {
                f.min(1.0)
            } else {
                f
            }
        }
        Category::Electronics => {
            (1.0 - sku.depreciation_rate * params.electronics_rate).max(params.electronics_floor)
        }
        Category::NonPerishable | Category::Seasonal => 1.0,
    }
}

/// Value decay for every SKU, preserving input order.
pub fn value_decay(skus: &[Sku], params: &DecayParams) -> Vec<ValueDecay> {
    skus.iter()
        .map(|s| {
            let f = decay_factor(s, params);
            ValueDecay {
                sku_id: s.id.clone(),
                decay_factor: f,
                current_value: s.base_price * f,
                urgency: 1.0 - f,
            }
        })
        .collect()
}

use pricing_core::Sku;
use serde::{Deserialize, Serialize};

/// Ordered from best to worst so `max` picks the worse status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    /// No expiry date to judge.
    Neutral,
    Healthy,
    Warning,
    Critical,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StockHealth {
    pub sku_id: String,
    pub expiry: HealthStatus,
    pub stock: HealthStatus,
    /// Worse of the two; never `Neutral`.
    pub overall: HealthStatus,
}

fn expiry_status(days: Option<u32>) -> HealthStatus {
    match days {
        None => HealthStatus::Neutral,
        Some(d) if d < 3 => HealthStatus::Critical,
        Some(d) if d < 7 => HealthStatus::Warning,
        Some(_) => HealthStatus::Healthy,
    }
}

fn stock_status(quantity: u32) -> HealthStatus {
    match quantity {
        0 => HealthStatus::Critical,
        q if q < 10 => HealthStatus::Warning,
        _ => HealthStatus::Healthy,
    }
}

/// Classify each product by time to expiry and units on hand.
pub fn stock_health(skus: &[Sku]) -> Vec<StockHealth> {
    skus.iter()
        .map(|s| {
            let expiry = expiry_status(s.days_to_expiry);
            let stock = stock_status(s.quantity);
            StockHealth {
                sku_id: s.id.clone(),
                expiry,
                stock,
                overall: expiry.max(stock).max(HealthStatus::Healthy),
            }
        })
        .collect()
}

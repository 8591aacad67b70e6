#![deny(warnings)]

//! Economic models: demand, lifecycle value and markdown pricing.
//!
//! This crate provides the per-SKU stages of an optimization pass:
//! - Demand forecasting from the demand index with seeded noise
//! - Value decay by category (expiry, depreciation)
//! - Rule-based constrained price recommendation with a markup floor
//! - Portfolio KPI rollup
//! - A lighter analytics view (demand series, seasonality, sensitivity)

pub mod analytics;
pub mod decay;
pub mod forecast;
pub mod kpi;
pub mod optimizer;

pub use analytics::{
    demand_series, price_sensitivity, seasonality, DemandPoint, SeasonalityIndex,
    SensitivityPoint,
};
pub use decay::{decay_factor, value_decay, DecayParams};
pub use forecast::{forecast_demand, forecast_sku, ForecastParams};
pub use kpi::aggregate_kpis;
pub use optimizer::{optimize_prices, recommend_price, OptimizerParams};

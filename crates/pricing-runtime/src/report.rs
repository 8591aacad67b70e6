//! JSON response bodies of the engine operations.

use pricing_core::{PortfolioKpi, PriceRecommendation, ProfitScenario};
use pricing_econ::{DemandPoint, SeasonalityIndex, SensitivityPoint};
use pricing_risk::ProfitStatistics;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OptimizationMetadata {
    pub algorithm: String,
    /// RFC 3339, UTC.
    pub timestamp: String,
    pub constraints: Vec<String>,
    pub sku_count: usize,
    pub seed: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OptimizationReport {
    pub recommendations: Vec<PriceRecommendation>,
    pub kpis: PortfolioKpi,
    pub metadata: OptimizationMetadata,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsMetadata {
    pub period: String,
    pub algorithm: String,
    pub forecast_horizon: String,
    pub seed: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub demand_forecast: Vec<DemandPoint>,
    pub seasonality: Vec<SeasonalityIndex>,
    pub sensitivity: Vec<SensitivityPoint>,
    pub metadata: AnalyticsMetadata,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationMetadata {
    /// Sample count actually drawn.
    pub samples: usize,
    pub seed: u64,
    pub algorithm: String,
    pub assumptions: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub profit_samples: Vec<f64>,
    pub statistics: ProfitStatistics,
    pub scenarios: Vec<ProfitScenario>,
    pub metadata: SimulationMetadata,
}

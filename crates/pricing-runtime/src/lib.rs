#![deny(warnings)]

//! Pricing engine runtime: configuration, per-request seeding and the four
//! JSON-producing operations.
//!
//! Every operation is a pure function of its input, the configuration and a
//! ChaCha generator seeded for that request. The seed is logged and echoed in
//! the response metadata so any run can be replayed.

pub mod config;
pub mod report;

pub use config::{ConfigError, EngineConfig, SEED_ENV};
pub use report::{
    AnalyticsMetadata, AnalyticsReport, OptimizationMetadata, OptimizationReport,
    SimulationMetadata, SimulationReport,
};

use chrono::{SecondsFormat, Utc};
use pricing_core::{validate_inventory, Competitor, PortfolioKpi, PricingError, Sku};
use pricing_game::CompetitiveAnalysis;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

const OPTIMIZER_ALGORITHM: &str = "Rule-based markdown with demand elasticity";
const ANALYTICS_ALGORITHM: &str = "Trend plus seasonal decomposition";
const SIMULATION_ALGORITHM: &str = "Monte Carlo with demand volatility";

/// Stateless engine over an [`EngineConfig`].
#[derive(Clone, Debug, Default)]
pub struct PricingEngine {
    config: EngineConfig,
}

impl PricingEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Seed for one request: the configured one, or fresh entropy.
    fn seed(&self, operation: &'static str) -> u64 {
        let seed = self.config.rng_seed.unwrap_or_else(rand::random);
        info!(operation, seed, "request seeded");
        seed
    }

    fn rng(&self, operation: &'static str) -> (u64, ChaCha8Rng) {
        let seed = self.seed(operation);
        (seed, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Forecast, decay, optimize and roll up one inventory snapshot.
    ///
    /// An empty snapshot yields no recommendations and zeroed KPIs.
    pub fn forecast_and_optimize(&self, skus: &[Sku]) -> Result<OptimizationReport, PricingError> {
        validate_inventory(skus)?;
        let (seed, mut rng) = self.rng("forecast_and_optimize");
        let cfg = &self.config;

        let forecasts = pricing_econ::forecast_demand(skus, &cfg.forecast, &mut rng);
        let decays = pricing_econ::value_decay(skus, &cfg.decay);
        let recommendations =
            pricing_econ::optimize_prices(skus, &forecasts, &decays, &cfg.optimizer)?;
        let kpis = match pricing_econ::aggregate_kpis(&recommendations, skus, &mut rng) {
            Ok(k) => k,
            Err(e @ PricingError::DivisionUndefined(_)) => {
                warn!(error = %e, "KPI rollup unavailable, reporting zeros");
                PortfolioKpi::default()
            }
            Err(e) => return Err(e),
        };
        info!(
            skus = skus.len(),
            revenue = kpis.projected_revenue,
            "optimization complete"
        );

        let opt = &cfg.optimizer;
        Ok(OptimizationReport {
            recommendations,
            kpis,
            metadata: OptimizationMetadata {
                algorithm: OPTIMIZER_ALGORITHM.to_string(),
                timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
                constraints: vec![
                    format!("min_markup: {:.0}%", (opt.min_markup - 1.0) * 100.0),
                    format!(
                        "max_markdown: {}%",
                        opt.max_urgency_markdown.max(opt.max_excess_markdown)
                    ),
                    format!("demand_elasticity: {}", opt.elasticity),
                ],
                sku_count: skus.len(),
                seed,
            },
        })
    }

    /// Reporting view: demand series, seasonality and price sensitivity.
    pub fn analytics(&self) -> AnalyticsReport {
        let (seed, mut rng) = self.rng("analytics");
        let demand_forecast = pricing_econ::demand_series(&mut rng);
        let seasonality = pricing_econ::seasonality(&mut rng);
        let sensitivity =
            pricing_econ::price_sensitivity(self.config.optimizer.elasticity, &mut rng);
        let history = demand_forecast.iter().filter(|p| p.actual.is_some()).count();
        let horizon = demand_forecast.len() - history;
        AnalyticsReport {
            demand_forecast,
            seasonality,
            sensitivity,
            metadata: AnalyticsMetadata {
                period: format!("{history} weeks"),
                algorithm: ANALYTICS_ALGORITHM.to_string(),
                forecast_horizon: format!("{horizon} weeks ahead"),
                seed,
            },
        }
    }

    /// Monte Carlo profit simulation. `None` uses the configured default
    /// sample count; oversized requests are clamped.
    pub fn simulate(&self, samples: Option<i64>) -> Result<SimulationReport, PricingError> {
        let params = &self.config.simulation;
        let n = pricing_risk::resolve_sample_count(samples, params)?;
        let seed = self.seed("simulate");
        let outcome = pricing_risk::run_simulation(n, seed, params)?;
        info!(
            samples = outcome.samples,
            mean = outcome.statistics.mean_profit,
            "simulation complete"
        );
        Ok(SimulationReport {
            profit_samples: outcome.profit_samples,
            statistics: outcome.statistics,
            scenarios: outcome.scenarios,
            metadata: SimulationMetadata {
                samples: outcome.samples,
                seed: outcome.seed,
                algorithm: SIMULATION_ALGORITHM.to_string(),
                assumptions: vec![
                    format!("Demand swing: ±{:.0}%", params.demand_swing * 50.0),
                    format!("Cost swing: ±{:.0}%", params.cost_swing * 50.0),
                    format!(
                        "Supply disruption probability: {:.0}%",
                        params.disruption_probability * 100.0
                    ),
                ],
            },
        })
    }

    /// Market shares, best response and profit outlook against competitors.
    pub fn competitor_simulate(
        &self,
        competitors: &[Competitor],
    ) -> Result<CompetitiveAnalysis, PricingError> {
        let (_, mut rng) = self.rng("competitor_simulate");
        let analysis =
            pricing_game::analyze_competition(competitors, &self.config.market, &mut rng)?;
        info!(
            competitors = competitors.len(),
            best_response = ?analysis.best_response_price,
            "competitor simulation complete"
        );
        Ok(analysis)
    }
}

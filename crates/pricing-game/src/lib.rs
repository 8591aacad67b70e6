#![deny(warnings)]

//! Competitive pricing: logit market share and a best-response heuristic.
//!
//! Given the current prices of named competitors (one of them us), this
//! crate estimates market shares, a best-response price, a small set of
//! profit scenarios under rising competitive intensity, and a qualitative
//! equilibrium annotation.

use pricing_core::round::{money, round_dp};
use pricing_core::stats;
use pricing_core::{
    validate_competitors, Competitor, MarketShareEntry, PricingError, ProfitScenario,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Market model tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketParams {
    /// Logit price sensitivity λ.
    pub sensitivity: f64,
    /// Unit cost as a fraction of price.
    pub cost_ratio: f64,
    /// Lowest price as a multiple of the cost estimate.
    pub cost_markup: f64,
    /// Target price as a fraction of the competitor average.
    pub undercut: f64,
    /// Unit volume before competitive pressure.
    pub base_volume: f64,
    /// Intensity of the first scenario.
    pub intensity_start: f64,
    /// Intensity added per scenario.
    pub intensity_step: f64,
    /// Volume lost per unit of intensity.
    pub volume_drag: f64,
    /// Number of profit scenarios.
    pub scenario_count: u32,
}

impl Default for MarketParams {
    fn default() -> Self {
        Self {
            sensitivity: 0.1,
            cost_ratio: 0.65,
            cost_markup: 1.2,
            undercut: 0.95,
            base_volume: 1000.0,
            intensity_start: 0.5,
            intensity_step: 0.15,
            volume_drag: 0.3,
            scenario_count: 4,
        }
    }
}

/// Qualitative equilibrium annotation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EquilibriumAnalysis {
    #[serde(rename = "type")]
    pub kind: String,
    pub stability: String,
    pub expected_market_state: String,
    pub volatility_estimate: String,
}

/// Everything the competitor simulation reports.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompetitiveAnalysis {
    pub market_shares: Vec<MarketShareEntry>,
    /// Absent when fewer than two competitors were supplied.
    pub best_response_price: Option<f64>,
    pub profit_distribution: Vec<ProfitScenario>,
    pub equilibrium_analysis: EquilibriumAnalysis,
    pub recommendations: Vec<String>,
}

/// Index of our own entry: the first name containing "Our" or "our",
/// otherwise the last entry. `None` for an empty list.
pub fn our_index(competitors: &[Competitor]) -> Option<usize> {
    competitors
        .iter()
        .position(|c| c.name.contains("Our") || c.name.contains("our"))
        .or_else(|| competitors.len().checked_sub(1))
}

/// Logit shares `exp(λ p_i) / Σ exp(λ p_j)`, rounded to three decimals.
///
/// Every entry is scored, ours included. Scores are shifted by the maximum
/// exponent before exponentiating, which leaves the ratios unchanged.
pub fn market_shares(competitors: &[Competitor], params: &MarketParams) -> Vec<MarketShareEntry> {
    let exponents: Vec<f64> = competitors
        .iter()
        .map(|c| params.sensitivity * c.price)
        .collect();
    let peak = exponents.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let scores: Vec<f64> = exponents.iter().map(|e| (e - peak).exp()).collect();
    let total: f64 = scores.iter().sum();
    competitors
        .iter()
        .zip(&scores)
        .map(|(c, s)| MarketShareEntry {
            competitor: c.name.clone(),
            share: round_dp(s / total, 3),
        })
        .collect()
}

/// Best-response price against the average of the other competitors.
///
/// `max(avg * cost_ratio * cost_markup, avg * undercut)`, rounded to cents.
/// Needs at least two entries so the average excludes ours and is defined.
pub fn best_response_price(
    competitors: &[Competitor],
    params: &MarketParams,
) -> Result<f64, PricingError> {
    if competitors.len() < 2 {
        return Err(PricingError::DivisionUndefined(
            "best response needs at least two competitors",
        ));
    }
    let ours = our_index(competitors);
    let others: Vec<f64> = competitors
        .iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != ours)
        .map(|(_, c)| c.price)
        .collect();
    let avg = stats::mean(&others).ok_or(PricingError::DivisionUndefined(
        "no competitor besides our own entry",
    ))?;
    let cost = avg * params.cost_ratio;
    Ok(money((cost * params.cost_markup).max(avg * params.undercut)))
}

/// Profit under increasing competitive intensity.
///
/// Each scenario's `probability` is an independent draw around 0.25; the
/// set is not normalized.
pub fn profit_scenarios<R: Rng + ?Sized>(
    best_price: f64,
    params: &MarketParams,
    rng: &mut R,
) -> Vec<ProfitScenario> {
    let unit_profit = best_price - best_price * params.cost_ratio;
    (0..params.scenario_count)
        .map(|i| {
            let intensity = params.intensity_start + f64::from(i) * params.intensity_step;
            let volume = params.base_volume * (1.0 - intensity * params.volume_drag);
            ProfitScenario {
                scenario: format!("Scenario {}", i + 1),
                profit: money(volume * unit_profit),
                probability: round_dp(0.25 + stats::centered(rng, 0.1), 2),
            }
        })
        .collect()
}

/// Static equilibrium annotation.
pub fn equilibrium_analysis() -> EquilibriumAnalysis {
    EquilibriumAnalysis {
        kind: "Mixed strategy Nash Equilibrium".to_string(),
        stability: "Moderate - price wars possible".to_string(),
        expected_market_state: "Competitive but profitable".to_string(),
        volatility_estimate: "Medium".to_string(),
    }
}

/// Action items for the pricing team.
pub fn recommendations(best_price: Option<f64>) -> Vec<String> {
    let lead = match best_price {
        Some(p) => format!("Set price at ${p:.2} to maximize market share while maintaining margins"),
        None => "Add at least two competitor prices to compute a best-response price".to_string(),
    };
    vec![
        lead,
        "Monitor competitor pricing weekly; adjust if major changes detected".to_string(),
        "Invest in differentiation to reduce pure price competition".to_string(),
    ]
}

/// Run the full competitive analysis.
///
/// Invalid records reject the batch. A best response that cannot be computed
/// is reported as absent, with no profit distribution.
pub fn analyze_competition<R: Rng + ?Sized>(
    competitors: &[Competitor],
    params: &MarketParams,
    rng: &mut R,
) -> Result<CompetitiveAnalysis, PricingError> {
    validate_competitors(competitors)?;
    let market_shares = market_shares(competitors, params);
    let best = match best_response_price(competitors, params) {
        Ok(p) => Some(p),
        Err(e) => {
            warn!(error = %e, "best response unavailable");
            None
        }
    };
    let profit_distribution = best
        .map(|p| profit_scenarios(p, params, rng))
        .unwrap_or_default();
    debug!(
        competitors = competitors.len(),
        best_response = ?best,
        "competitive analysis complete"
    );
    Ok(CompetitiveAnalysis {
        market_shares,
        best_response_price: best,
        profit_distribution,
        equilibrium_analysis: equilibrium_analysis(),
        recommendations: recommendations(best),
    })
}

//! Rule-based constrained markdown pricing.
//!
//! A heuristic stand-in for a revenue LP. Exactly one rule fires per SKU,
//! in precedence order:
//! 1. urgency (expiring or aged stock) marks down aggressively
//! 2. excess stock relative to forecast marks down moderately
//! 3. weak forecast demand nudges the price up
//! 4. otherwise the list price holds
//!
//! A markup floor over the assumed unit cost is then enforced, and expected
//! sales are re-priced through a fixed linear elasticity.

use pricing_core::round::{money, non_negative, percent, round_dp};
use pricing_core::{
    DemandForecast, PriceRecommendation, PricingError, PricingRule, Sku, ValidationError,
    ValueDecay,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Optimizer tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerParams {
    /// Demand response per unit of relative price change (< 0).
    pub elasticity: f64,
    /// Assumed unit cost as a fraction of the list price.
    pub cost_ratio: f64,
    /// Minimum price as a multiple of the assumed cost.
    pub min_markup: f64,
    /// Urgency above which the urgency rule fires.
    pub urgency_threshold: f64,
    /// Markdown percent per unit of urgency.
    pub urgency_scale: f64,
    /// Markdown cap of the urgency rule, in percent.
    pub max_urgency_markdown: f64,
    /// Stock beyond this multiple of forecast units counts as excess.
    pub excess_stock_multiple: f64,
    /// Markdown percent per unit of excess ratio.
    pub excess_stock_scale: f64,
    /// Markdown cap of the excess-stock rule, in percent.
    pub max_excess_markdown: f64,
    /// Forecasts below this many units count as low demand.
    pub low_demand_units: u32,
    /// Price increase of the low-demand rule, in percent.
    pub low_demand_increase: f64,
}

impl Default for OptimizerParams {
    fn default() -> Self {
        Self {
            elasticity: -1.5,
            cost_ratio: 0.7,
            min_markup: 1.15,
            urgency_threshold: 0.5,
            urgency_scale: 50.0,
            max_urgency_markdown: 40.0,
            excess_stock_multiple: 3.0,
            excess_stock_scale: 10.0,
            max_excess_markdown: 20.0,
            low_demand_units: 10,
            low_demand_increase: 5.0,
        }
    }
}

/// Pick the first matching rule and its markdown percent.
fn select_rule(
    sku: &Sku,
    forecast: &DemandForecast,
    decay: &ValueDecay,
    params: &OptimizerParams,
) -> (PricingRule, f64) {
    let units = f64::from(forecast.predicted_units);
    let threshold = units * params.excess_stock_multiple;
    if decay.urgency > params.urgency_threshold {
        let md = (decay.urgency * params.urgency_scale).min(params.max_urgency_markdown);
        (PricingRule::Urgency, md)
    } else if f64::from(sku.quantity) > threshold {
        // threshold may be zero; the ratio is then +inf and the cap applies
        let ratio = f64::from(sku.quantity) / threshold;
        let md = ((ratio - 1.0) * params.excess_stock_scale).min(params.max_excess_markdown);
        (PricingRule::ExcessStock, md)
    } else if forecast.predicted_units < params.low_demand_units {
        (PricingRule::LowDemand, 0.0)
    } else {
        (PricingRule::Hold, 0.0)
    }
}

/// Recommend a price for one SKU from its forecast and decay.
pub fn recommend_price(
    sku: &Sku,
    forecast: &DemandForecast,
    decay: &ValueDecay,
    params: &OptimizerParams,
) -> PriceRecommendation {
    let base = sku.base_price;
    let (rule, markdown) = select_rule(sku, forecast, decay, params);
    let candidate = match rule {
        PricingRule::Urgency | PricingRule::ExcessStock => base * (1.0 - markdown / 100.0),
        PricingRule::LowDemand => base * (1.0 + params.low_demand_increase / 100.0),
        PricingRule::Hold => base,
    };

    let cost = base * params.cost_ratio;
    let price = non_negative(candidate.max(cost * params.min_markup));

    let price_change = (price - base) / base;
    let expected_sales = non_negative(
        f64::from(forecast.predicted_units) * (1.0 + params.elasticity * price_change),
    );
    let revenue = price * expected_sales;
    let margin = if price > 0.0 {
        (price - cost) / price * 100.0
    } else {
        0.0
    };

    let markdown_percent = percent(markdown);
    PriceRecommendation {
        sku_id: sku.id.clone(),
        current_price: base,
        recommended_price: money(price),
        expected_sales: round_dp(expected_sales, 0),
        projected_revenue: money(revenue),
        markdown_suggested: markdown > 0.0,
        markdown_percent,
        margin_percent: percent(margin),
        rule,
    }
}

fn misaligned(what: &str, id: &str) -> PricingError {
    PricingError::InvalidInput(ValidationError::Malformed(format!(
        "{what} entry for {id} is missing or out of order"
    )))
}

/// Recommend prices for every SKU.
///
/// `forecasts` and `decays` must be aligned with `skus` by position and id.
pub fn optimize_prices(
    skus: &[Sku],
    forecasts: &[DemandForecast],
    decays: &[ValueDecay],
    params: &OptimizerParams,
) -> Result<Vec<PriceRecommendation>, PricingError> {
    let mut out = Vec::with_capacity(skus.len());
    let mut hits: HashMap<PricingRule, usize> = HashMap::new();
    for (i, sku) in skus.iter().enumerate() {
        let forecast = forecasts
            .get(i)
            .filter(|f| f.sku_id == sku.id)
            .ok_or_else(|| misaligned("forecast", &sku.id))?;
        let decay = decays
            .get(i)
            .filter(|d| d.sku_id == sku.id)
            .ok_or_else(|| misaligned("decay", &sku.id))?;
        let rec = recommend_price(sku, forecast, decay, params);
        *hits.entry(rec.rule).or_default() += 1;
        out.push(rec);
    }
    debug!(skus = out.len(), ?hits, "price optimization complete");
    Ok(out)
}

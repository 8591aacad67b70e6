#![deny(warnings)]

//! Core domain models and invariants for the markdown pricing engine.
//!
//! This crate defines the serializable SKU and competitor records supplied by
//! callers, the derived records produced by each engine stage, and validation
//! helpers that reject a whole batch when any record breaks an invariant.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

pub mod round;
pub mod stats;

/// Product lifecycle category; drives the value decay policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Fresh goods with a hard expiry date.
    Perishable,
    /// Shelf-stable goods.
    #[serde(alias = "non-perishable")]
    NonPerishable,
    /// Goods that depreciate with age.
    Electronics,
    /// Goods tied to a selling season.
    Seasonal,
}

impl Category {
    /// All categories in reporting order.
    pub const ALL: [Category; 4] = [
        Category::Perishable,
        Category::NonPerishable,
        Category::Electronics,
        Category::Seasonal,
    ];

    /// Wire name of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Perishable => "perishable",
            Category::NonPerishable => "non_perishable",
            Category::Electronics => "electronics",
            Category::Seasonal => "seasonal",
        }
    }
}

/// A stock keeping unit as supplied by the inventory source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sku {
    /// Unique identifier within a batch, e.g. "PROD-1000".
    pub id: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Lifecycle category.
    pub category: Category,
    /// Units on hand.
    pub quantity: u32,
    /// List price in currency units (> 0).
    pub base_price: f64,
    /// Holding cost per unit and period (>= 0).
    pub holding_cost: f64,
    /// Depreciation in percent per period (>= 0).
    pub depreciation_rate: f64,
    /// Relative demand strength, typically 0.5..2.5 (> 0).
    pub demand_index: f64,
    /// Days until expiry; required for perishables, ignored otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_to_expiry: Option<u32>,
}

/// Predicted unit sales for one SKU.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DemandForecast {
    pub sku_id: String,
    pub predicted_units: u32,
    /// Confidence in [0.75, 0.95].
    pub confidence: f64,
}

/// Lifecycle value of one SKU.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValueDecay {
    pub sku_id: String,
    /// Multiplier applied to the base price.
    pub decay_factor: f64,
    /// `base_price * decay_factor`.
    pub current_value: f64,
    /// `1 - decay_factor`; how urgently the unit should sell.
    pub urgency: f64,
}

/// Which optimizer rule produced a recommendation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingRule {
    Urgency,
    ExcessStock,
    LowDemand,
    Hold,
}

/// Recommended price and its projected outcome for one SKU.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceRecommendation {
    pub sku_id: String,
    pub current_price: f64,
    pub recommended_price: f64,
    pub expected_sales: f64,
    pub projected_revenue: f64,
    pub markdown_suggested: bool,
    /// Markdown in percent, within [0, 40].
    pub markdown_percent: f64,
    pub margin_percent: f64,
    pub rule: PricingRule,
}

/// Portfolio rollup of one optimization run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioKpi {
    pub projected_revenue: f64,
    /// Estimated waste reduction in percent.
    pub waste_reduction: f64,
    /// Mean margin in percent.
    pub avg_margin: f64,
    /// Stockout risk placeholder in [0.15, 0.25].
    pub risk_metric: f64,
}

/// A named market participant and its current price.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    pub name: String,
    pub price: f64,
}

/// Logit market share of one competitor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarketShareEntry {
    pub competitor: String,
    pub share: f64,
}

/// Labelled profit outcome with a display probability.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProfitScenario {
    pub scenario: String,
    pub profit: f64,
    pub probability: f64,
}

/// Validation errors for input records.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Identifier or name is blank.
    #[error("record identifier must not be empty")]
    EmptyId,
    /// Identifier appears twice in one batch.
    #[error("duplicate identifier: {0}")]
    DuplicateId(String),
    /// Price must be strictly positive.
    #[error("{0}: price must be > 0")]
    NonPositivePrice(String),
    /// Cost-like field must be non-negative.
    #[error("{id}: {field} must be >= 0")]
    Negative { id: String, field: &'static str },
    /// Demand index must be strictly positive.
    #[error("{0}: demand_index must be > 0")]
    NonPositiveDemand(String),
    /// Numeric field must be finite.
    #[error("{id}: non-finite {field}")]
    NonFinite { id: String, field: &'static str },
    /// Perishables need an expiry horizon.
    #[error("{0}: perishable SKU requires days_to_expiry")]
    MissingExpiry(String),
    /// Batch must contain at least one record.
    #[error("empty {0} list")]
    Empty(&'static str),
    /// Count parameter must be strictly positive.
    #[error("{field} must be > 0, got {value}")]
    NonPositiveCount { field: &'static str, value: i64 },
    /// Payload could not be parsed.
    #[error("malformed payload: {0}")]
    Malformed(String),
}

/// Engine-level failures, surfaced as structured errors rather than panics.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// A record in the batch is malformed; the whole batch is rejected.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValidationError),
    /// A mean or ratio would divide by zero.
    #[error("division undefined: {0}")]
    DivisionUndefined(&'static str),
}

fn ensure_finite(id: &str, field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonFinite {
            id: id.to_string(),
            field,
        })
    }
}

/// Validate a single SKU.
pub fn validate_sku(sku: &Sku) -> Result<(), ValidationError> {
    if sku.id.trim().is_empty() {
        return Err(ValidationError::EmptyId);
    }
    ensure_finite(&sku.id, "base_price", sku.base_price)?;
    ensure_finite(&sku.id, "holding_cost", sku.holding_cost)?;
    ensure_finite(&sku.id, "depreciation_rate", sku.depreciation_rate)?;
    ensure_finite(&sku.id, "demand_index", sku.demand_index)?;
    if sku.base_price <= 0.0 {
        return Err(ValidationError::NonPositivePrice(sku.id.clone()));
    }
    if sku.holding_cost < 0.0 {
        return Err(ValidationError::Negative {
            id: sku.id.clone(),
            field: "holding_cost",
        });
    }
    if sku.depreciation_rate < 0.0 {
        return Err(ValidationError::Negative {
            id: sku.id.clone(),
            field: "depreciation_rate",
        });
    }
    if sku.demand_index <= 0.0 {
        return Err(ValidationError::NonPositiveDemand(sku.id.clone()));
    }
    if sku.category == Category::Perishable && sku.days_to_expiry.is_none() {
        return Err(ValidationError::MissingExpiry(sku.id.clone()));
    }
    Ok(())
}

/// Validate an inventory batch, including id uniqueness.
///
/// An empty batch is valid here; stages that cannot aggregate over zero
/// records report `DivisionUndefined` themselves.
pub fn validate_inventory(skus: &[Sku]) -> Result<(), ValidationError> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    for sku in skus {
        validate_sku(sku)?;
        if !seen.insert(sku.id.as_str()) {
            return Err(ValidationError::DuplicateId(sku.id.clone()));
        }
    }
    Ok(())
}

/// Validate a competitor list: non-empty, unique names, positive prices.
pub fn validate_competitors(competitors: &[Competitor]) -> Result<(), ValidationError> {
    if competitors.is_empty() {
        return Err(ValidationError::Empty("competitor"));
    }
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    for c in competitors {
        if c.name.trim().is_empty() {
            return Err(ValidationError::EmptyId);
        }
        ensure_finite(&c.name, "price", c.price)?;
        if c.price <= 0.0 {
            return Err(ValidationError::NonPositivePrice(c.name.clone()));
        }
        if !seen.insert(c.name.as_str()) {
            return Err(ValidationError::DuplicateId(c.name.clone()));
        }
    }
    Ok(())
}

/// Parse and validate an inventory batch from JSON.
pub fn parse_inventory(json: &str) -> Result<Vec<Sku>, PricingError> {
    let skus: Vec<Sku> =
        serde_json::from_str(json).map_err(|e| ValidationError::Malformed(e.to_string()))?;
    validate_inventory(&skus)?;
    Ok(skus)
}

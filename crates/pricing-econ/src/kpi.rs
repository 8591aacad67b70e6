//! Portfolio KPI rollup.

use pricing_core::round::{percent, round_dp};
use pricing_core::stats;
use pricing_core::{PortfolioKpi, PriceRecommendation, PricingError, Sku, ValidationError};
use rand::Rng;
use tracing::debug;

/// Share of markdowns converted into the waste-reduction estimate.
const WASTE_REDUCTION_SCALE: f64 = 15.0;

/// Reduce recommendations to portfolio KPIs.
///
/// Fails with `DivisionUndefined` on an empty set; callers fall back to
/// `PortfolioKpi::default()`. `risk_metric` is an independent placeholder
/// draw in [0.15, 0.25], not derived from the portfolio.
pub fn aggregate_kpis<R: Rng + ?Sized>(
    recommendations: &[PriceRecommendation],
    skus: &[Sku],
    rng: &mut R,
) -> Result<PortfolioKpi, PricingError> {
    if recommendations.len() != skus.len() {
        return Err(ValidationError::Malformed(format!(
            "{} recommendations for {} SKUs",
            recommendations.len(),
            skus.len()
        ))
        .into());
    }
    if recommendations.is_empty() {
        return Err(PricingError::DivisionUndefined(
            "KPI aggregation over an empty product set",
        ));
    }

    let total = recommendations.len() as f64;
    let revenue: f64 = recommendations.iter().map(|r| r.projected_revenue).sum();
    let marked_down = recommendations
        .iter()
        .filter(|r| r.markdown_suggested)
        .count();
    let margins: Vec<f64> = recommendations.iter().map(|r| r.margin_percent).collect();
    let avg_margin =
        stats::mean(&margins).ok_or(PricingError::DivisionUndefined("mean margin"))?;
    let risk = 0.15 + stats::unit(rng) * 0.1;

    debug!(marked_down, total = recommendations.len(), "kpi rollup");
    Ok(PortfolioKpi {
        projected_revenue: round_dp(revenue, 0),
        waste_reduction: percent(marked_down as f64 / total * WASTE_REDUCTION_SCALE),
        avg_margin: percent(avg_margin),
        risk_metric: round_dp(risk, 2),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricing_core::{Category, PricingRule};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rec(id: &str, revenue: f64, markdown: f64, margin: f64) -> PriceRecommendation {
        PriceRecommendation {
            sku_id: id.to_string(),
            current_price: 10.0,
            recommended_price: 10.0,
            expected_sales: 10.0,
            projected_revenue: revenue,
            markdown_suggested: markdown > 0.0,
            markdown_percent: markdown,
            margin_percent: margin,
            rule: if markdown > 0.0 {
                PricingRule::ExcessStock
            } else {
                PricingRule::Hold
            },
        }
    }

    fn sku(id: &str) -> Sku {
        Sku {
            id: id.to_string(),
            name: None,
            category: Category::Seasonal,
            quantity: 1,
            base_price: 10.0,
            holding_cost: 0.0,
            depreciation_rate: 0.0,
            demand_index: 1.0,
            days_to_expiry: None,
        }
    }

    #[test]
    fn rollup_matches_hand_computation() {
        let recs = vec![
            rec("A", 100.4, 10.0, 20.0),
            rec("B", 200.3, 0.0, 30.0),
            rec("C", 50.0, 0.0, 31.0),
            rec("D", 0.0, 5.0, 14.0),
        ];
        let skus: Vec<Sku> = ["A", "B", "C", "D"].iter().map(|id| sku(id)).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let k = aggregate_kpis(&recs, &skus, &mut rng).unwrap();
        assert_eq!(k.projected_revenue, 351.0);
        assert_eq!(k.waste_reduction, 7.5);
        assert_eq!(k.avg_margin, 23.8);
        assert!((0.15..=0.25).contains(&k.risk_metric));
    }

    #[test]
    fn empty_set_is_division_undefined() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let err = aggregate_kpis(&[], &[], &mut rng).unwrap_err();
        assert!(matches!(err, PricingError::DivisionUndefined(_)));
    }

    #[test]
    fn length_mismatch_is_invalid_input() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let err = aggregate_kpis(&[rec("A", 1.0, 0.0, 20.0)], &[], &mut rng).unwrap_err();
        assert!(matches!(err, PricingError::InvalidInput(_)));
    }
}

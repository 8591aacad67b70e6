//! Output rounding for currency and percentage fields.
//!
//! Values pass through `Decimal` with half-away-from-zero rounding. Non-finite
//! inputs saturate to zero and never reach serialized output.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// Round half away from zero to `dp` decimal places.
pub fn round_dp(value: f64, dp: u32) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    match Decimal::from_f64(value) {
        Some(d) => d
            .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
            .to_f64()
            .unwrap_or(value),
        // Outside Decimal's range; plain float rounding is precise enough there.
        None => {
            let scale = 10f64.powi(dp as i32);
            (value * scale).round() / scale
        }
    }
}

/// Currency fields: two decimals.
pub fn money(value: f64) -> f64 {
    round_dp(value, 2)
}

/// Percentage fields: one decimal.
pub fn percent(value: f64) -> f64 {
    round_dp(value, 1)
}

/// Clamp to `[0, +inf)`, mapping NaN to zero.
pub fn non_negative(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(money(10.446), 10.45);
        assert_eq!(money(-10.446), -10.45);
        assert_eq!(percent(23.36), 23.4);
        assert_eq!(round_dp(0.0821, 3), 0.082);
        assert_eq!(round_dp(7.5, 0), 8.0);
    }

    #[test]
    fn non_finite_saturates() {
        assert_eq!(money(f64::NAN), 0.0);
        assert_eq!(money(f64::INFINITY), 0.0);
        assert_eq!(non_negative(f64::NAN), 0.0);
        assert_eq!(non_negative(-3.0), 0.0);
        assert_eq!(non_negative(3.0), 3.0);
    }

    #[test]
    fn huge_values_fall_back() {
        let v = 1e30;
        assert!((round_dp(v, 2) - v).abs() / v < 1e-12);
    }
}

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// RoundingPolicy for quantities and percentages reported by the engine
///
/// Arithmetic that has to round happens in `Decimal`, half-away-from-zero at
/// a fixed number of decimals. Quantities cross the `f64` boundary through
/// their shortest decimal representation, so `2.675` is the decimal 2.675
/// and not the binary value just below it.
pub struct RoundingPolicy;

impl RoundingPolicy {
    /// Decimal value of `value` as written, `None` for NaN, infinities
    /// and magnitudes beyond `Decimal::MAX`
    pub fn decimal(value: f64) -> Option<Decimal> {
        if !value.is_finite() {
            return None;
        }
        Decimal::from_str(&value.to_string()).ok()
    }

    pub fn round_decimal(value: Decimal, decimals: u8) -> Decimal {
        value.round_dp_with_strategy(u32::from(decimals), RoundingStrategy::MidpointAwayFromZero)
    }

    /// Rounds `value` half-away-from-zero to `decimals` places.
    ///
    /// Values with no decimal counterpart are returned unchanged.
    pub fn round(value: f64, decimals: u8) -> f64 {
        match Self::decimal(value) {
            Some(exact) => Self::to_f64(Self::round_decimal(exact, decimals)),
            None => value,
        }
    }

    /// Nearest `f64` to `value`
    pub fn to_f64(value: Decimal) -> f64 {
        // Decimal's Display is plain notation, which f64 parses with correct rounding
        value.to_string().parse().unwrap_or(f64::NAN)
    }

    /// Whether a non-zero quantity vanished at the chosen precision
    pub fn lost_to_precision(original: f64, rounded: f64) -> bool {
        original != 0.0 && rounded == 0.0
    }

    /// Size of one unit in the last kept decimal place
    pub fn unit(decimals: u8) -> f64 {
        10f64.powi(-i32::from(decimals))
    }
}

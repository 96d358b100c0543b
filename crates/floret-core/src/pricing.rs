//! Price quoting.
//!
//! A quote resolves in strict priority order: an active recommended
//! price wins unconditionally, the evening rush applies a flat surge
//! to the base price, and otherwise the base price stands. There is no
//! scarcity pricing -- stock levels never influence a quote.

use floret_types::FlowerSpec;
use rust_decimal::Decimal;

/// First hour of the evening surge window (inclusive).
pub const EVENING_SURGE_START: u32 = 18;

/// Last hour of the evening surge window (inclusive).
pub const EVENING_SURGE_END: u32 = 19;

/// The evening surge multiplier (1.2).
fn evening_multiplier() -> Decimal {
    Decimal::new(12, 1)
}

/// Quote the current price for a flower.
///
/// `recommended` is the active recommendation override, if any.
pub fn quote(spec: &FlowerSpec, recommended: Option<Decimal>, hour: u32) -> Decimal {
    if let Some(price) = recommended {
        return price;
    }
    if (EVENING_SURGE_START..=EVENING_SURGE_END).contains(&hour) {
        spec.base_price.saturating_mul(evening_multiplier())
    } else {
        spec.base_price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(base_price: i64) -> FlowerSpec {
        FlowerSpec {
            name: "Roses".to_owned(),
            base_price: Decimal::new(base_price, 0),
            unit_cost: Decimal::new(80, 0),
            popularity: 0.3,
        }
    }

    #[test]
    fn base_price_outside_surge_window() {
        assert_eq!(quote(&spec(100), None, 10), Decimal::new(100, 0));
        assert_eq!(quote(&spec(100), None, 17), Decimal::new(100, 0));
        assert_eq!(quote(&spec(100), None, 20), Decimal::new(100, 0));
    }

    #[test]
    fn evening_surge_applies_at_18_and_19() {
        assert_eq!(quote(&spec(100), None, 18), Decimal::new(120, 0));
        assert_eq!(quote(&spec(100), None, 19), Decimal::new(120, 0));
    }

    #[test]
    fn recommendation_overrides_everything() {
        let recommended = Some(Decimal::new(160, 0));
        // Even inside the surge window the override wins unscaled.
        assert_eq!(quote(&spec(100), recommended, 18), Decimal::new(160, 0));
        assert_eq!(quote(&spec(100), recommended, 3), Decimal::new(160, 0));
    }
}

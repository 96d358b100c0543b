//! The pricing heuristic and reorder advisor.
//!
//! There is no learned model here: optimal prices are a fixed
//! cost-plus rule and reorder advice is a days-of-supply threshold
//! table. The exact constants (markup bounds, rounding to tens, the
//! early-morning sales fallback, the 30-day no-sales runway) are
//! load-bearing -- downstream pricing applies these numbers directly
//! to the catalog.

use floret_types::{Catalog, RecommendationSet, ReorderAdvice, ReorderUrgency};
use rust_decimal::Decimal;

use crate::clock::ShopClock;
use crate::ledger::StockLedger;

/// Assumed daily sales rate before the day has produced any data.
const EARLY_HOURS_SALES_RATE: u32 = 10;

/// Days of supply reported when a flower has no sales at all.
const NO_SALES_RUNWAY_DAYS: u32 = 30;

/// Below this runway a restock is urgent.
const URGENT_THRESHOLD_DAYS: u32 = 2;

/// Below this runway a restock is suggested.
const RESTOCK_THRESHOLD_DAYS: u32 = 5;

/// Days of cover purchased on an urgent restock.
const URGENT_COVER_DAYS: u32 = 7;

/// Days of cover purchased on a routine restock.
const RESTOCK_COVER_DAYS: u32 = 5;

/// Compute the optimal selling price for a unit cost.
///
/// A 100% markup clamped to `[cost * 1.3, cost * 3.0]`, rounded to the
/// nearest multiple of 10 (banker's rounding on the tens quotient).
pub fn optimal_price(unit_cost: Decimal) -> Decimal {
    let target = unit_cost.saturating_mul(Decimal::TWO);
    let floor = unit_cost.saturating_mul(Decimal::new(13, 1));
    let ceiling = unit_cost.saturating_mul(Decimal::new(3, 0));
    round_to_ten(target.clamp(floor, ceiling))
}

/// Round a price to the nearest multiple of 10.
fn round_to_ten(value: Decimal) -> Decimal {
    value
        .checked_div(Decimal::TEN)
        .map_or(value, |tens| tens.round().saturating_mul(Decimal::TEN))
}

/// Compute reorder advice for one flower.
///
/// `past_opening` selects the sales-rate source: once the day is under
/// way the observed daily units are used; before that, a fixed fallback
/// rate stands in (which also guards the early-morning degenerate
/// ratio). A rate of zero means nothing is selling, reported as an
/// ample fixed runway rather than a division error.
pub fn reorder_advice(on_hand: u32, units_sold_today: u32, past_opening: bool) -> ReorderAdvice {
    let avg_sales = if past_opening {
        units_sold_today
    } else {
        EARLY_HOURS_SALES_RATE
    };

    let days_of_supply = if avg_sales == 0 {
        Decimal::from(NO_SALES_RUNWAY_DAYS)
    } else {
        Decimal::from(on_hand)
            .checked_div(Decimal::from(avg_sales))
            .unwrap_or_else(|| Decimal::from(NO_SALES_RUNWAY_DAYS))
    };

    let (urgency, quantity) = if days_of_supply < Decimal::from(URGENT_THRESHOLD_DAYS) {
        (
            ReorderUrgency::Urgent,
            avg_sales.saturating_mul(URGENT_COVER_DAYS),
        )
    } else if days_of_supply < Decimal::from(RESTOCK_THRESHOLD_DAYS) {
        (
            ReorderUrgency::Restock,
            avg_sales.saturating_mul(RESTOCK_COVER_DAYS),
        )
    } else {
        (ReorderUrgency::Ok, 0)
    };

    ReorderAdvice {
        urgency,
        quantity,
        days_of_supply: days_of_supply.round_dp(1),
    }
}

/// Generate a full recommendation set for the catalog.
///
/// Thresholds compare the unrounded runway; the stored `days_of_supply`
/// is rounded to one decimal place for presentation.
pub fn generate(catalog: &Catalog, ledger: &StockLedger, clock: &ShopClock) -> RecommendationSet {
    let past_opening = clock.hour() > clock.opening_hour();
    let mut set = RecommendationSet {
        generated_at: Some(clock.now()),
        ..RecommendationSet::default()
    };

    for (name, spec) in catalog {
        set.optimal_prices
            .insert(name.clone(), optimal_price(spec.unit_cost));
        set.reorders.insert(
            name.clone(),
            reorder_advice(ledger.on_hand(name), ledger.daily(name).units, past_opening),
        );
    }

    set
}

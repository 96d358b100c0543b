//! Recommendation snapshot types.
//!
//! The recommendation engine produces one [`RecommendationSet`] per
//! cycle: an optimal price per flower and a reorder advice per flower.
//! The set is a snapshot — each cycle overwrites the previous one
//! wholesale.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How urgently a flower needs restocking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReorderUrgency {
    /// Less than 2 days of supply remain at the current sales rate.
    Urgent,
    /// Less than 5 days of supply remain.
    Restock,
    /// Supply is ample; no purchase suggested.
    Ok,
}

impl ReorderUrgency {
    /// Whether this urgency level triggers a purchase when applied.
    pub const fn needs_restock(self) -> bool {
        matches!(self, Self::Urgent | Self::Restock)
    }
}

/// Reorder advice for a single flower.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderAdvice {
    /// Urgency category derived from days of supply.
    pub urgency: ReorderUrgency,
    /// Suggested purchase quantity (0 when urgency is [`ReorderUrgency::Ok`]).
    pub quantity: u32,
    /// Estimated days of stock runway, rounded to 1 decimal place.
    pub days_of_supply: Decimal,
}

/// The current recommendation snapshot.
///
/// An empty set (the initial state, before the first cycle) means no
/// price overrides are active and pricing falls back to base prices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSet {
    /// Optimal selling price per flower.
    pub optimal_prices: BTreeMap<String, Decimal>,
    /// Reorder advice per flower.
    pub reorders: BTreeMap<String, ReorderAdvice>,
    /// Simulated time the set was generated, `None` before the first cycle.
    pub generated_at: Option<NaiveDateTime>,
}

impl RecommendationSet {
    /// The active recommended price for a flower, if one exists.
    pub fn recommended_price(&self, flower: &str) -> Option<Decimal> {
        self.optimal_prices.get(flower).copied()
    }

    /// The reorder advice for a flower, if one exists.
    pub fn reorder_advice(&self, flower: &str) -> Option<&ReorderAdvice> {
        self.reorders.get(flower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_has_no_overrides() {
        let set = RecommendationSet::default();
        assert!(set.recommended_price("Roses").is_none());
        assert!(set.reorder_advice("Roses").is_none());
        assert!(set.generated_at.is_none());
    }

    #[test]
    fn urgency_restock_gate() {
        assert!(ReorderUrgency::Urgent.needs_restock());
        assert!(ReorderUrgency::Restock.needs_restock());
        assert!(!ReorderUrgency::Ok.needs_restock());
    }
}

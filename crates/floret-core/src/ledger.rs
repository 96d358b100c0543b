//! The stock ledger: on-hand quantities, purchasing budget, and daily
//! totals.
//!
//! # Invariants
//!
//! - On-hand quantities never go negative: sales are clamped to the
//!   available stock.
//! - The budget never goes negative through a restock: an underfunded
//!   restock is a silent no-op, not an error.
//! - Sales always increase the budget (by the sale's profit); only
//!   restocks decrease it.
//!
//! All money values are [`Decimal`]; quantities are unsigned integers
//! with saturating arithmetic.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::debug;

/// Per-flower units and profit accrued since the last daily reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DailyTotals {
    /// Units sold today.
    pub units: u32,
    /// Profit accrued today.
    pub profit: Decimal,
}

/// The result of a completed (possibly clamped) sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaleOutcome {
    /// Units actually sold (min of requested quantity and stock).
    pub quantity: u32,
    /// `unit_price * quantity`.
    pub revenue: Decimal,
    /// `(unit_price - unit_cost) * quantity`.
    pub profit: Decimal,
}

impl SaleOutcome {
    /// A sale of zero units.
    const fn none() -> Self {
        Self {
            quantity: 0,
            revenue: Decimal::ZERO,
            profit: Decimal::ZERO,
        }
    }
}

/// The result of a restock attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestockOutcome {
    /// Stock was increased and the budget debited.
    Applied {
        /// Total amount debited from the budget.
        total_cost: Decimal,
    },
    /// The budget could not cover the purchase; nothing changed.
    InsufficientBudget {
        /// What the purchase would have cost.
        required: Decimal,
        /// The budget at the time of the attempt.
        available: Decimal,
    },
    /// Zero quantity or unknown flower; nothing to do.
    NotNeeded,
}

/// Stock levels, budget, and daily totals for the whole catalog.
///
/// Unknown flower names are ignored by every operation: the catalog is
/// fixed at construction and callers are trusted to use it, so a miss
/// is a no-op rather than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockLedger {
    /// On-hand units per flower.
    stock: BTreeMap<String, u32>,
    /// Available purchasing budget.
    budget: Decimal,
    /// Daily totals per flower.
    today: BTreeMap<String, DailyTotals>,
    /// Revenue accrued today across all flowers.
    today_revenue: Decimal,
}

impl StockLedger {
    /// Create a ledger covering the given flower names, each starting
    /// at `initial_stock` units, with the given budget.
    pub fn new<'a, I>(flowers: I, initial_stock: u32, initial_budget: Decimal) -> Self
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut stock = BTreeMap::new();
        let mut today = BTreeMap::new();
        for name in flowers {
            stock.insert(name.clone(), initial_stock);
            today.insert(name.clone(), DailyTotals::default());
        }
        Self {
            stock,
            budget: initial_budget,
            today,
            today_revenue: Decimal::ZERO,
        }
    }

    /// Units on hand for a flower (0 for unknown names).
    pub fn on_hand(&self, flower: &str) -> u32 {
        self.stock.get(flower).copied().unwrap_or(0)
    }

    /// The current purchasing budget.
    pub const fn budget(&self) -> Decimal {
        self.budget
    }

    /// Revenue accrued today across all flowers.
    pub const fn today_revenue(&self) -> Decimal {
        self.today_revenue
    }

    /// Daily totals for a flower (zeroes for unknown names).
    pub fn daily(&self, flower: &str) -> DailyTotals {
        self.today.get(flower).copied().unwrap_or_default()
    }

    /// Units sold today across all flowers.
    pub fn today_units(&self) -> u64 {
        self.today
            .values()
            .fold(0_u64, |acc, t| acc.saturating_add(u64::from(t.units)))
    }

    /// Profit accrued today across all flowers.
    pub fn today_profit(&self) -> Decimal {
        self.today
            .values()
            .fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.profit))
    }

    /// Record a sale.
    ///
    /// The sold quantity is clamped to the available stock (callers
    /// normally pre-clamp to `min(demand, on_hand)`). Stock decreases,
    /// daily totals and revenue accrue, and the profit is credited to
    /// the budget. Selling zero units (or an unknown flower) changes
    /// nothing.
    pub fn sell(
        &mut self,
        flower: &str,
        quantity: u32,
        unit_price: Decimal,
        unit_cost: Decimal,
    ) -> SaleOutcome {
        let Some(on_hand) = self.stock.get_mut(flower) else {
            return SaleOutcome::none();
        };
        let sold = quantity.min(*on_hand);
        if sold == 0 {
            return SaleOutcome::none();
        }

        *on_hand = on_hand.saturating_sub(sold);

        let sold_dec = Decimal::from(sold);
        let revenue = unit_price.saturating_mul(sold_dec);
        let profit = unit_price.saturating_sub(unit_cost).saturating_mul(sold_dec);

        let totals = self.today.entry(flower.to_owned()).or_default();
        totals.units = totals.units.saturating_add(sold);
        totals.profit = totals.profit.saturating_add(profit);

        self.today_revenue = self.today_revenue.saturating_add(revenue);
        self.budget = self.budget.saturating_add(profit);

        SaleOutcome {
            quantity: sold,
            revenue,
            profit,
        }
    }

    /// Attempt a restock.
    ///
    /// Underfunding is a silent no-op: the outcome reports it, a debug
    /// line records it, and no state changes. The budget can therefore
    /// never go negative through this path.
    pub fn restock(&mut self, flower: &str, quantity: u32, unit_cost: Decimal) -> RestockOutcome {
        if quantity == 0 {
            return RestockOutcome::NotNeeded;
        }
        let Some(on_hand) = self.stock.get_mut(flower) else {
            return RestockOutcome::NotNeeded;
        };

        let total_cost = unit_cost.saturating_mul(Decimal::from(quantity));
        if self.budget < total_cost {
            debug!(
                flower,
                quantity,
                required = %total_cost,
                available = %self.budget,
                "Restock skipped: insufficient budget"
            );
            return RestockOutcome::InsufficientBudget {
                required: total_cost,
                available: self.budget,
            };
        }

        *on_hand = on_hand.saturating_add(quantity);
        self.budget = self.budget.saturating_sub(total_cost);

        RestockOutcome::Applied { total_cost }
    }

    /// Reset all daily totals and today's revenue to zero.
    ///
    /// Reset cadence is the caller's concern; the ledger never resets
    /// itself.
    pub fn reset_daily_totals(&mut self) {
        for totals in self.today.values_mut() {
            *totals = DailyTotals::default();
        }
        self.today_revenue = Decimal::ZERO;
    }

    /// Iterate `(flower, on-hand)` pairs in name order.
    pub fn stock_levels(&self) -> impl Iterator<Item = (&String, u32)> {
        self.stock.iter().map(|(name, qty)| (name, *qty))
    }
}

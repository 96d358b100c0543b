//! Dashboard view of the shop's current state.
//!
//! [`DashboardSnapshot`] is what a presentation layer receives from
//! `FlowerShop::snapshot()`: clock time, money totals, per-flower
//! status, and the latest recommendation set. It is a read-only copy;
//! producing it never mutates simulation state.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::recommend::RecommendationSet;

/// Per-flower status line for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowerStatus {
    /// Flower name (catalog key).
    pub flower: String,
    /// Units on hand.
    pub on_hand: u32,
    /// Current quoted price (recommendation or surge aware).
    pub unit_price: Decimal,
    /// Profit accrued today for this flower.
    pub profit_today: Decimal,
    /// Units sold today for this flower.
    pub units_today: u32,
}

/// Full dashboard payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// Simulated clock time formatted as `%Y-%m-%d %H:%M`.
    pub current_time: String,
    /// Available purchasing budget.
    pub budget: Decimal,
    /// Revenue accrued today across all flowers.
    pub today_revenue: Decimal,
    /// Profit accrued today across all flowers.
    pub today_profit: Decimal,
    /// Units sold today across all flowers.
    pub today_units: u64,
    /// Per-flower status, in catalog (name) order.
    pub flowers: Vec<FlowerStatus>,
    /// The latest recommendation snapshot.
    pub recommendations: RecommendationSet,
}

//! The flower catalog: the fixed set of items the shop trades in.
//!
//! Catalog entries are immutable after construction with one exception:
//! the base price, which the recommendation cycle overwrites when a new
//! optimal price is applied. The set of flower names never changes for
//! the lifetime of a simulation run.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single catalog entry.
///
/// `popularity` is the flower's fraction of total customer demand
/// (0.0–1.0). Popularities across the catalog are expected to sum to
/// at most 1.0; nothing enforces this — a catalog whose weights sum
/// above 1.0 simply sells more than one flower per customer on average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowerSpec {
    /// Display name, also the key used in ledger and archive rows.
    pub name: String,

    /// Current selling price before surge or recommendation overrides.
    ///
    /// Mutable: `apply_recommendations` overwrites it with the latest
    /// optimal price. There is no history of prior base prices.
    pub base_price: Decimal,

    /// Wholesale cost per stem. Restocks draw `unit_cost * quantity`
    /// from the budget; sale profit is `(price - unit_cost) * quantity`.
    pub unit_cost: Decimal,

    /// Fraction of hourly customer demand attracted by this flower.
    pub popularity: f64,
}

/// The shop's catalog, keyed by flower name.
///
/// Iteration order is the name order (`BTreeMap`), which keeps archive
/// rows and dashboard listings deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    flowers: BTreeMap<String, FlowerSpec>,
}

impl Catalog {
    /// Build a catalog from a list of specs. Duplicate names keep the
    /// last spec seen.
    pub fn new(specs: Vec<FlowerSpec>) -> Self {
        let mut flowers = BTreeMap::new();
        for spec in specs {
            flowers.insert(spec.name.clone(), spec);
        }
        Self { flowers }
    }

    /// Look up a spec by flower name.
    pub fn get(&self, name: &str) -> Option<&FlowerSpec> {
        self.flowers.get(name)
    }

    /// Overwrite the base price for a flower.
    ///
    /// Returns `false` if the flower is not in the catalog (the write
    /// is dropped; unknown names are never inserted).
    pub fn set_base_price(&mut self, name: &str, price: Decimal) -> bool {
        match self.flowers.get_mut(name) {
            Some(spec) => {
                spec.base_price = price;
                true
            }
            None => false,
        }
    }

    /// Iterate over `(name, spec)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FlowerSpec)> {
        self.flowers.iter()
    }

    /// Iterate over flower names in name order.
    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.flowers.keys()
    }

    /// Number of catalog entries.
    pub fn len(&self) -> usize {
        self.flowers.len()
    }

    /// Whether the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.flowers.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = (&'a String, &'a FlowerSpec);
    type IntoIter = std::collections::btree_map::Iter<'a, String, FlowerSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.flowers.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn rose() -> FlowerSpec {
        FlowerSpec {
            name: "Roses".to_owned(),
            base_price: Decimal::new(150, 0),
            unit_cost: Decimal::new(80, 0),
            popularity: 0.3,
        }
    }

    fn tulip() -> FlowerSpec {
        FlowerSpec {
            name: "Tulips".to_owned(),
            base_price: Decimal::new(80, 0),
            unit_cost: Decimal::new(40, 0),
            popularity: 0.2,
        }
    }

    #[test]
    fn lookup_by_name() {
        let catalog = Catalog::new(vec![rose(), tulip()]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.get("Roses").map(|s| s.base_price),
            Some(Decimal::new(150, 0)),
        );
        assert!(catalog.get("Orchids").is_none());
    }

    #[test]
    fn set_base_price_overwrites() {
        let mut catalog = Catalog::new(vec![rose()]);
        assert!(catalog.set_base_price("Roses", Decimal::new(160, 0)));
        assert_eq!(
            catalog.get("Roses").map(|s| s.base_price),
            Some(Decimal::new(160, 0)),
        );
    }

    #[test]
    fn set_base_price_ignores_unknown_names() {
        let mut catalog = Catalog::new(vec![rose()]);
        assert!(!catalog.set_base_price("Orchids", Decimal::new(999, 0)));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn iteration_is_name_ordered() {
        let catalog = Catalog::new(vec![tulip(), rose()]);
        let names: Vec<&String> = catalog.names().collect();
        assert_eq!(names, vec!["Roses", "Tulips"]);
    }

    #[test]
    fn duplicate_names_keep_last() {
        let mut expensive_rose = rose();
        expensive_rose.base_price = Decimal::new(200, 0);
        let catalog = Catalog::new(vec![rose(), expensive_rose]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(
            catalog.get("Roses").map(|s| s.base_price),
            Some(Decimal::new(200, 0)),
        );
    }
}

//! # Discount Catalog
//!
//! Fixed peso discounts per product and channel.
//!
//! ## Resolution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  available_discounts("GAS 15KG", "local")                               │
//! │       │                                                                 │
//! │       ├── channel recognized?  no ──► [0]                               │
//! │       │                                                                 │
//! │       ├── entry for (gas 15kg, local)?  no ──► [0]                      │
//! │       │                                                                 │
//! │       └── yes ──► [5500, 6000]   (order is significant)                 │
//! │                                                                         │
//! │  apply_selected(product, "local", index)                                │
//! │       │                                                                 │
//! │       ├── 0 <= index < len ──► sale_price - discounts[index]            │
//! │       │                                                                 │
//! │       └── anything else ─────► sale_price   (fail open, NOT an error)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An out-of-range pick forfeits the discount and the sale goes ahead at
//! full price. Callers see that as [`AppliedDiscount::None`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::money::Money;
use crate::types::{Channel, Product, ProductKey};

// =============================================================================
// Applied Discount
// =============================================================================

/// Result of resolving a discount pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "amount")]
pub enum AppliedDiscount {
    /// The picked amount applies.
    Amount(Money),
    /// The pick was out of range; full price.
    None,
}

impl AppliedDiscount {
    /// Peso amount to subtract; zero for [`AppliedDiscount::None`].
    pub fn amount(&self) -> Money {
        match self {
            AppliedDiscount::Amount(amount) => *amount,
            AppliedDiscount::None => Money::zero(),
        }
    }
}

// =============================================================================
// Discount Catalog
// =============================================================================

/// Immutable table of candidate discounts.
///
/// Built once by the composing application and shared read-only. There is
/// no way to change an entry after construction.
#[derive(Debug, Clone, Default)]
pub struct DiscountCatalog {
    entries: HashMap<(ProductKey, Channel), Vec<Money>>,
}

impl DiscountCatalog {
    /// An empty catalog: every lookup resolves to `[0]`.
    pub fn empty() -> Self {
        DiscountCatalog::default()
    }

    /// Builds a catalog from `(product name, channel, amounts)` rows.
    ///
    /// A later row for the same product and channel replaces an earlier one.
    pub fn from_entries<I, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = (S, Channel, Vec<i64>)>,
        S: AsRef<str>,
    {
        let entries = rows
            .into_iter()
            .map(|(name, channel, amounts)| {
                let amounts = amounts.into_iter().map(Money::from_pesos).collect();
                ((ProductKey::new(name.as_ref()), channel), amounts)
            })
            .collect();
        DiscountCatalog { entries }
    }

    /// The distributor's standing discount table for gas cylinders.
    pub fn standard() -> Self {
        DiscountCatalog::from_entries([
            ("gas 5kg", Channel::Local, vec![2500]),
            ("gas 11kg", Channel::Local, vec![4000]),
            ("gas 15kg", Channel::Local, vec![5500, 6000]),
            ("gas 5kg", Channel::Delivery, vec![700, 1500]),
            ("gas 11kg", Channel::Delivery, vec![1500, 3500]),
            ("gas 15kg", Channel::Delivery, vec![3000, 5000]),
            ("gas 45kg", Channel::Delivery, vec![6000, 7000]),
        ])
    }

    /// Number of configured (product, channel) entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Candidate discounts for a product on a typed channel.
    ///
    /// Absent entries resolve to `[0]`. A configured empty list stays empty.
    pub fn discounts_for(&self, product_name: &str, channel: Channel) -> Vec<Money> {
        self.entries
            .get(&(ProductKey::new(product_name), channel))
            .cloned()
            .unwrap_or_else(|| vec![Money::zero()])
    }

    /// Candidate discounts for a product on a raw channel name.
    ///
    /// ## Example
    /// ```rust
    /// use depot_core::{DiscountCatalog, Money};
    ///
    /// let catalog = DiscountCatalog::standard();
    /// assert_eq!(
    ///     catalog.available_discounts("gas 15kg", "LOCAL"),
    ///     vec![Money::from_pesos(5500), Money::from_pesos(6000)]
    /// );
    /// assert_eq!(catalog.available_discounts("gas 15kg", "online"), vec![Money::zero()]);
    /// ```
    pub fn available_discounts(&self, product_name: &str, channel: &str) -> Vec<Money> {
        match Channel::parse(channel) {
            Some(channel) => self.discounts_for(product_name, channel),
            None => vec![Money::zero()],
        }
    }

    /// Resolves a picked index against the candidate list.
    ///
    /// `selected_index` is taken as typed by a person, so it may be negative.
    pub fn resolve(&self, product: &Product, channel: &str, selected_index: i64) -> AppliedDiscount {
        let discounts = self.available_discounts(product.name(), channel);
        pick(&discounts, selected_index)
    }

    /// Price after applying the picked discount; full price on a bad pick.
    pub fn apply_selected(&self, product: &Product, channel: &str, selected_index: i64) -> Money {
        product.sale_price() - self.resolve(product, channel, selected_index).amount()
    }
}

/// Picks `discounts[index]`, failing open on any out-of-range index.
pub fn pick(discounts: &[Money], index: i64) -> AppliedDiscount {
    usize::try_from(index)
        .ok()
        .and_then(|i| discounts.get(i))
        .map_or(AppliedDiscount::None, |amount| AppliedDiscount::Amount(*amount))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn gas_15kg() -> Product {
        Product::new(
            "Gas 15kg",
            "gas",
            Money::from_pesos(25_000),
            Money::from_pesos(3_000),
        )
        .unwrap()
    }

    fn pesos(values: &[i64]) -> Vec<Money> {
        values.iter().copied().map(Money::from_pesos).collect()
    }

    #[test]
    fn test_known_entries_keep_order() {
        let catalog = DiscountCatalog::standard();
        assert_eq!(catalog.available_discounts("gas 15kg", "LOCAL"), pesos(&[5500, 6000]));
        assert_eq!(catalog.available_discounts("Gas 11KG", "delivery"), pesos(&[1500, 3500]));
        assert_eq!(catalog.available_discounts("gas 45kg", "domicilio"), pesos(&[6000, 7000]));
    }

    #[test]
    fn test_unknown_pairs_resolve_to_zero() {
        let catalog = DiscountCatalog::standard();
        assert_eq!(catalog.available_discounts("regulador", "local"), pesos(&[0]));
        assert_eq!(catalog.available_discounts("gas 45kg", "local"), pesos(&[0]));
        assert_eq!(catalog.available_discounts("gas 5kg", "wholesale"), pesos(&[0]));
        assert_eq!(DiscountCatalog::empty().available_discounts("gas 5kg", "local"), pesos(&[0]));
    }

    #[test]
    fn test_configured_empty_list_stays_empty() {
        let catalog = DiscountCatalog::from_entries([("promo", Channel::Local, vec![])]);
        let promo = Product::new("Promo", "gas", Money::from_pesos(9_000), Money::from_pesos(1_000))
            .unwrap();

        assert!(catalog.available_discounts("promo", "local").is_empty());
        assert_eq!(catalog.resolve(&promo, "local", 0), AppliedDiscount::None);
        assert_eq!(catalog.apply_selected(&promo, "local", 0), promo.sale_price());
    }

    #[test]
    fn test_apply_selected_in_range() {
        let catalog = DiscountCatalog::standard();
        let product = gas_15kg();

        assert_eq!(catalog.apply_selected(&product, "local", 0).pesos(), 22_500);
        assert_eq!(catalog.apply_selected(&product, "local", 1).pesos(), 22_000);
        assert_eq!(catalog.apply_selected(&product, "delivery", 1).pesos(), 23_000);
    }

    #[test]
    fn test_apply_selected_fails_open() {
        let catalog = DiscountCatalog::standard();
        let product = gas_15kg();

        assert_eq!(catalog.apply_selected(&product, "local", 5), product.sale_price());
        assert_eq!(catalog.apply_selected(&product, "local", 2), product.sale_price());
        assert_eq!(catalog.apply_selected(&product, "local", -1), product.sale_price());
        assert_eq!(catalog.resolve(&product, "local", 5), AppliedDiscount::None);
    }

    #[test]
    fn test_pick() {
        let discounts = pesos(&[700, 1500]);
        assert_eq!(pick(&discounts, 1), AppliedDiscount::Amount(Money::from_pesos(1500)));
        assert_eq!(pick(&discounts, i64::MAX), AppliedDiscount::None);
        assert_eq!(pick(&[], 0), AppliedDiscount::None);
        assert_eq!(AppliedDiscount::None.amount(), Money::zero());
    }

    #[test]
    fn test_later_entry_replaces_earlier() {
        let catalog = DiscountCatalog::from_entries([
            ("Gas 5kg", Channel::Local, vec![100]),
            ("GAS 5KG", Channel::Local, vec![200, 300]),
        ]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.available_discounts("gas 5kg", "local"), pesos(&[200, 300]));
    }
}

//! # Domain Types
//!
//! Value types shared by every engine component.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   ProductKey    │   │    Channel      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name           │   │  lower-cased    │   │  Local          │       │
//! │  │  category       │   │  trimmed name   │   │  Delivery       │       │
//! │  │  purchase_cost  │   │                 │   │                 │       │
//! │  │  commission     │   │  ledger and     │   │  selects the    │       │
//! │  │  sale_price     │   │  catalog key    │   │  discount list  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Products have no surrogate id. Everything that needs to find a product by
//! name goes through [`ProductKey`], so case folding happens in one place.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::validation::{validate_commission, validate_purchase_cost, validate_required};

// =============================================================================
// Channel
// =============================================================================

/// The sale context, which selects a distinct discount list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// In-store counter sale.
    Local,
    /// Home delivery.
    #[serde(alias = "domicilio")]
    Delivery,
}

impl Channel {
    /// Parses a channel name, ignoring ASCII case.
    ///
    /// `"domicilio"` is accepted as the delivery channel. Anything else is
    /// not a channel and yields `None`.
    ///
    /// ## Example
    /// ```rust
    /// use depot_core::Channel;
    ///
    /// assert_eq!(Channel::parse("LOCAL"), Some(Channel::Local));
    /// assert_eq!(Channel::parse("Domicilio"), Some(Channel::Delivery));
    /// assert_eq!(Channel::parse("online"), None);
    /// ```
    pub fn parse(raw: &str) -> Option<Channel> {
        if raw.eq_ignore_ascii_case("local") {
            Some(Channel::Local)
        } else if raw.eq_ignore_ascii_case("delivery") || raw.eq_ignore_ascii_case("domicilio") {
            Some(Channel::Delivery)
        } else {
            None
        }
    }

    /// Canonical lower-case name, as written in exports.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Channel::Local => "local",
            Channel::Delivery => "delivery",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Product Key
// =============================================================================

/// Canonical, case-insensitive product identity.
///
/// `"Gas 5kg"`, `"GAS 5KG"` and `" gas 5kg "` all map to the same key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductKey(String);

impl ProductKey {
    /// Builds the key for a product name.
    pub fn new(name: &str) -> Self {
        ProductKey(name.trim().to_lowercase())
    }

    /// The folded name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductKey {
    fn from(name: &str) -> Self {
        ProductKey::new(name)
    }
}

impl fmt::Display for ProductKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product the distributor buys and sells.
///
/// The sale price is always `purchase_cost + commission`. It has no setter:
/// every mutation of its inputs validates first and recomputes it before
/// returning, so a stale price is never observable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    name: String,
    category: String,
    purchase_cost: Money,
    commission: Money,
    sale_price: Money,
}

impl Product {
    /// Creates a product and computes its sale price.
    ///
    /// ## Errors
    /// `ValidationError` when the name or category is blank, the purchase
    /// cost is not positive, the commission is negative, or their sum does
    /// not fit in an `i64`.
    ///
    /// ## Example
    /// ```rust
    /// use depot_core::{Money, Product};
    ///
    /// let gas = Product::new("Gas 15kg", "gas", Money::from_pesos(25_000), Money::from_pesos(3_000))?;
    /// assert_eq!(gas.sale_price().pesos(), 28_000);
    /// # Ok::<(), depot_core::ValidationError>(())
    /// ```
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        purchase_cost: Money,
        commission: Money,
    ) -> CoreResult<Self> {
        let name = name.into();
        let category = category.into();

        validate_required("name", &name)?;
        validate_required("category", &category)?;
        validate_purchase_cost(purchase_cost)?;
        validate_commission(commission)?;
        let sale_price = sale_price_of(purchase_cost, commission)?;

        Ok(Product {
            name,
            category,
            purchase_cost,
            commission,
            sale_price,
        })
    }

    /// Display name as first registered.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Category, e.g. `"gas"` or `"accesorio"`.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Purchase cost, tax included.
    pub fn purchase_cost(&self) -> Money {
        self.purchase_cost
    }

    /// Seller commission added on top of the cost.
    pub fn commission(&self) -> Money {
        self.commission
    }

    /// Final sale price before discounts.
    pub fn sale_price(&self) -> Money {
        self.sale_price
    }

    /// Ledger/catalog key for this product.
    pub fn key(&self) -> ProductKey {
        ProductKey::new(&self.name)
    }

    /// Replaces the purchase cost and recomputes the sale price.
    ///
    /// On error the product is left untouched.
    pub fn set_purchase_cost(&mut self, purchase_cost: Money) -> CoreResult<()> {
        validate_purchase_cost(purchase_cost)?;
        self.sale_price = sale_price_of(purchase_cost, self.commission)?;
        self.purchase_cost = purchase_cost;
        Ok(())
    }

    /// Replaces the commission and recomputes the sale price.
    ///
    /// On error the product is left untouched.
    pub fn set_commission(&mut self, commission: Money) -> CoreResult<()> {
        validate_commission(commission)?;
        self.sale_price = sale_price_of(self.purchase_cost, commission)?;
        self.commission = commission;
        Ok(())
    }
}

fn sale_price_of(purchase_cost: Money, commission: Money) -> CoreResult<Money> {
    purchase_cost
        .checked_add(commission)
        .ok_or_else(|| ValidationError::overflow("sale price"))
}

// =============================================================================
// Unit Tests
// =============================================================================

//! Domain model for the storefront.
//!
//! Products arrive from the catalog feed and are immutable once loaded;
//! everything downstream (cart, preview, order draft) references them by id.
//! A product with no price is "priceless": it is listed in the catalog and
//! can sit in the cart, but it is excluded from any purchase total and makes
//! the whole cart unpurchasable until removed.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Unique identifier for a product, assigned by the server.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a `ProductId` from a string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the inner string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// A price or total in whole currency units.
///
/// The catalog feed carries whole-unit integer prices, so no fractional
/// representation is needed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(pub u64);

impl Money {
    /// Zero amount
    pub const ZERO: Self = Self(0);

    /// Returns the inner amount
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(|m| m.0).sum())
    }
}

/// A purchasable item from the catalog feed.
///
/// Immutable once loaded. `price: None` marks a priceless product.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Server-assigned unique identifier
    pub id: ProductId,
    /// Display title
    pub title: String,
    /// Category label used for card styling
    pub category: String,
    /// Image URL, resolved against the CDN by the transport layer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Long description shown in the detail view
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Price, or `None` for a priceless product
    pub price: Option<Money>,
}

impl Product {
    /// Whether this product has no price
    #[must_use]
    pub const fn is_priceless(&self) -> bool {
        self.price.is_none()
    }
}

/// Payment method chosen on the first checkout step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Payment {
    /// Cash on delivery (the initial selection)
    #[default]
    Cash,
    /// Card payment
    Card,
}

impl fmt::Display for Payment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cash => write!(f, "cash"),
            Self::Card => write!(f, "card"),
        }
    }
}

/// The total of a cart snapshot.
///
/// `Priceless` is the sentinel used when any cart entry has no price: the
/// numeric sum of the remaining entries must not be presented as the total
/// of such a cart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CartTotal {
    /// Every entry is priced; the sum of those prices
    Amount(Money),
    /// At least one entry has no price
    Priceless,
}

impl CartTotal {
    /// Returns the numeric amount, if every entry was priced
    #[must_use]
    pub const fn amount(self) -> Option<Money> {
        match self {
            Self::Amount(m) => Some(m),
            Self::Priceless => None,
        }
    }

    /// Whether this total is the priceless sentinel
    #[must_use]
    pub const fn is_priceless(self) -> bool {
        matches!(self, Self::Priceless)
    }
}

impl Default for CartTotal {
    fn default() -> Self {
        Self::Amount(Money::ZERO)
    }
}

impl fmt::Display for CartTotal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Amount(m) => write!(f, "{m}"),
            Self::Priceless => write!(f, "priceless"),
        }
    }
}

// Serializes as a JSON number, or the string "priceless" for the sentinel.
impl Serialize for CartTotal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Amount(m) => serializer.serialize_u64(m.value()),
            Self::Priceless => serializer.serialize_str("priceless"),
        }
    }
}

/// The accumulating checkout form data before final submission.
///
/// Built incrementally across the two form steps. `items` and `total` are
/// snapshotted from the cart at the transition into checkout, not live-bound
/// to later cart changes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderDraft {
    /// Payment method from step one
    pub payment: Payment,
    /// Delivery address from step one
    pub address: String,
    /// Email from step two
    pub email: String,
    /// Phone from step two
    pub phone: String,
    /// Product ids captured when checkout began
    pub items: Vec<ProductId>,
    /// Cart total captured when checkout began
    pub total: CartTotal,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget(price: Option<u64>) -> Product {
        Product {
            id: ProductId::from("p1"),
            title: "Widget".to_owned(),
            category: "other".to_owned(),
            image: None,
            description: None,
            price: price.map(Money),
        }
    }

    #[test]
    fn product_feed_roundtrip() {
        let json = r#"{"id":"p1","title":"Widget","category":"other","price":100}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product, widget(Some(100)));
        assert!(!product.is_priceless());
    }

    #[test]
    fn null_price_is_priceless() {
        let json = r#"{"id":"p1","title":"Widget","category":"other","price":null}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.is_priceless());
    }

    #[test]
    fn payment_wire_format() {
        assert_eq!(serde_json::to_string(&Payment::Cash).unwrap(), r#""cash""#);
        assert_eq!(serde_json::to_string(&Payment::Card).unwrap(), r#""card""#);
        assert_eq!(Payment::default(), Payment::Cash);
    }

    #[test]
    fn cart_total_serializes_number_or_sentinel() {
        let amount = CartTotal::Amount(Money(250));
        assert_eq!(serde_json::to_string(&amount).unwrap(), "250");

        let priceless = CartTotal::Priceless;
        assert_eq!(serde_json::to_string(&priceless).unwrap(), r#""priceless""#);
    }

    #[test]
    fn money_sums() {
        let total: Money = [Money(100), Money(50)].into_iter().sum();
        assert_eq!(total, Money(150));
    }

    #[test]
    fn draft_starts_empty_with_cash() {
        let draft = OrderDraft::default();
        assert_eq!(draft.payment, Payment::Cash);
        assert!(draft.address.is_empty());
        assert!(draft.items.is_empty());
        assert_eq!(draft.total, CartTotal::Amount(Money::ZERO));
    }
}

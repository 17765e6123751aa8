//! View models and render targets.
//!
//! Render targets are pure sinks: they receive plain data and draw it.
//! All business logic stays on the other side of the trait — a render
//! target's only way to affect state is emitting intent events on the
//! bus. Every model here can be derived from store queries alone, which
//! is what the orchestrator does on each change event.

use shopfront_core::api::OrderReceipt;
use shopfront_core::domain::{CartTotal, Money, OrderDraft, Payment, Product, ProductId};
use shopfront_core::validation::{FormErrors, contacts_step_valid, order_step_valid};

/// What a catalog card renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogItem {
    /// Product id, for emitting select intents
    pub id: ProductId,
    /// Display title
    pub title: String,
    /// Category label
    pub category: String,
    /// Resolved image URL, if any
    pub image: Option<String>,
    /// Price, or `None` for a priceless product
    pub price: Option<Money>,
}

impl From<&Product> for CatalogItem {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            title: product.title.clone(),
            category: product.category.clone(),
            image: product.image.clone(),
            price: product.price,
        }
    }
}

/// What the detail view renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewModel {
    /// The previewed product
    pub product: Product,
    /// Whether it is already in the cart (drives the button label:
    /// add vs. remove)
    pub in_cart: bool,
}

/// One row of the cart panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartRow {
    /// 1-based display position
    pub index: usize,
    /// Product id, for emitting remove intents
    pub id: ProductId,
    /// Display title
    pub title: String,
    /// Price, or `None` for a priceless entry
    pub price: Option<Money>,
}

/// What the cart panel renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartModel {
    /// Rows in insertion order
    pub rows: Vec<CartRow>,
    /// Total to display (the priceless sentinel when any entry has no
    /// price)
    pub total: CartTotal,
    /// Whether the begin-checkout button is enabled: a non-empty,
    /// fully-priced cart
    pub checkout_enabled: bool,
}

impl CartModel {
    /// Derives the cart panel model from the cart contents
    #[must_use]
    pub fn from_cart(cart: &[Product]) -> Self {
        let rows = cart
            .iter()
            .enumerate()
            .map(|(i, p)| CartRow {
                index: i + 1,
                id: p.id.clone(),
                title: p.title.clone(),
                price: p.price,
            })
            .collect::<Vec<_>>();
        let total = if cart.iter().any(Product::is_priceless) {
            CartTotal::Priceless
        } else {
            CartTotal::Amount(cart.iter().filter_map(|p| p.price).sum())
        };
        Self {
            checkout_enabled: !rows.is_empty() && !total.is_priceless(),
            rows,
            total,
        }
    }
}

/// What checkout step one (payment + address) renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderFormModel {
    /// Currently selected payment method
    pub payment: Payment,
    /// Current address input value
    pub address: String,
    /// Error line to display (empty when clear)
    pub errors: String,
    /// Whether the "next" button is enabled
    pub submit_enabled: bool,
}

impl OrderFormModel {
    /// Derives the step-one model from the draft and error mapping
    #[must_use]
    pub fn derive(draft: &OrderDraft, errors: &FormErrors) -> Self {
        Self {
            payment: draft.payment,
            address: draft.address.clone(),
            errors: errors.address.clone(),
            submit_enabled: order_step_valid(draft, errors),
        }
    }
}

/// What checkout step two (contacts) renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactsFormModel {
    /// Current email input value
    pub email: String,
    /// Current phone input value
    pub phone: String,
    /// Error line to display (joined, empty when clear)
    pub errors: String,
    /// Whether the "pay" button is enabled
    pub submit_enabled: bool,
}

impl ContactsFormModel {
    /// Derives the step-two model from the draft and error mapping
    #[must_use]
    pub fn derive(draft: &OrderDraft, errors: &FormErrors) -> Self {
        let mut lines = Vec::new();
        if !errors.email.is_empty() {
            lines.push(errors.email.as_str());
        }
        if !errors.phone.is_empty() {
            lines.push(errors.phone.as_str());
        }
        Self {
            email: draft.email.clone(),
            phone: draft.phone.clone(),
            errors: lines.join("; "),
            submit_enabled: contacts_step_valid(draft, errors),
        }
    }
}

/// The render targets the orchestrator pushes view models into.
///
/// Implementations draw; they hold no business logic and never mutate
/// state except by emitting intent events on the bus.
pub trait RenderTargets: Send + Sync {
    /// Redraws the catalog grid
    fn render_catalog(&self, items: &[CatalogItem]);
    /// Redraws the detail view
    fn render_preview(&self, preview: &PreviewModel);
    /// Redraws the cart panel
    fn render_cart(&self, cart: &CartModel);
    /// Updates the header badge count
    fn render_counter(&self, count: usize);
    /// Redraws checkout step one
    fn render_order_form(&self, form: &OrderFormModel);
    /// Redraws checkout step two
    fn render_contacts_form(&self, form: &ContactsFormModel);
    /// Shows the order confirmation
    fn render_result(&self, receipt: &OrderReceipt);
    /// Locks or unlocks the page behind the modal
    fn set_locked(&self, locked: bool);
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_core::validation::{Field, validate_field};

    fn product(id: &str, price: Option<u64>) -> Product {
        Product {
            id: ProductId::from(id),
            title: format!("Product {id}"),
            category: "other".to_owned(),
            image: None,
            description: None,
            price: price.map(Money),
        }
    }

    #[test]
    fn cart_model_numbers_rows_from_one() {
        let model = CartModel::from_cart(&[product("a", Some(10)), product("b", Some(20))]);
        assert_eq!(model.rows[0].index, 1);
        assert_eq!(model.rows[1].index, 2);
        assert_eq!(model.total, CartTotal::Amount(Money(30)));
        assert!(model.checkout_enabled);
    }

    #[test]
    fn empty_cart_disables_checkout() {
        let model = CartModel::from_cart(&[]);
        assert!(!model.checkout_enabled);
        assert_eq!(model.total, CartTotal::Amount(Money::ZERO));
    }

    #[test]
    fn priceless_entry_disables_checkout_and_hides_sum() {
        let model = CartModel::from_cart(&[product("a", Some(10)), product("b", None)]);
        assert_eq!(model.total, CartTotal::Priceless);
        assert!(!model.checkout_enabled);
    }

    #[test]
    fn order_form_enables_on_filled_address() {
        let draft = OrderDraft {
            address: "Elm Street 7".to_owned(),
            ..OrderDraft::default()
        };
        let errors = validate_field(&draft, Field::Address);
        let model = OrderFormModel::derive(&draft, &errors);
        assert!(model.submit_enabled);
        assert!(model.errors.is_empty());
    }

    #[test]
    fn contacts_form_joins_error_lines() {
        let draft = OrderDraft::default();
        // Force both entries non-empty through the mapping directly; the
        // engine itself never produces two at once under the partial
        // policy.
        let errors = FormErrors {
            email: "Email address is required".to_owned(),
            phone: "Phone number is required".to_owned(),
            ..FormErrors::default()
        };
        let model = ContactsFormModel::derive(&draft, &errors);
        assert_eq!(
            model.errors,
            "Email address is required; Phone number is required"
        );
        assert!(!model.submit_enabled);
    }
}

//! The application state store.
//!
//! [`AppStore`] owns everything the storefront knows: the catalog, the
//! cart, the preview selection, the in-progress order draft, and the
//! current validation errors. Mutators update state and publish exactly
//! the documented change events — no hidden events, no failure modes:
//! every mutator is a total function over its domain (inputs are
//! pre-validated by render targets).
//!
//! The state lock is always released before publishing, so subscribed
//! handlers are free to re-read the store (the change-event contract is
//! "state is now consistent; re-read to render"). Under the
//! run-to-completion handler model this makes every mutator atomic with
//! respect to observers.

use shopfront_core::api::OrderPayload;
use shopfront_core::domain::{CartTotal, Money, OrderDraft, Payment, Product, ProductId};
use shopfront_core::event::AppEvent;
use shopfront_core::event_bus::EventBus;
use shopfront_core::validation::{Field, FormErrors, validate_field};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Everything the storefront knows, as one owned value.
///
/// Exposed read-only through [`AppStore::state`]; mutation goes through
/// the named mutators.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    /// Products currently on offer, replaced wholesale on each fetch
    pub catalog: Vec<Product>,
    /// Cart contents in insertion order, unique by product id
    pub cart: Vec<Product>,
    /// Product currently shown in the detail view
    pub preview: Option<ProductId>,
    /// The accumulating checkout form data
    pub draft: OrderDraft,
    /// Current per-field validation errors
    pub errors: FormErrors,
}

impl AppState {
    /// Sum of the non-null prices of the current cart contents
    #[must_use]
    pub fn cart_total(&self) -> Money {
        self.cart.iter().filter_map(|p| p.price).sum()
    }

    /// The cart total for checkout: the priceless sentinel if any entry
    /// has no price, otherwise the numeric sum
    #[must_use]
    pub fn checkout_total(&self) -> CartTotal {
        if self.cart.iter().any(Product::is_priceless) {
            CartTotal::Priceless
        } else {
            CartTotal::Amount(self.cart_total())
        }
    }
}

/// The central mutable application-state store.
///
/// Constructed once at startup around the session's [`EventBus`] and
/// shared (via `Arc`) with the orchestrator; torn down never during a
/// session. All traffic from render targets is mediated by the bus —
/// nothing calls mutators except orchestrator handlers.
pub struct AppStore {
    bus: Arc<EventBus>,
    state: Mutex<AppState>,
}

impl AppStore {
    /// Creates an empty store publishing on `bus`
    #[must_use]
    pub fn new(bus: Arc<EventBus>) -> Self {
        Self {
            bus,
            state: Mutex::new(AppState::default()),
        }
    }

    /// The bus this store publishes on
    #[must_use]
    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    // Mutators never panic while holding the guard, so a poisoned lock can
    // only come from a panicking `state` closure; recover the data rather
    // than propagate.
    fn lock(&self) -> MutexGuard<'_, AppState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reads the current state through `f`.
    ///
    /// The lock is held only for the duration of the closure; do not call
    /// mutators from inside it.
    pub fn state<T>(&self, f: impl FnOnce(&AppState) -> T) -> T {
        f(&self.lock())
    }

    // ========== Catalog & preview ==========

    /// Replaces the catalog wholesale and publishes `catalog:changed`.
    ///
    /// Racing fetches resolve by last-write-replace: whichever completion
    /// calls this last wins.
    pub fn set_catalog(&self, products: Vec<Product>) {
        let catalog = {
            let mut state = self.lock();
            state.catalog = products;
            state.catalog.clone()
        };
        tracing::debug!(products = catalog.len(), "catalog replaced");
        self.bus.publish(&AppEvent::CatalogChanged { catalog });
    }

    /// Selects `product` for detail view and publishes `preview:changed`
    /// with the full product.
    pub fn set_preview(&self, product: &Product) {
        {
            let mut state = self.lock();
            state.preview = Some(product.id.clone());
        }
        self.bus.publish(&AppEvent::PreviewChanged {
            product: product.clone(),
        });
    }

    // ========== Cart ==========

    /// Appends `product` to the cart unless an entry with the same id is
    /// already present, then publishes `cart:changed`.
    ///
    /// A duplicate add is a no-op for state but still publishes.
    pub fn add_to_cart(&self, product: &Product) {
        let cart = {
            let mut state = self.lock();
            if !state.cart.iter().any(|p| p.id == product.id) {
                state.cart.push(product.clone());
            }
            state.cart.clone()
        };
        self.bus.publish(&AppEvent::CartChanged { cart });
    }

    /// Removes the cart entry with `product`'s id, then publishes
    /// `cart:changed`.
    ///
    /// Removing an absent product is a no-op for state but still
    /// publishes.
    pub fn remove_from_cart(&self, product: &Product) {
        let cart = {
            let mut state = self.lock();
            state.cart.retain(|p| p.id != product.id);
            state.cart.clone()
        };
        self.bus.publish(&AppEvent::CartChanged { cart });
    }

    /// Whether the cart holds an entry with `product`'s id (pure query,
    /// no event)
    #[must_use]
    pub fn is_in_cart(&self, product: &Product) -> bool {
        self.state(|s| s.cart.iter().any(|p| p.id == product.id))
    }

    /// Number of cart entries (pure query, no event)
    #[must_use]
    pub fn cart_count(&self) -> usize {
        self.state(|s| s.cart.len())
    }

    /// Sum of the non-null prices of the cart (pure query, no event)
    #[must_use]
    pub fn cart_total(&self) -> Money {
        self.state(AppState::cart_total)
    }

    /// The checkout total, surfacing the priceless sentinel (pure query,
    /// no event)
    #[must_use]
    pub fn checkout_total(&self) -> CartTotal {
        self.state(AppState::checkout_total)
    }

    // ========== Order draft ==========

    /// Writes the draft's delivery address, revalidates scoped to that
    /// field, and publishes `formErrors:changed` with the full mapping.
    pub fn set_address(&self, value: impl Into<String>) {
        self.set_field(Field::Address, value.into());
    }

    /// Writes the draft's email, revalidates scoped to that field, and
    /// publishes `formErrors:changed` with the full mapping.
    pub fn set_email(&self, value: impl Into<String>) {
        self.set_field(Field::Email, value.into());
    }

    /// Writes the draft's phone, revalidates scoped to that field, and
    /// publishes `formErrors:changed` with the full mapping.
    pub fn set_phone(&self, value: impl Into<String>) {
        self.set_field(Field::Phone, value.into());
    }

    fn set_field(&self, field: Field, value: String) {
        let errors = {
            let mut state = self.lock();
            match field {
                Field::Address => state.draft.address = value,
                Field::Email => state.draft.email = value,
                Field::Phone => state.draft.phone = value,
            }
            state.errors = validate_field(&state.draft, field);
            state.errors.clone()
        };
        self.bus.publish(&AppEvent::FormErrorsChanged { errors });
    }

    /// Writes the draft's payment method.
    ///
    /// Publishes nothing: `payment:changed` is an intent event emitted by
    /// the order form, not a store change notification.
    pub fn set_payment(&self, payment: Payment) {
        self.lock().draft.payment = payment;
    }

    /// Snapshots the cart into the draft's `items` and `total`.
    ///
    /// Called at the transition into checkout; the draft is not
    /// live-bound to later cart changes. Publishes nothing.
    pub fn begin_checkout(&self) {
        let mut state = self.lock();
        state.draft.items = state.cart.iter().map(|p| p.id.clone()).collect();
        state.draft.total = state.checkout_total();
    }

    /// The draft in the shape the transport expects (pure query, no
    /// event)
    #[must_use]
    pub fn order_payload(&self) -> OrderPayload {
        self.state(|s| OrderPayload {
            payment: s.draft.payment,
            address: s.draft.address.clone(),
            email: s.draft.email.clone(),
            phone: s.draft.phone.clone(),
            items: s.draft.items.clone(),
            total: s.draft.total,
        })
    }

    // ========== Reset ==========

    /// Clears preview, cart, draft, and errors back to initial values,
    /// then publishes `counter:changed` followed by `cart:changed` so
    /// dependent views (badge counts, cart panel) resynchronize.
    ///
    /// The catalog is kept. Idempotent: calling twice in a row yields the
    /// same empty state as once.
    pub fn reset(&self) {
        {
            let mut state = self.lock();
            state.preview = None;
            state.cart.clear();
            state.draft = OrderDraft::default();
            state.errors = FormErrors::default();
        }
        tracing::debug!("store reset");
        self.bus.publish(&AppEvent::CounterChanged { count: 0 });
        self.bus.publish(&AppEvent::CartChanged { cart: Vec::new() });
    }
}

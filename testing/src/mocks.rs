//! Mock implementations of the external collaborators.
//!
//! - [`MockStorefrontApi`]: stubbed transport with scriptable results;
//!   records every submitted payload
//! - [`RecordingViews`]: render targets that log every call instead of
//!   drawing
//! - [`EventRecorder`]: an all-events subscriber capturing the name
//!   sequence a scenario produced

use shopfront_core::api::{ApiError, ApiFuture, OrderPayload, OrderReceipt, StorefrontApi};
use shopfront_core::domain::Product;
use shopfront_core::event::EventName;
use shopfront_core::event_bus::{EventBus, Subscription};
use shopfront_runtime::view::{
    CartModel, CatalogItem, ContactsFormModel, OrderFormModel, PreviewModel, RenderTargets,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

fn relock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Stubbed transport with scriptable results.
///
/// Defaults to an empty catalog and a generic receipt; script behavior
/// with the builder methods. Every submitted payload is recorded for
/// assertion.
pub struct MockStorefrontApi {
    catalog: Mutex<Result<Vec<Product>, ApiError>>,
    receipt: Mutex<Result<OrderReceipt, ApiError>>,
    submissions: Mutex<Vec<OrderPayload>>,
}

impl Default for MockStorefrontApi {
    fn default() -> Self {
        Self {
            catalog: Mutex::new(Ok(Vec::new())),
            receipt: Mutex::new(Ok(OrderReceipt {
                id: "order-1".to_owned(),
                total: 0,
            })),
            submissions: Mutex::new(Vec::new()),
        }
    }
}

impl MockStorefrontApi {
    /// A mock answering with an empty catalog and a generic receipt
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the catalog the next fetches resolve to
    #[must_use]
    pub fn with_catalog(self, products: Vec<Product>) -> Self {
        *relock(&self.catalog) = Ok(products);
        self
    }

    /// Scripts fetches to fail
    #[must_use]
    pub fn with_failing_fetch(self, error: ApiError) -> Self {
        *relock(&self.catalog) = Err(error);
        self
    }

    /// Scripts the receipt submissions resolve to
    #[must_use]
    pub fn with_receipt(self, receipt: OrderReceipt) -> Self {
        *relock(&self.receipt) = Ok(receipt);
        self
    }

    /// Scripts submissions to fail
    #[must_use]
    pub fn with_failing_submission(self, error: ApiError) -> Self {
        *relock(&self.receipt) = Err(error);
        self
    }

    /// Every payload submitted so far, in order
    #[must_use]
    pub fn submissions(&self) -> Vec<OrderPayload> {
        relock(&self.submissions).clone()
    }
}

impl StorefrontApi for MockStorefrontApi {
    fn fetch_catalog(&self) -> ApiFuture<'_, Vec<Product>> {
        let result = relock(&self.catalog).clone();
        Box::pin(async move { result })
    }

    fn submit_order(&self, order: OrderPayload) -> ApiFuture<'_, OrderReceipt> {
        relock(&self.submissions).push(order);
        let result = relock(&self.receipt).clone();
        Box::pin(async move { result })
    }
}

/// One recorded render call.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderCall {
    /// Catalog grid redrawn with this many items
    Catalog(Vec<CatalogItem>),
    /// Detail view redrawn
    Preview(PreviewModel),
    /// Cart panel redrawn
    Cart(CartModel),
    /// Badge count updated
    Counter(usize),
    /// Checkout step one redrawn
    OrderForm(OrderFormModel),
    /// Checkout step two redrawn
    ContactsForm(ContactsFormModel),
    /// Confirmation shown
    Result(OrderReceipt),
    /// Page lock toggled
    Locked(bool),
}

/// Render targets that record every call instead of drawing.
#[derive(Default)]
pub struct RecordingViews {
    calls: Mutex<Vec<RenderCall>>,
}

impl RecordingViews {
    /// Fresh recorder with an empty log
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every render call so far, in order
    #[must_use]
    pub fn calls(&self) -> Vec<RenderCall> {
        relock(&self.calls).clone()
    }

    /// The most recent cart render, if any
    #[must_use]
    pub fn last_cart(&self) -> Option<CartModel> {
        relock(&self.calls).iter().rev().find_map(|c| match c {
            RenderCall::Cart(model) => Some(model.clone()),
            _ => None,
        })
    }

    /// The most recent badge count render, if any
    #[must_use]
    pub fn last_counter(&self) -> Option<usize> {
        relock(&self.calls).iter().rev().find_map(|c| match c {
            RenderCall::Counter(count) => Some(*count),
            _ => None,
        })
    }

    /// The most recent step-one render, if any
    #[must_use]
    pub fn last_order_form(&self) -> Option<OrderFormModel> {
        relock(&self.calls).iter().rev().find_map(|c| match c {
            RenderCall::OrderForm(model) => Some(model.clone()),
            _ => None,
        })
    }

    /// The most recent step-two render, if any
    #[must_use]
    pub fn last_contacts_form(&self) -> Option<ContactsFormModel> {
        relock(&self.calls).iter().rev().find_map(|c| match c {
            RenderCall::ContactsForm(model) => Some(model.clone()),
            _ => None,
        })
    }

    /// The most recent confirmation render, if any
    #[must_use]
    pub fn last_result(&self) -> Option<OrderReceipt> {
        relock(&self.calls).iter().rev().find_map(|c| match c {
            RenderCall::Result(receipt) => Some(receipt.clone()),
            _ => None,
        })
    }

    /// The most recent preview render, if any
    #[must_use]
    pub fn last_preview(&self) -> Option<PreviewModel> {
        relock(&self.calls).iter().rev().find_map(|c| match c {
            RenderCall::Preview(model) => Some(model.clone()),
            _ => None,
        })
    }
}

impl RenderTargets for RecordingViews {
    fn render_catalog(&self, items: &[CatalogItem]) {
        relock(&self.calls).push(RenderCall::Catalog(items.to_vec()));
    }

    fn render_preview(&self, preview: &PreviewModel) {
        relock(&self.calls).push(RenderCall::Preview(preview.clone()));
    }

    fn render_cart(&self, cart: &CartModel) {
        relock(&self.calls).push(RenderCall::Cart(cart.clone()));
    }

    fn render_counter(&self, count: usize) {
        relock(&self.calls).push(RenderCall::Counter(count));
    }

    fn render_order_form(&self, form: &OrderFormModel) {
        relock(&self.calls).push(RenderCall::OrderForm(form.clone()));
    }

    fn render_contacts_form(&self, form: &ContactsFormModel) {
        relock(&self.calls).push(RenderCall::ContactsForm(form.clone()));
    }

    fn render_result(&self, receipt: &OrderReceipt) {
        relock(&self.calls).push(RenderCall::Result(receipt.clone()));
    }

    fn set_locked(&self, locked: bool) {
        relock(&self.calls).push(RenderCall::Locked(locked));
    }
}

/// All-events subscriber capturing the sequence of event names.
pub struct EventRecorder {
    names: Arc<Mutex<Vec<EventName>>>,
    _subscription: Subscription,
}

impl EventRecorder {
    /// Attaches a recorder to `bus`
    #[must_use]
    pub fn attach(bus: &EventBus) -> Self {
        let names = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&names);
        let subscription = bus.subscribe_all(move |event| {
            relock(&sink).push(event.name());
        });
        Self {
            names,
            _subscription: subscription,
        }
    }

    /// The recorded names, in publish order
    #[must_use]
    pub fn names(&self) -> Vec<EventName> {
        relock(&self.names).clone()
    }

    /// How many times `name` was published
    #[must_use]
    pub fn count(&self, name: EventName) -> usize {
        relock(&self.names).iter().filter(|n| **n == name).count()
    }

    /// Forgets everything recorded so far
    pub fn clear(&self) {
        relock(&self.names).clear();
    }
}

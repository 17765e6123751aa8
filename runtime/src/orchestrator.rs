//! The render orchestrator.
//!
//! One handler per event, each following the same shape: intent events
//! call a store mutator; change events re-read the store, derive a view
//! model, and push it into a render target. Handlers never mutate state
//! directly — the only state traffic out of a handler is a mutator call
//! or a re-emitted event.
//!
//! Data flow is strictly circular: render target emits an intent event →
//! a handler here calls a store mutator → the store publishes a change
//! event → the handlers here subscribed to that change re-render the
//! affected views from store queries.

use crate::store::AppStore;
use crate::view::{
    CartModel, CatalogItem, ContactsFormModel, OrderFormModel, PreviewModel, RenderTargets,
};
use shopfront_core::api::StorefrontApi;
use shopfront_core::event::{AppEvent, EventName};
use shopfront_core::event_bus::{EventBus, Subscription};
use std::sync::Arc;

/// Fetches the catalog and replaces the store's copy.
///
/// Transport failures are logged and otherwise ignored (log-and-stop).
/// Racing calls resolve by last-write-replace: whichever completion
/// reaches `set_catalog` last wins.
pub async fn refresh_catalog(api: &dyn StorefrontApi, store: &AppStore) {
    match api.fetch_catalog().await {
        Ok(products) => store.set_catalog(products),
        Err(error) => tracing::error!(%error, "catalog fetch failed"),
    }
}

/// The orchestrator's live subscriptions.
///
/// Constructed once at startup with [`Orchestrator::bind`]; dropping it
/// does not detach the handlers (bus subscriptions outlive their tokens
/// by design — the session never tears them down).
pub struct Orchestrator {
    subscriptions: Vec<Subscription>,
}

impl Orchestrator {
    /// Subscribes the full set of handlers.
    ///
    /// `views` receives derived view models; `api` is used only by the
    /// submission handler, which spawns onto the ambient tokio runtime —
    /// `bind` must therefore be called from within one if order
    /// submission will be exercised.
    #[must_use]
    pub fn bind(
        bus: &Arc<EventBus>,
        store: &Arc<AppStore>,
        views: &Arc<dyn RenderTargets>,
        api: &Arc<dyn StorefrontApi>,
    ) -> Self {
        let mut subscriptions = Vec::new();

        // ========== Catalog & preview ==========

        {
            let (store, views, bus_out) = (Arc::clone(store), Arc::clone(views), Arc::clone(bus));
            subscriptions.push(bus.subscribe(EventName::CatalogChanged, move |_| {
                let items: Vec<CatalogItem> =
                    store.state(|s| s.catalog.iter().map(CatalogItem::from).collect());
                views.render_catalog(&items);
                // Cart rows reference catalog products; resynchronize the
                // dependent views after a wholesale replace.
                let cart = store.state(|s| s.cart.clone());
                bus_out.publish(&AppEvent::CartChanged { cart });
            }));
        }

        {
            let store = Arc::clone(store);
            subscriptions.push(bus.subscribe(EventName::ProductSelect, move |event| {
                if let AppEvent::ProductSelect { product } = event {
                    store.set_preview(product);
                }
            }));
        }

        {
            let (store, views) = (Arc::clone(store), Arc::clone(views));
            subscriptions.push(bus.subscribe(EventName::PreviewChanged, move |_| {
                // Rebuild from queries alone; the payload is optional by
                // contract. A stale preview id (catalog replaced since
                // selection) renders nothing.
                let model = store.state(|s| {
                    let id = s.preview.as_ref()?;
                    let product = s.catalog.iter().find(|p| &p.id == id)?.clone();
                    let in_cart = s.cart.iter().any(|p| &p.id == id);
                    Some(PreviewModel { product, in_cart })
                });
                match model {
                    Some(model) => views.render_preview(&model),
                    None => tracing::debug!("preview points at no catalog product; skipped"),
                }
            }));
        }

        // ========== Cart ==========

        {
            let store = Arc::clone(store);
            subscriptions.push(bus.subscribe(EventName::ProductAdd, move |event| {
                if let AppEvent::ProductAdd { product } = event {
                    store.add_to_cart(product);
                }
            }));
        }

        {
            let store = Arc::clone(store);
            subscriptions.push(bus.subscribe(EventName::ProductRemove, move |event| {
                if let AppEvent::ProductRemove { product } = event {
                    store.remove_from_cart(product);
                }
            }));
        }

        {
            let (store, views) = (Arc::clone(store), Arc::clone(views));
            subscriptions.push(bus.subscribe(EventName::CartOpen, move |_| {
                let model = store.state(|s| CartModel::from_cart(&s.cart));
                views.render_cart(&model);
            }));
        }

        {
            let (store, views, bus_out) = (Arc::clone(store), Arc::clone(views), Arc::clone(bus));
            subscriptions.push(bus.subscribe(EventName::CartChanged, move |_| {
                bus_out.publish(&AppEvent::CounterChanged {
                    count: store.cart_count(),
                });
                let model = store.state(|s| CartModel::from_cart(&s.cart));
                views.render_cart(&model);
            }));
        }

        {
            let (store, views) = (Arc::clone(store), Arc::clone(views));
            subscriptions.push(bus.subscribe(EventName::CounterChanged, move |_| {
                views.render_counter(store.cart_count());
            }));
        }

        // ========== Modal ==========

        {
            let views = Arc::clone(views);
            subscriptions.push(bus.subscribe(EventName::ModalOpen, move |_| {
                views.set_locked(true);
            }));
        }

        {
            let views = Arc::clone(views);
            subscriptions.push(bus.subscribe(EventName::ModalClose, move |_| {
                views.set_locked(false);
            }));
        }

        // ========== Checkout ==========

        {
            let (store, views) = (Arc::clone(store), Arc::clone(views));
            subscriptions.push(bus.subscribe(EventName::OrderOpen, move |_| {
                store.begin_checkout();
                let model = store.state(|s| OrderFormModel::derive(&s.draft, &s.errors));
                views.render_order_form(&model);
            }));
        }

        {
            let store = Arc::clone(store);
            subscriptions.push(bus.subscribe(EventName::PaymentChanged, move |event| {
                if let AppEvent::PaymentChanged { payment } = event {
                    store.set_payment(*payment);
                }
            }));
        }

        {
            let store = Arc::clone(store);
            subscriptions.push(bus.subscribe(EventName::AddressChanged, move |event| {
                if let AppEvent::AddressChanged { value } = event {
                    store.set_address(value.clone());
                }
            }));
        }

        {
            let store = Arc::clone(store);
            subscriptions.push(bus.subscribe(EventName::EmailChanged, move |event| {
                if let AppEvent::EmailChanged { value } = event {
                    store.set_email(value.clone());
                }
            }));
        }

        {
            let store = Arc::clone(store);
            subscriptions.push(bus.subscribe(EventName::PhoneChanged, move |event| {
                if let AppEvent::PhoneChanged { value } = event {
                    store.set_phone(value.clone());
                }
            }));
        }

        {
            let (store, views) = (Arc::clone(store), Arc::clone(views));
            subscriptions.push(bus.subscribe(EventName::FormErrorsChanged, move |_| {
                let (order, contacts) = store.state(|s| {
                    (
                        OrderFormModel::derive(&s.draft, &s.errors),
                        ContactsFormModel::derive(&s.draft, &s.errors),
                    )
                });
                views.render_order_form(&order);
                views.render_contacts_form(&contacts);
            }));
        }

        {
            let (store, views) = (Arc::clone(store), Arc::clone(views));
            subscriptions.push(bus.subscribe(EventName::OrderSubmit, move |_| {
                let model = store.state(|s| ContactsFormModel::derive(&s.draft, &s.errors));
                views.render_contacts_form(&model);
            }));
        }

        // ========== Submission ==========

        {
            let (store, views, api) = (Arc::clone(store), Arc::clone(views), Arc::clone(api));
            subscriptions.push(bus.subscribe(EventName::ContactsSubmit, move |_| {
                // Gating (the disabled pay button) is the only guard here;
                // the handler itself does not re-validate the draft.
                let payload = store.order_payload();
                let (store, views, api) =
                    (Arc::clone(&store), Arc::clone(&views), Arc::clone(&api));
                tokio::spawn(async move {
                    match api.submit_order(payload).await {
                        Ok(receipt) => {
                            tracing::info!(order = %receipt.id, total = receipt.total, "order accepted");
                            store.reset();
                            views.render_result(&receipt);
                        }
                        Err(error) => {
                            // Log-and-stop: the draft stays intact for
                            // re-submission.
                            tracing::error!(%error, "order submission failed");
                        }
                    }
                });
            }));
        }

        Self { subscriptions }
    }

    /// Number of live handler subscriptions
    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }
}

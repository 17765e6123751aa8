//! End-to-end orchestrator tests: intent events in, view models out,
//! with the store and bus in between and the transport mocked.

use shopfront_core::api::{ApiError, OrderReceipt, StorefrontApi};
use shopfront_core::domain::{CartTotal, Money, Payment};
use shopfront_core::event::{AppEvent, EventName};
use shopfront_core::event_bus::EventBus;
use shopfront_runtime::orchestrator::{Orchestrator, refresh_catalog};
use shopfront_runtime::store::AppStore;
use shopfront_runtime::view::RenderTargets;
use shopfront_testing::{EventRecorder, MockStorefrontApi, RecordingViews, fixtures};
use std::sync::Arc;
use std::time::Duration;

struct Session {
    bus: Arc<EventBus>,
    store: Arc<AppStore>,
    views: Arc<RecordingViews>,
    api: Arc<MockStorefrontApi>,
    _orchestrator: Orchestrator,
}

fn session(api: MockStorefrontApi) -> Session {
    let bus = Arc::new(EventBus::new());
    let store = Arc::new(AppStore::new(Arc::clone(&bus)));
    let views = Arc::new(RecordingViews::new());
    let api = Arc::new(api);

    let render_targets: Arc<dyn RenderTargets> = Arc::clone(&views) as Arc<dyn RenderTargets>;
    let storefront_api: Arc<dyn StorefrontApi> = Arc::clone(&api) as Arc<dyn StorefrontApi>;
    let orchestrator = Orchestrator::bind(&bus, &store, &render_targets, &storefront_api);

    Session {
        bus,
        store,
        views,
        api,
        _orchestrator: orchestrator,
    }
}

async fn settle<F: Fn() -> bool>(done: F) {
    for _ in 0..100 {
        if done() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached within one second");
}

#[tokio::test]
async fn catalog_fetch_renders_grid_and_resyncs_cart() {
    let session = session(MockStorefrontApi::new().with_catalog(fixtures::sample_catalog()));
    let recorder = EventRecorder::attach(&session.bus);

    refresh_catalog(session.api.as_ref(), &session.store).await;

    let calls = session.views.calls();
    assert!(matches!(
        calls.first(),
        Some(shopfront_testing::RenderCall::Catalog(items)) if items.len() == 3
    ));
    // The catalog handler re-emits cart:changed so dependent views
    // resynchronize after a wholesale replace.
    assert_eq!(recorder.count(EventName::CartChanged), 1);
    assert_eq!(session.views.last_counter(), Some(0));
}

#[tokio::test]
async fn failed_fetch_is_logged_and_leaves_catalog_empty() {
    let session = session(
        MockStorefrontApi::new()
            .with_failing_fetch(ApiError::RequestFailed("connection refused".to_owned())),
    );

    refresh_catalog(session.api.as_ref(), &session.store).await;

    assert!(session.views.calls().is_empty());
    session.store.state(|s| assert!(s.catalog.is_empty()));
}

#[tokio::test]
async fn select_intent_renders_preview_with_cart_flag() {
    let session = session(MockStorefrontApi::new());
    let widget = fixtures::priced("p1", "Widget", 100);
    session.store.set_catalog(vec![widget.clone()]);

    session.bus.publish(&AppEvent::ProductSelect {
        product: widget.clone(),
    });

    let preview = session.views.last_preview().unwrap();
    assert_eq!(preview.product.id, widget.id);
    assert!(!preview.in_cart);

    // Adding then re-selecting flips the flag.
    session.bus.publish(&AppEvent::ProductAdd {
        product: widget.clone(),
    });
    session.bus.publish(&AppEvent::ProductSelect { product: widget });
    assert!(session.views.last_preview().unwrap().in_cart);
}

#[tokio::test]
async fn stale_preview_after_catalog_replace_renders_nothing() {
    let session = session(MockStorefrontApi::new());
    let widget = fixtures::priced("p1", "Widget", 100);
    session.store.set_catalog(vec![widget.clone()]);
    session.store.set_preview(&widget);
    let renders_before = session.views.calls().len();

    // Replace the catalog so the preview id no longer resolves, then
    // nudge the preview handler again.
    session.store.set_catalog(vec![fixtures::priced("p2", "Gadget", 50)]);
    session
        .bus
        .publish(&AppEvent::PreviewChanged { product: widget });

    let previews_after = session
        .views
        .calls()
        .iter()
        .skip(renders_before)
        .filter(|c| matches!(c, shopfront_testing::RenderCall::Preview(_)))
        .count();
    assert_eq!(previews_after, 0);
}

#[tokio::test]
async fn add_intent_updates_cart_panel_and_badge() {
    let session = session(MockStorefrontApi::new());
    let widget = fixtures::priced("p1", "Widget", 100);

    session.bus.publish(&AppEvent::ProductAdd { product: widget });

    let cart = session.views.last_cart().unwrap();
    assert_eq!(cart.rows.len(), 1);
    assert_eq!(cart.total, CartTotal::Amount(Money(100)));
    assert!(cart.checkout_enabled);
    assert_eq!(session.views.last_counter(), Some(1));
}

#[tokio::test]
async fn priceless_cart_disables_checkout_in_the_panel() {
    let session = session(MockStorefrontApi::new());
    session.bus.publish(&AppEvent::ProductAdd {
        product: fixtures::priced("p1", "Widget", 100),
    });
    session.bus.publish(&AppEvent::ProductAdd {
        product: fixtures::priceless("p3", "Heirloom"),
    });

    let cart = session.views.last_cart().unwrap();
    assert_eq!(cart.total, CartTotal::Priceless);
    assert!(!cart.checkout_enabled);
}

#[tokio::test]
async fn modal_events_toggle_the_page_lock() {
    let session = session(MockStorefrontApi::new());

    session.bus.publish(&AppEvent::ModalOpen);
    session.bus.publish(&AppEvent::ModalClose);

    let locks: Vec<bool> = session
        .views
        .calls()
        .iter()
        .filter_map(|c| match c {
            shopfront_testing::RenderCall::Locked(locked) => Some(*locked),
            _ => None,
        })
        .collect();
    assert_eq!(locks, vec![true, false]);
}

#[tokio::test]
async fn checkout_flow_gates_buttons_on_validation() {
    let session = session(MockStorefrontApi::new());
    session.bus.publish(&AppEvent::ProductAdd {
        product: fixtures::priced("p1", "Widget", 100),
    });

    session.bus.publish(&AppEvent::OrderOpen);
    let form = session.views.last_order_form().unwrap();
    assert!(!form.submit_enabled); // address still empty

    session.bus.publish(&AppEvent::PaymentChanged {
        payment: Payment::Card,
    });
    session.bus.publish(&AppEvent::AddressChanged {
        value: "Elm Street 7".to_owned(),
    });
    let form = session.views.last_order_form().unwrap();
    assert!(form.submit_enabled);
    assert_eq!(form.payment, Payment::Card);

    session.bus.publish(&AppEvent::OrderSubmit);
    let contacts = session.views.last_contacts_form().unwrap();
    assert!(!contacts.submit_enabled); // contacts still empty

    session.bus.publish(&AppEvent::EmailChanged {
        value: "a@b.com".to_owned(),
    });
    session.bus.publish(&AppEvent::PhoneChanged {
        value: "+1 555 0100".to_owned(),
    });
    assert!(session.views.last_contacts_form().unwrap().submit_enabled);
}

#[tokio::test]
async fn successful_submission_resets_and_renders_receipt() {
    let api = MockStorefrontApi::new()
        .with_catalog(fixtures::sample_catalog())
        .with_receipt(OrderReceipt {
            id: "order-9".to_owned(),
            total: 100,
        });
    let session = session(api);
    session.store.set_catalog(fixtures::sample_catalog());

    session.bus.publish(&AppEvent::ProductAdd {
        product: fixtures::priced("p1", "Widget", 100),
    });
    session.bus.publish(&AppEvent::OrderOpen);
    session.bus.publish(&AppEvent::PaymentChanged {
        payment: Payment::Card,
    });
    session.bus.publish(&AppEvent::AddressChanged {
        value: "Elm Street 7".to_owned(),
    });
    session.bus.publish(&AppEvent::OrderSubmit);
    session.bus.publish(&AppEvent::EmailChanged {
        value: "a@b.com".to_owned(),
    });
    session.bus.publish(&AppEvent::PhoneChanged {
        value: "+1 555 0100".to_owned(),
    });

    session.bus.publish(&AppEvent::ContactsSubmit);
    let views = Arc::clone(&session.views);
    settle(move || views.last_result().is_some()).await;

    let submissions = session.api.submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].payment, Payment::Card);
    assert_eq!(submissions[0].total, CartTotal::Amount(Money(100)));
    assert_eq!(submissions[0].items.len(), 1);

    assert_eq!(session.views.last_result().unwrap().id, "order-9");
    // Cart and draft cleared atomically on success; catalog survives.
    session.store.state(|s| {
        assert!(s.cart.is_empty());
        assert!(s.draft.items.is_empty());
        assert_eq!(s.catalog.len(), 3);
    });
    assert_eq!(session.views.last_counter(), Some(0));
}

#[tokio::test]
async fn failed_submission_keeps_the_draft_for_retry() {
    let api = MockStorefrontApi::new()
        .with_failing_submission(ApiError::RequestFailed("connection reset".to_owned()));
    let session = session(api);

    session.bus.publish(&AppEvent::ProductAdd {
        product: fixtures::priced("p1", "Widget", 100),
    });
    session.bus.publish(&AppEvent::OrderOpen);
    session.bus.publish(&AppEvent::AddressChanged {
        value: "Elm Street 7".to_owned(),
    });
    session.bus.publish(&AppEvent::EmailChanged {
        value: "a@b.com".to_owned(),
    });
    session.bus.publish(&AppEvent::PhoneChanged {
        value: "+1 555 0100".to_owned(),
    });

    session.bus.publish(&AppEvent::ContactsSubmit);
    let api = Arc::clone(&session.api);
    settle(move || !api.submissions().is_empty()).await;
    // Give the spawned task a moment to finish its error path.
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(session.views.last_result(), None);
    // Log-and-stop: the draft remains intact for re-submission.
    session.store.state(|s| {
        assert_eq!(s.draft.address, "Elm Street 7");
        assert_eq!(s.draft.email, "a@b.com");
        assert_eq!(s.cart.len(), 1);
    });
}

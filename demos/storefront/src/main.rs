//! Console walkthrough of a storefront session.
//!
//! Wires the bus, store, and orchestrator to console render targets and
//! drives a browse → cart → checkout → submit session entirely through
//! intent events, exactly the way DOM render targets would. With
//! `SHOP_API_URL`/`SHOP_CDN_URL` set the real HTTP transport is used;
//! otherwise a small in-process shop stands in.

use shopfront_api::HttpStorefrontApi;
use shopfront_core::api::{ApiFuture, OrderPayload, OrderReceipt, StorefrontApi};
use shopfront_core::domain::{CartTotal, Money, Product, ProductId};
use shopfront_core::event::AppEvent;
use shopfront_core::event_bus::EventBus;
use shopfront_runtime::orchestrator::{Orchestrator, refresh_catalog};
use shopfront_runtime::store::AppStore;
use shopfront_runtime::view::{
    CartModel, CatalogItem, ContactsFormModel, OrderFormModel, PreviewModel, RenderTargets,
};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Render targets that draw to stdout.
struct ConsoleViews;

impl RenderTargets for ConsoleViews {
    fn render_catalog(&self, items: &[CatalogItem]) {
        println!("── catalog ({} items) ──", items.len());
        for item in items {
            match item.price {
                Some(price) => println!("  {} — {}", item.title, price),
                None => println!("  {} — priceless", item.title),
            }
        }
    }

    fn render_preview(&self, preview: &PreviewModel) {
        let action = if preview.in_cart { "remove from" } else { "add to" };
        println!("preview: {} ({action} cart)", preview.product.title);
    }

    fn render_cart(&self, cart: &CartModel) {
        println!("cart: {} rows, total {}", cart.rows.len(), cart.total);
    }

    fn render_counter(&self, count: usize) {
        println!("badge: {count}");
    }

    fn render_order_form(&self, form: &OrderFormModel) {
        println!(
            "order form: payment={}, next {}",
            form.payment,
            if form.submit_enabled { "enabled" } else { "disabled" }
        );
    }

    fn render_contacts_form(&self, form: &ContactsFormModel) {
        println!(
            "contacts form: pay {}",
            if form.submit_enabled { "enabled" } else { "disabled" }
        );
    }

    fn render_result(&self, receipt: &OrderReceipt) {
        println!("order {} accepted, charged {}", receipt.id, receipt.total);
    }

    fn set_locked(&self, locked: bool) {
        println!("page {}", if locked { "locked" } else { "unlocked" });
    }
}

/// In-process stand-in for the remote shop service.
struct DemoShop {
    catalog: Vec<Product>,
}

impl DemoShop {
    fn new() -> Self {
        let product = |id: &str, title: &str, price: Option<u64>| Product {
            id: ProductId::from(id),
            title: title.to_owned(),
            category: "other".to_owned(),
            image: None,
            description: None,
            price: price.map(Money),
        };
        Self {
            catalog: vec![
                product("p1", "Widget", Some(100)),
                product("p2", "Gadget", Some(50)),
                product("p3", "Heirloom", None),
            ],
        }
    }
}

impl StorefrontApi for DemoShop {
    fn fetch_catalog(&self) -> ApiFuture<'_, Vec<Product>> {
        let catalog = self.catalog.clone();
        Box::pin(async move { Ok(catalog) })
    }

    fn submit_order(&self, order: OrderPayload) -> ApiFuture<'_, OrderReceipt> {
        let receipt = OrderReceipt {
            id: "demo-order-1".to_owned(),
            total: match order.total {
                CartTotal::Amount(total) => total.value(),
                CartTotal::Priceless => 0,
            },
        };
        Box::pin(async move { Ok(receipt) })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let bus = Arc::new(EventBus::new());
    let store = Arc::new(AppStore::new(Arc::clone(&bus)));
    let views: Arc<dyn RenderTargets> = Arc::new(ConsoleViews);
    let api: Arc<dyn StorefrontApi> = match HttpStorefrontApi::from_env() {
        Ok(http) => {
            tracing::info!("using HTTP transport");
            Arc::new(http)
        }
        Err(_) => Arc::new(DemoShop::new()),
    };

    let _orchestrator = Orchestrator::bind(&bus, &store, &views, &api);

    println!("=== Storefront session ===\n");
    refresh_catalog(api.as_ref(), &store).await;

    let Some(first) = store.state(|s| s.catalog.first().cloned()) else {
        println!("no products on offer; nothing to demonstrate");
        return Ok(());
    };

    println!("\n-- browsing --");
    bus.publish(&AppEvent::ProductSelect {
        product: first.clone(),
    });
    bus.publish(&AppEvent::ModalOpen);
    bus.publish(&AppEvent::ProductAdd { product: first });
    bus.publish(&AppEvent::ModalClose);

    println!("\n-- checkout --");
    bus.publish(&AppEvent::CartOpen);
    bus.publish(&AppEvent::OrderOpen);
    bus.publish(&AppEvent::AddressChanged {
        value: "Elm Street 7".to_owned(),
    });
    bus.publish(&AppEvent::OrderSubmit);
    bus.publish(&AppEvent::EmailChanged {
        value: "shopper@example.com".to_owned(),
    });
    bus.publish(&AppEvent::PhoneChanged {
        value: "+1 555 0100".to_owned(),
    });

    println!("\n-- submitting --");
    bus.publish(&AppEvent::ContactsSubmit);
    // The submission runs on a spawned task; give it a moment to land.
    tokio::time::sleep(Duration::from_millis(200)).await;

    println!("\n=== Session complete ===");
    Ok(())
}

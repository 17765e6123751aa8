//! # Shopfront Runtime
//!
//! Runtime implementation for the Shopfront architecture.
//!
//! This crate provides the two stateful pieces of the storefront:
//!
//! - **`AppStore`**: the central mutable application-state store; owns
//!   catalog, cart, preview selection, order draft, and validation
//!   errors, and publishes change events on the session's bus
//! - **Orchestrator**: the event handlers that translate intent events
//!   into mutator calls and change events into re-renders, pushing
//!   derived view models into render targets
//!
//! ## Example
//!
//! ```
//! use shopfront_core::{EventBus, Money, Product, ProductId};
//! use shopfront_runtime::AppStore;
//! use std::sync::Arc;
//!
//! let bus = Arc::new(EventBus::new());
//! let store = AppStore::new(Arc::clone(&bus));
//!
//! let widget = Product {
//!     id: ProductId::from("p1"),
//!     title: "Widget".to_owned(),
//!     category: "other".to_owned(),
//!     image: None,
//!     description: None,
//!     price: Some(Money(100)),
//! };
//!
//! store.add_to_cart(&widget);
//! assert_eq!(store.cart_total(), Money(100));
//! ```

/// The render orchestrator: one handler per event
pub mod orchestrator;
/// The central application-state store
pub mod store;
/// View models and render-target traits
pub mod view;

pub use orchestrator::{Orchestrator, refresh_catalog};
pub use store::{AppState, AppStore};
pub use view::{
    CartModel, CartRow, CatalogItem, ContactsFormModel, OrderFormModel, PreviewModel,
    RenderTargets,
};

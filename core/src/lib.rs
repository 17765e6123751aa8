//! # Shopfront Core
//!
//! Core events, domain model, and validation for the Shopfront
//! architecture.
//!
//! This crate provides the hub abstractions for a single-page storefront
//! built around a reactive state/event loop:
//!
//! - **Domain model**: products, cart totals, the order draft
//! - **Events**: a closed set of named events with typed payloads
//! - **Event bus**: a synchronous in-process publish/subscribe dispatcher
//! - **Validation**: pure per-field checkout validation and button gating
//! - **API contract**: the trait and DTOs for the remote shop service
//!
//! ## Architecture Principles
//!
//! - Unidirectional data flow: intent event → store mutator → change
//!   event → re-render from store queries
//! - All cross-component traffic goes through the bus; render targets
//!   never call the store directly
//! - Run-to-completion handlers: every mutation is atomic with respect to
//!   observers
//! - Errors as data: validation failures are strings in the error
//!   mapping, never exceptions
//!
//! ## Example
//!
//! ```
//! use shopfront_core::{AppEvent, EventBus, EventName};
//!
//! let bus = EventBus::new();
//! let _sub = bus.subscribe(EventName::CartOpen, |event| {
//!     assert_eq!(event.name(), EventName::CartOpen);
//! });
//! bus.publish(&AppEvent::CartOpen);
//! ```

/// Transport contract with the remote shop service
pub mod api;
/// Domain model: products, money, cart totals, the order draft
pub mod domain;
/// Event names and typed events
pub mod event;
/// Synchronous in-process publish/subscribe dispatcher
pub mod event_bus;
/// Checkout form validation and button gating
pub mod validation;

pub use api::{ApiError, ApiFuture, ListResponse, OrderPayload, OrderReceipt, StorefrontApi};
pub use domain::{CartTotal, Money, OrderDraft, Payment, Product, ProductId};
pub use event::{AppEvent, EventName};
pub use event_bus::{EventBus, Subscription};
pub use validation::{
    Field, FormErrors, contacts_step_valid, order_step_valid, validate_field,
};

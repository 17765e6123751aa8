//! # Shopfront Testing
//!
//! Testing utilities and helpers for the Shopfront architecture.
//!
//! This crate provides:
//! - Mock implementations of the external collaborators (transport and
//!   render targets)
//! - An all-events recorder for asserting publish sequences
//! - Product fixtures
//! - A fluent Given-When-Then harness for store scenarios
//!
//! ## Example
//!
//! ```
//! use shopfront_core::EventName;
//! use shopfront_testing::{fixtures, StoreTest};
//!
//! let widget = fixtures::priced("p1", "Widget", 100);
//! StoreTest::new()
//!     .when(move |store| store.add_to_cart(&widget))
//!     .then_events(&[EventName::CartChanged])
//!     .then_state(|state| assert_eq!(state.cart.len(), 1))
//!     .run();
//! ```

/// Product fixtures for tests and demos
pub mod fixtures;
/// Mock collaborators and the event recorder
pub mod mocks;

pub use mocks::{EventRecorder, MockStorefrontApi, RecordingViews, RenderCall};
pub use store_test::StoreTest;

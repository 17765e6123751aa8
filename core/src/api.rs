//! Transport contract with the remote shop service.
//!
//! The HTTP client is an external collaborator: core defines the trait and
//! the data shapes it consumes and produces, implementations live in
//! satellite crates (`shopfront-api` for reqwest, `shopfront-testing` for
//! the mock). The store has no knowledge of in-flight requests — calls are
//! fire-and-forget from its perspective, with no cancellation, timeout, or
//! retry in core.
//!
//! # Dyn Compatibility
//!
//! The trait uses explicit `Pin<Box<dyn Future>>` returns instead of
//! `async fn` so it can be held as `Arc<dyn StorefrontApi>` by the
//! orchestrator and captured into spawned submission tasks.

use crate::domain::{CartTotal, Payment, Product, ProductId};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Errors produced by the transport layer.
///
/// Core policy for all of them is log-and-stop: the orchestrator reports
/// the failure and leaves state (including an in-progress draft) intact.
#[derive(Error, Debug, Clone)]
pub enum ApiError {
    /// The request could not be sent or the connection failed
    #[error("request failed: {0}")]
    RequestFailed(String),

    /// The server answered with a non-success status
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body, if readable
        body: String,
    },

    /// The response body could not be decoded
    #[error("failed to decode response: {0}")]
    DecodeFailed(String),

    /// Required client configuration is missing
    #[error("missing configuration: {0}")]
    MissingConfig(&'static str),
}

/// Raw list wrapper used by the catalog feed.
///
/// Core consumes only the normalized `items`; `total` is the feed's own
/// count and is not re-validated.
#[derive(Clone, Debug, Deserialize)]
pub struct ListResponse<T> {
    /// Item count as reported by the server
    pub total: u64,
    /// The items themselves
    pub items: Vec<T>,
}

/// The order shape handed to the transport for submission.
///
/// Field-for-field the order draft: payment method, the three contact
/// fields, the snapshotted item ids, and the snapshotted total (a number,
/// or the `"priceless"` sentinel — submission of a priceless cart is
/// prevented by gating, not by this type).
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct OrderPayload {
    /// Chosen payment method
    pub payment: Payment,
    /// Delivery address
    pub address: String,
    /// Contact email
    pub email: String,
    /// Contact phone
    pub phone: String,
    /// Product ids snapshotted at checkout
    pub items: Vec<ProductId>,
    /// Total snapshotted at checkout
    pub total: CartTotal,
}

/// Successful order confirmation from the server.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct OrderReceipt {
    /// Server-assigned order id
    pub id: String,
    /// Charged total as confirmed by the server
    pub total: u64,
}

/// Boxed future returned by [`StorefrontApi`] methods.
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send + 'a>>;

/// The remote shop service, as seen by the core.
pub trait StorefrontApi: Send + Sync {
    /// Fetches the catalog and resolves it to a normalized product list.
    ///
    /// Two concurrent fetches may race; callers apply last-write-replace
    /// semantics via `set_catalog`.
    fn fetch_catalog(&self) -> ApiFuture<'_, Vec<Product>>;

    /// Submits an order, resolving to the server's confirmation.
    fn submit_order(&self, order: OrderPayload) -> ApiFuture<'_, OrderReceipt>;
}

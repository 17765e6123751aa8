//! # Shopfront API
//!
//! HTTP transport for the Shopfront architecture.
//!
//! Implements the core [`StorefrontApi`](shopfront_core::StorefrontApi)
//! contract with reqwest: catalog fetches resolve the feed's list wrapper
//! to a normalized product sequence (with image paths resolved against
//! the CDN), and order submissions post the draft payload and resolve to
//! the server's `{id, total}` confirmation.
//!
//! ## Example
//!
//! ```no_run
//! use shopfront_api::HttpStorefrontApi;
//! use shopfront_core::StorefrontApi;
//!
//! # async fn example() -> Result<(), shopfront_core::ApiError> {
//! let api = HttpStorefrontApi::new("https://shop.example/api", "https://cdn.example");
//! let catalog = api.fetch_catalog().await?;
//! println!("{} products on offer", catalog.len());
//! # Ok(())
//! # }
//! ```

pub mod client;

pub use client::HttpStorefrontApi;

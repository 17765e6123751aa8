//! HTTP client implementation

use reqwest::{Client, StatusCode};
use shopfront_core::api::{
    ApiError, ApiFuture, ListResponse, OrderPayload, OrderReceipt, StorefrontApi,
};
use shopfront_core::domain::Product;

/// Environment variable holding the shop API base URL
pub const API_URL_VAR: &str = "SHOP_API_URL";
/// Environment variable holding the image CDN prefix
pub const CDN_URL_VAR: &str = "SHOP_CDN_URL";

/// HTTP implementation of the shop service.
///
/// Fetches the catalog from `GET {base_url}/product` (a `{total, items}`
/// list wrapper), resolving relative image paths against the CDN prefix,
/// and posts orders to `POST {base_url}/order`.
#[derive(Clone)]
pub struct HttpStorefrontApi {
    client: Client,
    base_url: String,
    cdn_url: String,
}

impl HttpStorefrontApi {
    /// Creates a client with explicit base and CDN URLs
    #[must_use]
    pub fn new(base_url: impl Into<String>, cdn_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            cdn_url: cdn_url.into(),
        }
    }

    /// Creates a client from `SHOP_API_URL` and `SHOP_CDN_URL`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingConfig`] if either variable is not set.
    pub fn from_env() -> Result<Self, ApiError> {
        let base_url =
            std::env::var(API_URL_VAR).map_err(|_| ApiError::MissingConfig(API_URL_VAR))?;
        let cdn_url =
            std::env::var(CDN_URL_VAR).map_err(|_| ApiError::MissingConfig(CDN_URL_VAR))?;
        Ok(Self::new(base_url, cdn_url))
    }

    fn resolve_image(&self, mut product: Product) -> Product {
        if let Some(path) = product.image.take() {
            product.image = Some(format!("{}{path}", self.cdn_url));
        }
        product
    }

    async fn get_catalog(&self) -> Result<Vec<Product>, ApiError> {
        let response = self
            .client
            .get(format!("{}/product", self.base_url))
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        match response.status() {
            StatusCode::OK => {
                let list = response
                    .json::<ListResponse<Product>>()
                    .await
                    .map_err(|e| ApiError::DecodeFailed(e.to_string()))?;
                Ok(list
                    .items
                    .into_iter()
                    .map(|p| self.resolve_image(p))
                    .collect())
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(ApiError::UnexpectedStatus {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }

    async fn post_order(&self, order: OrderPayload) -> Result<OrderReceipt, ApiError> {
        let response = self
            .client
            .post(format!("{}/order", self.base_url))
            .json(&order)
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        match response.status() {
            StatusCode::OK | StatusCode::CREATED => response
                .json::<OrderReceipt>()
                .await
                .map_err(|e| ApiError::DecodeFailed(e.to_string())),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(ApiError::UnexpectedStatus {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }
}

impl StorefrontApi for HttpStorefrontApi {
    fn fetch_catalog(&self) -> ApiFuture<'_, Vec<Product>> {
        Box::pin(self.get_catalog())
    }

    fn submit_order(&self, order: OrderPayload) -> ApiFuture<'_, OrderReceipt> {
        Box::pin(self.post_order(order))
    }
}

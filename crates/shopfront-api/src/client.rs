use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::retry::{is_retryable_status, with_retry, RetryConfig};

const STORE_API_BASE: &str = "https://fakestoreapi.com";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("API request failed with status {status}: {body}")]
    RequestFailed {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Product not found: {0}")]
    NotFound(u64),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    ParseError(#[from] serde_json::Error),
}

impl StoreError {
    /// Transient failures get handed back to the retry wrapper; the rest
    /// surface to the caller on the first attempt.
    pub fn is_transient(&self) -> bool {
        match self {
            StoreError::RateLimitExceeded => true,
            StoreError::RequestFailed { status, .. } => is_retryable_status(*status),
            StoreError::NetworkError(err) => !err.is_builder() && !err.is_decode(),
            StoreError::NotFound(_) | StoreError::ParseError(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Client for the product catalog endpoint.
///
/// The endpoint is a plain JSON-over-GET API: `/products` returns the whole
/// catalog, `/products/{id}` a single record. No auth, no paging.
#[derive(Clone)]
pub struct StoreClient {
    client: reqwest::Client,
    base_url: String,
    retry_config: RetryConfig,
}

impl StoreClient {
    pub fn new() -> Self {
        Self::with_base_url(STORE_API_BASE)
    }

    /// For self-hosted catalog endpoints
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("Shopfront/0.1.0"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            retry_config: RetryConfig::default(),
        }
    }

    /// Override the default retry policy
    pub fn with_retry_config(mut self, retry_config: RetryConfig) -> Self {
        self.retry_config = retry_config;
        self
    }

    /// Fetch the whole product catalog
    pub async fn fetch_products(&self) -> Result<Vec<ProductRecord>> {
        let url = format!("{}/products", self.base_url);

        with_retry(&self.retry_config, StoreError::is_transient, || async {
            debug!(%url, "fetching product catalog");
            let response = self.client.get(&url).send().await?;
            let status = response.status();

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                return Err(StoreError::RateLimitExceeded);
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(StoreError::RequestFailed { status, body });
            }

            let products: Vec<ProductRecord> = response.json().await?;
            Ok(products)
        })
        .await
    }

    /// Fetch a single product by id
    pub async fn fetch_product(&self, id: u64) -> Result<ProductRecord> {
        let url = format!("{}/products/{}", self.base_url, id);

        with_retry(&self.retry_config, StoreError::is_transient, || async {
            debug!(%url, "fetching product");
            let response = self.client.get(&url).send().await?;
            let status = response.status();

            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(StoreError::NotFound(id));
            }

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                return Err(StoreError::RateLimitExceeded);
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(StoreError::RequestFailed { status, body });
            }

            let product: ProductRecord = response.json().await?;
            Ok(product)
        })
        .await
    }
}

impl Default for StoreClient {
    fn default() -> Self {
        Self::new()
    }
}

/// One product as the endpoint serves it.
///
/// Some deployments omit image or rating; those default instead of failing
/// the whole catalog decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: u64,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub rating: RatingRecord,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RatingRecord {
    pub rate: f64,
    pub count: u64,
}

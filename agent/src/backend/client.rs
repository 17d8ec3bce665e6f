//! HTTP client for the Mission-Pizza REST API

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

use pizza_common::{Order, OrderRequest, OrderResponse, Pizza};

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors talking to the backend
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid base url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("backend returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Typed client over the backend routes
#[derive(Debug, Clone)]
pub struct PizzaApiClient {
    http_client: reqwest::Client,
    base_url: url::Url,
}

impl PizzaApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let mut base_url = url::Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| ApiError::Request {
                url: base_url.to_string(),
                source,
            })?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn url(&self, path: &str) -> Result<url::Url, ApiError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        url: &url::Url,
    ) -> Result<T, ApiError> {
        let response = request.send().await.map_err(|source| ApiError::Request {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!("Backend {} -> {}: {}", url, status, body);
            return Err(ApiError::Status { status, body });
        }

        response.json().await.map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path)?;
        self.send(self.http_client.get(url.clone()), &url).await
    }

    /// `GET /api/pizzas`
    pub async fn list_pizzas(&self) -> Result<Vec<Pizza>, ApiError> {
        self.get("api/pizzas").await
    }

    /// `POST /api/orders`
    pub async fn place_order(&self, order: &OrderRequest) -> Result<OrderResponse, ApiError> {
        let url = self.url("api/orders")?;
        self.send(self.http_client.post(url.clone()).json(order), &url)
            .await
    }

    /// `GET /api/orders`
    pub async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.get("api/orders").await
    }

    /// `GET /api/orders/{order_id}`
    pub async fn track_order(&self, order_id: &str) -> Result<Order, ApiError> {
        let mut url = self.url("api/orders/")?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .push(order_id);
        self.send(self.http_client.get(url.clone()), &url).await
    }

    /// `GET /openapi.json`
    pub async fn fetch_openapi(&self) -> Result<Value, ApiError> {
        self.get("openapi.json").await
    }
}

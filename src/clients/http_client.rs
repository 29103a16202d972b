use async_trait::async_trait;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, error, instrument};

use super::DeliveryBackend;
use crate::domain::{Food, HealthStatus, Order, OrderStatus, Restaurant, User};
use crate::error::RequestError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Per-call overrides for [`HttpBackend::request`].
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Option<Method>,
    pub body: Option<serde_json::Value>,
    pub headers: HeaderMap,
}

impl RequestOptions {
    pub fn put(body: serde_json::Value) -> Self {
        Self {
            method: Some(Method::PUT),
            body: Some(body),
            ..Self::default()
        }
    }
}

/// [`DeliveryBackend`] over HTTP with JSON bodies.
///
/// Requests carry no timeout and are never retried.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Result<Self, RequestError> {
        let parsed = Url::parse(base_url)
            .map_err(|e| RequestError::InvalidEndpoint(format!("{base_url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(RequestError::InvalidEndpoint(format!(
                "{base_url}: unsupported scheme {}",
                parsed.scheme()
            )));
        }

        Ok(Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    #[allow(dead_code)]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a request to `base_url + endpoint` and decode the JSON body.
    ///
    /// Caller headers are applied after the default JSON content type, so they
    /// win on conflict.
    #[instrument(skip(self, options))]
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T, RequestError> {
        let result = self.send(endpoint, options).await;
        if let Err(e) = &result {
            error!(endpoint, error = %e, "API request failed");
        }
        result
    }

    async fn send<T: DeserializeOwned>(&self, endpoint: &str, options: RequestOptions) -> Result<T, RequestError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let method = options.method.unwrap_or(Method::GET);

        let mut builder = self
            .client
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json")
            .headers(options.headers);
        if let Some(body) = &options.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| RequestError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RequestError::Status { status: status.as_u16() });
        }

        debug!(status = status.as_u16(), "Response received");
        response
            .json::<T>()
            .await
            .map_err(|e| RequestError::Decode(e.to_string()))
    }
}

impl_resource_endpoints!(HttpBackend,
    "users" => users, user: User;
    "restaurants" => restaurants, restaurant: Restaurant;
    "foods" => foods, food: Food;
);

#[async_trait]
impl DeliveryBackend for HttpBackend {
    async fn list_users(&self) -> Result<Vec<User>, RequestError> {
        self.fetch_users().await
    }

    async fn get_user(&self, id: u64) -> Result<User, RequestError> {
        self.fetch_user(id).await
    }

    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, RequestError> {
        self.fetch_restaurants().await
    }

    async fn get_restaurant(&self, id: u64) -> Result<Restaurant, RequestError> {
        self.fetch_restaurant(id).await
    }

    async fn list_foods(&self) -> Result<Vec<Food>, RequestError> {
        self.fetch_foods().await
    }

    async fn get_food(&self, id: u64) -> Result<Food, RequestError> {
        self.fetch_food(id).await
    }

    #[instrument(skip(self))]
    async fn list_foods_by_restaurant(&self, restaurant_id: u64) -> Result<Vec<Food>, RequestError> {
        debug!("Sending request");
        self.request(&format!("/foods/restaurant/{restaurant_id}"), RequestOptions::default())
            .await
    }

    #[instrument(skip(self))]
    async fn list_foods_by_category(&self, category: &str) -> Result<Vec<Food>, RequestError> {
        debug!("Sending request");
        let endpoint = format!("/foods/category/{}", urlencoding::encode(category));
        self.request(&endpoint, RequestOptions::default()).await
    }

    #[instrument(skip(self))]
    async fn list_orders(&self) -> Result<Vec<Order>, RequestError> {
        debug!("Sending request");
        self.request("/orders", RequestOptions::default()).await
    }

    #[instrument(skip(self, status), fields(status = %status))]
    async fn update_order_status(&self, order_id: u64, status: &OrderStatus) -> Result<Order, RequestError> {
        debug!("Sending request");
        let options = RequestOptions::put(json!({ "status": status.as_str() }));
        self.request(&format!("/orders/{order_id}/status"), options).await
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<HealthStatus, RequestError> {
        debug!("Sending request");
        self.request("/health", RequestOptions::default()).await
    }
}

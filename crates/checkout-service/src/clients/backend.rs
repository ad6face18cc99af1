use async_trait::async_trait;
use checkout_core::backend::{AuthToken, BackendError, OrderBackend, ProductCatalog};
use checkout_core::model::{CreatedOrder, OrderCreationPayload, Product, ProductId};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// JSON client for the order backend's REST API.
///
/// Every request carries the configured timeout; a request that exceeds it fails with
/// [`BackendError::Transport`].
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// # Errors
    ///
    /// Returns `BackendError::Transport` if the HTTP client fails to build.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(transport)?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_order(
        &self,
        request: reqwest::RequestBuilder,
        payload: &OrderCreationPayload,
    ) -> Result<CreatedOrder, BackendError> {
        let response = request.json(payload).send().await.map_err(transport)?;
        if response.status() != StatusCode::CREATED {
            return Err(status_error(response).await);
        }
        decode(response).await
    }
}

#[async_trait]
impl OrderBackend for BackendClient {
    #[instrument(skip_all, fields(items = payload.items.len()))]
    async fn create_order(
        &self,
        payload: &OrderCreationPayload,
        token: &AuthToken,
    ) -> Result<CreatedOrder, BackendError> {
        debug!("POST /api/orders");
        let request = self
            .client
            .post(self.url("/api/orders"))
            .bearer_auth(token.expose());
        let order = self.post_order(request, payload).await?;
        info!(order_id = %order.id, order_number = %order.order_number, "Order created");
        Ok(order)
    }

    #[instrument(skip_all, fields(items = payload.items.len()))]
    async fn create_guest_order(
        &self,
        payload: &OrderCreationPayload,
    ) -> Result<CreatedOrder, BackendError> {
        debug!("POST /api/orders/guest");
        let request = self.client.post(self.url("/api/orders/guest"));
        let order = self.post_order(request, payload).await?;
        info!(order_id = %order.id, order_number = %order.order_number, "Guest order created");
        Ok(order)
    }

    #[instrument(skip_all)]
    async fn clear_cart(&self, token: &AuthToken) -> Result<(), BackendError> {
        debug!("POST /api/cart/clear");
        let response = self
            .client
            .post(self.url("/api/cart/clear"))
            .bearer_auth(token.expose())
            .send()
            .await
            .map_err(transport)?;

        match response.status() {
            StatusCode::OK | StatusCode::NO_CONTENT => Ok(()),
            _ => Err(status_error(response).await),
        }
    }
}

#[async_trait]
impl ProductCatalog for BackendClient {
    #[instrument(skip(self))]
    async fn get_product(&self, id: ProductId) -> Result<Option<Product>, BackendError> {
        let response = self
            .client
            .get(self.url(&format!("/api/products/{id}")))
            .send()
            .await
            .map_err(transport)?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => decode(response).await.map(Some),
            _ => Err(status_error(response).await),
        }
    }
}

fn transport(e: reqwest::Error) -> BackendError {
    BackendError::Transport(e.to_string())
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, BackendError> {
    response
        .json()
        .await
        .map_err(|e| BackendError::Decode(e.to_string()))
}

async fn status_error(response: reqwest::Response) -> BackendError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    BackendError::Status { status, body }
}

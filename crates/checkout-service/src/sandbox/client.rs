use super::message::{SandboxOrder, SandboxRequest};
use async_trait::async_trait;
use checkout_core::backend::{AuthToken, BackendError, OrderBackend, ProductCatalog};
use checkout_core::model::{CartLine, CreatedOrder, OrderCreationPayload, OrderId, Product, ProductId};
use rust_decimal::Decimal;
use tokio::sync::{mpsc, oneshot};
use tracing::instrument;

/// Handle to the sandbox backend actor. Cheap to clone.
#[derive(Clone)]
pub struct SandboxClient {
    sender: mpsc::Sender<SandboxRequest>,
}

impl SandboxClient {
    pub fn new(sender: mpsc::Sender<SandboxRequest>) -> Self {
        Self { sender }
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<T, BackendError>>) -> SandboxRequest,
    ) -> Result<T, BackendError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| BackendError::Unavailable("sandbox backend closed".to_string()))?;
        response.await.map_err(|_| {
            BackendError::Unavailable("sandbox backend dropped the request".to_string())
        })?
    }

    /// Adds a product to the catalog and returns its id.
    pub async fn add_product(
        &self,
        name: impl Into<String>,
        price: Decimal,
        stock: u32,
    ) -> Result<ProductId, BackendError> {
        let name = name.into();
        self.request(|respond_to| SandboxRequest::AddProduct {
            name,
            price,
            stock,
            respond_to,
        })
        .await
    }

    /// Appends lines to the server-side cart of `token`.
    pub async fn fill_cart(&self, token: &AuthToken, lines: Vec<CartLine>) -> Result<(), BackendError> {
        let token = token.expose().to_string();
        self.request(|respond_to| SandboxRequest::FillCart {
            token,
            lines,
            respond_to,
        })
        .await
    }

    pub async fn cart(&self, token: &AuthToken) -> Result<Vec<CartLine>, BackendError> {
        let token = token.expose().to_string();
        self.request(|respond_to| SandboxRequest::GetCart { token, respond_to })
            .await
    }

    pub async fn order(&self, id: OrderId) -> Result<Option<SandboxOrder>, BackendError> {
        self.request(|respond_to| SandboxRequest::GetOrder { id, respond_to })
            .await
    }

    /// While enabled, every cart clear fails with status 503.
    pub async fn fail_cart_clears(&self, enabled: bool) -> Result<(), BackendError> {
        self.request(|respond_to| SandboxRequest::FailCartClears {
            enabled,
            respond_to,
        })
        .await
    }
}

#[async_trait]
impl OrderBackend for SandboxClient {
    #[instrument(skip_all)]
    async fn create_order(
        &self,
        payload: &OrderCreationPayload,
        token: &AuthToken,
    ) -> Result<CreatedOrder, BackendError> {
        let payload = payload.clone();
        let token = Some(token.expose().to_string());
        self.request(|respond_to| SandboxRequest::CreateOrder {
            payload,
            token,
            respond_to,
        })
        .await
    }

    #[instrument(skip_all)]
    async fn create_guest_order(
        &self,
        payload: &OrderCreationPayload,
    ) -> Result<CreatedOrder, BackendError> {
        let payload = payload.clone();
        self.request(|respond_to| SandboxRequest::CreateOrder {
            payload,
            token: None,
            respond_to,
        })
        .await
    }

    #[instrument(skip_all)]
    async fn clear_cart(&self, token: &AuthToken) -> Result<(), BackendError> {
        let token = token.expose().to_string();
        self.request(|respond_to| SandboxRequest::ClearCart { token, respond_to })
            .await
    }
}

#[async_trait]
impl ProductCatalog for SandboxClient {
    async fn get_product(&self, id: ProductId) -> Result<Option<Product>, BackendError> {
        self.request(|respond_to| SandboxRequest::GetProduct { id, respond_to })
            .await
    }
}

//! Requests understood by the sandbox backend actor.

use checkout_core::backend::BackendError;
use checkout_core::model::{
    CartLine, CreatedOrder, OrderCreationPayload, OrderId, Product, ProductId,
};
use rust_decimal::Decimal;
use tokio::sync::oneshot;

pub type Response<T> = oneshot::Sender<Result<T, BackendError>>;

/// An order as the sandbox stores it: the backend's answer plus what was submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct SandboxOrder {
    pub order: CreatedOrder,
    pub payload: OrderCreationPayload,
    /// `false` for guest orders.
    pub authenticated: bool,
}

#[derive(Debug)]
pub enum SandboxRequest {
    AddProduct {
        name: String,
        price: Decimal,
        stock: u32,
        respond_to: Response<ProductId>,
    },
    GetProduct {
        id: ProductId,
        respond_to: Response<Option<Product>>,
    },
    FillCart {
        token: String,
        lines: Vec<CartLine>,
        respond_to: Response<()>,
    },
    GetCart {
        token: String,
        respond_to: Response<Vec<CartLine>>,
    },
    ClearCart {
        token: String,
        respond_to: Response<()>,
    },
    CreateOrder {
        payload: OrderCreationPayload,
        /// `None` for guest orders.
        token: Option<String>,
        respond_to: Response<CreatedOrder>,
    },
    GetOrder {
        id: OrderId,
        respond_to: Response<Option<SandboxOrder>>,
    },
    /// Makes every following `ClearCart` fail with 503 until switched off.
    FailCartClears {
        enabled: bool,
        respond_to: Response<()>,
    },
}

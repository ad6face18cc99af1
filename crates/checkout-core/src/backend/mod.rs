//! # Order Backend Seams
//!
//! The checkout workflow commits orders through an [`OrderBackend`] and reads product stock
//! through a [`ProductCatalog`]. Both are `async_trait` objects so that the orchestrator can
//! hold them as `Arc<dyn ...>` and tests can swap in the mocks from [`crate::mock`].
//!
//! The shopper's bearer credential is carried as an [`AuthToken`], which never prints its
//! value.

pub mod error;

pub use error::*;

use crate::model::{CreatedOrder, OrderCreationPayload, Product, ProductId};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use std::fmt;

/// Opaque bearer credential of an authenticated shopper.
///
/// The checkout service never inspects it; it is forwarded to the backend as is.
#[derive(Clone)]
pub struct AuthToken(SecretString);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    /// The raw token, for building an `Authorization` header.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken([REDACTED])")
    }
}

impl PartialEq for AuthToken {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

/// The backend that owns carts and orders.
#[async_trait]
pub trait OrderBackend: Send + Sync {
    /// Creates an order on behalf of the shopper identified by `token`.
    async fn create_order(
        &self,
        payload: &OrderCreationPayload,
        token: &AuthToken,
    ) -> Result<CreatedOrder, BackendError>;

    /// Creates an order for a guest; the payload carries the guest email.
    async fn create_guest_order(
        &self,
        payload: &OrderCreationPayload,
    ) -> Result<CreatedOrder, BackendError>;

    /// Empties the server-side cart of the shopper identified by `token`.
    async fn clear_cart(&self, token: &AuthToken) -> Result<(), BackendError>;
}

/// Read access to products and their stock levels.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Returns `Ok(None)` when no product has this id.
    async fn get_product(&self, id: ProductId) -> Result<Option<Product>, BackendError>;
}

use crate::backend::BackendError;
use crate::model::ProductId;
use thiserror::Error;

/// Reasons a cart fails the stock check.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StockError {
    #[error("Product not found: {0}")]
    UnknownProduct(ProductId),

    #[error("Invalid quantity for product {0}: must be at least 1")]
    InvalidQuantity(ProductId),

    #[error("Insufficient stock for {product_name} (product {product_id}): requested {requested}, available {available}")]
    Insufficient {
        product_id: ProductId,
        product_name: String,
        requested: u32,
        available: u32,
    },

    #[error("Stock lookup failed: {0}")]
    Lookup(#[from] BackendError),
}

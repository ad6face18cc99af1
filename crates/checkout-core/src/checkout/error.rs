use crate::address::AddressError;
use crate::backend::BackendError;
use crate::inventory::StockError;
use thiserror::Error;

/// Why a checkout did not produce an order.
///
/// Collaborator errors are wrapped transparently so callers see their messages unchanged.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckoutError {
    #[error(transparent)]
    Validation(#[from] AddressError),

    #[error(transparent)]
    Stock(#[from] StockError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    /// The request was rejected before any collaborator was called.
    #[error("{0}")]
    Precondition(String),
}

impl CheckoutError {
    pub(crate) fn missing_guest_email() -> Self {
        CheckoutError::Precondition("guest_email is required for guest checkout".to_string())
    }
}

/// Cart clearing failed after the order was committed.
///
/// This is never an error of the checkout itself; the order stands.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Order created but cart could not be cleared: {0}")]
pub struct CleanupWarning(pub BackendError);

use thiserror::Error;

/// Errors reported by the order backend or the product catalog.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BackendError {
    /// The request never produced a response (connect failure, timeout, reset).
    #[error("Order backend request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("Order backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The backend answered with a body that could not be decoded.
    #[error("Order backend response could not be decoded: {0}")]
    Decode(String),

    /// The backend is not running.
    #[error("Order backend unavailable: {0}")]
    Unavailable(String),
}

impl BackendError {
    /// HTTP status reported by the backend, if it got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

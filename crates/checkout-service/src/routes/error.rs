//! HTTP error mapping for the checkout API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use checkout_core::CheckoutError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed bearer credential.
    #[error("{0}")]
    Unauthorized(String),

    /// The body is not a valid checkout submission.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::Checkout(CheckoutError::Backend(_)) => StatusCode::BAD_GATEWAY,
            Self::Checkout(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, "Checkout request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "Checkout request rejected");
        }

        let body = match &self {
            Self::InvalidBody(details) => json!({
                "error": "Invalid request body",
                "details": details,
            }),
            Self::Unauthorized(message) => json!({ "error": message }),
            Self::Checkout(e) => json!({ "error": e.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

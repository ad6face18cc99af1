//! # HTTP Surface
//!
//! | Method | Path | Auth | Success |
//! |--------|------|------|---------|
//! | `GET` | `/health` | none | `200 {"status":"healthy","service":"checkout"}` |
//! | `POST` | `/api/checkout/process` | `Authorization: Bearer <token>` | `200` order confirmation |
//! | `POST` | `/api/guest-checkout/process` | none | `200` order confirmation |
//!
//! Failures are JSON `{"error": ...}` bodies: `401` for a missing credential, `400` for a
//! malformed body or a validation, stock or precondition failure, `502` when the order
//! backend fails. See [`ApiError`].

pub mod auth;
pub mod checkout;
pub mod error;

pub use auth::BearerToken;
pub use error::ApiError;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use checkout_core::CheckoutService;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

#[derive(Clone)]
pub struct AppState {
    pub checkout: CheckoutService,
}

pub fn router(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(checkout::health))
        .route("/api/checkout/process", post(checkout::process_checkout))
        .route(
            "/api/guest-checkout/process",
            post(checkout::process_guest_checkout),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors(allowed_origins))
        .with_state(state)
}

fn cors(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

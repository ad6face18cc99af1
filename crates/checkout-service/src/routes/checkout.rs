use super::auth::BearerToken;
use super::error::ApiError;
use super::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use checkout_core::model::{CheckoutSubmission, OrderConfirmation};
use serde_json::{json, Value};
use tracing::info;

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy", "service": "checkout" }))
}

pub async fn process_checkout(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    body: Result<Json<CheckoutSubmission>, JsonRejection>,
) -> Result<Json<OrderConfirmation>, ApiError> {
    let Json(submission) = body.map_err(|e| ApiError::InvalidBody(e.body_text()))?;

    let outcome = state.checkout.process_checkout(&submission, &token).await?;
    if let Some(warning) = outcome.warning() {
        info!(order_number = %outcome.confirmation.order_number, %warning, "Order placed with cleanup warning");
    }
    Ok(Json(outcome.confirmation))
}

pub async fn process_guest_checkout(
    State(state): State<AppState>,
    body: Result<Json<CheckoutSubmission>, JsonRejection>,
) -> Result<Json<OrderConfirmation>, ApiError> {
    let Json(submission) = body.map_err(|e| ApiError::InvalidBody(e.body_text()))?;

    let outcome = state.checkout.process_guest_checkout(&submission).await?;
    Ok(Json(outcome.confirmation))
}

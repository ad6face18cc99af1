//! # Checkout Service
//!
//! The runnable side of the checkout workflow: configuration, HTTP collaborators, an in-memory
//! sandbox backend and the axum API, all wired around [`checkout_core::CheckoutService`].
//!
//! ## 🚀 Components
//!
//! - **[config]**: [`CheckoutConfig`](config::CheckoutConfig) loaded from the environment.
//! - **[clients]**: reqwest implementations of the order backend, product catalog and address validator.
//! - **[sandbox]**: An actor-based, in-memory order backend for demos and tests.
//! - **[lifecycle]**: [`CheckoutSystem`](lifecycle::CheckoutSystem), which wires and shuts everything down.
//! - **[routes]**: The HTTP endpoints and their error mapping.
//!
//! ## 📚 Binaries
//!
//! - `checkout-service` serves the API against the configured order backend.
//! - `checkout-demo` runs an authenticated and a guest checkout against the sandbox.

pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod routes;
pub mod sandbox;

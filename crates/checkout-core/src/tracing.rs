//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the `tracing-subscriber` used by every binary in the workspace.
//! Log levels come from `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=info cargo run --bin checkout-demo    # stage timings and outcomes
//! RUST_LOG=debug cargo run --bin checkout-demo   # plus full order payloads
//! ```
//!
//! ## What Gets Traced
//!
//! - **Checkout entry points**: one span per checkout (`process_checkout` / `process_guest_checkout`)
//!   with the checkout kind and the number of cart lines.
//! - **Stages**: one event per finished stage with `elapsed_ms`, emitted by
//!   [`TracingObserver`](crate::checkout::TracingObserver). Failed and absorbed stages log at `WARN`.
//! - **Collaborators**: HTTP clients and the sandbox backend log each call at `DEBUG`/`INFO`.
//!
//! With `RUST_LOG=info` a successful authenticated checkout reads:
//!
//! ```text
//! INFO process_checkout: Checkout stage finished kind=authenticated stage=address_validating elapsed_ms=0.41
//! INFO process_checkout: Checkout stage finished kind=authenticated stage=inventory_checking elapsed_ms=0.12
//! INFO process_checkout: Checkout stage finished kind=authenticated stage=order_submitting elapsed_ms=0.09
//! INFO process_checkout: Checkout stage finished kind=authenticated stage=cart_clearing elapsed_ms=0.05
//! INFO process_checkout: Checkout stage finished kind=authenticated stage=completed elapsed_ms=0.71
//! INFO process_checkout: Checkout completed order_id=1 order_number="ORD-0001"
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}

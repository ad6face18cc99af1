//! # Checkout Core
//!
//! The order-checkout workflow, independent of any transport. A [`CheckoutSubmission`](model::CheckoutSubmission)
//! goes in, an [`OrderConfirmation`](model::OrderConfirmation) comes out, and in between the
//! [`CheckoutService`](checkout::CheckoutService) drives four collaborators it only knows by trait.
//!
//! ## 🚀 Core Components
//!
//! - **[model]**: Request-scoped data: addresses, cart lines, submissions, order payloads.
//! - **[transform]**: The pure mapping from a submission to an order-creation payload.
//! - **[checkout]**: The orchestrator, its error type and the stage state machine.
//! - **[address]**, **[inventory]**, **[backend]**: Collaborator traits and their errors, plus the
//!   local address rules and the catalog-backed inventory checker.
//!
//! ## 🔀 Workflow
//!
//! ```text
//! caller -> CheckoutService -> AddressValidator (shipping, billing if different)
//!                           -> InventoryChecker (all lines, one call)
//!                           -> to_order_payload
//!                           -> OrderBackend::create_order / create_guest_order
//!                           -> OrderBackend::clear_cart (authenticated only, best effort)
//! ```
//!
//! ## 🧪 Testing
//!
//! See [`mock`] for expectation-queue mocks of every collaborator.

pub mod address;
pub mod backend;
pub mod checkout;
pub mod inventory;
pub mod mock;
pub mod model;
pub mod tracing;
pub mod transform;

pub use checkout::{CartCleanup, CheckoutError, CheckoutOutcome, CheckoutService};

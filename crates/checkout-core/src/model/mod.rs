//! Pure data structures (DTOs) that flow through the checkout workflow.
//!
//! Everything here is request-scoped: a [`CheckoutSubmission`] arrives, is turned into an
//! [`OrderCreationPayload`], and the backend's [`CreatedOrder`] comes back re-keyed as an
//! [`OrderConfirmation`]. Nothing is persisted.

pub mod address;
pub mod cart;
pub mod order;
pub mod product;
pub mod submission;

pub use address::*;
pub use cart::*;
pub use order::*;
pub use product::*;
pub use submission::*;

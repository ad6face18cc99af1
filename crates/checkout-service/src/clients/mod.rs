//! HTTP implementations of the checkout collaborators.

pub mod address;
pub mod backend;

pub use address::HttpAddressValidator;
pub use backend::BackendClient;

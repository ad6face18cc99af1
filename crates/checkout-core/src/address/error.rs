//! Error types for address validation.

use thiserror::Error;

/// Reasons an address fails validation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AddressError {
    /// A required field is empty.
    #[error("Address field is required: {0}")]
    MissingField(&'static str),

    /// A field is present but violates a length rule.
    #[error("Invalid address field {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// The remote validation service judged the address undeliverable.
    #[error("Address rejected: {0}")]
    Rejected(String),

    /// The remote validation service could not be reached or answered with an error.
    #[error("Address validator unavailable: {0}")]
    Unavailable(String),
}

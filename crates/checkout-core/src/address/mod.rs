//! Address validation: the collaborator seam and the local field rules.

pub mod error;

pub use error::*;

use crate::model::Address;
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Validates one address at a time.
///
/// Implementations own their own timeout behavior; the orchestrator awaits the call as is.
#[async_trait]
pub trait AddressValidator: Send + Sync {
    async fn validate(&self, address: &Address) -> Result<(), AddressError>;
}

/// (field, value, min chars, max chars)
type Rule<'a> = (&'static str, &'a str, usize, usize);

/// Checks an address against the field rules the order backend enforces.
///
/// Lengths are measured in characters after trimming surrounding whitespace.
pub fn check_fields(address: &Address) -> Result<(), AddressError> {
    let required: [Rule<'_>; 7] = [
        ("first_name", &address.first_name, 1, 100),
        ("last_name", &address.last_name, 1, 100),
        ("address_line1", &address.address_line1, 1, 200),
        ("city", &address.city, 1, 100),
        ("state", &address.state, 2, 50),
        ("zip_code", &address.zip_code, 5, 20),
        ("country", &address.country, 1, 50),
    ];

    for (field, value, min, max) in required {
        let len = value.trim().chars().count();
        if len == 0 {
            return Err(AddressError::MissingField(field));
        }
        check_length(field, len, min, max)?;
    }

    let optional = [
        ("address_line2", address.address_line2.as_deref(), 200),
        ("phone", address.phone.as_deref(), 20),
    ];

    for (field, value, max) in optional {
        if let Some(value) = value {
            check_length(field, value.trim().chars().count(), 0, max)?;
        }
    }

    Ok(())
}

fn check_length(field: &'static str, len: usize, min: usize, max: usize) -> Result<(), AddressError> {
    if len < min {
        return Err(AddressError::InvalidField {
            field,
            reason: format!("must be at least {min} characters"),
        });
    }
    if len > max {
        return Err(AddressError::InvalidField {
            field,
            reason: format!("must be at most {max} characters"),
        });
    }
    Ok(())
}

/// Validator that applies only [`check_fields`], with no remote lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalAddressValidator;

#[async_trait]
impl AddressValidator for LocalAddressValidator {
    #[instrument(skip_all)]
    async fn validate(&self, address: &Address) -> Result<(), AddressError> {
        debug!(city = %address.city, country = %address.country, "Checking address fields");
        check_fields(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Address {
        Address {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            address_line1: "1 Compiler Way".to_string(),
            address_line2: None,
            city: "Arlington".to_string(),
            state: "VA".to_string(),
            zip_code: "22201".to_string(),
            country: "USA".to_string(),
            phone: None,
        }
    }

    #[test]
    fn test_valid_address_passes() {
        assert_eq!(check_fields(&valid()), Ok(()));
    }

    #[test]
    fn test_blank_field_is_missing() {
        let mut address = valid();
        address.city = "   ".to_string();
        assert_eq!(check_fields(&address), Err(AddressError::MissingField("city")));
    }

    #[test]
    fn test_empty_address_reports_first_field() {
        assert_eq!(
            check_fields(&Address::default()),
            Err(AddressError::MissingField("first_name"))
        );
    }

    #[test]
    fn test_short_zip_code_is_invalid() {
        let mut address = valid();
        address.zip_code = "123".to_string();
        assert!(matches!(
            check_fields(&address),
            Err(AddressError::InvalidField { field: "zip_code", .. })
        ));
    }

    #[test]
    fn test_single_letter_state_is_invalid() {
        let mut address = valid();
        address.state = "V".to_string();
        assert!(matches!(
            check_fields(&address),
            Err(AddressError::InvalidField { field: "state", .. })
        ));
    }

    #[test]
    fn test_long_optional_phone_is_invalid() {
        let mut address = valid();
        address.phone = Some("0".repeat(21));
        assert!(matches!(
            check_fields(&address),
            Err(AddressError::InvalidField { field: "phone", .. })
        ));
    }

    #[tokio::test]
    async fn test_local_validator_applies_rules() {
        let validator = LocalAddressValidator;
        assert!(validator.validate(&valid()).await.is_ok());
        assert!(validator.validate(&Address::default()).await.is_err());
    }
}

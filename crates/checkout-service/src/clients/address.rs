use async_trait::async_trait;
use checkout_core::address::{check_fields, AddressError, AddressValidator};
use checkout_core::model::Address;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

#[derive(Debug, Deserialize)]
struct ValidationResponse {
    valid: bool,
    #[serde(default)]
    reason: Option<String>,
}

/// Address validator backed by a remote validation service.
///
/// The local field rules run first, so a malformed address never costs a round trip.
#[derive(Debug, Clone)]
pub struct HttpAddressValidator {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAddressValidator {
    /// # Errors
    ///
    /// Returns `AddressError::Unavailable` if the HTTP client fails to build.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AddressError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AddressError::Unavailable(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl AddressValidator for HttpAddressValidator {
    #[instrument(skip_all, fields(country = %address.country))]
    async fn validate(&self, address: &Address) -> Result<(), AddressError> {
        check_fields(address)?;

        debug!("POST /validate");
        let response = self
            .client
            .post(format!("{}/validate", self.base_url))
            .json(address)
            .send()
            .await
            .map_err(|e| AddressError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AddressError::Unavailable(format!(
                "validator returned status {}",
                status.as_u16()
            )));
        }

        let verdict: ValidationResponse = response
            .json()
            .await
            .map_err(|e| AddressError::Unavailable(e.to_string()))?;

        if verdict.valid {
            Ok(())
        } else {
            Err(AddressError::Rejected(verdict.reason.unwrap_or_else(|| {
                "address could not be verified".to_string()
            })))
        }
    }
}

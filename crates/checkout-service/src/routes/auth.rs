use super::error::ApiError;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use checkout_core::backend::AuthToken;

/// The caller's bearer credential, taken from the `Authorization` header.
///
/// Only the header shape is checked here. The order backend verifies the token itself.
#[derive(Debug, Clone)]
pub struct BearerToken(pub AuthToken);

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| ApiError::Unauthorized("Authorization header required".to_string()))?;

        let token = header
            .to_str()
            .ok()
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                ApiError::Unauthorized("Invalid authorization header format".to_string())
            })?;

        Ok(Self(AuthToken::new(token)))
    }
}

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;

pub const SESSION_HEADER: &str = "x-session-token";

/// Bearer token from the `x-session-token` header.
///
/// Only presence is checked here; the token is resolved to a user against the
/// document loaded for the operation itself.
pub struct SessionToken(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for SessionToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(SESSION_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                tracing::warn!("missing session token");
                AppError::unauthorized()
            })?;

        Ok(SessionToken(token.to_string()))
    }
}

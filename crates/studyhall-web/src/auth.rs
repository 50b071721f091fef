use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use studyhall_core::UserContext;

use crate::error::ApiError;

/// The verified identity a request acts as, read from the `x-user-id`
/// header set by the authenticating reverse proxy. Requests without one
/// are rejected before any handler runs.
pub struct Identity(pub UserContext);

impl<S: Send + Sync> FromRequestParts<S> for Identity {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        let ctx = UserContext::new(value).map_err(|_| ApiError::unauthorized())?;
        Ok(Self(ctx))
    }
}

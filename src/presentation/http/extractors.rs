//! Custom Extractors
//!
//! Axum extractors for identity and request parsing.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::shared::error::AppError;
use crate::shared::sanitize;

/// Caller identity asserted via the `user` header.
///
/// The value is sanitized like every other free-text field, so lookups and
/// ownership checks always compare normalized names. A missing, unreadable,
/// or markup-only header is treated as an unknown caller.
#[derive(Debug, Clone)]
pub struct UserIdentity(pub String);

impl<S> FromRequestParts<S> for UserIdentity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let name = parts
            .headers
            .get("user")
            .and_then(|value| value.to_str().ok())
            .map(sanitize::clean)
            .unwrap_or_default();

        if name.is_empty() {
            return Err(AppError::NotFound("Missing user header".into()));
        }

        Ok(UserIdentity(name))
    }
}

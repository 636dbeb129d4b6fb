//! Request DTOs
//!
//! Data structures for API request bodies. Field-shape validation happens
//! here via `validator`; normalized (post-sanitize) rules are re-checked by
//! the services, since stripping markup can empty a field that passed the
//! raw length check.

use serde::Deserialize;
use validator::Validate;

/// Join request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateParticipantRequest {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
}

/// Post or edit message request
#[derive(Debug, Deserialize, Validate)]
pub struct SendMessageRequest {
    #[validate(length(min = 1, message = "Recipient must not be empty"))]
    pub to: String,

    #[validate(length(min = 1, message = "Text must not be empty"))]
    pub text: String,

    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Type must not be empty"))]
    pub kind: String,
}

/// Message listing query parameters
#[derive(Debug, Deserialize)]
pub struct MessagesQuery {
    /// Kept as a raw string so a malformed value surfaces as a validation
    /// failure instead of a query rejection.
    pub limit: Option<String>,
}

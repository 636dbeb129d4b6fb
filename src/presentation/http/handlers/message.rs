//! Message Handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::application::dto::request::{MessagesQuery, SendMessageRequest};
use crate::application::dto::response::MessageResponse;
use crate::application::services::{MessageError, MessageService, MessageServiceImpl};
use crate::infrastructure::metrics;
use crate::presentation::http::extractors::UserIdentity;
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

/// Post a message
pub async fn post_message(
    State(state): State<AppState>,
    UserIdentity(user): UserIdentity,
    Json(body): Json<SendMessageRequest>,
) -> Result<StatusCode, AppError> {
    body.validate().map_err(validation_error)?;

    let service = MessageServiceImpl::new(state.messages.clone(), state.participants.clone());

    let message = service
        .post(&user, &body.to, &body.text, &body.kind)
        .await
        .map_err(map_message_error)?;
    metrics::MESSAGES_POSTED_TOTAL
        .with_label_values(&[message.kind.as_str()])
        .inc();

    Ok(StatusCode::CREATED)
}

/// List messages visible to the caller
pub async fn get_messages(
    State(state): State<AppState>,
    UserIdentity(user): UserIdentity,
    Query(query): Query<MessagesQuery>,
) -> Result<Json<Vec<MessageResponse>>, AppError> {
    // A missing or malformed limit is a validation failure; the service
    // rejects non-positive values.
    let limit: i64 = query
        .limit
        .as_deref()
        .and_then(|raw| raw.parse().ok())
        .ok_or_else(|| AppError::Validation("Limit must be a positive integer".into()))?;

    let service = MessageServiceImpl::new(state.messages.clone(), state.participants.clone());

    let messages = service
        .list_visible_to(&user, limit)
        .await
        .map_err(map_message_error)?;

    let responses: Vec<MessageResponse> =
        messages.into_iter().map(MessageResponse::from).collect();

    Ok(Json(responses))
}

/// Edit a message (author only)
pub async fn edit_message(
    State(state): State<AppState>,
    UserIdentity(user): UserIdentity,
    Path(id): Path<String>,
    Json(body): Json<SendMessageRequest>,
) -> Result<StatusCode, AppError> {
    body.validate().map_err(validation_error)?;
    let id = parse_message_id(&id)?;

    let service = MessageServiceImpl::new(state.messages.clone(), state.participants.clone());

    service
        .edit(id, &user, &body.to, &body.text, &body.kind)
        .await
        .map_err(map_message_error)?;

    Ok(StatusCode::OK)
}

/// Delete a message (author only)
pub async fn delete_message(
    State(state): State<AppState>,
    UserIdentity(user): UserIdentity,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_message_id(&id)?;

    let service = MessageServiceImpl::new(state.messages.clone(), state.participants.clone());

    service
        .delete(id, &user)
        .await
        .map_err(map_message_error)?;

    Ok(StatusCode::OK)
}

/// An id that does not parse cannot address any message.
fn parse_message_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound("Message not found".into()))
}

fn map_message_error(e: MessageError) -> AppError {
    match e {
        // Unregistered senders surface as 422 on this endpoint, matching
        // the endpoint contract rather than the generic ownership rule.
        MessageError::EmptyRecipient
        | MessageError::EmptyBody
        | MessageError::InvalidKind
        | MessageError::InvalidLimit
        | MessageError::UnknownSender => AppError::Validation(e.to_string()),
        MessageError::NotFound => AppError::NotFound(e.to_string()),
        MessageError::NotOwner => AppError::Unauthorized(e.to_string()),
        MessageError::Internal(msg) => AppError::Internal(msg),
    }
}

//! Participant Handlers

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::application::dto::request::CreateParticipantRequest;
use crate::application::dto::response::ParticipantResponse;
use crate::application::services::{PresenceError, PresenceService, PresenceServiceImpl};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

/// Join the room
pub async fn join(
    State(state): State<AppState>,
    Json(body): Json<CreateParticipantRequest>,
) -> Result<StatusCode, AppError> {
    body.validate().map_err(validation_error)?;

    let service = PresenceServiceImpl::new(state.participants.clone(), state.messages.clone());

    service.join(&body.name).await.map_err(map_presence_error)?;
    metrics::PARTICIPANTS_JOINED_TOTAL.inc();

    Ok(StatusCode::CREATED)
}

/// List current participants
pub async fn list_participants(
    State(state): State<AppState>,
) -> Result<Json<Vec<ParticipantResponse>>, AppError> {
    let service = PresenceServiceImpl::new(state.participants.clone(), state.messages.clone());

    let participants = service.list().await.map_err(map_presence_error)?;

    let responses: Vec<ParticipantResponse> = participants
        .into_iter()
        .map(ParticipantResponse::from)
        .collect();

    Ok(Json(responses))
}

pub(super) fn map_presence_error(e: PresenceError) -> AppError {
    match e {
        PresenceError::EmptyName => AppError::Validation(e.to_string()),
        PresenceError::NameTaken => AppError::Conflict(e.to_string()),
        PresenceError::NotFound => AppError::NotFound(e.to_string()),
        PresenceError::Internal(msg) => AppError::Internal(msg),
    }
}

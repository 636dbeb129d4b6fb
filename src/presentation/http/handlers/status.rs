//! Status (Heartbeat) Handler

use axum::{extract::State, http::StatusCode};

use crate::application::services::{PresenceService, PresenceServiceImpl};
use crate::presentation::http::extractors::UserIdentity;
use crate::shared::error::AppError;
use crate::startup::AppState;

use super::participant::map_presence_error;

/// Refresh the caller's heartbeat
pub async fn heartbeat(
    State(state): State<AppState>,
    UserIdentity(user): UserIdentity,
) -> Result<StatusCode, AppError> {
    let service = PresenceServiceImpl::new(state.participants.clone(), state.messages.clone());

    service.heartbeat(&user).await.map_err(map_presence_error)?;

    Ok(StatusCode::OK)
}

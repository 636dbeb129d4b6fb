//! Presence Service
//!
//! Tracks who is in the room: join, heartbeat, and listing.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{Message, MessageRepository, Participant, ParticipantRepository};
use crate::shared::sanitize;

/// Presence service trait
#[async_trait]
pub trait PresenceService: Send + Sync {
    /// Register a participant and announce the arrival to the room.
    async fn join(&self, name: &str) -> Result<(), PresenceError>;

    /// Refresh a participant's heartbeat. Exact-name lookup only.
    async fn heartbeat(&self, name: &str) -> Result<(), PresenceError>;

    /// All current participants.
    async fn list(&self) -> Result<Vec<Participant>, PresenceError>;
}

/// Presence service errors
#[derive(Debug, thiserror::Error)]
pub enum PresenceError {
    #[error("Participant name must not be empty")]
    EmptyName,

    #[error("Participant name already in use")]
    NameTaken,

    #[error("Participant not found")]
    NotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// PresenceService implementation
pub struct PresenceServiceImpl {
    participants: Arc<dyn ParticipantRepository>,
    messages: Arc<dyn MessageRepository>,
}

impl PresenceServiceImpl {
    pub fn new(
        participants: Arc<dyn ParticipantRepository>,
        messages: Arc<dyn MessageRepository>,
    ) -> Self {
        Self {
            participants,
            messages,
        }
    }
}

#[async_trait]
impl PresenceService for PresenceServiceImpl {
    async fn join(&self, name: &str) -> Result<(), PresenceError> {
        let name = sanitize::clean(name);
        if name.is_empty() {
            return Err(PresenceError::EmptyName);
        }

        // Case-insensitive duplicate check: "Bob" and "bob" are the same
        // identity. Check-then-insert, so two simultaneous joins of the same
        // name can both pass; accepted best-effort behavior.
        let existing = self
            .participants
            .find_by_name_case_insensitive(&name)
            .await
            .map_err(|e| PresenceError::Internal(e.to_string()))?;
        if existing.is_some() {
            return Err(PresenceError::NameTaken);
        }

        self.participants
            .create(&Participant::new(name.clone()))
            .await
            .map_err(|e| PresenceError::Internal(e.to_string()))?;

        self.messages
            .create(&Message::join_notice(&name))
            .await
            .map_err(|e| PresenceError::Internal(e.to_string()))?;

        tracing::debug!(name = %name, "Participant joined");
        Ok(())
    }

    async fn heartbeat(&self, name: &str) -> Result<(), PresenceError> {
        // Exact-match by design: the caller asserts an identity and only
        // that identity's document is refreshed, never a case-variant.
        self.participants
            .touch(name, Utc::now())
            .await
            .map_err(|e| match e {
                crate::shared::AppError::NotFound(_) => PresenceError::NotFound,
                other => PresenceError::Internal(other.to_string()),
            })
    }

    async fn list(&self) -> Result<Vec<Participant>, PresenceError> {
        self.participants
            .list()
            .await
            .map_err(|e| PresenceError::Internal(e.to_string()))
    }
}

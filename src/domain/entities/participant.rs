//! Participant entity and repository trait.
//!
//! Maps to the `participants` collection in the document store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// A participant currently present in the room.
///
/// Lifecycle: created on join, `last_status` refreshed on every heartbeat,
/// deleted by the expiry sweeper once the heartbeat goes stale. There is no
/// explicit leave operation.
///
/// Invariant: at most one participant document per case-insensitive name.
/// The uniqueness check is check-then-insert and therefore best-effort under
/// concurrent joins (see `PresenceService::join`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    /// Unique room identity. Immutable once created.
    pub name: String,

    /// Timestamp of the last heartbeat.
    pub last_status: DateTime<Utc>,
}

impl Participant {
    /// Create a participant that just joined, with a fresh heartbeat.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            last_status: Utc::now(),
        }
    }

    /// Whether the participant's heartbeat predates `threshold`.
    pub fn is_stale(&self, threshold: DateTime<Utc>) -> bool {
        self.last_status < threshold
    }
}

/// Repository trait for the `participants` collection.
#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    /// Find a participant by exact name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Participant>, AppError>;

    /// Find a participant whose name matches case-insensitively.
    ///
    /// Used only by the join uniqueness check; heartbeats are exact-match.
    async fn find_by_name_case_insensitive(
        &self,
        name: &str,
    ) -> Result<Option<Participant>, AppError>;

    /// List all current participants. Order is not significant.
    async fn list(&self) -> Result<Vec<Participant>, AppError>;

    /// Insert a new participant document.
    async fn create(&self, participant: &Participant) -> Result<(), AppError>;

    /// Set `last_status` to `at`. Fails with NotFound if the exact name
    /// does not exist.
    async fn touch(&self, name: &str, at: DateTime<Utc>) -> Result<(), AppError>;

    /// Remove a participant document. Fails with NotFound if absent.
    async fn delete(&self, name: &str) -> Result<(), AppError>;

    /// All participants whose `last_status` predates `threshold`.
    async fn find_stale(&self, threshold: DateTime<Utc>) -> Result<Vec<Participant>, AppError>;
}

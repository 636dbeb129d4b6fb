//! In-Memory Document Store
//!
//! Adapter over the same repository traits, holding both collections in
//! process memory. Backs the test suite, where it stands in for PostgreSQL
//! with identical contract semantics (including insertion-order listing).

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::{Message, MessageRepository, Participant, ParticipantRepository};
use crate::shared::error::AppError;

/// In-memory `participants` collection.
#[derive(Default)]
pub struct InMemoryParticipantRepository {
    inner: DashMap<String, Participant>,
}

impl InMemoryParticipantRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ParticipantRepository for InMemoryParticipantRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Participant>, AppError> {
        Ok(self.inner.get(name).map(|p| p.clone()))
    }

    async fn find_by_name_case_insensitive(
        &self,
        name: &str,
    ) -> Result<Option<Participant>, AppError> {
        let wanted = name.to_lowercase();
        Ok(self
            .inner
            .iter()
            .find(|entry| entry.key().to_lowercase() == wanted)
            .map(|entry| entry.value().clone()))
    }

    async fn list(&self) -> Result<Vec<Participant>, AppError> {
        Ok(self.inner.iter().map(|entry| entry.value().clone()).collect())
    }

    async fn create(&self, participant: &Participant) -> Result<(), AppError> {
        self.inner
            .insert(participant.name.clone(), participant.clone());
        Ok(())
    }

    async fn touch(&self, name: &str, at: DateTime<Utc>) -> Result<(), AppError> {
        match self.inner.get_mut(name) {
            Some(mut participant) => {
                participant.last_status = at;
                Ok(())
            }
            None => Err(AppError::NotFound(format!("Participant {} not found", name))),
        }
    }

    async fn delete(&self, name: &str) -> Result<(), AppError> {
        match self.inner.remove(name) {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(format!("Participant {} not found", name))),
        }
    }

    async fn find_stale(
        &self,
        threshold: DateTime<Utc>,
    ) -> Result<Vec<Participant>, AppError> {
        Ok(self
            .inner
            .iter()
            .filter(|entry| entry.value().is_stale(threshold))
            .map(|entry| entry.value().clone())
            .collect())
    }
}

/// In-memory `messages` collection. Vector order is insertion order.
#[derive(Default)]
pub struct InMemoryMessageRepository {
    inner: RwLock<Vec<Message>>,
}

impl InMemoryMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn locked(&self) -> std::sync::RwLockWriteGuard<'_, Vec<Message>> {
        // A poisoned lock means a writer panicked mid-test; propagating the
        // panic is the right outcome there.
        self.inner.write().expect("message store lock poisoned")
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Message>, AppError> {
        let messages = self.inner.read().expect("message store lock poisoned");
        Ok(messages.iter().find(|m| m.id == id).cloned())
    }

    async fn find_visible_to(
        &self,
        requester: &str,
        limit: i64,
    ) -> Result<Vec<Message>, AppError> {
        let messages = self.inner.read().expect("message store lock poisoned");
        let visible: Vec<Message> = messages
            .iter()
            .filter(|m| m.is_visible_to(requester))
            .cloned()
            .collect();

        let start = visible.len().saturating_sub(limit as usize);
        Ok(visible[start..].to_vec())
    }

    async fn create(&self, message: &Message) -> Result<(), AppError> {
        self.locked().push(message.clone());
        Ok(())
    }

    async fn update(&self, message: &Message) -> Result<(), AppError> {
        let mut messages = self.locked();
        match messages.iter_mut().find(|m| m.id == message.id) {
            Some(slot) => {
                *slot = message.clone();
                Ok(())
            }
            None => Err(AppError::NotFound(format!("Message {} not found", message.id))),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut messages = self.locked();
        let before = messages.len();
        messages.retain(|m| m.id != id);
        if messages.len() == before {
            return Err(AppError::NotFound(format!("Message {} not found", id)));
        }
        Ok(())
    }
}

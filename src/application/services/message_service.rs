//! Message Service
//!
//! Handles the room's message ledger: post, edit, delete, and the
//! per-requester visibility window.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Message, MessageKind, MessageRepository, ParticipantRepository};
use crate::shared::sanitize;

/// Sanitized, validated message fields shared by post and edit.
#[derive(Debug, Clone)]
pub struct MessageDraft {
    pub to: String,
    pub text: String,
    pub kind: MessageKind,
}

impl MessageDraft {
    /// Normalize and validate raw `to`/`text`/`type` fields.
    fn from_raw(to: &str, text: &str, kind: &str) -> Result<Self, MessageError> {
        let to = sanitize::clean(to);
        let text = sanitize::clean(text);
        let kind = sanitize::clean(kind);

        if to.is_empty() {
            return Err(MessageError::EmptyRecipient);
        }
        if text.is_empty() {
            return Err(MessageError::EmptyBody);
        }
        let kind = MessageKind::parse(&kind)
            .filter(MessageKind::is_postable)
            .ok_or(MessageError::InvalidKind)?;

        Ok(Self { to, text, kind })
    }
}

/// Message service trait
#[async_trait]
pub trait MessageService: Send + Sync {
    /// Append a message from a registered participant.
    async fn post(
        &self,
        from: &str,
        to: &str,
        text: &str,
        kind: &str,
    ) -> Result<Message, MessageError>;

    /// Replace a message's `to`/`text`/`type`/`time`; author-only.
    async fn edit(
        &self,
        id: Uuid,
        requester: &str,
        to: &str,
        text: &str,
        kind: &str,
    ) -> Result<Message, MessageError>;

    /// Permanently remove a message; author-only.
    async fn delete(&self, id: Uuid, requester: &str) -> Result<(), MessageError>;

    /// The most recent `limit` messages visible to `requester`,
    /// oldest-first within that window.
    async fn list_visible_to(
        &self,
        requester: &str,
        limit: i64,
    ) -> Result<Vec<Message>, MessageError>;
}

/// Message service errors
#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    #[error("Recipient must not be empty")]
    EmptyRecipient,

    #[error("Message text must not be empty")]
    EmptyBody,

    #[error("Message type must be 'message' or 'private_message'")]
    InvalidKind,

    #[error("Sender is not a registered participant")]
    UnknownSender,

    #[error("Limit must be a positive integer")]
    InvalidLimit,

    #[error("Message not found")]
    NotFound,

    #[error("Only the message author may do that")]
    NotOwner,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// MessageService implementation
pub struct MessageServiceImpl {
    messages: Arc<dyn MessageRepository>,
    participants: Arc<dyn ParticipantRepository>,
}

impl MessageServiceImpl {
    pub fn new(
        messages: Arc<dyn MessageRepository>,
        participants: Arc<dyn ParticipantRepository>,
    ) -> Self {
        Self {
            messages,
            participants,
        }
    }

    async fn require_registered(&self, name: &str) -> Result<(), MessageError> {
        let sender = self
            .participants
            .find_by_name(name)
            .await
            .map_err(|e| MessageError::Internal(e.to_string()))?;
        if sender.is_none() {
            return Err(MessageError::UnknownSender);
        }
        Ok(())
    }
}

#[async_trait]
impl MessageService for MessageServiceImpl {
    async fn post(
        &self,
        from: &str,
        to: &str,
        text: &str,
        kind: &str,
    ) -> Result<Message, MessageError> {
        let draft = MessageDraft::from_raw(to, text, kind)?;
        self.require_registered(from).await?;

        let message = Message::new(from, draft.to, draft.text, draft.kind);
        self.messages
            .create(&message)
            .await
            .map_err(|e| MessageError::Internal(e.to_string()))?;

        Ok(message)
    }

    async fn edit(
        &self,
        id: Uuid,
        requester: &str,
        to: &str,
        text: &str,
        kind: &str,
    ) -> Result<Message, MessageError> {
        let draft = MessageDraft::from_raw(to, text, kind)?;

        let existing = self
            .messages
            .find_by_id(id)
            .await
            .map_err(|e| MessageError::Internal(e.to_string()))?
            .ok_or(MessageError::NotFound)?;

        if existing.from != requester {
            return Err(MessageError::NotOwner);
        }

        // Full field replace except id and from; time is refreshed.
        let updated = Message {
            id: existing.id,
            from: existing.from,
            to: draft.to,
            text: draft.text,
            kind: draft.kind,
            time: Message::now_formatted(),
        };

        self.messages
            .update(&updated)
            .await
            .map_err(|e| MessageError::Internal(e.to_string()))?;

        Ok(updated)
    }

    async fn delete(&self, id: Uuid, requester: &str) -> Result<(), MessageError> {
        let existing = self
            .messages
            .find_by_id(id)
            .await
            .map_err(|e| MessageError::Internal(e.to_string()))?
            .ok_or(MessageError::NotFound)?;

        if existing.from != requester {
            return Err(MessageError::NotOwner);
        }

        self.messages
            .delete(id)
            .await
            .map_err(|e| MessageError::Internal(e.to_string()))
    }

    async fn list_visible_to(
        &self,
        requester: &str,
        limit: i64,
    ) -> Result<Vec<Message>, MessageError> {
        if limit <= 0 {
            return Err(MessageError::InvalidLimit);
        }

        self.messages
            .find_visible_to(requester, limit)
            .await
            .map_err(|e| MessageError::Internal(e.to_string()))
    }
}

//! Message entity and repository trait.
//!
//! Maps to the `messages` collection in the document store.

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::AppError;

/// The reserved recipient meaning "visible to every participant".
pub const BROADCAST_TARGET: &str = "Todos";

/// Message categories.
///
/// `Message` and `PrivateMessage` are the only kinds a caller may post or
/// edit; `Status` messages are emitted by the system on join/leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// A public chat message
    Message,
    /// A message addressed to a single participant
    PrivateMessage,
    /// A system-generated join/leave notice
    Status,
}

impl MessageKind {
    /// Parse from the wire representation. Returns None for unknown kinds.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "message" => Some(Self::Message),
            "private_message" => Some(Self::PrivateMessage),
            "status" => Some(Self::Status),
            _ => None,
        }
    }

    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::PrivateMessage => "private_message",
            Self::Status => "status",
        }
    }

    /// Whether a caller may create or edit a message of this kind.
    pub fn is_postable(&self) -> bool {
        matches!(self, Self::Message | Self::PrivateMessage)
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A message in the room's ledger.
///
/// Identity is the `id` assigned at creation; edits replace every other
/// field except `from`. `time` is the formatted creation (or last edit)
/// instant; chronological ordering comes from the store's insertion
/// sequence, not from this display value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Stable unique id, used for edit/delete addressing
    pub id: Uuid,

    /// Originating participant name (or the leaver/joiner for status notices)
    pub from: String,

    /// Recipient: `BROADCAST_TARGET` or a specific participant name
    pub to: String,

    /// Message body
    pub text: String,

    /// Message category
    pub kind: MessageKind,

    /// Formatted timestamp (`HH:MM:SS`) of creation or last edit
    pub time: String,
}

impl Message {
    /// Create a message with a fresh id and the current formatted time.
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        text: impl Into<String>,
        kind: MessageKind,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            from: from.into(),
            to: to.into(),
            text: text.into(),
            kind,
            time: Self::now_formatted(),
        }
    }

    /// System notice announcing that `name` entered the room.
    pub fn join_notice(name: &str) -> Self {
        Self::new(name, BROADCAST_TARGET, "entra na sala...", MessageKind::Status)
    }

    /// System notice announcing that `name` left the room.
    pub fn leave_notice(name: &str) -> Self {
        Self::new(name, BROADCAST_TARGET, "sai da sala...", MessageKind::Status)
    }

    /// Whether `requester` is allowed to see this message.
    pub fn is_visible_to(&self, requester: &str) -> bool {
        self.to == BROADCAST_TARGET || self.to == requester || self.from == requester
    }

    /// The current instant in the ledger's display format.
    pub fn now_formatted() -> String {
        Utc::now().format("%H:%M:%S").to_string()
    }
}

/// Repository trait for the `messages` collection.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Find a message by its id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Message>, AppError>;

    /// The most recent `limit` messages visible to `requester`, returned
    /// oldest-first within that window.
    ///
    /// Visible means addressed to the broadcast target, addressed to the
    /// requester, or sent by the requester.
    async fn find_visible_to(
        &self,
        requester: &str,
        limit: i64,
    ) -> Result<Vec<Message>, AppError>;

    /// Append a new message.
    async fn create(&self, message: &Message) -> Result<(), AppError>;

    /// Replace a message document in place, addressed by `message.id`.
    async fn update(&self, message: &Message) -> Result<(), AppError>;

    /// Remove a message permanently. Fails with NotFound if absent.
    async fn delete(&self, id: Uuid) -> Result<(), AppError>;
}

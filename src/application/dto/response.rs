//! Response DTOs
//!
//! Data structures for API response bodies.

use serde::Serialize;

use crate::domain::{Message, Participant};

/// Participant response
///
/// `lastStatus` is exposed as epoch milliseconds.
#[derive(Debug, Serialize)]
pub struct ParticipantResponse {
    pub name: String,
    #[serde(rename = "lastStatus")]
    pub last_status: i64,
}

impl From<Participant> for ParticipantResponse {
    fn from(participant: Participant) -> Self {
        Self {
            name: participant.name,
            last_status: participant.last_status.timestamp_millis(),
        }
    }
}

/// Message response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub id: String,
    pub from: String,
    pub to: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub time: String,
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self {
            id: message.id.to_string(),
            from: message.from,
            to: message.to,
            text: message.text,
            kind: message.kind.as_str().to_string(),
            time: message.time,
        }
    }
}

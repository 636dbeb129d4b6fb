//! Domain Entities
//!
//! Core entities and their repository traits.

pub mod message;
pub mod participant;

pub use message::{Message, MessageKind, MessageRepository, BROADCAST_TARGET};
pub use participant::{Participant, ParticipantRepository};

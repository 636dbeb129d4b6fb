//! Application Services
//!
//! Business logic services for presence, messaging, and expiry.

pub mod message_service;
pub mod presence_service;
pub mod sweeper;

pub use message_service::{MessageDraft, MessageError, MessageService, MessageServiceImpl};
pub use presence_service::{PresenceError, PresenceService, PresenceServiceImpl};
pub use sweeper::ExpirySweeper;

//! Document Store Adapters
//!
//! Implementations of the domain repository traits over the two logical
//! collections. PostgreSQL backs the running service; the in-memory adapter
//! backs the test suite.

pub mod memory;
pub mod message_repository;
pub mod participant_repository;

pub use memory::{InMemoryMessageRepository, InMemoryParticipantRepository};
pub use message_repository::PgMessageRepository;
pub use participant_repository::PgParticipantRepository;

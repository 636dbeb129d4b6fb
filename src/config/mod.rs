//! Configuration Management
//!
//! Settings loading from files and environment variables.

pub mod settings;

pub use settings::{
    CorsSettings, DatabaseSettings, PresenceSettings, ServerSettings, Settings,
};

//! # Chatroom Server Library
//!
//! This crate provides a chat room backend with:
//! - RESTful HTTP API endpoints for participants and messages
//! - Heartbeat-based presence tracking with automatic expiry
//! - PostgreSQL-backed document storage (with an in-memory adapter for tests)
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Core business entities and repository traits
//! - **Application Layer**: Business logic services and DTOs
//! - **Infrastructure Layer**: Store adapters and metrics
//! - **Presentation Layer**: HTTP handlers and middleware
//!
//! ## Module Structure
//!
//! ```text
//! chatroom_server/
//! +-- config/         Configuration management
//! +-- domain/         Domain entities and repository traits
//! +-- application/    Application services and DTOs
//! +-- infrastructure/ Store adapters and metrics
//! +-- presentation/   HTTP routes, handlers, and middleware
//! +-- shared/         Common utilities (errors, sanitization)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers and middleware
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;

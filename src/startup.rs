//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;

use crate::application::services::ExpirySweeper;
use crate::config::Settings;
use crate::domain::{MessageRepository, ParticipantRepository};
use crate::infrastructure::database;
use crate::infrastructure::repositories::{PgMessageRepository, PgParticipantRepository};
use crate::presentation::http::routes;
use crate::presentation::middleware::{cors, logging};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub participants: Arc<dyn ParticipantRepository>,
    pub messages: Arc<dyn MessageRepository>,
    pub settings: Arc<Settings>,
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        // Create the process-wide store handle
        let pool = database::create_pool(&settings.database).await?;
        tracing::info!("Database connection pool created");

        database::run_migrations(&pool).await?;
        tracing::info!("Database migrations applied");

        let participants: Arc<dyn ParticipantRepository> =
            Arc::new(PgParticipantRepository::new(pool.clone()));
        let messages: Arc<dyn MessageRepository> =
            Arc::new(PgMessageRepository::new(pool.clone()));

        // Create app state
        let state = AppState {
            participants: participants.clone(),
            messages: messages.clone(),
            settings: Arc::new(settings.clone()),
        };

        // Start the presence sweeper before accepting any traffic
        let sweeper = ExpirySweeper::new(participants, messages, &settings.presence);
        tokio::spawn(sweeper.run());
        tracing::info!(
            interval_secs = settings.presence.sweep_interval_secs,
            timeout_secs = settings.presence.heartbeat_timeout_secs,
            "Expiry sweeper started"
        );

        // Build router with middleware
        let router = routes::create_router(state)
            .layer(logging::create_trace_layer())
            .layer(cors::create_cors_layer(&settings.cors));

        // Bind to address
        let addr = SocketAddr::from(([0, 0, 0, 0], settings.server.port));
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Listening on {}", addr);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router).await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    response::IntoResponse,
    routing::{get, post},
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/participants",
            post(handlers::participant::join).get(handlers::participant::list_participants),
        )
        .route(
            "/messages",
            post(handlers::message::post_message).get(handlers::message::get_messages),
        )
        .route(
            "/messages/{id}",
            axum::routing::put(handlers::message::edit_message)
                .delete(handlers::message::delete_message),
        )
        .route("/status", post(handlers::status::heartbeat))
        // Health check endpoint
        .route("/health", get(handlers::health::health_check))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    let metrics = metrics::gather_metrics();
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics,
    )
}

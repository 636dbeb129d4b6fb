//! Common Test Utilities
//!
//! Shared helpers and test infrastructure. The router runs over the
//! in-memory store adapter, so every test gets an isolated, empty room.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use tower::ServiceExt;

use chatroom_server::config::{
    CorsSettings, DatabaseSettings, PresenceSettings, ServerSettings, Settings,
};
use chatroom_server::domain::{MessageRepository, ParticipantRepository};
use chatroom_server::infrastructure::repositories::{
    InMemoryMessageRepository, InMemoryParticipantRepository,
};
use chatroom_server::presentation::http::routes;
use chatroom_server::startup::AppState;

/// Test application builder
pub struct TestApp {
    pub router: Router,
    pub participants: Arc<dyn ParticipantRepository>,
    pub messages: Arc<dyn MessageRepository>,
    pub settings: Settings,
}

impl TestApp {
    /// Create a new test application over an empty in-memory store
    pub fn new() -> Self {
        let participants: Arc<dyn ParticipantRepository> =
            Arc::new(InMemoryParticipantRepository::new());
        let messages: Arc<dyn MessageRepository> = Arc::new(InMemoryMessageRepository::new());
        let settings = test_settings();

        let state = AppState {
            participants: participants.clone(),
            messages: messages.clone(),
            settings: Arc::new(settings.clone()),
        };

        Self {
            router: routes::create_router(state),
            participants,
            messages,
            settings,
        }
    }

    /// Make a GET request, optionally with a `user` identity header
    pub async fn get(&self, uri: &str, user: Option<&str>) -> Response {
        self.send(request(uri, "GET", user).body(Body::empty()).unwrap())
            .await
    }

    /// Make a POST request with a JSON body
    pub async fn post_json(
        &self,
        uri: &str,
        body: &serde_json::Value,
        user: Option<&str>,
    ) -> Response {
        self.send(
            request(uri, "POST", user)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// Make a PUT request with a JSON body
    pub async fn put_json(
        &self,
        uri: &str,
        body: &serde_json::Value,
        user: Option<&str>,
    ) -> Response {
        self.send(
            request(uri, "PUT", user)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// Make a DELETE request
    pub async fn delete(&self, uri: &str, user: Option<&str>) -> Response {
        self.send(request(uri, "DELETE", user).body(Body::empty()).unwrap())
            .await
    }

    async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Join the room and assert success
    pub async fn join(&self, name: &str) {
        let response = self
            .post_json("/participants", &serde_json::json!({ "name": name }), None)
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    /// Post a broadcast chat message and assert success
    pub async fn say(&self, from: &str, text: &str) {
        let body = serde_json::json!({ "to": "Todos", "text": text, "type": "message" });
        let response = self.post_json("/messages", &body, Some(from)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    /// Messages visible to `user`, as parsed JSON
    pub async fn visible_messages(&self, user: &str, limit: u32) -> Vec<serde_json::Value> {
        let response = self
            .get(&format!("/messages?limit={}", limit), Some(user))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        read_json(response).await.as_array().unwrap().clone()
    }
}

fn request(uri: &str, method: &str, user: Option<&str>) -> axum::http::request::Builder {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header("user", user);
    }
    builder
}

/// Parse a response body as JSON
pub async fn read_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Settings for tests; the database section is never exercised because the
/// router runs over the in-memory store.
pub fn test_settings() -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".into(),
            port: 0,
        },
        database: DatabaseSettings {
            url: "postgres://localhost/unused".into(),
            max_connections: 1,
            min_connections: 1,
            acquire_timeout: 1,
        },
        presence: PresenceSettings {
            heartbeat_timeout_secs: 10,
            sweep_interval_secs: 15,
        },
        cors: CorsSettings {
            allowed_origins: vec![],
        },
        environment: "test".into(),
    }
}

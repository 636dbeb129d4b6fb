//! Expiry Sweeper Tests
//!
//! Drives `sweep_once` directly against the same store the router uses,
//! instead of waiting out the background interval.

use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;

use chatroom_server::application::services::ExpirySweeper;
use chatroom_server::domain::ParticipantRepository;

use crate::common::{read_json, TestApp};

fn sweeper(app: &TestApp) -> ExpirySweeper {
    ExpirySweeper::new(
        app.participants.clone(),
        app.messages.clone(),
        &app.settings.presence,
    )
}

#[tokio::test]
async fn test_stale_participant_is_evicted_and_departure_announced() {
    let app = TestApp::new();
    app.join("Ana").await;
    app.join("Bob").await;

    // Ana's heartbeat is older than the 10 second timeout.
    let stale = Utc::now() - Duration::seconds(30);
    app.participants.touch("Ana", stale).await.unwrap();

    let evicted = sweeper(&app).sweep_once().await.unwrap();
    assert_eq!(evicted, 1);

    let participants = read_json(app.get("/participants", None).await).await;
    let names: Vec<&str> = participants
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Bob"]);

    let messages = app.visible_messages("Bob", 10).await;
    let departure = messages
        .iter()
        .find(|m| m["text"] == "sai da sala...")
        .expect("departure notice missing");
    assert_eq!(departure["from"], "Ana");
    assert_eq!(departure["to"], "Todos");
    assert_eq!(departure["type"], "status");
}

#[tokio::test]
async fn test_fresh_participants_survive_the_sweep() {
    let app = TestApp::new();
    app.join("Ana").await;

    let evicted = sweeper(&app).sweep_once().await.unwrap();
    assert_eq!(evicted, 0);

    let participants = read_json(app.get("/participants", None).await).await;
    assert_eq!(participants.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_heartbeat_keeps_participant_alive_across_sweeps() {
    let app = TestApp::new();
    app.join("Ana").await;

    // Stale, then refreshed just before the sweep.
    let stale = Utc::now() - Duration::seconds(30);
    app.participants.touch("Ana", stale).await.unwrap();
    app.post_json("/status", &serde_json::json!({}), Some("Ana"))
        .await;

    let evicted = sweeper(&app).sweep_once().await.unwrap();
    assert_eq!(evicted, 0);

    let participants = read_json(app.get("/participants", None).await).await;
    assert_eq!(participants[0]["name"], "Ana");
}

#[tokio::test]
async fn test_evicted_participant_can_rejoin() {
    let app = TestApp::new();
    app.join("Ana").await;

    let stale = Utc::now() - Duration::seconds(30);
    app.participants.touch("Ana", stale).await.unwrap();
    sweeper(&app).sweep_once().await.unwrap();

    // The name is free again; a new join restarts the lifecycle.
    app.join("Ana").await;

    let messages = app.visible_messages("Ana", 10).await;
    let texts: Vec<&str> = messages
        .iter()
        .map(|m| m["text"].as_str().unwrap())
        .collect();
    assert_eq!(
        texts,
        vec!["entra na sala...", "sai da sala...", "entra na sala..."]
    );
}

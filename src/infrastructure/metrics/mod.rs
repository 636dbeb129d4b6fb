//! Prometheus Metrics Module
//!
//! Application-wide metrics collection.
//!
//! # Metrics Collected
//! - Participants joined and expired
//! - Messages posted by kind
//! - Expiry sweep duration histogram

use once_cell::sync::Lazy;
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};

/// Global metrics registry
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

/// Total participants that joined the room
pub static PARTICIPANTS_JOINED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::with_opts(
        Opts::new("participants_joined_total", "Total participants that joined")
            .namespace("chatroom"),
    )
    .expect("Failed to create PARTICIPANTS_JOINED_TOTAL metric")
});

/// Total participants evicted by the expiry sweeper
pub static PARTICIPANTS_EXPIRED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::with_opts(
        Opts::new(
            "participants_expired_total",
            "Total participants evicted for missing heartbeats",
        )
        .namespace("chatroom"),
    )
    .expect("Failed to create PARTICIPANTS_EXPIRED_TOTAL metric")
});

/// Total messages posted, labeled by kind
pub static MESSAGES_POSTED_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("messages_posted_total", "Total messages posted").namespace("chatroom"),
        &["kind"],
    )
    .expect("Failed to create MESSAGES_POSTED_TOTAL metric")
});

/// Expiry sweep duration in seconds
pub static SWEEP_DURATION_SECONDS: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new("sweep_duration_seconds", "Expiry sweep latency in seconds")
            .namespace("chatroom")
            .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
    )
    .expect("Failed to create SWEEP_DURATION_SECONDS metric")
});

/// Register all metrics with the registry
fn register_metrics(registry: &Registry) {
    registry
        .register(Box::new(PARTICIPANTS_JOINED_TOTAL.clone()))
        .expect("Failed to register PARTICIPANTS_JOINED_TOTAL");
    registry
        .register(Box::new(PARTICIPANTS_EXPIRED_TOTAL.clone()))
        .expect("Failed to register PARTICIPANTS_EXPIRED_TOTAL");
    registry
        .register(Box::new(MESSAGES_POSTED_TOTAL.clone()))
        .expect("Failed to register MESSAGES_POSTED_TOTAL");
    registry
        .register(Box::new(SWEEP_DURATION_SECONDS.clone()))
        .expect("Failed to register SWEEP_DURATION_SECONDS");
}

/// Collect and encode all metrics as Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .expect("Failed to encode metrics");
    String::from_utf8(buffer).expect("Metrics should be valid UTF-8")
}

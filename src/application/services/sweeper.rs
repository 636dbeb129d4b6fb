//! Expiry Sweeper
//!
//! Recurring background task that evicts participants whose heartbeat has
//! gone stale and announces their departure to the room. Runs independently
//! of request handling; nothing here is surfaced to any caller.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use futures::future::join_all;
use tokio::time::interval;

use crate::config::PresenceSettings;
use crate::domain::{Message, MessageRepository, Participant, ParticipantRepository};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;

/// Background presence sweeper.
pub struct ExpirySweeper {
    participants: Arc<dyn ParticipantRepository>,
    messages: Arc<dyn MessageRepository>,
    heartbeat_timeout: chrono::Duration,
    sweep_interval: std::time::Duration,
}

impl ExpirySweeper {
    pub fn new(
        participants: Arc<dyn ParticipantRepository>,
        messages: Arc<dyn MessageRepository>,
        settings: &PresenceSettings,
    ) -> Self {
        Self {
            participants,
            messages,
            heartbeat_timeout: settings.heartbeat_timeout(),
            sweep_interval: settings.sweep_interval(),
        }
    }

    /// Run forever on the configured interval. Intended to be spawned as a
    /// detached task at startup.
    pub async fn run(self) {
        let mut ticker = interval(self.sweep_interval);
        // The first tick fires immediately; skip it so a restart does not
        // sweep before anyone had a chance to heartbeat.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            match self.sweep_once().await {
                Ok(0) => {}
                Ok(evicted) => {
                    tracing::info!(evicted, "Expiry sweep evicted stale participants");
                }
                Err(e) => {
                    tracing::error!(error = %e, "Expiry sweep failed");
                }
            }
        }
    }

    /// One sweep pass. Returns the number of participants evicted.
    ///
    /// Each stale participant is processed as an independent unit of work:
    /// one failure is logged and does not abort the rest of the sweep.
    pub async fn sweep_once(&self) -> Result<usize, AppError> {
        let started = Instant::now();
        let threshold = Utc::now() - self.heartbeat_timeout;

        let stale = self.participants.find_stale(threshold).await?;
        if stale.is_empty() {
            return Ok(0);
        }

        let names: Vec<String> = stale.iter().map(|p| p.name.clone()).collect();
        let results = join_all(stale.into_iter().map(|p| self.evict(p))).await;

        let mut evicted = 0;
        for (name, result) in names.iter().zip(results) {
            match result {
                Ok(()) => evicted += 1,
                Err(e) => {
                    tracing::warn!(name = %name, error = %e, "Failed to evict stale participant");
                }
            }
        }

        metrics::PARTICIPANTS_EXPIRED_TOTAL.inc_by(evicted as u64);
        metrics::SWEEP_DURATION_SECONDS.observe(started.elapsed().as_secs_f64());

        Ok(evicted)
    }

    /// Delete one stale participant and announce the departure.
    async fn evict(&self, participant: Participant) -> Result<(), AppError> {
        self.participants.delete(&participant.name).await?;
        self.messages
            .create(&Message::leave_notice(&participant.name))
            .await?;
        Ok(())
    }
}

//! Participant Repository Implementation
//!
//! PostgreSQL adapter for the `participants` collection.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{Participant, ParticipantRepository};
use crate::shared::error::AppError;

/// PostgreSQL participant repository.
pub struct PgParticipantRepository {
    pool: PgPool,
}

impl PgParticipantRepository {
    /// Creates a new PgParticipantRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for participant queries.
#[derive(Debug, sqlx::FromRow)]
struct ParticipantRow {
    name: String,
    last_status: DateTime<Utc>,
}

impl ParticipantRow {
    fn into_participant(self) -> Participant {
        Participant {
            name: self.name,
            last_status: self.last_status,
        }
    }
}

#[async_trait]
impl ParticipantRepository for PgParticipantRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Participant>, AppError> {
        let row = sqlx::query_as::<_, ParticipantRow>(
            "SELECT name, last_status FROM participants WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_participant()))
    }

    async fn find_by_name_case_insensitive(
        &self,
        name: &str,
    ) -> Result<Option<Participant>, AppError> {
        let row = sqlx::query_as::<_, ParticipantRow>(
            "SELECT name, last_status FROM participants WHERE LOWER(name) = LOWER($1) LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_participant()))
    }

    async fn list(&self) -> Result<Vec<Participant>, AppError> {
        let rows = sqlx::query_as::<_, ParticipantRow>(
            "SELECT name, last_status FROM participants",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_participant()).collect())
    }

    async fn create(&self, participant: &Participant) -> Result<(), AppError> {
        sqlx::query("INSERT INTO participants (name, last_status) VALUES ($1, $2)")
            .bind(&participant.name)
            .bind(participant.last_status)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn touch(&self, name: &str, at: DateTime<Utc>) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE participants SET last_status = $2 WHERE name = $1")
            .bind(name)
            .bind(at)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Participant {} not found", name)));
        }

        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM participants WHERE name = $1")
            .bind(name)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Participant {} not found", name)));
        }

        Ok(())
    }

    async fn find_stale(
        &self,
        threshold: DateTime<Utc>,
    ) -> Result<Vec<Participant>, AppError> {
        let rows = sqlx::query_as::<_, ParticipantRow>(
            "SELECT name, last_status FROM participants WHERE last_status < $1",
        )
        .bind(threshold)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_participant()).collect())
    }
}

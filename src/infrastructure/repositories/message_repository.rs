//! Message Repository Implementation
//!
//! PostgreSQL adapter for the `messages` collection. The `seq` column
//! carries insertion order; the visibility query fetches newest-first with
//! a limit and restores chronological order in Rust.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Message, MessageKind, MessageRepository, BROADCAST_TARGET};
use crate::shared::error::AppError;

/// PostgreSQL message repository.
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    /// Creates a new PgMessageRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for message queries.
#[derive(Debug, sqlx::FromRow)]
struct MessageRow {
    id: Uuid,
    sender: String,
    recipient: String,
    body: String,
    kind: String,
    time: String,
}

impl MessageRow {
    fn into_message(self) -> Message {
        Message {
            id: self.id,
            from: self.sender,
            to: self.recipient,
            text: self.body,
            // Rows are only ever written from a parsed MessageKind; an
            // unknown value in the store degrades to a status notice
            // rather than failing the whole listing.
            kind: MessageKind::parse(&self.kind).unwrap_or(MessageKind::Status),
            time: self.time,
        }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Message>, AppError> {
        let row = sqlx::query_as::<_, MessageRow>(
            "SELECT id, sender, recipient, body, kind, time FROM messages WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_message()))
    }

    async fn find_visible_to(
        &self,
        requester: &str,
        limit: i64,
    ) -> Result<Vec<Message>, AppError> {
        let rows = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT id, sender, recipient, body, kind, time
            FROM messages
            WHERE recipient = $1 OR recipient = $2 OR sender = $2
            ORDER BY seq DESC
            LIMIT $3
            "#,
        )
        .bind(BROADCAST_TARGET)
        .bind(requester)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        // Newest-first from the store; the API window is oldest-first.
        let mut messages: Vec<Message> =
            rows.into_iter().map(|r| r.into_message()).collect();
        messages.reverse();
        Ok(messages)
    }

    async fn create(&self, message: &Message) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO messages (id, sender, recipient, body, kind, time)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(message.id)
        .bind(&message.from)
        .bind(&message.to)
        .bind(&message.text)
        .bind(message.kind.as_str())
        .bind(&message.time)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, message: &Message) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE messages
            SET recipient = $2, body = $3, kind = $4, time = $5
            WHERE id = $1
            "#,
        )
        .bind(message.id)
        .bind(&message.to)
        .bind(&message.text)
        .bind(message.kind.as_str())
        .bind(&message.time)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Message {} not found", message.id)));
        }

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM messages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Message {} not found", id)));
        }

        Ok(())
    }
}

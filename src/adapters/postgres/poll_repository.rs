//! PostgreSQL implementation of PollRepository.
//!
//! Persists Poll aggregates to the `polls` and `poll_options` tables. Both
//! tables are written in one transaction.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Row, Transaction};

use crate::domain::foundation::{
    DomainError, ErrorCode, OptionId, PollId, Timestamp, UserId,
};
use crate::domain::poll::{Poll, PollOption};
use crate::ports::PollRepository;

/// PostgreSQL implementation of PollRepository.
#[derive(Clone)]
pub struct PostgresPollRepository {
    pool: PgPool,
}

impl PostgresPollRepository {
    /// Creates a new PostgresPollRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PollRepository for PostgresPollRepository {
    async fn create(&self, poll: &Poll) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to begin transaction: {}", e))
        })?;

        // Insert poll
        sqlx::query(
            r#"
            INSERT INTO polls (
                id, title, description, creator_id, is_public,
                allow_multiple_votes, expires_at, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(poll.id().as_uuid())
        .bind(poll.title())
        .bind(poll.description())
        .bind(poll.creator_id().as_str())
        .bind(poll.is_public())
        .bind(poll.allow_multiple_votes())
        .bind(poll.expires_at().map(|t| *t.as_datetime()))
        .bind(poll.created_at().as_datetime())
        .bind(poll.updated_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::new(ErrorCode::DatabaseError, format!("Failed to insert poll: {}", e)))?;

        // Insert all options
        for option in poll.options() {
            insert_option(&mut tx, option).await?;
        }

        tx.commit().await.map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to commit transaction: {}", e))
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: &PollId) -> Result<Option<Poll>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, title, description, creator_id, is_public,
                   allow_multiple_votes, expires_at, created_at, updated_at
            FROM polls
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch poll: {}", e),
            )
        })?;

        let Some(row) = row else {
            return Ok(None);
        };

        let option_rows = sqlx::query(
            r#"
            SELECT id, poll_id, option_text, position, created_at, updated_at
            FROM poll_options
            WHERE poll_id = $1
            ORDER BY position ASC
            "#,
        )
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch poll options: {}", e),
            )
        })?;

        let options = option_rows
            .iter()
            .map(row_to_option)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(row_to_poll(&row, options)?))
    }

    async fn delete(&self, id: &PollId) -> Result<(), DomainError> {
        // poll_options and votes go with it via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM polls WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to delete poll: {}", e),
                )
            })?;

        if result.rows_affected() == 0 {
            return Err(
                DomainError::new(ErrorCode::PollNotFound, format!("Poll not found: {}", id))
                    .with_detail("poll_id", id.to_string()),
            );
        }

        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

async fn insert_option(
    tx: &mut Transaction<'_, Postgres>,
    option: &PollOption,
) -> Result<(), DomainError> {
    sqlx::query(
        r#"
        INSERT INTO poll_options (
            id, poll_id, option_text, position, created_at, updated_at
        ) VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(option.id.as_uuid())
    .bind(option.poll_id.as_uuid())
    .bind(&option.text)
    .bind(position_to_db(option.position))
    .bind(option.created_at.as_datetime())
    .bind(option.updated_at.as_datetime())
    .execute(&mut **tx)
    .await
    .map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to insert poll option: {}", e),
        )
    })?;

    Ok(())
}

/// Positions are stored as `INTEGER`; at most 20 options per poll fit easily.
pub(super) fn position_to_db(position: u32) -> i32 {
    i32::try_from(position).unwrap_or(i32::MAX)
}

pub(super) fn position_from_db(position: i32) -> Result<u32, DomainError> {
    u32::try_from(position).map_err(|_| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid option position: {}", position),
        )
    })
}

pub(super) fn column_error(column: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to get {}: {}", column, e),
    )
}

pub(super) fn user_id_from_db(raw: String) -> Result<UserId, DomainError> {
    UserId::new(raw).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid creator_id: {}", e),
        )
    })
}

fn row_to_option(row: &PgRow) -> Result<PollOption, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(|e| column_error("id", e))?;
    let poll_id: uuid::Uuid = row.try_get("poll_id").map_err(|e| column_error("poll_id", e))?;
    let text: String = row
        .try_get("option_text")
        .map_err(|e| column_error("option_text", e))?;
    let position: i32 = row.try_get("position").map_err(|e| column_error("position", e))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| column_error("created_at", e))?;
    let updated_at: chrono::DateTime<chrono::Utc> = row
        .try_get("updated_at")
        .map_err(|e| column_error("updated_at", e))?;

    Ok(PollOption {
        id: OptionId::from_uuid(id),
        poll_id: PollId::from_uuid(poll_id),
        text,
        position: position_from_db(position)?,
        created_at: Timestamp::from_datetime(created_at),
        updated_at: Timestamp::from_datetime(updated_at),
    })
}

fn row_to_poll(row: &PgRow, options: Vec<PollOption>) -> Result<Poll, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(|e| column_error("id", e))?;
    let title: String = row.try_get("title").map_err(|e| column_error("title", e))?;
    let description: Option<String> = row
        .try_get("description")
        .map_err(|e| column_error("description", e))?;
    let creator_id: String = row
        .try_get("creator_id")
        .map_err(|e| column_error("creator_id", e))?;
    let is_public: bool = row.try_get("is_public").map_err(|e| column_error("is_public", e))?;
    let allow_multiple_votes: bool = row
        .try_get("allow_multiple_votes")
        .map_err(|e| column_error("allow_multiple_votes", e))?;
    let expires_at: Option<chrono::DateTime<chrono::Utc>> = row
        .try_get("expires_at")
        .map_err(|e| column_error("expires_at", e))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| column_error("created_at", e))?;
    let updated_at: chrono::DateTime<chrono::Utc> = row
        .try_get("updated_at")
        .map_err(|e| column_error("updated_at", e))?;

    Ok(Poll::reconstitute(
        PollId::from_uuid(id),
        user_id_from_db(creator_id)?,
        title,
        description,
        is_public,
        allow_multiple_votes,
        expires_at.map(Timestamp::from_datetime),
        options,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_conversion_roundtrips() {
        for position in [0u32, 1, 19] {
            assert_eq!(position_from_db(position_to_db(position)).unwrap(), position);
        }
    }

    #[test]
    fn negative_position_is_rejected() {
        assert!(position_from_db(-1).is_err());
    }

    #[test]
    fn blank_creator_id_is_a_database_error() {
        let err = user_id_from_db("  ".to_string()).unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }
}

//! PostgreSQL implementation of PollReader.
//!
//! Listings read `polls` directly; results go through the
//! `get_poll_results` stored function so tallies are always fresh.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, OptionId, PollId, Timestamp, UserId};
use crate::domain::poll::OptionTally;
use crate::ports::{PollReader, PollSummary};

use super::poll_repository::{column_error, user_id_from_db};

const SUMMARY_COLUMNS: &str = r#"
    p.id, p.title, p.description, p.creator_id, p.is_public,
    p.allow_multiple_votes, p.expires_at, p.created_at,
    (SELECT COUNT(*) FROM poll_options o WHERE o.poll_id = p.id) AS option_count
"#;

/// PostgreSQL implementation of PollReader.
#[derive(Clone)]
pub struct PostgresPollReader {
    pool: PgPool,
}

impl PostgresPollReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PollReader for PostgresPollReader {
    async fn list_public(&self) -> Result<Vec<PollSummary>, DomainError> {
        let sql = format!(
            "SELECT {} FROM polls p WHERE p.is_public = TRUE ORDER BY p.created_at DESC",
            SUMMARY_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to list public polls: {}", e),
                )
            })?;

        rows.iter().map(row_to_summary).collect()
    }

    async fn list_by_creator(&self, creator_id: &UserId) -> Result<Vec<PollSummary>, DomainError> {
        let sql = format!(
            "SELECT {} FROM polls p WHERE p.creator_id = $1 ORDER BY p.created_at DESC",
            SUMMARY_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(creator_id.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to list polls by creator: {}", e),
                )
            })?;

        rows.iter().map(row_to_summary).collect()
    }

    async fn results(&self, poll_id: &PollId) -> Result<Vec<OptionTally>, DomainError> {
        let rows = sqlx::query(
            "SELECT option_id, option_text, vote_count FROM get_poll_results($1)",
        )
        .bind(poll_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch poll results: {}", e),
            )
        })?;

        rows.iter().map(row_to_tally).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn count_from_db(column: &str, value: i64) -> Result<u64, DomainError> {
    u64::try_from(value).map_err(|_| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Negative {}: {}", column, value),
        )
    })
}

fn row_to_summary(row: &PgRow) -> Result<PollSummary, DomainError> {
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
    let option_count: i64 = row
        .try_get("option_count")
        .map_err(|e| column_error("option_count", e))?;

    Ok(PollSummary {
        id: PollId::from_uuid(id),
        title,
        description,
        creator_id: user_id_from_db(creator_id)?,
        is_public,
        allow_multiple_votes,
        expires_at: expires_at.map(Timestamp::from_datetime),
        option_count: count_from_db("option_count", option_count)? as u32,
        created_at: Timestamp::from_datetime(created_at),
    })
}

fn row_to_tally(row: &PgRow) -> Result<OptionTally, DomainError> {
    let option_id: uuid::Uuid = row
        .try_get("option_id")
        .map_err(|e| column_error("option_id", e))?;
    let option_text: String = row
        .try_get("option_text")
        .map_err(|e| column_error("option_text", e))?;
    let vote_count: i64 = row
        .try_get("vote_count")
        .map_err(|e| column_error("vote_count", e))?;

    Ok(OptionTally {
        option_id: OptionId::from_uuid(option_id),
        option_text,
        vote_count: count_from_db("vote_count", vote_count)?,
    })
}

//! PostgreSQL implementation of VoteRepository.
//!
//! Single-vote polls are protected twice: the workflow asks
//! `has_user_voted_on_poll` first, and the partial unique index on
//! `votes (poll_id, user_id) WHERE exclusive` rejects whatever slips past.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, PollId, UserId};
use crate::domain::poll::{Vote, VotePolicy};
use crate::ports::VoteRepository;

/// PostgreSQL implementation of VoteRepository.
#[derive(Clone)]
pub struct PostgresVoteRepository {
    pool: PgPool,
}

impl PostgresVoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VoteRepository for PostgresVoteRepository {
    async fn save(&self, vote: &Vote, policy: VotePolicy) -> Result<(), DomainError> {
        // Inserts nothing when the option does not belong to the poll
        let result = sqlx::query(
            r#"
            INSERT INTO votes (id, poll_id, option_id, user_id, exclusive, created_at)
            SELECT $1, o.poll_id, o.id, $4, $5, $6
            FROM poll_options o
            WHERE o.id = $3 AND o.poll_id = $2
            "#,
        )
        .bind(vote.id.as_uuid())
        .bind(vote.poll_id.as_uuid())
        .bind(vote.option_id.as_uuid())
        .bind(vote.voter.as_ref().map(UserId::as_str))
        .bind(policy.is_exclusive())
        .bind(vote.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(map_insert_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::OptionNotFound,
                format!("Option {} does not belong to poll {}", vote.option_id, vote.poll_id),
            )
            .with_detail("option_id", vote.option_id.to_string()));
        }

        Ok(())
    }

    async fn has_user_voted_on_poll(
        &self,
        poll_id: &PollId,
        user_id: &UserId,
    ) -> Result<bool, DomainError> {
        let result: (bool,) = sqlx::query_as("SELECT has_user_voted_on_poll($1, $2)")
            .bind(poll_id.as_uuid())
            .bind(user_id.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to check vote eligibility: {}", e),
                )
            })?;

        Ok(result.0)
    }
}

fn map_insert_error(e: sqlx::Error) -> DomainError {
    match e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => DomainError::new(
            ErrorCode::DuplicateVote,
            "You have already voted on this poll",
        ),
        e => DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to insert vote: {}", e),
        ),
    }
}

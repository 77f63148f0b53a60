//! Repository for the `comparisons` table.

use sqlx::PgPool;
use x121_core::types::DbId;

use crate::models::comparison::{Comparison, CreateComparison};

/// Provides access to comparisons.
pub struct ComparisonRepo;

impl ComparisonRepo {
    /// Insert a new comparison, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateComparison,
    ) -> Result<Comparison, sqlx::Error> {
        sqlx::query_as::<_, Comparison>(
            "INSERT INTO comparisons (assignment_id, user_id, completed) \
             VALUES ($1, $2, $3) \
             RETURNING id, assignment_id, user_id, completed, created_at",
        )
        .bind(input.assignment_id)
        .bind(input.user_id)
        .bind(input.completed)
        .fetch_one(pool)
        .await
    }

    /// Number of completed comparisons a user has made for an assignment.
    pub async fn completed_count_for_user(
        pool: &PgPool,
        assignment_id: DbId,
        user_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let count: Option<i64> = sqlx::query_scalar(
            "SELECT COUNT(*) FROM comparisons \
             WHERE assignment_id = $1 AND user_id = $2 AND completed = TRUE",
        )
        .bind(assignment_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(count.unwrap_or(0))
    }
}

//! Repository for the `answers` table.

use sqlx::PgPool;
use x121_core::types::DbId;

use crate::models::answer::{Answer, CreateAnswer};

/// Provides access to answers.
pub struct AnswerRepo;

impl AnswerRepo {
    /// Insert a new answer, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateAnswer) -> Result<Answer, sqlx::Error> {
        sqlx::query_as::<_, Answer>(
            "INSERT INTO answers \
                (assignment_id, user_id, group_id, active, comparable, practice, draft) \
             VALUES ($1, $2, $3, COALESCE($4, TRUE), COALESCE($5, TRUE), \
                     COALESCE($6, FALSE), COALESCE($7, FALSE)) \
             RETURNING id, assignment_id, user_id, group_id, active, comparable, \
                       practice, draft, created_at",
        )
        .bind(input.assignment_id)
        .bind(input.user_id)
        .bind(input.group_id)
        .bind(input.active)
        .bind(input.comparable)
        .bind(input.practice)
        .bind(input.draft)
        .fetch_one(pool)
        .await
    }

    /// Whether a qualifying answer exists for the user or their group.
    ///
    /// Only active, comparable, non-practice, non-draft answers count. A
    /// `group_id` of `None` never matches group answers.
    pub async fn has_answered(
        pool: &PgPool,
        assignment_id: DbId,
        user_id: DbId,
        group_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS( \
                SELECT 1 FROM answers \
                WHERE assignment_id = $1 \
                  AND active = TRUE AND comparable = TRUE \
                  AND practice = FALSE AND draft = FALSE \
                  AND (user_id = $2 OR (group_id IS NOT NULL AND group_id = $3)) \
             )",
        )
        .bind(assignment_id)
        .bind(user_id)
        .bind(group_id)
        .fetch_one(pool)
        .await
    }
}

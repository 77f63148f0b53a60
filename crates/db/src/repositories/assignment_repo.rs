//! Repository for the `assignments` table.

use sqlx::PgPool;
use x121_core::types::DbId;

use crate::models::assignment::{Assignment, AssignmentWithCourse, CreateAssignment};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, course_id, name, active, answer_end, compare_end, total_comparisons_required";

/// Provides access to assignments.
pub struct AssignmentRepo;

impl AssignmentRepo {
    /// Insert a new assignment, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAssignment,
    ) -> Result<Assignment, sqlx::Error> {
        let query = format!(
            "INSERT INTO assignments \
                (course_id, name, active, answer_end, compare_end, total_comparisons_required) \
             VALUES ($1, $2, COALESCE($3, TRUE), $4, $5, COALESCE($6, 0)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Assignment>(&query)
            .bind(input.course_id)
            .bind(&input.name)
            .bind(input.active)
            .bind(input.answer_end)
            .bind(input.compare_end)
            .bind(input.total_comparisons_required)
            .fetch_one(pool)
            .await
    }

    /// List active assignments whose course is also active.
    ///
    /// Deadlines are not filtered here; callers test each row against the
    /// reminder window.
    pub async fn list_active_in_active_courses(
        pool: &PgPool,
    ) -> Result<Vec<AssignmentWithCourse>, sqlx::Error> {
        sqlx::query_as::<_, AssignmentWithCourse>(
            "SELECT a.id, a.course_id, a.name, a.active, a.answer_end, a.compare_end, \
                    a.total_comparisons_required, c.name AS course_name \
             FROM assignments a \
             JOIN courses c ON c.id = a.course_id AND c.active = TRUE \
             WHERE a.active = TRUE \
             ORDER BY a.id",
        )
        .fetch_all(pool)
        .await
    }

    /// Set the active flag. Returns `true` if the assignment exists.
    pub async fn set_active(pool: &PgPool, id: DbId, active: bool) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE assignments SET active = $2 WHERE id = $1")
            .bind(id)
            .bind(active)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

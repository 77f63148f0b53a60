//! Repository for the `courses` table.

use sqlx::PgPool;
use x121_core::types::DbId;

use crate::models::course::{Course, CreateCourse};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, active, created_at";

/// Provides access to courses.
pub struct CourseRepo;

impl CourseRepo {
    /// Insert a new course, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCourse) -> Result<Course, sqlx::Error> {
        let query = format!(
            "INSERT INTO courses (name, active) \
             VALUES ($1, COALESCE($2, TRUE)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(&input.name)
            .bind(input.active)
            .fetch_one(pool)
            .await
    }

    /// Set the active flag. Returns `true` if the course exists.
    pub async fn set_active(pool: &PgPool, id: DbId, active: bool) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE courses SET active = $2 WHERE id = $1")
            .bind(id)
            .bind(active)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

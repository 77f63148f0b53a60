//! Repository for the `groups` table.

use sqlx::PgPool;

use crate::models::group::{CreateGroup, Group};

/// Provides access to course groups.
pub struct GroupRepo;

impl GroupRepo {
    /// Insert a new group, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateGroup) -> Result<Group, sqlx::Error> {
        sqlx::query_as::<_, Group>(
            "INSERT INTO groups (course_id, name) \
             VALUES ($1, $2) \
             RETURNING id, course_id, name, active",
        )
        .bind(input.course_id)
        .bind(&input.name)
        .fetch_one(pool)
        .await
    }
}

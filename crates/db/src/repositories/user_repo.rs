//! Repository for the `users` table.

use sqlx::PgPool;
use x121_core::reminders::EmailNotificationMethod;
use x121_core::types::DbId;

use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, display_name, email, email_notification_method, created_at";

/// Provides access to users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// If `email_notification_method` is `None`, defaults to `enable`.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (display_name, email, email_notification_method) \
             VALUES ($1, $2, COALESCE($3, 'enable')) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.display_name)
            .bind(&input.email)
            .bind(input.email_notification_method.map(|m| m.as_str()))
            .fetch_one(pool)
            .await
    }

    /// Change a user's email notification preference.
    pub async fn set_notification_method(
        pool: &PgPool,
        id: DbId,
        method: EmailNotificationMethod,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET email_notification_method = $2 WHERE id = $1")
            .bind(id)
            .bind(method.as_str())
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

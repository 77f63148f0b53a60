//! Repository for the `assignment_notifications` table.

use sqlx::PgPool;
use x121_core::reminders::NotificationType;
use x121_core::types::DbId;

use crate::models::assignment_notification::AssignmentNotification;

/// Column list for `assignment_notifications` queries.
const COLUMNS: &str = "id, assignment_id, user_id, notification_type, timestamp";

/// Records which deadline reminders have been sent.
pub struct AssignmentNotificationRepo;

impl AssignmentNotificationRepo {
    /// Whether a reminder of `kind` was already recorded for the pair.
    pub async fn exists(
        pool: &PgPool,
        assignment_id: DbId,
        user_id: DbId,
        kind: NotificationType,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS( \
                SELECT 1 FROM assignment_notifications \
                WHERE assignment_id = $1 AND user_id = $2 AND notification_type = $3 \
             )",
        )
        .bind(assignment_id)
        .bind(user_id)
        .bind(kind.as_str())
        .fetch_one(pool)
        .await
    }

    /// Record a reminder, returning the new row ID.
    ///
    /// Returns `None` when a row for the same triple already exists; the
    /// unique constraint turns a concurrent duplicate into a no-op.
    pub async fn record(
        pool: &PgPool,
        assignment_id: DbId,
        user_id: DbId,
        kind: NotificationType,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO assignment_notifications (assignment_id, user_id, notification_type) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (assignment_id, user_id, notification_type) DO NOTHING \
             RETURNING id",
        )
        .bind(assignment_id)
        .bind(user_id)
        .bind(kind.as_str())
        .fetch_optional(pool)
        .await
    }

    /// List all reminders recorded for an assignment, oldest first.
    pub async fn list_for_assignment(
        pool: &PgPool,
        assignment_id: DbId,
    ) -> Result<Vec<AssignmentNotification>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM assignment_notifications \
             WHERE assignment_id = $1 \
             ORDER BY timestamp, id"
        );
        sqlx::query_as::<_, AssignmentNotification>(&query)
            .bind(assignment_id)
            .fetch_all(pool)
            .await
    }
}

//! Sent deadline reminder records.

use serde::Serialize;
use sqlx::FromRow;
use x121_core::error::CoreError;
use x121_core::reminders::NotificationType;
use x121_core::types::{DbId, Timestamp};

/// A row from the `assignment_notifications` table.
///
/// At most one row exists per `(assignment_id, user_id, notification_type)`.
/// Rows are never updated or deleted by the scanner.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AssignmentNotification {
    pub id: DbId,
    pub assignment_id: DbId,
    pub user_id: DbId,
    pub notification_type: String,
    pub timestamp: Timestamp,
}

impl AssignmentNotification {
    /// Parsed notification type.
    pub fn kind(&self) -> Result<NotificationType, CoreError> {
        NotificationType::from_str_db(&self.notification_type)
    }
}

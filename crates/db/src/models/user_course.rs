//! Course enrollment model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use x121_core::error::CoreError;
use x121_core::reminders::EmailNotificationMethod;
use x121_core::types::DbId;

/// A row from the `user_courses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserCourse {
    pub id: DbId,
    pub user_id: DbId,
    pub course_id: DbId,
    pub course_role: String,
    pub group_id: Option<DbId>,
}

/// DTO for enrolling a user in a course.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserCourse {
    pub user_id: DbId,
    pub course_id: DbId,
    pub course_role: String,
    pub group_id: Option<DbId>,
}

/// A student enrolled in a course, joined with the user fields a reminder
/// needs.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EnrolledStudent {
    pub user_id: DbId,
    pub display_name: String,
    pub email: Option<String>,
    pub email_notification_method: String,
    /// The student's group within the course, if any.
    pub group_id: Option<DbId>,
}

impl EnrolledStudent {
    /// Parsed email notification preference.
    pub fn notification_method(&self) -> Result<EmailNotificationMethod, CoreError> {
        EmailNotificationMethod::from_str_db(&self.email_notification_method)
    }
}

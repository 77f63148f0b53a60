//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use x121_core::error::CoreError;
use x121_core::reminders::EmailNotificationMethod;
use x121_core::types::{DbId, Timestamp};

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub display_name: String,
    pub email: Option<String>,
    pub email_notification_method: String,
    pub created_at: Timestamp,
}

impl User {
    /// Parsed email notification preference.
    pub fn notification_method(&self) -> Result<EmailNotificationMethod, CoreError> {
        EmailNotificationMethod::from_str_db(&self.email_notification_method)
    }
}

/// DTO for creating a new user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub display_name: String,
    pub email: Option<String>,
    /// Defaults to `enable` if omitted.
    pub email_notification_method: Option<EmailNotificationMethod>,
}

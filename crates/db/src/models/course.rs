//! Course entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use x121_core::types::{DbId, Timestamp};

/// A row from the `courses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Course {
    pub id: DbId,
    pub name: String,
    pub active: bool,
    pub created_at: Timestamp,
}

/// DTO for creating a new course.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCourse {
    pub name: String,
    /// Defaults to `true` if omitted.
    pub active: Option<bool>,
}

//! Answer entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use x121_core::types::{DbId, Timestamp};

/// A row from the `answers` table.
///
/// An answer is submitted either by a single user or on behalf of a group.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Answer {
    pub id: DbId,
    pub assignment_id: DbId,
    pub user_id: Option<DbId>,
    pub group_id: Option<DbId>,
    pub active: bool,
    pub comparable: bool,
    pub practice: bool,
    pub draft: bool,
    pub created_at: Timestamp,
}

/// DTO for creating an answer. Flags default to a regular, submitted answer
/// (active, comparable, not practice, not draft).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateAnswer {
    pub assignment_id: DbId,
    pub user_id: Option<DbId>,
    pub group_id: Option<DbId>,
    pub active: Option<bool>,
    pub comparable: Option<bool>,
    pub practice: Option<bool>,
    pub draft: Option<bool>,
}

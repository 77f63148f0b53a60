//! Comparison entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use x121_core::types::{DbId, Timestamp};

/// A row from the `comparisons` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comparison {
    pub id: DbId,
    pub assignment_id: DbId,
    pub user_id: DbId,
    pub completed: bool,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateComparison {
    pub assignment_id: DbId,
    pub user_id: DbId,
    pub completed: bool,
}

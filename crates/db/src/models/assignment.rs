//! Assignment entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use x121_core::reminders::{self, DeadlineWindow};
use x121_core::types::{DbId, Timestamp};

/// A row from the `assignments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Assignment {
    pub id: DbId,
    pub course_id: DbId,
    pub name: String,
    pub active: bool,
    pub answer_end: Timestamp,
    pub compare_end: Option<Timestamp>,
    pub total_comparisons_required: i32,
}

impl Assignment {
    /// Whether the answer period closes within `window`.
    pub fn answer_period_ending_soon(&self, window: &DeadlineWindow) -> bool {
        reminders::answer_period_ending_soon(self.answer_end, window)
    }

    /// Whether the comparison period closes within `window`.
    ///
    /// Never true for assignments that require no comparisons.
    pub fn comparison_period_ending_soon(&self, window: &DeadlineWindow) -> bool {
        reminders::comparison_period_ending_soon(
            self.compare_end,
            self.total_comparisons_required,
            window,
        )
    }
}

/// An assignment joined with the name of its owning course.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AssignmentWithCourse {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub assignment: Assignment,
    pub course_name: String,
}

/// DTO for creating a new assignment.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAssignment {
    pub course_id: DbId,
    pub name: String,
    /// Defaults to `true` if omitted.
    pub active: Option<bool>,
    pub answer_end: Timestamp,
    pub compare_end: Option<Timestamp>,
    /// Defaults to 0 (no comparison phase) if omitted.
    pub total_comparisons_required: Option<i32>,
}

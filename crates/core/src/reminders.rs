//! Deadline reminder rules.
//!
//! Pure functions shared by the repository layer and the scanner: the
//! lookahead horizon, the "ending soon" predicates for both assignment
//! periods, and the per-student eligibility checks that do not need the
//! database.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// How far ahead of `now` a deadline must fall to trigger a reminder.
pub const REMINDER_LOOKAHEAD_HOURS: i64 = 24;

/// Course role whose enrollments are scanned for reminders.
pub const COURSE_ROLE_STUDENT: &str = "student";

/// Event published when a student has not answered and the answer period
/// closes within the lookahead.
pub const EVENT_ANSWER_PERIOD_ENDING_SOON: &str = "assignment.answer_period_ending_soon";

/// Event published when a student has not finished the required comparisons
/// and the comparison period closes within the lookahead.
pub const EVENT_COMPARISON_PERIOD_ENDING_SOON: &str = "assignment.comparison_period_ending_soon";

// ---------------------------------------------------------------------------
// Horizon
// ---------------------------------------------------------------------------

/// Compute the end of the lookahead window for a scan started at `now`.
pub fn reminder_horizon(now: Timestamp) -> Timestamp {
    now + Duration::hours(REMINDER_LOOKAHEAD_HOURS)
}

/// The half-open window `(now, horizon]` a deadline must fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlineWindow {
    pub now: Timestamp,
    pub horizon: Timestamp,
}

impl DeadlineWindow {
    /// Build the window for a scan started at `now`.
    pub fn starting_at(now: Timestamp) -> Self {
        Self {
            now,
            horizon: reminder_horizon(now),
        }
    }

    /// Whether `deadline` has not passed yet but falls within the lookahead.
    pub fn contains(&self, deadline: Timestamp) -> bool {
        self.now < deadline && deadline <= self.horizon
    }
}

/// Whether an answer period ending at `answer_end` is ending soon.
pub fn answer_period_ending_soon(answer_end: Timestamp, window: &DeadlineWindow) -> bool {
    window.contains(answer_end)
}

/// Whether a comparison period is ending soon.
///
/// Assignments without a comparison phase (no end time, or zero required
/// comparisons) never match.
pub fn comparison_period_ending_soon(
    compare_end: Option<Timestamp>,
    total_comparisons_required: i32,
    window: &DeadlineWindow,
) -> bool {
    if total_comparisons_required <= 0 {
        return false;
    }
    compare_end.is_some_and(|end| window.contains(end))
}

// ---------------------------------------------------------------------------
// Notification type
// ---------------------------------------------------------------------------

/// Kind of deadline reminder recorded in `assignment_notifications`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    AnswerPeriodEnd,
    ComparisonPeriodEnd,
}

impl NotificationType {
    /// Parse a notification type string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "answer_period_end" => Ok(Self::AnswerPeriodEnd),
            "comparison_period_end" => Ok(Self::ComparisonPeriodEnd),
            _ => Err(CoreError::Validation(format!(
                "Invalid notification type '{s}'. Must be one of: answer_period_end, comparison_period_end"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AnswerPeriodEnd => "answer_period_end",
            Self::ComparisonPeriodEnd => "comparison_period_end",
        }
    }

    /// Name of the event published for this kind of reminder.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::AnswerPeriodEnd => EVENT_ANSWER_PERIOD_ENDING_SOON,
            Self::ComparisonPeriodEnd => EVENT_COMPARISON_PERIOD_ENDING_SOON,
        }
    }
}

// ---------------------------------------------------------------------------
// Email preference
// ---------------------------------------------------------------------------

/// A user's email notification preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailNotificationMethod {
    Enable,
    Disable,
}

impl EmailNotificationMethod {
    /// Parse a preference string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "enable" => Ok(Self::Enable),
            "disable" => Ok(Self::Disable),
            _ => Err(CoreError::Validation(format!(
                "Invalid email notification method '{s}'. Must be one of: enable, disable"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enable => "enable",
            Self::Disable => "disable",
        }
    }
}

// ---------------------------------------------------------------------------
// Eligibility
// ---------------------------------------------------------------------------

/// Whether a student can be reached by an email reminder at all.
pub fn is_reachable_by_email(method: EmailNotificationMethod, email: Option<&str>) -> bool {
    method == EmailNotificationMethod::Enable && email.is_some_and(|e| !e.trim().is_empty())
}

/// Whether a student has completed the comparisons an assignment requires.
pub fn has_compared(completed: i64, required: i32) -> bool {
    completed >= i64::from(required)
}

/// Why a student was not reminded during a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Email notifications disabled or no email address on file.
    Unreachable,
    /// The student already answered / finished the required comparisons.
    AlreadyCompleted,
    /// A reminder of this type was recorded by an earlier scan.
    AlreadyNotified,
    /// A concurrent scan recorded the reminder between our check and insert.
    LostRace,
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    // -- Horizon --

    #[test]
    fn horizon_is_twenty_four_hours_ahead() {
        assert_eq!(
            reminder_horizon(now()),
            Utc.with_ymd_and_hms(2024, 3, 2, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn window_excludes_now_and_includes_horizon() {
        let window = DeadlineWindow::starting_at(now());
        assert!(!window.contains(now()));
        assert!(!window.contains(now() - Duration::minutes(1)));
        assert!(window.contains(now() + Duration::seconds(1)));
        assert!(window.contains(window.horizon));
        assert!(!window.contains(window.horizon + Duration::seconds(1)));
    }

    // -- Answer period --

    #[test]
    fn answer_period_ending_in_two_hours_matches() {
        let window = DeadlineWindow::starting_at(now());
        assert!(answer_period_ending_soon(now() + Duration::hours(2), &window));
    }

    #[test]
    fn answer_period_beyond_lookahead_does_not_match() {
        let window = DeadlineWindow::starting_at(now());
        assert!(!answer_period_ending_soon(now() + Duration::hours(25), &window));
    }

    #[test]
    fn answer_period_already_closed_does_not_match() {
        let window = DeadlineWindow::starting_at(now());
        assert!(!answer_period_ending_soon(now() - Duration::hours(1), &window));
    }

    // -- Comparison period --

    #[test]
    fn comparison_period_requires_comparisons() {
        let window = DeadlineWindow::starting_at(now());
        let end = Some(now() + Duration::hours(3));
        assert!(comparison_period_ending_soon(end, 3, &window));
        assert!(!comparison_period_ending_soon(end, 0, &window));
    }

    #[test]
    fn comparison_period_without_end_does_not_match() {
        let window = DeadlineWindow::starting_at(now());
        assert!(!comparison_period_ending_soon(None, 3, &window));
    }

    #[test]
    fn comparison_period_outside_window_does_not_match() {
        let window = DeadlineWindow::starting_at(now());
        assert!(!comparison_period_ending_soon(Some(now()), 3, &window));
        assert!(!comparison_period_ending_soon(
            Some(now() + Duration::hours(48)),
            3,
            &window
        ));
    }

    // -- NotificationType --

    #[test]
    fn notification_type_from_str_valid() {
        assert_eq!(
            NotificationType::from_str_db("answer_period_end").unwrap(),
            NotificationType::AnswerPeriodEnd
        );
        assert_eq!(
            NotificationType::from_str_db("comparison_period_end").unwrap(),
            NotificationType::ComparisonPeriodEnd
        );
    }

    #[test]
    fn notification_type_from_str_invalid() {
        assert!(NotificationType::from_str_db("").is_err());
        assert!(NotificationType::from_str_db("answer_period_start").is_err());
    }

    #[test]
    fn notification_types_publish_on_distinct_events() {
        assert_eq!(
            NotificationType::AnswerPeriodEnd.event_type(),
            EVENT_ANSWER_PERIOD_ENDING_SOON
        );
        assert_eq!(
            NotificationType::ComparisonPeriodEnd.event_type(),
            EVENT_COMPARISON_PERIOD_ENDING_SOON
        );
    }

    // -- Eligibility --

    #[test]
    fn reachable_requires_enabled_preference_and_email() {
        use EmailNotificationMethod::*;
        assert!(is_reachable_by_email(Enable, Some("student@example.com")));
        assert!(!is_reachable_by_email(Disable, Some("student@example.com")));
        assert!(!is_reachable_by_email(Enable, None));
        assert!(!is_reachable_by_email(Enable, Some("")));
        assert!(!is_reachable_by_email(Enable, Some("   ")));
    }

    #[test]
    fn email_method_from_str_invalid() {
        assert!(EmailNotificationMethod::from_str_db("sometimes").is_err());
        assert_eq!(
            EmailNotificationMethod::from_str_db("enable").unwrap(),
            EmailNotificationMethod::Enable
        );
    }

    #[test]
    fn has_compared_at_or_above_requirement() {
        assert!(has_compared(3, 3));
        assert!(has_compared(4, 3));
        assert!(!has_compared(2, 3));
        assert!(has_compared(0, 0));
    }
}

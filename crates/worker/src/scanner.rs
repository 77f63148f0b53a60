//! Assignment deadline reminder scan.
//!
//! One scan runs two passes over active assignments in active courses: the
//! answer-period pass and the comparison-period pass. For every assignment
//! whose deadline closes within the lookahead window, each enrolled student
//! who has not completed the step, has not been reminded before, and can be
//! reached by email gets exactly one reminder.
//!
//! Students are processed one at a time and each reminder is recorded in
//! its own committed insert before the event is dispatched, so a retried or
//! overlapping scan never reminds the same student twice.

use std::sync::Arc;

use x121_core::reminders::{
    has_compared, is_reachable_by_email, DeadlineWindow, NotificationType, SkipReason,
};
use x121_core::types::Timestamp;
use x121_db::models::assignment::{Assignment, AssignmentWithCourse};
use x121_db::models::user_course::EnrolledStudent;
use x121_db::repositories::{
    AnswerRepo, AssignmentNotificationRepo, AssignmentRepo, ComparisonRepo, UserCourseRepo,
};
use x121_db::DbPool;
use x121_events::{DeadlineReminder, ReminderDispatcher};

use crate::error::ScanError;

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Counters for a single pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassSummary {
    /// Assignments whose deadline fell inside the window.
    pub assignments: usize,
    pub students_examined: usize,
    pub reminders_sent: usize,
    pub skipped_unreachable: usize,
    pub skipped_completed: usize,
    pub skipped_already_notified: usize,
    pub skipped_lost_race: usize,
}

impl PassSummary {
    fn record_skip(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::Unreachable => self.skipped_unreachable += 1,
            SkipReason::AlreadyCompleted => self.skipped_completed += 1,
            SkipReason::AlreadyNotified => self.skipped_already_notified += 1,
            SkipReason::LostRace => self.skipped_lost_race += 1,
        }
    }
}

/// Result of one full scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub answer_period: PassSummary,
    pub comparison_period: PassSummary,
}

impl ScanSummary {
    /// Total reminders dispatched by both passes.
    pub fn reminders_sent(&self) -> usize {
        self.answer_period.reminders_sent + self.comparison_period.reminders_sent
    }
}

/// What happened to one student in one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Reminded,
    Skipped(SkipReason),
}

// ---------------------------------------------------------------------------
// Scanner
// ---------------------------------------------------------------------------

/// Finds students with an imminent, unmet deadline and reminds them once.
pub struct DeadlineReminderScanner {
    pool: DbPool,
    dispatcher: Arc<dyn ReminderDispatcher>,
}

impl DeadlineReminderScanner {
    /// Create a scanner that reads from `pool` and publishes through
    /// `dispatcher`.
    pub fn new(pool: DbPool, dispatcher: Arc<dyn ReminderDispatcher>) -> Self {
        Self { pool, dispatcher }
    }

    /// Run both passes for a scan started at `now`.
    ///
    /// Safe to call repeatedly or concurrently: already-recorded reminders
    /// are skipped, and the unique constraint on the record table settles
    /// races between overlapping scans.
    pub async fn run_scan(&self, now: Timestamp) -> Result<ScanSummary, ScanError> {
        let window = DeadlineWindow::starting_at(now);
        tracing::info!(%now, horizon = %window.horizon, "Deadline reminder scan started");

        let answer_period = self
            .scan_pass(NotificationType::AnswerPeriodEnd, &window)
            .await?;
        let comparison_period = self
            .scan_pass(NotificationType::ComparisonPeriodEnd, &window)
            .await?;

        let summary = ScanSummary {
            answer_period,
            comparison_period,
        };
        tracing::info!(
            answer_reminders = summary.answer_period.reminders_sent,
            comparison_reminders = summary.comparison_period.reminders_sent,
            "Deadline reminder scan finished"
        );
        Ok(summary)
    }

    /// Run a single pass for one kind of deadline.
    async fn scan_pass(
        &self,
        kind: NotificationType,
        window: &DeadlineWindow,
    ) -> Result<PassSummary, ScanError> {
        tracing::debug!(
            notification_type = kind.as_str(),
            "Looking for assignments with a period ending soon"
        );

        let candidates = AssignmentRepo::list_active_in_active_courses(&self.pool).await?;
        let mut summary = PassSummary::default();

        for candidate in &candidates {
            let Some(deadline) = deadline_within(kind, &candidate.assignment, window) else {
                continue;
            };
            summary.assignments += 1;

            let students =
                UserCourseRepo::list_students(&self.pool, candidate.assignment.course_id).await?;

            for student in &students {
                summary.students_examined += 1;
                match self
                    .remind_student(kind, candidate, deadline, student, window.now)
                    .await?
                {
                    Outcome::Reminded => summary.reminders_sent += 1,
                    Outcome::Skipped(reason) => summary.record_skip(reason),
                }
            }
        }

        tracing::debug!(
            notification_type = kind.as_str(),
            assignments = summary.assignments,
            students = summary.students_examined,
            reminders = summary.reminders_sent,
            "Pass finished"
        );
        Ok(summary)
    }

    /// Check one student and, when eligible, record and dispatch a reminder.
    async fn remind_student(
        &self,
        kind: NotificationType,
        candidate: &AssignmentWithCourse,
        deadline: Timestamp,
        student: &EnrolledStudent,
        now: Timestamp,
    ) -> Result<Outcome, ScanError> {
        let assignment = &candidate.assignment;

        let method = student.notification_method()?;
        let email = match student.email.as_deref() {
            Some(email) if is_reachable_by_email(method, Some(email)) => email,
            _ => return Ok(Outcome::Skipped(SkipReason::Unreachable)),
        };

        if self.has_completed(kind, assignment, student).await? {
            return Ok(Outcome::Skipped(SkipReason::AlreadyCompleted));
        }

        if AssignmentNotificationRepo::exists(&self.pool, assignment.id, student.user_id, kind)
            .await?
        {
            return Ok(Outcome::Skipped(SkipReason::AlreadyNotified));
        }

        let recorded =
            AssignmentNotificationRepo::record(&self.pool, assignment.id, student.user_id, kind)
                .await?;
        if recorded.is_none() {
            tracing::debug!(
                assignment_id = assignment.id,
                user_id = student.user_id,
                notification_type = kind.as_str(),
                "Reminder recorded by a concurrent scan, skipping"
            );
            return Ok(Outcome::Skipped(SkipReason::LostRace));
        }

        tracing::debug!(
            assignment_id = assignment.id,
            user_id = student.user_id,
            notification_type = kind.as_str(),
            "Reminding student"
        );
        self.dispatcher.dispatch(&DeadlineReminder {
            kind,
            course_id: assignment.course_id,
            course_name: candidate.course_name.clone(),
            assignment_id: assignment.id,
            assignment_name: assignment.name.clone(),
            deadline,
            student_id: student.user_id,
            student_name: student.display_name.clone(),
            student_email: email.to_string(),
            scanned_at: now,
        });

        Ok(Outcome::Reminded)
    }

    /// Whether the student already did what the reminder would ask for.
    async fn has_completed(
        &self,
        kind: NotificationType,
        assignment: &Assignment,
        student: &EnrolledStudent,
    ) -> Result<bool, ScanError> {
        let completed = match kind {
            NotificationType::AnswerPeriodEnd => {
                AnswerRepo::has_answered(
                    &self.pool,
                    assignment.id,
                    student.user_id,
                    student.group_id,
                )
                .await?
            }
            NotificationType::ComparisonPeriodEnd => {
                let done = ComparisonRepo::completed_count_for_user(
                    &self.pool,
                    assignment.id,
                    student.user_id,
                )
                .await?;
                has_compared(done, assignment.total_comparisons_required)
            }
        };
        Ok(completed)
    }
}

/// The deadline `kind` refers to, if it closes within `window`.
pub fn deadline_within(
    kind: NotificationType,
    assignment: &Assignment,
    window: &DeadlineWindow,
) -> Option<Timestamp> {
    match kind {
        NotificationType::AnswerPeriodEnd => assignment
            .answer_period_ending_soon(window)
            .then_some(assignment.answer_end),
        NotificationType::ComparisonPeriodEnd => {
            if assignment.comparison_period_ending_soon(window) {
                assignment.compare_end
            } else {
                None
            }
        }
    }
}

//! Deadline reminder events.
//!
//! The scanner hands every eligible (course, assignment, student) triple to
//! a [`ReminderDispatcher`]. Dispatch is fire-and-forget: subscribers
//! compose and deliver the actual message and never report back.

use serde::Serialize;
use serde_json::json;
use x121_core::reminders::NotificationType;
use x121_core::types::{DbId, Timestamp};

use crate::bus::{EventBus, PlatformEvent};

/// Everything a subscriber needs to compose a deadline reminder without
/// querying the database.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeadlineReminder {
    pub kind: NotificationType,
    pub course_id: DbId,
    pub course_name: String,
    pub assignment_id: DbId,
    pub assignment_name: String,
    /// End of the answer or comparison period, depending on `kind`.
    pub deadline: Timestamp,
    pub student_id: DbId,
    pub student_name: String,
    pub student_email: String,
    /// When the scan that produced this reminder started.
    pub scanned_at: Timestamp,
}

impl DeadlineReminder {
    /// Convert into the event published on the bus.
    pub fn to_event(&self) -> PlatformEvent {
        PlatformEvent::new(self.kind.event_type())
            .with_source("assignment", self.assignment_id)
            .with_payload(json!({
                "course": {
                    "id": self.course_id,
                    "name": self.course_name,
                },
                "assignment": {
                    "id": self.assignment_id,
                    "name": self.assignment_name,
                },
                "student": {
                    "id": self.student_id,
                    "name": self.student_name,
                    "email": self.student_email,
                },
                "deadline": self.deadline,
            }))
            .at(self.scanned_at)
    }
}

/// Outbound channel for deadline reminders.
pub trait ReminderDispatcher: Send + Sync {
    /// Hand a reminder off for delivery. Must not block on subscribers.
    fn dispatch(&self, reminder: &DeadlineReminder);
}

impl ReminderDispatcher for EventBus {
    fn dispatch(&self, reminder: &DeadlineReminder) {
        self.publish(reminder.to_event());
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use x121_core::reminders::{EVENT_ANSWER_PERIOD_ENDING_SOON, EVENT_COMPARISON_PERIOD_ENDING_SOON};

    use super::*;

    fn reminder(kind: NotificationType) -> DeadlineReminder {
        let scanned_at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        DeadlineReminder {
            kind,
            course_id: 3,
            course_name: "Intro to Ecology".to_string(),
            assignment_id: 11,
            assignment_name: "Field notes".to_string(),
            deadline: Utc.with_ymd_and_hms(2024, 3, 1, 14, 0, 0).unwrap(),
            student_id: 7,
            student_name: "Robin".to_string(),
            student_email: "robin@example.com".to_string(),
            scanned_at,
        }
    }

    #[test]
    fn event_carries_course_assignment_and_student() {
        let event = reminder(NotificationType::AnswerPeriodEnd).to_event();

        assert_eq!(event.event_type, EVENT_ANSWER_PERIOD_ENDING_SOON);
        assert_eq!(event.source_entity_type.as_deref(), Some("assignment"));
        assert_eq!(event.source_entity_id, Some(11));
        assert_eq!(event.payload["course"]["id"], 3);
        assert_eq!(event.payload["assignment"]["name"], "Field notes");
        assert_eq!(event.payload["student"]["email"], "robin@example.com");
        assert!(event.payload["deadline"].is_string());
    }

    #[test]
    fn event_timestamp_is_scan_time() {
        let r = reminder(NotificationType::ComparisonPeriodEnd);
        let event = r.to_event();
        assert_eq!(event.timestamp, r.scanned_at);
        assert_eq!(event.event_type, EVENT_COMPARISON_PERIOD_ENDING_SOON);
    }

    #[tokio::test]
    async fn event_bus_dispatch_publishes_one_event() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.dispatch(&reminder(NotificationType::AnswerPeriodEnd));

        let received = rx.recv().await.expect("should receive the reminder");
        assert_eq!(received.event_type, EVENT_ANSWER_PERIOD_ENDING_SOON);
        assert!(rx.try_recv().is_err());
    }
}

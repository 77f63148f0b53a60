//! Operator log of published reminders.
//!
//! Subscribes to the [`EventBus`](x121_events::EventBus) and writes one
//! `info` line per reminder event. It runs as a long-lived background task
//! and shuts down when the bus sender is dropped.

use tokio::sync::broadcast;
use x121_core::reminders::{EVENT_ANSWER_PERIOD_ENDING_SOON, EVENT_COMPARISON_PERIOD_ENDING_SOON};
use x121_events::PlatformEvent;

/// Whether `event` is one of the deadline reminder events.
pub fn is_reminder_event(event: &PlatformEvent) -> bool {
    event.event_type == EVENT_ANSWER_PERIOD_ENDING_SOON
        || event.event_type == EVENT_COMPARISON_PERIOD_ENDING_SOON
}

/// Run the logging loop until the channel closes.
pub async fn run(mut receiver: broadcast::Receiver<PlatformEvent>) {
    loop {
        match receiver.recv().await {
            Ok(event) if is_reminder_event(&event) => {
                tracing::info!(
                    event_type = %event.event_type,
                    assignment_id = event.source_entity_id,
                    user_id = event.payload["student"]["id"].as_i64(),
                    "Deadline reminder published"
                );
            }
            Ok(_) => {}
            Err(broadcast::error::RecvError::Lagged(n)) => {
                tracing::warn!(skipped = n, "Reminder log lagged, some events were not logged");
            }
            Err(broadcast::error::RecvError::Closed) => {
                tracing::info!("Event bus closed, reminder log shutting down");
                break;
            }
        }
    }
}

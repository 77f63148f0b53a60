//! Event bus and reminder dispatch.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`PlatformEvent`]: the canonical domain event envelope.
//! - [`ReminderDispatcher`]: the seam the deadline scanner publishes
//!   through; [`EventBus`] is the production implementation.

pub mod bus;
pub mod reminder;

pub use bus::{EventBus, PlatformEvent};
pub use reminder::{DeadlineReminder, ReminderDispatcher};

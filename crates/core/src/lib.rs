//! Domain types and pure rules for the assignment deadline reminder scanner.

pub mod error;
pub mod reminders;
pub mod types;

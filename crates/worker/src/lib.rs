//! Assignment deadline reminder worker.
//!
//! [`scanner::DeadlineReminderScanner`] performs one idempotent scan for a
//! given instant; [`schedule::run`] drives it on a fixed interval with
//! retry and graceful cancellation.

pub mod config;
pub mod error;
pub mod reminder_log;
pub mod scanner;
pub mod schedule;

//! Periodic driver for the deadline reminder scan.
//!
//! Ticks on a fixed `tokio::time::interval`, awaits each scan to completion
//! before the next tick, and retries a failed scan with exponential backoff.
//! Retrying the whole scan is safe because already-recorded reminders are
//! skipped on re-entry.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use tokio_util::sync::CancellationToken;

use crate::scanner::{DeadlineReminderScanner, ScanSummary};

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Default time between scans.
pub const DEFAULT_SCAN_INTERVAL: Duration = Duration::from_secs(3600);

/// Tunable parameters for the exponential-backoff retry.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Attempts per tick, including the first one.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Upper bound on the delay between attempts.
    pub max_delay: Duration,
    /// Factor by which the delay grows after each failure.
    pub multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
            multiplier: 2.0,
        }
    }
}

/// Scan cadence plus retry policy.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleConfig {
    pub interval: Duration,
    pub retry: RetryConfig,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_SCAN_INTERVAL,
            retry: RetryConfig::default(),
        }
    }
}

/// Calculate the next backoff delay from the current delay and config.
///
/// The result is clamped to [`RetryConfig::max_delay`].
pub fn next_delay(current: Duration, config: &RetryConfig) -> Duration {
    let next_ms = (current.as_millis() as f64 * config.multiplier) as u64;
    Duration::from_millis(next_ms).min(config.max_delay)
}

// ---------------------------------------------------------------------------
// Retry
// ---------------------------------------------------------------------------

/// Run `op` until it succeeds, the attempts are exhausted, or `cancel` fires.
///
/// Returns `None` when every attempt failed or the token was cancelled.
pub async fn with_retry<T, E, F, Fut>(
    config: &RetryConfig,
    cancel: &CancellationToken,
    mut op: F,
) -> Option<T>
where
    E: Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut delay = config.initial_delay;
    let max_attempts = config.max_attempts.max(1);

    for attempt in 1..=max_attempts {
        tokio::select! {
            _ = cancel.cancelled() => return None,
            result = op() => match result {
                Ok(value) => return Some(value),
                Err(e) if attempt < max_attempts => {
                    tracing::warn!(
                        error = %e,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "Scan attempt failed, retrying",
                    );
                }
                Err(e) => {
                    tracing::error!(error = %e, attempts = attempt, "Scan failed, giving up until next tick");
                    return None;
                }
            }
        }

        // Wait before the next attempt, respecting cancellation.
        tokio::select! {
            _ = cancel.cancelled() => return None,
            _ = tokio::time::sleep(delay) => {}
        }

        delay = next_delay(delay, config);
    }

    None
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Run one scan at the current time, retrying on failure.
pub async fn run_once(
    scanner: &DeadlineReminderScanner,
    retry: &RetryConfig,
    cancel: &CancellationToken,
) -> Option<ScanSummary> {
    with_retry(retry, cancel, || scanner.run_scan(Utc::now())).await
}

/// Run the scan loop until `cancel` is triggered.
///
/// The first scan runs immediately; later scans follow every
/// `config.interval`. A tick that fires while a scan is still running is
/// delayed rather than run concurrently.
pub async fn run(scanner: DeadlineReminderScanner, config: ScheduleConfig, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = config.interval.as_secs(),
        max_attempts = config.retry.max_attempts,
        "Deadline reminder schedule started"
    );

    let mut interval = tokio::time::interval(config.interval);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Deadline reminder schedule stopping");
                break;
            }
            _ = interval.tick() => {
                if let Some(summary) = run_once(&scanner, &config.retry, &cancel).await {
                    if summary.reminders_sent() == 0 {
                        tracing::debug!("Deadline reminder scan: nothing to send");
                    }
                }
            }
        }
    }
}

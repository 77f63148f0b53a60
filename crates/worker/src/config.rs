use std::time::Duration;

use x121_db::DEFAULT_MAX_CONNECTIONS;

use crate::error::ConfigError;
use crate::schedule::{RetryConfig, ScheduleConfig};

/// Worker configuration loaded from environment variables.
///
/// Everything except `DATABASE_URL` has a default suitable for production;
/// override via environment variables (or a `.env` file).
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub schedule: ScheduleConfig,
}

impl WorkerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                   | Default  |
    /// |---------------------------|----------|
    /// | `DATABASE_URL`            | required |
    /// | `DB_MAX_CONNECTIONS`      | `20`     |
    /// | `SCAN_INTERVAL_SECS`      | `3600`   |
    /// | `SCAN_RETRY_MAX_ATTEMPTS` | `5`      |
    /// | `SCAN_RETRY_INITIAL_MS`   | `1000`   |
    /// | `SCAN_RETRY_MAX_MS`       | `60000`  |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;

        let defaults = ScheduleConfig::default();
        let interval_secs = parse_or(&lookup, "SCAN_INTERVAL_SECS", defaults.interval.as_secs())?;
        if interval_secs == 0 {
            return Err(ConfigError::Invalid {
                var: "SCAN_INTERVAL_SECS",
                value: "0".into(),
            });
        }

        let retry = RetryConfig {
            max_attempts: parse_or(&lookup, "SCAN_RETRY_MAX_ATTEMPTS", defaults.retry.max_attempts)?,
            initial_delay: Duration::from_millis(parse_or(
                &lookup,
                "SCAN_RETRY_INITIAL_MS",
                defaults.retry.initial_delay.as_millis() as u64,
            )?),
            max_delay: Duration::from_millis(parse_or(
                &lookup,
                "SCAN_RETRY_MAX_MS",
                defaults.retry.max_delay.as_millis() as u64,
            )?),
            multiplier: defaults.retry.multiplier,
        };

        Ok(Self {
            database_url,
            max_connections,
            schedule: ScheduleConfig {
                interval: Duration::from_secs(interval_secs),
                retry,
            },
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(var) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let config =
            WorkerConfig::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://localhost/x121")]))
                .unwrap();

        assert_eq!(config.database_url, "postgres://localhost/x121");
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.schedule, ScheduleConfig::default());
    }

    #[test]
    fn missing_database_url_is_an_error() {
        assert_matches!(
            WorkerConfig::from_lookup(lookup_from(&[])),
            Err(ConfigError::Missing("DATABASE_URL"))
        );
    }

    #[test]
    fn overrides_are_parsed() {
        let config = WorkerConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db/x121"),
            ("DB_MAX_CONNECTIONS", "4"),
            ("SCAN_INTERVAL_SECS", "900"),
            ("SCAN_RETRY_MAX_ATTEMPTS", "3"),
            ("SCAN_RETRY_INITIAL_MS", "250"),
            ("SCAN_RETRY_MAX_MS", "5000"),
        ]))
        .unwrap();

        assert_eq!(config.max_connections, 4);
        assert_eq!(config.schedule.interval, Duration::from_secs(900));
        assert_eq!(config.schedule.retry.max_attempts, 3);
        assert_eq!(config.schedule.retry.initial_delay, Duration::from_millis(250));
        assert_eq!(config.schedule.retry.max_delay, Duration::from_secs(5));
    }

    #[test]
    fn malformed_value_names_the_variable() {
        assert_matches!(
            WorkerConfig::from_lookup(lookup_from(&[
                ("DATABASE_URL", "postgres://db/x121"),
                ("SCAN_INTERVAL_SECS", "hourly"),
            ])),
            Err(ConfigError::Invalid { var: "SCAN_INTERVAL_SECS", .. })
        );
    }

    #[test]
    fn zero_interval_is_rejected() {
        assert_matches!(
            WorkerConfig::from_lookup(lookup_from(&[
                ("DATABASE_URL", "postgres://db/x121"),
                ("SCAN_INTERVAL_SECS", "0"),
            ])),
            Err(ConfigError::Invalid { var: "SCAN_INTERVAL_SECS", .. })
        );
    }
}

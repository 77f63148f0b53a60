use x121_core::error::CoreError;

/// Failure of a whole scan invocation. Any error aborts the scan; the
/// driver retries it from the start.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Invalid worker configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has invalid value '{value}'")]
    Invalid { var: &'static str, value: String },
}

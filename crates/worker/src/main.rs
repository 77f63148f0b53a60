use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use x121_events::EventBus;
use x121_worker::config::WorkerConfig;
use x121_worker::scanner::DeadlineReminderScanner;
use x121_worker::{reminder_log, schedule};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "x121_worker=debug,x121_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = match WorkerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid worker configuration");
            std::process::exit(1);
        }
    };
    tracing::info!(
        interval_secs = config.schedule.interval.as_secs(),
        "Loaded worker configuration"
    );

    // --- Database ---
    let pool = x121_db::create_pool(&config.database_url, config.max_connections)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    x121_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    x121_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Event bus ---
    let event_bus = Arc::new(EventBus::default());
    let log_handle = tokio::spawn(reminder_log::run(event_bus.subscribe()));

    // --- Scanner ---
    let scanner = DeadlineReminderScanner::new(pool, Arc::clone(&event_bus) as _);
    let cancel = CancellationToken::new();
    let schedule_handle = tokio::spawn(schedule::run(scanner, config.schedule, cancel.clone()));

    shutdown_signal().await;
    tracing::info!("Shutdown signal received");

    cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), schedule_handle).await;
    tracing::info!("Deadline reminder schedule stopped");

    // Dropping the last sender closes the channel and stops the log task.
    drop(event_bus);
    let _ = tokio::time::timeout(Duration::from_secs(5), log_handle).await;

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

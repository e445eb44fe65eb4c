pub mod report;

pub use report::ReportFormat;

use std::fs;
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Failed to create log directory: {0}")]
    LogDir(#[from] std::io::Error),
    #[error("Subscriber already installed: {0}")]
    Subscriber(#[from] TryInitError),
}

/// Initialize telemetry (logging).
///
/// - Creates `log_dir` if it doesn't exist.
/// - Sets up a daily rolling file appender (non-blocking) writing `file_name`.
/// - Configures a console layer (Compact, INFO+ unless `RUST_LOG` says otherwise).
/// - Configures a file layer (JSON, DEBUG+), which captures every mark and measure.
/// - Returns a `WorkerGuard` that must be kept alive to ensure logs are flushed on exit.
pub fn init(log_dir: &str, file_name: &str) -> Result<WorkerGuard, TelemetryError> {
    fs::create_dir_all(log_dir)?;

    let file_appender = tracing_appender::rolling::daily(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let console_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .compact()
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));

    let file_layer = fmt::layer()
        .json()
        .with_writer(non_blocking)
        .with_filter(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}

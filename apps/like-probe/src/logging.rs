use std::sync::Arc;

use anyhow::Result;
use sql_capture::{SqlCaptureLayer, TraceFile};
use tracing::Level;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use crate::config::LoggingConfig;

/// Install the global subscriber: human-readable logs on stderr plus the SQL
/// capture layer.
///
/// The stderr filter comes from `RUST_LOG`, else from `-v` (`-v` info, `-vv`
/// debug, `-vvv` trace), else from the configured level. The capture layer
/// always sees ORM, driver and probe events down to `debug`.
///
/// # Errors
///
/// Fails on an invalid filter directive or when a global subscriber is
/// already installed.
pub fn init(cfg: &LoggingConfig, verbose: u8, trace: Option<Arc<TraceFile>>) -> Result<()> {
    let level = match verbose {
        0 => cfg.level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let stderr_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)?,
    };

    let capture_filter = Targets::new()
        .with_target("sea_orm", Level::DEBUG)
        .with_target("sea_orm_migration", Level::INFO)
        .with_target("sqlx", Level::DEBUG)
        .with_target("blogs", Level::DEBUG);

    let mut capture = SqlCaptureLayer::new();
    if let Some(trace) = trace {
        capture = capture.with_trace_file(trace);
    }

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(stderr_filter),
        )
        .with(capture.with_filter(capture_filter))
        .try_init()?;

    Ok(())
}

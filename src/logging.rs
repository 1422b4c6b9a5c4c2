// src/logging.rs
// =============================================================================
// Sets up `tracing` output.
//
// - The server logs to the console and appends to <log_dir>/app.log, so
//   warnings about unreachable pages survive a restart
// - The scan command logs to stderr only; stdout is kept for results
//
// The RUST_LOG environment variable wins over the configured level.
// =============================================================================

use std::path::Path;

use anyhow::Result;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

// Console plus a plain (non-rotating) log file
//
// Fails if the log directory can't be created or the file can't be opened.
pub fn init_server_logger(log_dir: &Path, level: &str) -> Result<()> {
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix("app.log")
        .build(log_dir)?;

    let file_layer = fmt::layer().with_writer(file_appender).with_ansi(false);

    let console_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(false);

    // try_init so a second call (tests) is harmless
    let _ = tracing_subscriber::registry()
        .with(env_filter(level))
        .with(console_layer)
        .with(file_layer)
        .try_init();

    Ok(())
}

// Stderr only
pub fn init_cli_logger(level: &str) {
    let _ = tracing_subscriber::registry()
        .with(env_filter(level))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

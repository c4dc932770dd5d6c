//! Log sinks: console plus two severity-filtered files.

use crate::config::LoggingConfig;
use crate::error::{Result, ScraperError};
use std::path::Path;
use tracing::Subscriber;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

/// Flushes the file sinks when dropped. Hold it until the process exits.
#[must_use = "dropping the guards stops the file sinks"]
pub struct LogGuards {
    _info: WorkerGuard,
    _error: WorkerGuard,
}

/// Build the subscriber without installing it. `RUST_LOG` takes precedence
/// over the configured console level; the file sinks ignore both.
pub fn build_subscriber(config: &LoggingConfig) -> Result<(impl Subscriber + Send + Sync, LogGuards)> {
    let (info_writer, info_guard) = file_writer(&config.info_log)?;
    let (error_writer, error_guard) = file_writer(&config.error_log)?;

    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(console_directive(&config.level)));

    let console = fmt::layer().with_filter(console_filter);

    let info_sink = fmt::layer()
        .with_writer(info_writer)
        .with_ansi(false)
        .with_filter(LevelFilter::INFO);

    let error_sink = fmt::layer()
        .with_writer(error_writer)
        .with_ansi(false)
        .with_filter(LevelFilter::ERROR);

    let subscriber = Registry::default()
        .with(console)
        .with(info_sink)
        .with(error_sink);

    Ok((
        subscriber,
        LogGuards {
            _info: info_guard,
            _error: error_guard,
        },
    ))
}

/// Install the subscriber for the whole process. Call once from `main` and
/// keep the returned guards alive.
pub fn init(config: &LoggingConfig) -> Result<LogGuards> {
    let (subscriber, guards) = build_subscriber(config)?;
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| ScraperError::Config(format!("logging already initialized: {}", e)))?;
    Ok(guards)
}

/// A bare level applies to this crate and the binary; anything else is
/// passed through as a full filter directive.
fn console_directive(level: &str) -> String {
    if level.contains('=') || level.contains(',') {
        level.to_string()
    } else {
        format!("yt_channel_scraper={level},channel_scraper={level},warn")
    }
}

/// Append-only, never rotated
fn file_writer(path: &Path) -> Result<(NonBlocking, WorkerGuard)> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| ScraperError::Config(format!("invalid log file path: {}", path.display())))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(dir)
        .map_err(|e| ScraperError::Config(format!("cannot open log file {}: {}", path.display(), e)))?;
    Ok(tracing_appender::non_blocking(appender))
}

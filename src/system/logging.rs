//! Logging system initialization
//!
//! Installs a `tracing` subscriber made of two layers: a formatted output
//! layer (console or file, text or JSON) filtered by the configured level,
//! and the in-memory [`LogBufferLayer`] which keeps debug and above.

use std::sync::Arc;

use tracing_appender::rolling;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use super::log_buffer::{LogBuffer, LogBufferLayer, global_log_buffer, set_global_log_buffer};
use crate::config::LoggingConfig;
use crate::errors::{Result, SnaplinkError};

/// Initialize logging system based on configuration
///
/// **Note**: call once during startup, after configuration is loaded.
///
/// # Returns
/// * `WorkerGuard` - must be kept alive so non-blocking writes get flushed
///
/// # Errors
/// * the log file or rolling appender cannot be created
/// * a global subscriber is already installed
pub fn init_logging(config: &LoggingConfig) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let log_file = config.file.as_deref().filter(|f| !f.is_empty());

    let writer: Box<dyn std::io::Write + Send + Sync> = match log_file {
        Some(log_file) if config.enable_rotation => {
            let path = std::path::Path::new(log_file);
            let dir = path.parent().unwrap_or(std::path::Path::new("."));
            let filename = path
                .file_name()
                .and_then(|f| f.to_str())
                .unwrap_or("snaplink.log");
            let appender = rolling::Builder::new()
                .rotation(rolling::Rotation::DAILY)
                .filename_prefix(filename.trim_end_matches(".log"))
                .filename_suffix("log")
                .max_log_files(config.max_backups.max(1) as usize)
                .build(dir)
                .map_err(|e| {
                    SnaplinkError::config(format!("failed to create rolling log appender: {}", e))
                })?;
            Box::new(appender)
        }
        Some(log_file) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_file)
                .map_err(|e| {
                    SnaplinkError::config(format!("failed to open log file {}: {}", log_file, e))
                })?;
            Box::new(file)
        }
        // CLI 输出占用 stdout，日志走 stderr
        None => Box::new(std::io::stderr()),
    };

    let (non_blocking_writer, guard) = tracing_appender::non_blocking(writer);
    let filter = EnvFilter::try_new(&config.level).map_err(|e| {
        SnaplinkError::config(format!("invalid log level '{}': {}", config.level, e))
    })?;

    let output_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_writer)
        .with_level(true)
        .with_ansi(log_file.is_none());
    let output_layer = if config.format == "json" {
        output_layer.json().with_filter(filter).boxed()
    } else {
        output_layer.with_filter(filter).boxed()
    };

    let buffer = Arc::new(LogBuffer::new(config.buffer_capacity, config.buffer_trim));
    let buffer = if set_global_log_buffer(buffer.clone()) {
        buffer
    } else {
        global_log_buffer()
    };

    tracing_subscriber::registry()
        .with(output_layer)
        .with(LogBufferLayer::new(buffer).with_filter(LevelFilter::DEBUG))
        .try_init()
        .map_err(|e| SnaplinkError::config(format!("failed to install logger: {}", e)))?;

    Ok(guard)
}

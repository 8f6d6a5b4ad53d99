//! Structured logging infrastructure for tallyviz.

use crate::{ChartError, Result};
use std::{fs::OpenOptions, sync::Mutex};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Multi-line, human friendly output with colours.
    #[default]
    Pretty,
    /// Single line per event.
    Compact,
    /// Newline-delimited JSON objects.
    Json,
}

/// Configuration for the logging system.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "tallyviz_charts=trace").
    pub level: String,
    /// Output format.
    pub format: LogFormat,
    /// Optional file path for log output; stdout when absent.
    pub file_path: Option<String>,
    /// Whether to emit span open/close events.
    pub include_spans: bool,
    /// Whether to include target module information.
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
            file_path: None,
            include_spans: false,
            include_targets: true,
        }
    }
}

impl LoggingConfig {
    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.level).unwrap_or_else(|_| EnvFilter::new("info"))
    }

    fn span_events(&self) -> FmtSpan {
        if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }
}

/// Initialize the tracing subscriber with the given configuration.
///
/// Fails if a global subscriber has already been installed or the log file
/// cannot be opened.
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let registry = tracing_subscriber::registry().with(config.env_filter());
    let span_events = config.span_events();

    let file = match &config.file_path {
        Some(path) => Some(
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map(Mutex::new)
                .map_err(|e| {
                    ChartError::config_with_source(format!("cannot open log file {path}"), e)
                })?,
        ),
        None => None,
    };

    let layer = fmt::layer()
        .with_span_events(span_events)
        .with_target(config.include_targets);

    let installed = match (config.format, file) {
        (LogFormat::Json, Some(file)) => registry
            .with(layer.json().with_writer(file))
            .try_init(),
        (LogFormat::Json, None) => registry.with(layer.json()).try_init(),
        (LogFormat::Compact, Some(file)) => registry
            .with(layer.compact().with_ansi(false).with_writer(file))
            .try_init(),
        (LogFormat::Compact, None) => registry.with(layer.compact()).try_init(),
        (LogFormat::Pretty, Some(file)) => registry
            .with(layer.pretty().with_ansi(false).with_writer(file))
            .try_init(),
        (LogFormat::Pretty, None) => registry.with(layer.pretty()).try_init(),
    };

    installed.map_err(|e| ChartError::config_with_source("logging already initialized", e))?;
    tracing::info!(
        level = %config.level,
        format = ?config.format,
        file = config.file_path.as_deref().unwrap_or("stdout"),
        "logging initialized"
    );
    Ok(())
}

/// Initialize logging with default configuration.
pub fn init_default_logging() -> Result<()> {
    init_logging(LoggingConfig::default())
}

/// Initialize logging for development (pretty, debug level, spans on).
pub fn init_dev_logging() -> Result<()> {
    init_logging(LoggingConfig {
        level: "debug".to_string(),
        format: LogFormat::Pretty,
        include_spans: true,
        ..LoggingConfig::default()
    })
}

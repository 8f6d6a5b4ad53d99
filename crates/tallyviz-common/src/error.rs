//! Error types and utilities for tallyviz.

use thiserror::Error;

/// Result type alias for tallyviz operations.
pub type Result<T> = std::result::Result<T, ChartError>;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for tallyviz operations.
#[derive(Error, Debug)]
pub enum ChartError {
    /// Configuration could not be loaded or failed validation.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// I/O related errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Source data could not be read into records.
    #[error("Data error: {message}")]
    Data {
        message: String,
        line: Option<u64>,
        #[source]
        source: Option<BoxedSource>,
    },

    /// A scale was built from an unusable domain or range.
    #[error("Scale error: {message}")]
    Scale { message: String },

    /// The drawing surface is missing or unusable.
    #[error("Surface error: {message}")]
    Surface {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Drawing primitives could not be emitted.
    #[error("Render error: {message}")]
    Render {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Fetching remote data failed.
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Validation errors for user input or configuration values.
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// Generic error with custom message.
    #[error("{message}")]
    Generic {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },
}

impl ChartError {
    /// Create a new generic error with a custom message.
    pub fn new(msg: impl Into<String>) -> Self {
        Self::Generic {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new generic error with a custom message and source.
    pub fn with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Generic {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source.
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new data error.
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data {
            message: msg.into(),
            line: None,
            source: None,
        }
    }

    /// Create a new data error pinned to a source line.
    pub fn data_at_line(msg: impl Into<String>, line: u64) -> Self {
        Self::Data {
            message: msg.into(),
            line: Some(line),
            source: None,
        }
    }

    /// Create a new data error with source.
    pub fn data_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Data {
            message: msg.into(),
            line: None,
            source: Some(Box::new(source)),
        }
    }

    /// Create a new scale error.
    pub fn scale(msg: impl Into<String>) -> Self {
        Self::Scale {
            message: msg.into(),
        }
    }

    /// Create a new surface error.
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new render error.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new render error with source.
    pub fn render_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Render {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new network error with source.
    pub fn network_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Network {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: None,
        }
    }

    /// Create a new validation error with field name.
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Whether this error means no drawing can happen at all.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Surface { .. } | Self::Config { .. })
    }
}

#[cfg(feature = "plotters")]
/// Convert from plotters drawing errors to ChartError
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for ChartError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::render_with_source("drawing failed", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error, io};

    #[test]
    fn test_error_creation() {
        let error = ChartError::new("test message");
        assert!(error.to_string().contains("test message"));

        let config_error = ChartError::config("config issue");
        assert_eq!(config_error.to_string(), "Configuration error: config issue");

        let data_error = ChartError::data_at_line("missing column", 3);
        assert!(data_error.to_string().contains("Data error"));
        assert!(matches!(data_error, ChartError::Data { line: Some(3), .. }));

        let validation_error = ChartError::validation_field("must be positive", "canvas.width");
        assert_eq!(
            validation_error.to_string(),
            "Validation error: must be positive"
        );
    }

    #[test]
    fn test_error_with_source() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let wrapped = ChartError::data_with_source("Failed to read rows", io_error);

        assert!(wrapped.to_string().contains("Failed to read rows"));
        assert!(wrapped.source().is_some());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let chart_error: ChartError = io_error.into();

        assert!(chart_error.to_string().contains("I/O error"));
        assert!(chart_error.source().is_some());
    }

    #[test]
    fn test_fatal_classification() {
        assert!(ChartError::surface("no svg").is_fatal());
        assert!(ChartError::config("bad").is_fatal());
        assert!(!ChartError::data("bad row").is_fatal());
    }

    #[test]
    fn test_error_chain_preservation() {
        let root = io::Error::new(io::ErrorKind::NotFound, "Root cause");
        let middle = ChartError::config_with_source("Middle layer", root);
        let top = ChartError::with_source("Top layer", middle);

        let mut current: &dyn std::error::Error = &top;
        let mut depth = 0;
        while let Some(source) = current.source() {
            current = source;
            depth += 1;
        }

        assert_eq!(depth, 2);
    }
}

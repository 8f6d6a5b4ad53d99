//! Configuration loading from YAML or TOML files with environment overrides.

use crate::schema::Config;
use std::env;
use std::path::Path;
use tallyviz_common::{ChartError, Result as ChartResult};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_VAR: &str = "TALLYVIZ_CONFIG_PATH";

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file.
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("Failed to parse YAML configuration: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error.
    #[error("Failed to parse TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    /// The file extension names no supported format.
    #[error("Unsupported configuration format: '{0}' (expected .yaml, .yml or .toml)")]
    UnsupportedFormat(String),

    /// Environment variable parsing error.
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        /// Variable name.
        var: String,
        /// Underlying parse failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration validation error.
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[source] ChartError),
}

impl From<ConfigError> for ChartError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ValidationError(inner) => inner,
            other => Self::config_with_source(other.to_string(), other),
        }
    }
}

/// Configuration loader for charts.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Parses a YAML document into a configuration, without validation.
    pub fn from_yaml_str(content: &str) -> Result<Config, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parses a TOML document into a configuration, without validation.
    pub fn from_toml_str(content: &str) -> Result<Config, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a file with environment variable overrides.
    ///
    /// The format follows the file extension.
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let mut config = match extension.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&content)?,
            "toml" => Self::from_toml_str(&content)?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };
        debug!(path = %path.display(), "parsed configuration file");

        Self::apply_overrides(&mut config, |var| env::var(var).ok())?;
        config.validate().map_err(ConfigError::ValidationError)?;

        Ok(config)
    }

    /// Load configuration from `TALLYVIZ_CONFIG_PATH`, `tallyviz.yaml`,
    /// `tallyviz.toml`, or defaults, in that order.
    pub fn load() -> ChartResult<Config> {
        let config = if let Ok(config_path) = env::var(CONFIG_PATH_VAR) {
            Self::load_config(&config_path)?
        } else if Path::new("tallyviz.yaml").exists() {
            Self::load_config("tallyviz.yaml")?
        } else if Path::new("tallyviz.toml").exists() {
            Self::load_config("tallyviz.toml")?
        } else {
            info!("no configuration file found, using defaults");
            let mut config = Config::default();
            Self::apply_overrides(&mut config, |var| env::var(var).ok())?;
            config.validate()?;
            config
        };

        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ChartResult<Config> {
        Ok(Self::load_config(path)?)
    }

    /// Apply `TALLYVIZ_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        fn parsed<T>(var: &str, raw: &str) -> Result<T, ConfigError>
        where
            T: std::str::FromStr,
            T::Err: std::error::Error + Send + Sync + 'static,
        {
            raw.trim().parse().map_err(|e| ConfigError::EnvParseError {
                var: var.to_string(),
                source: Box::new(e),
            })
        }

        if let Some(raw) = lookup("TALLYVIZ_WIDTH") {
            config.canvas.width = parsed("TALLYVIZ_WIDTH", &raw)?;
        }
        if let Some(raw) = lookup("TALLYVIZ_HEIGHT") {
            config.canvas.height = parsed("TALLYVIZ_HEIGHT", &raw)?;
        }
        if let Some(raw) = lookup("TALLYVIZ_PADDING_INNER") {
            config.bands.padding_inner = parsed("TALLYVIZ_PADDING_INNER", &raw)?;
        }
        if let Some(raw) = lookup("TALLYVIZ_TICKS") {
            config.axis.ticks = parsed("TALLYVIZ_TICKS", &raw)?;
        }
        if let Some(labels) = lookup("TALLYVIZ_CATEGORY_LABELS") {
            config.axis.category_labels = Some(
                labels
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            );
        }
        if let Some(level) = lookup("TALLYVIZ_LOG_LEVEL") {
            config.logging.level = level.trim().to_ascii_lowercase();
        }
        if let Some(file) = lookup("TALLYVIZ_LOG_FILE") {
            config.logging.file = Some(file);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config = ConfigLoader::from_yaml_str("canvas:\n  width: 640\n").unwrap();
        assert_eq!(config.canvas.width, 640);
        assert_eq!(config.canvas.height, 500);
        assert_eq!(config.margin.right, 35);
        assert_eq!(config.axis.ticks, 10);
    }

    #[test]
    fn test_toml_document() {
        let config = ConfigLoader::from_toml_str(
            "[bands]\npadding_inner = 0.05\nround = false\n\n[transitions]\nenter = \"grow\"\n",
        )
        .unwrap();
        assert!((config.bands.padding_inner - 0.05).abs() < f64::EPSILON);
        assert!(!config.bands.round);
        assert_eq!(config.transitions.enter, crate::EnterMode::Grow);
    }

    #[test]
    fn test_overrides_apply() {
        let mut config = Config::default();
        let lookup = lookup_from(&[
            ("TALLYVIZ_WIDTH", "1200"),
            ("TALLYVIZ_CATEGORY_LABELS", "Q1, Q2,,Q3"),
            ("TALLYVIZ_LOG_LEVEL", "DEBUG"),
        ]);

        ConfigLoader::apply_overrides(&mut config, lookup).unwrap();

        assert_eq!(config.canvas.width, 1200);
        assert_eq!(
            config.axis.category_labels,
            Some(vec!["Q1".to_string(), "Q2".to_string(), "Q3".to_string()])
        );
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_bad_override_names_the_variable() {
        let mut config = Config::default();
        let err = ConfigLoader::apply_overrides(&mut config, lookup_from(&[("TALLYVIZ_HEIGHT", "tall")]))
            .unwrap_err();

        assert!(err.to_string().contains("TALLYVIZ_HEIGHT"));
    }

    #[test]
    fn test_validation_error_converts_to_chart_error() {
        let err: ChartError =
            ConfigError::ValidationError(ChartError::validation_field("bad", "axis.ticks")).into();
        assert!(matches!(err, ChartError::Validation { .. }));

        let err: ChartError = ConfigError::UnsupportedFormat("ini".to_string()).into();
        assert!(matches!(err, ChartError::Config { .. }));
    }
}

//! Runtime validation entry point.

use crate::schema::Config;
use tallyviz_common::Result;
use tracing::warn;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, logging the first failure.
    pub fn validate(config: &Config) -> Result<()> {
        config.validate().inspect_err(|e| warn!(error = %e, "rejected chart configuration"))
    }

    /// Validates a configuration against a category domain of `categories`
    /// entries, checking that a label override covers every category.
    pub fn validate_for_domain(config: &Config, categories: usize) -> Result<()> {
        Self::validate(config)?;
        if let Some(labels) = &config.axis.category_labels {
            tallyviz_common::ensure!(
                labels.len() >= categories,
                tallyviz_common::ChartError::validation_field(
                    format!(
                        "{} category labels cannot cover {categories} categories",
                        labels.len()
                    ),
                    "axis.category_labels"
                )
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::month_labels;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ConfigValidator::validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_label_override_must_cover_domain() {
        let mut config = Config::default();
        config.axis.category_labels = Some(month_labels());

        assert!(ConfigValidator::validate_for_domain(&config, 12).is_ok());
        assert!(ConfigValidator::validate_for_domain(&config, 26).is_err());
    }
}

//! Integration tests for tallyviz-config crate.

use std::io::Write;
use tallyviz_common::test_utils::{config_fixtures, create_temp_dir};
use tallyviz_common::ChartError;
use tallyviz_config::{
    Config, ConfigLoader, ConfigValidator, EaseKind, EnterMode, LogFormatSetting,
    DEFAULT_COUNT_COLUMN,
};

fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

#[test]
fn test_default_config_validation() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.plot_width(), 915);
    assert_eq!(config.plot_height(), 455);

    config.margin.left = 2000;
    assert!(matches!(
        config.validate(),
        Err(ChartError::Validation { field: Some(ref f), .. }) if f == "margin"
    ));
}

#[test]
fn test_padding_must_stay_below_one() {
    let mut config = Config::default();
    config.bands.padding_inner = 1.0;
    assert!(ConfigValidator::validate(&config).is_err());

    config.bands.padding_inner = 0.0;
    assert!(ConfigValidator::validate(&config).is_ok());
}

#[test]
fn test_minimal_yaml_file() {
    let dir = create_temp_dir();
    let path = write_file(&dir, "tallyviz.yaml", config_fixtures::minimal_config_yaml());

    let config = ConfigLoader::load_from_file(&path).unwrap();
    assert_eq!(config.canvas.width, 960);
    assert_eq!(config.passengers.count_column, DEFAULT_COUNT_COLUMN);
}

#[test]
fn test_full_yaml_file() {
    let dir = create_temp_dir();
    let path = write_file(&dir, "chart.yml", config_fixtures::full_config_yaml());

    let config = ConfigLoader::load_from_file(&path).unwrap();
    assert_eq!(config.canvas.width, 800);
    assert_eq!(config.margin.right, 40);
    assert!(!config.bands.round);
    assert_eq!(config.axis.ticks, 5);
    assert_eq!(config.axis.category_labels.as_ref().map(Vec::len), Some(12));
    assert_eq!(config.transitions.enter, EnterMode::Grow);
    assert_eq!(config.transitions.update_ease, EaseKind::Linear);
    assert_eq!(config.passengers.region_column, "Region");
    assert_eq!(config.logging.format, LogFormatSetting::Json);

    let logging = config.logging.to_logging_config();
    assert_eq!(logging.level, "debug");
}

#[test]
fn test_unsupported_extension() {
    let dir = create_temp_dir();
    let path = write_file(&dir, "chart.ini", "width=3");

    let err = ConfigLoader::load_from_file(&path).unwrap_err();
    assert!(err.to_string().contains("Unsupported configuration format"));
}

#[test]
fn test_invalid_values_fail_validation_on_load() {
    let dir = create_temp_dir();
    let path = write_file(&dir, "chart.toml", "[axis]\nticks = 0\n");

    let err = ConfigLoader::load_from_file(&path).unwrap_err();
    assert!(matches!(err, ChartError::Validation { .. }));
}

#[test]
fn test_missing_file_is_config_error() {
    let err = ConfigLoader::load_from_file("/definitely/not/here.yaml").unwrap_err();
    assert!(matches!(err, ChartError::Config { .. }));
}

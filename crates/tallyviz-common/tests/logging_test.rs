//! Global subscriber installation. Kept in its own test binary since a
//! process can only install one subscriber.

use tallyviz_common::{init_default_logging, init_logging, ChartError, LogFormat, LoggingConfig};

#[test]
fn test_init_logging_writes_startup_event_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tallyviz.log");

    init_logging(LoggingConfig {
        format: LogFormat::Json,
        file_path: Some(path.display().to_string()),
        ..LoggingConfig::default()
    })
    .unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("logging initialized"));
    assert!(written.contains("\"format\":\"Json\""));

    let err = init_default_logging().unwrap_err();
    assert!(matches!(err, ChartError::Config { .. }));
}

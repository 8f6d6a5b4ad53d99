//! Test utilities and shared test helpers for tallyviz.
//!
//! This module provides common testing utilities, fixtures, and helper functions
//! that can be used across all crates in the workspace for unit and integration testing.

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Passenger-count CSV fixtures.
pub mod csv_fixtures {
    /// A small airline passenger table in the default column layout.
    ///
    /// January 2019 holds domestic=10 (split over two rows) and
    /// international=5; February has a malformed count.
    pub fn passengers_csv() -> &'static str {
        concat!(
            "Activity Period,Operating Airline,GEO Summary,GEO Region,Passenger Count\n",
            "201901,Alpha Air,Domestic,US,4\n",
            "201901,Beta Air,domestic,US,6\n",
            "201901,Gamma Air,International,Asia,5\n",
            "201902,Alpha Air,Domestic,US,not-a-number\n",
            "201902,Gamma Air,International,Asia,7\n",
            "201903,Alpha Air, DOMESTIC ,US,12\n",
            "201812,Alpha Air,Domestic,US,3\n",
        )
    }

    /// A table whose header lacks the passenger count column.
    pub fn missing_count_column_csv() -> &'static str {
        "Activity Period,GEO Summary\n201901,Domestic\n"
    }
}

/// Configuration-related test utilities.
pub mod config_fixtures {
    /// Create a minimal valid configuration as YAML string.
    pub fn minimal_config_yaml() -> &'static str {
        r"
canvas:
  width: 960
  height: 500
"
    }

    /// Create a full configuration as YAML string.
    pub fn full_config_yaml() -> &'static str {
        concat!(
            "canvas:\n",
            "  width: 800\n",
            "  height: 400\n",
            "\n",
            "margin:\n",
            "  top: 20\n",
            "  right: 40\n",
            "  bottom: 30\n",
            "  left: 10\n",
            "\n",
            "bands:\n",
            "  padding_inner: 0.05\n",
            "  round: false\n",
            "\n",
            "axis:\n",
            "  ticks: 5\n",
            "  category_labels: [\"J\", \"F\", \"M\", \"A\", \"M\", \"J\", \"J\", \"A\", \"S\", \"O\", \"N\", \"D\"]\n",
            "\n",
            "transitions:\n",
            "  enter: grow\n",
            "  duration_ms: 500\n",
            "  update_ease: linear\n",
            "  exit_ease: bounce_out\n",
            "\n",
            "passengers:\n",
            "  period_column: \"Period\"\n",
            "  region_column: \"Region\"\n",
            "  count_column: \"Count\"\n",
            "\n",
            "logging:\n",
            "  level: \"debug\"\n",
            "  format: json\n",
        )
    }
}

/// Property-based testing utilities using proptest.
#[cfg(feature = "proptest")]
pub mod property_testing {
    use proptest::prelude::*;

    /// Strategy for free text mixing ASCII letters, digits, punctuation and
    /// non-ASCII characters.
    pub fn free_text_strategy() -> impl Strategy<Value = String> {
        r"[a-zA-Z0-9 .,!?éßİK\u{212A}]{0,200}".prop_map(|s| s)
    }

    /// Strategy for sparse count maps over a small key space.
    pub fn counts_strategy() -> impl Strategy<Value = Vec<(u8, u64)>> {
        proptest::collection::vec((0u8..26, 0u64..10_000), 0..40)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_multiple_calls() {
        init_test_logging();
        init_test_logging();
        init_test_logging();
    }

    #[test]
    fn test_assert_approx_eq() {
        assert_approx_eq(1.0, 1.0001, 0.001);
        assert_approx_eq(1.0, 0.9999, 0.001);
    }

    #[test]
    #[should_panic]
    fn test_assert_approx_eq_fails() {
        assert_approx_eq(1.0, 1.1, 0.05);
    }

    #[test]
    fn test_passenger_fixture_has_header() {
        let first = csv_fixtures::passengers_csv().lines().next().unwrap_or_default();
        assert!(first.contains("Activity Period"));
        assert!(first.contains("Passenger Count"));
    }
}

//! Default values for every configuration section.

use crate::schema::*;

/// Abbreviated month names used to label monthly category axes.
pub const DEFAULT_MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Default period column of the passenger table.
pub const DEFAULT_PERIOD_COLUMN: &str = "Activity Period";
/// Default domestic/international column of the passenger table.
pub const DEFAULT_REGION_COLUMN: &str = "GEO Summary";
/// Default count column of the passenger table.
pub const DEFAULT_COUNT_COLUMN: &str = "Passenger Count";

impl Default for Config {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            margin: MarginConfig::default(),
            bands: BandConfig::default(),
            axis: AxisConfig::default(),
            transitions: TransitionConfig::default(),
            passengers: PassengerColumnsConfig::default(),
            logging: LogSettings::default(),
        }
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 960,
            height: 500,
        }
    }
}

impl Default for MarginConfig {
    fn default() -> Self {
        Self {
            top: 15,
            right: 35,
            bottom: 30,
            left: 10,
        }
    }
}

impl Default for BandConfig {
    fn default() -> Self {
        Self {
            padding_inner: 0.1,
            round: true,
        }
    }
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            ticks: 10,
            category_labels: None,
        }
    }
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            enter: EnterMode::Immediate,
            duration_ms: 250,
            update_ease: EaseKind::CubicInOut,
            exit_ease: EaseKind::BounceOut,
        }
    }
}

impl Default for PassengerColumnsConfig {
    fn default() -> Self {
        Self {
            period_column: DEFAULT_PERIOD_COLUMN.to_string(),
            region_column: DEFAULT_REGION_COLUMN.to_string(),
            count_column: DEFAULT_COUNT_COLUMN.to_string(),
        }
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormatSetting::Pretty,
            file: None,
            spans: false,
        }
    }
}

/// Month labels as owned strings, ready for [`AxisConfig::category_labels`].
pub fn month_labels() -> Vec<String> {
    DEFAULT_MONTH_LABELS.iter().map(|s| (*s).to_string()).collect()
}

//! Configuration schema definitions using serde.

use serde::{Deserialize, Serialize};
use tallyviz_common::{ensure, ChartError, LogFormat, LoggingConfig};

/// Main configuration structure for tallyviz charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Drawing surface size.
    pub canvas: CanvasConfig,
    /// Space around the plot area for axes.
    pub margin: MarginConfig,
    /// Categorical band layout.
    pub bands: BandConfig,
    /// Axis ticks and labels.
    pub axis: AxisConfig,
    /// Mark transitions.
    pub transitions: TransitionConfig,
    /// Column names of the passenger table.
    pub passengers: PassengerColumnsConfig,
    /// Logging configuration.
    pub logging: LogSettings,
}

/// Drawing surface size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Surface width.
    pub width: u32,
    /// Surface height.
    pub height: u32,
}

/// Margins around the plot area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarginConfig {
    /// Top margin.
    pub top: u32,
    /// Right margin, holds the value axis.
    pub right: u32,
    /// Bottom margin, holds the category axis.
    pub bottom: u32,
    /// Left margin.
    pub left: u32,
}

/// Band scale settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandConfig {
    /// Fraction of each step left empty between adjacent bands, in `[0, 1)`.
    pub padding_inner: f64,
    /// Snap band starts and widths to whole pixels.
    pub round: bool,
}

/// Axis settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisConfig {
    /// Approximate number of value-axis ticks; also drives domain rounding.
    pub ticks: usize,
    /// Ordered labels replacing the category names on the category axis.
    pub category_labels: Option<Vec<String>>,
}

/// How a newly bound mark first appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnterMode {
    /// Placed directly at its target geometry.
    #[default]
    Immediate,
    /// Starts flat on the zero baseline and grows to its target.
    Grow,
}

/// Easing curve applied to a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EaseKind {
    /// Constant speed.
    Linear,
    /// Symmetric cubic easing.
    #[default]
    CubicInOut,
    /// Bouncing arrival at the end value.
    BounceOut,
}

/// Transition settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    /// Behaviour of entering marks.
    pub enter: EnterMode,
    /// Transition length in milliseconds; zero applies changes at once.
    pub duration_ms: u64,
    /// Easing for updating (and growing) marks.
    pub update_ease: EaseKind,
    /// Easing for exiting marks.
    pub exit_ease: EaseKind,
}

/// Column names used to read the passenger table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassengerColumnsConfig {
    /// Column holding the year+month period.
    pub period_column: String,
    /// Column holding the domestic/international label.
    pub region_column: String,
    /// Column holding the passenger count.
    pub count_column: String,
}

/// Log output format as written in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormatSetting {
    /// Multi-line output.
    #[default]
    Pretty,
    /// One line per event.
    Compact,
    /// JSON objects.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Log level (trace, debug, info, warn, error).
    pub level: String,
    /// Output format.
    pub format: LogFormatSetting,
    /// Optional log file path.
    pub file: Option<String>,
    /// Whether to log span open/close events.
    pub spans: bool,
}

/// Accepted values for [`LogSettings::level`].
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl MarginConfig {
    /// Sum of left and right margins.
    pub const fn horizontal(&self) -> u32 {
        self.left.saturating_add(self.right)
    }

    /// Sum of top and bottom margins.
    pub const fn vertical(&self) -> u32 {
        self.top.saturating_add(self.bottom)
    }
}

impl LogSettings {
    /// Converts into the subscriber configuration used by `tallyviz-common`.
    pub fn to_logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.level.clone(),
            format: match self.format {
                LogFormatSetting::Pretty => LogFormat::Pretty,
                LogFormatSetting::Compact => LogFormat::Compact,
                LogFormatSetting::Json => LogFormat::Json,
            },
            file_path: self.file.clone(),
            include_spans: self.spans,
            ..LoggingConfig::default()
        }
    }
}

impl Config {
    /// Width of the plot area: canvas width minus horizontal margins.
    pub const fn plot_width(&self) -> u32 {
        self.canvas.width.saturating_sub(self.margin.horizontal())
    }

    /// Height of the plot area: canvas height minus vertical margins.
    pub const fn plot_height(&self) -> u32 {
        self.canvas.height.saturating_sub(self.margin.vertical())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ChartError> {
        ensure!(
            self.canvas.width > 0 && self.canvas.height > 0,
            ChartError::validation_field("canvas must have a positive size", "canvas")
        );
        ensure!(
            self.plot_width() > 0 && self.canvas.width > self.margin.horizontal(),
            ChartError::validation_field(
                format!(
                    "horizontal margins ({}) leave no plot width on a {}px canvas",
                    self.margin.horizontal(),
                    self.canvas.width
                ),
                "margin"
            )
        );
        ensure!(
            self.plot_height() > 0 && self.canvas.height > self.margin.vertical(),
            ChartError::validation_field(
                format!(
                    "vertical margins ({}) leave no plot height on a {}px canvas",
                    self.margin.vertical(),
                    self.canvas.height
                ),
                "margin"
            )
        );
        ensure!(
            (0.0..1.0).contains(&self.bands.padding_inner),
            ChartError::validation_field(
                format!("padding_inner must lie in [0, 1), got {}", self.bands.padding_inner),
                "bands.padding_inner"
            )
        );
        ensure!(
            self.axis.ticks > 0,
            ChartError::validation_field("at least one tick is required", "axis.ticks")
        );
        if let Some(labels) = &self.axis.category_labels {
            ensure!(
                !labels.is_empty(),
                ChartError::validation_field(
                    "category_labels must not be empty when given",
                    "axis.category_labels"
                )
            );
        }

        for (field, value) in [
            ("passengers.period_column", &self.passengers.period_column),
            ("passengers.region_column", &self.passengers.region_column),
            ("passengers.count_column", &self.passengers.count_column),
        ] {
            ensure!(
                !value.trim().is_empty(),
                ChartError::validation_field("column name cannot be empty", field)
            );
        }

        ensure!(
            LOG_LEVELS.contains(&self.logging.level.as_str()),
            ChartError::validation_field(
                format!(
                    "log level must be one of: {}, got '{}'",
                    LOG_LEVELS.join(", "),
                    self.logging.level
                ),
                "logging.level"
            )
        );

        Ok(())
    }
}

//! The per-chart drawing context: plot area, scales and axis labels.

use crate::mark::MarkKey;
use crate::scale::{BandScale, LinearScale};
use serde::Serialize;
use tallyviz_common::Result;
use tallyviz_config::{Config, ConfigValidator};
use tracing::debug;

/// Region of the surface that holds the marks, inside the margins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlotArea {
    /// Offset of the plot area from the left edge of the surface.
    pub left: f64,
    /// Offset of the plot area from the top edge of the surface.
    pub top: f64,
    /// Plot width.
    pub width: f64,
    /// Plot height.
    pub height: f64,
}

impl PlotArea {
    /// Plot area of `config`: the canvas minus its margins.
    pub fn from_config(config: &Config) -> Self {
        Self {
            left: f64::from(config.margin.left),
            top: f64::from(config.margin.top),
            width: f64::from(config.plot_width()),
            height: f64::from(config.plot_height()),
        }
    }
}

/// Value-axis tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueTick {
    /// Domain value.
    pub value: f64,
    /// Vertical position in plot coordinates.
    pub y: f64,
    /// Rendered label.
    pub label: String,
}

/// Category-axis tick, placed at a band centre.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTick {
    /// Horizontal position in plot coordinates.
    pub x: f64,
    /// Rendered label.
    pub label: String,
}

/// Everything a render needs to place marks: the plot area, the value and
/// band scales and the optional category label override.
///
/// A context belongs to one chart. It is rebuilt rather than patched when
/// the category domain changes size.
#[derive(Debug, Clone)]
pub struct ChartContext<K> {
    area: PlotArea,
    values: LinearScale,
    bands: BandScale<K>,
    labels: Option<Vec<String>>,
    ticks: usize,
    padding_inner: f64,
    round: bool,
}

impl<K: MarkKey> ChartContext<K> {
    /// Builds a context for `domain` from a validated configuration.
    pub fn new(config: &Config, domain: &[K]) -> Result<Self> {
        ConfigValidator::validate_for_domain(config, domain.len())?;

        let area = PlotArea::from_config(config);
        let bands = BandScale::new(domain.iter().copied(), [0.0, area.width])
            .padding_inner(config.bands.padding_inner)?
            .round(config.bands.round);
        debug!(
            categories = domain.len(),
            width = area.width,
            height = area.height,
            bandwidth = bands.bandwidth(),
            "built chart context"
        );

        Ok(Self {
            area,
            values: LinearScale::new([0.0, 0.0], [area.height, 0.0]),
            bands,
            labels: config.axis.category_labels.clone(),
            ticks: config.axis.ticks,
            padding_inner: config.bands.padding_inner,
            round: config.bands.round,
        })
    }

    /// Rebuilds the band scale over a domain of the same size, keeping the
    /// value scale and labels.
    pub fn set_domain(&mut self, domain: &[K]) -> Result<()> {
        self.bands = BandScale::new(domain.iter().copied(), [0.0, self.area.width])
            .padding_inner(self.padding_inner)?
            .round(self.round);
        Ok(())
    }

    /// Fits the value scale to `[0, max]`, niced for the configured tick
    /// count. The zero baseline sits at the bottom of the plot area.
    pub fn rescale_values(&mut self, max: f64) {
        let max = if max.is_finite() { max.max(0.0) } else { 0.0 };
        self.values = LinearScale::new([0.0, max], [self.area.height, 0.0]).nice(self.ticks);
    }

    /// Plot area.
    pub const fn area(&self) -> PlotArea {
        self.area
    }

    /// Current value scale.
    pub const fn values(&self) -> &LinearScale {
        &self.values
    }

    /// Band scale over the category domain.
    pub const fn bands(&self) -> &BandScale<K> {
        &self.bands
    }

    /// Categories in band order.
    pub fn domain(&self) -> &[K] {
        self.bands.domain()
    }

    /// Vertical position of the zero value.
    pub fn baseline_y(&self) -> f64 {
        self.values.map(0.0)
    }

    /// Ticks along the value axis.
    pub fn value_ticks(&self) -> Vec<ValueTick> {
        self.values
            .ticks(self.ticks)
            .into_iter()
            .map(|value| ValueTick {
                value,
                y: self.values.map(value),
                label: format!("{value}"),
            })
            .collect()
    }

    /// One tick per category at its band centre. Labels come from the
    /// override list when one is configured.
    pub fn category_ticks(&self) -> Vec<CategoryTick> {
        self.bands
            .domain()
            .iter()
            .enumerate()
            .filter_map(|(i, key)| {
                let x = self.bands.center(key)?;
                let label = self
                    .labels
                    .as_ref()
                    .and_then(|labels| labels.get(i).cloned())
                    .unwrap_or_else(|| key.to_string());
                Some(CategoryTick { x, label })
            })
            .collect()
    }
}

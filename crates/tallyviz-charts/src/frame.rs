//! Render output: the reconciled marks and axes of one render pass.

use crate::context::{CategoryTick, ChartContext, PlotArea, ValueTick};
use crate::mark::{Geometry, MarkKey, MarkPhase, MarkSnapshot};
use crate::reconcile::Reconciliation;
use serde::Serialize;
use tallyviz_common::{ChartError, Result};

/// Result of a render: what changed, where every mark is and where the axis
/// ticks go.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFrame<K> {
    /// Plot area inside the margins.
    pub area: PlotArea,
    /// Vertical position of the zero value.
    pub baseline: f64,
    /// Key-set diff applied by this render.
    pub reconciliation: Reconciliation<K>,
    /// Every held mark, exiting ones included, in key order.
    pub marks: Vec<MarkSnapshot<K>>,
    /// Value-axis ticks.
    pub value_ticks: Vec<ValueTick>,
    /// Category-axis ticks.
    pub category_ticks: Vec<CategoryTick>,
}

impl<K: MarkKey> RenderFrame<K> {
    /// Assembles a frame from a context and the marks it placed.
    pub fn new<C: MarkKey>(
        context: &ChartContext<C>,
        reconciliation: Reconciliation<K>,
        marks: Vec<MarkSnapshot<K>>,
    ) -> Self {
        Self {
            area: context.area(),
            baseline: context.baseline_y(),
            reconciliation,
            marks,
            value_ticks: context.value_ticks(),
            category_ticks: context.category_ticks(),
        }
    }

    /// Keys of marks that are not exiting.
    pub fn active_keys(&self) -> Vec<K> {
        self.marks
            .iter()
            .filter(|m| m.phase != MarkPhase::Exiting)
            .map(|m| m.key)
            .collect()
    }

    /// Snapshot for `key`.
    pub fn mark(&self, key: &K) -> Option<&MarkSnapshot<K>> {
        self.marks.iter().find(|m| m.key == *key)
    }

    /// Drawing description at the marks' current geometry.
    pub fn scene(&self) -> Scene {
        Scene {
            area: self.area,
            baseline: self.baseline,
            bars: self
                .marks
                .iter()
                .map(|m| SceneBar {
                    key: m.key.to_string(),
                    geometry: m.current,
                    phase: m.phase,
                })
                .collect(),
            value_ticks: self.value_ticks.clone(),
            category_ticks: self.category_ticks.clone(),
        }
    }

    /// Serialises the frame as JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| ChartError::render_with_source("failed to serialise render frame", e))
    }
}

/// One rectangle to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneBar {
    /// Display form of the bound key.
    pub key: String,
    /// Geometry in plot coordinates.
    pub geometry: Geometry,
    /// Lifecycle phase.
    pub phase: MarkPhase,
}

/// Key-agnostic drawing description handed to a surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    /// Plot area inside the margins.
    pub area: PlotArea,
    /// Vertical position of the zero value.
    pub baseline: f64,
    /// Rectangles in plot coordinates.
    pub bars: Vec<SceneBar>,
    /// Value-axis ticks.
    pub value_ticks: Vec<ValueTick>,
    /// Category-axis ticks.
    pub category_ticks: Vec<CategoryTick>,
}

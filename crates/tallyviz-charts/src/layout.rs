//! Placement of bars and stacked bars in plot coordinates.

use crate::category::Category;
use crate::context::ChartContext;
use crate::mark::{Geometry, MarkKey, MarkTarget};
use crate::series::Series;
use serde::Serialize;
use std::fmt;
use tallyviz_common::{ChartError, Result};

/// Key of one segment of a stacked bar: the category on the band axis and
/// the layer within the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct StackKey<K, S> {
    /// Band-axis category.
    pub category: K,
    /// Layer within the stack.
    pub layer: S,
}

impl<K: fmt::Display, S: fmt::Display> fmt::Display for StackKey<K, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.layer)
    }
}

fn band_start<K: MarkKey>(context: &ChartContext<K>, key: &K) -> Result<f64> {
    context
        .bands()
        .map(key)
        .ok_or_else(|| ChartError::render(format!("category {key} is outside the chart domain")))
}

#[allow(clippy::cast_precision_loss)]
fn segment<K: MarkKey>(context: &ChartContext<K>, x: f64, from: u64, to: u64) -> Geometry {
    let values = context.values();
    let bottom = values.map(from as f64);
    let top = values.map(to as f64);
    Geometry::new(x, top, context.bands().bandwidth(), bottom - top)
}

/// One bar per observed category, rising from the zero baseline.
pub fn bar_targets<K: MarkKey>(
    context: &ChartContext<K>,
    series: &Series<K>,
) -> Result<Vec<MarkTarget<K>>> {
    series
        .iter()
        .map(|(key, value)| {
            let x = band_start(context, &key)?;
            Ok(MarkTarget {
                key,
                value,
                geometry: segment(context, x, 0, value),
            })
        })
        .collect()
}

/// Largest stack total across `rows`.
pub fn stack_max<K, S: Ord + Copy>(rows: &[(K, Series<S>)]) -> u64 {
    rows.iter().map(|(_, row)| row.total()).max().unwrap_or(0)
}

/// Stacked segments, one per observed `(category, layer)` pair.
///
/// Each segment starts where the previous layer of the same category ended,
/// in the layer domain order; the first layer sits on the baseline.
pub fn stacked_targets<K, S>(
    context: &ChartContext<K>,
    rows: &[(K, Series<S>)],
) -> Result<Vec<MarkTarget<StackKey<K, S>>>>
where
    K: MarkKey,
    S: Category + MarkKey,
{
    let mut targets = Vec::new();
    for (category, row) in rows {
        let x = band_start(context, category)?;
        let mut offset = 0u64;
        for (layer, value) in row.dense(S::domain()) {
            if !row.contains(&layer) {
                continue;
            }
            let top = offset.saturating_add(value);
            targets.push(MarkTarget {
                key: StackKey {
                    category: *category,
                    layer,
                },
                value,
                geometry: segment(context, x, offset, top),
            });
            offset = top;
        }
    }
    Ok(targets)
}

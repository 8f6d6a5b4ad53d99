//! Rectangular marks bound one-to-one to data keys.
//!
//! A [`MarkSet`] owns every mark of a chart between renders. Each render
//! joins a new set of targets against the marks already bound: new keys
//! enter, surviving keys move to their new geometry and missing keys shrink
//! onto the zero baseline before they are dropped.

use crate::reconcile::{reconcile, Reconciliation};
use crate::transition::Transition;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::hash::Hash;
use std::time::Duration;
use tallyviz_config::{EnterMode, TransitionConfig};
use tracing::trace;

/// Key that can bind a mark.
pub trait MarkKey: Copy + Eq + Ord + Hash + fmt::Debug + fmt::Display + Serialize {}

impl<T> MarkKey for T where T: Copy + Eq + Ord + Hash + fmt::Debug + fmt::Display + Serialize {}

/// Axis-aligned rectangle in plot coordinates (origin at the top left of
/// the plot area, y growing downwards).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Geometry {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width, never negative.
    pub width: f64,
    /// Height, never negative.
    pub height: f64,
}

fn finite(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

impl Geometry {
    /// Creates a rectangle; non-finite components become zero and negative
    /// sizes are clamped to zero.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
        .sanitized()
    }

    /// Copy with non-finite components zeroed and sizes clamped to be
    /// non-negative.
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            x: finite(self.x),
            y: finite(self.y),
            width: finite(self.width).max(0.0),
            height: finite(self.height).max(0.0),
        }
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Same horizontal extent, flattened onto `baseline`.
    #[must_use]
    pub fn collapsed(self, baseline: f64) -> Self {
        Self::new(self.x, baseline, self.width, 0.0)
    }

    /// Interpolates towards `to`; `t = 0` is `self`, `t = 1` is `to`.
    #[must_use]
    pub fn lerp(self, to: Self, t: f64) -> Self {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Self::new(
            mix(self.x, to.x),
            mix(self.y, to.y),
            mix(self.width, to.width),
            mix(self.height, to.height),
        )
    }
}

/// Lifecycle phase set by the most recent join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkPhase {
    /// Bound for the first time.
    Entering,
    /// Bound before and still present.
    Updating,
    /// No longer in the data; moving to the baseline before removal.
    Exiting,
}

/// Geometry a key should reach after a render.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarkTarget<K> {
    /// Bound key.
    pub key: K,
    /// Value the geometry encodes.
    pub value: u64,
    /// Target rectangle.
    pub geometry: Geometry,
}

#[derive(Debug, Clone)]
struct Mark<K> {
    key: K,
    value: u64,
    from: Geometry,
    to: Geometry,
    transition: Transition,
    phase: MarkPhase,
}

impl<K: MarkKey> Mark<K> {
    fn current(&self) -> Geometry {
        self.from.lerp(self.to, self.transition.progress())
    }

    fn retarget(&mut self, to: Geometry, transition: Transition, phase: MarkPhase) {
        self.from = self.current();
        self.to = to;
        self.transition = transition;
        self.phase = phase;
    }

    fn is_done_exiting(&self) -> bool {
        self.phase == MarkPhase::Exiting && self.transition.is_complete()
    }

    fn snapshot(&self) -> MarkSnapshot<K> {
        MarkSnapshot {
            key: self.key,
            value: self.value,
            current: self.current(),
            target: self.to,
            phase: self.phase,
            settled: self.transition.is_complete(),
        }
    }
}

/// Read-only view of a mark at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarkSnapshot<K> {
    /// Bound key.
    pub key: K,
    /// Value the target geometry encodes.
    pub value: u64,
    /// Geometry at the current point of the transition.
    pub current: Geometry,
    /// Geometry the transition ends at.
    pub target: Geometry,
    /// Phase set by the last join.
    pub phase: MarkPhase,
    /// Whether the transition has completed.
    pub settled: bool,
}

/// Marks keyed by their bound key.
#[derive(Debug, Clone)]
pub struct MarkSet<K> {
    marks: BTreeMap<K, Mark<K>>,
}

impl<K> Default for MarkSet<K> {
    fn default() -> Self {
        Self {
            marks: BTreeMap::new(),
        }
    }
}

impl<K: MarkKey> MarkSet<K> {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `targets` to marks and returns the diff that was applied.
    ///
    /// Entering marks start on the baseline in [`EnterMode::Grow`] and at
    /// their target otherwise. A key whose mark is still exiting is revived
    /// as an update. Marks already exiting are not reported again.
    pub fn join(
        &mut self,
        targets: &[MarkTarget<K>],
        baseline: f64,
        config: &TransitionConfig,
    ) -> Reconciliation<K> {
        let duration = Duration::from_millis(config.duration_ms);
        let already_exiting: HashSet<K> = self
            .marks
            .values()
            .filter(|m| m.phase == MarkPhase::Exiting)
            .map(|m| m.key)
            .collect();

        let mut diff = reconcile(self.marks.keys().copied(), targets.iter().map(|t| t.key));
        diff.exiting.retain(|key| !already_exiting.contains(key));

        for target in targets {
            let geometry = target.geometry.sanitized();
            if let Some(mark) = self.marks.get_mut(&target.key) {
                if mark.phase == MarkPhase::Exiting {
                    trace!(key = %target.key, "reviving exiting mark");
                }
                mark.value = target.value;
                mark.retarget(
                    geometry,
                    Transition::new(duration, config.update_ease),
                    MarkPhase::Updating,
                );
                continue;
            }

            let (from, transition) = match config.enter {
                EnterMode::Immediate => (geometry, Transition::finished()),
                EnterMode::Grow => (
                    geometry.collapsed(baseline),
                    Transition::new(duration, config.update_ease),
                ),
            };
            self.marks.insert(
                target.key,
                Mark {
                    key: target.key,
                    value: target.value,
                    from,
                    to: geometry,
                    transition,
                    phase: MarkPhase::Entering,
                },
            );
        }

        for key in &diff.exiting {
            if let Some(mark) = self.marks.get_mut(key) {
                let to = mark.current().collapsed(baseline);
                mark.retarget(
                    to,
                    Transition::new(duration, config.exit_ease),
                    MarkPhase::Exiting,
                );
            }
        }

        let removed = self.sweep();
        if !removed.is_empty() {
            trace!(count = removed.len(), "removed exited marks");
        }
        diff
    }

    /// Moves every transition forward by `elapsed` and drops marks whose
    /// exit completed. Returns the dropped keys.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<K> {
        for mark in self.marks.values_mut() {
            mark.transition.advance(elapsed);
        }
        self.sweep()
    }

    /// Completes every transition. Returns the dropped keys.
    pub fn finish(&mut self) -> Vec<K> {
        for mark in self.marks.values_mut() {
            mark.transition.finish();
        }
        self.sweep()
    }

    fn sweep(&mut self) -> Vec<K> {
        let removed: Vec<K> = self
            .marks
            .values()
            .filter(|m| m.is_done_exiting())
            .map(|m| m.key)
            .collect();
        for key in &removed {
            self.marks.remove(key);
        }
        removed
    }

    /// Keys of marks that are not exiting, in key order.
    pub fn keys(&self) -> Vec<K> {
        self.marks
            .values()
            .filter(|m| m.phase != MarkPhase::Exiting)
            .map(|m| m.key)
            .collect()
    }

    /// Keys of every mark still held, exiting ones included.
    pub fn bound_keys(&self) -> Vec<K> {
        self.marks.keys().copied().collect()
    }

    /// Snapshot of the mark bound to `key`.
    pub fn get(&self, key: &K) -> Option<MarkSnapshot<K>> {
        self.marks.get(key).map(Mark::snapshot)
    }

    /// Snapshots of every mark held, in key order.
    pub fn snapshots(&self) -> Vec<MarkSnapshot<K>> {
        self.marks.values().map(Mark::snapshot).collect()
    }

    /// Whether any transition is still running.
    pub fn is_animating(&self) -> bool {
        self.marks.values().any(|m| !m.transition.is_complete())
    }

    /// Number of marks held, exiting ones included.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Whether no mark is held.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }
}

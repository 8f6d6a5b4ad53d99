//! Value and category scales.
//!
//! [`LinearScale`] maps aggregated counts onto pixel heights, rounding its
//! domain outward to readable tick steps. [`BandScale`] lays an ordered
//! category domain out as evenly spaced, padded bands.

use crate::series::Series;
use std::collections::HashMap;
use std::hash::Hash;
use tallyviz_common::{ChartError, Result};

const E10: f64 = 7.071_067_811_865_476; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

const NICE_ITERATIONS: usize = 10;

/// Value bounds of a series: the minimum is always zero, the maximum is the
/// largest value (zero for an empty series).
#[allow(clippy::cast_precision_loss)]
pub fn value_bounds<K: Ord + Copy>(series: &Series<K>) -> (f64, f64) {
    (0.0, series.max() as f64)
}

/// Tick increment for roughly `count` ticks over `[start, stop]`.
///
/// A positive result is the step itself. A negative result `-k` stands for a
/// fractional step of `1 / k`, which keeps tick values exact. Zero when no
/// step exists (empty or inverted interval, or `count == 0`).
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    if count == 0 || !start.is_finite() || !stop.is_finite() || stop <= start {
        return 0.0;
    }

    let step = (stop - start) / count as f64;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -10f64.powf(-power) / factor
    }
}

/// Continuous scale between a numeric domain and a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: [f64; 2],
    range: [f64; 2],
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

impl LinearScale {
    /// Creates a scale. Non-finite bounds are replaced with zero.
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self {
            domain: domain.map(finite_or_zero),
            range: range.map(finite_or_zero),
        }
    }

    /// Domain bounds.
    pub const fn domain(&self) -> [f64; 2] {
        self.domain
    }

    /// Range bounds.
    pub const fn range(&self) -> [f64; 2] {
        self.range
    }

    /// Extends the domain outward to multiples of the tick step for
    /// `count` ticks, repeating until the step stops changing.
    #[must_use]
    pub fn nice(mut self, count: usize) -> Self {
        let [d0, d1] = self.domain;
        let reversed = d1 < d0;
        let (mut start, mut stop) = if reversed { (d1, d0) } else { (d0, d1) };

        let mut previous = None;
        for _ in 0..NICE_ITERATIONS {
            let step = tick_increment(start, stop, count);
            if previous == Some(step) {
                break;
            }
            if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else if step < 0.0 {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            } else {
                break;
            }
            previous = Some(step);
        }

        // Normalise -0.0 produced by the fractional branch.
        let (start, stop) = (start + 0.0, stop + 0.0);
        self.domain = if reversed { [stop, start] } else { [start, stop] };
        self
    }

    /// Maps a domain value into the range. A zero-width domain maps every
    /// value to the start of the range.
    pub fn map(&self, value: f64) -> f64 {
        let [d0, d1] = self.domain;
        let [r0, r1] = self.range;
        let width = d1 - d0;
        if width.abs() < f64::EPSILON || !value.is_finite() {
            return r0;
        }
        r0 + (value - d0) / width * (r1 - r0)
    }

    /// Roughly `count` evenly spaced tick values within the domain, in
    /// domain order.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let [d0, d1] = self.domain;
        if count == 0 {
            return Vec::new();
        }
        if (d1 - d0).abs() < f64::EPSILON {
            return vec![d0];
        }

        let reversed = d1 < d0;
        let (start, stop) = if reversed { (d1, d0) } else { (d0, d1) };
        let step = tick_increment(start, stop, count);
        if step == 0.0 || !step.is_finite() {
            return Vec::new();
        }

        let mut ticks: Vec<f64> = if step > 0.0 {
            let first = (start / step).ceil();
            let last = (stop / step).floor();
            let n = (last - first + 1.0).max(0.0) as usize;
            (0..n).map(|i| (first + i as f64) * step).collect()
        } else {
            let inverse = -step;
            let first = (start * inverse).ceil();
            let last = (stop * inverse).floor();
            let n = (last - first + 1.0).max(0.0) as usize;
            (0..n).map(|i| (first + i as f64) / inverse).collect()
        };

        if reversed {
            ticks.reverse();
        }
        ticks
    }
}

/// Ordered categorical scale assigning each category an equal band.
///
/// Bands follow domain order whether or not a category has data. With
/// rounding enabled the step is floored and band starts and widths are
/// whole pixels.
#[derive(Debug, Clone)]
pub struct BandScale<K> {
    domain: Vec<K>,
    index: HashMap<K, usize>,
    range: [f64; 2],
    padding_inner: f64,
    round: bool,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl<K: Copy + Eq + Hash> BandScale<K> {
    /// Creates a scale over `domain` (duplicates dropped, first occurrence
    /// kept) with no padding and no rounding.
    pub fn new(domain: impl IntoIterator<Item = K>, range: [f64; 2]) -> Self {
        let mut index = HashMap::new();
        let mut ordered = Vec::new();
        for key in domain {
            if !index.contains_key(&key) {
                index.insert(key, ordered.len());
                ordered.push(key);
            }
        }

        let mut scale = Self {
            domain: ordered,
            index,
            range: range.map(finite_or_zero),
            padding_inner: 0.0,
            round: false,
            start: 0.0,
            step: 0.0,
            bandwidth: 0.0,
        };
        scale.rescale();
        scale
    }

    /// Sets the fraction of each step left empty between bands.
    pub fn padding_inner(mut self, padding: f64) -> Result<Self> {
        if !(0.0..1.0).contains(&padding) {
            return Err(ChartError::scale(format!(
                "band padding must lie in [0, 1), got {padding}"
            )));
        }
        self.padding_inner = padding;
        self.rescale();
        Ok(self)
    }

    /// Enables or disables pixel rounding.
    #[must_use]
    pub fn round(mut self, round: bool) -> Self {
        self.round = round;
        self.rescale();
        self
    }

    #[allow(clippy::cast_precision_loss)]
    fn rescale(&mut self) {
        let n = self.domain.len() as f64;
        let [r0, r1] = self.range;
        let (start, stop) = if r1 < r0 { (r1, r0) } else { (r0, r1) };

        let mut step = (stop - start) / (n - self.padding_inner).max(1.0);
        if self.round {
            step = step.floor();
        }
        let mut first = start + (stop - start - step * (n - self.padding_inner)) * 0.5;
        let mut bandwidth = step * (1.0 - self.padding_inner);
        if self.round {
            first = first.round();
            bandwidth = bandwidth.round();
        }

        self.start = first;
        self.step = step;
        self.bandwidth = bandwidth;
    }

    /// Start of the band for `key`, `None` outside the domain.
    #[allow(clippy::cast_precision_loss)]
    pub fn map(&self, key: &K) -> Option<f64> {
        let i = *self.index.get(key)?;
        let slot = if self.range[1] < self.range[0] {
            self.domain.len() - 1 - i
        } else {
            i
        };
        Some(self.start + self.step * slot as f64)
    }

    /// Centre of the band for `key`.
    pub fn center(&self, key: &K) -> Option<f64> {
        self.map(key).map(|x| x + self.bandwidth / 2.0)
    }

    /// Width of every band.
    pub const fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Distance between the starts of adjacent bands.
    pub const fn step(&self) -> f64 {
        self.step
    }

    /// Categories in band order.
    pub fn domain(&self) -> &[K] {
        &self.domain
    }

    /// Whether `key` has a band.
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Number of bands.
    pub fn len(&self) -> usize {
        self.domain.len()
    }

    /// Whether the domain is empty.
    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }
}

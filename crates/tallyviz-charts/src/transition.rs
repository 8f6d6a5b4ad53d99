//! Easing curves and clock-driven transition progress.

use std::time::Duration;
use tallyviz_config::EaseKind;

/// Applies `kind` to a linear progress value, clamped to `[0, 1]`.
pub fn ease(kind: EaseKind, t: f64) -> f64 {
    let t = if t.is_nan() { 1.0 } else { t.clamp(0.0, 1.0) };
    match kind {
        EaseKind::Linear => t,
        EaseKind::CubicInOut => cubic_in_out(t),
        EaseKind::BounceOut => bounce_out(t),
    }
}

fn cubic_in_out(t: f64) -> f64 {
    let t = t * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

fn bounce_out(t: f64) -> f64 {
    const B1: f64 = 4.0 / 11.0;
    const B2: f64 = 6.0 / 11.0;
    const B3: f64 = 8.0 / 11.0;
    const B4: f64 = 3.0 / 4.0;
    const B5: f64 = 9.0 / 11.0;
    const B6: f64 = 10.0 / 11.0;
    const B7: f64 = 15.0 / 16.0;
    const B8: f64 = 21.0 / 22.0;
    const B9: f64 = 63.0 / 64.0;
    const B0: f64 = 1.0 / B1 / B1;

    if t < B1 {
        B0 * t * t
    } else if t < B3 {
        let t = t - B2;
        B0 * t * t + B4
    } else if t < B6 {
        let t = t - B5;
        B0 * t * t + B7
    } else {
        let t = t - B8;
        B0 * t * t + B9
    }
}

/// Progress of one transition, advanced by an external clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    duration: Duration,
    elapsed: Duration,
    ease: EaseKind,
}

impl Transition {
    /// Starts a transition. A zero duration is complete immediately.
    pub const fn new(duration: Duration, ease: EaseKind) -> Self {
        Self {
            duration,
            elapsed: Duration::ZERO,
            ease,
        }
    }

    /// A transition that is already complete.
    pub const fn finished() -> Self {
        Self::new(Duration::ZERO, EaseKind::Linear)
    }

    /// Moves the clock forward.
    pub fn advance(&mut self, by: Duration) {
        self.elapsed = self.elapsed.saturating_add(by).min(self.duration);
    }

    /// Jumps to the end.
    pub fn finish(&mut self) {
        self.elapsed = self.duration;
    }

    /// Whether the end has been reached.
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Eased progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.is_complete() {
            return 1.0;
        }
        ease(self.ease, self.elapsed.as_secs_f64() / self.duration.as_secs_f64())
    }
}

//! Timed interpolation state objects
//!
//! A `Transition` replaces a per-frame coroutine: it remembers where it
//! started, where it is going and when, and is sampled by the tick scheduler.
//! Abandoning a transition is just dropping it; a dropped transition can never
//! write again.

use serde::{Deserialize, Serialize};

use super::color::Color;

/// Values that can be linearly interpolated
pub trait Lerp: Copy {
    fn lerp(self, to: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp(self, to: Self, t: f32) -> Self {
        self + t * (to - self)
    }
}

impl Lerp for Color {
    #[inline]
    fn lerp(self, to: Self, t: f32) -> Self {
        Color::from_vec4(self.to_vec4().lerp(to.to_vec4(), t))
    }
}

/// Result of sampling a transition at a point in time
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sample<T> {
    /// Still interpolating
    Running(T),
    /// Duration elapsed; value is exactly the target
    Done(T),
}

impl<T: Copy> Sample<T> {
    pub fn value(self) -> T {
        match self {
            Sample::Running(v) | Sample::Done(v) => v,
        }
    }

    pub fn is_done(self) -> bool {
        matches!(self, Sample::Done(_))
    }
}

/// A bounded-duration interpolation `{source, target, start, duration}`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition<T> {
    pub source: T,
    pub target: T,
    /// Sim time (seconds) the transition began
    pub start: f64,
    pub duration: f32,
}

impl<T: Lerp> Transition<T> {
    pub fn new(source: T, target: T, start: f64, duration: f32) -> Self {
        Self {
            source,
            target,
            start,
            duration,
        }
    }

    /// Fraction of the duration elapsed at `now`, in [0, 1]
    pub fn progress(&self, now: f64) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.start) / f64::from(self.duration)).clamp(0.0, 1.0) as f32
    }

    /// Interpolated value at `now`; snaps to the target once the duration has elapsed
    pub fn sample(&self, now: f64) -> Sample<T> {
        if now >= self.start + f64::from(self.duration) {
            Sample::Done(self.target)
        } else {
            Sample::Running(self.source.lerp(self.target, self.progress(now)))
        }
    }
}

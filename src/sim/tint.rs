//! Body tint transitions and shot colors

use serde::{Deserialize, Serialize};

use super::color::Color;
use super::transition::{Sample, Transition};

/// Current body tint and the transition toward a new one
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TintState {
    /// Tint currently shown
    current: Color,
    transition: Option<Transition<Color>>,
    /// Index into the configured color modes
    pub mode_index: usize,
}

impl TintState {
    pub fn new(initial: Color) -> Self {
        Self {
            current: initial,
            transition: None,
            mode_index: 0,
        }
    }

    pub fn current(&self) -> Color {
        self.current
    }

    pub fn target(&self) -> Option<Color> {
        self.transition.map(|t| t.target)
    }

    /// Start fading from the shown tint to `color`, replacing any running fade
    pub fn set(&mut self, color: Color, now: f64, duration: f32) {
        self.transition = Some(Transition::new(self.current, color, now, duration));
    }

    /// Advance the fade. Returns the tint to present, or None when idle.
    pub fn step(&mut self, now: f64) -> Option<Color> {
        let transition = self.transition?;
        let sample = transition.sample(now);
        self.current = sample.value();
        if let Sample::Done(_) = sample {
            self.transition = None;
        }
        Some(self.current)
    }
}

/// Particle start-color range centered on `color`
pub fn shoot_color_range(color: Color, spread: f32) -> (Color, Color) {
    (color.offset_rgb(-spread), color.offset_rgb(spread))
}

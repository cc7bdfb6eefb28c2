//! RGBA colors for HUD bars and body tint

use glam::Vec4;
use serde::{Deserialize, Serialize};

/// Linear RGBA color, channels nominally in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "opaque")]
    pub a: f32,
}

fn opaque() -> f32 {
    1.0
}

impl Color {
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    /// Warning yellow (1, 0.92, 0.016)
    pub const YELLOW: Color = Color::rgb(1.0, 0.92, 0.016);
    pub const GRAY: Color = Color::rgb(0.5, 0.5, 0.5);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_vec4(self) -> Vec4 {
        Vec4::new(self.r, self.g, self.b, self.a)
    }

    pub fn from_vec4(v: Vec4) -> Self {
        Self::rgba(v.x, v.y, v.z, v.w)
    }

    /// Offset the RGB channels by `delta`, leaving alpha untouched
    pub fn offset_rgb(self, delta: f32) -> Self {
        Self::rgba(self.r + delta, self.g + delta, self.b + delta, self.a)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::GRAY
    }
}

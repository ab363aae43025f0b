//! Core types for the nightbridge scene.

use glam::Vec2;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Viewport width (in logical pixels) below which the compact layout is used.
pub const COMPACT_BREAKPOINT: u32 = 600;

/// Drawing area size in logical device pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Viewport covering `columns` x `rows` terminal cells of the given pixel size.
    pub fn from_cells(columns: u16, rows: u16, cell_width: u32, cell_height: u32) -> Self {
        Self {
            width: u32::from(columns) * cell_width,
            height: u32::from(rows) * cell_height,
        }
    }

    /// Width as `f32`.
    pub fn w(&self) -> f32 {
        self.width as f32
    }

    /// Height as `f32`.
    pub fn h(&self) -> f32 {
        self.height as f32
    }

    /// True when there is nothing to draw on.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// True below the layout breakpoint (small screens get coarser, larger geometry).
    pub fn is_compact(&self) -> bool {
        self.width < COMPACT_BREAKPOINT
    }

    /// Whether a point lies inside the viewport (edges inclusive).
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= 0.0 && point.y >= 0.0 && point.x <= self.w() && point.y <= self.h()
    }

    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// An sRGB color with a separate opacity in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Build an opaque color from `0xRRGGBB`.
    pub const fn hex(value: u32) -> Self {
        Self::rgb(
            ((value >> 16) & 0xff) as u8,
            ((value >> 8) & 0xff) as u8,
            (value & 0xff) as u8,
        )
    }

    /// Same color with a different opacity (clamped to `[0, 1]`).
    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: if a.is_finite() { a.clamp(0.0, 1.0) } else { 0.0 },
            ..self
        }
    }

    /// Composite this color over an opaque backdrop, returning an opaque color.
    pub fn blend_over(self, backdrop: Rgba) -> Rgba {
        let a = self.a.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| (f32::from(fg) * a + f32::from(bg) * (1.0 - a)).round() as u8;
        Rgba::rgb(
            mix(self.r, backdrop.r),
            mix(self.g, backdrop.g),
            mix(self.b, backdrop.b),
        )
    }

    /// Linear interpolation between two colors, `t` in `[0, 1]`.
    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let mix = |from: u8, to: u8| (f32::from(from) + (f32::from(to) - f32::from(from)) * t).round() as u8;
        Rgba {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: self.a + (other.a - self.a) * t,
        }
    }
}

impl From<Rgba> for Color {
    fn from(c: Rgba) -> Self {
        Color::Rgb(c.r, c.g, c.b)
    }
}

/// Optional scene layers the user can switch on and off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneToggles {
    pub hearts: bool,
    pub stars: bool,
    pub moon: bool,
}

impl Default for SceneToggles {
    fn default() -> Self {
        Self {
            hearts: true,
            stars: true,
            moon: true,
        }
    }
}

impl SceneToggles {
    pub fn toggle_hearts(&mut self) {
        self.hearts = !self.hearts;
    }

    pub fn toggle_stars(&mut self) {
        self.stars = !self.stars;
    }

    pub fn toggle_moon(&mut self) {
        self.moon = !self.moon;
    }
}

/// Animation speed setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl AnimationSpeed {
    /// Cycle to the next speed.
    pub fn next(self) -> Self {
        match self {
            AnimationSpeed::Slow => AnimationSpeed::Medium,
            AnimationSpeed::Medium => AnimationSpeed::Fast,
            AnimationSpeed::Fast => AnimationSpeed::Slow,
        }
    }

    /// Multiplier applied to the velocity of moving entities.
    pub fn multiplier(self) -> f32 {
        match self {
            AnimationSpeed::Slow => 0.5,
            AnimationSpeed::Medium => 1.0,
            AnimationSpeed::Fast => 1.5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AnimationSpeed::Slow => "slow",
            AnimationSpeed::Medium => "medium",
            AnimationSpeed::Fast => "fast",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_from_cells() {
        let v = Viewport::from_cells(120, 40, 8, 16);
        assert_eq!(v, Viewport::new(960, 640));
        assert!(!v.is_compact());
        assert!(Viewport::from_cells(70, 20, 8, 16).is_compact());
        assert!(Viewport::new(0, 10).is_empty());
    }

    #[test]
    fn test_hex_and_blend() {
        let c = Rgba::hex(0xffeb3b);
        assert_eq!((c.r, c.g, c.b), (0xff, 0xeb, 0x3b));

        let white = Rgba::rgb(255, 255, 255).with_alpha(0.5);
        let blended = white.blend_over(Rgba::rgb(0, 0, 0));
        assert_eq!((blended.r, blended.g, blended.b), (128, 128, 128));
        assert_eq!(blended.a, 1.0);
    }

    #[test]
    fn test_with_alpha_clamps() {
        assert_eq!(Rgba::rgb(1, 2, 3).with_alpha(3.0).a, 1.0);
        assert_eq!(Rgba::rgb(1, 2, 3).with_alpha(f32::NAN).a, 0.0);
    }

    #[test]
    fn test_speed_cycle() {
        let speed = AnimationSpeed::default();
        assert_eq!(speed, AnimationSpeed::Medium);
        assert_eq!(speed.next().next().next(), speed);
        assert!(AnimationSpeed::Fast.multiplier() > AnimationSpeed::Slow.multiplier());
    }
}

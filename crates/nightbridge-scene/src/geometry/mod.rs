//! Viewport-derived shapes: the suspension bridge and the water band.

pub mod bridge;
pub mod water;

use glam::Vec2;

pub use bridge::{BridgeGeometry, CableCurve};
pub use water::WaterBand;

/// Fraction of the height where the water starts.
pub const WATER_LEVEL: f32 = 0.85;

/// Fraction of the height where the bridge deck (and the road) sits.
pub const DECK_LEVEL: f32 = 0.6;

/// Point on the quadratic Bézier `from -> control -> to` at `t` in `[0, 1]`.
pub fn quadratic_point(from: Vec2, control: Vec2, to: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    from * (u * u) + control * (2.0 * u * t) + to * (t * t)
}

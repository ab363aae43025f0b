//! Animated water band under the skyline.

use glam::Vec2;
use nightbridge_core::Viewport;

use super::WATER_LEVEL;
use crate::color::{WATER_BOTTOM, WATER_TOP, WHITE};
use crate::surface::{Rect, Surface};

/// Number of wave lines drawn across the water.
pub const WAVE_LINES: usize = 5;

/// Horizontal distance between wave samples.
pub const WAVE_SAMPLE_STEP: usize = 10;

/// Phase advance per frame at normal speed.
const OFFSET_STEP: f32 = 0.02;

/// Water band state; the only thing that persists is the wave phase.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WaterBand {
    pub offset: f32,
}

impl WaterBand {
    /// Advance the wave phase by one frame.
    pub fn advance(&mut self, speed: f32) {
        self.offset = (self.offset + OFFSET_STEP * speed) % std::f32::consts::TAU;
    }

    /// Sample wave line `index` across the viewport.
    pub fn wave_line(&self, viewport: Viewport, index: usize) -> Vec<Vec2> {
        let level = viewport.h() * WATER_LEVEL;
        let i = index as f32;
        (0..viewport.width as usize)
            .step_by(WAVE_SAMPLE_STEP)
            .map(|x| {
                let x = x as f32;
                let y = level + 10.0 + i * 15.0 + (x * 0.01 + self.offset + i).sin() * 5.0;
                Vec2::new(x, y)
            })
            .collect()
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, viewport: Viewport) {
        let level = viewport.h() * WATER_LEVEL;
        surface.fill_vertical_gradient(
            Rect::new(0.0, level, viewport.w(), viewport.h() - level),
            WATER_TOP,
            WATER_BOTTOM,
        );

        let ripple = WHITE.with_alpha(0.05);
        for index in 0..WAVE_LINES {
            surface.stroke_polyline(&self.wave_line(viewport, index), 1.0, ripple);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, DrawList};

    #[test]
    fn test_wave_samples() {
        let water = WaterBand::default();
        let viewport = Viewport::new(800, 600);
        let line = water.wave_line(viewport, 0);
        assert_eq!(line.len(), 80);
        assert!((line[0] - Vec2::new(0.0, 520.0)).length() < 1e-3);
        for point in &line {
            assert!((point.y - 520.0).abs() <= 5.0 + 1e-3);
        }
    }

    #[test]
    fn test_advance_moves_phase() {
        let mut water = WaterBand::default();
        water.advance(1.0);
        water.advance(1.0);
        assert!((water.offset - 0.04).abs() < 1e-6);
    }

    #[test]
    fn test_draw_gradient_and_waves() {
        let mut list = DrawList::new();
        WaterBand::default().draw(&mut list, Viewport::new(400, 300));
        assert!(matches!(
            list.commands()[0],
            DrawCommand::FillVerticalGradient { .. }
        ));
        assert_eq!(list.len(), 1 + WAVE_LINES);
    }
}

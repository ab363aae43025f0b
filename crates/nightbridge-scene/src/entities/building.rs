//! Skyline buildings with stochastically flickering windows.

use glam::Vec2;
use nightbridge_core::Viewport;
use rand::Rng;

use crate::color::{BUILDING, WINDOW};
use crate::geometry::WATER_LEVEL;
use crate::surface::{Rect, Surface};

/// Horizontal window pitch.
const WINDOW_COLUMN: f32 = 10.0;
/// Vertical window pitch.
const WINDOW_ROW: f32 = 15.0;
const WINDOW_SIZE: Vec2 = Vec2::new(4.0, 8.0);
/// Chance that a grid cell holds a window at all.
const WINDOW_DENSITY: f64 = 0.3;
/// Neighbouring buildings overlap by this much so the skyline has no gaps.
const OVERLAP: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    pub position: Vec2,
    pub on: bool,
    /// Per-frame chance of toggling.
    pub flicker_rate: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Building {
    pub x: f32,
    pub width: f32,
    pub height: f32,
    pub windows: Vec<Window>,
}

impl Building {
    /// Create a building standing on the water line, with its windows laid out.
    pub fn new<R: Rng + ?Sized>(
        x: f32,
        width: f32,
        height: f32,
        water_level: f32,
        rng: &mut R,
    ) -> Self {
        let rows = (height / WINDOW_ROW).floor() as usize;
        let cols = (width / WINDOW_COLUMN).floor() as usize;
        let top = water_level - height;

        let mut windows = Vec::new();
        for r in 0..rows {
            for c in 0..cols {
                if !rng.random_bool(WINDOW_DENSITY) {
                    continue;
                }
                windows.push(Window {
                    position: Vec2::new(
                        x + c as f32 * WINDOW_COLUMN + 2.0,
                        top + r as f32 * WINDOW_ROW + 5.0,
                    ),
                    on: rng.random_bool(0.5),
                    flicker_rate: rng.random::<f32>() * 0.05,
                });
            }
        }

        Self {
            x,
            width,
            height,
            windows,
        }
    }

    /// Right edge of the building.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Toggle each window with its own per-frame probability.
    pub fn flicker<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for window in &mut self.windows {
            if rng.random::<f32>() < window.flicker_rate {
                window.on = !window.on;
            }
        }
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, water_level: f32) {
        surface.fill_rect(
            Rect::new(self.x, water_level - self.height, self.width, self.height),
            BUILDING,
        );

        let lit = WINDOW.with_alpha(0.6);
        for window in self.windows.iter().filter(|w| w.on) {
            surface.fill_rect(
                Rect::new(
                    window.position.x,
                    window.position.y,
                    WINDOW_SIZE.x,
                    WINDOW_SIZE.y,
                ),
                lit,
            );
        }
    }
}

/// Lay buildings side by side until the whole width is covered.
pub fn init_skyline<R: Rng + ?Sized>(viewport: Viewport, rng: &mut R) -> Vec<Building> {
    let water_level = viewport.h() * WATER_LEVEL;
    let mut buildings = Vec::new();
    let mut x = 0.0;
    while x < viewport.w() {
        let width = rng.random_range(20.0..80.0);
        let height = rng.random_range(50.0..200.0);
        buildings.push(Building::new(x, width, height, water_level, rng));
        x += width - OVERLAP;
    }
    buildings
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_skyline_covers_width_without_gaps() {
        let mut rng = Pcg32::seed_from_u64(3);
        for viewport in [Viewport::new(800, 600), Viewport::new(1920, 1080), Viewport::new(37, 90)] {
            let skyline = init_skyline(viewport, &mut rng);
            assert!(!skyline.is_empty());
            assert_eq!(skyline[0].x, 0.0);
            for pair in skyline.windows(2) {
                assert!(pair[1].x <= pair[0].right());
            }
            assert!(skyline.last().unwrap().right() >= viewport.w());
        }
    }

    #[test]
    fn test_empty_viewport_has_no_buildings() {
        let mut rng = Pcg32::seed_from_u64(3);
        assert!(init_skyline(Viewport::new(0, 600), &mut rng).is_empty());
    }

    #[test]
    fn test_windows_inside_building() {
        let mut rng = Pcg32::seed_from_u64(11);
        let building = Building::new(100.0, 60.0, 150.0, 500.0, &mut rng);
        assert!(!building.windows.is_empty());
        for window in &building.windows {
            assert!(window.position.x >= 100.0 && window.position.x + 4.0 <= 160.0);
            assert!(window.position.y >= 350.0 && window.position.y + 8.0 <= 500.0);
            assert!((0.0..0.05).contains(&window.flicker_rate));
        }
    }

    #[test]
    fn test_flicker_never_changes_window_count() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut building = Building::new(0.0, 80.0, 199.0, 500.0, &mut rng);
        for window in &mut building.windows {
            window.flicker_rate = 1.0;
        }
        let before: Vec<bool> = building.windows.iter().map(|w| w.on).collect();
        building.flicker(&mut rng);
        let after: Vec<bool> = building.windows.iter().map(|w| w.on).collect();
        assert_eq!(before.len(), after.len());
        assert!(before.iter().zip(&after).all(|(b, a)| b != a));
    }
}

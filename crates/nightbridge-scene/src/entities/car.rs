//! Traffic on the bridge deck.

use glam::Vec2;
use nightbridge_core::{Rgba, Viewport};
use rand::Rng;

use crate::color::{CAR_LEFTWARD, CAR_RIGHTWARD};
use crate::geometry::DECK_LEVEL;
use crate::surface::{Rect, Surface};

/// How far past an edge a car may travel before it wraps.
pub const CAR_MARGIN: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Car {
    pub position: Vec2,
    /// Pixels per frame; the sign is the direction of travel.
    pub speed: f32,
    pub size: f32,
}

impl Car {
    /// A car somewhere on the deck, heading either way.
    pub fn new<R: Rng + ?Sized>(viewport: Viewport, rng: &mut R) -> Self {
        let direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let mut car = Self {
            position: Vec2::new(rng.random::<f32>() * viewport.w(), viewport.h() * DECK_LEVEL),
            speed: direction,
            size: 0.0,
        };
        car.randomize(viewport, rng);
        car
    }

    /// Pick a new speed magnitude and size, keeping the direction.
    fn randomize<R: Rng + ?Sized>(&mut self, viewport: Viewport, rng: &mut R) {
        let direction = self.direction();
        self.speed = rng.random_range(1.0..3.0) * direction;
        self.size = rng.random_range(2.0..5.0);
        if viewport.is_compact() {
            self.size *= 0.6;
        }
        self.position.y = viewport.h() * DECK_LEVEL;
    }

    /// `1.0` when heading right, `-1.0` when heading left.
    pub fn direction(&self) -> f32 {
        if self.speed < 0.0 { -1.0 } else { 1.0 }
    }

    /// Headlights for rightward traffic, tail lights for leftward.
    pub fn color(&self) -> Rgba {
        if self.direction() > 0.0 {
            CAR_RIGHTWARD
        } else {
            CAR_LEFTWARD
        }
    }

    /// Move one frame; returns `true` when the car wrapped to the other edge.
    pub fn update<R: Rng + ?Sized>(&mut self, viewport: Viewport, speed: f32, rng: &mut R) -> bool {
        self.position.x += self.speed * speed;
        let exited = self.position.x > viewport.w() + CAR_MARGIN || self.position.x < -CAR_MARGIN;
        if !exited {
            return false;
        }

        self.randomize(viewport, rng);
        self.position.x = if self.direction() > 0.0 {
            -CAR_MARGIN
        } else {
            viewport.w() + CAR_MARGIN
        };
        true
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let color = self.color();
        let body = Rect::new(
            self.position.x,
            self.position.y - 2.0,
            self.size * 2.0,
            self.size,
        );
        // Soft glow around the lights.
        surface.fill_rect(
            Rect::new(body.x - 2.0, body.y - 2.0, body.width + 4.0, body.height + 4.0),
            color.with_alpha(0.2),
        );
        surface.fill_rect(body, color);
    }
}

/// Spawn `count` cars spread over the deck.
pub fn init_traffic<R: Rng + ?Sized>(count: usize, viewport: Viewport, rng: &mut R) -> Vec<Car> {
    (0..count).map(|_| Car::new(viewport, rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn car(x: f32, speed: f32) -> Car {
        Car {
            position: Vec2::new(x, 360.0),
            speed,
            size: 3.0,
        }
    }

    #[test]
    fn test_rightward_car_wraps_to_left_edge() {
        let viewport = Viewport::new(800, 600);
        let mut rng = Pcg32::seed_from_u64(1);
        let mut c = car(809.5, 1.0);
        assert!(c.update(viewport, 1.0, &mut rng));
        assert_eq!(c.position.x, -10.0);
        assert!(c.speed > 0.0);
    }

    #[test]
    fn test_leftward_car_wraps_to_right_edge() {
        let viewport = Viewport::new(800, 600);
        let mut rng = Pcg32::seed_from_u64(2);
        let mut c = car(-9.5, -1.0);
        assert!(c.update(viewport, 1.0, &mut rng));
        assert_eq!(c.position.x, 810.0);
        assert!(c.speed < 0.0);
        assert_eq!(c.color(), CAR_LEFTWARD);
    }

    #[test]
    fn test_car_inside_viewport_just_moves() {
        let viewport = Viewport::new(800, 600);
        let mut rng = Pcg32::seed_from_u64(3);
        let mut c = car(100.0, 2.0);
        assert!(!c.update(viewport, 0.5, &mut rng));
        assert_eq!(c.position.x, 101.0);
    }

    #[test]
    fn test_wrapped_car_reenters() {
        let viewport = Viewport::new(800, 600);
        let mut rng = Pcg32::seed_from_u64(4);
        let mut cars = init_traffic(20, viewport, &mut rng);
        for _ in 0..2000 {
            for c in &mut cars {
                c.update(viewport, 1.0, &mut rng);
                assert!(c.position.x >= -CAR_MARGIN - 3.0);
                assert!(c.position.x <= viewport.w() + CAR_MARGIN + 3.0);
            }
        }
        assert_eq!(cars.len(), 20);
    }

    #[test]
    fn test_compact_cars_are_smaller() {
        let mut rng = Pcg32::seed_from_u64(9);
        for c in init_traffic(50, Viewport::new(400, 600), &mut rng) {
            assert!(c.size < 3.0 + 1e-4);
            assert!((1.0..3.0).contains(&c.speed.abs()));
        }
    }
}

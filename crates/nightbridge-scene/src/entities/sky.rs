//! Night sky: twinkling stars, shooting stars and the moon.

use chrono::{Datelike, NaiveDate};
use glam::Vec2;
use nightbridge_core::Viewport;
use rand::Rng;

use crate::color::{MOON, NIGHT_SKY, WHITE};
use crate::surface::Surface;

/// Stars only appear above this fraction of the height.
const STAR_BAND: f32 = 0.6;

/// Mean length of a lunar cycle in days.
const SYNODIC_MONTH: f64 = 29.530588853;

/// Day number (days from CE, fractional) of the new moon on 2000-01-06 18:14 UTC.
const REFERENCE_NEW_MOON: f64 = 730_125.0 + (18.0 + 14.0 / 60.0) / 24.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub position: Vec2,
    pub radius: f32,
    /// Brightness change per frame; flips sign at the bounds.
    pub twinkle_rate: f32,
    /// Current brightness in `[0, 1]`.
    pub brightness: f32,
}

impl Star {
    pub fn new<R: Rng + ?Sized>(viewport: Viewport, rng: &mut R) -> Self {
        let rate = rng.random_range(0.005..0.02);
        Self {
            position: Vec2::new(
                rng.random::<f32>() * viewport.w(),
                rng.random::<f32>() * viewport.h() * STAR_BAND,
            ),
            radius: rng.random_range(0.3..1.5),
            twinkle_rate: if rng.random_bool(0.5) { rate } else { -rate },
            brightness: rng.random::<f32>(),
        }
    }

    /// Step the twinkle, reflecting at 0 and 1.
    pub fn update(&mut self) {
        self.brightness += self.twinkle_rate;
        if self.brightness >= 1.0 {
            self.brightness = 1.0;
            self.twinkle_rate = -self.twinkle_rate.abs();
        } else if self.brightness <= 0.0 {
            self.brightness = 0.0;
            self.twinkle_rate = self.twinkle_rate.abs();
        }
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        if self.brightness > 0.0 {
            surface.fill_circle(self.position, self.radius, WHITE.with_alpha(self.brightness));
        }
    }
}

/// Star count scaled with the sky area.
pub fn star_count(viewport: Viewport) -> usize {
    if viewport.is_empty() {
        return 0;
    }
    ((viewport.area() / 4000) as usize).clamp(40, 250)
}

pub fn init_stars<R: Rng + ?Sized>(viewport: Viewport, rng: &mut R) -> Vec<Star> {
    (0..star_count(viewport))
        .map(|_| Star::new(viewport, rng))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShootingStar {
    pub position: Vec2,
    pub trail_length: f32,
    pub speed: f32,
    /// Heading in radians, screen coordinates (y down).
    pub angle: f32,
    pub opacity: f32,
    /// Opacity lost per frame.
    pub fade: f32,
    /// Frames to wait before appearing.
    pub delay: u32,
}

impl ShootingStar {
    pub fn new<R: Rng + ?Sized>(viewport: Viewport, rng: &mut R) -> Self {
        let mut star = Self {
            position: Vec2::ZERO,
            trail_length: 0.0,
            speed: 0.0,
            angle: 0.0,
            opacity: 0.0,
            fade: 0.0,
            delay: 0,
        };
        star.reset(viewport, rng);
        star
    }

    /// Start a new streak from a random origin in the upper sky.
    pub fn reset<R: Rng + ?Sized>(&mut self, viewport: Viewport, rng: &mut R) {
        self.position = Vec2::new(
            rng.random_range(0.1..=1.0) * viewport.w(),
            rng.random::<f32>() * viewport.h() * 0.3,
        );
        self.trail_length = rng.random_range(60.0..140.0);
        self.speed = rng.random_range(6.0..12.0);
        // Down and to the left, with some spread.
        self.angle = std::f32::consts::FRAC_PI_4 * 3.0 + rng.random_range(-0.15..0.15);
        self.opacity = 1.0;
        self.fade = rng.random_range(0.01..0.025);
        self.delay = rng.random_range(60..400);
    }

    pub fn heading(&self) -> Vec2 {
        Vec2::new(self.angle.cos(), self.angle.sin())
    }

    pub fn is_visible(&self) -> bool {
        self.delay == 0 && self.opacity > 0.0
    }

    pub fn update<R: Rng + ?Sized>(&mut self, viewport: Viewport, speed: f32, rng: &mut R) {
        if self.delay > 0 {
            self.delay -= 1;
            return;
        }
        self.position += self.heading() * self.speed * speed;
        self.opacity -= self.fade;
        if self.opacity <= 0.0 {
            self.reset(viewport, rng);
        }
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        if !self.is_visible() {
            return;
        }
        let tail = self.position - self.heading() * self.trail_length;
        surface.stroke_line(tail, self.position, 1.0, WHITE.with_alpha(self.opacity * 0.6));
        surface.plot(self.position, WHITE.with_alpha(self.opacity));
    }
}

pub fn init_shooting_stars<R: Rng + ?Sized>(viewport: Viewport, rng: &mut R) -> Vec<ShootingStar> {
    (0..3).map(|_| ShootingStar::new(viewport, rng)).collect()
}

/// Moon phase for a calendar day: 0 is new, 0.5 is full.
pub fn moon_phase(date: NaiveDate) -> f32 {
    let day = f64::from(date.num_days_from_ce()) + 0.5;
    ((day - REFERENCE_NEW_MOON) / SYNODIC_MONTH).rem_euclid(1.0) as f32
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moon {
    pub center: Vec2,
    pub radius: f32,
    /// Lunar phase in `[0, 1)`.
    pub phase: f32,
}

impl Moon {
    pub fn for_viewport(viewport: Viewport, phase: f32) -> Self {
        Self {
            center: Vec2::new(viewport.w() * 0.82, viewport.h() * 0.16),
            radius: (viewport.w().min(viewport.h()) * 0.05).max(2.0),
            phase,
        }
    }

    /// Horizontal offset of the shadow disc covering the dark part.
    ///
    /// Waxing moons are lit on the right, so the shadow sits left; waning the
    /// other way round. New moon covers the disc entirely.
    pub fn shadow_offset(&self) -> f32 {
        let diameter = self.radius * 2.0;
        if self.phase < 0.5 {
            -diameter * self.phase * 2.0
        } else {
            diameter * (2.0 - self.phase * 2.0)
        }
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        for (scale, alpha) in [(2.2, 0.04), (1.7, 0.07), (1.3, 0.12)] {
            surface.fill_circle(self.center, self.radius * scale, MOON.with_alpha(alpha));
        }
        surface.fill_circle(self.center, self.radius, MOON);

        let offset = self.shadow_offset();
        if offset.abs() < self.radius * 2.0 {
            surface.fill_circle(
                self.center + Vec2::new(offset, 0.0),
                self.radius * 1.02,
                NIGHT_SKY.with_alpha(0.92),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_star_brightness_reflects() {
        let mut star = Star {
            position: Vec2::ZERO,
            radius: 1.0,
            twinkle_rate: 0.3,
            brightness: 0.8,
        };
        star.update();
        assert_eq!(star.brightness, 1.0);
        assert!(star.twinkle_rate < 0.0);

        for _ in 0..10 {
            star.update();
            assert!((0.0..=1.0).contains(&star.brightness));
        }
    }

    #[test]
    fn test_star_bounds_over_many_frames() {
        let mut rng = Pcg32::seed_from_u64(8);
        let viewport = Viewport::new(800, 600);
        let mut stars = init_stars(viewport, &mut rng);
        assert_eq!(stars.len(), 120);
        for _ in 0..500 {
            for star in &mut stars {
                star.update();
                assert!((0.0..=1.0).contains(&star.brightness));
            }
        }
        assert!(stars.iter().all(|s| s.position.y <= 600.0 * STAR_BAND));
    }

    #[test]
    fn test_shooting_star_recycles() {
        let mut rng = Pcg32::seed_from_u64(21);
        let viewport = Viewport::new(800, 600);
        let mut star = ShootingStar::new(viewport, &mut rng);
        star.delay = 0;
        star.fade = 0.25;

        for _ in 0..3 {
            star.update(viewport, 1.0, &mut rng);
        }
        assert!((star.opacity - 0.25).abs() < 1e-6);

        star.update(viewport, 1.0, &mut rng);
        assert_eq!(star.opacity, 1.0);
        assert!(star.delay > 0);
        assert!(!star.is_visible());
    }

    #[test]
    fn test_shooting_star_waits_out_delay() {
        let mut rng = Pcg32::seed_from_u64(22);
        let viewport = Viewport::new(800, 600);
        let mut star = ShootingStar::new(viewport, &mut rng);
        star.delay = 2;
        let start = star.position;
        star.update(viewport, 1.0, &mut rng);
        star.update(viewport, 1.0, &mut rng);
        assert_eq!(star.position, start);
        star.update(viewport, 1.0, &mut rng);
        assert_ne!(star.position, start);
    }

    #[test]
    fn test_moon_phase_known_dates() {
        let new_moon = moon_phase(NaiveDate::from_ymd_opt(2024, 4, 8).unwrap());
        assert!(new_moon < 0.03 || new_moon > 0.97, "phase {new_moon}");

        let full_moon = moon_phase(NaiveDate::from_ymd_opt(2024, 4, 23).unwrap());
        assert!((full_moon - 0.5).abs() < 0.03, "phase {full_moon}");
    }

    #[test]
    fn test_moon_shadow_offsets() {
        let viewport = Viewport::new(1000, 800);
        assert_eq!(Moon::for_viewport(viewport, 0.0).shadow_offset(), 0.0);

        let full = Moon::for_viewport(viewport, 0.5);
        assert_eq!(full.shadow_offset(), full.radius * 2.0);

        assert!(Moon::for_viewport(viewport, 0.25).shadow_offset() < 0.0);
        assert!(Moon::for_viewport(viewport, 0.75).shadow_offset() > 0.0);
    }
}

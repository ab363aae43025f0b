//! Hearts drifting up through the scene.

use glam::Vec2;
use nightbridge_core::Viewport;
use rand::Rng;

use crate::color::HEART;
use crate::surface::Surface;

/// Points sampled along the heart outline.
const OUTLINE_POINTS: usize = 28;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Heart {
    pub position: Vec2,
    pub size: f32,
    /// Upward pixels per frame.
    pub speed: f32,
    pub phase: f32,
    pub opacity: f32,
}

impl Heart {
    /// A heart anywhere on screen, so the first frames are not empty.
    pub fn new<R: Rng + ?Sized>(viewport: Viewport, rng: &mut R) -> Self {
        let mut heart = Self {
            position: Vec2::ZERO,
            size: 0.0,
            speed: 0.0,
            phase: 0.0,
            opacity: 0.0,
        };
        heart.reset(viewport, rng);
        heart.position.y = rng.random::<f32>() * viewport.h();
        heart
    }

    /// Respawn just below the bottom edge.
    pub fn reset<R: Rng + ?Sized>(&mut self, viewport: Viewport, rng: &mut R) {
        self.size = rng.random_range(6.0..14.0);
        self.speed = rng.random_range(0.5..1.5);
        self.phase = rng.random_range(0.0..std::f32::consts::TAU);
        self.opacity = rng.random_range(0.3..0.8);
        self.position = Vec2::new(rng.random::<f32>() * viewport.w(), viewport.h() + self.size);
    }

    pub fn update<R: Rng + ?Sized>(
        &mut self,
        viewport: Viewport,
        elapsed_ms: u64,
        speed: f32,
        rng: &mut R,
    ) {
        self.position.y -= self.speed * speed;
        let drift = (elapsed_ms as f64 * 0.002 + f64::from(self.phase)).sin() as f32;
        self.position.x += drift * 0.5;
        if self.position.y < -self.size * 2.0 {
            self.reset(viewport, rng);
        }
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.fill_polygon(
            &heart_outline(self.position, self.size),
            HEART.with_alpha(self.opacity),
        );
    }
}

/// Classic parametric heart centered on `center`, roughly `size` wide.
pub fn heart_outline(center: Vec2, size: f32) -> Vec<Vec2> {
    let scale = size / 32.0;
    (0..OUTLINE_POINTS)
        .map(|i| {
            let t = i as f32 / OUTLINE_POINTS as f32 * std::f32::consts::TAU;
            let x = 16.0 * t.sin().powi(3);
            let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
            // The curve's y axis points up.
            center + Vec2::new(x, -y) * scale
        })
        .collect()
}

pub fn init_hearts<R: Rng + ?Sized>(count: usize, viewport: Viewport, rng: &mut R) -> Vec<Heart> {
    (0..count).map(|_| Heart::new(viewport, rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_outline_fits_size() {
        let outline = heart_outline(Vec2::new(100.0, 100.0), 32.0);
        assert_eq!(outline.len(), OUTLINE_POINTS);
        for p in &outline {
            assert!((p.x - 100.0).abs() <= 16.0 + 1e-3);
            assert!((p.y - 100.0).abs() <= 17.0 + 1e-3);
        }
    }

    #[test]
    fn test_hearts_recycle_in_place() {
        let mut rng = Pcg32::seed_from_u64(13);
        let viewport = Viewport::new(640, 480);
        let mut hearts = init_hearts(15, viewport, &mut rng);
        for frame in 0..2000u64 {
            for heart in &mut hearts {
                heart.update(viewport, frame * 16, 1.0, &mut rng);
                assert!(heart.position.y >= -heart.size * 2.0);
                assert!(heart.position.y <= viewport.h() + heart.size);
            }
        }
        assert_eq!(hearts.len(), 15);
    }

    #[test]
    fn test_reset_starts_below_bottom() {
        let mut rng = Pcg32::seed_from_u64(14);
        let viewport = Viewport::new(640, 480);
        let mut heart = Heart::new(viewport, &mut rng);
        heart.reset(viewport, &mut rng);
        assert_eq!(heart.position.y, 480.0 + heart.size);
    }
}

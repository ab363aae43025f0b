//! Firework bursts and timed firework shows.

use std::collections::VecDeque;

use glam::Vec2;
use nightbridge_core::{Rgba, Viewport};
use rand::Rng;

use crate::color::hsl_to_rgba;
use crate::surface::Surface;

/// Life lost by each spark per tick.
pub const SPARK_DECAY: f32 = 0.02;

/// Sparks whose life falls below this are dropped.
const LIFE_EPSILON: f32 = 1e-3;

const GRAVITY: f32 = 0.05;
const FRICTION: f32 = 0.98;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spark {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Remaining life in `(0, 1]`; doubles as opacity.
    pub life: f32,
    pub color: Rgba,
}

impl Spark {
    fn update(&mut self) {
        self.velocity *= FRICTION;
        self.velocity.y += GRAVITY;
        self.position += self.velocity;
        self.life -= SPARK_DECAY;
    }

    fn is_alive(&self) -> bool {
        self.life > LIFE_EPSILON
    }
}

/// One explosion. Its sparks only ever decrease until none are left.
#[derive(Debug, Clone, PartialEq)]
pub struct Burst {
    sparks: Vec<Spark>,
}

impl Burst {
    /// A burst of 60 to 100 sparks around `origin`.
    pub fn new<R: Rng + ?Sized>(origin: Vec2, rng: &mut R) -> Self {
        let count = rng.random_range(60..=100);
        Self::with_sparks(origin, count, rng)
    }

    /// A burst with exactly `count` sparks.
    pub fn with_sparks<R: Rng + ?Sized>(origin: Vec2, count: usize, rng: &mut R) -> Self {
        let hue = rng.random_range(0.0..360.0);
        let sparks = (0..count)
            .map(|_| {
                let angle = rng.random_range(0.0..std::f32::consts::TAU);
                let speed = rng.random_range(1.0..6.0);
                Spark {
                    position: origin,
                    velocity: Vec2::new(angle.cos(), angle.sin()) * speed,
                    life: 1.0,
                    color: hsl_to_rgba(hue + rng.random_range(-20.0..20.0), 1.0, 0.6),
                }
            })
            .collect();
        Self { sparks }
    }

    pub fn sparks(&self) -> &[Spark] {
        &self.sparks
    }

    pub fn len(&self) -> usize {
        self.sparks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sparks.is_empty()
    }

    /// A burst with no sparks left can be discarded.
    pub fn is_dead(&self) -> bool {
        self.sparks.is_empty()
    }

    /// Advance every spark one tick and drop the spent ones.
    pub fn update(&mut self) {
        for spark in &mut self.sparks {
            spark.update();
        }
        self.sparks.retain(Spark::is_alive);
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        for spark in &self.sparks {
            surface.fill_circle(spark.position, 1.5, spark.color.with_alpha(spark.life));
        }
    }
}

/// Random launch point for show bursts, in the upper middle of the scene.
pub fn show_origin<R: Rng + ?Sized>(viewport: Viewport, rng: &mut R) -> Vec2 {
    Vec2::new(
        viewport.w() * rng.random_range(0.2..=0.8),
        viewport.h() * rng.random_range(0.1..=0.4),
    )
}

/// Queue of scheduled burst launch times.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FireworkLauncher {
    pending: VecDeque<u64>,
}

impl FireworkLauncher {
    /// Schedule `count` launches, the first at `now_ms`, then every `interval_ms`.
    pub fn schedule(&mut self, now_ms: u64, count: usize, interval_ms: u64) {
        let start = self.pending.back().map_or(now_ms, |&last| last.max(now_ms));
        let offset = u64::from(!self.pending.is_empty());
        for i in 0..count as u64 {
            let delay = (i + offset).saturating_mul(interval_ms);
            self.pending.push_back(start.saturating_add(delay));
        }
    }

    /// Remove and count the launches due at `now_ms`.
    pub fn take_due(&mut self, now_ms: u64) -> usize {
        let mut due = 0;
        while self.pending.front().is_some_and(|&at| at <= now_ms) {
            self.pending.pop_front();
            due += 1;
        }
        due
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

//! Particle text: seeding from a glyph mask, pointer physics and the
//! decorations drawn between particles.

use glam::Vec2;
use nightbridge_core::Viewport;
use nightbridge_glyphs::OpacityMask;
use rand::Rng;

use crate::color::WHITE;
use crate::geometry::BridgeGeometry;
use crate::surface::Surface;

/// Mask opacity above which a sample spawns a particle.
const ALPHA_THRESHOLD: u8 = 127;

/// Connect particles closer than this.
pub const CONNECT_DISTANCE: f32 = 15.0;

/// Connections drawn from any one particle.
pub const MAX_CONNECTIONS: usize = 3;

/// Stop looking for neighbours once they are this far apart vertically.
const CONNECT_ROW_GAP: f32 = 20.0;

/// Per-frame chance that a particle draws a line down to the cable.
const SNAP_PROBABILITY: f64 = 0.01;

const REPULSION: f32 = 0.6;
const RETURN_RATE: f32 = 0.1;
const SWAY_AMPLITUDE: f64 = 0.3;

/// Grid stride used to sample the mask.
pub fn sample_stride(viewport: Viewport) -> usize {
    if viewport.is_compact() { 5 } else { 4 }
}

/// Pointer as seen by the particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    pub position: Option<Vec2>,
    pub influence_radius: f32,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            position: None,
            influence_radius: 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    /// Where the particle settles; fixed once seeded.
    pub base_position: Vec2,
    pub radius: f32,
    /// Scales how hard the pointer pushes this particle.
    pub density: f32,
    pub phase: f32,
    pub has_tether: bool,
    pub tether_length: f32,
    /// Ambient offset added on top of `position` when drawing.
    pub sway: Vec2,
}

impl Particle {
    pub fn new<R: Rng + ?Sized>(base_position: Vec2, rng: &mut R) -> Self {
        Self {
            position: base_position,
            base_position,
            radius: rng.random_range(0.5..2.0),
            density: rng.random_range(1.0..31.0),
            phase: rng.random_range(0.0..std::f32::consts::TAU),
            has_tether: rng.random_bool(0.3),
            tether_length: rng.random_range(5.0..25.0),
            sway: Vec2::ZERO,
        }
    }

    /// Where the particle is drawn.
    pub fn rendered(&self) -> Vec2 {
        self.position + self.sway
    }

    pub fn update(&mut self, pointer: &PointerState, elapsed_ms: u64) {
        let radius = pointer.influence_radius;
        let push = pointer.position.and_then(|at| {
            let toward = at - self.position;
            let distance = toward.length();
            (distance.is_finite() && distance > f32::EPSILON && distance < radius)
                .then(|| toward / distance * ((radius - distance) / radius) * self.density * REPULSION)
        });

        match push {
            Some(force) => self.position -= force,
            None => self.position -= (self.position - self.base_position) * RETURN_RATE,
        }

        let t = elapsed_ms as f64;
        let phase = f64::from(self.phase);
        self.sway = Vec2::new(
            ((t * 0.001 + phase).sin() * SWAY_AMPLITUDE) as f32,
            ((t * 0.0015 + phase).cos() * SWAY_AMPLITUDE) as f32,
        );

        if !self.position.is_finite() {
            self.position = self.base_position;
        }
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, elapsed_ms: u64) {
        let at = self.rendered();
        surface.fill_circle(at, self.radius, WHITE.with_alpha(0.8));
        if self.has_tether {
            let swing = (elapsed_ms as f64 * 0.002 + f64::from(self.phase)).sin() as f32 * 2.0;
            surface.stroke_line(
                at,
                at + Vec2::new(swing, self.tether_length),
                0.5,
                WHITE.with_alpha(0.3),
            );
        }
    }
}

/// Pairs `(i, j)` with `i < j` of points closer than [`CONNECT_DISTANCE`].
///
/// The scan for each `i` stops after [`MAX_CONNECTIONS`] hits or once a point
/// is more than a row gap away vertically. Points seeded row by row make
/// this a cheap approximation of nearest neighbours, not an exact search.
pub fn proximity_pairs(points: &[Vec2]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for (i, a) in points.iter().enumerate() {
        let mut connected = 0;
        for (j, b) in points.iter().enumerate().skip(i + 1) {
            if a.distance(*b) < CONNECT_DISTANCE {
                pairs.push((i, j));
                connected += 1;
                if connected >= MAX_CONNECTIONS {
                    break;
                }
            }
            if (b.y - a.y).abs() > CONNECT_ROW_GAP {
                break;
            }
        }
    }
    pairs
}

/// All particles making up the current text.
#[derive(Debug, Clone, Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    /// Replace the field with particles sampled from `mask`.
    pub fn seed<R: Rng + ?Sized>(&mut self, mask: &OpacityMask, viewport: Viewport, rng: &mut R) {
        self.particles.clear();
        if viewport.is_empty() {
            return;
        }
        let stride = sample_stride(viewport);
        for y in (0..mask.height()).step_by(stride) {
            for x in (0..mask.width()).step_by(stride) {
                if mask.alpha(x, y) <= ALPHA_THRESHOLD {
                    continue;
                }
                let jitter = Vec2::new(rng.random_range(-1.0..=1.0), rng.random_range(-1.0..=1.0));
                let base = (Vec2::new(x as f32, y as f32) + jitter)
                    .clamp(Vec2::ZERO, Vec2::new(viewport.w(), viewport.h()));
                self.particles.push(Particle::new(base, rng));
            }
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn update(&mut self, pointer: &PointerState, elapsed_ms: u64) {
        for particle in &mut self.particles {
            particle.update(pointer, elapsed_ms);
        }
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, elapsed_ms: u64) {
        for particle in &self.particles {
            particle.draw(surface, elapsed_ms);
        }
    }

    pub fn connections(&self) -> Vec<(usize, usize)> {
        let points: Vec<Vec2> = self.particles.iter().map(Particle::rendered).collect();
        proximity_pairs(&points)
    }

    /// Stroke the proximity connectors; returns how many were drawn.
    pub fn draw_connections<S: Surface + ?Sized>(&self, surface: &mut S) -> usize {
        let color = WHITE.with_alpha(0.2);
        let pairs = self.connections();
        for &(i, j) in &pairs {
            surface.stroke_line(
                self.particles[i].rendered(),
                self.particles[j].rendered(),
                0.5,
                color,
            );
        }
        pairs.len()
    }

    /// Randomly drop faint lines from particles up to the main cable above
    /// them; returns how many were drawn.
    pub fn draw_cable_snaps<S: Surface + ?Sized, R: Rng + ?Sized>(
        &self,
        surface: &mut S,
        bridge: &BridgeGeometry,
        rng: &mut R,
    ) -> usize {
        let color = WHITE.with_alpha(0.15);
        let mut drawn = 0;
        for particle in &self.particles {
            if !rng.random_bool(SNAP_PROBABILITY) {
                continue;
            }
            let at = particle.rendered();
            let cable_y = bridge.cable_y(at.x);
            if at.y > cable_y {
                surface.stroke_line(at, Vec2::new(at.x, cable_y), 0.5, color);
                drawn += 1;
            }
        }
        drawn
    }
}

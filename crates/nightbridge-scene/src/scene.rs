//! Scene state and the per-frame draw sequence.

use glam::Vec2;
use nightbridge_core::{AnimationSpeed, SceneToggles, Viewport};
use nightbridge_glyphs::{BlockFont, FontMetrics, GlyphRasterizer};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use tracing::{debug, info};

use crate::color::NIGHT_SKY;
use crate::entities::{
    Building, Burst, Car, FireworkLauncher, Heart, Moon, ShootingStar, Star, init_hearts,
    init_shooting_stars, init_skyline, init_stars, init_traffic, moon_phase, show_origin,
};
use crate::geometry::{BridgeGeometry, WATER_LEVEL, WaterBand};
use crate::particles::{ParticleField, PointerState};
use crate::surface::{Layer, Surface};

/// User-adjustable scene settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneOptions {
    pub toggles: SceneToggles,
    /// Pointer repulsion radius in scene pixels.
    pub influence_radius: f32,
    pub car_count: usize,
    pub heart_count: usize,
    pub speed: AnimationSpeed,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            toggles: SceneToggles::default(),
            influence_radius: 100.0,
            car_count: 20,
            heart_count: 15,
            speed: AnimationSpeed::default(),
        }
    }
}

/// Counters describing one drawn frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub particles: usize,
    pub connections: usize,
    pub cable_snaps: usize,
    pub bursts: usize,
    pub sparks: usize,
}

/// Everything that animates, plus the randomness driving it.
#[derive(Debug)]
pub struct Scene {
    /// Current scene size in pixels.
    viewport: Viewport,
    /// Text spelled out by the particles.
    text: String,
    options: SceneOptions,
    pointer: PointerState,
    rasterizer: Box<dyn GlyphRasterizer>,
    metrics: FontMetrics,
    particles: ParticleField,
    buildings: Vec<Building>,
    cars: Vec<Car>,
    stars: Vec<Star>,
    shooting_stars: Vec<ShootingStar>,
    moon: Moon,
    hearts: Vec<Heart>,
    /// Live firework bursts, oldest first.
    bursts: Vec<Burst>,
    launcher: FireworkLauncher,
    water: WaterBand,
    rng: Pcg32,
    /// Timestamp of the last drawn frame, used to schedule shows.
    last_frame_ms: u64,
}

impl Scene {
    /// Create a scene and seed it for `viewport`.
    pub fn new(viewport: Viewport, text: impl Into<String>, options: SceneOptions, seed: u64) -> Self {
        Self::with_rasterizer(viewport, text, options, seed, Box::new(BlockFont))
    }

    /// Like [`Scene::new`] with a custom text rasterizer.
    pub fn with_rasterizer(
        viewport: Viewport,
        text: impl Into<String>,
        options: SceneOptions,
        seed: u64,
        rasterizer: Box<dyn GlyphRasterizer>,
    ) -> Self {
        let mut scene = Self {
            viewport,
            text: text.into(),
            options,
            pointer: PointerState {
                position: None,
                influence_radius: options.influence_radius,
            },
            rasterizer,
            metrics: FontMetrics::default(),
            particles: ParticleField::default(),
            buildings: Vec::new(),
            cars: Vec::new(),
            stars: Vec::new(),
            shooting_stars: Vec::new(),
            moon: Moon::for_viewport(viewport, 0.0),
            hearts: Vec::new(),
            bursts: Vec::new(),
            launcher: FireworkLauncher::default(),
            water: WaterBand::default(),
            rng: Pcg32::seed_from_u64(seed),
            last_frame_ms: 0,
        };
        scene.reseed();
        scene
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn options(&self) -> &SceneOptions {
        &self.options
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn shooting_stars(&self) -> &[ShootingStar] {
        &self.shooting_stars
    }

    pub fn hearts(&self) -> &[Heart] {
        &self.hearts
    }

    pub fn bursts(&self) -> &[Burst] {
        &self.bursts
    }

    /// Bursts scheduled but not launched yet.
    pub fn pending_launches(&self) -> usize {
        self.launcher.pending()
    }

    /// Resize the scene. Every entity is regenerated for the new size.
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        info!(
            width = viewport.width,
            height = viewport.height,
            "viewport resized"
        );
        self.viewport = viewport;
        self.reseed();
    }

    /// Replace the particle text and re-seed.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        info!(text = %self.text, "text changed");
        self.reseed();
    }

    /// Move the pointer, or hide it with `None`.
    pub fn set_pointer(&mut self, position: Option<Vec2>) {
        self.pointer.position = position;
    }

    pub fn clear_pointer(&mut self) {
        self.pointer.position = None;
    }

    pub fn toggles_mut(&mut self) -> &mut SceneToggles {
        &mut self.options.toggles
    }

    pub fn set_speed(&mut self, speed: AnimationSpeed) {
        self.options.speed = speed;
    }

    /// Launch a single burst at `at`.
    pub fn spawn_burst(&mut self, at: Vec2) {
        self.bursts.push(Burst::new(at, &mut self.rng));
    }

    /// Schedule `count` bursts at random points, one every `interval_ms`.
    pub fn launch_show(&mut self, count: usize, interval_ms: u64) {
        self.launcher.schedule(self.last_frame_ms, count, interval_ms);
        debug!(count, interval_ms, "firework show scheduled");
    }

    /// Regenerate every entity for the current viewport and text.
    fn reseed(&mut self) {
        let viewport = self.viewport;
        let rng = &mut self.rng;

        let mask = self.rasterizer.rasterize(&self.text, viewport, &self.metrics);
        self.particles.seed(&mask, viewport, rng);

        if viewport.is_empty() {
            self.buildings.clear();
            self.cars.clear();
            self.stars.clear();
            self.shooting_stars.clear();
            self.hearts.clear();
        } else {
            self.buildings = init_skyline(viewport, rng);
            self.cars = init_traffic(self.options.car_count, viewport, rng);
            self.stars = init_stars(viewport, rng);
            self.shooting_stars = init_shooting_stars(viewport, rng);
            self.hearts = init_hearts(self.options.heart_count, viewport, rng);
        }
        self.bursts.clear();
        self.launcher.clear();
        self.moon = Moon::for_viewport(viewport, moon_phase(chrono::Local::now().date_naive()));

        debug!(
            particles = self.particles.len(),
            buildings = self.buildings.len(),
            cars = self.cars.len(),
            stars = self.stars.len(),
            hearts = self.hearts.len(),
            "scene reseeded"
        );
    }

    /// Advance the animation to `elapsed_ms` and draw one frame.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S, elapsed_ms: u64) -> FrameStats {
        self.last_frame_ms = elapsed_ms;
        surface.clear(NIGHT_SKY);

        let viewport = self.viewport;
        if viewport.is_empty() {
            return FrameStats::default();
        }
        let toggles = self.options.toggles;
        let speed = self.options.speed.multiplier();
        let water_level = viewport.h() * WATER_LEVEL;
        self.pointer.influence_radius = self.options.influence_radius;

        if toggles.moon {
            surface.begin_layer(Layer::Moon);
            self.moon.draw(surface);
        }

        if toggles.stars {
            surface.begin_layer(Layer::Sky);
            for star in &mut self.stars {
                star.update();
                star.draw(surface);
            }
            for shooting in &mut self.shooting_stars {
                shooting.update(viewport, speed, &mut self.rng);
                shooting.draw(surface);
            }
        }

        surface.begin_layer(Layer::Water);
        self.water.advance(speed);
        self.water.draw(surface, viewport);

        surface.begin_layer(Layer::Buildings);
        for building in &mut self.buildings {
            building.flicker(&mut self.rng);
            building.draw(surface, water_level);
        }

        surface.begin_layer(Layer::Bridge);
        let bridge = BridgeGeometry::for_viewport(viewport);
        bridge.draw(surface);

        surface.begin_layer(Layer::Cars);
        for car in &mut self.cars {
            car.update(viewport, speed, &mut self.rng);
            car.draw(surface);
        }

        surface.begin_layer(Layer::Particles);
        self.particles.update(&self.pointer, elapsed_ms);
        self.particles.draw(surface, elapsed_ms);

        surface.begin_layer(Layer::Connections);
        let connections = self.particles.draw_connections(surface);

        surface.begin_layer(Layer::CableSnaps);
        let cable_snaps = self.particles.draw_cable_snaps(surface, &bridge, &mut self.rng);

        if toggles.hearts {
            surface.begin_layer(Layer::Hearts);
            for heart in &mut self.hearts {
                heart.update(viewport, elapsed_ms, speed, &mut self.rng);
                heart.draw(surface);
            }
        }

        surface.begin_layer(Layer::Fireworks);
        for _ in 0..self.launcher.take_due(elapsed_ms) {
            let origin = show_origin(viewport, &mut self.rng);
            self.bursts.push(Burst::new(origin, &mut self.rng));
        }
        for burst in &mut self.bursts {
            burst.update();
            burst.draw(surface);
        }
        self.bursts.retain(|burst| !burst.is_dead());

        FrameStats {
            particles: self.particles.len(),
            connections,
            cable_snaps,
            bursts: self.bursts.len(),
            sparks: self.bursts.iter().map(Burst::len).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, DrawList};

    fn scene(width: u32, height: u32, text: &str) -> Scene {
        Scene::new(Viewport::new(width, height), text, SceneOptions::default(), 42)
    }

    #[test]
    fn test_frame_layer_order() {
        let mut scene = scene(800, 600, "HI");
        let mut list = DrawList::new();
        scene.frame(&mut list, 16);

        assert!(matches!(list.commands()[0], DrawCommand::Clear(_)));
        assert_eq!(
            list.layers(),
            vec![
                Layer::Moon,
                Layer::Sky,
                Layer::Water,
                Layer::Buildings,
                Layer::Bridge,
                Layer::Cars,
                Layer::Particles,
                Layer::Connections,
                Layer::CableSnaps,
                Layer::Hearts,
                Layer::Fireworks,
            ]
        );
    }

    #[test]
    fn test_pointer_repels_then_particles_settle() {
        let mut scene = scene(800, 600, "I LOVE YOU");
        let bases: Vec<Vec2> = scene
            .particles()
            .particles()
            .iter()
            .map(|p| p.base_position)
            .collect();
        let pointer = bases.iter().copied().sum::<Vec2>() / bases.len() as f32;
        let near: Vec<usize> = (0..bases.len())
            .filter(|&i| (5.0..60.0).contains(&bases[i].distance(pointer)))
            .collect();
        assert!(!near.is_empty());

        scene.set_pointer(Some(pointer));
        assert_eq!(scene.pointer().position, Some(pointer));
        let mut list = DrawList::new();
        scene.frame(&mut list, 16);
        for &i in &near {
            let moved = scene.particles().particles()[i].position;
            assert!(moved.distance(pointer) > bases[i].distance(pointer));
        }
        for frame in 2..10 {
            list.reset();
            scene.frame(&mut list, frame * 16);
        }

        scene.clear_pointer();
        assert_eq!(scene.pointer().position, None);
        let offset = |scene: &Scene| -> f32 {
            scene
                .particles()
                .particles()
                .iter()
                .map(|p| p.position.distance(p.base_position))
                .sum()
        };
        let mut previous = offset(&scene);
        assert!(previous > 0.0);
        for frame in 10..250 {
            list.reset();
            scene.frame(&mut list, frame * 16);
            let current = offset(&scene);
            assert!(current <= previous);
            previous = current;
        }
        for particle in scene.particles().particles() {
            assert!(particle.position.distance(particle.base_position) < 1e-2);
        }
    }

    #[test]
    fn test_toggles_skip_layers() {
        let mut scene = scene(800, 600, "HI");
        scene.toggles_mut().toggle_moon();
        scene.toggles_mut().toggle_stars();
        scene.toggles_mut().toggle_hearts();

        let mut list = DrawList::new();
        scene.frame(&mut list, 16);
        let layers = list.layers();
        assert!(!layers.contains(&Layer::Moon));
        assert!(!layers.contains(&Layer::Sky));
        assert!(!layers.contains(&Layer::Hearts));
        assert_eq!(layers[0], Layer::Water);
    }

    #[test]
    fn test_empty_viewport_only_clears() {
        let mut scene = scene(0, 0, "HI");
        assert!(scene.particles().is_empty());
        let mut list = DrawList::new();
        let stats = scene.frame(&mut list, 16);
        assert_eq!(stats, FrameStats::default());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_resize_reseeds_for_new_viewport() {
        let mut scene = scene(800, 600, "AB");
        scene.spawn_burst(Vec2::new(100.0, 100.0));
        scene.launch_show(3, 100);

        scene.resize(Viewport::new(1200, 400));
        assert!(scene.bursts().is_empty());
        assert_eq!(scene.pending_launches(), 0);

        let buildings = scene.buildings();
        assert_eq!(buildings[0].x, 0.0);
        for pair in buildings.windows(2) {
            assert!(pair[1].x <= pair[0].right());
        }
        assert!(buildings.last().is_some_and(|b| b.right() >= 1200.0));
        for car in scene.cars() {
            assert_eq!(car.position.y, 400.0 * 0.6);
        }
        for particle in scene.particles().particles() {
            assert!(particle.base_position.x <= 1200.0);
            assert!(particle.base_position.y <= 400.0);
        }
    }

    #[test]
    fn test_resize_to_same_viewport_keeps_entities() {
        let mut scene = scene(800, 600, "AB");
        let buildings = scene.buildings().to_vec();
        scene.resize(Viewport::new(800, 600));
        assert_eq!(scene.buildings(), buildings.as_slice());
    }

    #[test]
    fn test_set_text_reseeds_particles() {
        let mut scene = scene(800, 600, "");
        assert!(scene.particles().is_empty());
        scene.set_text("AB");
        assert!(!scene.particles().is_empty());
        assert_eq!(scene.text(), "AB");
    }

    #[test]
    fn test_show_launches_scheduled_bursts() {
        let mut scene = scene(800, 600, "HI");
        let mut list = DrawList::new();
        scene.frame(&mut list, 1000);
        scene.launch_show(3, 400);

        list.reset();
        assert_eq!(scene.frame(&mut list, 1000).bursts, 1);
        list.reset();
        assert_eq!(scene.frame(&mut list, 1300).bursts, 1);
        list.reset();
        assert_eq!(scene.frame(&mut list, 1800).bursts, 3);
        assert_eq!(scene.pending_launches(), 0);
    }

    #[test]
    fn test_click_burst_burns_out() {
        let mut scene = scene(800, 600, "HI");
        scene.spawn_burst(Vec2::new(400.0, 200.0));
        let mut list = DrawList::new();
        let first = scene.frame(&mut list, 0);
        assert_eq!(first.bursts, 1);
        assert!(first.sparks >= 60);
        for frame in 1..60 {
            list.reset();
            scene.frame(&mut list, frame * 33);
        }
        assert!(scene.bursts().is_empty());
    }

    #[test]
    fn test_collections_do_not_grow() {
        let mut scene = scene(640, 480, "LOVE");
        let counts = (
            scene.cars().len(),
            scene.stars().len(),
            scene.shooting_stars().len(),
            scene.hearts().len(),
        );
        let mut list = DrawList::new();
        for frame in 0..300 {
            list.reset();
            scene.frame(&mut list, frame * 33);
        }
        assert_eq!(
            counts,
            (
                scene.cars().len(),
                scene.stars().len(),
                scene.shooting_stars().len(),
                scene.hearts().len(),
            )
        );
    }
}

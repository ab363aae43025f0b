//! Suspension bridge silhouette.
//!
//! Everything here is recomputed from the viewport on every frame; nothing is
//! cached between frames.

use glam::Vec2;
use nightbridge_core::Viewport;

use super::{DECK_LEVEL, WATER_LEVEL};
use crate::color::{CABLE, PORTAL, SILHOUETTE, SUSPENDER};
use crate::surface::{Rect, Surface};

/// Fraction of the height where the towers end.
const TOWER_TOP: f32 = 0.2;

/// How far below the deck the main cable's control point and the hanger
/// parabola's vertex sit.
const CABLE_SAG: f32 = 50.0;

/// Height above the deck where the side-span cables meet the viewport edges.
const SIDE_ANCHOR: f32 = 50.0;

/// Hanger and cable-snap profile: `y = a * (x - h)^2 + k`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CableCurve {
    pub a: f32,
    pub h: f32,
    pub k: f32,
}

impl CableCurve {
    pub fn y_at(&self, x: f32) -> f32 {
        let dx = x - self.h;
        self.a * dx * dx + self.k
    }
}

/// Bridge layout for one viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BridgeGeometry {
    pub width: f32,
    pub deck_y: f32,
    pub tower_top: f32,
    pub water_level: f32,
    pub tower_width: f32,
    pub tower_x1: f32,
    pub tower_x2: f32,
    pub deck_line_width: f32,
    pub cable_line_width: f32,
    pub suspender_step: f32,
    pub cable: CableCurve,
}

impl BridgeGeometry {
    pub fn for_viewport(viewport: Viewport) -> Self {
        let width = viewport.w();
        let height = viewport.h();
        let compact = viewport.is_compact();

        let (tower_width, tower_x1, tower_x2) = if compact {
            (width * 0.12, width * 0.1, width * 0.9)
        } else {
            (width * 0.08, width * 0.2, width * 0.8)
        };

        let deck_y = height * DECK_LEVEL;
        let tower_top = height * TOWER_TOP;
        let h = width / 2.0;
        let k = deck_y + CABLE_SAG;
        let span = (tower_x1 - h) * (tower_x1 - h);
        // A zero-width viewport puts the tower on the vertex; keep the curve flat.
        let a = if span > f32::EPSILON {
            (tower_top - k) / span
        } else {
            0.0
        };

        Self {
            width,
            deck_y,
            tower_top,
            water_level: height * WATER_LEVEL,
            tower_width,
            tower_x1,
            tower_x2,
            deck_line_width: if compact { 6.0 } else { 10.0 },
            cable_line_width: if compact { 2.0 } else { 3.0 },
            suspender_step: if compact { 12.0 } else { 8.0 },
            cable: CableCurve { a, h, k },
        }
    }

    /// Height of the hanger profile at `x`.
    pub fn cable_y(&self, x: f32) -> f32 {
        self.cable.y_at(x)
    }

    /// Vertical hangers from the deck up (or down) to the main cable.
    pub fn suspenders(&self) -> Vec<(Vec2, Vec2)> {
        let mut out = Vec::new();
        if self.suspender_step <= 0.0 {
            return out;
        }
        let mut x = self.tower_x1 + 10.0;
        while x < self.tower_x2 {
            out.push((Vec2::new(x, self.deck_y), Vec2::new(x, self.cable_y(x))));
            x += self.suspender_step;
        }
        out
    }

    /// Main span as a quadratic curve `(from, control, to)` between the tower
    /// tops. Its lowest point stays above the deck.
    pub fn main_cable(&self) -> (Vec2, Vec2, Vec2) {
        (
            Vec2::new(self.tower_x1, self.tower_top),
            Vec2::new(self.width / 2.0, self.deck_y + CABLE_SAG),
            Vec2::new(self.tower_x2, self.tower_top),
        )
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let tower_height = self.water_level - self.tower_top;
        for tower_x in [self.tower_x1, self.tower_x2] {
            surface.fill_rect(
                Rect::new(
                    tower_x - self.tower_width / 2.0,
                    self.tower_top,
                    self.tower_width,
                    tower_height,
                ),
                SILHOUETTE,
            );

            // Arched portal through the tower just above the deck.
            let portal_top = self.deck_y - 50.0;
            surface.fill_rect(
                Rect::new(
                    tower_x - self.tower_width / 4.0,
                    portal_top,
                    self.tower_width / 2.0,
                    40.0,
                ),
                PORTAL,
            );
            surface.fill_polygon(
                &arch_points(Vec2::new(tower_x, portal_top), self.tower_width / 4.0),
                PORTAL,
            );
        }

        surface.stroke_line(
            Vec2::new(0.0, self.deck_y),
            Vec2::new(self.width, self.deck_y),
            self.deck_line_width,
            SILHOUETTE,
        );

        let anchor_y = self.deck_y - SIDE_ANCHOR;
        surface.stroke_quadratic(
            Vec2::new(0.0, anchor_y),
            Vec2::new(self.tower_x1 / 2.0, self.deck_y - 20.0),
            Vec2::new(self.tower_x1, self.tower_top),
            self.cable_line_width,
            CABLE,
        );
        let (from, control, to) = self.main_cable();
        surface.stroke_quadratic(from, control, to, self.cable_line_width, CABLE);
        surface.stroke_quadratic(
            Vec2::new(self.tower_x2, self.tower_top),
            Vec2::new(self.width - (self.width - self.tower_x2) / 2.0, self.deck_y - 20.0),
            Vec2::new(self.width, anchor_y),
            self.cable_line_width,
            CABLE,
        );

        let hanger = SUSPENDER.with_alpha(0.6);
        for (deck, cable) in self.suspenders() {
            surface.stroke_line(deck, cable, 0.5, hanger);
        }
    }
}

/// Upper half-disc above `base`, as a polygon.
fn arch_points(base: Vec2, radius: f32) -> Vec<Vec2> {
    const SEGMENTS: usize = 12;
    (0..=SEGMENTS)
        .map(|i| {
            let angle = std::f32::consts::PI * (1.0 + i as f32 / SEGMENTS as f32);
            base + Vec2::new(angle.cos(), angle.sin()) * radius
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::quadratic_point;
    use crate::surface::{DrawCommand, DrawList};

    #[test]
    fn test_cable_passes_through_tower_tops() {
        let bridge = BridgeGeometry::for_viewport(Viewport::new(1000, 800));
        assert!((bridge.cable_y(bridge.tower_x1) - bridge.tower_top).abs() < 1e-3);
        assert!((bridge.cable_y(bridge.tower_x2) - bridge.tower_top).abs() < 1e-3);
        assert_eq!(bridge.cable_y(500.0), bridge.deck_y + 50.0);
    }

    #[test]
    fn test_main_cable_stays_above_deck() {
        let bridge = BridgeGeometry::for_viewport(Viewport::new(800, 600));
        assert!((bridge.deck_y - 360.0).abs() < 1e-3);
        let (from, control, to) = bridge.main_cable();
        assert_eq!(from, Vec2::new(bridge.tower_x1, bridge.tower_top));
        assert_eq!(to, Vec2::new(bridge.tower_x2, bridge.tower_top));

        let lowest = (0..=64)
            .map(|i| quadratic_point(from, control, to, i as f32 / 64.0).y)
            .fold(f32::MIN, f32::max);
        assert!((lowest - (bridge.tower_top + bridge.deck_y + 50.0) / 2.0).abs() < 1e-3);
        assert!(lowest < bridge.deck_y);
    }

    #[test]
    fn test_compact_layout() {
        let bridge = BridgeGeometry::for_viewport(Viewport::new(500, 800));
        assert!((bridge.tower_x1 - 50.0).abs() < 1e-3);
        assert!((bridge.tower_x2 - 450.0).abs() < 1e-3);
        assert_eq!(bridge.suspender_step, 12.0);
        assert_eq!(bridge.deck_line_width, 6.0);
    }

    #[test]
    fn test_suspenders_span_between_towers() {
        let bridge = BridgeGeometry::for_viewport(Viewport::new(1000, 800));
        let hangers = bridge.suspenders();
        assert!(!hangers.is_empty());
        assert_eq!(hangers[0].0.x, bridge.tower_x1 + 10.0);
        for (deck, cable) in &hangers {
            assert!(deck.x < bridge.tower_x2);
            assert_eq!(deck.y, bridge.deck_y);
            assert_eq!(cable.y, bridge.cable_y(cable.x));
        }
    }

    #[test]
    fn test_zero_viewport_is_finite() {
        let bridge = BridgeGeometry::for_viewport(Viewport::new(0, 0));
        assert!(bridge.cable_y(0.0).is_finite());
        assert!(bridge.suspenders().is_empty());
    }

    #[test]
    fn test_draw_emits_towers_deck_and_cables() {
        let bridge = BridgeGeometry::for_viewport(Viewport::new(1000, 800));
        let mut list = DrawList::new();
        bridge.draw(&mut list);

        let quadratics = list
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokeQuadratic { .. }))
            .count();
        assert_eq!(quadratics, 3);
        assert!(list.commands().iter().any(|c| matches!(
            c,
            DrawCommand::StrokeLine { width, .. } if *width == 10.0
        )));
    }
}

//! Terminal backend: draws the scene onto a ratatui braille canvas.

use glam::Vec2;
use nightbridge_core::{Rgba, Viewport};
use ratatui::{
    buffer::Buffer,
    layout::Rect as Area,
    style::Color,
    symbols::Marker,
    widgets::{
        Widget,
        canvas::{Canvas, Context, Line, Points},
    },
};

use crate::color::NIGHT_SKY;
use crate::surface::{DrawList, Rect, Surface};

/// Braille dots per terminal cell.
const DOTS_PER_CELL: Vec2 = Vec2::new(2.0, 4.0);

/// Scene pixels covered by one braille dot when `viewport` fills `area`.
pub fn dot_resolution(viewport: Viewport, area: Area) -> Vec2 {
    if area.width == 0 || area.height == 0 {
        return Vec2::ONE;
    }
    let dots = Vec2::new(f32::from(area.width), f32::from(area.height)) * DOTS_PER_CELL;
    (Vec2::new(viewport.w(), viewport.h()) / dots).max(Vec2::splat(f32::EPSILON))
}

/// [`Surface`] over a ratatui canvas context.
///
/// Canvas cells hold a single color, so translucent colors are blended over
/// the backdrop instead of over what was drawn before.
pub struct CanvasSurface<'a, 'b> {
    ctx: &'a mut Context<'b>,
    viewport: Viewport,
    resolution: Vec2,
    backdrop: Rgba,
}

impl<'a, 'b> CanvasSurface<'a, 'b> {
    pub fn new(ctx: &'a mut Context<'b>, viewport: Viewport, resolution: Vec2) -> Self {
        Self {
            ctx,
            viewport,
            resolution,
            backdrop: NIGHT_SKY,
        }
    }

    /// Canvas coordinates have y pointing up.
    fn project(&self, point: Vec2) -> (f64, f64) {
        (f64::from(point.x), f64::from(self.viewport.h() - point.y))
    }

    /// Terminal color for `color` with its alpha lifted to the square root,
    /// or `None` when fully transparent.
    fn ink(&self, color: Rgba) -> Option<Color> {
        if color.a.is_nan() || color.a <= 0.0 {
            return None;
        }
        let lifted = color.with_alpha(color.a.sqrt());
        Some(lifted.blend_over(self.backdrop).into())
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Color) {
        let (x1, y1) = self.project(from);
        let (x2, y2) = self.project(to);
        self.ctx.draw(&Line::new(x1, y1, x2, y2, color));
    }
}

impl Surface for CanvasSurface<'_, '_> {
    fn clear(&mut self, color: Rgba) {
        self.backdrop = color;
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        let Some(color) = self.ink(color) else {
            return;
        };
        let step = self.resolution.y;
        let rows = (rect.height / step).ceil().max(1.0) as usize;
        let pitch = rect.height / rows as f32;
        for i in 0..rows {
            let y = rect.y + (i as f32 + 0.5) * pitch;
            self.line(
                Vec2::new(rect.x, y),
                Vec2::new(rect.x + rect.width, y),
                color,
            );
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        let Some(color) = self.ink(color) else {
            return;
        };
        let normal = (to - from).normalize_or_zero().perp();
        let res = self.resolution.max_element();
        let strands = (width / res).round().max(1.0) as usize;
        for k in 0..strands {
            let offset = normal * (k as f32 - (strands - 1) as f32 / 2.0) * res;
            self.line(from + offset, to + offset, color);
        }
    }

    fn plot(&mut self, point: Vec2, color: Rgba) {
        let Some(color) = self.ink(color) else {
            return;
        };
        let coords = [self.project(point)];
        self.ctx.draw(&Points {
            coords: &coords,
            color,
        });
    }

    fn resolution(&self) -> Vec2 {
        self.resolution
    }
}

/// Widget painting a recorded frame.
pub struct SceneCanvas<'a> {
    frame: &'a DrawList,
    viewport: Viewport,
}

impl<'a> SceneCanvas<'a> {
    pub fn new(frame: &'a DrawList, viewport: Viewport) -> Self {
        Self { frame, viewport }
    }
}

impl Widget for SceneCanvas<'_> {
    fn render(self, area: Area, buf: &mut Buffer) {
        let viewport = self.viewport;
        let resolution = dot_resolution(viewport, area);
        let frame = self.frame;
        Canvas::default()
            .marker(Marker::Braille)
            .background_color(Color::from(NIGHT_SKY))
            .x_bounds([0.0, f64::from(viewport.w())])
            .y_bounds([0.0, f64::from(viewport.h())])
            .paint(move |ctx| {
                let mut surface = CanvasSurface::new(ctx, viewport, resolution);
                frame.replay(&mut surface);
            })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::WHITE;
    use crate::surface::Layer;

    #[test]
    fn test_dot_resolution() {
        let viewport = Viewport::from_cells(100, 30, 8, 16);
        let res = dot_resolution(viewport, Area::new(0, 0, 100, 30));
        assert_eq!(res, Vec2::new(4.0, 4.0));
        assert_eq!(dot_resolution(viewport, Area::new(0, 0, 0, 0)), Vec2::ONE);
    }

    #[test]
    fn test_scene_canvas_renders_ink() {
        let viewport = Viewport::from_cells(10, 5, 8, 16);
        let mut list = DrawList::new();
        list.clear(NIGHT_SKY);
        list.begin_layer(Layer::Particles);
        list.fill_rect(Rect::new(0.0, 0.0, 80.0, 80.0), WHITE);

        let area = Area::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(area);
        SceneCanvas::new(&list, viewport).render(area, &mut buf);

        let inked = buf
            .content()
            .iter()
            .filter(|cell| cell.symbol() != " ")
            .count();
        assert!(inked > 0);
    }

    #[test]
    fn test_transparent_draws_nothing() {
        let viewport = Viewport::from_cells(10, 5, 8, 16);
        let mut list = DrawList::new();
        list.fill_rect(Rect::new(0.0, 0.0, 80.0, 80.0), WHITE.with_alpha(0.0));
        list.stroke_line(Vec2::ZERO, Vec2::new(80.0, 80.0), 1.0, WHITE.with_alpha(0.0));

        let area = Area::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(area);
        SceneCanvas::new(&list, viewport).render(area, &mut buf);
        assert!(buf.content().iter().all(|cell| cell.symbol() == " "));
    }
}

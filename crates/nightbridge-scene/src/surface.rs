//! Immediate-mode drawing capability used by every scene element.
//!
//! A backend only has to provide rectangles, lines and points; curves,
//! circles, polygons and gradients have default implementations built on
//! those. [`DrawList`] records a frame so it can be replayed onto a backend
//! later (the ratatui canvas paints from an immutable closure).

use glam::Vec2;
use nightbridge_core::Rgba;

use crate::geometry::quadratic_point;

/// Axis-aligned rectangle in scene pixels, y pointing down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Stages of the frame, announced to the surface before they draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Moon,
    Sky,
    Water,
    Buildings,
    Bridge,
    Cars,
    Particles,
    Connections,
    CableSnaps,
    Hearts,
    Fireworks,
}

/// Number of segments used to flatten curves.
const CURVE_SEGMENTS: usize = 24;

/// 2D immediate-mode drawing surface.
pub trait Surface {
    /// Reset the whole surface to `color`.
    fn clear(&mut self, color: Rgba);

    fn fill_rect(&mut self, rect: Rect, color: Rgba);

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba);

    /// Set a single point.
    fn plot(&mut self, point: Vec2, color: Rgba);

    /// Smallest distinguishable step in scene pixels along each axis.
    fn resolution(&self) -> Vec2 {
        Vec2::ONE
    }

    /// Marks the start of a frame stage. Backends may ignore it.
    fn begin_layer(&mut self, _layer: Layer) {}

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        let res = self.resolution();
        if radius <= res.x.max(res.y) * 0.5 {
            self.plot(center, color);
            return;
        }
        let outline = circle_points(center, radius, CURVE_SEGMENTS);
        self.fill_polygon(&outline, color);
    }

    fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: Rgba) {
        for pair in points.windows(2) {
            self.stroke_line(pair[0], pair[1], width, color);
        }
    }

    fn stroke_quadratic(&mut self, from: Vec2, control: Vec2, to: Vec2, width: f32, color: Rgba) {
        let points: Vec<Vec2> = (0..=CURVE_SEGMENTS)
            .map(|i| quadratic_point(from, control, to, i as f32 / CURVE_SEGMENTS as f32))
            .collect();
        self.stroke_polyline(&points, width, color);
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Rgba) {
        let step = self.resolution().y;
        for (y, x0, x1) in scanline_spans(points, step) {
            self.fill_rect(Rect::new(x0, y, x1 - x0, step), color);
        }
    }

    /// Fill `rect` with a top-to-bottom gradient.
    fn fill_vertical_gradient(&mut self, rect: Rect, top: Rgba, bottom: Rgba) {
        let step = self.resolution().y.max(f32::EPSILON);
        let bands = (rect.height / step).ceil().max(1.0) as usize;
        let band_height = rect.height / bands as f32;
        for i in 0..bands {
            let t = (i as f32 + 0.5) / bands as f32;
            let band = Rect::new(
                rect.x,
                rect.y + i as f32 * band_height,
                rect.width,
                band_height,
            );
            self.fill_rect(band, top.lerp(bottom, t));
        }
    }
}

/// Points on a circle, first point not repeated.
pub fn circle_points(center: Vec2, radius: f32, segments: usize) -> Vec<Vec2> {
    (0..segments)
        .map(|i| {
            let angle = i as f32 / segments as f32 * std::f32::consts::TAU;
            center + Vec2::new(angle.cos(), angle.sin()) * radius
        })
        .collect()
}

/// Horizontal spans `(top, x_start, x_end)` covering a polygon, one per `step`
/// rows, using the even-odd rule.
pub fn scanline_spans(points: &[Vec2], step: f32) -> Vec<(f32, f32, f32)> {
    let mut spans = Vec::new();
    if points.len() < 3 || step.is_nan() || step <= 0.0 {
        return spans;
    }

    let min_y = points.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
    let max_y = points.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);
    if !min_y.is_finite() || !max_y.is_finite() {
        return spans;
    }

    let mut crossings = Vec::new();
    let mut top = min_y;
    while top < max_y {
        let y = top + step * 0.5;
        crossings.clear();
        for (i, &a) in points.iter().enumerate() {
            let b = points[(i + 1) % points.len()];
            if (a.y <= y && y < b.y) || (b.y <= y && y < a.y) {
                crossings.push(a.x + (y - a.y) / (b.y - a.y) * (b.x - a.x));
            }
        }
        crossings.sort_by(f32::total_cmp);
        for pair in crossings.chunks_exact(2) {
            spans.push((top, pair[0], pair[1]));
        }
        top += step;
    }
    spans
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Rgba),
    Layer(Layer),
    FillRect {
        rect: Rect,
        color: Rgba,
    },
    StrokeLine {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Rgba,
    },
    Plot {
        point: Vec2,
        color: Rgba,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Rgba,
    },
    StrokePolyline {
        points: Vec<Vec2>,
        width: f32,
        color: Rgba,
    },
    StrokeQuadratic {
        from: Vec2,
        control: Vec2,
        to: Vec2,
        width: f32,
        color: Rgba,
    },
    FillPolygon {
        points: Vec<Vec2>,
        color: Rgba,
    },
    FillVerticalGradient {
        rect: Rect,
        top: Rgba,
        bottom: Rgba,
    },
}

/// A surface that records calls instead of drawing them.
#[derive(Debug, Default, Clone)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop recorded commands, keeping the allocation for the next frame.
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Stage markers in the order they were recorded.
    pub fn layers(&self) -> Vec<Layer> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Layer(layer) => Some(*layer),
                _ => None,
            })
            .collect()
    }

    /// Commands recorded between the given layer marker and the next one.
    pub fn layer_commands(&self, layer: Layer) -> Vec<&DrawCommand> {
        let mut inside = false;
        let mut out = Vec::new();
        for command in &self.commands {
            match command {
                DrawCommand::Layer(l) => inside = *l == layer,
                other if inside => out.push(other),
                _ => {}
            }
        }
        out
    }

    /// Issue every recorded command against `surface`.
    pub fn replay<S: Surface + ?Sized>(&self, surface: &mut S) {
        for command in &self.commands {
            match command {
                DrawCommand::Clear(color) => surface.clear(*color),
                DrawCommand::Layer(layer) => surface.begin_layer(*layer),
                DrawCommand::FillRect { rect, color } => surface.fill_rect(*rect, *color),
                DrawCommand::StrokeLine {
                    from,
                    to,
                    width,
                    color,
                } => surface.stroke_line(*from, *to, *width, *color),
                DrawCommand::Plot { point, color } => surface.plot(*point, *color),
                DrawCommand::FillCircle {
                    center,
                    radius,
                    color,
                } => surface.fill_circle(*center, *radius, *color),
                DrawCommand::StrokePolyline {
                    points,
                    width,
                    color,
                } => surface.stroke_polyline(points, *width, *color),
                DrawCommand::StrokeQuadratic {
                    from,
                    control,
                    to,
                    width,
                    color,
                } => surface.stroke_quadratic(*from, *control, *to, *width, *color),
                DrawCommand::FillPolygon { points, color } => surface.fill_polygon(points, *color),
                DrawCommand::FillVerticalGradient { rect, top, bottom } => {
                    surface.fill_vertical_gradient(*rect, *top, *bottom)
                }
            }
        }
    }
}

impl Surface for DrawList {
    fn clear(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.commands.push(DrawCommand::StrokeLine {
            from,
            to,
            width,
            color,
        });
    }

    fn plot(&mut self, point: Vec2, color: Rgba) {
        self.commands.push(DrawCommand::Plot { point, color });
    }

    fn begin_layer(&mut self, layer: Layer) {
        self.commands.push(DrawCommand::Layer(layer));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: Rgba) {
        self.commands.push(DrawCommand::StrokePolyline {
            points: points.to_vec(),
            width,
            color,
        });
    }

    fn stroke_quadratic(&mut self, from: Vec2, control: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.commands.push(DrawCommand::StrokeQuadratic {
            from,
            control,
            to,
            width,
            color,
        });
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Rgba) {
        self.commands.push(DrawCommand::FillPolygon {
            points: points.to_vec(),
            color,
        });
    }

    fn fill_vertical_gradient(&mut self, rect: Rect, top: Rgba, bottom: Rgba) {
        self.commands
            .push(DrawCommand::FillVerticalGradient { rect, top, bottom });
    }
}

//! Text rasterization for the nightbridge particle text.
//!
//! A [`GlyphRasterizer`] turns a string into an [`OpacityMask`] the size of the
//! viewport. The particle field samples that mask to decide where particles
//! live. [`BlockFont`] is the built-in rasterizer; it scales a 5x7 bitmap font
//! so no font files are needed.

mod font;

use std::fmt;

use nightbridge_core::{COMPACT_BREAKPOINT, Viewport};

pub use font::{GLYPH_HEIGHT, GLYPH_WIDTH, GlyphBits, glyph_bits};

/// Placement rules for the rendered text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    /// Width below which the compact sizing rule applies.
    pub breakpoint: u32,
    /// Font size as a fraction of `min(width, height)` on wide viewports.
    pub wide_fraction: f32,
    /// Font size as a fraction of the width on compact viewports.
    pub compact_fraction: f32,
    /// Vertical position of the text middle as a fraction of the height.
    pub baseline_fraction: f32,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self {
            breakpoint: COMPACT_BREAKPOINT,
            wide_fraction: 0.15,
            compact_fraction: 0.2,
            baseline_fraction: 0.45,
        }
    }
}

impl FontMetrics {
    /// Font size in pixels for the given viewport.
    pub fn font_size(&self, viewport: Viewport) -> f32 {
        if viewport.width < self.breakpoint {
            viewport.w() * self.compact_fraction
        } else {
            viewport.w().min(viewport.h()) * self.wide_fraction
        }
    }
}

/// Per-pixel opacity, one byte per pixel, row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct OpacityMask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl fmt::Debug for OpacityMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpacityMask")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pixels", &self.data.len())
            .finish()
    }
}

impl OpacityMask {
    /// A fully transparent mask covering the viewport.
    pub fn blank(viewport: Viewport) -> Self {
        let len = if viewport.is_empty() {
            0
        } else {
            viewport.width as usize * viewport.height as usize
        };
        Self {
            width: viewport.width,
            height: viewport.height,
            data: vec![0; len],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Opacity at `(x, y)`; 0 outside the mask.
    pub fn alpha(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.data
            .get(y as usize * self.width as usize + x as usize)
            .copied()
            .unwrap_or(0)
    }

    fn set(&mut self, x: u32, y: u32, alpha: u8) {
        if x < self.width && y < self.height {
            let idx = y as usize * self.width as usize + x as usize;
            if let Some(px) = self.data.get_mut(idx) {
                *px = alpha;
            }
        }
    }

    /// True when no pixel has any opacity.
    pub fn is_blank(&self) -> bool {
        self.data.iter().all(|&a| a == 0)
    }

    /// Inclusive `(min_x, min_y, max_x, max_y)` of all non-zero pixels.
    pub fn bounding_box(&self) -> Option<(u32, u32, u32, u32)> {
        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for y in 0..self.height {
            for x in 0..self.width {
                if self.alpha(x, y) == 0 {
                    continue;
                }
                bounds = Some(match bounds {
                    None => (x, y, x, y),
                    Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                });
            }
        }
        bounds
    }
}

/// Renders text into an opacity mask the size of the viewport.
pub trait GlyphRasterizer: fmt::Debug {
    fn rasterize(&self, text: &str, viewport: Viewport, metrics: &FontMetrics) -> OpacityMask;
}

/// Rasterizer backed by the built-in 5x7 block font.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockFont;

impl BlockFont {
    /// Characters to lay out, with `<3` folded into a heart.
    fn layout_chars(text: &str) -> Vec<char> {
        text.trim().replace("<3", "♥").chars().collect()
    }
}

impl GlyphRasterizer for BlockFont {
    fn rasterize(&self, text: &str, viewport: Viewport, metrics: &FontMetrics) -> OpacityMask {
        let mut mask = OpacityMask::blank(viewport);
        let chars = Self::layout_chars(text);
        if viewport.is_empty() || chars.is_empty() {
            return mask;
        }

        // One font pixel; the glyph cell is as tall as the font size.
        let unit = metrics.font_size(viewport) / GLYPH_HEIGHT as f32;
        if !unit.is_finite() || unit <= 0.0 {
            return mask;
        }

        let glyphs: Vec<Option<GlyphBits>> = chars.iter().map(|&c| glyph_bits(c)).collect();
        let advance = GLYPH_WIDTH + 1;
        let text_width = (glyphs.len() * advance - 1) as f32 * unit;
        let text_height = GLYPH_HEIGHT as f32 * unit;
        let left = viewport.w() / 2.0 - text_width / 2.0;
        let top = viewport.h() * metrics.baseline_fraction - text_height / 2.0;

        let x_start = left.max(0.0).floor() as u32;
        let x_end = ((left + text_width).ceil().max(0.0) as u32).min(viewport.width);
        let y_start = top.max(0.0).floor() as u32;
        let y_end = ((top + text_height).ceil().max(0.0) as u32).min(viewport.height);

        for y in y_start..y_end {
            let local_y = y as f32 + 0.5 - top;
            if local_y < 0.0 {
                continue;
            }
            let row = (local_y / unit) as usize;
            if row >= GLYPH_HEIGHT {
                continue;
            }
            for x in x_start..x_end {
                let local_x = x as f32 + 0.5 - left;
                if local_x < 0.0 {
                    continue;
                }
                let column = (local_x / unit) as usize;
                let (index, col) = (column / advance, column % advance);
                if col >= GLYPH_WIDTH {
                    continue;
                }
                if let Some(Some(bits)) = glyphs.get(index)
                    && bits[row][col]
                {
                    mask.set(x, y, u8::MAX);
                }
            }
        }

        mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(text: &str, viewport: Viewport) -> OpacityMask {
        BlockFont.rasterize(text, viewport, &FontMetrics::default())
    }

    #[test]
    fn test_mask_matches_viewport() {
        let mask = render("AB", Viewport::new(800, 600));
        assert_eq!(mask.width(), 800);
        assert_eq!(mask.height(), 600);
        assert!(!mask.is_blank());
    }

    #[test]
    fn test_debug_reports_size() {
        let mask = OpacityMask::blank(Viewport::new(20, 10));
        let shown = format!("{mask:?}");
        assert!(shown.contains("width: 20"));
        assert!(shown.contains("pixels: 200"));
        assert!(!shown.contains("bounding_box"));
    }

    #[test]
    fn test_empty_inputs_give_blank_mask() {
        assert!(render("", Viewport::new(800, 600)).is_blank());
        assert!(render("   ", Viewport::new(800, 600)).is_blank());

        let zero = render("AB", Viewport::new(0, 600));
        assert!(zero.is_blank());
        assert_eq!(zero.alpha(0, 0), 0);
    }

    #[test]
    fn test_unknown_characters_are_blank() {
        assert!(render("~~~", Viewport::new(800, 600)).is_blank());
    }

    #[test]
    fn test_text_is_centered_at_45_percent_height() {
        let viewport = Viewport::new(800, 600);
        let (x0, y0, x1, y1) = render("HI", viewport).bounding_box().unwrap();

        let unit = FontMetrics::default().font_size(viewport) / GLYPH_HEIGHT as f32;
        let center_x = (x0 + x1) as f32 / 2.0;
        let center_y = (y0 + y1) as f32 / 2.0;
        assert!((center_x - 400.0).abs() <= unit, "center_x = {center_x}");
        assert!((center_y - 270.0).abs() <= unit, "center_y = {center_y}");
    }

    #[test]
    fn test_compact_font_uses_width() {
        let metrics = FontMetrics::default();
        assert_eq!(metrics.font_size(Viewport::new(500, 900)), 100.0);
        assert_eq!(metrics.font_size(Viewport::new(1000, 600)), 90.0);
    }

    #[test]
    fn test_case_and_heart_aliases() {
        let viewport = Viewport::new(640, 480);
        assert_eq!(render("love", viewport), render("LOVE", viewport));
        assert_eq!(render("<3", viewport), render("♥", viewport));
    }

    #[test]
    fn test_wide_text_is_clipped() {
        let viewport = Viewport::new(620, 400);
        let mask = render("WWWWWWWWWWWWWWWWWWWWWWWW", viewport);
        assert_eq!(mask.width(), 620);
        assert!(!mask.is_blank());
    }
}

//! Scene palette and color helpers.

use nightbridge_core::Rgba;

/// Backdrop the whole scene is composited over.
pub const NIGHT_SKY: Rgba = Rgba::hex(0x070b14);
pub const SILHOUETTE: Rgba = Rgba::hex(0x1a1a1a);
pub const CABLE: Rgba = Rgba::hex(0x2a2a2a);
pub const SUSPENDER: Rgba = Rgba::hex(0x282828);
pub const PORTAL: Rgba = Rgba::hex(0x2b1055);
pub const BUILDING: Rgba = Rgba::hex(0x121212);
pub const WINDOW: Rgba = Rgba::hex(0xfdf5e6);
pub const WATER_TOP: Rgba = Rgba::hex(0x0f1526);
pub const WATER_BOTTOM: Rgba = Rgba::hex(0x05070a);
pub const CAR_RIGHTWARD: Rgba = Rgba::hex(0xffeb3b);
pub const CAR_LEFTWARD: Rgba = Rgba::hex(0xff5252);
pub const MOON: Rgba = Rgba::hex(0xf6f1d5);
pub const HEART: Rgba = Rgba::hex(0xff4d6d);
pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);

/// Convert HSL to an opaque color. `h` in degrees, `s` and `l` in `[0, 1]`.
///
/// Any hue is accepted and wrapped into `[0, 360)`, so jittered firework hues
/// such as `-15` or `370` stay valid.
pub fn hsl_to_rgba(h: f32, s: f32, l: f32) -> Rgba {
    if s == 0.0 {
        let v = (l * 255.0) as u8;
        return Rgba::rgb(v, v, v);
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    let h = h.rem_euclid(360.0) / 360.0;

    let r = hue_to_rgb(p, q, h + 1.0 / 3.0);
    let g = hue_to_rgb(p, q, h);
    let b = hue_to_rgb(p, q, h - 1.0 / 3.0);

    Rgba::rgb((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_hues() {
        assert_eq!(hsl_to_rgba(0.0, 1.0, 0.5), Rgba::rgb(255, 0, 0));
        assert_eq!(hsl_to_rgba(120.0, 1.0, 0.5), Rgba::rgb(0, 255, 0));
        assert_eq!(hsl_to_rgba(240.0, 1.0, 0.5), Rgba::rgb(0, 0, 255));
        assert_eq!(hsl_to_rgba(-120.0, 1.0, 0.5), hsl_to_rgba(240.0, 1.0, 0.5));
    }

    #[test]
    fn test_hue_wraps_past_full_turn() {
        assert_eq!(hsl_to_rgba(370.0, 1.0, 0.6), hsl_to_rgba(10.0, 1.0, 0.6));
        assert_eq!(hsl_to_rgba(-15.0, 1.0, 0.6), hsl_to_rgba(345.0, 1.0, 0.6));
        assert_eq!(hsl_to_rgba(720.0, 1.0, 0.5), Rgba::rgb(255, 0, 0));
    }

    #[test]
    fn test_grayscale() {
        assert_eq!(hsl_to_rgba(42.0, 0.0, 1.0), Rgba::rgb(255, 255, 255));
    }
}

//! Built-in 5x7 block font.

/// Glyph cell width in font pixels.
pub const GLYPH_WIDTH: usize = 5;

/// Glyph cell height in font pixels.
pub const GLYPH_HEIGHT: usize = 7;

/// One glyph, a row of `GLYPH_WIDTH` characters per line where `█` is ink.
pub type Glyph = [&'static str; GLYPH_HEIGHT];

/// Ink bitmap of a glyph, indexed `[row][column]`.
pub type GlyphBits = [[bool; GLYPH_WIDTH]; GLYPH_HEIGHT];

/// `A`
const LETTER_A: Glyph = [
    " ███ ",
    "█   █",
    "█   █",
    "█████",
    "█   █",
    "█   █",
    "█   █",
];

/// `B`
const LETTER_B: Glyph = [
    "████ ",
    "█   █",
    "█   █",
    "████ ",
    "█   █",
    "█   █",
    "████ ",
];

/// `C`
const LETTER_C: Glyph = [
    " ███ ",
    "█   █",
    "█    ",
    "█    ",
    "█    ",
    "█   █",
    " ███ ",
];

/// `D`
const LETTER_D: Glyph = [
    "████ ",
    "█   █",
    "█   █",
    "█   █",
    "█   █",
    "█   █",
    "████ ",
];

/// `E`
const LETTER_E: Glyph = [
    "█████",
    "█    ",
    "█    ",
    "████ ",
    "█    ",
    "█    ",
    "█████",
];

/// `F`
const LETTER_F: Glyph = [
    "█████",
    "█    ",
    "█    ",
    "████ ",
    "█    ",
    "█    ",
    "█    ",
];

/// `G`
const LETTER_G: Glyph = [
    " ███ ",
    "█   █",
    "█    ",
    "█ ███",
    "█   █",
    "█   █",
    " ███ ",
];

/// `H`
const LETTER_H: Glyph = [
    "█   █",
    "█   █",
    "█   █",
    "█████",
    "█   █",
    "█   █",
    "█   █",
];

/// `I`
const LETTER_I: Glyph = [
    "█████",
    "  █  ",
    "  █  ",
    "  █  ",
    "  █  ",
    "  █  ",
    "█████",
];

/// `J`
const LETTER_J: Glyph = [
    "  ███",
    "   █ ",
    "   █ ",
    "   █ ",
    "█  █ ",
    "█  █ ",
    " ██  ",
];

/// `K`
const LETTER_K: Glyph = [
    "█   █",
    "█  █ ",
    "█ █  ",
    "██   ",
    "█ █  ",
    "█  █ ",
    "█   █",
];

/// `L`
const LETTER_L: Glyph = [
    "█    ",
    "█    ",
    "█    ",
    "█    ",
    "█    ",
    "█    ",
    "█████",
];

/// `M`
const LETTER_M: Glyph = [
    "█   █",
    "██ ██",
    "█ █ █",
    "█ █ █",
    "█   █",
    "█   █",
    "█   █",
];

/// `N`
const LETTER_N: Glyph = [
    "█   █",
    "██  █",
    "█ █ █",
    "█  ██",
    "█   █",
    "█   █",
    "█   █",
];

/// `O`
const LETTER_O: Glyph = [
    " ███ ",
    "█   █",
    "█   █",
    "█   █",
    "█   █",
    "█   █",
    " ███ ",
];

/// `P`
const LETTER_P: Glyph = [
    "████ ",
    "█   █",
    "█   █",
    "████ ",
    "█    ",
    "█    ",
    "█    ",
];

/// `Q`
const LETTER_Q: Glyph = [
    " ███ ",
    "█   █",
    "█   █",
    "█   █",
    "█ █ █",
    "█  █ ",
    " ██ █",
];

/// `R`
const LETTER_R: Glyph = [
    "████ ",
    "█   █",
    "█   █",
    "████ ",
    "█ █  ",
    "█  █ ",
    "█   █",
];

/// `S`
const LETTER_S: Glyph = [
    " ████",
    "█    ",
    "█    ",
    " ███ ",
    "    █",
    "    █",
    "████ ",
];

/// `T`
const LETTER_T: Glyph = [
    "█████",
    "  █  ",
    "  █  ",
    "  █  ",
    "  █  ",
    "  █  ",
    "  █  ",
];

/// `U`
const LETTER_U: Glyph = [
    "█   █",
    "█   █",
    "█   █",
    "█   █",
    "█   █",
    "█   █",
    " ███ ",
];

/// `V`
const LETTER_V: Glyph = [
    "█   █",
    "█   █",
    "█   █",
    "█   █",
    "█   █",
    " █ █ ",
    "  █  ",
];

/// `W`
const LETTER_W: Glyph = [
    "█   █",
    "█   █",
    "█   █",
    "█ █ █",
    "█ █ █",
    "█ █ █",
    " █ █ ",
];

/// `X`
const LETTER_X: Glyph = [
    "█   █",
    "█   █",
    " █ █ ",
    "  █  ",
    " █ █ ",
    "█   █",
    "█   █",
];

/// `Y`
const LETTER_Y: Glyph = [
    "█   █",
    "█   █",
    " █ █ ",
    "  █  ",
    "  █  ",
    "  █  ",
    "  █  ",
];

/// `Z`
const LETTER_Z: Glyph = [
    "█████",
    "    █",
    "   █ ",
    "  █  ",
    " █   ",
    "█    ",
    "█████",
];

/// `0`
const DIGIT_0: Glyph = [
    " ███ ",
    "█   █",
    "█  ██",
    "█ █ █",
    "██  █",
    "█   █",
    " ███ ",
];

/// `1`
const DIGIT_1: Glyph = [
    "  █  ",
    " ██  ",
    "  █  ",
    "  █  ",
    "  █  ",
    "  █  ",
    " ███ ",
];

/// `2`
const DIGIT_2: Glyph = [
    " ███ ",
    "█   █",
    "    █",
    "   █ ",
    "  █  ",
    " █   ",
    "█████",
];

/// `3`
const DIGIT_3: Glyph = [
    "████ ",
    "    █",
    "    █",
    " ███ ",
    "    █",
    "    █",
    "████ ",
];

/// `4`
const DIGIT_4: Glyph = [
    "   █ ",
    "  ██ ",
    " █ █ ",
    "█  █ ",
    "█████",
    "   █ ",
    "   █ ",
];

/// `5`
const DIGIT_5: Glyph = [
    "█████",
    "█    ",
    "████ ",
    "    █",
    "    █",
    "█   █",
    " ███ ",
];

/// `6`
const DIGIT_6: Glyph = [
    " ███ ",
    "█    ",
    "█    ",
    "████ ",
    "█   █",
    "█   █",
    " ███ ",
];

/// `7`
const DIGIT_7: Glyph = [
    "█████",
    "    █",
    "   █ ",
    "  █  ",
    " █   ",
    " █   ",
    " █   ",
];

/// `8`
const DIGIT_8: Glyph = [
    " ███ ",
    "█   █",
    "█   █",
    " ███ ",
    "█   █",
    "█   █",
    " ███ ",
];

/// `9`
const DIGIT_9: Glyph = [
    " ███ ",
    "█   █",
    "█   █",
    " ████",
    "    █",
    "    █",
    " ███ ",
];

/// `!`
const EXCLAMATION: Glyph = [
    "  █  ",
    "  █  ",
    "  █  ",
    "  █  ",
    "  █  ",
    "     ",
    "  █  ",
];

/// `?`
const QUESTION: Glyph = [
    " ███ ",
    "█   █",
    "    █",
    "   █ ",
    "  █  ",
    "     ",
    "  █  ",
];

/// `.`
const PERIOD: Glyph = [
    "     ",
    "     ",
    "     ",
    "     ",
    "     ",
    "     ",
    "  █  ",
];

/// `,`
const COMMA: Glyph = [
    "     ",
    "     ",
    "     ",
    "     ",
    "  █  ",
    "  █  ",
    " █   ",
];

/// `-`
const HYPHEN: Glyph = [
    "     ",
    "     ",
    "     ",
    "█████",
    "     ",
    "     ",
    "     ",
];

/// `:`
const COLON: Glyph = [
    "     ",
    "  █  ",
    "     ",
    "     ",
    "     ",
    "  █  ",
    "     ",
];

/// `'`
const APOSTROPHE: Glyph = [
    "  █  ",
    "  █  ",
    " █   ",
    "     ",
    "     ",
    "     ",
    "     ",
];

/// `&`
const AMPERSAND: Glyph = [
    " ██  ",
    "█  █ ",
    "█ █  ",
    " █   ",
    "█ █ █",
    "█  █ ",
    " ██ █",
];

/// `+`
const PLUS: Glyph = [
    "     ",
    "  █  ",
    "  █  ",
    "█████",
    "  █  ",
    "  █  ",
    "     ",
];

/// `♥`
const HEART: Glyph = [
    "     ",
    " █ █ ",
    "█████",
    "█████",
    " ███ ",
    "  █  ",
    "     ",
];

fn lookup(ch: char) -> Option<&'static Glyph> {
    let glyph = match ch {
        'A' => &LETTER_A,
        'B' => &LETTER_B,
        'C' => &LETTER_C,
        'D' => &LETTER_D,
        'E' => &LETTER_E,
        'F' => &LETTER_F,
        'G' => &LETTER_G,
        'H' => &LETTER_H,
        'I' => &LETTER_I,
        'J' => &LETTER_J,
        'K' => &LETTER_K,
        'L' => &LETTER_L,
        'M' => &LETTER_M,
        'N' => &LETTER_N,
        'O' => &LETTER_O,
        'P' => &LETTER_P,
        'Q' => &LETTER_Q,
        'R' => &LETTER_R,
        'S' => &LETTER_S,
        'T' => &LETTER_T,
        'U' => &LETTER_U,
        'V' => &LETTER_V,
        'W' => &LETTER_W,
        'X' => &LETTER_X,
        'Y' => &LETTER_Y,
        'Z' => &LETTER_Z,
        '0' => &DIGIT_0,
        '1' => &DIGIT_1,
        '2' => &DIGIT_2,
        '3' => &DIGIT_3,
        '4' => &DIGIT_4,
        '5' => &DIGIT_5,
        '6' => &DIGIT_6,
        '7' => &DIGIT_7,
        '8' => &DIGIT_8,
        '9' => &DIGIT_9,
        '!' => &EXCLAMATION,
        '?' => &QUESTION,
        '.' => &PERIOD,
        ',' => &COMMA,
        '-' => &HYPHEN,
        ':' => &COLON,
        '\'' => &APOSTROPHE,
        '&' => &AMPERSAND,
        '+' => &PLUS,
        '♥' => &HEART,
        _ => return None,
    };
    Some(glyph)
}

/// Decode the glyph for `ch` into an ink bitmap.
///
/// Lowercase letters share the uppercase glyphs. Returns `None` for characters
/// the font does not cover; callers render those as blank cells.
pub fn glyph_bits(ch: char) -> Option<GlyphBits> {
    let glyph = lookup(ch.to_ascii_uppercase())?;
    let mut bits = [[false; GLYPH_WIDTH]; GLYPH_HEIGHT];
    for (row, line) in glyph.iter().enumerate() {
        for (col, c) in line.chars().take(GLYPH_WIDTH).enumerate() {
            bits[row][col] = c == '█';
        }
    }
    Some(bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_covered_glyph_is_well_formed() {
        let covered = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!?.,-:'&+♥";
        for ch in covered.chars() {
            let glyph = lookup(ch).expect("glyph should exist");
            for line in glyph {
                assert_eq!(line.chars().count(), GLYPH_WIDTH, "bad row in {ch:?}");
            }
        }
    }

    #[test]
    fn test_lowercase_maps_to_uppercase() {
        assert_eq!(glyph_bits('q'), glyph_bits('Q'));
        assert!(glyph_bits('~').is_none());
    }

    #[test]
    fn test_letter_i_bits() {
        let bits = glyph_bits('I').unwrap();
        assert_eq!(bits[0], [true; GLYPH_WIDTH]);
        assert_eq!(bits[3], [false, false, true, false, false]);
    }
}

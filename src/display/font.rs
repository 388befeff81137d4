//! Fixed bitmap fonts.
//!
//! The 4x5 font covers the HUD character set; each glyph is five rows of
//! four bits (MSB = leftmost column). The 5x7 title font covers only the
//! handful of characters the start screen needs. Lookups for anything else
//! fall back to the blank glyph.

pub const FONT_HEIGHT: usize = 5;
/// Glyph width plus one column of spacing.
pub const FONT_ADVANCE: usize = 5;
/// Large glyph width plus spacing.
pub const LARGE_ADVANCE: usize = 6;

const BLANK: [u8; 5] = [0b0000; 5];

/// 4x5 glyph rows for `ch` (case-insensitive), blank if unknown.
pub fn glyph(ch: char) -> &'static [u8; 5] {
    match ch.to_ascii_uppercase() {
        'A' => &[0b0110, 0b1001, 0b1111, 0b1001, 0b1001],
        'B' => &[0b1110, 0b1001, 0b1110, 0b1001, 0b1110],
        'C' => &[0b0111, 0b1000, 0b1000, 0b1000, 0b0111],
        'D' => &[0b1110, 0b1001, 0b1001, 0b1001, 0b1110],
        'E' => &[0b1111, 0b1000, 0b1110, 0b1000, 0b1111],
        'F' => &[0b1111, 0b1000, 0b1110, 0b1000, 0b1000],
        'G' => &[0b0111, 0b1000, 0b1011, 0b1001, 0b0110],
        'H' => &[0b1001, 0b1001, 0b1111, 0b1001, 0b1001],
        'I' => &[0b1110, 0b0100, 0b0100, 0b0100, 0b1110],
        'K' => &[0b1001, 0b1010, 0b1100, 0b1010, 0b1001],
        'L' => &[0b1000, 0b1000, 0b1000, 0b1000, 0b1111],
        'M' => &[0b1001, 0b1111, 0b1111, 0b1001, 0b1001],
        'N' => &[0b1001, 0b1101, 0b1011, 0b1001, 0b1001],
        'O' => &[0b0110, 0b1001, 0b1001, 0b1001, 0b0110],
        'P' => &[0b1110, 0b1001, 0b1110, 0b1000, 0b1000],
        'R' => &[0b1110, 0b1001, 0b1110, 0b1010, 0b1001],
        'S' => &[0b0111, 0b1000, 0b0110, 0b0001, 0b1110],
        'T' => &[0b1111, 0b0100, 0b0100, 0b0100, 0b0100],
        'U' => &[0b1001, 0b1001, 0b1001, 0b1001, 0b0110],
        'V' => &[0b1001, 0b1001, 0b1001, 0b0110, 0b0100],
        'W' => &[0b1001, 0b1001, 0b1111, 0b1111, 0b1001],
        'X' => &[0b1001, 0b0110, 0b0110, 0b0110, 0b1001],
        'Y' => &[0b1001, 0b1001, 0b0110, 0b0100, 0b0100],
        'Z' => &[0b1111, 0b0001, 0b0110, 0b1000, 0b1111],
        '0' => &[0b0110, 0b1001, 0b1001, 0b1001, 0b0110],
        '1' => &[0b0100, 0b1100, 0b0100, 0b0100, 0b1110],
        '2' => &[0b0110, 0b1001, 0b0010, 0b0100, 0b1111],
        '3' => &[0b1110, 0b0001, 0b0110, 0b0001, 0b1110],
        '4' => &[0b1001, 0b1001, 0b1111, 0b0001, 0b0001],
        '5' => &[0b1111, 0b1000, 0b1110, 0b0001, 0b1110],
        '6' => &[0b0110, 0b1000, 0b1110, 0b1001, 0b0110],
        '7' => &[0b1111, 0b0001, 0b0010, 0b0100, 0b1000],
        '8' => &[0b0110, 0b1001, 0b0110, 0b1001, 0b0110],
        '9' => &[0b0110, 0b1001, 0b0111, 0b0001, 0b0110],
        '!' => &[0b0100, 0b0100, 0b0100, 0b0000, 0b0100],
        '?' => &[0b0110, 0b1001, 0b0010, 0b0000, 0b0100],
        ':' => &[0b0000, 0b0100, 0b0000, 0b0100, 0b0000],
        _ => &BLANK,
    }
}

const LARGE_BLANK: &[&str] = &["     "; 7];

/// 5x7 title glyph rows for `ch` (case-insensitive), blank if unknown.
pub fn large_glyph(ch: char) -> &'static [&'static str] {
    match ch.to_ascii_uppercase() {
        'A' => &[" XXX ", "X   X", "X   X", "XXXXX", "X   X", "X   X", "X   X"],
        'L' => &["X    ", "X    ", "X    ", "X    ", "X    ", "X    ", "XXXXX"],
        'P' => &["XXXX ", "X   X", "X   X", "XXXX ", "X    ", "X    ", "X    "],
        'Y' => &["X   X", "X   X", " X X ", "  X  ", "  X  ", "  X  ", "  X  "],
        '!' => &["  X  ", "  X  ", "  X  ", "  X  ", "  X  ", "     ", "  X  "],
        _ => LARGE_BLANK,
    }
}

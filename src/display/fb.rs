//! Bit-packed monochrome framebuffer.
//!
//! Packing is row-major with the most significant bit first within each
//! byte: pixel (x, y) lives at byte `y * bytes_per_row + x / 8`, mask
//! `0x80 >> (x % 8)`. This matches the panel's raw write format and both
//! sinks consume it unchanged.

use crate::display::font::{glyph, large_glyph, FONT_ADVANCE, FONT_HEIGHT, LARGE_ADVANCE};

/// Fixed-size 1bpp pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    bytes_per_row: usize,
    bits: Vec<u8>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let bytes_per_row = width.div_ceil(8);
        Self {
            width,
            height,
            bytes_per_row,
            bits: vec![0; bytes_per_row * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Packed bitmap, `bytes_per_row * height` bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bits
    }

    pub fn clear(&mut self) {
        self.bits.fill(0);
    }

    /// Flip every pixel. Tail bits past `width` in each row are ignored by
    /// readers, so whole-byte XOR is fine.
    pub fn invert(&mut self) {
        for b in &mut self.bits {
            *b ^= 0xff;
        }
    }

    /// Set or clear a pixel. Out-of-range coordinates are silent no-ops.
    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = y * self.bytes_per_row + x / 8;
        let mask = 0x80u8 >> (x % 8);
        if on {
            self.bits[idx] |= mask;
        } else {
            self.bits[idx] &= !mask;
        }
    }

    /// Read a pixel. Out-of-range coordinates read as unlit.
    pub fn get_pixel(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return false;
        }
        let idx = y * self.bytes_per_row + x / 8;
        let mask = 0x80u8 >> (x % 8);
        self.bits[idx] & mask != 0
    }

    /// Blit a sprite: one string per row, `'X'` marks a lit pixel.
    /// Rows may have different lengths; everything clips to bounds.
    pub fn draw_sprite(&mut self, rows: &[&str], x: i32, y: i32) {
        for (dy, row) in rows.iter().enumerate() {
            for (dx, ch) in row.bytes().enumerate() {
                if ch == b'X' {
                    self.set_pixel(x + dx as i32, y + dy as i32, true);
                }
            }
        }
    }

    /// Horizontal or vertical line between two points (inclusive).
    /// Diagonals are out of contract and draw nothing.
    pub fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        if y1 == y2 {
            for x in x1.min(x2)..=x1.max(x2) {
                self.set_pixel(x, y1, true);
            }
        } else if x1 == x2 {
            for y in y1.min(y2)..=y1.max(y2) {
                self.set_pixel(x1, y, true);
            }
        }
    }

    /// Draw text in the 4x5 font. Unknown characters render blank.
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str) {
        for (i, ch) in text.chars().enumerate() {
            let rows = glyph(ch);
            for (dy, bits) in rows.iter().enumerate() {
                for dx in 0..4 {
                    if bits & (1 << (3 - dx)) != 0 {
                        self.set_pixel(x + (i * FONT_ADVANCE) as i32 + dx as i32, y + dy as i32, true);
                    }
                }
            }
        }
    }

    pub fn draw_centered_text(&mut self, y: i32, text: &str) {
        let total = text.chars().count() * FONT_ADVANCE - 1;
        let x = (self.width.saturating_sub(total) / 2) as i32;
        self.draw_text(x, y, text);
    }

    /// Draw text in the 5x7 title font.
    pub fn draw_large_text(&mut self, x: i32, y: i32, text: &str) {
        for (i, ch) in text.chars().enumerate() {
            self.draw_sprite(large_glyph(ch), x + (i * LARGE_ADVANCE) as i32, y);
        }
    }

    pub fn draw_centered_large_text(&mut self, y: i32, text: &str) {
        let total = text.chars().count() * LARGE_ADVANCE - 1;
        let x = (self.width.saturating_sub(total) / 2) as i32;
        self.draw_large_text(x, y, text);
    }

    /// Text width helper used by right-aligned HUD elements.
    pub fn text_width(text: &str) -> usize {
        text.chars().count() * FONT_ADVANCE
    }
}

// FONT_HEIGHT is part of the text contract; re-check it against the table.
const _: () = assert!(FONT_HEIGHT == 5);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_round_trips_and_touches_one_bit() {
        let mut fb = FrameBuffer::new(128, 19);
        fb.set_pixel(37, 11, true);
        for y in 0..19 {
            for x in 0..128 {
                assert_eq!(fb.get_pixel(x, y), x == 37 && y == 11, "at ({x},{y})");
            }
        }
        fb.set_pixel(37, 11, false);
        assert!(!fb.get_pixel(37, 11));
    }

    #[test]
    fn clear_resets_every_pixel() {
        let mut fb = FrameBuffer::new(16, 4);
        for x in 0..16 {
            fb.set_pixel(x, 2, true);
        }
        fb.clear();
        for y in 0..4 {
            for x in 0..16 {
                assert!(!fb.get_pixel(x, y));
            }
        }
    }

    #[test]
    fn out_of_range_access_is_a_no_op() {
        let mut fb = FrameBuffer::new(8, 8);
        fb.set_pixel(-1, 0, true);
        fb.set_pixel(0, -3, true);
        fb.set_pixel(8, 0, true);
        fb.set_pixel(0, 8, true);
        assert!(fb.bytes().iter().all(|&b| b == 0));
        assert!(!fb.get_pixel(-1, -1));
        assert!(!fb.get_pixel(100, 100));
    }

    #[test]
    fn packing_is_row_major_msb_first() {
        let mut fb = FrameBuffer::new(128, 19);
        fb.set_pixel(0, 0, true);
        assert_eq!(fb.bytes()[0], 0x80);
        fb.set_pixel(7, 0, true);
        assert_eq!(fb.bytes()[0], 0x81);
        fb.set_pixel(8, 1, true);
        // Row 1 starts at byte 16 for a 128-wide panel.
        assert_eq!(fb.bytes()[16 + 1], 0x80);
    }

    #[test]
    fn odd_width_rounds_bytes_per_row_up() {
        let mut fb = FrameBuffer::new(10, 2);
        assert_eq!(fb.bytes().len(), 2 * 2);
        fb.set_pixel(9, 1, true);
        assert!(fb.get_pixel(9, 1));
        assert!(!fb.get_pixel(10, 1));
    }

    #[test]
    fn sprite_clips_at_edges() {
        let mut fb = FrameBuffer::new(8, 4);
        fb.draw_sprite(&["XX", "XX"], 7, 3);
        assert!(fb.get_pixel(7, 3));
        // The rest clipped silently.
        let lit: usize = (0..4)
            .flat_map(|y| (0..8).map(move |x| (x, y)))
            .filter(|&(x, y)| fb.get_pixel(x, y))
            .count();
        assert_eq!(lit, 1);
    }

    #[test]
    fn line_draws_only_axis_aligned() {
        let mut fb = FrameBuffer::new(16, 16);
        fb.draw_line(2, 5, 9, 5);
        for x in 2..=9 {
            assert!(fb.get_pixel(x, 5));
        }
        fb.draw_line(3, 1, 3, 4);
        for y in 1..=4 {
            assert!(fb.get_pixel(3, y));
        }
        let before = fb.bytes().to_vec();
        fb.draw_line(0, 0, 5, 7); // diagonal: no-op
        assert_eq!(fb.bytes(), &before[..]);
    }

    #[test]
    fn invert_flips_pixels() {
        let mut fb = FrameBuffer::new(16, 2);
        fb.set_pixel(4, 1, true);
        fb.invert();
        assert!(!fb.get_pixel(4, 1));
        assert!(fb.get_pixel(0, 0));
    }

    #[test]
    fn unknown_glyph_renders_blank() {
        let mut fb = FrameBuffer::new(32, 8);
        fb.draw_text(0, 0, "~");
        assert!(fb.bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn text_renders_something_for_known_glyphs() {
        let mut fb = FrameBuffer::new(64, 8);
        fb.draw_text(0, 0, "GO");
        assert!(fb.bytes().iter().any(|&b| b != 0));
    }
}

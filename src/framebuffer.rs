//! In-memory frame buffer and rasterization
//!
//! The buffer mirrors the controller's page organised RAM: byte
//! `x + width * (y / 8)` holds the column of 8 pixels starting at row
//! `8 * (y / 8)`, least significant bit on top.
//!
//! The allocation carries one extra byte in front of the pixels. Two-wire
//! transports need a control byte ahead of the pixel stream; reserving it here
//! lets the whole frame go out as one bus write without copying.
use alloc::vec::Vec;

use crate::config::Dimensions;
use crate::error::Error;
use crate::font::FONT_8X5;

/// Offset of the first pixel byte inside the allocation.
const PAYLOAD_OFFSET: usize = 1;

/// Size of the font header preceding the glyph table.
const FONT_HEADER_LEN: usize = 5;

/// 1 bit per pixel, page organised frame buffer.
#[derive(Clone, Debug)]
pub struct FrameBuffer {
    allocation: Vec<u8>,
    width: u32,
    height: u32,
}

impl FrameBuffer {
    /// Allocate a cleared buffer for the given geometry
    pub fn new(dimensions: Dimensions) -> Result<Self, Error> {
        let len = dimensions.buffer_len() + PAYLOAD_OFFSET;
        let mut allocation = Vec::new();
        allocation
            .try_reserve_exact(len)
            .map_err(|_| Error::OutOfMemory)?;
        allocation.resize(len, 0);

        Ok(Self {
            allocation,
            width: u32::from(dimensions.width()),
            height: u32::from(dimensions.height()),
        })
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of 8 pixel tall pages
    pub fn pages(&self) -> u32 {
        self.height / 8
    }

    /// Pixel bytes, `pages * width` long
    pub fn pixels(&self) -> &[u8] {
        &self.allocation[PAYLOAD_OFFSET..]
    }

    /// Mutable pixel bytes
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.allocation[PAYLOAD_OFFSET..]
    }

    /// Byte reserved in front of the pixels
    pub fn marker(&self) -> u8 {
        self.allocation[0]
    }

    /// Store the transport's mode byte in front of the pixels
    pub(crate) fn set_marker(&mut self, marker: u8) {
        self.allocation[0] = marker;
    }

    /// Marker byte followed by all pixel bytes, as sent by two-wire transports
    pub fn transfer_bytes(&self) -> &[u8] {
        &self.allocation
    }

    /// Zero every pixel
    pub fn clear(&mut self) {
        self.pixels_mut().fill(0);
    }

    fn index(&self, x: u32, y: u32) -> Option<(usize, u8)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        // y >> 3 == y / 8 and y & 7 == y % 8
        let index = (x + self.width * (y >> 3)) as usize;
        Some((index, 1 << (y & 0x07)))
    }

    fn last_column(&self) -> i32 {
        self.width as i32 - 1
    }

    fn last_row(&self) -> i32 {
        self.height as i32 - 1
    }

    /// Whether the pixel at (x, y) is set. Out-of-range pixels read as unset.
    pub fn get_pixel(&self, x: u32, y: u32) -> bool {
        self.index(x, y)
            .is_some_and(|(index, bit)| self.pixels()[index] & bit != 0)
    }

    /// Set the pixel at (x, y). Out-of-range coordinates are ignored.
    pub fn draw_pixel(&mut self, x: u32, y: u32) {
        if let Some((index, bit)) = self.index(x, y) {
            self.pixels_mut()[index] |= bit;
        }
    }

    /// Set or clear the pixel at (x, y). Out-of-range coordinates are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, on: bool) {
        if let Some((index, bit)) = self.index(x, y) {
            let pixels = self.pixels_mut();
            if on {
                pixels[index] |= bit;
            } else {
                pixels[index] &= !bit;
            }
        }
    }

    /// Draw a line between two points, both inclusive.
    ///
    /// One pixel is set per column; steep lines therefore come out dotted.
    /// Columns left of the panel and rows above it are skipped.
    pub fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        let (x1, y1, x2, y2) = if x1 > x2 {
            (x2, y2, x1, y1)
        } else {
            (x1, y1, x2, y2)
        };

        if x1 == x2 {
            let (top, bottom) = if y1 > y2 { (y2, y1) } else { (y1, y2) };
            if x1 < 0 {
                return;
            }
            for y in top.max(0)..=bottom.min(self.last_row()) {
                self.draw_pixel(x1 as u32, y as u32);
            }
            return;
        }

        let m = (i64::from(y2) - i64::from(y1)) as f32 / (i64::from(x2) - i64::from(x1)) as f32;

        // columns past either edge can never land on the panel
        for x in x1.max(0)..=x2.min(self.last_column()) {
            let y = m * (i64::from(x) - i64::from(x1)) as f32 + y1 as f32;
            // truncation toward zero keeps (-1, 0) on row 0
            if y <= -1.0 {
                continue;
            }
            self.draw_pixel(x as u32, y as u32);
        }
    }

    /// Fill the `width` x `height` rectangle whose top left corner is (x, y)
    pub fn draw_square(&mut self, x: u32, y: u32, width: u32, height: u32) {
        // pixels past the panel edge would be dropped anyway
        let width = width.min(self.width.saturating_sub(x));
        let height = height.min(self.height.saturating_sub(y));
        for i in 0..width {
            for j in 0..height {
                self.draw_pixel(x.saturating_add(i), y.saturating_add(j));
            }
        }
    }

    /// Outline the box spanning (x, y) to (x + width, y + height), both inclusive
    pub fn draw_empty_square(&mut self, x: u32, y: u32, width: u32, height: u32) {
        let left = clamp_coord(x);
        let top = clamp_coord(y);
        let right = clamp_coord(x.saturating_add(width));
        let bottom = clamp_coord(y.saturating_add(height));

        self.draw_line(left, top, right, top);
        self.draw_line(left, bottom, right, bottom);
        self.draw_line(left, top, left, bottom);
        self.draw_line(right, top, right, bottom);
    }

    /// Draw a single character using a font blob.
    ///
    /// The blob starts with a five byte header: glyph height, glyph width,
    /// spacing between characters and the first and last encoded ASCII code.
    /// Each glyph is stored column by column, every column taking
    /// `ceil(height / 8)` bytes with the top pixel in the least significant
    /// bit. Every set bit becomes a `scale` x `scale` square.
    ///
    /// Non-ASCII characters and characters outside the font's range are
    /// skipped.
    pub fn draw_char_with_font(&mut self, x: u32, y: u32, scale: u32, font: &[u8], c: char) {
        let Some(&[glyph_height, glyph_width, _, first, last]) = font.get(..FONT_HEADER_LEN)
        else {
            return;
        };
        if !c.is_ascii() {
            return;
        }
        let code = c as u8;
        if code < first || code > last {
            return;
        }

        let parts_per_line = usize::from(glyph_height).div_ceil(8);
        let glyph_start = usize::from(code - first) * usize::from(glyph_width) * parts_per_line;

        for column in 0..u32::from(glyph_width) {
            let offset = glyph_start + column as usize * parts_per_line + FONT_HEADER_LEN;
            for part in 0..parts_per_line {
                let Some(&bits) = font.get(offset + part) else {
                    return;
                };
                for bit in 0..8u32 {
                    if bits & (1 << bit) == 0 {
                        continue;
                    }
                    let row = ((part as u32) << 3) + bit;
                    self.draw_square(
                        x.saturating_add(column.saturating_mul(scale)),
                        y.saturating_add(row.saturating_mul(scale)),
                        scale,
                        scale,
                    );
                }
            }
        }
    }

    /// Draw a string using a font blob, stopping at the end of `s` or at the
    /// first NUL character
    pub fn draw_string_with_font(&mut self, x: u32, y: u32, scale: u32, font: &[u8], s: &str) {
        let Some(&[_, glyph_width, spacing, _, _]) = font.get(..FONT_HEADER_LEN) else {
            return;
        };
        let advance = (u32::from(glyph_width) + u32::from(spacing)).saturating_mul(scale);

        let mut x_n = x;
        for c in s.chars().take_while(|&c| c != '\0') {
            self.draw_char_with_font(x_n, y, scale, font, c);
            x_n = x_n.saturating_add(advance);
        }
    }

    /// Draw a character with the built-in 8x5 font
    pub fn draw_char(&mut self, x: u32, y: u32, scale: u32, c: char) {
        self.draw_char_with_font(x, y, scale, &FONT_8X5, c);
    }

    /// Draw a string with the built-in 8x5 font
    pub fn draw_string(&mut self, x: u32, y: u32, scale: u32, s: &str) {
        self.draw_string_with_font(x, y, scale, &FONT_8X5, s);
    }
}

fn clamp_coord(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> FrameBuffer {
        FrameBuffer::new(Dimensions::W128_H64).unwrap()
    }

    fn set_pixels(frame: &FrameBuffer) -> alloc::vec::Vec<(u32, u32)> {
        let mut set = alloc::vec::Vec::new();
        for y in 0..frame.height() {
            for x in 0..frame.width() {
                if frame.get_pixel(x, y) {
                    set.push((x, y));
                }
            }
        }
        set
    }

    #[test]
    fn allocation_reserves_marker_byte() {
        let frame = frame();
        assert_eq!(frame.pages(), 8);
        assert_eq!(frame.pixels().len(), 1024);
        assert_eq!(frame.transfer_bytes().len(), 1025);
        assert!(frame.transfer_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn draw_pixel_sets_page_bit() {
        let mut frame = frame();
        frame.draw_pixel(3, 13);

        let index = 3 + 128 * (13 / 8);
        for (i, &byte) in frame.pixels().iter().enumerate() {
            if i == index {
                assert_eq!(byte, 1 << (13 % 8));
            } else {
                assert_eq!(byte, 0);
            }
        }
        assert_eq!(frame.marker(), 0);
    }

    #[test]
    fn draw_pixel_sets_last_byte_in_buffer() {
        let mut frame = frame();
        frame.draw_pixel(127, 63);
        assert_eq!(frame.pixels()[1023], 0x80);
    }

    #[test]
    fn draw_pixel_ignores_out_of_range() {
        let mut frame = frame();
        frame.draw_pixel(128, 0);
        frame.draw_pixel(0, 64);
        frame.draw_pixel(u32::MAX, u32::MAX);
        assert!(frame.transfer_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn set_pixel_can_erase() {
        let mut frame = frame();
        frame.draw_pixel(5, 5);
        frame.set_pixel(5, 5, false);
        assert!(!frame.get_pixel(5, 5));
        frame.set_pixel(6, 6, true);
        assert!(frame.get_pixel(6, 6));
    }

    #[test]
    fn clear_zeroes_pixels_and_is_idempotent() {
        let mut frame = frame();
        frame.draw_square(0, 0, 128, 64);
        assert!(frame.pixels().iter().all(|&b| b == 0xFF));

        frame.clear();
        assert!(frame.pixels().iter().all(|&b| b == 0));
        frame.clear();
        assert!(frame.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn horizontal_line() {
        let mut frame = frame();
        frame.draw_line(0, 0, 10, 0);
        let expected: alloc::vec::Vec<(u32, u32)> = (0..=10).map(|x| (x, 0)).collect();
        assert_eq!(set_pixels(&frame), expected);
    }

    #[test]
    fn vertical_line_in_either_direction() {
        let mut frame = frame();
        frame.draw_line(5, 10, 5, 0);
        let expected: alloc::vec::Vec<(u32, u32)> = (0..=10).map(|y| (5, y)).collect();
        assert_eq!(set_pixels(&frame), expected);
    }

    #[test]
    fn line_endpoints_are_swapped_by_x() {
        let mut a = frame();
        let mut b = frame();
        a.draw_line(0, 0, 20, 10);
        b.draw_line(20, 10, 0, 0);
        assert_eq!(a.pixels(), b.pixels());
        assert!(a.get_pixel(0, 0));
        assert!(a.get_pixel(10, 5));
        assert!(a.get_pixel(20, 10));
    }

    #[test]
    fn line_one_pixel_per_column() {
        let mut frame = frame();
        frame.draw_line(0, 0, 2, 10);
        assert_eq!(set_pixels(&frame), [(0, 0), (1, 5), (2, 10)]);
    }

    #[test]
    fn line_skips_negative_coordinates() {
        let mut frame = frame();
        frame.draw_line(-5, -5, 5, 5);
        assert_eq!(
            set_pixels(&frame),
            [(0, 0), (1, 1), (2, 2), (3, 3), (4, 4), (5, 5)]
        );

        let mut frame = self::frame();
        frame.draw_line(-3, 2, -3, 8);
        assert!(frame.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn filled_square() {
        let mut frame = frame();
        frame.draw_square(0, 0, 10, 10);
        let pixels = set_pixels(&frame);
        assert_eq!(pixels.len(), 100);
        assert!(pixels.iter().all(|&(x, y)| x < 10 && y < 10));
    }

    #[test]
    fn empty_square_draws_perimeter() {
        let mut frame = frame();
        frame.draw_empty_square(0, 0, 10, 10);
        for y in 0..64 {
            for x in 0..128 {
                let on_edge = (x <= 10 && y <= 10) && (x == 0 || x == 10 || y == 0 || y == 10);
                assert_eq!(frame.get_pixel(x, y), on_edge, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn oversized_empty_square_is_clipped() {
        let mut frame = frame();
        frame.draw_empty_square(120, 60, u32::MAX, u32::MAX);
        let pixels = set_pixels(&frame);
        // only the top and left edges fall on the panel
        assert_eq!(pixels.len(), 8 + 4 - 1);
        assert!(frame.get_pixel(127, 60));
        assert!(frame.get_pixel(120, 63));
    }

    #[test]
    fn char_outside_font_range_is_skipped() {
        let mut frame = frame();
        frame.draw_char(0, 0, 1, '\u{7f}');
        frame.draw_char(0, 0, 1, '\n');
        frame.draw_char(0, 0, 1, 'é');
        assert!(frame.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn char_reproduces_glyph_columns() {
        let mut frame = frame();
        frame.draw_char(0, 0, 1, 'A');
        let glyph_start = FONT_HEADER_LEN + usize::from(b'A' - FONT_8X5[3]) * 5;
        assert_eq!(&frame.pixels()[..5], &FONT_8X5[glyph_start..glyph_start + 5]);
        assert!(frame.pixels()[5..].iter().all(|&b| b == 0));
    }

    #[test]
    fn oversized_square_is_clipped() {
        let mut frame = frame();
        frame.draw_square(120, 60, u32::MAX, u32::MAX);
        let pixels = set_pixels(&frame);
        assert_eq!(pixels.len(), 8 * 4);
        assert!(pixels.iter().all(|&(x, y)| x >= 120 && y >= 60));

        // one set pixel at the glyph origin, scaled to cover the panel
        let font = [8, 1, 0, b'!', b'!', 0b0000_0001];
        frame.clear();
        frame.draw_char_with_font(0, 0, u32::MAX, &font, '!');
        assert!(frame.pixels().iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn non_ascii_chars_are_skipped_even_inside_font_range() {
        // single column glyphs for 0xE0..=0xFF, every pixel set
        let mut font = alloc::vec![8, 1, 0, 0xE0, 0xFF];
        font.resize(5 + 32, 0xFF);
        let mut frame = frame();
        frame.draw_char_with_font(0, 0, 1, &font, '\u{e9}');
        frame.draw_string_with_font(0, 8, 1, &font, "\u{e0}\u{ff}");
        assert!(frame.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn char_is_scaled() {
        // 8 rows, 2 columns, no spacing, only '!' encoded
        let font = [8, 2, 0, b'!', b'!', 0b0000_0001, 0b0000_0010];
        let mut frame = frame();
        frame.draw_char_with_font(10, 10, 3, &font, '!');

        let mut expected = alloc::vec::Vec::new();
        for y in 10..13 {
            for x in 10..13 {
                expected.push((x, y));
            }
        }
        for y in 13..16 {
            for x in 13..16 {
                expected.push((x, y));
            }
        }
        expected.sort_by_key(|&(x, y)| (y, x));
        assert_eq!(set_pixels(&frame), expected);
    }

    #[test]
    fn tall_glyphs_use_multiple_parts_per_column() {
        // 10 rows -> 2 bytes per column, one column, chars 'a'..='b'
        let font = [10, 1, 0, b'a', b'b', 0x00, 0x00, 0x01, 0x02];
        let mut frame = frame();
        frame.draw_char_with_font(0, 0, 1, &font, 'b');
        assert_eq!(set_pixels(&frame), [(0, 0), (0, 9)]);
    }

    #[test]
    fn truncated_font_does_not_panic() {
        let mut frame = frame();
        frame.draw_char_with_font(0, 0, 1, &[8, 5, 1, 32], 'A');
        frame.draw_char_with_font(0, 0, 1, &[8, 5, 1, 32, 126, 0xFF], 'A');
        assert!(frame.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn string_advances_by_width_and_spacing() {
        let mut frame = frame();
        frame.draw_string(0, 0, 2, "AA");

        let mut single = self::frame();
        single.draw_char(12, 0, 2, 'A');
        single.draw_char(0, 0, 2, 'A');
        assert_eq!(frame.pixels(), single.pixels());
    }

    #[test]
    fn string_stops_at_nul() {
        let mut a = frame();
        let mut b = frame();
        a.draw_string(0, 0, 1, "Hi\0there");
        b.draw_string(0, 0, 1, "Hi");
        assert_eq!(a.pixels(), b.pixels());
    }
}

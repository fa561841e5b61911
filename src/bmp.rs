//! Monochrome BMP import
//!
//! Only uncompressed 1 bit per pixel images are understood. Anything else is
//! ignored without touching the frame buffer.
use log::debug;

use crate::framebuffer::FrameBuffer;

/// File header (14 bytes) plus the smallest info header (40 bytes).
const MIN_HEADER_LEN: usize = 54;
/// The file header preceding the info header.
const FILE_HEADER_LEN: usize = 14;
/// Bytes per color table entry: blue, green, red, reserved.
const PALETTE_ENTRY_LEN: usize = 4;

/// Header fields consumed by the importer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct BmpHeader {
    /// Start of pixel data inside the file
    data_offset: usize,
    /// Size of the info header
    header_size: usize,
    width: i32,
    /// Positive for bottom-up row order, negative for top-down
    height: i32,
    bit_count: u16,
    compression: u32,
}

impl BmpHeader {
    fn parse(data: &[u8]) -> Option<Self> {
        if data.len() < MIN_HEADER_LEN {
            return None;
        }
        Some(Self {
            data_offset: read_u32(data, 10)? as usize,
            header_size: read_u32(data, 14)? as usize,
            width: read_u32(data, 18)? as i32,
            height: read_u32(data, 22)? as i32,
            bit_count: read_u16(data, 28)?,
            compression: read_u32(data, 30)?,
        })
    }

    /// Row stride: one bit per pixel, rows padded to 4 bytes
    fn bytes_per_line(&self) -> usize {
        (self.width as usize).div_ceil(8).next_multiple_of(4)
    }
}

fn read_u16(data: &[u8], offset: usize) -> Option<u16> {
    let bytes = data.get(offset..offset + 2)?;
    Some(u16::from_le_bytes([bytes[0], bytes[1]]))
}

fn read_u32(data: &[u8], offset: usize) -> Option<u32> {
    let bytes = data.get(offset..offset + 4)?;
    Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Palette index whose color is pure black, i.e. the index of set pixels
fn black_index(data: &[u8], header: &BmpHeader) -> Option<u8> {
    let table_start = FILE_HEADER_LEN.checked_add(header.header_size)?;
    (0..2u8).find(|&i| {
        let entry = table_start + usize::from(i) * PALETTE_ENTRY_LEN;
        data.get(entry..entry + 3)
            .is_some_and(|bgr| bgr.iter().all(|&c| c == 0))
    })
}

impl FrameBuffer {
    /// Draw a monochrome BMP image with its top left corner at the origin
    pub fn show_bmp(&mut self, data: &[u8]) {
        self.show_bmp_with_offset(data, 0, 0);
    }

    /// Draw a monochrome BMP image with its top left corner at
    /// (`x_offset`, `y_offset`).
    ///
    /// Pixels whose palette entry is black are set, all others are left
    /// untouched. Images that are not uncompressed 1 bit per pixel, have no
    /// black palette entry, or are cut short are skipped entirely.
    pub fn show_bmp_with_offset(&mut self, data: &[u8], x_offset: u32, y_offset: u32) {
        let Some(header) = BmpHeader::parse(data) else {
            debug!("bmp: {} bytes is shorter than the header", data.len());
            return;
        };
        if header.bit_count != 1 {
            debug!("bmp: {} bits per pixel is not monochrome", header.bit_count);
            return;
        }
        if header.compression != 0 {
            debug!("bmp: compression {} is not supported", header.compression);
            return;
        }
        if header.width < 0 {
            debug!("bmp: negative width {}", header.width);
            return;
        }
        let Some(color_val) = black_index(data, &header) else {
            debug!("bmp: palette has no black entry");
            return;
        };

        let width = header.width as u32;
        let rows = header.height.unsigned_abs() as usize;
        let stride = header.bytes_per_line();
        let Some(image) = stride
            .checked_mul(rows)
            .and_then(|len| data.get(header.data_offset..header.data_offset.checked_add(len)?))
        else {
            debug!("bmp: pixel data is truncated");
            return;
        };

        let bottom_up = header.height > 0;
        for (stored, line) in image.chunks_exact(stride.max(1)).take(rows).enumerate() {
            // bottom-up files store the last display row first
            let y = (if bottom_up { rows - 1 - stored } else { stored }) as u32;
            for x in 0..width {
                let bit = (line[(x >> 3) as usize] >> (7 - (x & 7))) & 1;
                if bit == color_val {
                    self.draw_pixel(x_offset.saturating_add(x), y_offset.saturating_add(y));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Dimensions;
    use alloc::vec::Vec;

    /// Build a 1 bpp BMP. `rows` are given in display order, top row first,
    /// one string per row with `#` for black.
    fn bmp(rows: &[&str], top_down: bool, black_first: bool) -> Vec<u8> {
        let width = rows[0].len();
        let height = rows.len();
        let stride = width.div_ceil(8).next_multiple_of(4);
        let data_offset = 54 + 8;

        let mut out = Vec::new();
        out.extend_from_slice(b"BM");
        out.extend_from_slice(&((data_offset + stride * height) as u32).to_le_bytes());
        out.extend_from_slice(&[0; 4]);
        out.extend_from_slice(&(data_offset as u32).to_le_bytes());
        out.extend_from_slice(&40u32.to_le_bytes());
        out.extend_from_slice(&(width as i32).to_le_bytes());
        let signed_height = if top_down {
            -(height as i32)
        } else {
            height as i32
        };
        out.extend_from_slice(&signed_height.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&[0; 20]);
        assert_eq!(out.len(), 54);

        let (black_index, white) = if black_first {
            (0u8, [[0, 0, 0, 0], [0xFF, 0xFF, 0xFF, 0]])
        } else {
            (1u8, [[0xFF, 0xFF, 0xFF, 0], [0, 0, 0, 0]])
        };
        out.extend_from_slice(&white[0]);
        out.extend_from_slice(&white[1]);

        let mut encode_row = |row: &str| {
            let mut line = alloc::vec![if black_index == 0 { 0xFF } else { 0x00 }; stride];
            for (x, c) in row.chars().enumerate() {
                let bit = 0x80 >> (x & 7);
                let black = c == '#';
                let value = if black { black_index } else { 1 - black_index };
                if value == 1 {
                    line[x >> 3] |= bit;
                } else {
                    line[x >> 3] &= !bit;
                }
            }
            out.extend_from_slice(&line);
        };
        if top_down {
            rows.iter().for_each(|r| encode_row(r));
        } else {
            rows.iter().rev().for_each(|r| encode_row(r));
        }
        out
    }

    const ARROW: [&str; 3] = ["#........", ".#.......", "..######."];

    fn frame() -> FrameBuffer {
        FrameBuffer::new(Dimensions::W128_H64).unwrap()
    }

    fn expected_arrow(x_offset: u32, y_offset: u32) -> FrameBuffer {
        let mut frame = frame();
        for (y, row) in ARROW.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                if c == '#' {
                    frame.draw_pixel(x as u32 + x_offset, y as u32 + y_offset);
                }
            }
        }
        frame
    }

    #[test]
    fn parses_header_fields() {
        let data = bmp(&ARROW, false, true);
        let header = BmpHeader::parse(&data).unwrap();
        assert_eq!(
            header,
            BmpHeader {
                data_offset: 62,
                header_size: 40,
                width: 9,
                height: 3,
                bit_count: 1,
                compression: 0,
            }
        );
        assert_eq!(header.bytes_per_line(), 4);
    }

    #[test]
    fn bottom_up_image_at_offset() {
        let data = bmp(&ARROW, false, true);
        let mut frame = frame();
        frame.show_bmp_with_offset(&data, 10, 20);
        assert_eq!(frame.pixels(), expected_arrow(10, 20).pixels());
    }

    #[test]
    fn top_down_image() {
        let data = bmp(&ARROW, true, true);
        let mut frame = frame();
        frame.show_bmp(&data);
        assert_eq!(frame.pixels(), expected_arrow(0, 0).pixels());
    }

    #[test]
    fn black_palette_entry_may_be_second() {
        let data = bmp(&ARROW, false, false);
        let mut frame = frame();
        frame.show_bmp_with_offset(&data, 3, 4);
        assert_eq!(frame.pixels(), expected_arrow(3, 4).pixels());
    }

    #[test]
    fn short_data_is_ignored() {
        let data = bmp(&ARROW, false, true);
        let mut frame = frame();
        frame.show_bmp(&data[..53]);
        assert!(frame.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn non_monochrome_is_ignored() {
        let mut data = bmp(&ARROW, false, true);
        data[28] = 8;
        let mut frame = frame();
        frame.show_bmp(&data);
        assert!(frame.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn compressed_is_ignored() {
        let mut data = bmp(&ARROW, false, true);
        data[30] = 1;
        let mut frame = frame();
        frame.show_bmp(&data);
        assert!(frame.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn negative_width_is_ignored() {
        let mut data = bmp(&ARROW, false, true);
        data[18..22].copy_from_slice(&(-9i32).to_le_bytes());
        let mut frame = frame();
        frame.show_bmp(&data);
        assert!(frame.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn palette_without_black_is_ignored() {
        let mut data = bmp(&ARROW, false, true);
        data[54..57].copy_from_slice(&[0x10, 0x10, 0x10]);
        let mut frame = frame();
        frame.show_bmp(&data);
        assert!(frame.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn truncated_pixel_data_is_ignored() {
        let data = bmp(&ARROW, false, true);
        let mut frame = frame();
        frame.show_bmp(&data[..data.len() - 1]);
        assert!(frame.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn pixels_past_the_panel_are_clipped() {
        let data = bmp(&ARROW, false, true);
        let mut frame = frame();
        frame.show_bmp_with_offset(&data, 125, 62);
        assert!(frame.get_pixel(125, 62));
        assert!(frame.get_pixel(126, 63));
        assert_eq!(frame.pixels().iter().map(|b| b.count_ones()).sum::<u32>(), 2);
    }
}

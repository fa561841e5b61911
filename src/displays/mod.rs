//! Graphics Support for SSD1306 panels
//!
//! Implements `embedded-graphics`' [`DrawTarget`] on [`FrameBuffer`], so
//! primitives, fonts and images from that ecosystem can be drawn next to the
//! built-in rasterizer:
//!
//! ```rust, ignore
//! use embedded_graphics::{pixelcolor::BinaryColor, prelude::*, primitives::*};
//!
//! Circle::new(Point::new(40, 10), 30)
//!     .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
//!     .draw(display.framebuffer_mut())?;
//! display.show()?;
//! ```

use core::convert::Infallible;

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

use crate::framebuffer::FrameBuffer;

// Points left of, above, or past the panel edge are dropped
fn outside_display(p: Point, width: u32, height: u32) -> bool {
    if p.x < 0 || p.y < 0 {
        return true;
    }
    let (x, y) = (p.x as u32, p.y as u32);
    x >= width || y >= height
}

impl DrawTarget for FrameBuffer {
    type Error = Infallible;
    type Color = BinaryColor;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let (width, height) = (self.width(), self.height());
        for Pixel(point, color) in pixels {
            if outside_display(point, width, height) {
                continue;
            }
            self.set_pixel(point.x as u32, point.y as u32, color.is_on());
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let fill = if color.is_on() { 0xFF } else { 0x00 };
        self.pixels_mut().fill(fill);
        Ok(())
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }
}

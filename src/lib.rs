//! SSD1306 OLED Display Driver
//!
//! Drives the small monochrome OLED panels built around the SSD1306
//! controller: 128x64, 128x32, 96x16, 64x48 and 64x32. The controller is
//! reachable over I2C, a PIO backed two-wire bus, or four-wire SPI.
//!
//! ## Architecture
//!
//! This driver separates hardware control from rendering:
//! - **Interfaces** (`I2cInterface`, `PioI2cInterface`, `SpiInterface`) move command and pixel bytes
//! - **The driver** (`Ssd1306`) owns an interface, a configuration and a frame buffer
//! - **The frame buffer** (`FrameBuffer`) rasterizes pixels, lines, boxes, text and BMP images in memory
//!
//! Nothing reaches the panel until [`driver::Ssd1306::show`] is called.
//!
//! ## Usage
//!
//! ```rust, ignore
//! use ssd1306::prelude::*;
//!
//! // 1. Bind the transport and create the driver
//! let interface = I2cInterface::new(i2c, DEFAULT_ADDRESS);
//! let mut display = Ssd1306::new(interface, Config::new(Dimensions::W128_H64))?;
//!
//! // 2. Run the controller bring-up
//! display.init(&mut delay)?;
//!
//! // 3. Draw into the frame buffer
//! let frame = display.framebuffer_mut();
//! frame.draw_string(8, 24, 2, "Hello");
//! frame.draw_empty_square(0, 0, 127, 63);
//!
//! // 4. Push the frame to the panel
//! display.show()?;
//! ```
//!
//! With the `graphics` feature (on by default) the frame buffer is also an
//! `embedded-graphics` draw target.
//!
#![no_std]
#![deny(missing_docs)]
#![allow(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

extern crate alloc;

mod bmp;
mod cmd;
pub mod config;
#[cfg(feature = "graphics")]
pub mod displays;
pub mod driver;
pub mod error;
pub mod font;
pub mod framebuffer;

mod flag;

/// Maximum display height this driver supports
pub const MAX_HEIGHT: u16 = 64;

/// Maximum display width this driver supports
pub const MAX_WIDTH: u16 = 128;

pub mod interface;

/// Useful exports
pub mod prelude {
    pub use crate::config::{Config, Dimensions};
    pub use crate::driver::Ssd1306;
    pub use crate::error::Error;
    pub use crate::framebuffer::FrameBuffer;
    pub use crate::interface::{
        DisplayInterface, I2cInterface, PioI2c, PioI2cInterface, SpiInterface, ALTERNATE_ADDRESS,
        DEFAULT_ADDRESS,
    };
}

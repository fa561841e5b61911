//! Panel geometry and power configuration
use crate::driver::{InitSequence, DEFAULT_INIT_SEQUENCE};
use crate::error::Error;
use crate::{MAX_HEIGHT, MAX_WIDTH};

/// Validated panel geometry.
///
/// The controller addresses its RAM in pages of 8 rows, so the height has to be
/// a multiple of 8.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    width: u16,
    height: u16,
}

impl Dimensions {
    /// 128x64 panel
    pub const W128_H64: Self = Self::unchecked(128, 64);
    /// 128x32 panel
    pub const W128_H32: Self = Self::unchecked(128, 32);
    /// 96x16 panel
    pub const W96_H16: Self = Self::unchecked(96, 16);
    /// 64x48 panel
    pub const W64_H48: Self = Self::unchecked(64, 48);
    /// 64x32 panel
    pub const W64_H32: Self = Self::unchecked(64, 32);

    const fn unchecked(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Validate a panel geometry
    pub fn new(width: u16, height: u16) -> Result<Self, Error> {
        if width == 0
            || height == 0
            || height % 8 != 0
            || width > MAX_WIDTH
            || height > MAX_HEIGHT
        {
            return Err(Error::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Width in pixels
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Number of 8 pixel tall pages
    pub const fn pages(&self) -> u16 {
        self.height / 8
    }

    /// Size of the pixel payload in bytes
    pub const fn buffer_len(&self) -> usize {
        self.pages() as usize * self.width as usize
    }
}

/// Driver configuration handed to [`crate::driver::Ssd1306::new`].
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Panel geometry
    pub dimensions: Dimensions,
    /// Whether the panel supplies its own drive voltage. Disables the charge
    /// pump and shortens the pre-charge period.
    pub external_vcc: bool,
    /// Controller bring-up table
    pub init_sequence: &'static InitSequence,
}

impl Config {
    /// Configuration for an internally powered panel using the default
    /// bring-up table
    pub const fn new(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            external_vcc: false,
            init_sequence: DEFAULT_INIT_SEQUENCE,
        }
    }

    /// Select external VCC
    pub const fn with_external_vcc(mut self, external_vcc: bool) -> Self {
        self.external_vcc = external_vcc;
        self
    }

    /// Replace the bring-up table, e.g. for another controller revision
    pub const fn with_init_sequence(mut self, init_sequence: &'static InitSequence) -> Self {
        self.init_sequence = init_sequence;
        self
    }
}

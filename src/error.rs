//! Errors reported by the driver
use core::fmt;

pub use display_interface::DisplayError;

/// Everything that can go wrong while talking to the panel.
///
/// Drawing into the frame buffer never fails: out-of-range coordinates,
/// unknown glyphs and unsupported bitmaps are skipped instead.
#[derive(Debug, Clone)]
pub enum Error {
    /// The transport rejected a write or a control line could not be driven
    Interface(DisplayError),
    /// The frame buffer could not be allocated
    OutOfMemory,
    /// The requested geometry is not addressable by the controller
    InvalidDimensions {
        /// Requested width in pixels
        width: u16,
        /// Requested height in pixels
        height: u16,
    },
}

impl From<DisplayError> for Error {
    fn from(err: DisplayError) -> Self {
        Error::Interface(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Interface(err) => write!(f, "display interface error: {err:?}"),
            Error::OutOfMemory => f.write_str("frame buffer allocation failed"),
            Error::InvalidDimensions { width, height } => {
                write!(f, "unsupported panel geometry {width}x{height}")
            }
        }
    }
}

//! Driver for interacting with the SSD1306 display controller
use alloc::vec::Vec;

use embedded_hal::delay::DelayNs;
use log::debug;

use crate::cmd::Cmd;
use crate::config::{Config, Dimensions};
use crate::error::Error;
use crate::flag::Flag;
use crate::framebuffer::FrameBuffer;
use crate::interface::DisplayInterface;

/// Default bring-up table. The order of the steps matters: the controller
/// stays blank or shows garbage if it is changed.
pub const DEFAULT_INIT_SEQUENCE: &InitSequence = &InitSequence {
    revision: 1,
    steps: &[
        InitStep::Cmd(Cmd::SET_DISP),
        // timing and driving scheme
        InitStep::CmdArg(Cmd::SET_DISP_CLK_DIV, Flag::CLOCK_DIV_DEFAULT),
        InitStep::MultiplexRatio,
        InitStep::CmdArg(Cmd::SET_DISP_OFFSET, 0x00),
        // resolution and layout
        InitStep::Cmd(Cmd::SET_DISP_START_LINE),
        InitStep::ChargePump,
        InitStep::Cmd(Cmd::SET_SEG_REMAP | Flag::SEG_REMAP_REVERSE),
        InitStep::Cmd(Cmd::SET_COM_OUT_DIR | Flag::COM_SCAN_REMAPPED),
        InitStep::ComPins,
        // display
        InitStep::CmdArg(Cmd::SET_CONTRAST, Flag::CONTRAST_MAX),
        InitStep::Precharge,
        InitStep::CmdArg(Cmd::SET_VCOM_DESEL, Flag::VCOM_DESEL_083),
        // output follows RAM contents, not inverted
        InitStep::Cmd(Cmd::SET_ENTIRE_ON),
        InitStep::Cmd(Cmd::SET_NORM_INV),
        InitStep::Cmd(Cmd::SET_DISP | Flag::DISPLAY_ON),
        // address setting
        InitStep::CmdArg(Cmd::SET_MEM_ADDR, Flag::MEM_ADDR_HORIZONTAL),
    ],
};

/// Steps that a bring-up table can contain.
/// Variants that depend on the panel are resolved by [`InitSequence::encode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitStep {
    /// Send a bare command byte
    Cmd(u8),
    /// Send a command followed by one argument byte
    CmdArg(u8, u8),
    /// Send SET_MUX_RATIO with height - 1
    MultiplexRatio,
    /// Send SET_CHARGE_PUMP, disabled with external VCC
    ChargePump,
    /// Send SET_COM_PIN_CFG, sequential layout when width > 2 * height
    ComPins,
    /// Send SET_PRECHARGE with the period matching the power source
    Precharge,
}

/// Versioned controller bring-up table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InitSequence {
    /// Revision of the table, bumped whenever the steps change
    pub revision: u16,
    /// Steps in the order they are sent
    pub steps: &'static [InitStep],
}

impl InitSequence {
    /// Resolve the table into command bytes for a panel configuration
    pub fn encode(&self, config: &Config) -> Result<Vec<u8>, Error> {
        let dims = config.dimensions;
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(self.steps.len() * 2)
            .map_err(|_| Error::OutOfMemory)?;

        for step in self.steps {
            match *step {
                InitStep::Cmd(c) => bytes.push(c),
                InitStep::CmdArg(c, arg) => bytes.extend_from_slice(&[c, arg]),
                InitStep::MultiplexRatio => {
                    bytes.extend_from_slice(&[Cmd::SET_MUX_RATIO, (dims.height() - 1) as u8]);
                }
                InitStep::ChargePump => {
                    let value = if config.external_vcc {
                        Flag::CHARGE_PUMP_EXTERNAL
                    } else {
                        Flag::CHARGE_PUMP_INTERNAL
                    };
                    bytes.extend_from_slice(&[Cmd::SET_CHARGE_PUMP, value]);
                }
                InitStep::ComPins => {
                    let value = if dims.width() > 2 * dims.height() {
                        Flag::COM_PINS_SEQUENTIAL
                    } else {
                        Flag::COM_PINS_ALTERNATIVE
                    };
                    bytes.extend_from_slice(&[Cmd::SET_COM_PIN_CFG, value]);
                }
                InitStep::Precharge => {
                    let value = if config.external_vcc {
                        Flag::PRECHARGE_EXTERNAL
                    } else {
                        Flag::PRECHARGE_INTERNAL
                    };
                    bytes.extend_from_slice(&[Cmd::SET_PRECHARGE, value]);
                }
            }
        }
        Ok(bytes)
    }
}

/// A configured display with a hardware interface and its frame buffer.
///
/// Drawing happens in the frame buffer (see [`Ssd1306::framebuffer_mut`]);
/// nothing reaches the panel until [`Ssd1306::show`] is called.
pub struct Ssd1306<DI> {
    interface: DI,
    config: Config,
    frame: FrameBuffer,
}

impl<DI> Ssd1306<DI>
where
    DI: DisplayInterface,
{
    /// Create the driver and allocate its frame buffer. No bus traffic happens
    /// until [`Ssd1306::init`].
    pub fn new(interface: DI, config: Config) -> Result<Self, Error> {
        let dims = config.dimensions;
        debug!(
            "creating new Ssd1306 instance ({}x{})",
            dims.width(),
            dims.height()
        );
        let frame = FrameBuffer::new(dims)?;
        Ok(Ssd1306 {
            interface,
            config,
            frame,
        })
    }

    /// Reset the controller and run the bring-up table
    pub fn init(&mut self, delay: &mut impl DelayNs) -> Result<(), Error> {
        let sequence = self.config.init_sequence;
        let commands = sequence.encode(&self.config)?;
        debug!(
            "initialising ssd1306: table revision {}, {} steps",
            sequence.revision,
            sequence.steps.len()
        );

        self.interface.reset(delay)?;
        self.interface.write_command_block(&commands)?;
        debug!("init sequence complete");
        Ok(())
    }

    /// Tear the driver down, freeing the frame buffer and handing back the
    /// interface
    pub fn release(self) -> DI {
        debug!("releasing ssd1306");
        self.interface
    }

    /// Panel geometry
    pub fn dimensions(&self) -> Dimensions {
        self.config.dimensions
    }

    /// Active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The frame buffer
    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.frame
    }

    /// The frame buffer, for drawing
    pub fn framebuffer_mut(&mut self) -> &mut FrameBuffer {
        &mut self.frame
    }

    /// Zero the frame buffer. The panel keeps its contents until the next
    /// [`Ssd1306::show`].
    pub fn clear(&mut self) {
        self.frame.clear();
    }

    /// Switch the panel on
    pub fn power_on(&mut self) -> Result<(), Error> {
        debug!("powering up ssd1306");
        self.interface.write_command(Cmd::SET_DISP | Flag::DISPLAY_ON)?;
        Ok(())
    }

    /// Switch the panel off. RAM contents are kept.
    pub fn power_off(&mut self) -> Result<(), Error> {
        debug!("powering down ssd1306");
        self.interface.write_command(Cmd::SET_DISP)?;
        Ok(())
    }

    /// Set the contrast, 0 to 255
    pub fn contrast(&mut self, value: u8) -> Result<(), Error> {
        debug!("setting contrast to {}", value);
        self.interface.write_command_block(&[Cmd::SET_CONTRAST, value])?;
        Ok(())
    }

    /// Invert the panel output. Only the controller's mode changes, the frame
    /// buffer is left as is.
    pub fn invert(&mut self, inverted: bool) -> Result<(), Error> {
        debug!("setting inverted display: {}", inverted);
        let flag = if inverted { Flag::INVERSE } else { 0 };
        self.interface.write_command(Cmd::SET_NORM_INV | flag)?;
        Ok(())
    }

    /// Transfer the whole frame buffer to the panel
    pub fn show(&mut self) -> Result<(), Error> {
        let dims = self.config.dimensions;
        let mut col_start = 0u8;
        let mut col_end = (dims.width() - 1) as u8;
        if dims.width() == 64 {
            // narrow panels are wired to the middle of the 128 column RAM
            col_start += Flag::NARROW_COLUMN_OFFSET;
            col_end += Flag::NARROW_COLUMN_OFFSET;
        }
        let window = [
            Cmd::SET_COL_ADDR,
            col_start,
            col_end,
            Cmd::SET_PAGE_ADDR,
            0,
            (dims.pages() - 1) as u8,
        ];
        debug!(
            "displaying buffer on ssd1306: columns {}-{}, pages 0-{}",
            col_start,
            col_end,
            window[5]
        );
        self.interface.write_command_block(&window)?;

        self.frame.set_marker(Flag::DATA_MODE);
        self.interface.write_buffer(&self.frame)?;
        Ok(())
    }
}

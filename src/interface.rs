//! Transport bindings between the driver and the controller
//!
//! The SSD1306 tells commands from pixel data either with an in-band control
//! byte (two-wire buses) or with a dedicated data/command line (four-wire
//! SPI). [`DisplayInterface`] hides that difference from the driver.
use display_interface::DisplayError;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::I2c;
use embedded_hal::spi::SpiBus;
use log::trace;

use crate::flag::Flag;
use crate::framebuffer::FrameBuffer;

/// Default two-wire address of the controller (SA0 low)
pub const DEFAULT_ADDRESS: u8 = 0x3C;
/// Two-wire address with SA0 pulled high
pub const ALTERNATE_ADDRESS: u8 = 0x3D;

/// How long the reset line is held low
pub const RESET_PULSE_MS: u32 = 10;

/// Blocking transport to the controller.
pub trait DisplayInterface {
    /// Bring the controller out of reset. Transports without a reset line do
    /// nothing.
    fn reset<D: DelayNs>(&mut self, _delay: &mut D) -> Result<(), DisplayError> {
        Ok(())
    }

    /// Send a single command byte
    fn write_command(&mut self, command: u8) -> Result<(), DisplayError>;

    /// Send a sequence of command and argument bytes
    fn write_command_block(&mut self, commands: &[u8]) -> Result<(), DisplayError>;

    /// Send the frame buffer as pixel data
    fn write_buffer(&mut self, frame: &FrameBuffer) -> Result<(), DisplayError>;
}

/// Two-wire transport over an `embedded-hal` I2C bus.
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Talk to the controller at `address`
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Give back the bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> DisplayInterface for I2cInterface<I2C> {
    fn write_command(&mut self, command: u8) -> Result<(), DisplayError> {
        trace!("i2c {:#04x}: command {:#04x}", self.address, command);
        self.i2c
            .write(self.address, &[Flag::COMMAND_MODE, command])
            .map_err(|_| DisplayError::BusWriteError)
    }

    fn write_command_block(&mut self, commands: &[u8]) -> Result<(), DisplayError> {
        // every byte goes out in its own control-byte framed transaction
        for &command in commands {
            self.write_command(command)?;
        }
        Ok(())
    }

    fn write_buffer(&mut self, frame: &FrameBuffer) -> Result<(), DisplayError> {
        let bytes = frame.transfer_bytes();
        trace!("i2c {:#04x}: {} data bytes", self.address, bytes.len());
        self.i2c
            .write(self.address, bytes)
            .map_err(|_| DisplayError::BusWriteError)
    }
}

/// Blocking write primitive of a programmable-I/O two-wire engine, as found on
/// microcontrollers that implement I2C in a PIO state machine instead of a
/// dedicated peripheral.
///
/// The engine is expected to be loaded and pinned out before it is handed to
/// [`PioI2cInterface`].
pub trait PioI2c {
    /// Error reported by the engine
    type Error: core::fmt::Debug;

    /// Write `bytes` to the device at the 7-bit `address`, blocking until the
    /// stop condition has been sent
    fn write_blocking(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error>;
}

/// Two-wire transport over a [`PioI2c`] engine.
pub struct PioI2cInterface<P> {
    pio: P,
    address: u8,
}

impl<P> PioI2cInterface<P> {
    /// Talk to the controller at `address`
    pub fn new(pio: P, address: u8) -> Self {
        Self { pio, address }
    }

    /// Give back the engine
    pub fn release(self) -> P {
        self.pio
    }
}

impl<P: PioI2c> DisplayInterface for PioI2cInterface<P> {
    fn write_command(&mut self, command: u8) -> Result<(), DisplayError> {
        trace!("pio i2c {:#04x}: command {:#04x}", self.address, command);
        self.pio
            .write_blocking(self.address, &[Flag::COMMAND_MODE, command])
            .map_err(|_| DisplayError::BusWriteError)
    }

    fn write_command_block(&mut self, commands: &[u8]) -> Result<(), DisplayError> {
        for &command in commands {
            self.write_command(command)?;
        }
        Ok(())
    }

    fn write_buffer(&mut self, frame: &FrameBuffer) -> Result<(), DisplayError> {
        self.pio
            .write_blocking(self.address, frame.transfer_bytes())
            .map_err(|_| DisplayError::BusWriteError)
    }
}

/// Four-wire SPI transport with chip select, data/command and reset lines.
///
/// Chip select is driven by this interface, so the bus must not toggle it on
/// its own. It is held high whenever no transfer is in progress.
pub struct SpiInterface<SPI, CS, DC, RST> {
    spi: SPI,
    /// Chip select, active low
    cs: CS,
    /// High for data, low for commands
    dc: DC,
    /// Reset, active low
    rst: RST,
}

impl<SPI, CS, DC, RST> SpiInterface<SPI, CS, DC, RST> {
    /// Create the interface. Nothing is driven until the display is initialised.
    pub fn new(spi: SPI, cs: CS, dc: DC, rst: RST) -> Self {
        Self { spi, cs, dc, rst }
    }

    /// Give back the bus and pins
    pub fn release(self) -> (SPI, CS, DC, RST) {
        (self.spi, self.cs, self.dc, self.rst)
    }
}

impl<SPI, CS, DC, RST> SpiInterface<SPI, CS, DC, RST>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Run one chip-select framed transfer with DC set for data or commands
    fn transfer(&mut self, data_mode: bool, bytes: &[u8]) -> Result<(), DisplayError> {
        if data_mode {
            self.dc.set_high().map_err(|_| DisplayError::DCError)?;
        } else {
            self.dc.set_low().map_err(|_| DisplayError::DCError)?;
        }

        self.cs.set_low().map_err(|_| DisplayError::CSError)?;
        let result = self
            .spi
            .write(bytes)
            .and_then(|()| self.spi.flush())
            .map_err(|_| DisplayError::BusWriteError);
        // release the bus even if the write failed
        self.cs.set_high().map_err(|_| DisplayError::CSError)?;
        result
    }
}

impl<SPI, CS, DC, RST> DisplayInterface for SpiInterface<SPI, CS, DC, RST>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), DisplayError> {
        trace!("spi: hardware reset");
        self.cs.set_high().map_err(|_| DisplayError::CSError)?;
        self.rst.set_low().map_err(|_| DisplayError::RSError)?;
        delay.delay_ms(RESET_PULSE_MS);
        self.rst.set_high().map_err(|_| DisplayError::RSError)
    }

    fn write_command(&mut self, command: u8) -> Result<(), DisplayError> {
        trace!("spi: command {:#04x}", command);
        self.transfer(false, &[command])
    }

    fn write_command_block(&mut self, commands: &[u8]) -> Result<(), DisplayError> {
        trace!("spi: {} command bytes", commands.len());
        self.transfer(false, commands)
    }

    fn write_buffer(&mut self, frame: &FrameBuffer) -> Result<(), DisplayError> {
        // the data/command line replaces the in-band marker byte
        self.transfer(true, frame.pixels())
    }
}

/// SSD1306 command opcodes.
///
/// Some opcodes carry their argument in the low bits (`SET_DISP | 0x01`
/// switches the panel on), the rest take one or more argument bytes.
pub struct Cmd;
#[allow(dead_code)]
impl Cmd {
    /// Memory addressing mode, one argument byte
    pub const SET_MEM_ADDR: u8 = 0x20;
    /// Column address window, start and end bytes
    pub const SET_COL_ADDR: u8 = 0x21;
    /// Page address window, start and end bytes
    pub const SET_PAGE_ADDR: u8 = 0x22;
    /// Display start line, OR the line (0..=63) into the low bits
    pub const SET_DISP_START_LINE: u8 = 0x40;
    /// Contrast, one argument byte
    pub const SET_CONTRAST: u8 = 0x81;
    /// Charge pump setting, one argument byte
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
    /// Segment remap, bit 0 maps column 127 to SEG0
    pub const SET_SEG_REMAP: u8 = 0xA0;
    /// Entire display on, bit 0 ignores RAM contents
    pub const SET_ENTIRE_ON: u8 = 0xA4;
    /// Normal/inverse display, bit 0 inverts
    pub const SET_NORM_INV: u8 = 0xA6;
    /// Multiplex ratio, one argument byte (rows - 1)
    pub const SET_MUX_RATIO: u8 = 0xA8;
    /// Display off/on, bit 0 switches the panel on
    pub const SET_DISP: u8 = 0xAE;
    /// COM output scan direction, bit 3 scans COM[N-1] to COM0
    pub const SET_COM_OUT_DIR: u8 = 0xC0;
    /// Vertical display offset, one argument byte
    pub const SET_DISP_OFFSET: u8 = 0xD3;
    /// Clock divide ratio and oscillator frequency, one argument byte
    pub const SET_DISP_CLK_DIV: u8 = 0xD5;
    /// Pre-charge period, one argument byte
    pub const SET_PRECHARGE: u8 = 0xD9;
    /// COM pins hardware configuration, one argument byte
    pub const SET_COM_PIN_CFG: u8 = 0xDA;
    /// VCOMH deselect level, one argument byte
    pub const SET_VCOM_DESEL: u8 = 0xDB;
}

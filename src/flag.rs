/// Argument values and framing markers used together with [`crate::cmd::Cmd`].
pub struct Flag;
#[allow(dead_code)]
impl Flag {
    /// Control byte announcing a command on the two-wire bus
    pub const COMMAND_MODE: u8 = 0x00;
    /// Control byte announcing a data stream on the two-wire bus
    pub const DATA_MODE: u8 = 0x40;
    /// Display on bit for `SET_DISP`
    pub const DISPLAY_ON: u8 = 0x01;
    /// Inverse bit for `SET_NORM_INV`
    pub const INVERSE: u8 = 0x01;
    /// Default divide ratio with mid oscillator frequency
    pub const CLOCK_DIV_DEFAULT: u8 = 0x80;
    /// Column 127 mapped to SEG0
    pub const SEG_REMAP_REVERSE: u8 = 0x01;
    /// Scan from COM[N-1] to COM0
    pub const COM_SCAN_REMAPPED: u8 = 0x08;
    /// Charge pump disabled, panel is driven from an external VCC
    pub const CHARGE_PUMP_EXTERNAL: u8 = 0x10;
    /// Charge pump enabled
    pub const CHARGE_PUMP_INTERNAL: u8 = 0x14;
    /// Sequential COM pin layout, used by wide and short panels
    pub const COM_PINS_SEQUENTIAL: u8 = 0x02;
    /// Alternative COM pin layout
    pub const COM_PINS_ALTERNATIVE: u8 = 0x12;
    /// Pre-charge period with external VCC
    pub const PRECHARGE_EXTERNAL: u8 = 0x22;
    /// Pre-charge period with the internal charge pump
    pub const PRECHARGE_INTERNAL: u8 = 0xF1;
    /// VCOMH deselect level of ~0.83 x VCC
    pub const VCOM_DESEL_083: u8 = 0x30;
    /// Horizontal memory addressing
    pub const MEM_ADDR_HORIZONTAL: u8 = 0x00;
    /// Maximum contrast
    pub const CONTRAST_MAX: u8 = 0xFF;
    /// Column offset applied on 64 pixel wide panels
    pub const NARROW_COLUMN_OFFSET: u8 = 32;
}

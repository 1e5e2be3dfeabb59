//! Command Table

/// ILI9341 opcodes.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Nop = 0x00,
    /// Software reset, wait 5ms before the next command and 120ms before Sleep Out.
    SoftwareReset = 0x01,
    /// Read display identification information
    ///
    /// <<dummy:u8, manufacturer:u8, version:u8, id:u8>>
    ReadDisplayId = 0x04,
    ReadDisplayStatus = 0x09,
    ReadPowerMode = 0x0a,
    ReadMadctl = 0x0b,
    ReadPixelFormat = 0x0c,
    ReadImageFormat = 0x0d,
    ReadSelfDiagnostic = 0x0f,

    SleepIn = 0x10,
    /// Leave sleep mode. The booster and oscillator need 120ms to settle.
    SleepOut = 0x11,
    PartialModeOn = 0x12,
    NormalModeOn = 0x13,

    InversionOff = 0x20,
    InversionOn = 0x21,
    /// <<0:b4, GC:b4>>
    GammaSet = 0x26,
    DisplayOff = 0x28,
    DisplayOn = 0x29,

    /// <<SC:u16be, EC:u16be>>
    ColumnAddressSet = 0x2a,
    /// <<SP:u16be, EP:u16be>>
    PageAddressSet = 0x2b,
    /// All following data bytes are pixels, written into the current window.
    MemoryWrite = 0x2c,
    MemoryRead = 0x2e,

    /// <<SR:u16be, ER:u16be>>
    PartialArea = 0x30,
    /// Vertical scrolling definition
    ///
    /// <<TFA:u16be, VSA:u16be, BFA:u16be>>
    ///
    /// TFA + VSA + BFA must equal the native line count (320).
    VerticalScrollDefine = 0x33,
    /// Memory access control, see [`madctl`].
    ///
    /// <<MY:b1, MX:b1, MV:b1, ML:b1, BGR:b1, MH:b1, 0:b2>>
    MemoryAccessControl = 0x36,
    /// Vertical scrolling start address
    ///
    /// <<VSP:u16be>>
    VerticalScrollAddr = 0x37,
    /// <<0:b1, DPI:b3, 0:b1, DBI:b3>>, 0x55 = 16 bits per pixel on both interfaces
    PixelFormatSet = 0x3a,

    /// Frame rate control, normal mode / full colors
    FrameRateControl1 = 0xb1,
    /// Frame rate control, idle mode / 8 colors
    FrameRateControl2 = 0xb2,
    /// Frame rate control, partial mode / full colors
    FrameRateControl3 = 0xb3,
    InversionControl = 0xb4,
    DisplayFunctionControl = 0xb6,

    /// <<0:b2, VRH:b6>>
    PowerControl1 = 0xc0,
    /// <<0:b5, BT:b3>>
    PowerControl2 = 0xc1,
    PowerControl3 = 0xc2,
    PowerControl4 = 0xc3,
    PowerControl5 = 0xc4,
    /// <<0:b1, VMH:b7, 0:b1, VML:b7>>
    VcomControl1 = 0xc5,
    VcomControl2 = 0xc7,

    ReadId1 = 0xda,
    ReadId2 = 0xdb,
    ReadId3 = 0xdc,
    ReadId4 = 0xdd,

    /// 15 bytes positive gamma correction curve
    PositiveGammaCorrection = 0xe0,
    /// 15 bytes negative gamma correction curve
    NegativeGammaCorrection = 0xe1,
}

/// Bits of the memory access control register.
pub mod madctl {
    /// Row address order
    pub const MY: u8 = 0x80;
    /// Column address order
    pub const MX: u8 = 0x40;
    /// Row / column exchange
    pub const MV: u8 = 0x20;
    /// Vertical refresh order
    pub const ML: u8 = 0x10;
    /// BGR color filter panel
    pub const BGR: u8 = 0x08;
    /// Horizontal refresh order
    pub const MH: u8 = 0x04;
}

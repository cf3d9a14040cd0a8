//! ESP8266 peripheral register layouts.

pub mod gpio;
pub mod iomux;
pub mod rtc;

pub const PERIPHS_GPIO_BASE: u32 = 0x6000_0300;
pub const REG_RTC_BASE: u32 = 0x6000_0700;
pub const PERIPHS_IO_MUX_BASE: u32 = 0x6000_0800;

/// CPU interrupt number of the GPIO block.
pub const ETS_GPIO_INUM: u32 = 4;

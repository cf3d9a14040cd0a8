//! RTC-domain registers controlling GPIO16.
//!
//! GPIO16 sits outside the GPIO block and the IO mux. It has no pull
//! resistors and cannot raise GPIO interrupts.

use super::REG_RTC_BASE;

pub const RTC_GPIO_OUT: u32 = REG_RTC_BASE + 0x068;
pub const RTC_GPIO_ENABLE: u32 = REG_RTC_BASE + 0x074;
pub const RTC_GPIO_IN_DATA: u32 = REG_RTC_BASE + 0x08c;
pub const RTC_GPIO_CONF: u32 = REG_RTC_BASE + 0x090;
pub const PAD_XPD_DCDC_CONF: u32 = REG_RTC_BASE + 0x0a0;

/// Bits of `PAD_XPD_DCDC_CONF` cleared before selecting the GPIO function.
pub const XPD_DCDC_FUNC_CLEAR: u32 = 0x43;
/// Function value routing the pad to `RTC_GPIO_OUT`.
pub const XPD_DCDC_FUNC_GPIO: u32 = 0x1;

/// The only bit used in each RTC GPIO register.
pub const RTC_GPIO_BIT: u32 = 0x1;

//! GPIO block register map.
//!
//! The output, enable and status registers each have a write-1-to-set
//! and a write-1-to-clear alias, so single-pin updates never need a
//! read-modify-write of the shared register.

use super::PERIPHS_GPIO_BASE;
use crate::hal::gpio::InterruptTrigger;
use bitflags::bitflags;

/// Output latch.
pub const GPIO_OUT: u32 = PERIPHS_GPIO_BASE;
/// Set bits in [`GPIO_OUT`].
pub const GPIO_OUT_W1TS: u32 = PERIPHS_GPIO_BASE + 0x04;
/// Clear bits in [`GPIO_OUT`].
pub const GPIO_OUT_W1TC: u32 = PERIPHS_GPIO_BASE + 0x08;
/// Output driver enable.
pub const GPIO_ENABLE: u32 = PERIPHS_GPIO_BASE + 0x0c;
pub const GPIO_ENABLE_W1TS: u32 = PERIPHS_GPIO_BASE + 0x10;
pub const GPIO_ENABLE_W1TC: u32 = PERIPHS_GPIO_BASE + 0x14;
/// Sampled pad levels.
pub const GPIO_IN: u32 = PERIPHS_GPIO_BASE + 0x18;
/// Latched interrupt status, one bit per pin.
pub const GPIO_STATUS: u32 = PERIPHS_GPIO_BASE + 0x1c;
pub const GPIO_STATUS_W1TS: u32 = PERIPHS_GPIO_BASE + 0x20;
pub const GPIO_STATUS_W1TC: u32 = PERIPHS_GPIO_BASE + 0x24;
/// First per-pin configuration register; one word per pin follows.
pub const GPIO_PIN0: u32 = PERIPHS_GPIO_BASE + 0x28;

/// Mask of the pins covered by the GPIO block.
pub const GPIO_PIN_MASK: u32 = 0xffff;

/// Address of the configuration register of `pin`.
#[inline]
pub const fn pin_addr(pin: u8) -> u32 {
    GPIO_PIN0 + (pin as u32) * 4
}

/// Single-bit mask for `pin`.
#[inline]
pub const fn bit(pin: u8) -> u32 {
    1 << pin
}

bitflags! {
    /// Fields of a per-pin configuration register.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PinConfig: u32 {
        /// Pin driven by the sigma-delta generator instead of the GPIO latch.
        const SOURCE_SIGMA = 1 << 0;
        /// Open-drain pad driver.
        const PAD_DRIVER_OPEN_DRAIN = 1 << 2;
        /// Interrupt type, see [`int_type`].
        const INT_TYPE = 0b111 << PIN_INT_TYPE_SHIFT;
        /// Wake the chip from light sleep.
        const WAKEUP_ENABLE = 1 << 10;
    }
}

pub const PIN_INT_TYPE_SHIFT: u32 = 7;

/// Encode `trigger` into the interrupt type field.
#[inline]
pub const fn int_type(trigger: InterruptTrigger) -> u32 {
    (trigger as u32) << PIN_INT_TYPE_SHIFT
}

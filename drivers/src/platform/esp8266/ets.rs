//! GPIO interrupt line backed by the ESP8266 boot ROM.

use crate::hal::interrupt::{InterruptLine, IsrHandler};
use crate::hw::esp8266::ETS_GPIO_INUM;
use core::ffi::c_void;

unsafe extern "C" {
    fn ets_isr_attach(inum: u32, handler: IsrHandler, arg: *mut c_void);
    fn ets_isr_mask(mask: u32);
    fn ets_isr_unmask(mask: u32);
}

/// The chip-wide GPIO interrupt.
#[derive(Debug)]
pub struct EtsGpioLine {
    _private: (),
}

impl EtsGpioLine {
    /// # Safety
    ///
    /// Only one value may exist; it owns the GPIO interrupt vector.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl InterruptLine for EtsGpioLine {
    #[inline]
    fn mask(&self) {
        // SAFETY: ROM routine, only touches the interrupt enable register.
        unsafe { ets_isr_mask(1 << ETS_GPIO_INUM) }
    }

    #[inline]
    fn unmask(&self) {
        // SAFETY: ROM routine, only touches the interrupt enable register.
        unsafe { ets_isr_unmask(1 << ETS_GPIO_INUM) }
    }

    unsafe fn attach(&self, handler: IsrHandler, arg: *mut c_void) {
        // SAFETY: the caller keeps `arg` alive.
        unsafe { ets_isr_attach(ETS_GPIO_INUM, handler, arg) }
    }
}

//! Simulated ESP8266 GPIO hardware for unit tests.

use crate::hal::gpio::{GpioIntrHandler, InterruptTrigger, PinLevel};
use crate::hal::interrupt::{InterruptLine, IsrHandler};
use crate::hal::task::{OsEvent, TaskHandler, TaskPriority, TaskScheduler};
use crate::hw::esp8266::gpio::{self as regs, PIN_INT_TYPE_SHIFT};
use crate::hw::esp8266::rtc;
use crate::hw::mmio::RegisterBus;
use core::convert::Infallible;
use core::ffi::c_void;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::vec::Vec;

/// Register file with the side effects of the GPIO block.
///
/// `GPIO_IN` reflects the output latch for pins whose driver is enabled
/// and the externally driven pad level otherwise. Driving a pad latches
/// the status bit when the pin register's interrupt type matches.
#[derive(Default)]
pub struct SimChip {
    regs: RefCell<HashMap<u32, u32>>,
    pads: Cell<u32>,
    rtc_pad: Cell<u32>,
    written: RefCell<Vec<u32>>,
}

impl SimChip {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reg(&self, addr: u32) -> u32 {
        self.regs.borrow().get(&addr).copied().unwrap_or(0)
    }

    /// Preset a register without recording a write.
    pub fn poke(&self, addr: u32, value: u32) {
        self.regs.borrow_mut().insert(addr, value);
    }

    /// Addresses written by the driver, in order.
    pub fn written(&self) -> Vec<u32> {
        self.written.borrow().clone()
    }

    pub fn set_rtc_input(&self, level: PinLevel) {
        self.rtc_pad.set(level.bit());
    }

    /// Latch the status bit of `pin` as if it had fired.
    pub fn latch(&self, pin: u8) {
        let status = self.reg(regs::GPIO_STATUS);
        self.poke(regs::GPIO_STATUS, status | regs::bit(pin));
    }

    /// Drive the pad of `pin` from outside the chip.
    pub fn drive(&self, pin: u8, level: PinLevel) {
        let mask = regs::bit(pin);
        let old = self.pads.get() & mask != 0;
        let new = bool::from(level);
        self.pads.set((self.pads.get() & !mask) | (level.bit() << pin));

        let kind = (self.reg(regs::pin_addr(pin)) >> PIN_INT_TYPE_SHIFT) & 0b111;
        let fires = match InterruptTrigger::try_from(kind) {
            Ok(InterruptTrigger::RisingEdge) => !old && new,
            Ok(InterruptTrigger::FallingEdge) => old && !new,
            Ok(InterruptTrigger::AnyEdge) => old != new,
            Ok(InterruptTrigger::LowLevel) => !new,
            Ok(InterruptTrigger::HighLevel) => new,
            _ => false,
        };
        if fires {
            self.latch(pin);
        }
    }

    fn update(&self, addr: u32, clear: u32, set: u32) {
        let value = self.reg(addr);
        self.poke(addr, (value & !clear) | set);
    }
}

impl RegisterBus for SimChip {
    fn read(&self, addr: u32) -> u32 {
        match addr {
            regs::GPIO_IN => {
                let enable = self.reg(regs::GPIO_ENABLE);
                let driven = self.reg(regs::GPIO_OUT) & enable;
                (driven | (self.pads.get() & !enable)) & regs::GPIO_PIN_MASK
            }
            rtc::RTC_GPIO_IN_DATA => {
                if self.reg(rtc::RTC_GPIO_ENABLE) & rtc::RTC_GPIO_BIT != 0 {
                    self.reg(rtc::RTC_GPIO_OUT) & rtc::RTC_GPIO_BIT
                } else {
                    self.rtc_pad.get()
                }
            }
            _ => self.reg(addr),
        }
    }

    fn write(&self, addr: u32, value: u32) {
        self.written.borrow_mut().push(addr);
        match addr {
            regs::GPIO_OUT_W1TS => self.update(regs::GPIO_OUT, 0, value),
            regs::GPIO_OUT_W1TC => self.update(regs::GPIO_OUT, value, 0),
            regs::GPIO_ENABLE_W1TS => self.update(regs::GPIO_ENABLE, 0, value),
            regs::GPIO_ENABLE_W1TC => self.update(regs::GPIO_ENABLE, value, 0),
            regs::GPIO_STATUS_W1TS => self.update(regs::GPIO_STATUS, 0, value),
            regs::GPIO_STATUS_W1TC => self.update(regs::GPIO_STATUS, value, 0),
            _ => self.poke(addr, value),
        }
    }
}

/// GPIO interrupt line that runs the attached handler on [`SimLine::fire`].
///
/// Raising it while masked leaves it pending until the next unmask.
pub struct SimLine {
    masked: Cell<bool>,
    pending: Cell<bool>,
    masks: Cell<usize>,
    unmasks: Cell<usize>,
    isr: Cell<Option<(IsrHandler, *mut c_void)>>,
}

impl SimLine {
    pub fn new() -> Self {
        Self {
            masked: Cell::new(false),
            pending: Cell::new(false),
            masks: Cell::new(0),
            unmasks: Cell::new(0),
            isr: Cell::new(None),
        }
    }

    pub fn is_masked(&self) -> bool {
        self.masked.get()
    }

    /// `(mask, unmask)` call counts.
    pub fn counts(&self) -> (usize, usize) {
        (self.masks.get(), self.unmasks.get())
    }

    /// Raise the interrupt; returns whether a handler ran.
    pub fn fire(&self) -> bool {
        if self.masked.get() {
            self.pending.set(true);
            return false;
        }
        self.run_handler()
    }

    fn run_handler(&self) -> bool {
        match self.isr.get() {
            Some((handler, arg)) => {
                // SAFETY: `attach` callers guarantee `arg` outlives the line.
                unsafe { handler(arg) };
                true
            }
            None => false,
        }
    }
}

impl InterruptLine for SimLine {
    fn mask(&self) {
        self.masked.set(true);
        self.masks.set(self.masks.get() + 1);
    }

    fn unmask(&self) {
        self.masked.set(false);
        self.unmasks.set(self.unmasks.get() + 1);
        if self.pending.replace(false) {
            self.run_handler();
        }
    }

    unsafe fn attach(&self, handler: IsrHandler, arg: *mut c_void) {
        self.isr.set(Some((handler, arg)));
    }
}

/// Scheduler that records registrations and posts without running anything.
#[derive(Default)]
pub struct RecordingScheduler {
    pub registered: RefCell<Vec<(TaskPriority, usize)>>,
    pub posted: RefCell<Vec<(TaskPriority, OsEvent<GpioIntrHandler>)>>,
}

impl RecordingScheduler {
    /// Event words posted so far.
    pub fn sigs(&self) -> Vec<u32> {
        self.posted.borrow().iter().map(|(_, event)| event.sig).collect()
    }
}

impl TaskScheduler<GpioIntrHandler> for RecordingScheduler {
    type Error = Infallible;

    fn register(
        &self,
        priority: TaskPriority,
        _handler: TaskHandler<GpioIntrHandler>,
        capacity: usize,
    ) -> Result<(), Infallible> {
        self.registered.borrow_mut().push((priority, capacity));
        Ok(())
    }

    fn post(
        &self,
        priority: TaskPriority,
        event: OsEvent<GpioIntrHandler>,
    ) -> Result<(), Infallible> {
        self.posted.borrow_mut().push((priority, event));
        Ok(())
    }
}

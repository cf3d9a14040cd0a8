//! ESP8266 GPIO Controller Driver
//!
//! Pin configuration, digital I/O and pin-change interrupts for GPIO0-15
//! and the RTC-domain GPIO16.
//!
//! Interrupts are split between two contexts. The dispatcher runs in
//! interrupt context on the chip-wide GPIO interrupt: for every armed pin
//! with a latched status bit it masks the pin, acknowledges it, samples the
//! level, posts a [`GpioEvent`] to the GPIO task and re-arms the pin with
//! its recorded trigger. The task ([`gpio_task`]) later runs in scheduler
//! context and calls the user handler with `(pin, level)`.
//!
//! The interrupt type table is shared between task code and the dispatcher.
//! Masking the GPIO interrupt line is the only exclusion: task code reads
//! and writes the table with the line masked, and the dispatcher runs as
//! the line's handler, so the two never overlap and the dispatcher never
//! has to wait or give up.

use super::event::{GPIO_TASK_PRIORITY, GPIO_TASK_QUEUE_LEN, GpioEvent, gpio_task};
use super::pin::{GPIO_PIN_COUNT, Pin};
use crate::hal::gpio::{
    GpioController, GpioError, GpioInterrupts, GpioIntrHandler, InterruptTrigger, PinLevel,
    PinMode, PullMode,
};
use crate::hal::interrupt::{InterruptLine, MaskGuard};
use crate::hal::task::{OsEvent, TaskScheduler};
use crate::hw::esp8266::gpio as regs;
use crate::hw::mmio::RegisterBus;
use core::cell::UnsafeCell;
use core::ffi::c_void;
use spin::Once;

/// Trigger each ordinary pin is armed with.
struct TriggerTable(UnsafeCell<[InterruptTrigger; GPIO_PIN_COUNT]>);

// SAFETY: task code only goes through `get`/`set`, which need the GPIO line
// masked, and `snapshot` is only called by the line's handler.
unsafe impl Sync for TriggerTable {}

impl TriggerTable {
    const fn new() -> Self {
        Self(UnsafeCell::new([InterruptTrigger::Disabled; GPIO_PIN_COUNT]))
    }

    fn get<L: InterruptLine>(&self, _masked: &MaskGuard<'_, L>, id: u8) -> InterruptTrigger {
        // SAFETY: the handler cannot run while the line is masked.
        unsafe { (*self.0.get())[id as usize] }
    }

    fn set<L: InterruptLine>(&self, _masked: &MaskGuard<'_, L>, id: u8, trigger: InterruptTrigger) {
        // SAFETY: the handler cannot run while the line is masked.
        unsafe { (*self.0.get())[id as usize] = trigger }
    }

    /// # Safety
    ///
    /// Only the GPIO interrupt handler may call this.
    unsafe fn snapshot(&self) -> [InterruptTrigger; GPIO_PIN_COUNT] {
        // SAFETY: task code is preempted outside any masked section.
        unsafe { *self.0.get() }
    }
}

/// GPIO controller.
///
/// - `B`: register access
/// - `L`: the chip-wide GPIO interrupt line
/// - `S`: scheduler running the GPIO task
pub struct Esp8266Gpio<B, L, S> {
    bus: B,
    line: L,
    scheduler: S,
    int_map: TriggerTable,
    handler: Once<GpioIntrHandler>,
}

impl<B, L, S> Esp8266Gpio<B, L, S>
where
    B: RegisterBus,
    L: InterruptLine,
    S: TaskScheduler<GpioIntrHandler>,
{
    /// Create a controller with every pin's interrupt disabled.
    pub const fn new(bus: B, line: L, scheduler: S) -> Self {
        Self {
            bus,
            line,
            scheduler,
            int_map: TriggerTable::new(),
            handler: Once::new(),
        }
    }

    /// Configure direction and pull resistor of `pin`.
    ///
    /// `pull` is ignored for GPIO16, which has no pull resistors.
    pub fn set_mode(&self, pin: u8, mode: PinMode, pull: PullMode) -> Result<(), GpioError> {
        let resolved = Pin::resolve(pin)?;
        log::debug!("gpio{pin}: mode {mode:?}, pull {pull:?}");
        resolved.set_mode(&self.bus, &self.line, mode, pull);
        Ok(())
    }

    /// Drive `pin` to `level`; only bit 0 of an integer level is used.
    pub fn write(&self, pin: u8, level: impl Into<PinLevel>) -> Result<(), GpioError> {
        Pin::resolve(pin)?.write(&self.bus, level.into());
        Ok(())
    }

    /// Sample the level of `pin`.
    pub fn read(&self, pin: u8) -> Result<PinLevel, GpioError> {
        Ok(Pin::resolve(pin)?.read(&self.bus))
    }

    /// Record `trigger` for `pin` and program it into the pin register.
    ///
    /// Any status latched before the call is discarded. GPIO16 cannot
    /// raise GPIO interrupts and is rejected with [`GpioError::InvalidPin`].
    pub fn set_interrupt(&self, pin: u8, trigger: InterruptTrigger) -> Result<(), GpioError> {
        let pin = match Pin::resolve(pin)? {
            Pin::Standard(pin) => pin,
            Pin::Rtc(_) => return Err(GpioError::InvalidPin),
        };

        let masked = self.line.masked();
        pin.clear_status(&self.bus);
        self.int_map.set(&masked, pin.id(), trigger);
        pin.set_trigger(&self.bus, trigger);
        log::debug!("gpio{}: interrupt {trigger:?}", pin.id());
        Ok(())
    }

    /// The trigger recorded for `pin`.
    pub fn interrupt_trigger(&self, pin: u8) -> Result<InterruptTrigger, GpioError> {
        match Pin::resolve(pin)? {
            Pin::Standard(pin) => Ok(self.int_map.get(&self.line.masked(), pin.id())),
            Pin::Rtc(_) => Err(GpioError::InvalidPin),
        }
    }

    /// Service the GPIO interrupt.
    ///
    /// Pins are handled in ascending order from a single snapshot of the
    /// status register. Never blocks: an event the scheduler refuses is
    /// dropped, but its pin is still acknowledged and re-armed.
    ///
    /// # Safety
    ///
    /// Must only run as the handler of the GPIO interrupt line.
    unsafe fn dispatch(&self) {
        let Some(&handler) = self.handler.get() else {
            return;
        };
        // SAFETY: guaranteed by the caller.
        let int_map = unsafe { self.int_map.snapshot() };

        let status = self.bus.read(regs::GPIO_STATUS);
        for (id, &trigger) in int_map.iter().enumerate() {
            let id = id as u8;
            if !trigger.is_enabled() || status & regs::bit(id) == 0 {
                continue;
            }
            let Ok(Pin::Standard(pin)) = Pin::resolve(id) else {
                continue;
            };

            pin.set_trigger(&self.bus, InterruptTrigger::Disabled);
            pin.clear_status(&self.bus);
            let level = pin.read(&self.bus);

            let event = OsEvent {
                sig: GpioEvent::new(id, level).encode(),
                par: handler,
            };
            if let Err(err) = self.scheduler.post(GPIO_TASK_PRIORITY, event) {
                log::warn!("gpio{id}: dropped interrupt event: {err:?}");
            }

            pin.set_trigger(&self.bus, trigger);
        }
    }
}

impl<B, L, S> Esp8266Gpio<B, L, S>
where
    B: RegisterBus + 'static,
    L: InterruptLine + 'static,
    S: TaskScheduler<GpioIntrHandler> + 'static,
{
    /// Register the GPIO task and attach the dispatcher to the GPIO
    /// interrupt, delivering events to `handler`.
    ///
    /// Call once, before arming any pin.
    pub fn intr_init(&'static self, handler: GpioIntrHandler) -> Result<(), S::Error> {
        self.scheduler
            .register(GPIO_TASK_PRIORITY, gpio_task, GPIO_TASK_QUEUE_LEN)?;
        self.handler.call_once(|| handler);

        let arg = self as *const Self as *mut c_void;
        // SAFETY: `self` is 'static and `gpio_isr` is instantiated for `Self`.
        unsafe { self.line.attach(gpio_isr::<B, L, S>, arg) };
        Ok(())
    }
}

/// Interrupt entry point attached by [`Esp8266Gpio::intr_init`].
///
/// # Safety
///
/// `arg` must point to a live `Esp8266Gpio<B, L, S>` whose line this
/// handler is attached to.
unsafe extern "C" fn gpio_isr<B, L, S>(arg: *mut c_void)
where
    B: RegisterBus,
    L: InterruptLine,
    S: TaskScheduler<GpioIntrHandler>,
{
    // SAFETY: guaranteed by the caller.
    unsafe {
        let gpio = &*(arg as *const Esp8266Gpio<B, L, S>);
        gpio.dispatch();
    }
}

impl<B, L, S> GpioController for Esp8266Gpio<B, L, S>
where
    B: RegisterBus,
    L: InterruptLine,
    S: TaskScheduler<GpioIntrHandler>,
{
    type Pin = u8;
    type Error = GpioError;

    fn set_mode(&self, pin: u8, mode: PinMode, pull: PullMode) -> Result<(), GpioError> {
        Esp8266Gpio::set_mode(self, pin, mode, pull)
    }

    fn write(&self, pin: u8, level: PinLevel) -> Result<(), GpioError> {
        Esp8266Gpio::write(self, pin, level)
    }

    fn read(&self, pin: u8) -> Result<PinLevel, GpioError> {
        Esp8266Gpio::read(self, pin)
    }
}

impl<B, L, S> GpioInterrupts for Esp8266Gpio<B, L, S>
where
    B: RegisterBus,
    L: InterruptLine,
    S: TaskScheduler<GpioIntrHandler>,
{
    fn set_interrupt(&self, pin: u8, trigger: InterruptTrigger) -> Result<(), GpioError> {
        Esp8266Gpio::set_interrupt(self, pin, trigger)
    }

    fn interrupt_trigger(&self, pin: u8) -> Result<InterruptTrigger, GpioError> {
        Esp8266Gpio::interrupt_trigger(self, pin)
    }
}

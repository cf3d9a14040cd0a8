//! Pin interrupt events and the task-side trampoline.
//!
//! The dispatcher packs `{tag, pin, level}` into the event word so that
//! posting from interrupt context needs no allocation:
//!
//! ```text
//!  31            16 15     8 7      0
//! +----------------+--------+--------+
//! |  GPIO_TASK_SIG |  pin   | level  |
//! +----------------+--------+--------+
//! ```

use crate::hal::gpio::{GpioIntrHandler, PinLevel};
use crate::hal::task::{OsEvent, TaskPriority};

/// Tag identifying GPIO events in the upper half of the event word.
pub const GPIO_TASK_SIG: u32 = 0x123;

/// Priority of the GPIO task.
pub const GPIO_TASK_PRIORITY: TaskPriority = 1;

/// Number of GPIO events the task queue can hold.
pub const GPIO_TASK_QUEUE_LEN: usize = 25;

/// A serviced pin interrupt.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GpioEvent {
    pub pin: u8,
    pub level: PinLevel,
}

impl GpioEvent {
    pub const fn new(pin: u8, level: PinLevel) -> Self {
        Self { pin, level }
    }

    /// Pack into an event word.
    pub const fn encode(self) -> u32 {
        (GPIO_TASK_SIG << 16) | ((self.pin as u32) << 8) | self.level.bit()
    }

    /// Unpack an event word, rejecting words without the GPIO tag.
    pub fn decode(sig: u32) -> Option<Self> {
        if sig >> 16 != GPIO_TASK_SIG {
            return None;
        }
        Some(Self {
            pin: ((sig & 0xffff) >> 8) as u8,
            level: PinLevel::from(sig & 0xff),
        })
    }
}

/// Task entry point registered by `intr_init`.
///
/// Runs in task context, once per posted event, and calls the handler the
/// event carries. Events without the GPIO tag are ignored.
pub fn gpio_task(event: OsEvent<GpioIntrHandler>) {
    match GpioEvent::decode(event.sig) {
        Some(GpioEvent { pin, level }) => (event.par)(pin, level),
        None => log::trace!("gpio task: ignoring foreign event {:#010x}", event.sig),
    }
}

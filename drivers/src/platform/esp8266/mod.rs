//! ESP8266 platform drivers.

pub mod event;
pub mod gpio;
pub mod pin;

#[cfg(target_arch = "xtensa")]
mod ets;
#[cfg(test)]
mod sim;

pub use event::{GPIO_TASK_PRIORITY, GPIO_TASK_QUEUE_LEN, GpioEvent, gpio_task};
pub use gpio::Esp8266Gpio;
pub use pin::{GPIO_PIN_COUNT, RTC_PIN};

use crate::hal::gpio::GpioIntrHandler;
use crate::scheduler::CooperativeScheduler;

/// Scheduler type able to run the GPIO task.
pub type GpioScheduler = CooperativeScheduler<GpioIntrHandler, GPIO_TASK_QUEUE_LEN>;

cfg_if::cfg_if! {
    if #[cfg(target_arch = "xtensa")] {
        pub use ets::EtsGpioLine;

        use super::Platform;
        use crate::hw::mmio::Mmio;

        /// The on-chip GPIO controller.
        pub type Gpio = Esp8266Gpio<Mmio, EtsGpioLine, &'static GpioScheduler>;

        static SCHEDULER: GpioScheduler = GpioScheduler::new();

        // SAFETY: single instances owning the GPIO registers and vector.
        static GPIO: Gpio =
            Esp8266Gpio::new(unsafe { Mmio::new() }, unsafe { EtsGpioLine::new() }, &SCHEDULER);

        pub struct Esp8266Platform;

        impl Platform for Esp8266Platform {
            type Gpio = Gpio;
            type Scheduler = GpioScheduler;

            fn name() -> &'static str {
                "ESP8266"
            }

            fn gpio() -> &'static Gpio {
                &GPIO
            }

            fn scheduler() -> &'static GpioScheduler {
                &SCHEDULER
            }
        }
    }
}

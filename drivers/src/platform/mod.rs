//! Platform Abstraction Layer
//!
//! Each supported chip provides its drivers under its own module and, on
//! its own target, a [`Platform`] implementation exposing the on-chip
//! instances.
//!
//! # Usage
//!
//! ```ignore
//! use drivers::platform::{CurrentPlatform as Chip, Platform};
//! use drivers::hal::gpio::{InterruptTrigger, PinLevel, PinMode, PullMode};
//!
//! fn on_edge(pin: u8, level: PinLevel) { /* task context */ }
//!
//! let gpio = Chip::gpio();
//! gpio.intr_init(on_edge).ok();
//! gpio.set_mode(2, PinMode::Interrupt, PullMode::Up).ok();
//! gpio.set_interrupt(2, InterruptTrigger::RisingEdge).ok();
//! loop {
//!     Chip::scheduler().run_pending();
//! }
//! ```

/// Platform trait - implemented by each supported chip on its target.
pub trait Platform {
    /// On-chip GPIO controller.
    type Gpio: 'static;

    /// Scheduler running deferred driver tasks.
    type Scheduler: 'static;

    /// Platform name for debugging
    fn name() -> &'static str;

    /// The GPIO controller instance.
    fn gpio() -> &'static Self::Gpio;

    /// The scheduler the application's main loop must drive.
    fn scheduler() -> &'static Self::Scheduler;
}

// Platform selection based on Cargo features
cfg_if::cfg_if! {
    if #[cfg(feature = "esp8266")] {
        pub mod esp8266;
        #[cfg(target_arch = "xtensa")]
        pub use esp8266::Esp8266Platform as CurrentPlatform;
    } else {
        compile_error!(
            "No platform selected!\n\
            Use: cargo build --features esp8266"
        );
    }
}

//! Hardware Driver Subsystem
//!
//! This crate provides a layered architecture for hardware abstraction:
//!
//! # Module Organization
//!
//! - [`hal`]: Platform-independent trait definitions
//! - [`hw`]: Register layouts and bus access
//! - [`platform`]: Platform-specific drivers (SoC level)
//! - [`scheduler`]: Cooperative task scheduler for deferred work
//!
//! # Usage Example
//!
//! ```ignore
//! use drivers::hal::gpio::{PinMode, PullMode};
//! use drivers::platform::{CurrentPlatform as Chip, Platform};
//!
//! let gpio = Chip::gpio();
//! gpio.set_mode(2, PinMode::Output, PullMode::Float)?;
//! gpio.write(2, 1u32)?;
//! ```

#![cfg_attr(not(test), no_std)]

pub mod hal;
pub mod hw;
pub mod platform;
pub mod scheduler;

// Re-export commonly used types
pub use hal::gpio::{
    GpioController, GpioError, GpioInterrupts, GpioIntrHandler, InterruptTrigger, PinLevel,
    PinMode, PullMode,
};
pub use hal::interrupt::InterruptLine;
pub use hal::task::{OsEvent, TaskScheduler};
pub use scheduler::{CooperativeScheduler, SchedulerError};

//! GPIO (General Purpose Input/Output) Hardware Abstraction Layer.
//!
//! This module defines platform-independent types and traits for GPIO
//! control and pin-change interrupts.

use core::fmt;

/// Errors reported by GPIO operations.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GpioError {
    /// The pin number has no descriptor on this chip.
    InvalidPin,
    /// A mode, pull or trigger value is not recognized.
    InvalidArgument,
}

impl fmt::Display for GpioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpioError::InvalidPin => f.write_str("invalid pin"),
            GpioError::InvalidArgument => f.write_str("invalid argument"),
        }
    }
}

/// Pin logic level.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PinLevel {
    /// Logic low (0V or ground).
    Low = 0,
    /// Logic high (VDD).
    High = 1,
}

impl PinLevel {
    /// The level as a single bit.
    pub const fn bit(self) -> u32 {
        self as u32
    }
}

impl From<bool> for PinLevel {
    fn from(value: bool) -> Self {
        if value {
            PinLevel::High
        } else {
            PinLevel::Low
        }
    }
}

/// Only bit 0 is significant; every other bit is discarded.
impl From<u32> for PinLevel {
    fn from(value: u32) -> Self {
        PinLevel::from(value & 1 != 0)
    }
}

impl From<PinLevel> for bool {
    fn from(level: PinLevel) -> bool {
        matches!(level, PinLevel::High)
    }
}

/// Internal pull resistor configuration.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PullMode {
    /// No pull resistor (high impedance).
    Float = 0,
    /// Enable internal pull-up resistor.
    Up = 1,
    /// Enable internal pull-down resistor.
    Down = 2,
}

impl TryFrom<u32> for PullMode {
    type Error = GpioError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PullMode::Float),
            1 => Ok(PullMode::Up),
            2 => Ok(PullMode::Down),
            _ => Err(GpioError::InvalidArgument),
        }
    }
}

/// Pin direction and role.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PinMode {
    /// GPIO function selected, direction left as it was.
    InOut = 0,
    /// Input with the output driver disabled.
    Input = 1,
    /// Push-pull output with the pin's interrupt disabled.
    Output = 2,
    /// Input that can raise pin-change interrupts.
    Interrupt = 3,
}

impl TryFrom<u32> for PinMode {
    type Error = GpioError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PinMode::InOut),
            1 => Ok(PinMode::Input),
            2 => Ok(PinMode::Output),
            3 => Ok(PinMode::Interrupt),
            _ => Err(GpioError::InvalidArgument),
        }
    }
}

/// Condition that makes a pin raise an interrupt.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum InterruptTrigger {
    /// The pin never raises an interrupt.
    #[default]
    Disabled = 0,
    /// Low-to-high transition.
    RisingEdge = 1,
    /// High-to-low transition.
    FallingEdge = 2,
    /// Any transition.
    AnyEdge = 3,
    /// While the pin is low.
    LowLevel = 4,
    /// While the pin is high.
    HighLevel = 5,
}

impl InterruptTrigger {
    pub const fn is_enabled(self) -> bool {
        !matches!(self, InterruptTrigger::Disabled)
    }
}

impl TryFrom<u32> for InterruptTrigger {
    type Error = GpioError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(InterruptTrigger::Disabled),
            1 => Ok(InterruptTrigger::RisingEdge),
            2 => Ok(InterruptTrigger::FallingEdge),
            3 => Ok(InterruptTrigger::AnyEdge),
            4 => Ok(InterruptTrigger::LowLevel),
            5 => Ok(InterruptTrigger::HighLevel),
            _ => Err(GpioError::InvalidArgument),
        }
    }
}

/// GPIO controller trait.
///
/// This trait represents a GPIO controller capable of configuring
/// and controlling multiple GPIO pins. Methods take `&self` because the
/// controller is shared with its interrupt handler.
///
/// # Type Parameters
///
/// - `Pin`: Platform-specific pin identifier (typically `u8`)
/// - `Error`: Error type for operations that can fail
pub trait GpioController {
    /// Platform-specific pin identifier.
    type Pin: Copy + Clone;

    /// Error type for GPIO operations.
    type Error: fmt::Debug;

    /// Configure direction and pull resistor of a pin.
    fn set_mode(&self, pin: Self::Pin, mode: PinMode, pull: PullMode)
    -> Result<(), Self::Error>;

    /// Drive a pin to `level`.
    fn write(&self, pin: Self::Pin, level: PinLevel) -> Result<(), Self::Error>;

    /// Read the current logic level of a pin.
    fn read(&self, pin: Self::Pin) -> Result<PinLevel, Self::Error>;

    /// Set a pin to logic high.
    fn set_high(&self, pin: Self::Pin) -> Result<(), Self::Error> {
        self.write(pin, PinLevel::High)
    }

    /// Set a pin to logic low.
    fn set_low(&self, pin: Self::Pin) -> Result<(), Self::Error> {
        self.write(pin, PinLevel::Low)
    }

    /// Toggle the output state of a pin.
    fn toggle(&self, pin: Self::Pin) -> Result<(), Self::Error> {
        let level = self.read(pin)?;
        self.write(
            pin,
            if level == PinLevel::High {
                PinLevel::Low
            } else {
                PinLevel::High
            },
        )
    }
}

/// Handler invoked in task context for every serviced pin interrupt.
pub type GpioIntrHandler = fn(pin: u8, level: PinLevel);

/// Extension trait for GPIO controllers that deliver pin-change interrupts.
pub trait GpioInterrupts: GpioController {
    /// Arm (or disarm, with [`InterruptTrigger::Disabled`]) a pin.
    fn set_interrupt(&self, pin: Self::Pin, trigger: InterruptTrigger)
    -> Result<(), Self::Error>;

    /// The trigger currently recorded for a pin.
    fn interrupt_trigger(&self, pin: Self::Pin) -> Result<InterruptTrigger, Self::Error>;
}

//! Per-pin register sequences.
//!
//! A logical pin number resolves to one of two pin kinds: an ordinary pin
//! configured through its IO mux descriptor and the GPIO block, or GPIO16,
//! which lives in the RTC domain and has its own fixed registers.

use crate::hal::gpio::{GpioError, InterruptTrigger, PinLevel, PinMode, PullMode};
use crate::hal::interrupt::InterruptLine;
use crate::hw::esp8266::gpio::{self as regs, PinConfig};
use crate::hw::esp8266::iomux::{self, PadFlags, PinDescriptor};
use crate::hw::esp8266::rtc;
use crate::hw::mmio::RegisterBus;

/// Number of pins served by the GPIO block.
pub const GPIO_PIN_COUNT: usize = 16;

/// Logical number of the RTC-domain pin.
pub const RTC_PIN: u8 = 16;

/// A validated pin.
#[derive(Debug, Copy, Clone)]
pub enum Pin {
    Standard(StandardPin),
    Rtc(RtcPin),
}

impl Pin {
    /// Resolve a logical pin number.
    pub fn resolve(pin: u8) -> Result<Self, GpioError> {
        if pin == RTC_PIN {
            return Ok(Pin::Rtc(RtcPin));
        }
        iomux::descriptor(pin)
            .map(|desc| Pin::Standard(StandardPin { id: pin, desc }))
            .ok_or(GpioError::InvalidPin)
    }

    pub fn set_mode<B, L>(&self, bus: &B, line: &L, mode: PinMode, pull: PullMode)
    where
        B: RegisterBus,
        L: InterruptLine,
    {
        match self {
            Pin::Standard(pin) => pin.set_mode(bus, line, mode, pull),
            // No pull resistors in the RTC domain.
            Pin::Rtc(pin) => pin.set_mode(bus, mode),
        }
    }

    pub fn write<B: RegisterBus>(&self, bus: &B, level: PinLevel) {
        match self {
            Pin::Standard(pin) => pin.write(bus, level),
            Pin::Rtc(pin) => pin.write(bus, level),
        }
    }

    pub fn read<B: RegisterBus>(&self, bus: &B) -> PinLevel {
        match self {
            Pin::Standard(pin) => pin.read(bus),
            Pin::Rtc(pin) => pin.read(bus),
        }
    }
}

/// A pin of the GPIO block, 0 to 15.
#[derive(Debug, Copy, Clone)]
pub struct StandardPin {
    id: u8,
    desc: &'static PinDescriptor,
}

impl StandardPin {
    pub fn id(&self) -> u8 {
        self.id
    }

    fn set_pull<B: RegisterBus>(&self, bus: &B, pull: PullMode) {
        let mux = self.desc.mux;
        // Clear the opposite bit first so both are never set together.
        match pull {
            PullMode::Up => {
                bus.clear_bits(mux, PadFlags::PULLDOWN.bits());
                bus.set_bits(mux, PadFlags::PULLUP.bits());
            }
            PullMode::Down => {
                bus.clear_bits(mux, PadFlags::PULLUP.bits());
                bus.set_bits(mux, PadFlags::PULLDOWN.bits());
            }
            PullMode::Float => {
                bus.clear_bits(mux, (PadFlags::PULLUP | PadFlags::PULLDOWN).bits());
            }
        }
    }

    fn select_gpio_function<B: RegisterBus>(&self, bus: &B) {
        bus.modify(self.desc.mux, iomux::FUNC_MASK, iomux::func_bits(self.desc.func));
    }

    fn disable_output<B: RegisterBus>(&self, bus: &B) {
        bus.write(regs::GPIO_ENABLE_W1TC, regs::bit(self.id));
    }

    fn set_mode<B, L>(&self, bus: &B, line: &L, mode: PinMode, pull: PullMode)
    where
        B: RegisterBus,
        L: InterruptLine,
    {
        self.set_pull(bus, pull);

        match mode {
            PinMode::InOut => self.select_gpio_function(bus),
            PinMode::Input => {
                self.select_gpio_function(bus);
                self.disable_output(bus);
            }
            PinMode::Output => {
                let _masked = line.masked();
                self.select_gpio_function(bus);
                self.set_trigger(bus, InterruptTrigger::Disabled);
                self.clear_status(bus);
                bus.clear_bits(
                    regs::pin_addr(self.id),
                    PinConfig::PAD_DRIVER_OPEN_DRAIN.bits(),
                );
            }
            PinMode::Interrupt => {
                let _masked = line.masked();
                self.select_gpio_function(bus);
                self.disable_output(bus);
                // GPIO latch as source, push-pull pad, interrupt off until armed.
                bus.modify(
                    regs::pin_addr(self.id),
                    (PinConfig::INT_TYPE
                        | PinConfig::PAD_DRIVER_OPEN_DRAIN
                        | PinConfig::SOURCE_SIGMA)
                        .bits(),
                    regs::int_type(InterruptTrigger::Disabled),
                );
            }
        }
    }

    /// Write the interrupt type field of the pin register.
    pub fn set_trigger<B: RegisterBus>(&self, bus: &B, trigger: InterruptTrigger) {
        bus.modify(
            regs::pin_addr(self.id),
            PinConfig::INT_TYPE.bits(),
            regs::int_type(trigger),
        );
    }

    /// Acknowledge a latched interrupt on this pin.
    pub fn clear_status<B: RegisterBus>(&self, bus: &B) {
        bus.write(regs::GPIO_STATUS_W1TC, regs::bit(self.id));
    }

    /// Drive the pin; this also enables its output driver.
    fn write<B: RegisterBus>(&self, bus: &B, level: PinLevel) {
        let mask = regs::bit(self.id);
        match level {
            PinLevel::High => bus.write(regs::GPIO_OUT_W1TS, mask),
            PinLevel::Low => bus.write(regs::GPIO_OUT_W1TC, mask),
        }
        bus.write(regs::GPIO_ENABLE_W1TS, mask);
    }

    pub fn read<B: RegisterBus>(&self, bus: &B) -> PinLevel {
        PinLevel::from(bus.read(regs::GPIO_IN) >> self.id)
    }
}

/// GPIO16.
#[derive(Debug, Copy, Clone)]
pub struct RtcPin;

impl RtcPin {
    fn route_pad_to_gpio<B: RegisterBus>(&self, bus: &B) {
        bus.modify(
            rtc::PAD_XPD_DCDC_CONF,
            rtc::XPD_DCDC_FUNC_CLEAR,
            rtc::XPD_DCDC_FUNC_GPIO,
        );
        bus.clear_bits(rtc::RTC_GPIO_CONF, rtc::RTC_GPIO_BIT);
    }

    /// Anything but [`PinMode::Input`] configures an output.
    fn set_mode<B: RegisterBus>(&self, bus: &B, mode: PinMode) {
        self.route_pad_to_gpio(bus);
        match mode {
            PinMode::Input => bus.clear_bits(rtc::RTC_GPIO_ENABLE, rtc::RTC_GPIO_BIT),
            PinMode::InOut | PinMode::Output | PinMode::Interrupt => {
                bus.set_bits(rtc::RTC_GPIO_ENABLE, rtc::RTC_GPIO_BIT)
            }
        }
    }

    fn write<B: RegisterBus>(&self, bus: &B, level: PinLevel) {
        bus.modify(rtc::RTC_GPIO_OUT, rtc::RTC_GPIO_BIT, level.bit());
    }

    fn read<B: RegisterBus>(&self, bus: &B) -> PinLevel {
        PinLevel::from(bus.read(rtc::RTC_GPIO_IN_DATA))
    }
}

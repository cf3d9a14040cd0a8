//! IO multiplexer: pad pulls and function selection.

use super::PERIPHS_IO_MUX_BASE;
use bitflags::bitflags;

bitflags! {
    /// Pad control bits of an IO mux register.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PadFlags: u32 {
        /// Pad output enable, left untouched by the GPIO function select.
        const OE = 1 << 0;
        const PULLDOWN = 1 << 6;
        const PULLUP = 1 << 7;
    }
}

/// Function select field: bits 4, 5 and 8 of the mux register.
pub const FUNC_MASK: u32 = 0x13 << FUNC_SHIFT;
const FUNC_SHIFT: u32 = 4;

/// Encode a 3-bit function number into the mux register layout.
///
/// Bits 0..1 of `func` land in bits 4..5, bit 2 lands in bit 8.
#[inline]
pub const fn func_bits(func: u8) -> u32 {
    let func = func as u32;
    (((func & 0b100) << 2) | (func & 0b11)) << FUNC_SHIFT
}

/// Where a GPIO pin's pad is configured and which function makes it a GPIO.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PinDescriptor {
    /// IO mux register address.
    pub mux: u32,
    /// Function number selecting the GPIO matrix.
    pub func: u8,
}

const fn desc(offset: u32, func: u8) -> Option<PinDescriptor> {
    Some(PinDescriptor {
        mux: PERIPHS_IO_MUX_BASE + offset,
        func,
    })
}

/// Descriptors of the ordinary GPIO pins, indexed by pin number.
///
/// Pins 6, 7, 8 and 11 are wired to the SPI flash and are not exposed.
static PIN_DESCRIPTORS: [Option<PinDescriptor>; 16] = [
    desc(0x34, 0), // GPIO0
    desc(0x18, 3), // U0TXD
    desc(0x38, 0), // GPIO2
    desc(0x14, 3), // U0RXD
    desc(0x3c, 0), // GPIO4
    desc(0x40, 0), // GPIO5
    None,
    None,
    None,
    desc(0x28, 3), // SD_DATA2
    desc(0x2c, 3), // SD_DATA3
    None,
    desc(0x04, 3), // MTDI
    desc(0x08, 3), // MTCK
    desc(0x0c, 3), // MTMS
    desc(0x10, 3), // MTDO
];

/// Look up the descriptor of an ordinary pin.
pub fn descriptor(pin: u8) -> Option<&'static PinDescriptor> {
    PIN_DESCRIPTORS.get(pin as usize)?.as_ref()
}

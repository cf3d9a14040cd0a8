//! Raw register layouts and bus access.

pub mod mmio;

#[cfg(feature = "esp8266")]
pub mod esp8266;

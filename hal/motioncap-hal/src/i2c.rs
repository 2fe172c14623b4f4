//! I2C bus configuration
//!
//! The sensor driver talks to the bus through `embedded-hal-async`; boards
//! only need to agree on the clock speed.

/// I2C configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
    /// Transaction timeout in milliseconds
    pub timeout_ms: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self {
        frequency: 100_000,
        timeout_ms: 100,
    };

    /// Fast mode (400 kHz)
    pub const FAST: Self = Self {
        frequency: 400_000,
        timeout_ms: 100,
    };
}

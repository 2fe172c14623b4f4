//! Stream configuration
//!
//! Everything is fixed at compile time; there is no configuration storage
//! on the board.

use crate::smoothing::WINDOW;

/// Delay between sampling cycles
pub const SAMPLE_INTERVAL_MS: u32 = 300;

/// Serial link speed
pub const DEFAULT_BAUDRATE: u32 = 115_200;

/// Sampling stream settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StreamConfig {
    /// Moving-average window (informational, the window is a const generic)
    pub window: usize,
    /// Sleep between cycles in milliseconds
    pub sample_interval_ms: u32,
    /// Serial baud rate
    pub baudrate: u32,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            window: WINDOW,
            sample_interval_ms: SAMPLE_INTERVAL_MS,
            baudrate: DEFAULT_BAUDRATE,
        }
    }
}

impl StreamConfig {
    /// Records per second produced at this interval, ignoring sensor time
    pub fn nominal_rate_hz(&self) -> u32 {
        if self.sample_interval_ms == 0 {
            return 0;
        }
        1000 / self.sample_interval_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StreamConfig::default();
        assert_eq!(config.window, 2);
        assert_eq!(config.sample_interval_ms, 300);
        assert_eq!(config.baudrate, 115_200);
        assert_eq!(config.nominal_rate_hz(), 3);
    }

    #[test]
    fn test_zero_interval_rate() {
        let config = StreamConfig {
            sample_interval_ms: 0,
            ..StreamConfig::default()
        };
        assert_eq!(config.nominal_rate_hz(), 0);
    }
}

//! I2C bus configuration for STM32F0
//!
//! The LSM303AGR driver uses embassy's async I2C directly through
//! `embedded-hal-async`, and bus failures surface as sensor errors. This
//! module only bridges the board-neutral bus settings.

use embassy_stm32::i2c;
use embassy_stm32::time::Hertz;
use embassy_time::Duration;
use motioncap_hal::i2c::I2cConfig;

/// Translate a board-neutral I2C config into the embassy one
pub fn embassy_i2c_config(config: &I2cConfig) -> i2c::Config {
    let mut out = i2c::Config::default();
    out.frequency = Hertz(config.frequency);
    out.timeout = Duration::from_millis(config.timeout_ms as u64);
    out
}

//! GPIO abstractions for STM32F0
//!
//! Button inputs backed by embassy-stm32 pins.

use embassy_stm32::gpio::{Input, Pin, Pull};
use embassy_stm32::Peri;
use motioncap_hal::gpio::{ActiveLevel, InputPin};

/// A push button on a GPIO input
pub struct Button<'d> {
    input: Input<'d>,
    level: ActiveLevel,
}

impl<'d> Button<'d> {
    /// Button wired to ground, using the internal pull-up
    pub fn active_low(pin: Peri<'d, impl Pin>) -> Self {
        Self {
            input: Input::new(pin, Pull::Up),
            level: ActiveLevel::Low,
        }
    }

    /// Button wired to VCC, using the internal pull-down
    pub fn active_high(pin: Peri<'d, impl Pin>) -> Self {
        Self {
            input: Input::new(pin, Pull::Down),
            level: ActiveLevel::High,
        }
    }
}

impl InputPin for Button<'_> {
    fn is_high(&self) -> bool {
        self.input.is_high()
    }

    fn active_level(&self) -> ActiveLevel {
        self.level
    }
}

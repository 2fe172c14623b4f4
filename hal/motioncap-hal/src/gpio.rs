//! GPIO pin abstractions
//!
//! Buttons are the only digital inputs on the board. Wiring differs between
//! boards (pull-up to ground vs. pull-down to VCC), so the pressed level is
//! part of the pin description rather than the application.

/// Electrical level that means "active" (pressed) for an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    /// Pressed pulls the pin low (pull-up wiring)
    Low,
    /// Pressed drives the pin high (pull-down wiring)
    High,
}

impl ActiveLevel {
    /// Translate a raw pin level into an active/inactive flag
    pub fn is_active(self, pin_high: bool) -> bool {
        match self {
            ActiveLevel::Low => !pin_high,
            ActiveLevel::High => pin_high,
        }
    }
}

/// Digital input pin
///
/// Implementations should handle the actual hardware register reading
/// for the specific chip.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }

    /// Level that counts as pressed for this pin
    fn active_level(&self) -> ActiveLevel {
        ActiveLevel::Low
    }

    /// Check if the input is currently active (button pressed)
    fn is_active(&self) -> bool {
        self.active_level().is_active(self.is_high())
    }
}

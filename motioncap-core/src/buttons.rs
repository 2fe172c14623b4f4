//! Button state and calibration gestures
//!
//! - Button A held while the board starts: discard compass calibration
//! - Buttons A and B held together during streaming: run compass calibration
//!
//! Both button levels are also streamed in every record.

use motioncap_hal::gpio::InputPin;

/// Snapshot of both buttons
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonState {
    /// Button A pressed
    pub a: bool,
    /// Button B pressed
    pub b: bool,
}

/// What to do once at start-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootAction {
    /// Start streaming with the current calibration
    None,
    /// Reset compass calibration before streaming
    ClearCalibration,
}

/// What to do at the start of a sampling cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleAction {
    /// Sample and stream
    Sample,
    /// Calibrate the compass, then sample and stream
    Calibrate,
}

impl ButtonState {
    pub const fn new(a: bool, b: bool) -> Self {
        Self { a, b }
    }

    /// Read both buttons
    pub fn read<A: InputPin, B: InputPin>(a: &A, b: &B) -> Self {
        Self {
            a: a.is_active(),
            b: b.is_active(),
        }
    }

    /// Stream flags, `1` for pressed
    pub fn as_flags(&self) -> (u8, u8) {
        (self.a as u8, self.b as u8)
    }

    /// Start-up decision
    pub fn boot_action(&self) -> BootAction {
        if self.a {
            BootAction::ClearCalibration
        } else {
            BootAction::None
        }
    }

    /// Per-cycle decision
    pub fn cycle_action(&self) -> CycleAction {
        if self.a && self.b {
            CycleAction::Calibrate
        } else {
            CycleAction::Sample
        }
    }
}

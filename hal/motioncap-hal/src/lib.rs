//! MotionCap Hardware Abstraction Layer
//!
//! This crate defines the small set of hardware traits the sampling loop
//! needs from a board: digital inputs for the two buttons and a serial
//! transmitter for the record stream. Chip-specific crates implement them.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  Application (motioncap-firmware)        │
//! └──────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌──────────────────────────────────────────┐
//! │  motioncap-hal (this crate - traits)     │
//! └──────────────────────────────────────────┘
//!                     │
//!                     ▼
//!          ┌───────────────────────┐
//!          │ motioncap-hal-stm32f0 │
//!          └───────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputPin`] - Digital input (buttons)
//! - [`uart::UartTx`] - Serial transmit
//!
//! Sensor buses use `embedded-hal-async` directly; [`i2c::I2cConfig`] only
//! carries the bus settings.

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod i2c;
pub mod uart;

pub use gpio::{ActiveLevel, InputPin};
pub use i2c::I2cConfig;
pub use uart::{UartConfig, UartTx};

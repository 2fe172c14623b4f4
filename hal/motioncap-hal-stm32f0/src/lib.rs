//! STM32F0-specific HAL for the MotionCap firmware
//!
//! This crate provides STM32F0 implementations of the `motioncap-hal`
//! traits on top of `embassy-stm32`:
//!
//! - STM32F042K6 (Nucleo-32 style boards)
//! - STM32F042F6
//!
//! # Features
//!
//! - `stm32f042k6` / `stm32f042f6` - Select the chip
//! - `defmt` - Enable debug formatting support
//!
//! # Usage
//!
//! The firmware creates the embassy peripherals itself and wraps them here
//! so the sampling loop only sees `motioncap-hal` traits.

#![no_std]

pub mod gpio;
pub mod i2c;
pub mod uart;

pub use gpio::Button;
pub use i2c::embassy_i2c_config;
pub use uart::{embassy_uart_config, SerialTx, UartBusError};

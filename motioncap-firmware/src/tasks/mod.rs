//! Firmware loops
//!
//! The firmware has a single loop, run directly from `main`.

pub mod stream;

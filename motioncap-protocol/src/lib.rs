//! MotionCap serial record format
//!
//! The board streams one text record per sampling cycle over a plain UART
//! link. There is no framing byte, length or checksum; records are simply
//! terminated by a colon:
//!
//! ```text
//! accel_x,accel_y,mag_ns,mag_we,heading,button_a,button_b:
//! ```
//!
//! For example `-112,36,-2850,14250,187,0,1:`.
//!
//! - `accel_x`, `accel_y` - smoothed acceleration in milli-g
//! - `mag_ns`, `mag_we` - smoothed magnetic field in nanotesla
//! - `heading` - smoothed compass bearing in degrees
//! - `button_a`, `button_b` - `1` while pressed, `0` otherwise
//!
//! The encoder runs on the board; [`Report::parse`], [`RecordSplitter`] and
//! the [`heading`] helpers are used by host-side receivers.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod heading;
pub mod record;
pub mod splitter;

pub use heading::{Degrees, HeadingZones, Zone, ZoneError};
pub use record::{Field, Report, ReportError, FIELD_COUNT, MAX_RECORD_LEN, RECORD_TERMINATOR};
pub use splitter::{RecordSplitter, SplitError};

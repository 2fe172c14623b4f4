//! Host-side heading interpretation.
//!
//! Headings arrive as whole degrees, clockwise from magnetic north. A
//! receiver steering something from the board's bearing picks a centre
//! heading, a dead band around it and an outer limit, then classifies each
//! record into a zone:
//!
//! ```text
//!        limit      band   centre   band      limit
//!   ------|----------|-------+-------|----------|------
//!   none  |   Min    |      Mid      |   Max    | none
//! ```
//!
//! All arithmetic wraps at 360, so a zone may straddle north.

/// Degrees in a full turn
pub const FULL_TURN: i32 = 360;

/// A compass bearing normalised to `0..360`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Degrees(u16);

impl Degrees {
    /// Normalise any integer angle
    pub const fn new(degrees: i32) -> Self {
        Self(degrees.rem_euclid(FULL_TURN) as u16)
    }

    /// Value in `0..360`
    pub const fn get(self) -> i32 {
        self.0 as i32
    }

    /// Turn clockwise by `degrees` (negative turns anticlockwise)
    pub const fn turn_clockwise(self, degrees: i32) -> Self {
        Self::new(self.get() + degrees.rem_euclid(FULL_TURN))
    }

    /// Turn anticlockwise by `degrees`
    pub const fn turn_anticlockwise(self, degrees: i32) -> Self {
        Self::new(self.get() - degrees.rem_euclid(FULL_TURN))
    }

    /// Clockwise turn from `self` to `other`, in `0..360`
    pub const fn clockwise_to(self, other: Degrees) -> i32 {
        (other.get() - self.get()).rem_euclid(FULL_TURN)
    }

    /// Anticlockwise turn from `self` to `other`, in `0..360`
    pub const fn anticlockwise_to(self, other: Degrees) -> i32 {
        (self.get() - other.get()).rem_euclid(FULL_TURN)
    }

    /// Shortest signed turn from `self` to `other`
    ///
    /// Positive is clockwise. Result is in `-179..=180`.
    pub const fn offset_to(self, other: Degrees) -> i32 {
        let cw = self.clockwise_to(other);
        if cw > FULL_TURN / 2 {
            cw - FULL_TURN
        } else {
            cw
        }
    }
}

impl From<i32> for Degrees {
    fn from(degrees: i32) -> Self {
        Self::new(degrees)
    }
}

/// Where a heading falls relative to the centre
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Zone {
    /// Anticlockwise of the dead band, within the limit
    Min,
    /// Inside the dead band (edges included)
    Mid,
    /// Clockwise of the dead band, within the limit
    Max,
}

/// Invalid zone layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ZoneError {
    /// The dead band is wider than the limit
    BandExceedsLimit,
    /// The limit reaches past the opposite bearing, so the sides overlap
    LimitTooWide,
}

/// Classifies headings around a centre bearing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HeadingZones {
    centre: Degrees,
    band: i32,
    limit: i32,
}

impl HeadingZones {
    /// Build a layout from a centre, a half-width dead band and a
    /// half-width outer limit
    pub fn new(centre: Degrees, band: u16, limit: u16) -> Result<Self, ZoneError> {
        if band > limit {
            return Err(ZoneError::BandExceedsLimit);
        }
        if limit as i32 >= FULL_TURN / 2 {
            return Err(ZoneError::LimitTooWide);
        }
        Ok(Self {
            centre,
            band: band as i32,
            limit: limit as i32,
        })
    }

    pub fn centre(&self) -> Degrees {
        self.centre
    }

    /// Anticlockwise edge of the dead band
    pub fn band_min(&self) -> Degrees {
        self.centre.turn_anticlockwise(self.band)
    }

    /// Clockwise edge of the dead band
    pub fn band_max(&self) -> Degrees {
        self.centre.turn_clockwise(self.band)
    }

    /// Anticlockwise limit
    pub fn limit_min(&self) -> Degrees {
        self.centre.turn_anticlockwise(self.limit)
    }

    /// Clockwise limit
    pub fn limit_max(&self) -> Degrees {
        self.centre.turn_clockwise(self.limit)
    }

    /// Zone of `heading`, or `None` beyond the limits
    pub fn classify(&self, heading: impl Into<Degrees>) -> Option<Zone> {
        let offset = self.centre.offset_to(heading.into());
        let distance = offset.abs();
        if distance <= self.band {
            Some(Zone::Mid)
        } else if distance > self.limit {
            None
        } else if offset < 0 {
            Some(Zone::Min)
        } else {
            Some(Zone::Max)
        }
    }
}

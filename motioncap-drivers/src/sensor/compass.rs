//! Compass math
//!
//! Hard-iron calibration removes the constant field offset caused by
//! magnetised parts near the sensor. It is estimated from the extremes seen
//! while the board is rotated through every orientation. Soft-iron
//! (scaling) distortion is not corrected.

use micromath::F32Ext;
use motioncap_core::sample::Axes;

/// Minimum X/Y field span (nT) for a calibration to be accepted
///
/// A horizontal sweep through the earth's field (25-65 µT) gives roughly
/// twice the horizontal component; 8 µT rejects a board that was not moved.
pub const MIN_CALIBRATION_SPAN_NT: i32 = 8_000;

/// Running min/max tracker for hard-iron offset estimation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HardIronCalibration {
    min: Axes,
    max: Axes,
    samples: u32,
}

impl Default for HardIronCalibration {
    fn default() -> Self {
        Self::new()
    }
}

impl HardIronCalibration {
    /// Start an empty calibration
    pub const fn new() -> Self {
        Self {
            min: Axes::new(i32::MAX, i32::MAX, i32::MAX),
            max: Axes::new(i32::MIN, i32::MIN, i32::MIN),
            samples: 0,
        }
    }

    /// Add a raw magnetometer sample
    pub fn update(&mut self, field: Axes) {
        self.min.x = self.min.x.min(field.x);
        self.min.y = self.min.y.min(field.y);
        self.min.z = self.min.z.min(field.z);
        self.max.x = self.max.x.max(field.x);
        self.max.y = self.max.y.max(field.y);
        self.max.z = self.max.z.max(field.z);
        self.samples = self.samples.saturating_add(1);
    }

    /// Number of samples seen
    pub fn samples(&self) -> u32 {
        self.samples
    }

    /// Per-axis difference between the largest and smallest sample
    pub fn span(&self) -> Axes {
        if self.samples == 0 {
            return Axes::default();
        }
        Axes::new(
            self.max.x.saturating_sub(self.min.x),
            self.max.y.saturating_sub(self.min.y),
            self.max.z.saturating_sub(self.min.z),
        )
    }

    /// Check whether the sweep covered enough of the horizontal plane
    pub fn is_valid(&self) -> bool {
        let span = self.span();
        span.x >= MIN_CALIBRATION_SPAN_NT && span.y >= MIN_CALIBRATION_SPAN_NT
    }

    /// Estimated hard-iron offset (midpoint of each axis)
    pub fn offset(&self) -> Axes {
        if self.samples == 0 {
            return Axes::default();
        }
        Axes::new(
            midpoint(self.min.x, self.max.x),
            midpoint(self.min.y, self.max.y),
            midpoint(self.min.z, self.max.z),
        )
    }
}

fn midpoint(a: i32, b: i32) -> i32 {
    ((a as i64 + b as i64) / 2) as i32
}

/// Compass bearing in whole degrees (0-359)
///
/// `field` is the calibrated magnetometer reading and `accel` the
/// accelerometer reading in the same board frame. Pitch and roll from the
/// accelerometer project the field back onto the horizontal plane. With no
/// usable gravity vector (free fall) the board is assumed to be flat.
pub fn heading_degrees(field: Axes, accel: Axes) -> i32 {
    let (mx, my, mz) = (field.x as f32, field.y as f32, field.z as f32);
    let (ax, ay, az) = (accel.x as f32, accel.y as f32, accel.z as f32);

    let (bx, by) = if ax == 0.0 && ay == 0.0 && az == 0.0 {
        (mx, -my)
    } else {
        let roll = ay.atan2(az);
        let (sin_roll, cos_roll) = (roll.sin(), roll.cos());
        let pitch = (-ax).atan2(ay * sin_roll + az * cos_roll);
        let (sin_pitch, cos_pitch) = (pitch.sin(), pitch.cos());

        let bx = mx * cos_pitch + my * sin_pitch * sin_roll + mz * sin_pitch * cos_roll;
        let by = mz * sin_roll - my * cos_roll;
        (bx, by)
    };

    let degrees = by.atan2(bx).to_degrees();
    (degrees.floor() as i32).rem_euclid(360)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Angular distance on the circle
    fn circular_diff(a: i32, b: i32) -> i32 {
        let d = (a - b).rem_euclid(360);
        d.min(360 - d)
    }

    const FLAT: Axes = Axes::new(0, 0, 1000);

    #[test]
    fn test_flat_cardinal_directions() {
        assert!(circular_diff(heading_degrees(Axes::new(20_000, 0, -40_000), FLAT), 0) <= 1);
        assert!(circular_diff(heading_degrees(Axes::new(0, -20_000, -40_000), FLAT), 90) <= 1);
        assert!(circular_diff(heading_degrees(Axes::new(-20_000, 0, -40_000), FLAT), 180) <= 1);
        assert!(circular_diff(heading_degrees(Axes::new(0, 20_000, -40_000), FLAT), 270) <= 1);
    }

    #[test]
    fn test_heading_always_in_range() {
        for &(x, y) in &[(1, 0), (1, -1), (-1, -1), (-1, 1), (0, 1), (1, 1)] {
            let h = heading_degrees(Axes::new(x * 15_000, y * 15_000, 0), FLAT);
            assert!((0..360).contains(&h), "heading {} out of range", h);
        }
    }

    #[test]
    fn test_free_fall_uses_planar_bearing() {
        let h = heading_degrees(Axes::new(0, -20_000, 0), Axes::default());
        assert!(circular_diff(h, 90) <= 1);
    }

    #[test]
    fn test_tilt_compensation_ignores_vertical_field_when_rolled() {
        // Board rolled 90° onto its side: gravity along +Y, the earth's
        // vertical field component now shows up on the Y axis and must not
        // swing the bearing away from north.
        let rolled = Axes::new(0, 1000, 0);
        let h = heading_degrees(Axes::new(20_000, -40_000, 0), rolled);
        assert!(circular_diff(h, 0) <= 2, "heading {}", h);
    }

    #[test]
    fn test_calibration_offset_is_midpoint() {
        let mut cal = HardIronCalibration::new();
        cal.update(Axes::new(-10_000, 2_000, 500));
        cal.update(Axes::new(30_000, -18_000, 1_500));
        cal.update(Axes::new(10_000, -8_000, 1_000));

        assert_eq!(cal.samples(), 3);
        assert_eq!(cal.offset(), Axes::new(10_000, -8_000, 1_000));
        assert_eq!(cal.span(), Axes::new(40_000, 20_000, 1_000));
        assert!(cal.is_valid());
    }

    #[test]
    fn test_calibration_needs_movement() {
        let mut cal = HardIronCalibration::new();
        for _ in 0..50 {
            cal.update(Axes::new(12_000, -3_000, 40_000));
        }
        assert!(!cal.is_valid());
        assert_eq!(cal.span(), Axes::default());
    }

    #[test]
    fn test_empty_calibration() {
        let cal = HardIronCalibration::new();
        assert_eq!(cal.offset(), Axes::default());
        assert_eq!(cal.span(), Axes::default());
        assert!(!cal.is_valid());
    }
}

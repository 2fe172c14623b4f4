//! Sampling cycle
//!
//! One cycle reads the buttons (done by the caller), optionally calibrates
//! the compass, reads every channel, smooths it and produces the record
//! to stream. The caller owns timing and the serial port.

use motioncap_protocol::Report;

use crate::buttons::{BootAction, ButtonState, CycleAction};
use crate::sample::RawSample;
use crate::smoothing::{ChannelSmoother, WINDOW};
use crate::traits::{Compass, MotionSensor, SensorError};

/// Result of one sampling cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cycle {
    /// Record to stream
    pub report: Report,
    /// Outcome of the calibration run, if the gesture requested one
    pub calibration: Option<Result<(), SensorError>>,
}

/// Smooths samples and builds stream records
#[derive(Debug, Clone, Default)]
pub struct Sampler<const N: usize = WINDOW> {
    smoother: ChannelSmoother<N>,
    cycles: u32,
}

impl<const N: usize> Sampler<N> {
    /// Create a sampler with empty ring buffers
    pub const fn new() -> Self {
        Self {
            smoother: ChannelSmoother::new(),
            cycles: 0,
        }
    }

    /// Apply the start-up button gesture
    pub fn boot<C: Compass>(compass: &mut C, buttons: ButtonState) -> BootAction {
        let action = buttons.boot_action();
        if action == BootAction::ClearCalibration {
            compass.clear_calibration();
        }
        action
    }

    /// Smooth a raw sample and build the record for it
    pub fn record(&mut self, raw: RawSample, buttons: ButtonState) -> Report {
        let smoothed = self.smoother.push(raw);
        self.cycles = self.cycles.wrapping_add(1);

        Report {
            accel_x: smoothed.accel_x,
            accel_y: smoothed.accel_y,
            mag_ns: smoothed.mag_x,
            mag_we: smoothed.mag_y,
            heading: smoothed.heading,
            button_a: buttons.a,
            button_b: buttons.b,
        }
    }

    /// Run one full cycle against a sensor
    ///
    /// `buttons` is the state sampled at the start of the cycle; it is both
    /// the calibration trigger and what the record reports. A failed read
    /// leaves the ring buffers untouched.
    pub async fn run_cycle<S: MotionSensor>(
        &mut self,
        sensor: &mut S,
        buttons: ButtonState,
    ) -> Result<Cycle, SensorError> {
        let calibration = match buttons.cycle_action() {
            CycleAction::Calibrate => Some(sensor.calibrate().await),
            CycleAction::Sample => None,
        };

        let accel = sensor.read_acceleration().await?;
        let field = sensor.read_field().await?;
        let heading = sensor.heading_degrees().await?;

        let raw = RawSample {
            accel_x: accel.x,
            accel_y: accel.y,
            mag_x: field.x,
            mag_y: field.y,
            heading,
        };

        Ok(Cycle {
            report: self.record(raw, buttons),
            calibration,
        })
    }

    /// Number of records produced so far (wraps)
    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    /// Forget all buffered samples
    pub fn reset(&mut self) {
        self.smoother.clear();
        self.cycles = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::Axes;
    use crate::traits::Accelerometer;
    use embassy_futures::block_on;

    #[derive(Default)]
    struct MockSensor {
        accel: Axes,
        field: Axes,
        heading: i32,
        calibrated: bool,
        calibrations: u32,
        fail_calibration: bool,
        fail_field: bool,
        // Order in which the sensor was touched
        reads: Vec<&'static str>,
    }

    impl Accelerometer for MockSensor {
        async fn read_acceleration(&mut self) -> Result<Axes, SensorError> {
            self.reads.push("accel");
            Ok(self.accel)
        }
    }

    impl Compass for MockSensor {
        async fn read_field(&mut self) -> Result<Axes, SensorError> {
            self.reads.push("field");
            if self.fail_field {
                return Err(SensorError::Bus);
            }
            Ok(self.field)
        }

        async fn heading_degrees(&mut self) -> Result<i32, SensorError> {
            self.reads.push("heading");
            Ok(self.heading)
        }

        async fn calibrate(&mut self) -> Result<(), SensorError> {
            self.reads.push("calibrate");
            self.calibrations += 1;
            if self.fail_calibration {
                return Err(SensorError::NotCalibrated);
            }
            self.calibrated = true;
            Ok(())
        }

        fn clear_calibration(&mut self) {
            self.calibrated = false;
        }

        fn is_calibrated(&self) -> bool {
            self.calibrated
        }
    }

    fn sensor() -> MockSensor {
        MockSensor {
            accel: Axes::new(200, -400, 1000),
            field: Axes::new(-3000, 12000, 500),
            heading: 100,
            calibrated: true,
            ..MockSensor::default()
        }
    }

    #[test]
    fn test_record_maps_channels() {
        let mut sampler = Sampler::<1>::new();
        let report = sampler.record(
            RawSample {
                accel_x: 1,
                accel_y: 2,
                mag_x: 3,
                mag_y: 4,
                heading: 5,
            },
            ButtonState::new(false, true),
        );
        assert_eq!(
            report,
            Report {
                accel_x: 1,
                accel_y: 2,
                mag_ns: 3,
                mag_we: 4,
                heading: 5,
                button_a: false,
                button_b: true,
            }
        );
        assert_eq!(sampler.cycles(), 1);
    }

    #[test]
    fn test_cycle_reads_in_order_and_smooths() {
        let mut sensor = sensor();
        let mut sampler = Sampler::<2>::new();

        let first = block_on(sampler.run_cycle(&mut sensor, ButtonState::default())).unwrap();
        assert_eq!(sensor.reads, ["accel", "field", "heading"]);
        assert_eq!(first.calibration, None);
        assert_eq!(first.report.encode().unwrap().as_str(), "100,-200,-1500,6000,50,0,0:");

        let second = block_on(sampler.run_cycle(&mut sensor, ButtonState::default())).unwrap();
        assert_eq!(
            second.report.encode().unwrap().as_str(),
            "200,-400,-3000,12000,100,0,0:"
        );
    }

    #[test]
    fn test_both_buttons_calibrate_before_sampling() {
        let mut sensor = sensor();
        sensor.calibrated = false;
        let mut sampler = Sampler::<2>::new();

        let cycle = block_on(sampler.run_cycle(&mut sensor, ButtonState::new(true, true))).unwrap();
        assert_eq!(cycle.calibration, Some(Ok(())));
        assert_eq!(sensor.reads[0], "calibrate");
        assert!(sensor.is_calibrated());
        assert!(cycle.report.button_a && cycle.report.button_b);
    }

    #[test]
    fn test_failed_calibration_still_streams() {
        let mut sensor = sensor();
        sensor.fail_calibration = true;
        let mut sampler = Sampler::<2>::new();

        let cycle = block_on(sampler.run_cycle(&mut sensor, ButtonState::new(true, true))).unwrap();
        assert_eq!(cycle.calibration, Some(Err(SensorError::NotCalibrated)));
        assert_eq!(cycle.report.accel_x, 100);
    }

    #[test]
    fn test_single_button_does_not_calibrate() {
        let mut sensor = sensor();
        let mut sampler = Sampler::<2>::new();

        block_on(sampler.run_cycle(&mut sensor, ButtonState::new(true, false))).unwrap();
        block_on(sampler.run_cycle(&mut sensor, ButtonState::new(false, true))).unwrap();
        assert_eq!(sensor.calibrations, 0);
    }

    #[test]
    fn test_failed_read_leaves_buffers_untouched() {
        let mut sensor = sensor();
        let mut sampler = Sampler::<2>::new();

        block_on(sampler.run_cycle(&mut sensor, ButtonState::default())).unwrap();

        sensor.fail_field = true;
        let err = block_on(sampler.run_cycle(&mut sensor, ButtonState::default()));
        assert_eq!(err, Err(SensorError::Bus));
        assert_eq!(sampler.cycles(), 1);

        sensor.fail_field = false;
        let cycle = block_on(sampler.run_cycle(&mut sensor, ButtonState::default())).unwrap();
        assert_eq!(cycle.report.accel_x, 200);
    }

    #[test]
    fn test_boot_clears_calibration_when_a_held() {
        let mut sensor = sensor();
        assert_eq!(
            Sampler::<2>::boot(&mut sensor, ButtonState::new(false, false)),
            BootAction::None
        );
        assert!(sensor.is_calibrated());

        assert_eq!(
            Sampler::<2>::boot(&mut sensor, ButtonState::new(true, false)),
            BootAction::ClearCalibration
        );
        assert!(!sensor.is_calibrated());
    }

    #[test]
    fn test_reset_restarts_warm_up() {
        let mut sensor = sensor();
        let mut sampler = Sampler::<2>::new();
        block_on(sampler.run_cycle(&mut sensor, ButtonState::default())).unwrap();
        block_on(sampler.run_cycle(&mut sensor, ButtonState::default())).unwrap();

        sampler.reset();
        let cycle = block_on(sampler.run_cycle(&mut sensor, ButtonState::default())).unwrap();
        assert_eq!(cycle.report.accel_x, 100);
        assert_eq!(sampler.cycles(), 1);
    }
}

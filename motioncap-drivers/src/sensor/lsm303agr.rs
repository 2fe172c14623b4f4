//! LSM303AGR accelerometer + magnetometer driver
//!
//! Adapter over the `lsm303agr` crate's async interface. The package holds
//! two devices on one I2C bus:
//!
//! - Accelerometer, 50 Hz normal mode, ±2 g
//! - Magnetometer, 20 Hz continuous high-resolution mode
//!
//! Reading an output register clears that device's data-ready flag until
//! the next conversion, so a sampling cycle reads each device once and the
//! heading is computed from those same values.

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;
use lsm303agr::interface::I2cInterface;
use lsm303agr::mode::{MagContinuous, MagOneShot};
use lsm303agr::{AccelMode, AccelOutputDataRate, AccelScale, MagMode, MagOutputDataRate};

use motioncap_core::sample::Axes;
use motioncap_core::traits::{Accelerometer, Compass, SensorError};

use super::compass::{heading_degrees, HardIronCalibration};

/// Samples collected by [`Compass::calibrate`]
pub const CALIBRATION_SAMPLES: u32 = 100;
/// Delay between calibration samples (matches the 20 Hz magnetometer rate)
pub const CALIBRATION_INTERVAL_MS: u32 = 50;

/// Delay between data-ready polls
const READY_POLL_INTERVAL_US: u32 = 1000;
/// Accelerometer conversion period at 50 Hz
const ACCEL_PERIOD_US: u32 = 20_000;
/// Magnetometer conversion period at 20 Hz
const MAG_PERIOD_US: u32 = 50_000;

/// Polls covering two conversion periods
const fn ready_polls(period_us: u32) -> u32 {
    2 * period_us / READY_POLL_INTERVAL_US
}

type Idle<I2C> = lsm303agr::Lsm303agr<I2cInterface<I2C>, MagOneShot>;
type Streaming<I2C> = lsm303agr::Lsm303agr<I2cInterface<I2C>, MagContinuous>;

enum Device<I2C> {
    /// Constructed, not yet configured
    Idle(Idle<I2C>),
    /// Configured, magnetometer converting continuously
    Streaming(Streaming<I2C>),
    /// Mode change in flight
    Switching,
}

fn bus<E>(_: lsm303agr::Error<E>) -> SensorError {
    SensorError::Bus
}

/// LSM303AGR driver
pub struct Lsm303agr<I2C, D> {
    device: Device<I2C>,
    delay: D,
    /// Hard-iron offset subtracted from every magnetometer sample
    offset: Option<Axes>,
    /// Last acceleration read this cycle, consumed by the heading
    last_accel: Option<Axes>,
    /// Last raw field read this cycle, consumed by the heading
    last_field: Option<Axes>,
}

impl<I2C, D> Lsm303agr<I2C, D>
where
    I2C: I2c,
    D: DelayNs + embedded_hal::delay::DelayNs,
{
    /// Create a new driver; call [`init`](Self::init) before reading
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self {
            device: Device::Idle(lsm303agr::Lsm303agr::new_with_i2c(i2c)),
            delay,
            offset: None,
            last_accel: None,
            last_field: None,
        }
    }

    /// Verify both device identities, configure them and start the
    /// magnetometer
    ///
    /// Safe to call again after a failure; a running sensor is left alone.
    pub async fn init(&mut self) -> Result<(), SensorError> {
        match core::mem::replace(&mut self.device, Device::Switching) {
            Device::Idle(mut dev) => {
                if let Err(e) = configure(&mut dev, &mut self.delay).await {
                    self.device = Device::Idle(dev);
                    return Err(e);
                }
                match dev.into_mag_continuous().await {
                    Ok(dev) => {
                        self.device = Device::Streaming(dev);
                        Ok(())
                    }
                    Err(e) => {
                        self.device = Device::Idle(e.dev);
                        Err(SensorError::Bus)
                    }
                }
            }
            Device::Streaming(dev) => {
                self.device = Device::Streaming(dev);
                Ok(())
            }
            Device::Switching => Err(SensorError::Bus),
        }
    }

    /// Check whether [`init`](Self::init) has completed
    pub fn is_streaming(&self) -> bool {
        matches!(self.device, Device::Streaming(_))
    }

    /// Read acceleration in milli-g, waiting for a fresh conversion
    pub async fn read_accel_mg(&mut self) -> Result<Axes, SensorError> {
        let Device::Streaming(dev) = &mut self.device else {
            return Err(SensorError::NotReady);
        };

        let mut polls = 0;
        while !dev.accel_status().await.map_err(bus)?.xyz_new_data() {
            polls += 1;
            if polls > ready_polls(ACCEL_PERIOD_US) {
                return Err(SensorError::NotReady);
            }
            DelayNs::delay_us(&mut self.delay, READY_POLL_INTERVAL_US).await;
        }

        let accel = dev.acceleration().await.map_err(bus)?;
        Ok(Axes::new(accel.x_mg(), accel.y_mg(), accel.z_mg()))
    }

    /// Read the uncalibrated magnetic field in nanotesla, waiting for a
    /// fresh conversion
    pub async fn read_mag_raw(&mut self) -> Result<Axes, SensorError> {
        let Device::Streaming(dev) = &mut self.device else {
            return Err(SensorError::NotReady);
        };

        let mut polls = 0;
        while !dev.mag_status().await.map_err(bus)?.xyz_new_data() {
            polls += 1;
            if polls > ready_polls(MAG_PERIOD_US) {
                return Err(SensorError::NotReady);
            }
            DelayNs::delay_us(&mut self.delay, READY_POLL_INTERVAL_US).await;
        }

        let field = dev.magnetic_field().await.map_err(bus)?;
        Ok(Axes::new(field.x_nt(), field.y_nt(), field.z_nt()))
    }

    /// Current hard-iron offset, if calibrated
    pub fn offset(&self) -> Option<Axes> {
        self.offset
    }

    /// Install a previously computed hard-iron offset
    pub fn set_offset(&mut self, offset: Axes) {
        self.offset = Some(offset);
    }

    fn apply_offset(&self, raw: Axes) -> Axes {
        match self.offset {
            Some(offset) => Axes::new(
                raw.x.saturating_sub(offset.x),
                raw.y.saturating_sub(offset.y),
                raw.z.saturating_sub(offset.z),
            ),
            None => raw,
        }
    }
}

async fn configure<I2C: I2c, D: DelayNs + embedded_hal::delay::DelayNs>(
    dev: &mut Idle<I2C>,
    delay: &mut D,
) -> Result<(), SensorError> {
    if !dev.accelerometer_id().await.map_err(bus)?.is_correct() {
        return Err(SensorError::InvalidId);
    }
    if !dev.magnetometer_id().await.map_err(bus)?.is_correct() {
        return Err(SensorError::InvalidId);
    }

    dev.init().await.map_err(bus)?;
    dev.set_accel_mode_and_odr(delay, AccelMode::Normal, AccelOutputDataRate::Hz50)
        .await
        .map_err(bus)?;
    dev.set_accel_scale(AccelScale::G2).await.map_err(bus)?;
    dev.set_mag_mode_and_odr(delay, MagMode::HighResolution, MagOutputDataRate::Hz20)
        .await
        .map_err(bus)?;
    Ok(())
}

impl<I2C: I2c, D: DelayNs + embedded_hal::delay::DelayNs> Accelerometer for Lsm303agr<I2C, D> {
    async fn read_acceleration(&mut self) -> Result<Axes, SensorError> {
        let accel = self.read_accel_mg().await?;
        self.last_accel = Some(accel);
        Ok(accel)
    }
}

impl<I2C: I2c, D: DelayNs + embedded_hal::delay::DelayNs> Compass for Lsm303agr<I2C, D> {
    async fn read_field(&mut self) -> Result<Axes, SensorError> {
        let raw = self.read_mag_raw().await?;
        self.last_field = Some(raw);
        Ok(self.apply_offset(raw))
    }

    /// Uses the readings already taken this cycle; only reads the bus for a
    /// channel that has not been read since the last heading.
    async fn heading_degrees(&mut self) -> Result<i32, SensorError> {
        let accel = match self.last_accel.take() {
            Some(accel) => accel,
            None => self.read_accel_mg().await?,
        };
        let raw = match self.last_field.take() {
            Some(raw) => raw,
            None => self.read_mag_raw().await?,
        };
        Ok(heading_degrees(self.apply_offset(raw), accel))
    }

    async fn calibrate(&mut self) -> Result<(), SensorError> {
        self.last_field = None;

        let mut calibration = HardIronCalibration::new();
        for _ in 0..CALIBRATION_SAMPLES {
            calibration.update(self.read_mag_raw().await?);
            DelayNs::delay_ms(&mut self.delay, CALIBRATION_INTERVAL_MS).await;
        }

        if !calibration.is_valid() {
            return Err(SensorError::NotCalibrated);
        }

        self.offset = Some(calibration.offset());
        Ok(())
    }

    fn clear_calibration(&mut self) {
        self.offset = None;
    }

    fn is_calibrated(&self) -> bool {
        self.offset.is_some()
    }
}

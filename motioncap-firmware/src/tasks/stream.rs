//! Record streaming loop
//!
//! Every cycle samples the buttons, lets the sampler calibrate and read the
//! sensor, then writes one record to the serial port and sleeps.

use defmt::*;
use embassy_stm32::i2c::{I2c, Master};
use embassy_stm32::mode::Async;
use embassy_time::{Delay, Timer};

use motioncap_core::{ButtonState, Sampler, StreamConfig, WINDOW};
use motioncap_drivers::Lsm303agr;
use motioncap_hal::UartTx;
use motioncap_hal_stm32f0::{Button, SerialTx};

/// Sensor as wired on the board
pub type BoardSensor = Lsm303agr<I2c<'static, Async, Master>, Delay>;

/// Peripherals owned by the stream loop
pub struct StreamParts {
    pub sensor: BoardSensor,
    pub tx: SerialTx<'static>,
    pub button_a: Button<'static>,
    pub button_b: Button<'static>,
}

/// Sample and stream forever
pub async fn run(parts: StreamParts, config: StreamConfig) -> ! {
    let StreamParts {
        mut sensor,
        mut tx,
        button_a,
        button_b,
    } = parts;

    info!(
        "Streaming every {} ms, about {} records/s (window {})",
        config.sample_interval_ms,
        config.nominal_rate_hz(),
        config.window
    );

    let mut sampler = Sampler::<WINDOW>::new();

    loop {
        let buttons = ButtonState::read(&button_a, &button_b);

        match sampler.run_cycle(&mut sensor, buttons).await {
            Ok(cycle) => {
                match cycle.calibration {
                    Some(Ok(())) => info!("Compass calibrated"),
                    Some(Err(e)) => warn!("Compass calibration failed: {:?}", e),
                    None => {}
                }

                match cycle.report.encode() {
                    Ok(record) => {
                        match tx.send_record(record.as_bytes()) {
                            Ok(()) => trace!("Sent {}", record.as_str()),
                            Err(e) => warn!("UART write error: {:?}", e),
                        }
                    }
                    Err(e) => warn!("Record encode failed: {:?}", e),
                }
            }
            Err(e) => warn!("Sensor read failed: {:?}", e),
        }

        Timer::after_millis(config.sample_interval_ms as u64).await;
    }
}

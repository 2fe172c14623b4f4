//! MotionCap - Motion Sensor Streaming Firmware
//!
//! Samples an LSM303AGR accelerometer/magnetometer and two push buttons on
//! an STM32F042K6 and streams smoothed readings over USART2 as
//! `x,y,ns,we,h,a,b:` records for a host-side controller.
//!
//! Pin map:
//! - PB6/PB7: I2C1 SCL/SDA (sensor)
//! - PA2: USART2 TX (record stream)
//! - PA0: button A (active low)
//! - PA1: button B (active low)

#![no_std]
#![no_main]

mod tasks;

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::bind_interrupts;
use embassy_stm32::i2c::{self, I2c};
use embassy_stm32::peripherals::I2C1;
use embassy_stm32::usart;
use embassy_time::{Delay, Timer};
use {defmt_rtt as _, panic_probe as _};

use motioncap_core::{BootAction, ButtonState, Sampler, StreamConfig, WINDOW};
use motioncap_drivers::Lsm303agr;
use motioncap_hal::{I2cConfig, UartConfig};
use motioncap_hal_stm32f0::{embassy_i2c_config, embassy_uart_config, Button, SerialTx};

use crate::tasks::stream::{self, StreamParts};

bind_interrupts!(struct Irqs {
    I2C1 => i2c::EventInterruptHandler<I2C1>, i2c::ErrorInterruptHandler<I2C1>;
});

/// Delay between sensor bring-up attempts
const SENSOR_RETRY_MS: u64 = 1000;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("MotionCap firmware starting...");

    let p = embassy_stm32::init(Default::default());
    let config = StreamConfig::default();

    // Serial stream (PA2=TX on F042K6)
    let uart_config = embassy_uart_config(&UartConfig::with_baudrate(config.baudrate));
    let tx = match usart::UartTx::new_blocking(p.USART2, p.PA2, uart_config) {
        Ok(tx) => SerialTx::new(tx),
        Err(e) => {
            error!("UART configuration rejected: {:?}", Debug2Format(&e));
            return;
        }
    };
    info!("UART ready at {} baud", config.baudrate);

    // Sensor bus (PB6=SCL, PB7=SDA)
    let i2c = I2c::new(
        p.I2C1,
        p.PB6,
        p.PB7,
        Irqs,
        p.DMA1_CH2,
        p.DMA1_CH3,
        embassy_i2c_config(&I2cConfig::STANDARD),
    );

    let mut sensor = Lsm303agr::new(i2c, Delay);
    loop {
        match sensor.init().await {
            Ok(()) => break,
            Err(e) => {
                error!("Sensor init failed: {:?}, retrying", e);
                Timer::after_millis(SENSOR_RETRY_MS).await;
            }
        }
    }
    info!("LSM303AGR initialized");

    let button_a = Button::active_low(p.PA0);
    let button_b = Button::active_low(p.PA1);

    let buttons = ButtonState::read(&button_a, &button_b);
    if Sampler::<WINDOW>::boot(&mut sensor, buttons) == BootAction::ClearCalibration {
        info!("Button A held at start-up, compass calibration cleared");
    }

    stream::run(
        StreamParts {
            sensor,
            tx,
            button_a,
            button_b,
        },
        config,
    )
    .await
}

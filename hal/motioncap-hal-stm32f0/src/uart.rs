//! UART driver for STM32F0
//!
//! Blocking transmitter for the record stream. A record is under 100 bytes
//! and goes out once every few hundred milliseconds, so DMA is not needed.

use embassy_stm32::mode::Blocking;
use embassy_stm32::usart::{self, Error as UsartError, UartTx as EmbassyUartTx};
use motioncap_hal::uart::{DataBits, Parity, StopBits, UartConfig, UartTx};

/// Error from UART operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartBusError {
    /// Framing error
    Framing,
    /// Noise error
    Noise,
    /// Overrun error
    Overrun,
    /// Parity error
    Parity,
    /// Buffer too small
    BufferTooSmall,
    /// Configuration rejected by the peripheral
    Config,
    /// Other error
    Other,
}

impl From<UsartError> for UartBusError {
    fn from(e: UsartError) -> Self {
        match e {
            UsartError::Framing => UartBusError::Framing,
            UsartError::Noise => UartBusError::Noise,
            UsartError::Overrun => UartBusError::Overrun,
            UsartError::Parity => UartBusError::Parity,
            UsartError::BufferTooLong => UartBusError::BufferTooSmall,
            _ => UartBusError::Other,
        }
    }
}

/// Translate a board-neutral UART config into the embassy one
pub fn embassy_uart_config(config: &UartConfig) -> usart::Config {
    let mut out = usart::Config::default();
    out.baudrate = config.baudrate;
    out.data_bits = match config.data_bits {
        DataBits::Seven => usart::DataBits::DataBits7,
        DataBits::Eight => usart::DataBits::DataBits8,
        DataBits::Nine => usart::DataBits::DataBits9,
    };
    out.parity = match config.parity {
        Parity::None => usart::Parity::ParityNone,
        Parity::Even => usart::Parity::ParityEven,
        Parity::Odd => usart::Parity::ParityOdd,
    };
    out.stop_bits = match config.stop_bits {
        StopBits::One => usart::StopBits::STOP1,
        StopBits::Two => usart::StopBits::STOP2,
    };
    out
}

/// Serial transmitter implementing [`UartTx`]
pub struct SerialTx<'d> {
    tx: EmbassyUartTx<'d, Blocking>,
}

impl<'d> SerialTx<'d> {
    /// Wrap an already configured embassy transmitter
    pub fn new(tx: EmbassyUartTx<'d, Blocking>) -> Self {
        Self { tx }
    }
}

impl UartTx for SerialTx<'_> {
    type Error = UartBusError;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.tx.blocking_write(data).map_err(UartBusError::from)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.tx.blocking_flush().map_err(UartBusError::from)
    }
}

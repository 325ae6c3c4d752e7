//! Board wiring
//!
//! Raspberry Pi Pico pin assignment:
//!
//! | Function          | Pin            |
//! |-------------------|----------------|
//! | Console UART0     | GPIO0 TX, GPIO1 RX, 115200 8N1 |
//! | LCD I2C0          | GPIO4 SDA, GPIO5 SCL, PCF8574 at 0x27 |
//! | Encoder A / B     | GPIO10 / GPIO11, pulled up |
//! | Encoder button    | GPIO12, pulled up, active low |
//! | DS18B20 data      | GPIO22, external 4.7k pull-up |
//! | Door reed switch  | GPIO21, pulled up, high = open |
//! | Compressor relay  | GPIO15, active high |

use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Flex, Input, Level, Output, Pull};
use embassy_rp::i2c::I2c;
use embassy_rp::peripherals::{DMA_CH0, FLASH, I2C0, UART0};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_rp::{Peri, Peripherals};
use embassy_time::Delay;
use static_cell::StaticCell;

use frostline_core::Board;
use frostline_drivers::console::UartConsole;
use frostline_drivers::display::{Lcd1602, DEFAULT_ADDRESS};
use frostline_drivers::input::{GpioDoor, GpioEncoder};
use frostline_drivers::relay::GpioRelay;
use frostline_drivers::sensor::Ds18b20;
use frostline_hal::i2c::I2cConfig;
use frostline_hal_rp2040::gpio::{RpInput, RpOutput};
use frostline_hal_rp2040::i2c::{self, RpI2c};
use frostline_hal_rp2040::onewire::RpOneWire;
use frostline_hal_rp2040::uart::RpUart;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// UART ring buffers must live forever
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

pub type Relay = GpioRelay<RpOutput<'static>>;
pub type Probe = Ds18b20<RpOneWire<'static>>;
pub type Door = GpioDoor<RpInput<'static>>;
pub type Encoder = GpioEncoder<RpInput<'static>, RpInput<'static>, RpInput<'static>>;
pub type Display = Lcd1602<RpI2c<'static, I2C0>, Delay>;
pub type SerialConsole = UartConsole<RpUart>;

pub type FrostlineBoard = Board<Relay, Probe, Door, Encoder, Display, SerialConsole>;

/// Peripherals left over after [`wire`], for the caller to use
pub struct Spare {
    pub flash: Peri<'static, FLASH>,
    pub dma: Peri<'static, DMA_CH0>,
}

/// Build the board collaborators
///
/// The relay is released before anything else is configured.
pub fn wire(p: Peripherals) -> (FrostlineBoard, Spare) {
    let relay = GpioRelay::new_active_high(RpOutput::new(Output::new(p.PIN_15, Level::Low)));

    let probe = Ds18b20::new(RpOneWire::new(Flex::new(p.PIN_22)));

    let door = GpioDoor::new(RpInput::new(Input::new(p.PIN_21, Pull::Up)), true);

    let encoder = GpioEncoder::new(
        RpInput::new(Input::new(p.PIN_10, Pull::Up)),
        RpInput::new(Input::new(p.PIN_11, Pull::Up)),
        RpInput::new(Input::new(p.PIN_12, Pull::Up)),
    );

    let i2c_bus = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c::config(I2cConfig::default()));
    let display = Lcd1602::new(RpI2c::new(i2c_bus), Delay, DEFAULT_ADDRESS);

    let mut uart_config = UartConfig::default();
    uart_config.baudrate = 115_200;
    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 64]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let console = UartConsole::new(RpUart::new(uart));

    let board = Board {
        relay,
        probe,
        door,
        encoder,
        display,
        console,
    };
    let spare = Spare {
        flash: p.FLASH,
        dma: p.DMA_CH0,
    };
    (board, spare)
}

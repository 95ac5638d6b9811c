//! Hardware adapters
//!
//! Each adapter turns one RP2040 peripheral into the `platform` trait the game
//! drives. The matrix sink only touches a [`Signal`](embassy_sync::signal::Signal)
//! and is built on every target; the rest need `embassy-rp` and exist only
//! with the `hardware` feature.
//!
//! | Signal              | GPIO | Peripheral                 |
//! |---------------------|------|----------------------------|
//! | WS2812 data         | 7    | PIO0 SM0 + DMA_CH0         |
//! | Buzzer (primary)    | 10   | PWM slice 5, channel A     |
//! | Buzzer (secondary)  | 21   | PWM slice 2, channel B     |
//! | OLED SDA / SCL      | 14/15| I2C1 @ 400 kHz             |
//! | Joystick X / Y      | 27/26| ADC1 / ADC0                |
//! | Microphone          | 28   | ADC2                       |
//! | Button A / B        | 5/6  | Active-low, pull-up        |
//! | Joystick switch     | 22   | Active-low, pull-up        |
//! | Status LED R / G / B| 13/11/12 | Push-pull outputs      |

pub mod matrix;

#[cfg(feature = "hardware")]
pub mod adc;
#[cfg(feature = "hardware")]
pub mod buzzer;
#[cfg(feature = "hardware")]
pub mod oled;

pub use matrix::{to_wire, MatrixFrame, MatrixSignal, MatrixSink};

#[cfg(feature = "hardware")]
pub use self::{adc::JoystickAdc, buzzer::Buzzers, oled::Oled};

/// The complete board as wired on the Pico.
#[cfg(feature = "hardware")]
pub type PicoBoard = platform::BoardParts<
    platform::GraphicsSurface<
        Oled<embassy_rp::i2c::I2c<'static, embassy_rp::peripherals::I2C1, embassy_rp::i2c::Blocking>>,
    >,
    MatrixSink<'static, embassy_sync::blocking_mutex::raw::ThreadModeRawMutex>,
    platform::RgbPins<
        embassy_rp::gpio::Output<'static>,
        embassy_rp::gpio::Output<'static>,
        embassy_rp::gpio::Output<'static>,
    >,
    Buzzers<'static>,
    JoystickAdc<'static>,
>;

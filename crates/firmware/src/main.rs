//! Reflex Aim firmware - Main Entry Point
//!
//! Hardware-only entry point for the RP2040.

#![no_std]
#![no_main]

use defmt::{error, info, unwrap, warn};
use embassy_executor::Spawner;
use embassy_rp::adc::{self, Adc, Channel};
use embassy_rp::bind_interrupts;
use embassy_rp::clocks::RoscRng;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::{InterruptHandler, Pio};
use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};
use embassy_rp::pwm::{self, Pwm};
use embassy_sync::blocking_mutex::raw::ThreadModeRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::Instant;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;

use firmware::hal::buzzer::SliceOutput;
use firmware::hal::{Buzzers, JoystickAdc, MatrixSignal, MatrixSink, Oled, PicoBoard};
use firmware::{SharedGame, Wake};
use game::{GameConfig, GameController, Source};
use platform::{
    BoardParts, GraphicsSurface, RgbPins, APP_NAME, APP_VERSION, BOARD_NAME, PROGRESS_CELLS,
};

// Logging transport + panic handler
use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => InterruptHandler<PIO0>;
});

static GAME: SharedGame<ThreadModeRawMutex, Pcg32> = firmware::shared_game();
static WAKE: Wake<ThreadModeRawMutex> = Signal::new();
static MATRIX: MatrixSignal<ThreadModeRawMutex> = Signal::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("{=str} v{=str} on {=str}", APP_NAME, APP_VERSION, BOARD_NAME);

    let p = embassy_rp::init(Default::default());

    // Step 1: OLED on I2C1. A failed init is logged and the game still runs.
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = 400_000;
    let i2c = I2c::new_blocking(p.I2C1, p.PIN_15, p.PIN_14, i2c_config);
    let mut oled = Oled::new(i2c);
    match oled.init() {
        Ok(()) => info!("OLED ready: 128x64 @ 400 kHz"),
        Err(e) => error!("OLED init failed: {}", e),
    }

    // Step 2: WS2812 matrix on PIO0, fed by its own task.
    let Pio {
        mut common, sm0, ..
    } = Pio::new(p.PIO0, Irqs);
    let program = PioWs2812Program::new(&mut common);
    let leds = PioWs2812::new(&mut common, sm0, p.DMA_CH0, p.PIN_7, &program);
    unwrap!(spawner.spawn(matrix_task(leds)));

    // Step 3: buzzers, silent until the first hit.
    let buzzers = Buzzers::new(
        (
            Pwm::new_output_a(p.PWM_SLICE5, p.PIN_10, pwm::Config::default()),
            SliceOutput::A,
        ),
        (
            Pwm::new_output_b(p.PWM_SLICE2, p.PIN_21, pwm::Config::default()),
            SliceOutput::B,
        ),
    );

    // Step 4: joystick axes and microphone.
    let analog = JoystickAdc::new(
        Adc::new_blocking(p.ADC, adc::Config::default()),
        Channel::new_pin(p.PIN_27, Pull::None),
        Channel::new_pin(p.PIN_26, Pull::None),
        Channel::new_pin(p.PIN_28, Pull::None),
    );

    // Step 5: status LED.
    let status = RgbPins::new(
        Output::new(p.PIN_13, Level::Low),
        Output::new(p.PIN_11, Level::Low),
        Output::new(p.PIN_12, Level::Low),
    );

    let mut board: PicoBoard = BoardParts {
        display: GraphicsSurface::new(oled),
        progress: MatrixSink::new(&MATRIX),
        status,
        tone: buzzers,
        analog,
    };

    // Step 6: controller, seeded from the ring oscillator.
    let seed = RoscRng.next_u64();
    info!("target RNG seed {=u64:#x}", seed);
    firmware::install(
        &GAME,
        GameController::new(GameConfig::DEFAULT, Pcg32::seed_from_u64(seed)),
    );
    if let Err(e) = firmware::start(&GAME, &mut board, Instant::now()) {
        warn!("game tick not scheduled: {}", e);
    }

    // Step 7: edge sources. Buttons are active-low with internal pull-ups.
    unwrap!(spawner.spawn(edge_task(Input::new(p.PIN_5, Pull::Up), Source::ButtonA)));
    unwrap!(spawner.spawn(edge_task(Input::new(p.PIN_6, Pull::Up), Source::ButtonB)));
    unwrap!(spawner.spawn(edge_task(
        Input::new(p.PIN_22, Pull::Up),
        Source::JoystickConfirm
    )));

    info!("running");
    firmware::run_alarm_loop(&GAME, &WAKE, &mut board).await
}

#[embassy_executor::task(pool_size = 3)]
async fn edge_task(mut pin: Input<'static>, source: Source) {
    firmware::edge_loop(&GAME, &WAKE, source, &mut pin).await
}

#[embassy_executor::task]
async fn matrix_task(mut leds: PioWs2812<'static, PIO0, 0, PROGRESS_CELLS>) {
    loop {
        let frame = MATRIX.wait().await;
        leds.write(&frame).await;
    }
}

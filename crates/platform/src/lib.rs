//! Hardware Abstraction Layer (HAL) for the Reflex Aim board
//!
//! This crate provides trait-based abstractions for every peripheral the game
//! core talks to, enabling development and testing without physical hardware.
//!
//! # Architecture Layers
//!
//! ```text
//! Firmware (firmware crate: Embassy tasks, RP2040 wiring)
//!         ↓
//! Game core (game crate: state machine, debounce, alarms)
//!         ↓
//! Platform HAL (this crate - trait abstractions + adapters)
//!         ↓
//! Hardware Layer (embassy-rp, ssd1306, PIO WS2812)
//! ```
//!
//! # Peripherals
//!
//! - [`RenderSurface`] - 128×64 monochrome OLED
//! - [`ProgressIndicator`] - 25-cell addressable LED matrix
//! - [`StatusIndicator`] - tri-colour status LED
//! - [`ToneOutput`] - two piezo buzzer channels
//! - [`AnalogInput`] - joystick axes and microphone
//!
//! [`Board`] bundles all five so the game core takes a single `&mut B`.
//!
//! # Features
//!
//! - `std`: host helpers, enables [`mocks`]
//! - `defmt`: `defmt::Format` derives and adapter failure logging
//!
//! # Example
//!
//! ```no_run
//! use platform::{AnalogChannel, AnalogInput, StatusColor, StatusIndicator};
//!
//! fn mirror_mic<B: AnalogInput + StatusIndicator>(board: &mut B) {
//!     let loud = board.read(AnalogChannel::Microphone) > 3000;
//!     board.set_color(if loud { StatusColor::RED } else { StatusColor::OFF });
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::print_stdout)] // prefer defmt over println! in lib code
// Pedantic lints suppressed for this hardware HAL crate:
#![allow(clippy::doc_markdown)] // pin and register names in doc comments
#![allow(clippy::must_use_candidate)] // hardware accessors — callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod analog;
pub mod board;
pub mod config;
pub mod display;
pub mod progress;
pub mod status;
pub mod tone;

#[cfg(any(test, feature = "std"))]
pub mod mocks;

// Re-export main high-level traits
pub use analog::{AnalogChannel, AnalogInput, ADC_FULL_SCALE, ADC_MAX};
pub use board::{Board, BoardParts};
pub use display::{
    DisplayError, FlushTarget, GraphicsSurface, RenderSurface, DISPLAY_HEIGHT, DISPLAY_WIDTH,
};
pub use progress::{progress_frame, ProgressFrame, ProgressIndicator, PROGRESS_CELLS};
pub use status::{RgbPins, StatusColor, StatusIndicator};
pub use tone::{OutOfRangeError, PwmTiming, ToneChannel, ToneHz, ToneOutput, PWM_CLOCK_HZ};

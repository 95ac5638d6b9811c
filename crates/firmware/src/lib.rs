//! Reflex Aim firmware
//!
//! Aim-and-click reflex game for an RP2040 board with an SSD1306 OLED, a 5×5
//! WS2812 matrix, two PWM buzzers, an analog joystick and an RGB status LED.
//!
//! # Architecture
//!
//! ```text
//! Application Layer (main.rs: tasks, pin map)
//!         ↓
//! Runtime glue (runtime: shared controller, edge forwarding, alarm loop)
//!         ↓
//! Hardware adapters (hal: OLED, matrix, buzzers, ADC)
//!         ↓
//! Platform HAL (Embassy, RP2040)
//! ```
//!
//! The game logic itself lives in the `game` crate and only sees the
//! `platform` traits, so everything above the `hal` layer builds and tests on
//! the host.
//!
//! # Features
//!
//! - `hardware` - Build for the RP2040 target (embassy-rp, defmt, probe-rs)
//! - `defmt` - Structured logging in the shared crates
//!
//! # Examples
//!
//! ```bash
//! cargo build --release --target thumbv6m-none-eabi -p firmware --features hardware
//! ```

#![cfg_attr(not(test), no_std)]
// Upgrade relevant warns to deny; keep pedantic as warn (too noisy for firmware)
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Critical correctness: deny these
#![deny(clippy::await_holding_lock)] // holding a blocking Mutex across .await is a bug
#![deny(unsafe_op_in_unsafe_fn)]
// Logging discipline
#![warn(clippy::print_stdout)] // prefer defmt over println! in lib code
#![warn(clippy::dbg_macro)]
// Intentional allows for this codebase:
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub mod hal;
pub mod runtime;

pub use runtime::{
    edge_loop, forward_edge, forward_next_edge, install, run_alarm_loop, service, shared_game,
    start, SharedGame, Wake,
};

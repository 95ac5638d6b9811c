//! Reflex Aim game core
//!
//! Allocation-free, `no_std` state machine for a joystick aiming game:
//! steer a cursor onto a randomly placed target and click to score. Reaching
//! the win score ends in victory, too many consecutive misses in defeat; both
//! auto-reset after a delay.
//!
//! # Event flow
//!
//! ```text
//! edge (button / joystick switch)
//!     └─▶ DebounceManager ──▶ Mailboxes (capacity 1, overwrite)
//!                      └────▶ AlarmQueue (debounce expiry / re-arm)
//!
//! AlarmQueue::pop_due ──▶ GameController::on_alarm
//!     GameTick         ──▶ sample cursor, consume confirm, hit test, render
//!     DebounceExpired  ──▶ pause toggle (A) / reset (B)
//!     ToneCutoff       ──▶ stop buzzer
//!     BlinkStep        ──▶ status LED blink (repeating)
//!     AutoReset        ──▶ reset after an outcome
//! ```
//!
//! Everything lives in one [`GameController`]; the firmware serialises access
//! to it and feeds it edges and the current time.

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod controller;
pub mod debounce;
pub mod feedback;
pub mod input;
pub mod sampler;
pub mod scheduler;
pub mod screen;
pub mod state;

pub use config::{ConfigError, GameConfig};
pub use controller::GameController;
pub use debounce::{DebounceManager, EdgeOutcome};
pub use feedback::{BlinkSession, FeedbackOrchestrator, TaskSlot};
pub use input::{Button, InputEvent, Mailbox, Mailboxes, Source};
pub use sampler::InputSampler;
pub use scheduler::{
    Alarm, AlarmHandle, AlarmQueue, Firing, GameAlarms, Reschedule, ScheduleError, ALARM_SLOTS,
};
pub use state::{ClickResult, GameState, Outcome, Phase, Position};

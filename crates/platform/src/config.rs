//! Application configuration and constants
//!
//! Branding and version strings shared by the firmware boot banner and the
//! host tooling. Gameplay timing lives in `game::config`.

/// The application name
pub const APP_NAME: &str = "Reflex Aim";

/// Target board
pub const BOARD_NAME: &str = "BitDogLab (RP2040)";

/// Application version (synchronized with Cargo.toml)
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

//! Gameplay timing and rule constants
//!
//! Difficulty is fixed: the firmware always runs [`GameConfig::DEFAULT`].
//! The struct exists so tests can shrink timings and so every magic number
//! has one home.

use embassy_time::Duration;
use platform::{ToneHz, ADC_FULL_SCALE, DISPLAY_HEIGHT, DISPLAY_WIDTH, PROGRESS_CELLS};
use thiserror_no_std::Error;

/// Invalid [`GameConfig`] values.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A timing value that must be positive is zero.
    #[error("{0} must be non-zero")]
    ZeroDuration(&'static str),

    /// The win score cannot be shown on the progress matrix.
    #[error("win score {0} exceeds the progress cell count")]
    WinScoreTooLarge(u8),

    /// Win score of zero would end every game on the first tick.
    #[error("win score must be at least 1")]
    ZeroWinScore,

    /// A hit radius of zero can never register a hit.
    #[error("hit radius must be at least 1")]
    ZeroHitRadius,

    /// Blink sessions need at least one on/off pair.
    #[error("blink must have at least one on/off pair")]
    ZeroBlinkCycles,

    /// The target margin leaves no placeable column or row.
    #[error("target margin {0} leaves no room on the display")]
    MarginTooLarge(u8),

    /// Display dimensions of zero.
    #[error("display dimensions must be non-zero")]
    EmptyDisplay,
}

/// Timing and rule constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// State machine evaluation period
    pub tick_period: Duration,
    /// Button A/B suppression window; the action runs when it expires
    pub button_debounce: Duration,
    /// Joystick switch minimum spacing and interrupt mask time
    pub confirm_debounce: Duration,
    /// How long each tone sounds
    pub tone_duration: Duration,
    /// Delay between an outcome and the automatic reset
    pub auto_reset_delay: Duration,
    /// Blink half-period
    pub blink_period: Duration,
    /// Number of colour/black pairs in an outcome blink
    pub blink_cycles: u8,
    /// Score that ends the game in victory
    pub win_score: u8,
    /// Consecutive misses tolerated; one more ends the game in defeat
    pub max_misses: u8,
    /// Hit when both axis distances are strictly below this
    pub hit_radius: u8,
    /// Minimum distance between a target and the display edge
    pub target_margin: u8,
    /// Microphone level above which a sample counts as loud
    pub loudness_threshold: u16,
    /// Primary buzzer frequency on a hit
    pub hit_tone: ToneHz,
    /// Primary buzzer frequency on victory
    pub victory_tone: ToneHz,
    /// Secondary buzzer frequency on defeat
    pub defeat_tone: ToneHz,
    /// Display width in pixels
    pub display_width: u8,
    /// Display height in pixels
    pub display_height: u8,
    /// Number of distinct ADC codes
    pub adc_full_scale: u16,
}

impl GameConfig {
    /// Board defaults.
    pub const DEFAULT: Self = Self {
        tick_period: Duration::from_millis(20),
        button_debounce: Duration::from_millis(200),
        confirm_debounce: Duration::from_millis(100),
        tone_duration: Duration::from_millis(200),
        auto_reset_delay: Duration::from_millis(5000),
        blink_period: Duration::from_millis(250),
        blink_cycles: 20,
        win_score: 25,
        max_misses: 10,
        hit_radius: 3,
        target_margin: 2,
        loudness_threshold: 3000,
        hit_tone: ToneHz::new(2000),
        victory_tone: ToneHz::new(2500),
        defeat_tone: ToneHz::new(3000),
        display_width: DISPLAY_WIDTH,
        display_height: DISPLAY_HEIGHT,
        adc_full_scale: ADC_FULL_SCALE,
    };

    /// Check a hand-built configuration.
    #[allow(clippy::cast_lossless)] // usize::from is not const
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_period.as_ticks() == 0 {
            return Err(ConfigError::ZeroDuration("tick period"));
        }
        if self.button_debounce.as_ticks() == 0 {
            return Err(ConfigError::ZeroDuration("button debounce"));
        }
        if self.confirm_debounce.as_ticks() == 0 {
            return Err(ConfigError::ZeroDuration("confirm debounce"));
        }
        if self.tone_duration.as_ticks() == 0 {
            return Err(ConfigError::ZeroDuration("tone duration"));
        }
        if self.blink_period.as_ticks() == 0 {
            return Err(ConfigError::ZeroDuration("blink period"));
        }

        if self.display_width == 0 || self.display_height == 0 || self.adc_full_scale == 0 {
            return Err(ConfigError::EmptyDisplay);
        }
        if self.win_score == 0 {
            return Err(ConfigError::ZeroWinScore);
        }
        if self.win_score as usize > PROGRESS_CELLS {
            return Err(ConfigError::WinScoreTooLarge(self.win_score));
        }
        if self.hit_radius == 0 {
            return Err(ConfigError::ZeroHitRadius);
        }
        if self.blink_cycles == 0 {
            return Err(ConfigError::ZeroBlinkCycles);
        }

        // Placeable range is [margin, dim - 1 - margin]; needs at least one cell.
        let span = self.target_margin.saturating_mul(2);
        if span >= self.display_width || span >= self.display_height {
            return Err(ConfigError::MarginTooLarge(self.target_margin));
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

const _: () = assert!(GameConfig::DEFAULT.validate().is_ok());

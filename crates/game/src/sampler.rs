//! Joystick and microphone sampling

use platform::{AnalogChannel, AnalogInput};

use crate::{config::GameConfig, state::Position};

/// Maps raw ADC samples to screen space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputSampler {
    width: u8,
    height: u8,
    full_scale: u16,
    loudness_threshold: u16,
}

impl InputSampler {
    /// Sampler for `config`'s display and ADC.
    pub const fn new(config: &GameConfig) -> Self {
        Self {
            width: config.display_width,
            height: config.display_height,
            full_scale: config.adc_full_scale,
            loudness_threshold: config.loudness_threshold,
        }
    }

    /// Read both joystick axes and map them onto the display.
    pub fn sample_cursor<A: AnalogInput + ?Sized>(&self, analog: &mut A) -> Position {
        let raw_x = analog.read(AnalogChannel::CursorX);
        let raw_y = analog.read(AnalogChannel::CursorY);
        Position::new(self.map_x(raw_x), self.map_y(raw_y))
    }

    /// True when the microphone reads above the loudness threshold.
    pub fn sample_loudness<A: AnalogInput + ?Sized>(&self, analog: &mut A) -> bool {
        analog.read(AnalogChannel::Microphone) > self.loudness_threshold
    }

    /// Column for a raw X sample: `raw * width / full_scale`.
    pub fn map_x(&self, raw: u16) -> u8 {
        self.scale(raw, self.width)
    }

    /// Row for a raw Y sample. The stick's Y axis grows upwards, rows grow
    /// downwards, so the sample is inverted first.
    pub fn map_y(&self, raw: u16) -> u8 {
        let max = self.max_sample();
        self.scale(max.saturating_sub(raw.min(max)), self.height)
    }

    /// Largest sample the configured converter can report.
    fn max_sample(&self) -> u16 {
        self.full_scale.saturating_sub(1)
    }

    fn scale(&self, raw: u16, span: u8) -> u8 {
        let scaled = u32::from(raw.min(self.max_sample()))
            .saturating_mul(u32::from(span))
            .checked_div(u32::from(self.full_scale))
            .unwrap_or(0);
        let limit = span.saturating_sub(1);
        u8::try_from(scaled).map_or(limit, |v| v.min(limit))
    }
}

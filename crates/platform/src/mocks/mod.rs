//! Mock implementations for testing
//!
//! [`MockBoard`] implements every platform trait and records what the game
//! asked of it, so tests can assert on screens, LED colours and tones without
//! hardware.

#![cfg(any(test, feature = "std"))]

use crate::*;
use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

/// A presented display frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    /// Text runs with their top-left anchor
    pub texts: Vec<(String, i32, i32)>,
    /// Coordinates of every pixel switched on
    pub pixels: Vec<(i32, i32)>,
}

impl Frame {
    /// True when a text run equal to `text` was drawn.
    pub fn has_text(&self, text: &str) -> bool {
        self.texts.iter().any(|(t, _, _)| t == text)
    }

    /// Anchor of the first text run equal to `text`.
    pub fn text_at(&self, text: &str) -> Option<(i32, i32)> {
        self.texts
            .iter()
            .find(|(t, _, _)| t == text)
            .map(|(_, x, y)| (*x, *y))
    }

    /// True when pixel (`x`, `y`) is lit.
    pub fn is_lit(&self, x: i32, y: i32) -> bool {
        self.pixels.contains(&(x, y))
    }
}

/// Recorded buzzer activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneEvent {
    /// Channel started at a frequency
    Start(ToneChannel, u32),
    /// Channel silenced
    Stop(ToneChannel),
}

/// Recording board.
pub struct MockBoard {
    pending: Frame,
    frames: Vec<Frame>,
    progress: Vec<ProgressFrame>,
    status: Vec<StatusColor>,
    tones: Vec<ToneEvent>,
    sounding: [Option<u32>; 2],
    analog: [u16; 3],
    reads: usize,
}

impl MockBoard {
    /// Create a board with the joystick centred and a quiet microphone.
    pub fn new() -> Self {
        Self {
            pending: Frame::default(),
            frames: Vec::new(),
            progress: Vec::new(),
            status: Vec::new(),
            tones: Vec::new(),
            sounding: [None; 2],
            analog: [2048, 2048, 0],
            reads: 0,
        }
    }

    /// Script the value returned for `channel` from now on.
    pub fn set_analog(&mut self, channel: AnalogChannel, raw: u16) {
        if let Some(slot) = self.analog.get_mut(usize::from(channel.adc_input())) {
            *slot = raw;
        }
    }

    /// Number of ADC reads served.
    pub fn analog_reads(&self) -> usize {
        self.reads
    }

    /// Every presented frame, oldest first.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Most recently presented frame.
    pub fn last_frame(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Every matrix frame pushed, oldest first.
    pub fn progress_frames(&self) -> &[ProgressFrame] {
        &self.progress
    }

    /// Number of green cells in the latest matrix frame (0 when none pushed).
    pub fn lit_cells(&self) -> usize {
        self.progress
            .last()
            .map_or(0, |f| f.iter().filter(|c| **c == Rgb888::GREEN).count())
    }

    /// Every status colour applied, oldest first.
    pub fn status_history(&self) -> &[StatusColor] {
        &self.status
    }

    /// Current status colour (OFF before any write).
    pub fn status(&self) -> StatusColor {
        self.status.last().copied().unwrap_or(StatusColor::OFF)
    }

    /// Every tone start/stop, oldest first.
    pub fn tone_events(&self) -> &[ToneEvent] {
        &self.tones
    }

    /// Frequency currently sounding on `channel`.
    pub fn sounding(&self, channel: ToneChannel) -> Option<u32> {
        self.sounding.get(channel.index()).copied().flatten()
    }

    /// Forget all recorded output (scripted ADC values are kept).
    pub fn clear_history(&mut self) {
        self.frames.clear();
        self.progress.clear();
        self.status.clear();
        self.tones.clear();
    }
}

impl Default for MockBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSurface for MockBoard {
    fn clear(&mut self) {
        self.pending = Frame::default();
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32) {
        self.pending.texts.push((text.to_owned(), x, y));
    }

    fn draw_pixel(&mut self, x: i32, y: i32, on: bool) {
        if on {
            if !self.pending.is_lit(x, y) {
                self.pending.pixels.push((x, y));
            }
        } else {
            self.pending.pixels.retain(|p| *p != (x, y));
        }
    }

    fn present(&mut self) {
        self.frames.push(self.pending.clone());
    }
}

impl ProgressIndicator for MockBoard {
    fn push(&mut self, frame: &ProgressFrame) {
        self.progress.push(*frame);
    }
}

impl StatusIndicator for MockBoard {
    fn set_color(&mut self, color: StatusColor) {
        self.status.push(color);
    }
}

impl ToneOutput for MockBoard {
    fn start(&mut self, channel: ToneChannel, frequency: ToneHz) {
        self.tones.push(ToneEvent::Start(channel, frequency.get()));
        if let Some(slot) = self.sounding.get_mut(channel.index()) {
            *slot = Some(frequency.get());
        }
    }

    fn stop(&mut self, channel: ToneChannel) {
        self.tones.push(ToneEvent::Stop(channel));
        if let Some(slot) = self.sounding.get_mut(channel.index()) {
            *slot = None;
        }
    }
}

impl AnalogInput for MockBoard {
    fn read(&mut self, channel: AnalogChannel) -> u16 {
        self.reads = self.reads.saturating_add(1);
        self.analog
            .get(usize::from(channel.adc_input()))
            .copied()
            .unwrap_or(0)
    }
}

//! Whole-board bundle
//!
//! The game core is generic over a single `B: Board`. On hardware each
//! peripheral is a separate driver, so [`BoardParts`] stitches five
//! independent implementations into one value.

use crate::{
    AnalogChannel, AnalogInput, ProgressFrame, ProgressIndicator, RenderSurface, StatusColor,
    StatusIndicator, ToneChannel, ToneHz, ToneOutput,
};

/// Every peripheral the game drives.
///
/// Blanket-implemented for anything providing all five traits.
pub trait Board:
    RenderSurface + ProgressIndicator + StatusIndicator + ToneOutput + AnalogInput
{
}

impl<T> Board for T where
    T: RenderSurface + ProgressIndicator + StatusIndicator + ToneOutput + AnalogInput
{
}

/// Five independent peripheral implementations acting as one [`Board`].
pub struct BoardParts<D, P, S, T, A> {
    /// OLED surface
    pub display: D,
    /// LED matrix
    pub progress: P,
    /// RGB status LED
    pub status: S,
    /// Buzzers
    pub tone: T,
    /// ADC
    pub analog: A,
}

impl<D: RenderSurface, P, S, T, A> RenderSurface for BoardParts<D, P, S, T, A> {
    fn clear(&mut self) {
        self.display.clear();
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32) {
        self.display.draw_text(text, x, y);
    }

    fn draw_pixel(&mut self, x: i32, y: i32, on: bool) {
        self.display.draw_pixel(x, y, on);
    }

    fn present(&mut self) {
        self.display.present();
    }
}

impl<D, P: ProgressIndicator, S, T, A> ProgressIndicator for BoardParts<D, P, S, T, A> {
    fn push(&mut self, frame: &ProgressFrame) {
        self.progress.push(frame);
    }
}

impl<D, P, S: StatusIndicator, T, A> StatusIndicator for BoardParts<D, P, S, T, A> {
    fn set_color(&mut self, color: StatusColor) {
        self.status.set_color(color);
    }
}

impl<D, P, S, T: ToneOutput, A> ToneOutput for BoardParts<D, P, S, T, A> {
    fn start(&mut self, channel: ToneChannel, frequency: ToneHz) {
        self.tone.start(channel, frequency);
    }

    fn stop(&mut self, channel: ToneChannel) {
        self.tone.stop(channel);
    }
}

impl<D, P, S, T, A: AnalogInput> AnalogInput for BoardParts<D, P, S, T, A> {
    fn read(&mut self, channel: AnalogChannel) -> u16 {
        self.analog.read(channel)
    }
}

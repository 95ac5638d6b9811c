//! Display abstraction layer
//!
//! The game draws through the narrow [`RenderSurface`] trait. On hardware the
//! surface is a [`GraphicsSurface`] wrapping an `embedded-graphics` draw target
//! (the SSD1306 buffered driver); draw calls fill the frame buffer and
//! [`RenderSurface::present`] pushes it over the bus.

use embedded_graphics::{
    mono_font::{ascii::FONT_6X10, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};

/// Logical display width in pixels.
pub const DISPLAY_WIDTH: u8 = 128;

/// Logical display height in pixels.
pub const DISPLAY_HEIGHT: u8 = 64;

/// Monochrome frame surface used by the game screens.
///
/// Coordinates are in pixels from the top-left corner. Drawing outside the
/// panel is clipped by the implementation. All calls are infallible at this
/// boundary; bus errors are logged by the adapter.
pub trait RenderSurface {
    /// Blank the back buffer.
    fn clear(&mut self);

    /// Draw `text` with its top-left corner at (`x`, `y`).
    fn draw_text(&mut self, text: &str, x: i32, y: i32);

    /// Set or clear a single pixel.
    fn draw_pixel(&mut self, x: i32, y: i32, on: bool);

    /// Transmit the back buffer to the panel.
    fn present(&mut self);
}

/// Draw targets that hold a frame buffer and can transmit it.
pub trait FlushTarget {
    /// Send the buffered frame to the panel.
    fn flush_frame(&mut self) -> Result<(), DisplayError>;
}

/// Display errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus (I2C) transfer failed
    Communication,
    /// Frame buffer could not be drawn to
    Draw,
}

#[cfg(feature = "std")]
impl std::error::Error for DisplayError {}

impl core::fmt::Display for DisplayError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Communication => write!(f, "Display communication error"),
            Self::Draw => write!(f, "Display frame buffer draw error"),
        }
    }
}

/// [`RenderSurface`] adapter over any binary-colour `embedded-graphics` target.
///
/// Text uses the 6×10 ASCII mono font with a top baseline so that (`x`, `y`)
/// addresses the glyph's top-left corner.
pub struct GraphicsSurface<D> {
    target: D,
    failures: u32,
}

impl<D> GraphicsSurface<D>
where
    D: DrawTarget<Color = BinaryColor> + FlushTarget,
{
    /// Wrap a draw target.
    pub fn new(target: D) -> Self {
        Self {
            target,
            failures: 0,
        }
    }

    /// Number of draw or flush operations that reported an error.
    pub fn failures(&self) -> u32 {
        self.failures
    }

    /// Borrow the wrapped target.
    pub fn target(&self) -> &D {
        &self.target
    }

    /// Unwrap the adapter.
    pub fn into_inner(self) -> D {
        self.target
    }

    fn record(&mut self, result: Result<(), DisplayError>) {
        if let Err(_e) = result {
            #[cfg(feature = "defmt")]
            defmt::error!("display operation failed: {}", _e);
            self.failures = self.failures.saturating_add(1);
        }
    }
}

impl<D> RenderSurface for GraphicsSurface<D>
where
    D: DrawTarget<Color = BinaryColor> + FlushTarget,
{
    fn clear(&mut self) {
        let result = self
            .target
            .clear(BinaryColor::Off)
            .map_err(|_| DisplayError::Draw);
        self.record(result);
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32) {
        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        let result = Text::with_baseline(text, Point::new(x, y), style, Baseline::Top)
            .draw(&mut self.target)
            .map(|_| ())
            .map_err(|_| DisplayError::Draw);
        self.record(result);
    }

    fn draw_pixel(&mut self, x: i32, y: i32, on: bool) {
        let result = Pixel(Point::new(x, y), BinaryColor::from(on))
            .draw(&mut self.target)
            .map_err(|_| DisplayError::Draw);
        self.record(result);
    }

    fn present(&mut self) {
        let result = self.target.flush_frame();
        self.record(result);
    }
}

//! LED-matrix progress bar
//!
//! The 5×5 WS2812 matrix is used as a 25-cell linear progress indicator.
//! Cells are addressed in chain order; cell `i` is the `i`-th LED on the data
//! line.

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

/// Number of addressable cells on the matrix.
pub const PROGRESS_CELLS: usize = 25;

/// One colour per cell, in chain order.
pub type ProgressFrame = [Rgb888; PROGRESS_CELLS];

/// Sink for complete matrix frames.
pub trait ProgressIndicator {
    /// Latch a full frame onto the matrix.
    fn push(&mut self, frame: &ProgressFrame);
}

/// Build a frame with the first `lit` cells set to `color` and the rest black.
///
/// `lit` values above [`PROGRESS_CELLS`] light every cell.
pub fn progress_frame(lit: usize, color: Rgb888) -> ProgressFrame {
    let mut frame = [Rgb888::BLACK; PROGRESS_CELLS];
    for cell in frame.iter_mut().take(lit) {
        *cell = color;
    }
    frame
}

//! WS2812 progress matrix sink
//!
//! The game pushes frames synchronously while holding the controller lock;
//! the PIO write is async. [`MatrixSink`] bridges the two with a latest-value
//! [`Signal`]: a dedicated task waits on it and streams each frame out, and a
//! frame that arrives before the previous one is written simply replaces it.

use embassy_sync::{blocking_mutex::raw::RawMutex, signal::Signal};
use embedded_graphics::pixelcolor::RgbColor;
use platform::{ProgressFrame, ProgressIndicator, PROGRESS_CELLS};
use smart_leds::RGB8;

/// One frame in the colour type the PIO driver consumes.
pub type MatrixFrame = [RGB8; PROGRESS_CELLS];

/// Hand-off point between the game and the matrix task.
pub type MatrixSignal<M> = Signal<M, MatrixFrame>;

/// Convert a game frame into chain-ordered LED colours.
pub fn to_wire(frame: &ProgressFrame) -> MatrixFrame {
    let mut wire = [RGB8::default(); PROGRESS_CELLS];
    for (led, cell) in wire.iter_mut().zip(frame) {
        *led = RGB8::new(cell.r(), cell.g(), cell.b());
    }
    wire
}

/// [`ProgressIndicator`] that posts frames to a [`MatrixSignal`].
pub struct MatrixSink<'a, M: RawMutex> {
    frames: &'a MatrixSignal<M>,
}

impl<'a, M: RawMutex> MatrixSink<'a, M> {
    /// Post frames to `frames`.
    pub const fn new(frames: &'a MatrixSignal<M>) -> Self {
        Self { frames }
    }
}

impl<M: RawMutex> ProgressIndicator for MatrixSink<'_, M> {
    fn push(&mut self, frame: &ProgressFrame) {
        self.frames.signal(to_wire(frame));
    }
}

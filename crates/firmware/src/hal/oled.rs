//! SSD1306 128×64 OLED over I2C

use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, OriginDimensions, Pixel, Size},
};
use platform::{DisplayError, FlushTarget, DISPLAY_HEIGHT, DISPLAY_WIDTH};
use ssd1306::{
    mode::BufferedGraphicsMode, prelude::*, size::DisplaySize128x64, I2CDisplayInterface, Ssd1306,
};

type Driver<I> =
    Ssd1306<I2CInterface<I>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Buffered OLED. Drawing touches RAM only; [`FlushTarget::flush_frame`]
/// pushes the whole buffer over I2C.
pub struct Oled<I>(Driver<I>);

impl<I: embedded_hal::i2c::I2c> Oled<I> {
    /// Wrap the bus. Call [`init`](Self::init) before the first flush.
    pub fn new(i2c: I) -> Self {
        let interface = I2CDisplayInterface::new(i2c);
        Self(
            Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
                .into_buffered_graphics_mode(),
        )
    }

    /// Run the controller power-up sequence.
    pub fn init(&mut self) -> Result<(), DisplayError> {
        self.0.init().map_err(|_| DisplayError::Communication)
    }
}

impl<I: embedded_hal::i2c::I2c> DrawTarget for Oled<I> {
    type Color = BinaryColor;
    type Error = DisplayError;

    fn draw_iter<P>(&mut self, pixels: P) -> Result<(), Self::Error>
    where
        P: IntoIterator<Item = Pixel<Self::Color>>,
    {
        DrawTarget::draw_iter(&mut self.0, pixels).map_err(|_| DisplayError::Draw)
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        DrawTarget::clear(&mut self.0, color).map_err(|_| DisplayError::Draw)
    }
}

impl<I: embedded_hal::i2c::I2c> OriginDimensions for Oled<I> {
    fn size(&self) -> Size {
        Size::new(u32::from(DISPLAY_WIDTH), u32::from(DISPLAY_HEIGHT))
    }
}

impl<I: embedded_hal::i2c::I2c> FlushTarget for Oled<I> {
    fn flush_frame(&mut self) -> Result<(), DisplayError> {
        self.0.flush().map_err(|_| DisplayError::Communication)
    }
}

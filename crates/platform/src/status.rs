//! RGB status LED
//!
//! The board's common-cathode RGB LED is driven as three on/off GPIOs
//! (R = GPIO13, G = GPIO11, B = GPIO12). Colours are therefore the eight
//! corners of the RGB cube.

use embedded_hal::digital::OutputPin;

/// On/off state of each LED die.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusColor {
    /// Red die lit
    pub red: bool,
    /// Green die lit
    pub green: bool,
    /// Blue die lit
    pub blue: bool,
}

impl StatusColor {
    /// All dies off
    pub const OFF: Self = Self::new(false, false, false);
    /// Red only
    pub const RED: Self = Self::new(true, false, false);
    /// Green only
    pub const GREEN: Self = Self::new(false, true, false);
    /// Red + green
    pub const YELLOW: Self = Self::new(true, true, false);

    /// Build a colour from the three die states.
    pub const fn new(red: bool, green: bool, blue: bool) -> Self {
        Self { red, green, blue }
    }
}

/// Tri-colour indicator.
pub trait StatusIndicator {
    /// Show `color`.
    fn set_color(&mut self, color: StatusColor);
}

/// [`StatusIndicator`] over three push-pull output pins (active high).
pub struct RgbPins<R, G, B> {
    red: R,
    green: G,
    blue: B,
}

impl<R, G, B> RgbPins<R, G, B>
where
    R: OutputPin,
    G: OutputPin,
    B: OutputPin,
{
    /// Take ownership of the three pins.
    pub fn new(red: R, green: G, blue: B) -> Self {
        Self { red, green, blue }
    }

    /// Release the pins.
    pub fn release(self) -> (R, G, B) {
        (self.red, self.green, self.blue)
    }
}

fn drive<P: OutputPin>(pin: &mut P, on: bool) {
    let result = if on { pin.set_high() } else { pin.set_low() };
    if result.is_err() {
        #[cfg(feature = "defmt")]
        defmt::error!("status LED pin write failed");
    }
}

impl<R, G, B> StatusIndicator for RgbPins<R, G, B>
where
    R: OutputPin,
    G: OutputPin,
    B: OutputPin,
{
    fn set_color(&mut self, color: StatusColor) {
        drive(&mut self.red, color.red);
        drive(&mut self.green, color.green);
        drive(&mut self.blue, color.blue);
    }
}

//! Analog input abstraction (joystick axes + microphone)

/// Number of distinct codes produced by the 12-bit RP2040 ADC.
pub const ADC_FULL_SCALE: u16 = 4096;

/// Largest raw sample the ADC can return.
pub const ADC_MAX: u16 = 4095;

/// Analog channels wired on the board.
///
/// | Channel      | ADC input | GPIO   |
/// |--------------|-----------|--------|
/// | `CursorY`    | ADC0      | GPIO26 |
/// | `CursorX`    | ADC1      | GPIO27 |
/// | `Microphone` | ADC2      | GPIO28 |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnalogChannel {
    /// Joystick horizontal axis
    CursorX,
    /// Joystick vertical axis (raw value grows towards the top of the board)
    CursorY,
    /// Electret microphone amplitude
    Microphone,
}

impl AnalogChannel {
    /// All channels, in ADC input order.
    pub const ALL: [Self; 3] = [Self::CursorY, Self::CursorX, Self::Microphone];

    /// RP2040 ADC input number for this channel.
    pub const fn adc_input(self) -> u8 {
        match self {
            Self::CursorY => 0,
            Self::CursorX => 1,
            Self::Microphone => 2,
        }
    }
}

/// Blocking single-sample reader.
///
/// Implementations return a raw 12-bit sample in `0..=ADC_MAX`. Conversion
/// failures are handled inside the implementation; the game core treats
/// sampling as infallible.
pub trait AnalogInput {
    /// Sample one channel.
    fn read(&mut self, channel: AnalogChannel) -> u16;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adc_inputs_are_distinct() {
        let inputs = AnalogChannel::ALL.map(AnalogChannel::adc_input);
        assert_eq!(inputs, [0, 1, 2]);
    }

    #[test]
    fn adc_max_is_twelve_bit() {
        assert_eq!(ADC_MAX, 0x0FFF);
    }
}

//! Joystick and microphone on the RP2040 ADC

use embassy_rp::adc::{Adc, Blocking, Channel};
use platform::{AnalogChannel, AnalogInput, ADC_FULL_SCALE};

/// Reported when a conversion fails: the joystick's resting position.
const FALLBACK_READING: u16 = ADC_FULL_SCALE / 2;

/// [`AnalogInput`] over three ADC channels with blocking conversions.
pub struct JoystickAdc<'d> {
    adc: Adc<'d, Blocking>,
    x: Channel<'d>,
    y: Channel<'d>,
    microphone: Channel<'d>,
}

impl<'d> JoystickAdc<'d> {
    /// Bind the converter to its three inputs.
    pub fn new(adc: Adc<'d, Blocking>, x: Channel<'d>, y: Channel<'d>, microphone: Channel<'d>) -> Self {
        Self {
            adc,
            x,
            y,
            microphone,
        }
    }
}

impl AnalogInput for JoystickAdc<'_> {
    fn read(&mut self, channel: AnalogChannel) -> u16 {
        let input = match channel {
            AnalogChannel::CursorX => &mut self.x,
            AnalogChannel::CursorY => &mut self.y,
            AnalogChannel::Microphone => &mut self.microphone,
        };
        match self.adc.blocking_read(input) {
            Ok(raw) => raw,
            Err(e) => {
                defmt::error!("ADC read failed on {}: {}", channel, e);
                FALLBACK_READING
            }
        }
    }
}

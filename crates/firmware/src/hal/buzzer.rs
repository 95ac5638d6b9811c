//! Piezo buzzers on two PWM slices

use embassy_rp::pwm::{Config, Pwm};
use platform::{PwmTiming, ToneChannel, ToneHz, ToneOutput, PWM_CLOCK_HZ};

/// Which output of the slice the buzzer is wired to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SliceOutput {
    /// Even GPIO of the slice
    A,
    /// Odd GPIO of the slice
    B,
}

struct Buzzer<'d> {
    pwm: Pwm<'d>,
    output: SliceOutput,
    config: Config,
}

impl Buzzer<'_> {
    fn start(&mut self, timing: PwmTiming) {
        self.config.divider = timing.divider.into();
        // The counter wraps after top + 1 counts.
        self.config.top = timing.top.saturating_sub(1);
        self.set_compare(timing.compare);
        self.config.enable = true;
        self.pwm.set_config(&self.config);
    }

    fn stop(&mut self) {
        self.set_compare(0);
        self.config.enable = false;
        self.pwm.set_config(&self.config);
    }

    fn set_compare(&mut self, level: u16) {
        match self.output {
            SliceOutput::A => self.config.compare_a = level,
            SliceOutput::B => self.config.compare_b = level,
        }
    }
}

/// Both buzzers as one [`ToneOutput`].
pub struct Buzzers<'d> {
    channels: [Buzzer<'d>; 2],
}

impl<'d> Buzzers<'d> {
    /// `primary` and `secondary` are slices already bound to their pins.
    pub fn new(primary: (Pwm<'d>, SliceOutput), secondary: (Pwm<'d>, SliceOutput)) -> Self {
        let buzzer = |(pwm, output): (Pwm<'d>, SliceOutput)| {
            let mut config = Config::default();
            config.enable = false;
            Buzzer {
                pwm,
                output,
                config,
            }
        };
        let mut buzzers = Self {
            channels: [buzzer(primary), buzzer(secondary)],
        };
        for channel in ToneChannel::ALL {
            buzzers.stop(channel);
        }
        buzzers
    }

    fn channel(&mut self, channel: ToneChannel) -> Option<&mut Buzzer<'d>> {
        self.channels.get_mut(channel.index())
    }
}

impl ToneOutput for Buzzers<'_> {
    fn start(&mut self, channel: ToneChannel, frequency: ToneHz) {
        let Some(timing) = PwmTiming::for_frequency(frequency, PWM_CLOCK_HZ) else {
            defmt::warn!("no PWM timing for {} Hz", frequency.get());
            return;
        };
        if let Some(buzzer) = self.channel(channel) {
            buzzer.start(timing);
        }
    }

    fn stop(&mut self, channel: ToneChannel) {
        if let Some(buzzer) = self.channel(channel) {
            buzzer.stop();
        }
    }
}

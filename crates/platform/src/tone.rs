//! Piezo buzzer tones
//!
//! Two passive buzzers hang off PWM outputs (Primary = GPIO10 / slice 5 A,
//! Secondary = GPIO21 / slice 2 B). A tone is a 50 % duty square wave; the
//! game decides how long it lasts by stopping the channel from an alarm.

// ── Error type ───────────────────────────────────────────────────────────────

/// Error returned when a value is out of the valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutOfRangeError {
    /// The value that was out of range.
    pub value: u32,
    /// The inclusive minimum allowed value.
    pub min: u32,
    /// The inclusive maximum allowed value.
    pub max: u32,
}

impl core::fmt::Display for OutOfRangeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} outside {}..={}", self.value, self.min, self.max)
    }
}

// ── ToneChannel ──────────────────────────────────────────────────────────────

/// Buzzer output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ToneChannel {
    /// GPIO10 buzzer (hit and victory tones)
    Primary,
    /// GPIO21 buzzer (defeat tone)
    Secondary,
}

impl ToneChannel {
    /// Both channels.
    pub const ALL: [Self; 2] = [Self::Primary, Self::Secondary];

    /// Dense index for per-channel tables.
    pub const fn index(self) -> usize {
        match self {
            Self::Primary => 0,
            Self::Secondary => 1,
        }
    }
}

// ── ToneHz ───────────────────────────────────────────────────────────────────

/// Audible tone frequency in Hz, 20–20000.
///
/// Construct with [`ToneHz::new`] (clamping) or [`ToneHz::try_new`] (strict).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct ToneHz(u32);

impl ToneHz {
    /// Lowest accepted frequency.
    pub const MIN_HZ: u32 = 20;
    /// Highest accepted frequency.
    pub const MAX_HZ: u32 = 20_000;

    /// Create a `ToneHz`, clamping into 20–20000 Hz.
    #[must_use]
    pub const fn new(hz: u32) -> Self {
        if hz < Self::MIN_HZ {
            Self(Self::MIN_HZ)
        } else if hz > Self::MAX_HZ {
            Self(Self::MAX_HZ)
        } else {
            Self(hz)
        }
    }

    /// Create a `ToneHz`, returning an error outside 20–20000 Hz.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if `hz` is outside the audible range.
    pub fn try_new(hz: u32) -> Result<Self, OutOfRangeError> {
        if (Self::MIN_HZ..=Self::MAX_HZ).contains(&hz) {
            Ok(Self(hz))
        } else {
            Err(OutOfRangeError {
                value: hz,
                min: Self::MIN_HZ,
                max: Self::MAX_HZ,
            })
        }
    }

    /// Frequency in Hz.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

// ── ToneOutput ───────────────────────────────────────────────────────────────

/// Square-wave generator with independent channels.
pub trait ToneOutput {
    /// Start (or retune) `channel` at `frequency`.
    fn start(&mut self, channel: ToneChannel, frequency: ToneHz);

    /// Silence `channel`. Stopping an idle channel is a no-op.
    fn stop(&mut self, channel: ToneChannel);
}

// ── PwmTiming ────────────────────────────────────────────────────────────────

/// RP2040 system clock feeding the PWM slices.
pub const PWM_CLOCK_HZ: u32 = 125_000_000;

/// Integer PWM slice settings for one tone.
///
/// `top = clock / (divider × frequency)` with the smallest integer divider
/// (1–255) that keeps `top` within 16 bits. `compare = top / 2` gives 50 % duty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmTiming {
    /// Integer clock divider
    pub divider: u8,
    /// Counter wrap value
    pub top: u16,
    /// Output compare level
    pub compare: u16,
}

impl PwmTiming {
    /// Compute slice settings for `frequency` at `clock_hz`.
    ///
    /// Returns `None` when no divider in 1–255 brings `top` under 65536, or
    /// when the frequency is too high for the clock (`top == 0`).
    pub fn for_frequency(frequency: ToneHz, clock_hz: u32) -> Option<Self> {
        let hz = frequency.get();
        (1..=u8::MAX).find_map(|divider| {
            let top = clock_hz.checked_div(u32::from(divider).checked_mul(hz)?)?;
            let top = u16::try_from(top).ok()?;
            if top == 0 {
                return None;
            }
            Some(Self {
                divider,
                top,
                compare: top / 2,
            })
        })
    }

    /// Resulting output frequency in Hz (integer approximation).
    pub fn actual_hz(self, clock_hz: u32) -> u32 {
        u32::from(self.divider)
            .checked_mul(u32::from(self.top))
            .and_then(|period| clock_hz.checked_div(period))
            .unwrap_or(0)
    }
}

//! Property-based tests for buzzer PWM timing.

#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

use platform::{PwmTiming, ToneHz, PWM_CLOCK_HZ};

proptest::proptest! {
    /// Every audible frequency yields settings at the system clock.
    #[test]
    fn every_audible_tone_fits(hz in ToneHz::MIN_HZ..=ToneHz::MAX_HZ) {
        let timing = PwmTiming::for_frequency(ToneHz::new(hz), PWM_CLOCK_HZ);
        assert!(timing.is_some(), "{hz} Hz has no PWM timing");
    }

    /// The chosen divider is the smallest one keeping `top` in 16 bits.
    #[test]
    fn divider_is_minimal(hz in ToneHz::MIN_HZ..=ToneHz::MAX_HZ) {
        let timing = PwmTiming::for_frequency(ToneHz::new(hz), PWM_CLOCK_HZ).unwrap();
        if timing.divider > 1 {
            let smaller = u32::from(timing.divider - 1);
            assert!(PWM_CLOCK_HZ / (smaller * hz) > u32::from(u16::MAX));
        }
    }

    /// Compare level is half of top (50 % duty).
    #[test]
    fn duty_is_half(hz in ToneHz::MIN_HZ..=ToneHz::MAX_HZ) {
        let timing = PwmTiming::for_frequency(ToneHz::new(hz), PWM_CLOCK_HZ).unwrap();
        assert_eq!(timing.compare, timing.top / 2);
    }

    /// Integer rounding keeps the output within 1 % of the request.
    #[test]
    fn output_frequency_is_close(hz in 100u32..=ToneHz::MAX_HZ) {
        let timing = PwmTiming::for_frequency(ToneHz::new(hz), PWM_CLOCK_HZ).unwrap();
        let actual = timing.actual_hz(PWM_CLOCK_HZ);
        assert!(actual.abs_diff(hz) * 100 <= hz, "{hz} Hz came out as {actual} Hz");
    }

    /// Clamping constructor never leaves the audible band.
    #[test]
    fn tone_hz_new_clamps(hz in proptest::num::u32::ANY) {
        let t = ToneHz::new(hz).get();
        assert!((ToneHz::MIN_HZ..=ToneHz::MAX_HZ).contains(&t));
    }
}

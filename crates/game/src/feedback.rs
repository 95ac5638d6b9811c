//! Status LED, progress matrix, tones and the outcome blink

use embassy_time::{Duration, Instant};
use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use platform::{
    progress_frame, ProgressIndicator, StatusColor, StatusIndicator, ToneChannel, ToneHz,
    ToneOutput,
};

use crate::{
    config::GameConfig,
    scheduler::{Alarm, AlarmHandle, AlarmQueue, Reschedule, ScheduleError},
    state::Outcome,
};

/// Status colour while playing.
pub const PLAYING_COLOR: StatusColor = StatusColor::GREEN;

/// Status colour while paused.
pub const PAUSED_COLOR: StatusColor = StatusColor::YELLOW;

/// Lit progress cell colour.
pub const PROGRESS_COLOR: Rgb888 = Rgb888::GREEN;

/// Blink colour for an outcome.
pub const fn outcome_color(outcome: Outcome) -> StatusColor {
    match outcome {
        Outcome::Victory => StatusColor::GREEN,
        Outcome::Defeat => StatusColor::RED,
    }
}

/// A reusable, statically owned alarm slot.
///
/// Holds at most one handle. Starting replaces (and cancels) the previous
/// alarm, so the slot is always either idle or owns exactly one alarm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskSlot {
    handle: Option<AlarmHandle>,
}

impl TaskSlot {
    /// Idle slot.
    pub const fn new() -> Self {
        Self { handle: None }
    }

    /// Replace the current alarm with a one-shot.
    pub fn start_after<const N: usize>(
        &mut self,
        alarms: &mut AlarmQueue<Alarm, N>,
        now: Instant,
        delay: Duration,
        alarm: Alarm,
    ) -> Result<AlarmHandle, ScheduleError> {
        self.cancel(alarms);
        let handle = alarms.after(now, delay, alarm)?;
        self.handle = Some(handle);
        Ok(handle)
    }

    /// Replace the current alarm with a repeating one.
    pub fn start_every<const N: usize>(
        &mut self,
        alarms: &mut AlarmQueue<Alarm, N>,
        now: Instant,
        period: Duration,
        alarm: Alarm,
    ) -> Result<AlarmHandle, ScheduleError> {
        self.cancel(alarms);
        let handle = alarms.every(now, period, alarm)?;
        self.handle = Some(handle);
        Ok(handle)
    }

    /// Cancel the owned alarm, if any. Returns `true` if one was pending.
    pub fn cancel<const N: usize>(&mut self, alarms: &mut AlarmQueue<Alarm, N>) -> bool {
        self.handle.take().is_some_and(|h| alarms.cancel(h))
    }

    /// True when `handle` is the alarm this slot owns.
    pub fn owns(&self, handle: AlarmHandle) -> bool {
        self.handle == Some(handle)
    }

    /// Forget the owned alarm after it completed on its own.
    pub fn release(&mut self) {
        self.handle = None;
    }

    /// True while the slot owns an alarm.
    pub fn is_busy(&self) -> bool {
        self.handle.is_some()
    }
}

/// Alternating outcome colour / black on the status LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlinkSession {
    remaining_cycles: u8,
    led_on: bool,
    mode: Outcome,
}

impl BlinkSession {
    /// Session of `cycles` colour/black pairs, starting with the colour.
    pub const fn new(mode: Outcome, cycles: u8) -> Self {
        Self {
            remaining_cycles: cycles,
            led_on: true,
            mode,
        }
    }

    /// Colour for this step and whether another step follows.
    ///
    /// A pair is counted once its black half has been shown.
    pub fn step(&mut self) -> (StatusColor, Reschedule) {
        if self.remaining_cycles == 0 {
            return (StatusColor::OFF, Reschedule::Stop);
        }
        let color = if self.led_on {
            outcome_color(self.mode)
        } else {
            self.remaining_cycles = self.remaining_cycles.saturating_sub(1);
            StatusColor::OFF
        };
        self.led_on = !self.led_on;
        let next = if self.remaining_cycles == 0 {
            Reschedule::Stop
        } else {
            Reschedule::Continue
        };
        (color, next)
    }

    /// Pairs not yet completed.
    pub fn remaining_cycles(&self) -> u8 {
        self.remaining_cycles
    }

    /// Outcome being signalled.
    pub fn mode(&self) -> Outcome {
        self.mode
    }
}

/// Drives every feedback peripheral and owns the blink and tone-cutoff slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedbackOrchestrator {
    blink: TaskSlot,
    session: Option<BlinkSession>,
    tone_cutoff: [TaskSlot; 2],
}

impl FeedbackOrchestrator {
    /// Nothing running.
    pub const fn new() -> Self {
        Self {
            blink: TaskSlot::new(),
            session: None,
            tone_cutoff: [TaskSlot::new(); 2],
        }
    }

    /// Outcome tone plus a fresh blink session, replacing any running one.
    pub fn start_outcome_feedback<B, const N: usize>(
        &mut self,
        outcome: Outcome,
        now: Instant,
        config: &GameConfig,
        alarms: &mut AlarmQueue<Alarm, N>,
        board: &mut B,
    ) where
        B: StatusIndicator + ToneOutput + ?Sized,
    {
        self.cancel_blink(alarms);
        let (channel, tone) = match outcome {
            Outcome::Victory => (ToneChannel::Primary, config.victory_tone),
            Outcome::Defeat => (ToneChannel::Secondary, config.defeat_tone),
        };
        self.emit_tone(channel, tone, now, config, alarms, board);

        match self
            .blink
            .start_every(alarms, now, config.blink_period, Alarm::BlinkStep)
        {
            Ok(_) => self.session = Some(BlinkSession::new(outcome, config.blink_cycles)),
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("blink not started: {}", _e);
                board.set_color(outcome_color(outcome));
            }
        }
    }

    /// Run one blink step for the alarm `handle`.
    pub fn on_blink_step<B: StatusIndicator + ?Sized>(
        &mut self,
        handle: AlarmHandle,
        board: &mut B,
    ) -> Reschedule {
        if !self.blink.owns(handle) {
            return Reschedule::Stop;
        }
        let Some(session) = self.session.as_mut() else {
            self.blink.release();
            return Reschedule::Stop;
        };
        let (color, next) = session.step();
        board.set_color(color);
        if next == Reschedule::Stop {
            #[cfg(feature = "defmt")]
            defmt::debug!("blink finished");
            self.session = None;
            self.blink.release();
        }
        next
    }

    /// Stop the blink session and its alarm.
    pub fn cancel_blink<const N: usize>(&mut self, alarms: &mut AlarmQueue<Alarm, N>) {
        self.blink.cancel(alarms);
        self.session = None;
    }

    /// Current blink session.
    pub fn blink(&self) -> Option<&BlinkSession> {
        self.session.as_ref()
    }

    /// Start `channel` and schedule its cutoff, superseding an older cutoff.
    pub fn emit_tone<B, const N: usize>(
        &mut self,
        channel: ToneChannel,
        frequency: ToneHz,
        now: Instant,
        config: &GameConfig,
        alarms: &mut AlarmQueue<Alarm, N>,
        board: &mut B,
    ) where
        B: ToneOutput + ?Sized,
    {
        let Some(slot) = self.tone_cutoff.get_mut(channel.index()) else {
            return;
        };
        board.start(channel, frequency);
        if let Err(_e) =
            slot.start_after(alarms, now, config.tone_duration, Alarm::ToneCutoff(channel))
        {
            #[cfg(feature = "defmt")]
            defmt::warn!("tone cutoff not scheduled ({}), silencing {}", _e, channel);
            board.stop(channel);
        }
    }

    /// Silence `channel` if `handle` is its current cutoff.
    pub fn on_tone_cutoff<B: ToneOutput + ?Sized>(
        &mut self,
        channel: ToneChannel,
        handle: AlarmHandle,
        board: &mut B,
    ) {
        if let Some(slot) = self.tone_cutoff.get_mut(channel.index()) {
            if slot.owns(handle) {
                slot.release();
                board.stop(channel);
            }
        }
    }

    /// Light the first `score` progress cells.
    pub fn show_progress<B: ProgressIndicator + ?Sized>(&self, score: u8, board: &mut B) {
        board.push(&progress_frame(usize::from(score), PROGRESS_COLOR));
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::scheduler::GameAlarms;
    use platform::mocks::{MockBoard, ToneEvent};

    #[test]
    fn blink_alternates_then_stops() {
        let mut session = BlinkSession::new(Outcome::Defeat, 3);
        let mut colors = heapless::Vec::<StatusColor, 8>::new();
        loop {
            let (c, next) = session.step();
            colors.push(c).unwrap();
            if next == Reschedule::Stop {
                break;
            }
        }
        assert_eq!(
            colors.as_slice(),
            &[
                StatusColor::RED,
                StatusColor::OFF,
                StatusColor::RED,
                StatusColor::OFF,
                StatusColor::RED,
                StatusColor::OFF
            ]
        );
        assert_eq!(session.remaining_cycles(), 0);
    }

    #[test]
    fn newer_tone_supersedes_cutoff() {
        let cfg = GameConfig::DEFAULT;
        let mut alarms = GameAlarms::new();
        let mut board = MockBoard::new();
        let mut fb = FeedbackOrchestrator::new();

        fb.emit_tone(ToneChannel::Primary, cfg.hit_tone, Instant::from_millis(0), &cfg, &mut alarms, &mut board);
        fb.emit_tone(ToneChannel::Primary, cfg.hit_tone, Instant::from_millis(150), &cfg, &mut alarms, &mut board);
        assert_eq!(alarms.active(), 1);

        // The first cutoff (200 ms) was cancelled; nothing is due yet.
        assert!(alarms.pop_due(Instant::from_millis(200)).is_none());
        let f = alarms.pop_due(Instant::from_millis(350)).unwrap();
        assert_eq!(f.alarm, Alarm::ToneCutoff(ToneChannel::Primary));
        fb.on_tone_cutoff(ToneChannel::Primary, f.handle, &mut board);
        assert_eq!(board.sounding(ToneChannel::Primary), None);
        assert_eq!(board.tone_events().last(), Some(&ToneEvent::Stop(ToneChannel::Primary)));
    }

    #[test]
    fn channels_cut_off_independently() {
        let cfg = GameConfig::DEFAULT;
        let mut alarms = GameAlarms::new();
        let mut board = MockBoard::new();
        let mut fb = FeedbackOrchestrator::new();

        fb.emit_tone(ToneChannel::Primary, cfg.hit_tone, Instant::from_millis(0), &cfg, &mut alarms, &mut board);
        fb.emit_tone(ToneChannel::Secondary, cfg.defeat_tone, Instant::from_millis(0), &cfg, &mut alarms, &mut board);
        assert_eq!(alarms.active(), 2);
        while let Some(f) = alarms.pop_due(Instant::from_millis(200)) {
            if let Alarm::ToneCutoff(ch) = f.alarm {
                fb.on_tone_cutoff(ch, f.handle, &mut board);
            }
        }
        assert_eq!(board.sounding(ToneChannel::Primary), None);
        assert_eq!(board.sounding(ToneChannel::Secondary), None);
    }

    #[test]
    fn restarting_feedback_replaces_blink() {
        let cfg = GameConfig::DEFAULT;
        let mut alarms = GameAlarms::new();
        let mut board = MockBoard::new();
        let mut fb = FeedbackOrchestrator::new();
        let now = Instant::from_millis(0);

        fb.start_outcome_feedback(Outcome::Defeat, now, &cfg, &mut alarms, &mut board);
        fb.start_outcome_feedback(Outcome::Victory, now, &cfg, &mut alarms, &mut board);

        // One blink + one cutoff per channel used.
        assert_eq!(alarms.active(), 3);
        assert_eq!(fb.blink().map(BlinkSession::mode), Some(Outcome::Victory));
    }

    #[test]
    fn stale_blink_handle_is_stopped() {
        let cfg = GameConfig::DEFAULT;
        let mut alarms = GameAlarms::new();
        let mut board = MockBoard::new();
        let mut fb = FeedbackOrchestrator::new();
        let now = Instant::from_millis(0);

        fb.start_outcome_feedback(Outcome::Defeat, now, &cfg, &mut alarms, &mut board);
        let f = loop {
            let f = alarms.pop_due(Instant::from_millis(250)).unwrap();
            if f.alarm == Alarm::BlinkStep {
                break f;
            }
        };
        fb.cancel_blink(&mut alarms);
        assert_eq!(fb.on_blink_step(f.handle, &mut board), Reschedule::Stop);
        assert!(board.status_history().is_empty());
    }

    #[test]
    fn progress_lights_score_cells() {
        let mut board = MockBoard::new();
        FeedbackOrchestrator::new().show_progress(9, &mut board);
        assert_eq!(board.lit_cells(), 9);
    }
}

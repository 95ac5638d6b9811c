//! The game controller: single owner of all game and timing state

use embassy_time::Instant;
use platform::{Board, ToneChannel};
use rand::RngCore;

use crate::{
    config::GameConfig,
    debounce::{DebounceManager, EdgeOutcome},
    feedback::{FeedbackOrchestrator, PAUSED_COLOR, PLAYING_COLOR},
    input::{Button, Mailboxes, Source},
    sampler::InputSampler,
    scheduler::{Alarm, AlarmHandle, Firing, GameAlarms, Reschedule, ScheduleError},
    screen,
    state::{ClickResult, GameState, Outcome, Phase, Position},
};

/// Owns the game state, debouncer, mailboxes, alarm table and feedback.
///
/// The firmware calls [`on_edge`](Self::on_edge) from its edge tasks and
/// [`run_due`](Self::run_due) from its alarm task, then sleeps until
/// [`next_deadline`](Self::next_deadline). Both run under one lock, so every
/// handler sees a consistent state.
pub struct GameController<R> {
    config: GameConfig,
    state: GameState,
    debounce: DebounceManager,
    mailboxes: Mailboxes,
    alarms: GameAlarms,
    feedback: FeedbackOrchestrator,
    sampler: InputSampler,
    rng: R,
    ticks: u32,
    tick: Option<AlarmHandle>,
}

impl<R: RngCore> GameController<R> {
    /// Idle controller; nothing is scheduled until [`start`](Self::start).
    pub fn new(config: GameConfig, mut rng: R) -> Self {
        let target = Position::random_target(&mut rng, &config);
        Self {
            state: GameState::new(&config, target),
            debounce: DebounceManager::new(),
            mailboxes: Mailboxes::new(),
            alarms: GameAlarms::new(),
            feedback: FeedbackOrchestrator::new(),
            sampler: InputSampler::new(&config),
            config,
            rng,
            ticks: 0,
            tick: None,
        }
    }

    /// Blank the display, reset the game and start the periodic tick.
    ///
    /// Calling it again restarts the tick from `now`.
    pub fn start<B: Board + ?Sized>(
        &mut self,
        now: Instant,
        board: &mut B,
    ) -> Result<(), ScheduleError> {
        screen::draw_blank(board);
        self.reset(board);
        if let Some(old) = self.tick.take() {
            self.alarms.cancel(old);
        }
        let handle = self
            .alarms
            .every(now, self.config.tick_period, Alarm::GameTick)?;
        self.tick = Some(handle);
        #[cfg(feature = "defmt")]
        defmt::info!("game started, tick every {} ms", self.config.tick_period.as_millis());
        Ok(())
    }

    /// Feed a falling edge. Runs in edge-handler context: never touches the board.
    pub fn on_edge(&mut self, source: Source, now: Instant) -> EdgeOutcome {
        let outcome = self.debounce.on_edge(
            source,
            now,
            self.ticks,
            &self.config,
            &mut self.alarms,
            &mut self.mailboxes,
        );
        #[cfg(feature = "defmt")]
        defmt::debug!("edge {} -> {}", source, outcome);
        outcome
    }

    /// Run every alarm due at `now`. Returns how many handlers ran.
    pub fn run_due<B: Board + ?Sized>(&mut self, now: Instant, board: &mut B) -> usize {
        let mut ran: usize = 0;
        while let Some(firing) = self.alarms.pop_due(now) {
            let reschedule = self.on_alarm(firing, now, board);
            self.alarms.finish(firing, reschedule, now);
            ran = ran.saturating_add(1);
        }
        ran
    }

    /// Earliest pending alarm.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.alarms.next_deadline()
    }

    fn on_alarm<B: Board + ?Sized>(
        &mut self,
        firing: Firing<Alarm>,
        now: Instant,
        board: &mut B,
    ) -> Reschedule {
        #[cfg(feature = "defmt")]
        defmt::trace!("alarm {} at {} ms", firing.alarm, now.as_millis());
        match firing.alarm {
            Alarm::GameTick => {
                self.tick(now, board);
                return Reschedule::Continue;
            }
            Alarm::DebounceExpired(button) => {
                if self
                    .debounce
                    .on_debounce_expired(button, &mut self.mailboxes)
                    .is_some()
                {
                    self.button_action(button, board);
                }
            }
            Alarm::ConfirmRearm => self.debounce.on_confirm_rearm(),
            Alarm::ToneCutoff(channel) => {
                self.feedback.on_tone_cutoff(channel, firing.handle, board);
            }
            Alarm::AutoReset => {
                #[cfg(feature = "defmt")]
                defmt::info!("auto reset");
                self.reset(board);
            }
            Alarm::BlinkStep => return self.feedback.on_blink_step(firing.handle, board),
        }
        Reschedule::Stop
    }

    fn button_action<B: Board + ?Sized>(&mut self, button: Button, board: &mut B) {
        match button {
            Button::A => {
                if self.state.toggle_pause() {
                    #[cfg(feature = "defmt")]
                    defmt::info!("phase -> {}", self.state.phase);
                }
            }
            Button::B => {
                #[cfg(feature = "defmt")]
                defmt::info!("manual reset");
                self.reset(board);
            }
        }
    }

    /// One state-machine evaluation.
    fn tick<B: Board + ?Sized>(&mut self, now: Instant, board: &mut B) {
        self.ticks = self.ticks.wrapping_add(1);
        match self.state.phase {
            Phase::Ended(outcome) => screen::draw_outcome(board, outcome, self.config.win_score),
            Phase::Paused => board.set_color(PAUSED_COLOR),
            Phase::Playing => self.play(now, board),
        }
    }

    fn play<B: Board + ?Sized>(&mut self, now: Instant, board: &mut B) {
        self.state.cursor = self.sampler.sample_cursor(board);

        if self.mailboxes.take(Source::JoystickConfirm).is_some() {
            let result = self.state.register_click(self.config.hit_radius);
            #[cfg(feature = "defmt")]
            defmt::debug!(
                "click {} cursor={} target={}",
                result,
                self.state.cursor,
                self.state.target
            );
            if result == ClickResult::Hit {
                self.feedback.emit_tone(
                    ToneChannel::Primary,
                    self.config.hit_tone,
                    now,
                    &self.config,
                    &mut self.alarms,
                    board,
                );
                self.state.target = Position::random_target(&mut self.rng, &self.config);
                self.feedback.show_progress(self.state.score, board);
            }
        }

        match self.state.pending_outcome(&self.config) {
            Some(outcome) => self.end(outcome, now, board),
            None => {
                screen::draw_live_frame(
                    board,
                    &self.state,
                    self.config.display_width,
                    self.config.display_height,
                );
                board.set_color(PLAYING_COLOR);
            }
        }
    }

    fn end<B: Board + ?Sized>(&mut self, outcome: Outcome, now: Instant, board: &mut B) {
        #[cfg(feature = "defmt")]
        defmt::info!(
            "game over: {} (score {}, clicks {})",
            outcome,
            self.state.score,
            self.state.clicks
        );
        if outcome == Outcome::Victory {
            self.feedback.show_progress(self.config.win_score, board);
        }
        self.state.phase = Phase::Ended(outcome);
        screen::draw_outcome(board, outcome, self.config.win_score);
        self.feedback
            .start_outcome_feedback(outcome, now, &self.config, &mut self.alarms, board);
        if let Err(_e) = self
            .alarms
            .after(now, self.config.auto_reset_delay, Alarm::AutoReset)
        {
            #[cfg(feature = "defmt")]
            defmt::warn!("auto reset not scheduled: {}", _e);
        }
    }

    /// Fresh game. A pending auto-reset is left armed; resetting twice is harmless.
    fn reset<B: Board + ?Sized>(&mut self, board: &mut B) {
        let target = Position::random_target(&mut self.rng, &self.config);
        self.state.reset(&self.config, target);
        self.mailboxes.take(Source::JoystickConfirm);
        self.feedback.show_progress(0, board);
        board.set_color(PLAYING_COLOR);
        self.feedback.cancel_blink(&mut self.alarms);
    }

    /// Current gameplay variables.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Active configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Debounce guards.
    pub fn debounce(&self) -> &DebounceManager {
        &self.debounce
    }

    /// Feedback slots and blink session.
    pub fn feedback(&self) -> &FeedbackOrchestrator {
        &self.feedback
    }

    /// Alarm table.
    pub fn alarms(&self) -> &GameAlarms {
        &self.alarms
    }

    /// Game ticks evaluated so far.
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Read the microphone against the loudness threshold.
    pub fn sample_loudness<B: Board + ?Sized>(&self, board: &mut B) -> bool {
        self.sampler.sample_loudness(board)
    }
}

//! Edge debouncing
//!
//! Two policies:
//!
//! - **Buttons A/B**: the first edge sets a busy flag and arms a one-shot
//!   alarm; further edges are swallowed until the alarm fires. The button's
//!   action runs at expiry, never in the edge handler.
//! - **Joystick switch**: every edge masks the switch and arms a re-arm
//!   alarm. The press itself is accepted only when more than the confirm
//!   window has passed since the last accepted press.

use embassy_time::Instant;

use crate::{
    config::GameConfig,
    input::{Button, InputEvent, Mailboxes, Source},
    scheduler::{Alarm, AlarmHandle, AlarmQueue},
};

/// What the debouncer did with an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeOutcome {
    /// Posted to the source mailbox
    Accepted,
    /// Button still inside its debounce window
    Suppressed,
    /// Joystick switch edge arrived while masked
    Masked,
    /// Joystick press too close to the previous accepted one
    Rejected,
    /// No alarm slot was free; the guard was left untouched
    Dropped,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ButtonGuard {
    suppressed: bool,
    pending: Option<AlarmHandle>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ConfirmGuard {
    interrupt_enabled: bool,
    last_accepted: Option<Instant>,
    rearm: Option<AlarmHandle>,
}

/// Per-source debounce state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceManager {
    a: ButtonGuard,
    b: ButtonGuard,
    confirm: ConfirmGuard,
}

impl DebounceManager {
    /// All sources idle, switch enabled, no press seen yet.
    pub const fn new() -> Self {
        Self {
            a: ButtonGuard {
                suppressed: false,
                pending: None,
            },
            b: ButtonGuard {
                suppressed: false,
                pending: None,
            },
            confirm: ConfirmGuard {
                interrupt_enabled: true,
                last_accepted: None,
                rearm: None,
            },
        }
    }

    /// Handle a falling edge on `source` observed at `now`.
    pub fn on_edge<const N: usize>(
        &mut self,
        source: Source,
        now: Instant,
        tick: u32,
        config: &GameConfig,
        alarms: &mut AlarmQueue<Alarm, N>,
        mailboxes: &mut Mailboxes,
    ) -> EdgeOutcome {
        let event = InputEvent {
            source,
            observed_at_tick: tick,
        };
        match source {
            Source::ButtonA => {
                Self::button_edge(&mut self.a, Button::A, event, now, config, alarms, mailboxes)
            }
            Source::ButtonB => {
                Self::button_edge(&mut self.b, Button::B, event, now, config, alarms, mailboxes)
            }
            Source::JoystickConfirm => self.confirm_edge(event, now, config, alarms, mailboxes),
        }
    }

    fn button_edge<const N: usize>(
        guard: &mut ButtonGuard,
        button: Button,
        event: InputEvent,
        now: Instant,
        config: &GameConfig,
        alarms: &mut AlarmQueue<Alarm, N>,
        mailboxes: &mut Mailboxes,
    ) -> EdgeOutcome {
        if guard.suppressed {
            return EdgeOutcome::Suppressed;
        }
        let Ok(handle) = alarms.after(now, config.button_debounce, Alarm::DebounceExpired(button))
        else {
            #[cfg(feature = "defmt")]
            defmt::warn!("debounce alarm unavailable, dropping {}", button);
            return EdgeOutcome::Dropped;
        };
        guard.suppressed = true;
        guard.pending = Some(handle);
        mailboxes.post(event);
        EdgeOutcome::Accepted
    }

    fn confirm_edge<const N: usize>(
        &mut self,
        event: InputEvent,
        now: Instant,
        config: &GameConfig,
        alarms: &mut AlarmQueue<Alarm, N>,
        mailboxes: &mut Mailboxes,
    ) -> EdgeOutcome {
        let guard = &mut self.confirm;
        if !guard.interrupt_enabled {
            return EdgeOutcome::Masked;
        }
        let Ok(handle) = alarms.after(now, config.confirm_debounce, Alarm::ConfirmRearm) else {
            #[cfg(feature = "defmt")]
            defmt::warn!("re-arm alarm unavailable, dropping confirm");
            return EdgeOutcome::Dropped;
        };
        guard.interrupt_enabled = false;
        guard.rearm = Some(handle);

        let spaced = guard.last_accepted.is_none_or(|last| {
            now.checked_duration_since(last)
                .is_some_and(|elapsed| elapsed > config.confirm_debounce)
        });
        if !spaced {
            return EdgeOutcome::Rejected;
        }
        guard.last_accepted = Some(now);
        mailboxes.post(event);
        EdgeOutcome::Accepted
    }

    /// Close `button`'s window and hand back the event whose action should run.
    pub fn on_debounce_expired(
        &mut self,
        button: Button,
        mailboxes: &mut Mailboxes,
    ) -> Option<InputEvent> {
        let guard = match button {
            Button::A => &mut self.a,
            Button::B => &mut self.b,
        };
        guard.suppressed = false;
        guard.pending = None;
        mailboxes.take(button.into())
    }

    /// Unmask the joystick switch.
    pub fn on_confirm_rearm(&mut self) {
        self.confirm.interrupt_enabled = true;
        self.confirm.rearm = None;
    }

    /// True while `button`'s debounce window is open.
    pub fn is_suppressed(&self, button: Button) -> bool {
        match button {
            Button::A => self.a.suppressed,
            Button::B => self.b.suppressed,
        }
    }

    /// True when the joystick switch edge is enabled.
    pub fn confirm_enabled(&self) -> bool {
        self.confirm.interrupt_enabled
    }

    /// Instant of the last accepted joystick press.
    pub fn last_confirm(&self) -> Option<Instant> {
        self.confirm.last_accepted
    }
}

impl Default for DebounceManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::arithmetic_side_effects)]

    use super::*;
    use crate::scheduler::GameAlarms;
    use embassy_time::Duration;

    struct Rig {
        debounce: DebounceManager,
        alarms: GameAlarms,
        mailboxes: Mailboxes,
        config: GameConfig,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                debounce: DebounceManager::new(),
                alarms: GameAlarms::new(),
                mailboxes: Mailboxes::new(),
                config: GameConfig::DEFAULT,
            }
        }

        fn edge(&mut self, source: Source, ms: u64) -> EdgeOutcome {
            self.debounce.on_edge(
                source,
                Instant::from_millis(ms),
                0,
                &self.config,
                &mut self.alarms,
                &mut self.mailboxes,
            )
        }

        /// Run due debounce alarms, returning the button actions that fired.
        fn expire(&mut self, ms: u64) -> usize {
            let mut actions = 0;
            while let Some(f) = self.alarms.pop_due(Instant::from_millis(ms)) {
                match f.alarm {
                    Alarm::DebounceExpired(b) => {
                        if self.debounce.on_debounce_expired(b, &mut self.mailboxes).is_some() {
                            actions += 1;
                        }
                    }
                    Alarm::ConfirmRearm => self.debounce.on_confirm_rearm(),
                    _ => {}
                }
            }
            actions
        }
    }

    #[test]
    fn button_bounce_inside_window_is_suppressed() {
        let mut rig = Rig::new();
        assert_eq!(rig.edge(Source::ButtonA, 0), EdgeOutcome::Accepted);
        assert_eq!(rig.edge(Source::ButtonA, 50), EdgeOutcome::Suppressed);
        assert_eq!(rig.edge(Source::ButtonA, 199), EdgeOutcome::Suppressed);
        assert_eq!(rig.expire(199), 0);
        assert_eq!(rig.expire(200), 1);
        assert!(!rig.debounce.is_suppressed(Button::A));
        assert_eq!(rig.edge(Source::ButtonA, 201), EdgeOutcome::Accepted);
    }

    #[test]
    fn buttons_are_independent() {
        let mut rig = Rig::new();
        assert_eq!(rig.edge(Source::ButtonA, 0), EdgeOutcome::Accepted);
        assert_eq!(rig.edge(Source::ButtonB, 10), EdgeOutcome::Accepted);
        assert_eq!(rig.expire(210), 2);
    }

    #[test]
    fn first_confirm_press_is_accepted() {
        let mut rig = Rig::new();
        assert_eq!(rig.edge(Source::JoystickConfirm, 0), EdgeOutcome::Accepted);
        assert!(rig.mailboxes.is_pending(Source::JoystickConfirm));
        assert!(!rig.debounce.confirm_enabled());
    }

    #[test]
    fn confirm_is_masked_until_rearm() {
        let mut rig = Rig::new();
        rig.edge(Source::JoystickConfirm, 1_000);
        assert_eq!(rig.edge(Source::JoystickConfirm, 1_050), EdgeOutcome::Masked);
        rig.expire(1_100);
        assert!(rig.debounce.confirm_enabled());
    }

    #[test]
    fn confirm_exactly_one_window_later_is_rejected() {
        let mut rig = Rig::new();
        rig.edge(Source::JoystickConfirm, 1_000);
        rig.expire(1_100);
        // Elapsed must be strictly greater than the window.
        assert_eq!(rig.edge(Source::JoystickConfirm, 1_100), EdgeOutcome::Rejected);
        assert_eq!(rig.debounce.last_confirm(), Some(Instant::from_millis(1_000)));
        // Rejected edges still mask the switch.
        assert!(!rig.debounce.confirm_enabled());
        rig.expire(1_200);
        assert_eq!(rig.edge(Source::JoystickConfirm, 1_201), EdgeOutcome::Accepted);
    }

    #[test]
    fn exhausted_table_drops_without_latching() {
        let mut rig = Rig::new();
        while rig
            .alarms
            .after(Instant::from_millis(0), Duration::from_secs(60), Alarm::AutoReset)
            .is_ok()
        {}
        assert_eq!(rig.edge(Source::ButtonB, 0), EdgeOutcome::Dropped);
        assert!(!rig.debounce.is_suppressed(Button::B));
        assert_eq!(rig.edge(Source::JoystickConfirm, 0), EdgeOutcome::Dropped);
        assert!(rig.debounce.confirm_enabled());
        assert!(!rig.mailboxes.is_pending(Source::JoystickConfirm));
    }
}

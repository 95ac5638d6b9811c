//! Fixed-capacity alarm table
//!
//! A small deadline scheduler replacing hardware alarm callbacks. Slots are
//! statically allocated; a slot is `Idle`, `Armed` (waiting for its deadline)
//! or `Running` (popped, its handler not yet finished). Handles carry the
//! slot's generation, so a handle kept after its alarm fired or was cancelled
//! can never touch a reused slot.
//!
//! The driver loop is:
//!
//! ```text
//! while let Some(firing) = queue.pop_due(now) {
//!     let reschedule = handle(firing.alarm);
//!     queue.finish(firing, reschedule, now);
//! }
//! sleep_until(queue.next_deadline());
//! ```
//!
//! A repeating alarm stays `Running` between `pop_due` and `finish`, so a
//! handler that stops its own alarm never frees the slot it is running in.

use embassy_time::{Duration, Instant};
use thiserror_no_std::Error;

use crate::input::Button;
use platform::ToneChannel;

/// Slot count for the game's alarm table.
///
/// Worst case: tick, two button debounces, confirm re-arm, two tone
/// cutoffs, blink, and two overlapping auto-resets.
pub const ALARM_SLOTS: usize = 12;

/// Alarm table used by the game.
pub type GameAlarms = AlarmQueue<Alarm, ALARM_SLOTS>;

/// Everything the game schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Alarm {
    /// Repeating state-machine evaluation
    GameTick,
    /// Button debounce window closed; run its action
    DebounceExpired(Button),
    /// Re-enable the joystick switch edge
    ConfirmRearm,
    /// Silence a buzzer
    ToneCutoff(ToneChannel),
    /// Start a new game after an outcome
    AutoReset,
    /// Next outcome blink step (repeating)
    BlinkStep,
}

/// Scheduling failures.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScheduleError {
    /// Every slot is armed or running.
    #[error("no free alarm slot")]
    SlotsExhausted,
    /// Repeating alarms need a positive period.
    #[error("repeating alarm period must be non-zero")]
    ZeroPeriod,
}

/// Reference to a scheduled alarm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmHandle {
    slot: u8,
    generation: u16,
}

/// A due alarm handed out by [`AlarmQueue::pop_due`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Firing<A> {
    /// Handle the alarm was scheduled under
    pub handle: AlarmHandle,
    /// Payload
    pub alarm: A,
    /// Deadline it was due at (may be earlier than now)
    pub deadline: Instant,
}

/// What a repeating alarm's handler wants next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reschedule {
    /// Fire again one period later
    Continue,
    /// Release the slot
    Stop,
}

#[derive(Debug, Clone, Copy)]
struct Entry<A> {
    alarm: A,
    deadline: Instant,
    period: Option<Duration>,
    seq: u32,
}

#[derive(Debug, Clone, Copy)]
enum SlotState<A> {
    Idle,
    Armed(Entry<A>),
    Running(Entry<A>),
}

#[derive(Debug, Clone, Copy)]
struct Slot<A> {
    generation: u16,
    state: SlotState<A>,
}

/// Deadline-ordered alarm table with `N` slots.
pub struct AlarmQueue<A, const N: usize> {
    slots: [Slot<A>; N],
    next_seq: u32,
}

impl<A: Copy, const N: usize> AlarmQueue<A, N> {
    /// Empty table.
    pub const fn new() -> Self {
        Self {
            slots: [Slot {
                generation: 0,
                state: SlotState::Idle,
            }; N],
            next_seq: 0,
        }
    }

    /// One-shot alarm `delay` after `now`.
    pub fn after(
        &mut self,
        now: Instant,
        delay: Duration,
        alarm: A,
    ) -> Result<AlarmHandle, ScheduleError> {
        self.arm(alarm, deadline_after(now, delay), None)
    }

    /// Repeating alarm, first due one `period` after `now`.
    pub fn every(
        &mut self,
        now: Instant,
        period: Duration,
        alarm: A,
    ) -> Result<AlarmHandle, ScheduleError> {
        if period.as_ticks() == 0 {
            return Err(ScheduleError::ZeroPeriod);
        }
        self.arm(alarm, deadline_after(now, period), Some(period))
    }

    /// Cancel a pending or running alarm. Returns `false` for stale handles.
    ///
    /// Cancelling a running alarm makes its eventual [`finish`](Self::finish)
    /// a no-op.
    pub fn cancel(&mut self, handle: AlarmHandle) -> bool {
        match self.slot_mut(handle) {
            Some(slot) if !matches!(slot.state, SlotState::Idle) => {
                release(slot);
                true
            }
            _ => false,
        }
    }

    /// True while `handle` refers to an armed or running alarm.
    pub fn is_pending(&self, handle: AlarmHandle) -> bool {
        self.slots
            .get(usize::from(handle.slot))
            .is_some_and(|s| s.generation == handle.generation && !matches!(s.state, SlotState::Idle))
    }

    /// Earliest armed deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.slots
            .iter()
            .filter_map(|s| match s.state {
                SlotState::Armed(e) => Some(e.deadline),
                _ => None,
            })
            .min()
    }

    /// Number of armed or running alarms.
    pub fn active(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| !matches!(s.state, SlotState::Idle))
            .count()
    }

    /// Take the earliest alarm due at `now` (ties in scheduling order).
    ///
    /// One-shot alarms release their slot immediately. Repeating alarms stay
    /// `Running` until [`finish`](Self::finish).
    pub fn pop_due(&mut self, now: Instant) -> Option<Firing<A>> {
        let (index, entry) = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| match s.state {
                SlotState::Armed(e) if e.deadline <= now => Some((i, e)),
                _ => None,
            })
            .min_by_key(|(_, e)| (e.deadline, e.seq))?;

        let slot = self.slots.get_mut(index)?;
        let handle = AlarmHandle {
            slot: u8::try_from(index).ok()?,
            generation: slot.generation,
        };
        if entry.period.is_some() {
            slot.state = SlotState::Running(entry);
        } else {
            release(slot);
        }
        Some(Firing {
            handle,
            alarm: entry.alarm,
            deadline: entry.deadline,
        })
    }

    /// Complete a firing from [`pop_due`](Self::pop_due).
    ///
    /// `Continue` re-arms a repeating alarm at `deadline + period`; when that
    /// is already in the past it moves to `now + period` instead of firing
    /// back-to-back. Ignored for one-shot and cancelled alarms.
    pub fn finish(&mut self, firing: Firing<A>, reschedule: Reschedule, now: Instant) {
        let seq = self.bump_seq();
        let Some(slot) = self.slot_mut(firing.handle) else {
            return;
        };
        let SlotState::Running(mut entry) = slot.state else {
            return;
        };
        let Some(period) = entry.period else {
            release(slot);
            return;
        };
        match reschedule {
            Reschedule::Stop => release(slot),
            Reschedule::Continue => {
                let next = deadline_after(entry.deadline, period);
                entry.deadline = if next <= now {
                    deadline_after(now, period)
                } else {
                    next
                };
                entry.seq = seq;
                slot.state = SlotState::Armed(entry);
            }
        }
    }

    fn arm(
        &mut self,
        alarm: A,
        deadline: Instant,
        period: Option<Duration>,
    ) -> Result<AlarmHandle, ScheduleError> {
        let seq = self.bump_seq();
        let (index, slot) = self
            .slots
            .iter_mut()
            .enumerate()
            .find(|(_, s)| matches!(s.state, SlotState::Idle))
            .ok_or(ScheduleError::SlotsExhausted)?;
        let index = u8::try_from(index).map_err(|_| ScheduleError::SlotsExhausted)?;
        slot.state = SlotState::Armed(Entry {
            alarm,
            deadline,
            period,
            seq,
        });
        Ok(AlarmHandle {
            slot: index,
            generation: slot.generation,
        })
    }

    fn slot_mut(&mut self, handle: AlarmHandle) -> Option<&mut Slot<A>> {
        self.slots
            .get_mut(usize::from(handle.slot))
            .filter(|s| s.generation == handle.generation)
    }

    fn bump_seq(&mut self) -> u32 {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        seq
    }
}

impl<A: Copy, const N: usize> Default for AlarmQueue<A, N> {
    fn default() -> Self {
        Self::new()
    }
}

fn release<A>(slot: &mut Slot<A>) {
    slot.state = SlotState::Idle;
    slot.generation = slot.generation.wrapping_add(1);
}

fn deadline_after(now: Instant, delay: Duration) -> Instant {
    now.checked_add(delay).unwrap_or(Instant::MAX)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    fn ms(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    #[test]
    fn one_shot_fires_once_and_frees_slot() {
        let mut q: AlarmQueue<u8, 2> = AlarmQueue::new();
        let h = q.after(at(0), ms(10), 7).unwrap();
        assert_eq!(q.next_deadline(), Some(at(10)));
        assert!(q.pop_due(at(9)).is_none());

        let f = q.pop_due(at(10)).unwrap();
        assert_eq!(f.alarm, 7);
        assert!(!q.is_pending(h));
        assert_eq!(q.active(), 0);
        q.finish(f, Reschedule::Continue, at(10));
        assert_eq!(q.active(), 0, "finish on a one-shot is ignored");
    }

    #[test]
    fn ties_fire_in_scheduling_order() {
        let mut q: AlarmQueue<u8, 3> = AlarmQueue::new();
        q.after(at(0), ms(5), 1).unwrap();
        q.after(at(0), ms(5), 2).unwrap();
        q.after(at(0), ms(3), 3).unwrap();
        let order: [u8; 3] = core::array::from_fn(|_| q.pop_due(at(5)).unwrap().alarm);
        assert_eq!(order, [3, 1, 2]);
    }

    #[test]
    fn full_table_reports_exhaustion() {
        let mut q: AlarmQueue<u8, 1> = AlarmQueue::new();
        q.after(at(0), ms(1), 0).unwrap();
        assert_eq!(q.after(at(0), ms(1), 1), Err(ScheduleError::SlotsExhausted));
    }

    #[test]
    fn zero_period_rejected() {
        let mut q: AlarmQueue<u8, 1> = AlarmQueue::new();
        assert_eq!(
            q.every(at(0), Duration::from_ticks(0), 0),
            Err(ScheduleError::ZeroPeriod)
        );
    }

    #[test]
    fn repeating_alarm_keeps_slot_while_running() {
        let mut q: AlarmQueue<u8, 1> = AlarmQueue::new();
        let h = q.every(at(0), ms(20), 1).unwrap();
        let f = q.pop_due(at(20)).unwrap();
        assert!(q.is_pending(h), "running alarm still owns its slot");
        assert_eq!(q.next_deadline(), None, "running alarm is not armed");
        assert_eq!(q.after(at(20), ms(1), 2), Err(ScheduleError::SlotsExhausted));

        q.finish(f, Reschedule::Continue, at(20));
        assert_eq!(q.next_deadline(), Some(at(40)));
    }

    #[test]
    fn stop_releases_repeating_slot() {
        let mut q: AlarmQueue<u8, 1> = AlarmQueue::new();
        let h = q.every(at(0), ms(20), 1).unwrap();
        let f = q.pop_due(at(20)).unwrap();
        q.finish(f, Reschedule::Stop, at(20));
        assert!(!q.is_pending(h));
        assert_eq!(q.active(), 0);
    }

    #[test]
    fn late_repeating_alarm_skips_missed_periods() {
        let mut q: AlarmQueue<u8, 1> = AlarmQueue::new();
        q.every(at(0), ms(20), 1).unwrap();
        let f = q.pop_due(at(75)).unwrap();
        assert_eq!(f.deadline, at(20));
        q.finish(f, Reschedule::Continue, at(75));
        assert_eq!(q.next_deadline(), Some(at(95)));
    }

    #[test]
    fn slightly_late_repeating_alarm_keeps_phase() {
        let mut q: AlarmQueue<u8, 1> = AlarmQueue::new();
        q.every(at(0), ms(20), 1).unwrap();
        let f = q.pop_due(at(25)).unwrap();
        q.finish(f, Reschedule::Continue, at(25));
        assert_eq!(q.next_deadline(), Some(at(40)));
    }

    #[test]
    fn cancel_while_running_ignores_finish() {
        let mut q: AlarmQueue<u8, 1> = AlarmQueue::new();
        let h = q.every(at(0), ms(10), 1).unwrap();
        let f = q.pop_due(at(10)).unwrap();
        assert!(q.cancel(h));
        q.finish(f, Reschedule::Continue, at(10));
        assert_eq!(q.active(), 0);
    }

    #[test]
    fn stale_handle_cannot_cancel_reused_slot() {
        let mut q: AlarmQueue<u8, 1> = AlarmQueue::new();
        let old = q.after(at(0), ms(5), 1).unwrap();
        q.pop_due(at(5)).unwrap();
        let new = q.after(at(5), ms(5), 2).unwrap();
        assert!(!q.cancel(old));
        assert!(q.is_pending(new));
    }
}

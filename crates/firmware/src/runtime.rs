//! Runtime glue between embassy tasks and the game controller.
//!
//! One [`GameController`] lives behind a blocking mutex. Edge tasks forward
//! falling edges into it and poke a [`Wake`] signal; the alarm loop runs due
//! alarms, then sleeps until the earliest deadline or the next wake,
//! whichever comes first. No lock is ever held across an `.await`.
//!
//! Everything here is generic over the raw mutex so the same code runs with
//! `ThreadModeRawMutex` on the RP2040 and `NoopRawMutex` in host tests.

use core::cell::RefCell;

use embassy_futures::select::select;
use embassy_sync::blocking_mutex::{raw::RawMutex, Mutex};
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Instant, Timer};
use embedded_hal_async::digital::Wait;
use game::{EdgeOutcome, GameController, ScheduleError, Source};
use platform::Board;
use rand::RngCore;

/// The controller slot shared by every task. Empty until [`install`].
pub type SharedGame<M, R> = Mutex<M, RefCell<Option<GameController<R>>>>;

/// Nudges the alarm loop after an edge may have armed an earlier alarm.
pub type Wake<M> = Signal<M, ()>;

/// Back-off after a failed edge wait so a broken pin cannot spin the executor.
const EDGE_RETRY: Duration = Duration::from_millis(10);

/// Empty controller slot, usable in a `static`.
pub const fn shared_game<M: RawMutex, R>() -> SharedGame<M, R> {
    Mutex::new(RefCell::new(None))
}

/// Put `controller` into the slot, replacing any previous one.
pub fn install<M: RawMutex, R>(game: &SharedGame<M, R>, controller: GameController<R>) {
    game.lock(|cell| {
        cell.replace(Some(controller));
    });
}

/// Start the installed controller. A missing controller is a no-op.
pub fn start<M, R, B>(game: &SharedGame<M, R>, board: &mut B, now: Instant) -> Result<(), ScheduleError>
where
    M: RawMutex,
    R: RngCore,
    B: Board + ?Sized,
{
    game.lock(|cell| match cell.borrow_mut().as_mut() {
        Some(controller) => controller.start(now, board),
        None => Ok(()),
    })
}

/// Hand one falling edge to the controller and wake the alarm loop.
///
/// Returns `None` while no controller is installed.
pub fn forward_edge<M, R>(
    game: &SharedGame<M, R>,
    wake: &Wake<M>,
    source: Source,
    now: Instant,
) -> Option<EdgeOutcome>
where
    M: RawMutex,
    R: RngCore,
{
    let outcome = game.lock(|cell| {
        cell.borrow_mut()
            .as_mut()
            .map(|controller| controller.on_edge(source, now))
    });
    if outcome.is_some() {
        wake.signal(());
    }
    outcome
}

/// Run every alarm due at `now` and report the next deadline.
pub fn service<M, R, B>(game: &SharedGame<M, R>, board: &mut B, now: Instant) -> Option<Instant>
where
    M: RawMutex,
    R: RngCore,
    B: Board + ?Sized,
{
    game.lock(|cell| {
        let mut slot = cell.borrow_mut();
        let controller = slot.as_mut()?;
        controller.run_due(now, board);
        controller.next_deadline()
    })
}

/// Wait for one falling edge on `pin` and forward it as `source`.
pub async fn forward_next_edge<M, R, P>(
    game: &SharedGame<M, R>,
    wake: &Wake<M>,
    source: Source,
    pin: &mut P,
) -> Result<Option<EdgeOutcome>, P::Error>
where
    M: RawMutex,
    R: RngCore,
    P: Wait,
{
    pin.wait_for_falling_edge().await?;
    Ok(forward_edge(game, wake, source, Instant::now()))
}

/// Forward every falling edge on `pin` forever.
pub async fn edge_loop<M, R, P>(game: &SharedGame<M, R>, wake: &Wake<M>, source: Source, pin: &mut P) -> !
where
    M: RawMutex,
    R: RngCore,
    P: Wait,
{
    loop {
        if forward_next_edge(game, wake, source, pin).await.is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("edge wait failed on {}", source);
            Timer::after(EDGE_RETRY).await;
        }
    }
}

/// Drive the alarm table forever: service, then sleep until the next
/// deadline or a wake from an edge task.
pub async fn run_alarm_loop<M, R, B>(game: &SharedGame<M, R>, wake: &Wake<M>, board: &mut B) -> !
where
    M: RawMutex,
    R: RngCore,
    B: Board + ?Sized,
{
    loop {
        match service(game, board, Instant::now()) {
            Some(deadline) => {
                select(Timer::at(deadline), wake.wait()).await;
            }
            None => wake.wait().await,
        }
    }
}

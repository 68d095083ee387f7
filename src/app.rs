//! `Timers` — the real-time-facing facade over [`TickTimerManager`] (§2, §6
//! ADD).
//!
//! Grounded on `examples/original_source/app.h`/`app.cpp`'s `App` class: the
//! same `std::chrono::seconds`-to-tick conversion and clamping, minus the
//! `asio::io_context`/`steady_timer` pump itself, which stays outside this
//! crate (§1 — the reactor is an external collaborator; callers invoke
//! [`Timers::run_tick`] on their own cadence).

use std::time::Duration;

use crate::callback::Callback;
use crate::error::Error;
use crate::timer::{TickTimerManager, TimerId};

/// Owns a [`TickTimerManager`] and a tick period, converting real-time
/// [`Duration`]s to tick counts the way `App::AddPeriodTimer`/
/// `App::AddOneshotTimer` convert `std::chrono::seconds` via `TickPeriod`.
pub struct Timers {
    manager: TickTimerManager,
    tick_period: Duration,
}

/// One tick is 100ms by convention (§1, §6) — the default `App` used a
/// tenth-of-a-second `TickPeriod`.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(100);

impl Timers {
    /// Builds a `Timers` facade with the default 100ms tick period. `slots`
    /// is the same ordered per-wheel slot-count list `TickTimerManager::new`
    /// takes — e.g. `&[600, 60, 24]` for the source's 1 minute / 1 hour / 1
    /// day configuration.
    pub fn new(slots: &[usize]) -> Result<Self, Error> {
        Self::with_tick_period(slots, DEFAULT_TICK_PERIOD)
    }

    /// As [`Timers::new`], with an explicit tick period instead of the
    /// 100ms default.
    pub fn with_tick_period(slots: &[usize], tick_period: Duration) -> Result<Self, Error> {
        Ok(Timers {
            manager: TickTimerManager::new(slots)?,
            tick_period,
        })
    }

    /// The tick period this facade converts real-time durations against.
    pub fn tick_period(&self) -> Duration {
        self.tick_period
    }

    /// Current absolute tick count, forwarded from the underlying manager.
    pub fn tick(&self) -> u64 {
        self.manager.tick()
    }

    /// Schedules a repeating timer, firing every `interval` starting at
    /// `interval` from now. `interval` is floored to whole ticks (minimum
    /// one tick) and clamped to the manager's maximum span, matching
    /// `App::AddPeriodTimer`'s `std::max`/`std::min` pair.
    pub fn add_period_timer(&mut self, interval: Duration, callback: Callback<TimerId>) -> TimerId {
        let ticks = self.duration_to_ticks(interval);
        self.manager.add_period_timer(ticks, callback)
    }

    /// Schedules a one-shot timer, firing once after `delay`. See
    /// [`Timers::add_period_timer`] for the duration-to-tick conversion.
    pub fn add_oneshot_timer(&mut self, delay: Duration, callback: Callback<TimerId>) -> TimerId {
        let ticks = self.duration_to_ticks(delay);
        self.manager.add_oneshot_timer(ticks, callback)
    }

    /// Cancels a timer. A no-op if `id` is stale, per §7.
    pub fn remove_timer(&mut self, id: TimerId) {
        self.manager.remove_timer(id);
    }

    /// Advances the scheduler by one tick. The §6 entry point the runtime
    /// shell calls on a steady cadence.
    pub fn run_tick(&mut self) {
        self.manager.run_tick();
    }

    fn duration_to_ticks(&self, d: Duration) -> u64 {
        let ticks = d.as_nanos() / self.tick_period.as_nanos().max(1);
        (ticks as u64).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    #[test]
    fn duration_floors_to_whole_ticks_minimum_one() {
        let timers = Timers::with_tick_period(&[10, 10], Duration::from_millis(100)).unwrap();
        assert_eq!(timers.duration_to_ticks(Duration::from_millis(50)), 1);
        assert_eq!(timers.duration_to_ticks(Duration::from_millis(250)), 2);
        assert_eq!(timers.duration_to_ticks(Duration::from_millis(0)), 1);
    }

    #[test]
    fn duration_clamps_to_manager_span() {
        let mut timers = Timers::with_tick_period(&[10, 10], Duration::from_millis(100)).unwrap();
        let fired = Rc::new(RefCell::new(0u32));
        let cb = {
            let fired = fired.clone();
            Callback::new(move |_| *fired.borrow_mut() += 1)
        };
        // 1000 ticks requested, but the manager only spans 100.
        timers.add_oneshot_timer(Duration::from_secs(100), cb);
        for _ in 0..100 {
            timers.run_tick();
        }
        assert_eq!(*fired.borrow(), 1, "clamped duration still fires, just earlier than asked");
    }

    #[test]
    fn run_tick_advances_and_fires_registered_timers() {
        let mut timers = Timers::new(&[600, 60, 24]).unwrap();
        let fired = Rc::new(RefCell::new(0u32));
        let cb = {
            let fired = fired.clone();
            Callback::new(move |_| *fired.borrow_mut() += 1)
        };
        timers.add_period_timer(DEFAULT_TICK_PERIOD, cb);
        for _ in 0..5 {
            timers.run_tick();
        }
        assert_eq!(*fired.borrow(), 5, "one-tick period fires every tick");
        assert_eq!(timers.tick(), 5);
    }
}

//! `TickTimerManager` — the wheel hierarchy and the `run_tick` driver
//! (§3, §4.4).

use crate::callback::Callback;
use crate::error::{ConfigError, Error};
use crate::utils::slab::Slab;

use super::node::{TimerId, TimerNode};
use super::wheel::TickTimerWheel;

/// Hierarchy of wheels with strictly increasing `slot_ticks`, advanced one
/// tick at a time by [`TickTimerManager::run_tick`].
///
/// Construction takes an ordered list of slot counts, exactly like the
/// source's `TickTimerManager(std::initializer_list<size_t>)` — e.g.
/// `[600, 60, 24]` with a 100ms base tick gives 1 minute / 1 hour / 1 day
/// wheels, 24 hours of reach, the configuration `app.cpp` uses.
pub struct TickTimerManager {
    wheels: Vec<TickTimerWheel>,
    nodes: Slab<TimerNode>,
    tick: u64,
}

impl TickTimerManager {
    /// Builds a manager from an ordered list of per-wheel slot counts.
    /// Rejects an empty list or any zero-slot wheel (§7 configuration
    /// error) rather than trusting the caller as the source does.
    pub fn new(slot_counts: &[usize]) -> Result<Self, Error> {
        if slot_counts.is_empty() {
            return Err(ConfigError::NoWheels.into());
        }
        let mut wheels = Vec::with_capacity(slot_counts.len());
        let mut slot_ticks: u64 = 1;
        for (level, &slots) in slot_counts.iter().enumerate() {
            if slots == 0 {
                return Err(ConfigError::ZeroSlotWheel { level }.into());
            }
            wheels.push(TickTimerWheel::new(slots, slot_ticks));
            slot_ticks *= slots as u64;
        }
        Ok(TickTimerManager {
            wheels,
            nodes: Slab::new(),
            tick: 0,
        })
    }

    /// Total span covered by the outermost wheel; durations are clamped to
    /// this many ticks.
    pub fn max_ticks(&self) -> u64 {
        self.wheels.last().expect("at least one wheel").wheel_ticks()
    }

    /// Current absolute tick count (monotonic, starts at 0).
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Schedules a repeating timer, firing every `interval` ticks starting
    /// at `tick() + interval`.
    pub fn add_period_timer(&mut self, interval: u64, callback: Callback<TimerId>) -> TimerId {
        self.add_timer(interval, callback, true)
    }

    /// Schedules a one-shot timer, firing once at `tick() + delay`.
    pub fn add_oneshot_timer(&mut self, delay: u64, callback: Callback<TimerId>) -> TimerId {
        self.add_timer(delay, callback, false)
    }

    /// Cancels a timer. A no-op if `id` is stale (already fired-and-expired
    /// and its slot recycled for something else) — Testable Property 3
    /// guards exactly this case via the slab generation.
    pub fn remove_timer(&mut self, id: TimerId) {
        if let Some(node) = self.nodes.get_mut_checked(id.index, id.generation) {
            node.valid = false;
        }
    }

    fn add_timer(&mut self, interval: u64, callback: Callback<TimerId>, periodic: bool) -> TimerId {
        let interval = interval.clamp(1, self.max_ticks());
        let (index, generation) = self.nodes.insert(TimerNode {
            next: None,
            callback,
            expire: self.tick + interval,
            interval,
            periodic,
            valid: true,
        });
        self.route_node(index);
        TimerId { index, generation }
    }

    /// Places node `index` into the smallest wheel whose span covers its
    /// interval, per §4.4 step 4.
    fn route_node(&mut self, index: usize) {
        let interval = self.nodes[index].interval;
        for wheel in &mut self.wheels {
            if interval <= wheel.wheel_ticks() {
                wheel.add_node(&mut self.nodes, index);
                return;
            }
        }
        unreachable!("interval was clamped to max_ticks(), which is the outermost wheel's span");
    }

    /// Advances the scheduler by one tick: cascades due timers inward and
    /// fires every callback due at the new tick, exactly once each.
    pub fn run_tick(&mut self) {
        self.tick += 1;
        self.move_wheel(0);

        // Snapshot the current slot's head and clear it before walking, so
        // periodic timers re-added during this walk land in the (now
        // empty) live slot and are never re-examined within this tick
        // (§9 Open Question resolution).
        let snapshot = self.wheels[0].take_current_slot();

        let mut reinsert = Vec::new();
        let mut cursor = snapshot;
        while let Some(idx) = cursor {
            let next = self.nodes[idx].next;
            cursor = next;

            let valid = self.nodes[idx].valid;
            if valid {
                let id = TimerId {
                    index: idx,
                    generation: self.nodes.generation(idx).expect("node is occupied"),
                };
                trace!("timer[{idx}] invoke at tick {}", self.tick);
                self.nodes[idx].callback.invoke(id);
            }

            // Re-read `valid`: the callback may have cancelled itself.
            let valid = self.nodes[idx].valid;
            if !valid || !self.nodes[idx].periodic {
                self.nodes.try_remove(idx);
            } else {
                self.nodes[idx].expire += self.nodes[idx].interval;
                reinsert.push(idx);
            }
        }

        for idx in reinsert {
            self.route_node(idx);
        }
    }

    /// Advances `wheels[index]`, recursing into coarser wheels on
    /// wraparound and cascading each coarser wheel's newly-current slot
    /// into the next finer one on the way back out (§4.4 step 2).
    fn move_wheel(&mut self, index: usize) {
        if self.wheels[index].move_next() == 0 && index + 1 < self.wheels.len() {
            self.move_wheel(index + 1);
        }

        if index > 0 {
            let head = self.wheels[index].take_current_slot();
            trace!("cascade wheel[{index}] -> wheel[{}]", index - 1);
            self.wheels[index - 1].add_nodes(&mut self.nodes, head);
        }
    }
}

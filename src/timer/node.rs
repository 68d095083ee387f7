//! `TimerNode` and `TimerId` (§3).

use crate::callback::Callback;

/// Opaque handle to a scheduled timer.
///
/// Comparable by identity only: it grants the right to `remove` the timer
/// it names, nothing else. A `TimerId` whose generation no longer matches
/// the slab slot it indexes (because that node was recycled and reused for
/// an unrelated timer) is treated by [`TickTimerManager::remove`] as
/// already gone, per Testable Property 3.
///
/// [`TickTimerManager::remove`]: crate::timer::TickTimerManager::remove
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId {
    pub(crate) index: usize,
    pub(crate) generation: u64,
}

/// A scheduled timer, owned by the `TickTimerManager`'s node pool.
pub(crate) struct TimerNode {
    /// Intrusive forward pointer for the containing slot's list.
    pub(crate) next: Option<usize>,
    pub(crate) callback: Callback<TimerId>,
    /// Absolute tick at which this node is due.
    pub(crate) expire: u64,
    /// Positive tick count between firings (one-shot: distance from
    /// registration to the single firing).
    pub(crate) interval: u64,
    pub(crate) periodic: bool,
    /// Tombstoned in place when cancelled; physically recycled only once
    /// the owning slot is next visited (§3 invariants).
    pub(crate) valid: bool,
}

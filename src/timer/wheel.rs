//! A single wheel: fixed slot count, each slot the head of an intrusive,
//! index-based list of timer nodes (§4.3).

use crate::utils::slab::Slab;

use super::node::TimerNode;

/// One level of the hierarchy. Node storage lives in the owning
/// `TickTimerManager`'s slab; a wheel only holds slot heads, a cursor, and
/// its own `slot_ticks` — the tick span one slot represents.
pub(crate) struct TickTimerWheel {
    slots: Vec<Option<usize>>,
    cursor: usize,
    slot_ticks: u64,
}

impl TickTimerWheel {
    pub(crate) fn new(slot_count: usize, slot_ticks: u64) -> Self {
        TickTimerWheel {
            slots: vec![None; slot_count],
            cursor: 0,
            slot_ticks,
        }
    }

    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn slot_ticks(&self) -> u64 {
        self.slot_ticks
    }

    pub(crate) fn wheel_ticks(&self) -> u64 {
        self.slot_ticks * self.slots.len() as u64
    }

    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    /// Places `node_idx` at the slot its `expire` maps to. Constant time.
    pub(crate) fn add_node(&mut self, nodes: &mut Slab<TimerNode>, node_idx: usize) {
        let expire = nodes[node_idx].expire % self.wheel_ticks();
        let slot = (expire / self.slot_ticks) as usize;
        let head = self.slots[slot];
        nodes[node_idx].next = head;
        self.slots[slot] = Some(node_idx);
    }

    /// Re-adds every node in an already-unlinked list (used while
    /// cascading); each node is re-bucketed by the wheel's own `add_node`.
    pub(crate) fn add_nodes(&mut self, nodes: &mut Slab<TimerNode>, mut head: Option<usize>) {
        while let Some(idx) = head {
            let next = nodes[idx].next;
            self.add_node(nodes, idx);
            head = next;
        }
    }

    /// Advances the cursor by one slot, returning the new cursor. Callers
    /// detect wraparound via `== 0`.
    pub(crate) fn move_next(&mut self) -> usize {
        self.cursor = (self.cursor + 1) % self.slots.len();
        self.cursor
    }

    /// Takes the current slot's head, leaving the slot empty. Used by
    /// `run_tick`'s snapshot-then-walk (§9 Open Question resolution).
    pub(crate) fn take_current_slot(&mut self) -> Option<usize> {
        self.slots[self.cursor].take()
    }
}

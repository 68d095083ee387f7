//! Hierarchical timing wheel (§3, §4.3, §4.4).
//!
//! The implementation follows `examples/original_source/tick_timer.h` /
//! `tick_timer.cpp`: a sequence of wheels with strictly increasing
//! `slot_ticks`, cascading timers inward as coarser cursors wrap, and a
//! snapshot-then-walk `run_tick` so periodic timers re-added mid-tick are
//! never re-examined within the same tick.
//!
//! Departures from the source are representational, not behavioral: nodes
//! live in an index-addressed [`crate::utils::slab::Slab`] rather than being
//! `new`/`delete`d by hand, and a [`TimerId`] carries a generation so a
//! stale handle can't be mistaken for a reused node (see `SPEC_FULL.md` §3).

mod manager;
mod node;
mod wheel;

pub use manager::TickTimerManager;
pub use node::TimerId;

//! Chained coroutine tasks (§3, §4.5).
//!
//! `CoFrame`/`CoTask` in `examples/original_source/cotask.h` are a
//! hand-rolled `coroutine_handle`-based state machine with explicit
//! `prev_frame` linkage. This module rebuilds the same contract — suspend-
//! always initial policy, suspend-with-chain-resume final policy, monitor-
//! gated resume, chain collapse on a dead ancestor — on top of
//! `std::future::Future`, which is the compiler-generated coroutine state
//! machine Rust already has.

mod frame;
mod task;
mod waker;

pub use task::CoTask;

use std::future::Future;
use std::pin::Pin;
use std::task::Context;

/// Drives `task` to completion synchronously (§4.5 "CoSpawn").
///
/// Every suspension point in this crate is either a child [`CoTask`] await
/// (itself driven depth-first to completion or collapse) or nothing at all —
/// coroutines here never cross a tick boundary, only timers do — so `spawn`
/// in practice always returns with `task` finished. It uses a waker that
/// performs no scheduling, the same `detail::AwaitTask`/`DetachedTask`
/// rendition as the source: no initial suspend, no final suspend, run the
/// factory's task to its first (and only) suspension under the caller.
pub fn spawn<T: 'static>(task: CoTask<T>) {
    let mut task = task;
    let waker = waker::dummy_waker();
    let mut cx = Context::from_waker(&waker);
    let _ = Pin::new(&mut task).poll(&mut cx);
}

/// Spawns a plain future with no particular host binding — convenience for
/// a factory that doesn't itself need to return a [`CoTask`].
pub fn spawn_fn<F>(fut: F)
where
    F: Future<Output = ()> + 'static,
{
    spawn(CoTask::new(fut));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn spawn_runs_chain_to_completion_synchronously() {
        let ran = Rc::new(Cell::new(false));
        let ran2 = ran.clone();
        spawn_fn(async move {
            ran2.set(true);
        });
        assert!(ran.get());
    }

    #[test]
    fn spawn_of_a_cotask_runs_and_drops_its_frame() {
        let task: CoTask<i32> = CoTask::new(async { 5 });
        assert!(!task.is_finished());
        spawn(task);
        // `task` was moved into `spawn`; nothing left to assert on it here
        // beyond the fact that `spawn` didn't panic or hang.
    }
}

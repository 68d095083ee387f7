//! A waker that does nothing but record that a wakeup happened.
//!
//! Forked from monoio's `task::waker_fn` (`dummy_waker`). This crate drives a
//! spawned coroutine chain to its first suspension synchronously, exactly
//! like the teacher's own timer/sleep machinery polls once with a no-op
//! waker to check readiness without scheduling further work on some other
//! executor.

use std::task::{RawWaker, RawWakerVTable, Waker};

/// Creates a waker that performs no scheduling. Polling a future with it
/// tells you whether the future is ready *right now*; it does not arrange
/// for a later poll.
pub(crate) fn dummy_waker() -> Waker {
    fn raw_waker() -> RawWaker {
        // the pointer is never dereferenced, so null is fine.
        RawWaker::new(std::ptr::null::<()>(), vtable())
    }

    fn vtable() -> &'static RawWakerVTable {
        &RawWakerVTable::new(|_| raw_waker(), |_| {}, |_| {}, |_| {})
    }

    unsafe { Waker::from_raw(raw_waker()) }
}

//! `CoFrame<T>` — the boxed coroutine body plus its lifetime/parentage
//! bookkeeping (§3, §4.5).
//!
//! The source hand-rolls a coroutine frame (`detail::CoFrameBase` /
//! `CoFrame<T>`) around a compiler-generated `coroutine_handle`. Rust's own
//! `async`/`.await` desugaring already generates an equivalent compiler-built
//! state machine, so a frame here is just that state machine boxed behind
//! `Future<Output = T>` — the "sum over `{no_value, value<T>}`" the Design
//! Notes call for is exactly `Future::Output`.

use std::future::Future;
use std::pin::Pin;

use crate::lifetime::Monitor;

/// One of the four states named in §4.5. Tracked for introspection only —
/// `Future::poll`'s return value already carries the information a caller
/// needs to drive a frame correctly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FrameState {
    /// Constructed, never polled (suspend-always initial policy).
    Created,
    /// Currently inside a `poll` call.
    Running,
    /// `poll` returned `Pending` at least once; awaiting a child or, in a
    /// richer runtime, a future external event.
    SuspendedOnChild,
    /// `poll` has returned `Ready`; the frame's future has been dropped.
    Finished,
}

/// A single coroutine's boxed body, lifetime monitor, and recorded parent.
///
/// `prev_frame` from §3 is represented as `parent_monitor`: rather than a raw
/// parent frame pointer, this frame remembers only the one thing it needs
/// from its parent — whether resuming the parent is still valid — captured
/// the first time it is polled (the Rust analogue of `CoTask::await_suspend`
/// calling `SetPrevFrame`). It is filled in from [`super::task::CURRENT_FRAME`],
/// a scoped thread-local holding the monitor of whichever frame is currently
/// being polled, forked from the source's flagged-BROKEN global `host`
/// pointer but scoped to the dynamic extent of one `poll` call instead of
/// process lifetime.
pub(crate) struct CoFrame<T> {
    pub(crate) fut: Pin<Box<dyn Future<Output = T>>>,
    pub(crate) monitor: Monitor,
    pub(crate) parent_monitor: Option<Monitor>,
    pub(crate) state: FrameState,
}

impl<T> CoFrame<T> {
    pub(crate) fn new(monitor: Monitor, fut: impl Future<Output = T> + 'static) -> Self {
        CoFrame {
            fut: Box::pin(fut),
            monitor,
            parent_monitor: None,
            state: FrameState::Created,
        }
    }
}

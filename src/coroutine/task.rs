//! `CoTask<T>` — the unique handle to a [`CoFrame`] (§3, §4.5).
//!
//! Mirrors `async::CoTask<T>`: non-copyable, movable, destroys its frame on
//! drop. Awaiting a `CoTask` is the Rust rendition of `co_await childTask`:
//! [`CoTask::poll`] plays the role of the source's `CoFrame::Resume` /
//! `FinalAwaitable::await_suspend` pair, folded into one `Future::poll` call
//! because Rust's executor model doesn't separate "resume" (driving a
//! suspended coroutine forward) from "poll" (the same operation) the way a
//! hand-written `coroutine_handle` API does.
//!
//! # Why `Future::Output = Option<T>`
//!
//! The source's `DestroyChain` tears a coroutine down without ever reaching
//! `return_value`/`return_void` when resuming its parent is rejected (the
//! parent's own host died while the child was running). That is a
//! value-less outcome the parent's own awaiter must be able to observe and
//! propagate further up the chain — precisely what `Option::None` expresses,
//! and precisely why every `CoTask::poll` in this crate returns
//! `Poll::Ready(None)` instead of leaving the future pending forever: a
//! chain with a dead link has nothing left to wait for. A coroutine body
//! strings several awaits together with `?` (stable for `Option`-returning
//! functions), so a dead link anywhere in the chain collapses every
//! ancestor's result to `None` without each level needing to re-check
//! liveness by hand.
//!
//! One honest deviation from the source: a body that doesn't propagate a
//! collapsed await with `?` (e.g. `async move { child.await }` with nothing
//! after it) sees that collapse as an ordinary `None` *value* rather than
//! non-completion, and itself finishes normally — `Some(None)`, not `None`,
//! to whoever polls it. The source can silently abandon a coroutine mid-body
//! because `coroutine_handle::resume()` is a side door outside the
//! language's control flow; safe Rust has no such door, so a body must opt
//! into re-propagating collapse the same way it opts into propagating any
//! other early exit.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::lifetime::{CallbackHost, Monitor};
use crate::scoped_thread_local;

use super::frame::{CoFrame, FrameState};

scoped_thread_local!(static CURRENT_FRAME: Monitor);

/// Unique handle to a coroutine frame. Non-copyable; movable; dropping it
/// while the frame hasn't finished destroys the frame (§3 "owned by the
/// CoTask handle until the task completes or the task handle is dropped,
/// whichever is first").
pub struct CoTask<T> {
    frame: Option<Box<CoFrame<T>>>,
}

impl<T> CoTask<T> {
    /// Builds an unmonitored task: its resumption is never gated by a dead
    /// host (§4.1 "absent monitor never gates").
    pub fn new(fut: impl Future<Output = T> + 'static) -> Self {
        CoTask {
            frame: Some(Box::new(CoFrame::new(Monitor::absent(), fut))),
        }
    }

    /// Builds a task whose resumption is gated on `host`'s liveness — the
    /// rendition of a frame constructed "on behalf of" a host object (§4.5
    /// "Lifetime binding").
    pub fn bound<H: CallbackHost>(host: &H, fut: impl Future<Output = T> + 'static) -> Self {
        CoTask {
            frame: Some(Box::new(CoFrame::new(host.monitor(), fut))),
        }
    }

    /// `true` once this task's frame has run to completion (or collapsed via
    /// a dead monitor) and been destroyed. A task in this state must not be
    /// polled again.
    pub fn is_finished(&self) -> bool {
        self.frame.is_none()
    }
}

impl<T> Future for CoTask<T> {
    type Output = Option<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        // `CoTask<T>` only ever holds owned heap boxes, so moving it is
        // always sound — it is `Unpin` without needing to say so.
        let this = self.get_mut();
        let frame = this
            .frame
            .as_mut()
            .expect("CoTask polled after it already finished");

        // Record our awaiter (if any) the first time we're resumed — the
        // Rust analogue of `CoTask::await_suspend`'s `SetPrevFrame`, read
        // from whichever frame is currently being polled one level up.
        if frame.parent_monitor.is_none() {
            frame.parent_monitor = CURRENT_FRAME.try_with(|m| m.cloned());
        }

        // Resume is a no-op when our own host has died (§4.5): collapse
        // without ever touching the inner future.
        if frame.monitor.is_valid() && !frame.monitor.is_alive() {
            trace!("coroutine resume skipped: monitor dead");
            this.frame = None;
            return Poll::Ready(None);
        }

        frame.state = FrameState::Running;

        // What a nested `.await` inside our body should see as "the nearest
        // host that cares whether this chain keeps running": our own
        // monitor if we carry one, otherwise whatever we ourselves inherited
        // from our caller. This lets a dead root host's death propagate
        // through any number of unmonitored intermediate helper tasks, not
        // just the immediate child.
        let effective_monitor = if frame.monitor.is_valid() {
            frame.monitor.clone()
        } else {
            frame.parent_monitor.clone().unwrap_or_default()
        };
        let inner = CURRENT_FRAME.set(&effective_monitor, || frame.fut.as_mut().poll(cx));

        match inner {
            Poll::Pending => {
                frame.state = FrameState::SuspendedOnChild;
                Poll::Pending
            }
            Poll::Ready(value) => {
                // Before reporting our value upward, check whether our
                // recorded parent can still be resumed. If not, the source
                // would call `DestroyChain` here instead of returning
                // through `return_value`/`return_void` — we express that by
                // reporting `None`, which every ancestor's `?` propagates.
                let parent_resumable = match &frame.parent_monitor {
                    Some(m) => !m.is_valid() || m.is_alive(),
                    None => true,
                };
                this.frame = None;
                if parent_resumable {
                    Poll::Ready(Some(value))
                } else {
                    trace!("coroutine chain collapsed: parent not resumable");
                    Poll::Ready(None)
                }
            }
        }
    }
}

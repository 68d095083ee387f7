//! Liveness tracking for callbacks and coroutine frames that may outlive the
//! object that registered them.
//!
//! Mirrors `async::LifeTimeTracker`/`Monitor` from the source this crate was
//! ported from: a host object embeds a [`LifetimeTracker`] and hands out
//! cheap [`Monitor`] handles that can be asked, at invocation time, whether
//! the host is still around. The source hand-rolls a `{count, dead}`
//! refcounted struct for this; here `Rc`/`Weak` already track exactly that
//! (strong count, and "has every strong reference been dropped") so the
//! tracker is just an `Rc<()>` in disguise.
//!
//! Single-threaded by construction: `Rc`/`Weak` are `!Send`/`!Sync`, so
//! misuse across threads is a compile error rather than a documented
//! footgun.

use std::rc::{Rc, Weak};

/// Owned by a `CallbackHost`. Dropping the tracker is what makes its
/// [`Monitor`]s report dead; the host's own drop glue (dropping this field)
/// is a host's only required teardown step, with no explicit
/// callback/coroutine deregistration needed.
#[derive(Debug, Default)]
pub struct LifetimeTracker(Rc<()>);

impl LifetimeTracker {
    /// Creates a new, independent tracker.
    pub fn new() -> Self {
        LifetimeTracker(Rc::new(()))
    }

    /// Hands out a new liveness observer for this tracker's owner.
    pub fn monitor(&self) -> Monitor {
        Monitor(Rc::downgrade(&self.0))
    }
}

/// A weak liveness observer for a [`CallbackHost`].
///
/// Cheap to clone; cloning does not extend the host's lifetime. The default
/// value is the *absent* monitor (§4.1): it never gates invocation.
#[derive(Debug, Default, Clone)]
pub struct Monitor(Weak<()>);

impl Monitor {
    /// An absent monitor: `is_valid()` is `false`, and it never gates a
    /// callback or coroutine resume.
    pub fn absent() -> Self {
        Monitor(Weak::new())
    }

    /// `true` unless this monitor was default-constructed / built with
    /// [`Monitor::absent`]. An absent monitor carries no tracker to check
    /// against, so callers must not treat `is_valid() == false` as "dead" —
    /// it means "untracked".
    pub fn is_valid(&self) -> bool {
        self.0.strong_count() > 0 || self.was_ever_bound()
    }

    /// `true` if this monitor is bound to a tracker and that tracker's
    /// owner is still alive. A monitor that was never bound to a tracker
    /// (`is_valid() == false`) is never "alive" either — callers should
    /// check `is_valid()` first if they need to distinguish absent from
    /// dead.
    pub fn is_alive(&self) -> bool {
        self.0.upgrade().is_some()
    }

    fn was_ever_bound(&self) -> bool {
        // A `Weak` created via `Rc::downgrade` always reports a nonzero
        // weak count for as long as this `Monitor` (or a clone of it)
        // exists, even after the host has died. `Weak::new()` never does.
        self.0.weak_count() > 0 || self.0.strong_count() > 0
    }
}

/// Trait for objects that may be the anchor of a monitored [`Callback`] or
/// coroutine frame.
///
/// [`Callback`]: crate::callback::Callback
pub trait CallbackHost {
    /// Returns a monitor tracking this host's lifetime.
    fn monitor(&self) -> Monitor;
}

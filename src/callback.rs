//! Monitor-gated invocables (§4.2).
//!
//! A `Callback<A>` is the Rust rendition of `async::Callback<T>` from the
//! source: a boxed closure plus an optional [`Monitor`]. `Invoke` becomes
//! [`Callback::invoke`], following the same three-step contract: no bound
//! function, or a dead monitor, silently skip; otherwise call through.
//!
//! The source's `CallbackFunctionTraits` forbids pointer/reference arguments
//! to the bound function via a `static_assert`. Rust has no variadic
//! templates, so `Callback<A>` is generic over a single argument type `A`
//! (use a tuple for multiple arguments). References narrower than `'static`
//! are rejected at the type level by the `A: 'static` bound. Raw pointers
//! (`*const T`/`*mut T`) are `'static` regardless of what they point to, so
//! that bound alone lets them through; stable Rust has no trait that is
//! implemented for every type except raw pointers (there is no way to
//! negatively bound against them generically), so the raw-pointer half of
//! the rule is enforced with the registration-time check Design Notes §9
//! calls for instead: [`assert_not_raw_pointer`].

use std::rc::Rc;

use crate::lifetime::{CallbackHost, Monitor};

/// Registration-time half of §4.2's "no pointer/reference arguments" rule
/// (Design Notes §9: "enforce at the type level where the language allows,
/// otherwise at registration time"). `A: 'static` already rejects borrowed
/// references at the type level; this catches the raw pointers that bound
/// alone cannot, by inspecting `A`'s type name for a `*const `/`*mut `
/// prefix. Panics at bind time rather than letting a dangling capture
/// through silently.
fn assert_not_raw_pointer<A>() {
    let name = std::any::type_name::<A>();
    assert!(
        !name.starts_with("*const ") && !name.starts_with("*mut "),
        "Callback<A> forbids raw pointer arguments (A = {name}): a captured \
         pointer can dangle past the pointee's lifetime"
    );
}

/// A callable of one argument, gated on an optional [`Monitor`].
///
/// Cloning a `Callback` is cheap (the closure is reference-counted); this
/// mirrors the source's `Callback<T>` being freely copied once bound.
pub struct Callback<A> {
    func: Option<Rc<dyn Fn(A)>>,
    monitor: Monitor,
}

impl<A> Clone for Callback<A> {
    fn clone(&self) -> Self {
        Callback {
            func: self.func.clone(),
            monitor: self.monitor.clone(),
        }
    }
}

impl<A: 'static> Callback<A> {
    /// Binds a plain function or closure with no monitor. Use this for
    /// callbacks that aren't anchored to a `CallbackHost` (the source's
    /// `MakeCallback` with a non-member function).
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(A) + 'static,
    {
        assert_not_raw_pointer::<A>();
        Callback {
            func: Some(Rc::new(func)),
            monitor: Monitor::absent(),
        }
    }

    /// Binds a closure whose captured `host` anchors the callback's
    /// lifetime: invocation is skipped once `host` has been destroyed. This
    /// is the rendition of the source's member-function `MakeCallback`,
    /// which attaches the monitor from the host receiver.
    pub fn bound<H, F>(host: &H, func: F) -> Self
    where
        H: CallbackHost,
        F: Fn(A) + 'static,
    {
        assert_not_raw_pointer::<A>();
        Callback {
            func: Some(Rc::new(func)),
            monitor: host.monitor(),
        }
    }

    /// An unbound callback that does nothing when invoked.
    pub fn noop() -> Self {
        Callback {
            func: None,
            monitor: Monitor::absent(),
        }
    }

    /// Invokes the bound function with `arg`, unless unbound or the monitor
    /// reports the host dead. Never fails; a skipped invocation is not an
    /// error (§7).
    pub fn invoke(&self, arg: A) {
        let Some(func) = &self.func else {
            return;
        };
        if self.monitor.is_valid() && !self.monitor.is_alive() {
            trace!("callback skipped: monitor dead");
            return;
        }
        func(arg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifetime::LifetimeTracker;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Host {
        tracker: LifetimeTracker,
    }

    impl CallbackHost for Host {
        fn monitor(&self) -> Monitor {
            self.tracker.monitor()
        }
    }

    #[test]
    fn unbound_callback_always_invokes() {
        let calls = Rc::new(Cell::new(0));
        let c = {
            let calls = calls.clone();
            Callback::new(move |n: u32| calls.set(calls.get() + n))
        };
        c.invoke(5);
        c.invoke(5);
        assert_eq!(calls.get(), 10);
    }

    #[test]
    fn bound_callback_skips_after_host_dies() {
        let calls = Rc::new(Cell::new(0));
        let host = Host {
            tracker: LifetimeTracker::new(),
        };
        let c = {
            let calls = calls.clone();
            Callback::bound(&host, move |()| calls.set(calls.get() + 1))
        };
        c.invoke(());
        assert_eq!(calls.get(), 1);
        drop(host);
        c.invoke(());
        assert_eq!(calls.get(), 1, "invocation after host death is a no-op");
    }

    #[test]
    fn noop_callback_never_invokes() {
        let c: Callback<()> = Callback::noop();
        c.invoke(()); // must not panic
    }

    #[test]
    fn repeated_invocation_is_defined_and_safe() {
        let calls = Rc::new(Cell::new(0));
        let c = {
            let calls = calls.clone();
            Callback::new(move |()| calls.set(calls.get() + 1))
        };
        for _ in 0..100 {
            c.invoke(());
        }
        assert_eq!(calls.get(), 100);
    }

    #[test]
    #[should_panic(expected = "forbids raw pointer arguments")]
    fn new_rejects_raw_const_pointer_argument() {
        let _ = Callback::<*const u32>::new(|_p| {});
    }

    #[test]
    #[should_panic(expected = "forbids raw pointer arguments")]
    fn new_rejects_raw_mut_pointer_argument() {
        let _ = Callback::<*mut u32>::new(|_p| {});
    }

    #[test]
    fn new_accepts_non_pointer_arguments() {
        // Sanity check that the guard doesn't over-reject ordinary types.
        let _ = Callback::<u32>::new(|_| {});
        let _ = Callback::<(u32, bool)>::new(|_| {});
        let _: Callback<()> = Callback::new(|_| {});
    }
}

//! Integration tests for the scenarios named in spec.md §8 (S1-S6), driving
//! the crate the way an integrator would: through `Timers` and `spawn`
//! rather than poking `TickTimerManager` directly.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tickrt::{Callback, CallbackHost, LifetimeTracker, Monitor, Timers};

struct Host {
    tracker: LifetimeTracker,
}

impl CallbackHost for Host {
    fn monitor(&self) -> Monitor {
        self.tracker.monitor()
    }
}

#[test]
fn s1_basic_one_shot() {
    let mut timers = Timers::with_tick_period(&[10, 10], Duration::from_millis(1)).unwrap();
    let fired = Rc::new(RefCell::new(0u32));
    let cb = {
        let fired = fired.clone();
        Callback::new(move |_| *fired.borrow_mut() += 1)
    };
    timers.add_oneshot_timer(Duration::from_millis(7), cb);
    for t in 1..=100u64 {
        timers.run_tick();
        if t == 7 {
            assert_eq!(*fired.borrow(), 1, "fires exactly at tick 7");
        }
    }
    assert_eq!(*fired.borrow(), 1, "no further fires through tick 100");
}

#[test]
fn s2_cascading_one_shot() {
    let mut timers = Timers::with_tick_period(&[10, 10], Duration::from_millis(1)).unwrap();
    let fired_at = Rc::new(RefCell::new(None));
    let cb = {
        let fired_at = fired_at.clone();
        Callback::new(move |_| {
            *fired_at.borrow_mut() = Some(());
        })
    };
    timers.add_oneshot_timer(Duration::from_millis(35), cb);
    for t in 1..=34u64 {
        timers.run_tick();
        assert!(fired_at.borrow().is_none(), "must not fire before tick 35 (t={t})");
    }
    timers.run_tick(); // tick 35
    assert!(fired_at.borrow().is_some(), "fires at tick 35 after cascading from W[1]");
}

#[test]
fn s3_periodic_under_cascade() {
    let mut timers = Timers::with_tick_period(&[10, 10], Duration::from_millis(1)).unwrap();
    let fires = Rc::new(RefCell::new(Vec::new()));
    let cb = {
        let fires = fires.clone();
        Callback::new(move |_| fires.borrow_mut().push(()))
    };
    timers.add_period_timer(Duration::from_millis(13), cb);
    for _ in 0..104u64 {
        timers.run_tick();
    }
    assert_eq!(fires.borrow().len(), 8, "fires at 13,26,...,104 -- no skips, no extras");
}

#[test]
fn s4_cancel_within_callback_on_third_firing() {
    let timers = Rc::new(RefCell::new(
        Timers::with_tick_period(&[10, 10], Duration::from_millis(1)).unwrap(),
    ));
    let fires = Rc::new(RefCell::new(0u32));
    let id_slot: Rc<RefCell<Option<tickrt::TimerId>>> = Rc::new(RefCell::new(None));

    let fires_for_cb = fires.clone();
    let id_slot_for_cb = id_slot.clone();
    let timers_for_cb = timers.clone();
    let cb = Callback::new(move |id| {
        *fires_for_cb.borrow_mut() += 1;
        if *fires_for_cb.borrow() == 3 {
            let target = id_slot_for_cb.borrow().unwrap_or(id);
            timers_for_cb.borrow_mut().remove_timer(target);
        }
    });
    let id = timers.borrow_mut().add_period_timer(Duration::from_millis(5), cb);
    *id_slot.borrow_mut() = Some(id);

    for _ in 0..200u64 {
        timers.borrow_mut().run_tick();
    }
    assert_eq!(*fires.borrow(), 3, "stops firing after self-cancel on the 3rd fire");
}

#[test]
fn s5_host_dies_before_first_firing() {
    let mut timers = Timers::with_tick_period(&[10, 10], Duration::from_millis(1)).unwrap();
    let invoked = Rc::new(RefCell::new(false));

    let host = Host {
        tracker: LifetimeTracker::new(),
    };
    let invoked_for_cb = invoked.clone();
    let cb = Callback::bound(&host, move |_| *invoked_for_cb.borrow_mut() = true);
    timers.add_period_timer(Duration::from_millis(10), cb);

    drop(host); // host dies before its first scheduled firing

    for _ in 0..50u64 {
        timers.run_tick();
    }
    assert!(!*invoked.borrow(), "monitor-gated callback never runs once the host is dead");
}

#[test]
fn s6_coroutine_chain_returns_child_value_and_leaves_no_frames() {
    use tickrt::CoTask;

    let log = Rc::new(RefCell::new(Vec::new()));

    fn t1(log: Rc<RefCell<Vec<&'static str>>>) -> CoTask<i32> {
        CoTask::new(async move {
            log.borrow_mut().push("T1 return 42");
            42
        })
    }

    fn t2(log: Rc<RefCell<Vec<&'static str>>>) -> CoTask<Option<i32>> {
        CoTask::new(async move { t1(log).await })
    }

    let mut task = t2(log.clone());
    // Drive the chain to completion ourselves to inspect the result before
    // the task handle (and its frame) is dropped -- mirrors `spawn`'s own
    // synchronous drive but lets us assert on the produced value too.
    let waker = futures::task::noop_waker();
    let mut cx = std::task::Context::from_waker(&waker);
    let result = match std::pin::Pin::new(&mut task).poll(&mut cx) {
        std::task::Poll::Ready(v) => v,
        std::task::Poll::Pending => panic!("the whole chain runs synchronously"),
    };

    assert_eq!(result, Some(Some(42)));
    assert_eq!(log.borrow().as_slice(), ["T1 return 42"]);
    assert!(task.is_finished(), "no frames remain live once the chain completes");

    drop(task); // dropping an already-finished task must not double-free anything
}

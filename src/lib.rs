#![doc = include_str!("../README.md")]
#![warn(missing_docs, unreachable_pub)]

//! Crate root. Re-exports the three layers described in the crate docs:
//! liveness tracking ([`lifetime`]), monitor-gated callbacks ([`callback`]),
//! the hierarchical timing wheel ([`timer`]), chained coroutine tasks
//! ([`coroutine`]), and the [`app`] facade that ties the wheel to real-time
//! durations.

#[macro_use]
mod macros;

pub mod app;
pub mod callback;
pub mod coroutine;
pub mod error;
pub mod lifetime;
pub mod timer;
pub(crate) mod utils;

pub use app::Timers;
pub use callback::Callback;
pub use coroutine::{spawn, CoTask};
pub use error::{ConfigError, Error};
pub use lifetime::{CallbackHost, LifetimeTracker, Monitor};
pub use timer::{TickTimerManager, TimerId};

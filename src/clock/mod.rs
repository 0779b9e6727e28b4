//! Scheduling abstraction for deferred board work.
//!
//! The board never sleeps. It asks a `Scheduler` for two kinds of timers:
//!
//! - a one-shot `ConcealMismatch` task after a wrong guess
//! - a repeating `Tick` task driving the elapsed-time counter
//!
//! The host drains due timers with `pop_due` and hands each `Firing` back to
//! the board. Cancelling is idempotent, and firings for timers the board no
//! longer tracks are dropped by the board.
//!
//! ## Implementations
//!
//! - `ManualClock`: time only moves when the caller says so (tests, replays)
//! - `InstantClock`: wall-clock time via `std::time::Instant`, polled from a
//!   host loop

mod instant;
mod manual;
mod queue;

pub use instant::InstantClock;
pub use manual::ManualClock;
pub use queue::TimerQueue;

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Handle to a scheduled timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimerId(pub u64);

impl std::fmt::Display for TimerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Timer({})", self.0)
    }
}

/// Work the board defers to a timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerTask {
    /// Turn a mismatched pair face-down again.
    ConcealMismatch,
    /// Advance the elapsed-time counter.
    Tick,
}

/// A timer that has come due.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Firing {
    /// Which timer fired.
    pub id: TimerId,
    /// What it was scheduled to do.
    pub task: TimerTask,
    /// Clock time the firing was due at.
    pub due: Duration,
}

/// Cancellable one-shot and repeating timers.
pub trait Scheduler {
    /// Current clock time, measured from the clock's origin.
    fn now(&self) -> Duration;

    /// Run `task` once after `delay`.
    fn schedule_once(&mut self, delay: Duration, task: TimerTask) -> TimerId;

    /// Run `task` every `interval`, first after one interval.
    fn schedule_repeating(&mut self, interval: Duration, task: TimerTask) -> TimerId;

    /// Cancel a timer. Returns `false` if it already fired or was cancelled.
    fn cancel(&mut self, id: TimerId) -> bool;

    /// Take the earliest firing due at or before `now()`, if any.
    fn pop_due(&mut self) -> Option<Firing>;

    /// Number of timers still armed.
    fn pending(&self) -> usize;
}

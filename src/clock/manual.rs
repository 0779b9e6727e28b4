//! Deterministic clock that only moves when told to.

use std::time::Duration;

use super::{Firing, Scheduler, TimerId, TimerQueue, TimerTask};

/// Fake clock for tests and replays.
///
/// ```
/// use std::time::Duration;
/// use memory_match::clock::{ManualClock, Scheduler, TimerTask};
///
/// let mut clock = ManualClock::new();
/// clock.schedule_once(Duration::from_millis(1000), TimerTask::ConcealMismatch);
///
/// assert!(clock.advance(Duration::from_millis(999)).is_empty());
/// assert_eq!(clock.advance(Duration::from_millis(1)).len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Duration,
    queue: TimerQueue,
}

impl ManualClock {
    /// Create a clock at time zero with nothing scheduled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward, collecting everything that came due.
    pub fn advance(&mut self, by: Duration) -> Vec<Firing> {
        self.set_now(self.now + by);
        std::iter::from_fn(|| self.pop_due()).collect()
    }

    /// Jump to an absolute time. Time never moves backwards.
    pub fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Earliest due time among armed timers.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.queue.next_due()
    }
}

impl Scheduler for ManualClock {
    fn now(&self) -> Duration {
        self.now
    }

    fn schedule_once(&mut self, delay: Duration, task: TimerTask) -> TimerId {
        self.queue.schedule(self.now, delay, task, None)
    }

    fn schedule_repeating(&mut self, interval: Duration, task: TimerTask) -> TimerId {
        self.queue.schedule(self.now, interval, task, Some(interval))
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        self.queue.cancel(id)
    }

    fn pop_due(&mut self) -> Option<Firing> {
        self.queue.pop_due(self.now)
    }

    fn pending(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_fires_repeating() {
        let mut clock = ManualClock::new();
        clock.schedule_repeating(Duration::from_secs(1), TimerTask::Tick);

        let firings = clock.advance(Duration::from_millis(3500));
        assert_eq!(firings.len(), 3);
        assert!(firings.iter().all(|f| f.task == TimerTask::Tick));
        assert_eq!(clock.now(), Duration::from_millis(3500));
        assert_eq!(clock.pending(), 1);
    }

    #[test]
    fn test_schedule_is_relative_to_now() {
        let mut clock = ManualClock::new();
        clock.advance(Duration::from_secs(5));
        clock.schedule_once(Duration::from_secs(1), TimerTask::ConcealMismatch);

        assert_eq!(clock.next_due(), Some(Duration::from_secs(6)));
    }

    #[test]
    fn test_set_now_never_rewinds() {
        let mut clock = ManualClock::new();
        clock.set_now(Duration::from_secs(2));
        clock.set_now(Duration::from_secs(1));
        assert_eq!(clock.now(), Duration::from_secs(2));
    }
}

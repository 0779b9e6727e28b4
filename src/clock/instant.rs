//! Wall-clock scheduler for interactive hosts.

use std::time::{Duration, Instant};

use super::{Firing, Scheduler, TimerId, TimerQueue, TimerTask};

/// Scheduler backed by `std::time::Instant`.
///
/// Nothing runs in the background: the host's event loop calls
/// `BoardEngine::run_due` (or `pop_due` directly) whenever it wakes up, and
/// can use `until_next` to decide how long to sleep.
#[derive(Clone, Debug)]
pub struct InstantClock {
    origin: Instant,
    queue: TimerQueue,
}

impl InstantClock {
    /// Create a clock whose origin is the moment of construction.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            queue: TimerQueue::new(),
        }
    }

    /// Time until the next timer is due. `Some(ZERO)` if one is overdue.
    #[must_use]
    pub fn until_next(&self) -> Option<Duration> {
        let now = self.now();
        self.queue.next_due().map(|due| due.saturating_sub(now))
    }
}

impl Default for InstantClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for InstantClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn schedule_once(&mut self, delay: Duration, task: TimerTask) -> TimerId {
        let now = self.now();
        self.queue.schedule(now, delay, task, None)
    }

    fn schedule_repeating(&mut self, interval: Duration, task: TimerTask) -> TimerId {
        let now = self.now();
        self.queue.schedule(now, interval, task, Some(interval))
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        self.queue.cancel(id)
    }

    fn pop_due(&mut self) -> Option<Firing> {
        let now = self.now();
        self.queue.pop_due(now)
    }

    fn pending(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_delay_is_due_immediately() {
        let mut clock = InstantClock::new();
        let id = clock.schedule_once(Duration::ZERO, TimerTask::ConcealMismatch);

        assert_eq!(clock.until_next(), Some(Duration::ZERO));
        assert_eq!(clock.pop_due().map(|f| f.id), Some(id));
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn test_far_timer_not_due() {
        let mut clock = InstantClock::new();
        let id = clock.schedule_repeating(Duration::from_secs(3600), TimerTask::Tick);

        assert!(clock.pop_due().is_none());
        assert!(clock.until_next().unwrap() > Duration::from_secs(3500));
        assert!(clock.cancel(id));
        assert_eq!(clock.until_next(), None);
    }
}

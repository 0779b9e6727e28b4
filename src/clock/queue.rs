//! Timer bookkeeping shared by every clock implementation.

use std::time::Duration;

use super::{Firing, TimerId, TimerTask};

#[derive(Clone, Debug)]
struct Entry {
    id: TimerId,
    task: TimerTask,
    due: Duration,
    interval: Option<Duration>,
}

/// Armed timers ordered by due time, then by scheduling order.
///
/// Only a handful of timers are ever armed at once, so a flat `Vec` with a
/// linear scan beats a heap here.
#[derive(Clone, Debug, Default)]
pub struct TimerQueue {
    entries: Vec<Entry>,
    next_id: u64,
}

impl TimerQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a timer due at `now + delay`, repeating every `interval` if given.
    ///
    /// # Panics
    ///
    /// Panics on a zero repeat interval, which would fire forever.
    pub fn schedule(
        &mut self,
        now: Duration,
        delay: Duration,
        task: TimerTask,
        interval: Option<Duration>,
    ) -> TimerId {
        assert!(
            interval.map_or(true, |i| !i.is_zero()),
            "Repeat interval must be non-zero"
        );

        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            task,
            due: now + delay,
            interval,
        });
        id
    }

    /// Disarm a timer. Idempotent.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Earliest due time among armed timers.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.entries.iter().map(|e| e.due).min()
    }

    /// Take the earliest firing due at or before `now`.
    ///
    /// Repeating timers are re-armed one interval after the due time they
    /// just fired for, so a late poll catches up one firing at a time.
    pub fn pop_due(&mut self, now: Duration) -> Option<Firing> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= now)
            .min_by_key(|(_, e)| (e.due, e.id))
            .map(|(i, _)| i)?;

        let entry = &self.entries[idx];
        let firing = Firing {
            id: entry.id,
            task: entry.task,
            due: entry.due,
        };

        match entry.interval {
            Some(interval) => self.entries[idx].due += interval,
            None => {
                self.entries.swap_remove(idx);
            }
        }

        Some(firing)
    }

    /// Number of armed timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is armed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_once_fires_once() {
        let mut queue = TimerQueue::new();
        let id = queue.schedule(ms(0), ms(100), TimerTask::ConcealMismatch, None);

        assert!(queue.pop_due(ms(99)).is_none());

        let firing = queue.pop_due(ms(100)).unwrap();
        assert_eq!(firing.id, id);
        assert_eq!(firing.task, TimerTask::ConcealMismatch);
        assert_eq!(firing.due, ms(100));

        assert!(queue.pop_due(ms(1000)).is_none());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_repeating_catches_up() {
        let mut queue = TimerQueue::new();
        queue.schedule(ms(0), ms(10), TimerTask::Tick, Some(ms(10)));

        let mut dues = Vec::new();
        while let Some(f) = queue.pop_due(ms(35)) {
            dues.push(f.due);
        }

        assert_eq!(dues, vec![ms(10), ms(20), ms(30)]);
        assert_eq!(queue.next_due(), Some(ms(40)));
    }

    #[test]
    fn test_order_by_due_then_id() {
        let mut queue = TimerQueue::new();
        let late = queue.schedule(ms(0), ms(50), TimerTask::Tick, None);
        let first = queue.schedule(ms(0), ms(20), TimerTask::Tick, None);
        let second = queue.schedule(ms(0), ms(20), TimerTask::ConcealMismatch, None);

        assert_eq!(queue.pop_due(ms(100)).unwrap().id, first);
        assert_eq!(queue.pop_due(ms(100)).unwrap().id, second);
        assert_eq!(queue.pop_due(ms(100)).unwrap().id, late);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut queue = TimerQueue::new();
        let id = queue.schedule(ms(0), ms(10), TimerTask::Tick, Some(ms(10)));

        assert!(queue.cancel(id));
        assert!(!queue.cancel(id));
        assert!(queue.pop_due(ms(100)).is_none());
    }

    #[test]
    #[should_panic(expected = "Repeat interval must be non-zero")]
    fn test_zero_interval_panics() {
        let mut queue = TimerQueue::new();
        queue.schedule(ms(0), ms(0), TimerTask::Tick, Some(ms(0)));
    }
}

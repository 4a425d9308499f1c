//! Tick-driven timer queue.
//!
//! The navigator never sleeps. Hosts move the clock forward with
//! `Navigator::advance` and every task whose due time has been reached fires
//! on the caller's thread, earliest first. Tasks scheduled while draining
//! (a retry re-arming itself) fire in the same advance if they fall due.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Scheduled<T> {
    id: TimerId,
    due: Duration,
    task: T,
}

#[derive(Debug)]
pub struct Scheduler<T> {
    now: Duration,
    next_id: u64,
    pending: Vec<Scheduled<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            pending: Vec::new(),
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current position of the clock.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn now_ms(&self) -> u64 {
        self.now.as_millis() as u64
    }

    pub fn schedule(&mut self, delay: Duration, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Scheduled {
            id,
            due: self.now + delay,
            task,
        });
        id
    }

    /// Drop a scheduled task. Returns false if it already fired or never existed.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|entry| entry.id != id);
        self.pending.len() != before
    }

    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.pending.iter().any(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return the earliest task due at or before `until`, moving the
    /// clock to its due time. Ties fire in scheduling order.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TimerId, T)> {
        let position = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due <= until)
            .min_by_key(|(_, entry)| (entry.due, entry.id))
            .map(|(idx, _)| idx)?;
        let entry = self.pending.remove(position);
        if entry.due > self.now {
            self.now = entry.due;
        }
        Some((entry.id, entry.task))
    }

    /// Move the clock to `until` once every due task has been drained.
    pub fn settle(&mut self, until: Duration) {
        if until > self.now {
            self.now = until;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn pops_in_due_order() {
        let mut timers = Scheduler::new();
        timers.schedule(ms(300), "late");
        timers.schedule(ms(100), "early");
        timers.schedule(ms(100), "early-second");

        let until = ms(1000);
        let mut fired = Vec::new();
        while let Some((_, task)) = timers.pop_due(until) {
            fired.push((task, timers.now_ms()));
        }
        assert_eq!(
            fired,
            vec![("early", 100), ("early-second", 100), ("late", 300)]
        );
    }

    #[test]
    fn tasks_not_yet_due_stay_pending() {
        let mut timers = Scheduler::new();
        timers.schedule(ms(500), ());
        assert!(timers.pop_due(ms(499)).is_none());
        timers.settle(ms(499));
        assert_eq!(timers.now_ms(), 499);
        assert!(timers.pop_due(ms(500)).is_some());
    }

    #[test]
    fn cancel_removes_task() {
        let mut timers = Scheduler::new();
        let id = timers.schedule(ms(10), ());
        assert!(timers.is_scheduled(id));
        assert!(timers.cancel(id));
        assert!(!timers.cancel(id));
        assert!(timers.is_empty());
    }

    #[test]
    fn delay_is_relative_to_current_clock() {
        let mut timers = Scheduler::new();
        timers.settle(ms(250));
        timers.schedule(ms(100), ());
        assert!(timers.pop_due(ms(349)).is_none());
        assert!(timers.pop_due(ms(350)).is_some());
        assert_eq!(timers.now_ms(), 350);
    }
}

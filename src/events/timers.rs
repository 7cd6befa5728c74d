//! Logical timer queue
//!
//! Deadlines are offsets from page load. The bus advances the queue; nothing
//! here reads a wall clock.

use std::collections::HashMap;
use std::time::Duration;

use super::messages::TimerId;

/// Smallest repeat interval accepted; zero would re-fire forever
const MIN_REPEAT: Duration = Duration::from_millis(1);

#[derive(Debug, Clone)]
struct Entry {
    deadline: Duration,
    every: Option<Duration>,
    seq: u64,
}

/// Pending timers keyed by id
#[derive(Debug, Default)]
pub struct TimerQueue {
    entries: HashMap<TimerId, Entry>,
    seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a timer, replacing any previous timer with the same id
    pub fn schedule(&mut self, timer: TimerId, deadline: Duration, every: Option<Duration>) {
        self.seq += 1;
        let every = every.map(|interval| interval.max(MIN_REPEAT));
        self.entries.insert(
            timer,
            Entry {
                deadline,
                every,
                seq: self.seq,
            },
        );
    }

    /// Disarm a timer. Returns true if it was pending.
    pub fn cancel(&mut self, timer: &TimerId) -> bool {
        self.entries.remove(timer).is_some()
    }

    pub fn is_scheduled(&self, timer: &TimerId) -> bool {
        self.entries.contains_key(timer)
    }

    /// Deadline of a pending timer
    pub fn deadline(&self, timer: &TimerId) -> Option<Duration> {
        self.entries.get(timer).map(|entry| entry.deadline)
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.values().map(|entry| entry.deadline).min()
    }

    /// Pop the earliest timer due at or before `now`
    ///
    /// Ties resolve in scheduling order. Repeating timers are re-armed one
    /// interval after their deadline before being returned.
    pub fn pop_due(&mut self, now: Duration) -> Option<(Duration, TimerId)> {
        let (timer, deadline) = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.deadline <= now)
            .min_by_key(|(_, entry)| (entry.deadline, entry.seq))
            .map(|(timer, entry)| (timer.clone(), entry.deadline))?;

        let every = self.entries.get(&timer).and_then(|entry| entry.every);
        match every {
            Some(interval) => self.schedule(timer.clone(), deadline + interval, Some(interval)),
            None => {
                self.entries.remove(&timer);
            }
        }

        Some((deadline, timer))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

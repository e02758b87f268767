use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Identity of a deferred action. Each key occupies a single slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TimerKey {
    /// Recompute the catalog.
    Refresh,
    /// Next clipboard poll.
    ClipboardPoll,
    /// Settle delay before announcing a newly created file.
    NewFileSettle(PathBuf),
    /// Hide the transient status notice.
    ClearNotice,
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    deadline: Instant,
    seq: u64,
}

/// Keyed single-slot timers driven by an externally supplied clock.
///
/// Scheduling a key that is already pending replaces its deadline, so a burst
/// of requests collapses into one firing after the last request.
#[derive(Debug, Default)]
pub struct TimerQueue {
    slots: HashMap<TimerKey, Slot>,
    next_seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `key` to fire at `now + delay`. Returns true when an earlier
    /// pending instance was superseded.
    pub fn schedule(&mut self, key: TimerKey, now: Instant, delay: Duration) -> bool {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.slots
            .insert(
                key,
                Slot {
                    deadline: now + delay,
                    seq,
                },
            )
            .is_some()
    }

    pub fn cancel(&mut self, key: &TimerKey) -> bool {
        self.slots.remove(key).is_some()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn is_pending(&self, key: &TimerKey) -> bool {
        self.slots.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.slots.values().map(|slot| slot.deadline).min()
    }

    /// Time left until the earliest deadline, zero if already due.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Removes and returns every key due at `now`, earliest first.
    pub fn pop_due(&mut self, now: Instant) -> Vec<TimerKey> {
        let mut due: Vec<(TimerKey, Slot)> = self
            .slots
            .iter()
            .filter(|(_, slot)| slot.deadline <= now)
            .map(|(key, slot)| (key.clone(), *slot))
            .collect();
        due.sort_by_key(|(_, slot)| (slot.deadline, slot.seq));
        for (key, _) in &due {
            self.slots.remove(key);
        }
        due.into_iter().map(|(key, _)| key).collect()
    }
}

//! Tick-relative periodic schedule shared by every simulation cadence.

use std::{collections::BTreeMap, time::Duration};

use arena_survivor_core::TimerId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct TimerEntry {
    period: Duration,
    next_due: Duration,
}

/// Named periodic entries keyed off the session clock.
#[derive(Debug, Default)]
pub(crate) struct Scheduler {
    entries: BTreeMap<TimerId, TimerEntry>,
}

impl Scheduler {
    /// Cancels any entry registered under `timer` and installs a fresh one due at `now + period`.
    ///
    /// Zero periods are rejected so a single tick can never spin forever.
    pub(crate) fn restart(&mut self, timer: TimerId, period: Duration, now: Duration) -> bool {
        if period.is_zero() {
            return false;
        }

        let _ = self.entries.insert(
            timer,
            TimerEntry {
                period,
                next_due: now.saturating_add(period),
            },
        );
        true
    }

    pub(crate) fn period(&self, timer: TimerId) -> Option<Duration> {
        self.entries.get(&timer).map(|entry| entry.period)
    }

    pub(crate) fn next_due(&self, timer: TimerId) -> Option<Duration> {
        self.entries.get(&timer).map(|entry| entry.next_due)
    }

    /// Fires every entry due at or before `now` in chronological order.
    ///
    /// Entries that fall due several times within the elapsed window fire once
    /// per period. Simultaneous entries fire in `TimerId` order.
    pub(crate) fn advance(&mut self, now: Duration, fired: &mut Vec<TimerId>) {
        loop {
            let earliest = self
                .entries
                .iter()
                .filter(|(_, entry)| entry.next_due <= now)
                .min_by_key(|(timer, entry)| (entry.next_due, **timer))
                .map(|(timer, _)| *timer);

            let Some(timer) = earliest else {
                break;
            };

            if let Some(entry) = self.entries.get_mut(&timer) {
                entry.next_due = entry.next_due.saturating_add(entry.period);
            }
            fired.push(timer);
        }
    }
}

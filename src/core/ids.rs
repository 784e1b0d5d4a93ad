//! Expense identifier allocation.
//!
//! Ids are millisecond timestamps, matching what older stores contain, but the
//! generator never hands out the same value twice: two adds inside one clock
//! tick (or a clock stepping backwards) get `last + 1`.

use crate::domain::ExpenseId;

use super::clock::Clock;

#[derive(Debug, Default, Clone)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    /// Starts after the largest id already in use.
    pub fn seeded<'a>(existing: impl IntoIterator<Item = &'a ExpenseId>) -> Self {
        let last = existing.into_iter().map(|id| id.value()).max().unwrap_or(0);
        Self { last }
    }

    pub fn next(&mut self, clock: &dyn Clock) -> ExpenseId {
        let now = u64::try_from(clock.now().timestamp_millis()).unwrap_or(0);
        self.last = now.max(self.last.saturating_add(1));
        ExpenseId(self.last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use chrono::{TimeZone, Utc};

    #[test]
    fn uses_clock_millis_when_ahead() {
        let clock = FixedClock(Utc.timestamp_millis_opt(1_709_600_000_000).unwrap());
        let mut ids = IdGenerator::default();
        assert_eq!(ids.next(&clock), ExpenseId(1_709_600_000_000));
    }

    #[test]
    fn same_tick_yields_distinct_increasing_ids() {
        let clock = FixedClock(Utc.timestamp_millis_opt(1_000).unwrap());
        let mut ids = IdGenerator::default();
        let first = ids.next(&clock);
        let second = ids.next(&clock);
        let third = ids.next(&clock);
        assert!(first < second && second < third);
    }

    #[test]
    fn seeded_generator_never_reuses_loaded_ids() {
        let clock = FixedClock(Utc.timestamp_millis_opt(10).unwrap());
        let existing = [ExpenseId(500), ExpenseId(42)];
        let mut ids = IdGenerator::seeded(existing.iter());
        assert_eq!(ids.next(&clock), ExpenseId(501));
    }
}

//! Time source used for token issuance and expiry checks.

use chrono::{DateTime, TimeDelta, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

/// Wall-clock abstraction so expiry can be tested deterministically.
pub trait Clock: Send + Sync {
    /// Current time.
    fn now(&self) -> DateTime<Utc>;
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to, with one-second resolution.
///
/// Clones share the same time, so a test can keep a handle while the
/// service owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    secs: Arc<AtomicI64>,
}

impl ManualClock {
    /// Create a clock stopped at `at`.
    #[must_use]
    pub fn at(at: DateTime<Utc>) -> Self {
        Self {
            secs: Arc::new(AtomicI64::new(at.timestamp())),
        }
    }

    /// Create a clock stopped at the given Unix timestamp.
    #[must_use]
    pub fn at_timestamp(secs: i64) -> Self {
        Self {
            secs: Arc::new(AtomicI64::new(secs)),
        }
    }

    /// Move the clock to `at`.
    pub fn set(&self, at: DateTime<Utc>) {
        self.secs.store(at.timestamp(), Ordering::SeqCst);
    }

    /// Move the clock by `delta`, which may be negative.
    pub fn advance(&self, delta: TimeDelta) {
        self.secs.fetch_add(delta.num_seconds(), Ordering::SeqCst);
    }

    /// Current Unix timestamp.
    #[must_use]
    pub fn timestamp(&self) -> i64 {
        self.secs.load(Ordering::SeqCst)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.timestamp(), 0).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advance() {
        let clock = ManualClock::at_timestamp(1_700_000_000);
        clock.advance(TimeDelta::seconds(3599));
        assert_eq!(clock.now().timestamp(), 1_700_003_599);

        clock.advance(TimeDelta::seconds(-599));
        assert_eq!(clock.timestamp(), 1_700_003_000);
    }

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::at_timestamp(0);
        let handle = clock.clone();
        handle.advance(TimeDelta::seconds(10));
        assert_eq!(clock.timestamp(), 10);
    }

    #[test]
    fn test_system_clock_moves_forward() {
        let first = SystemClock.now();
        let second = SystemClock.now();
        assert!(second >= first);
    }
}

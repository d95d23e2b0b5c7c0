//! Injectable clock
//!
//! All period math takes "today" from a [`Clock`] handed in by the caller so
//! that dashboards and insights are reproducible in tests.

use chrono::{Local, NaiveDate, NaiveDateTime};

pub trait Clock: Send + Sync {
    /// Local wall-clock time
    fn now(&self) -> NaiveDateTime;

    /// Local calendar date
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Reads the system's local time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock pinned to one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: NaiveDateTime,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }

    /// Pin to noon on `date`
    pub fn on(date: NaiveDate) -> Self {
        Self {
            now: date.and_hms_opt(12, 0, 0).unwrap_or_default(),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now
    }
}

//! Budget periods
//!
//! A period is a calendar month. Every aggregate is scoped to one, and the
//! analytics screen lets the user step through past months but never into
//! the future.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A (year, month) pair
///
/// Field order makes the derived ordering chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Create a period, returning `None` for an invalid month or an
    /// out-of-range year
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    /// The period a date falls in
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The period containing `today`
    pub fn current(today: NaiveDate) -> Self {
        Self::of(today)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    pub fn last_day(&self) -> NaiveDate {
        self.next()
            .first_day()
            .pred_opt()
            .unwrap_or_else(|| self.first_day())
    }

    /// Number of days in the month (28..=31)
    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Whether this period is strictly after `other`
    pub fn is_after(&self, other: Period) -> bool {
        *self > other
    }

    /// Whether this is the period containing `today`
    pub fn is_current(&self, today: NaiveDate) -> bool {
        *self == Self::current(today)
    }

    /// Pull a future period back to the current one
    pub fn clamp_to(self, today: NaiveDate) -> Self {
        let current = Self::current(today);
        if self.is_after(current) {
            current
        } else {
            self
        }
    }

    /// Whether stepping forward one month stays within the past or present
    pub fn can_advance(&self, today: NaiveDate) -> bool {
        !self.next().is_after(Self::current(today))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first_day().format("%B %Y"))
    }
}

impl std::str::FromStr for Period {
    type Err = String;

    /// Parse `YYYY-MM`
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| format!("Invalid period: {} (expected YYYY-MM)", s))?;
        let year: i32 = year
            .parse()
            .map_err(|_| format!("Invalid year in period: {}", s))?;
        let month: u32 = month
            .parse()
            .map_err(|_| format!("Invalid month in period: {}", s))?;
        Self::new(year, month).ok_or_else(|| format!("Invalid period: {}", s))
    }
}

/// Number of days in the month containing `date`
pub fn days_in_month(date: NaiveDate) -> u32 {
    Period::of(date).days_in_month()
}

use crate::datetime::parse_input;
use crate::error::{Error, Result};
use chrono::{Duration, NaiveDateTime, NaiveTime};

/// Whole days of history the API keeps before today.
pub const RETENTION_DAYS: i64 = 2;

/// Oldest instant a query may start at: two days before `now`'s date, at 01:00.
pub fn earliest_allowed(now: NaiveDateTime) -> NaiveDateTime {
    let day = now.date() - Duration::days(RETENTION_DAYS);
    day.and_time(NaiveTime::from_hms_opt(1, 0, 0).unwrap_or(NaiveTime::MIN))
}

/// Enforce `from <= to` and the retention horizon, in that order.
pub fn check_range(from: NaiveDateTime, to: NaiveDateTime, now: NaiveDateTime) -> Result<()> {
    if from > to {
        return Err(Error::InvalidRange);
    }
    let earliest = earliest_allowed(now);
    if from < earliest {
        return Err(Error::RangeTooOld { earliest });
    }
    Ok(())
}

/// A validated, closed query window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
}

impl Window {
    /// Build a window from the two date fields, checked against `now`.
    pub fn from_input(from: &str, to: &str, now: NaiveDateTime) -> Result<Self> {
        let from = parse_input(from)?;
        let to = parse_input(to)?;
        check_range(from, to, now)?;
        Ok(Window { from, to })
    }

    /// Both bounds inclusive.
    pub fn contains(&self, t: NaiveDateTime) -> bool {
        t >= self.from && t <= self.to
    }
}

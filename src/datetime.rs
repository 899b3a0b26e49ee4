//! Parsing and validation of the `DD-MM-YYYY HH:MM` date-time text used in both
//! date fields of the front ends.
//!
//! ```
//! use gios_rs::datetime::{parse, validate_format};
//!
//! assert!(validate_format("08-06-2024 10:00"));
//! let p = parse("08-06-2024 10:00")?;
//! assert_eq!((p.day, p.month, p.year, p.hour, p.minute), (8, 6, 2024, 10, 0));
//! assert_eq!(p.to_string(), "08-06-2024 10:00");
//! # Ok::<(), gios_rs::Error>(())
//! ```

use crate::error::{Error, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Exact width of a valid date-time text.
pub const INPUT_LEN: usize = 16;

// ASCII digits only: `\d` would also accept other Unicode digits that `parse` rejects.
static INPUT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{2}-[0-9]{2}-[0-9]{4} [0-9]{2}:[0-9]{2}$").expect("date regex")
});

/// Calendar fields as typed by the user.
///
/// `month` is 1-based and `year` is the full year. A value equal to
/// `TimePoint::default()` is the soft-failure result of [`parse`] and must be
/// treated as invalid by callers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TimePoint {
    pub day: u32,
    pub month: u32,
    pub year: i32,
    pub hour: u32,
    pub minute: u32,
}

impl TimePoint {
    pub fn is_zeroed(&self) -> bool {
        *self == TimePoint::default()
    }

    /// Convert to a timezone-naive local instant.
    ///
    /// Day and month overflow is carried over like `mktime` does, so
    /// `31-02-2024` lands on 2 March and day `00` on the previous month's last day.
    /// Returns `None` only when the result leaves chrono's supported range.
    pub fn to_datetime(&self) -> Option<NaiveDateTime> {
        let months = i64::from(self.year) * 12 + i64::from(self.month) - 1;
        let year = i32::try_from(months.div_euclid(12)).ok()?;
        let month0 = months.rem_euclid(12) as u32;
        let first = NaiveDate::from_ymd_opt(year, month0 + 1, 1)?;
        let date = first.checked_add_signed(Duration::days(i64::from(self.day) - 1))?;
        let midnight = date.and_hms_opt(0, 0, 0)?;
        midnight.checked_add_signed(
            Duration::hours(i64::from(self.hour)) + Duration::minutes(i64::from(self.minute)),
        )
    }
}

impl fmt::Display for TimePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}-{:02}-{:04} {:02}:{:02}",
            self.day, self.month, self.year, self.hour, self.minute
        )
    }
}

/// True iff `text` is exactly `DD-MM-YYYY HH:MM` made of ASCII digits.
pub fn validate_format(text: &str) -> bool {
    INPUT_RE.is_match(text)
}

fn field<T: std::str::FromStr>(text: &str, from: usize, to: usize) -> Result<T> {
    text.get(from..to)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| Error::format(text))
}

/// Split a 16-character date-time text into its fields.
///
/// Expects [`validate_format`] to have accepted `text` already; it is not called here.
/// - wrong length → zeroed `TimePoint`
/// - non-numeric field → `Error::Format`
/// - hour above 23 or minute above 59 → zeroed `TimePoint`
pub fn parse(text: &str) -> Result<TimePoint> {
    if text.len() != INPUT_LEN {
        return Ok(TimePoint::default());
    }

    let point = TimePoint {
        day: field(text, 0, 2)?,
        month: field(text, 3, 5)?,
        year: field(text, 6, 10)?,
        hour: field(text, 11, 13)?,
        minute: field(text, 14, 16)?,
    };

    if point.hour > 23 || point.minute > 59 {
        return Ok(TimePoint::default());
    }
    Ok(point)
}

/// Validate, parse and convert one user-entered bound.
///
/// Unlike [`parse`], every failure (bad shape, bad time of day) is an `Error::Format`.
pub fn parse_input(text: &str) -> Result<NaiveDateTime> {
    if !validate_format(text) {
        return Err(Error::format(text));
    }
    let point = parse(text)?;
    if point.is_zeroed() {
        return Err(Error::format(text));
    }
    point.to_datetime().ok_or_else(|| Error::format(text))
}

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Resolution;

/// Requested calendar components do not form a real date/time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no such calendar date/time: {year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}")]
pub struct OutOfRangeError {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

/// A calendar date with time-of-day, second precision, no time zone.
///
/// Values are always fully populated; a field's [`Resolution`] decides how
/// much of the value is displayed and compared, not how much is stored.
/// Serializes as an ISO-8601 string (`"2014-03-14T00:00:00"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateValue(NaiveDateTime);

impl DateValue {
    /// Build a value at midnight. Rejects components that do not name a real
    /// calendar date (`2014-02-30`, month `13`, ...).
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, OutOfRangeError> {
        Self::from_ymd_hms(year, month, day, 0, 0, 0)
    }

    /// Build a value with an explicit time of day.
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self, OutOfRangeError> {
        let err = OutOfRangeError {
            year,
            month,
            day,
            hour,
            minute,
            second,
        };
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or(err)?;
        let time = NaiveTime::from_hms_opt(hour, minute, second).ok_or(err)?;
        Ok(Self(NaiveDateTime::new(date, time)))
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// Month of year, `1`-`12`.
    pub fn month(self) -> u32 {
        self.0.month()
    }

    /// Day of month, `1`-`31`.
    pub fn day(self) -> u32 {
        self.0.day()
    }

    pub fn hour(self) -> u32 {
        self.0.hour()
    }

    pub fn minute(self) -> u32 {
        self.0.minute()
    }

    pub fn second(self) -> u32 {
        self.0.second()
    }

    pub fn weekday(self) -> Weekday {
        self.0.weekday()
    }

    /// Copy of the value with every component finer than `resolution` reset
    /// to its minimum (month/day to `1`, time-of-day to `0`).
    pub fn truncated_to(self, resolution: Resolution) -> Self {
        let (year, month, day, hour, minute, second) = match resolution {
            Resolution::Year => (self.year(), 1, 1, 0, 0, 0),
            Resolution::Month => (self.year(), self.month(), 1, 0, 0, 0),
            Resolution::Day => (self.year(), self.month(), self.day(), 0, 0, 0),
            Resolution::Hour => (self.year(), self.month(), self.day(), self.hour(), 0, 0),
            Resolution::Minute => (
                self.year(),
                self.month(),
                self.day(),
                self.hour(),
                self.minute(),
                0,
            ),
            Resolution::Second => return self,
        };
        // Resetting components toward their minimums cannot leave the
        // calendar, so the rebuilt value always exists.
        Self::from_ymd_hms(year, month, day, hour, minute, second).unwrap_or(self)
    }

    /// Equality ignoring components finer than `resolution`.
    pub fn eq_at(self, other: Self, resolution: Resolution) -> bool {
        self.truncated_to(resolution) == other.truncated_to(resolution)
    }

    /// The underlying chrono value.
    pub fn as_naive(self) -> NaiveDateTime {
        self.0
    }
}

impl From<NaiveDateTime> for DateValue {
    fn from(value: NaiveDateTime) -> Self {
        Self(value)
    }
}

impl From<NaiveDate> for DateValue {
    fn from(value: NaiveDate) -> Self {
        Self(value.and_time(NaiveTime::MIN))
    }
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

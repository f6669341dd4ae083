//! Calendar month keys (`YYYY-MM`).
//!
//! Fixed expenses remember which months were paid as a list of these keys, and every
//! report is bucketed by them.

use super::DomainError;
use chrono::{Datelike, Local, Months, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A calendar month. Internally the first day of that month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey(NaiveDate);

/// Years a month key can carry; the `YYYY` form has four digits.
const YEARS: std::ops::RangeInclusive<i32> = 1..=9999;

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Result<Self, DomainError> {
        if !YEARS.contains(&year) {
            return Err(DomainError::InvalidMonth(format!("{}-{:02}", year, month)));
        }
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(MonthKey)
            .ok_or_else(|| DomainError::InvalidMonth(format!("{}-{:02}", year, month)))
    }

    /// The month `date` falls in.
    pub fn of(date: NaiveDate) -> Self {
        MonthKey(date.with_day(1).unwrap_or(date))
    }

    /// The current month in the server's local time zone.
    pub fn current() -> Self {
        Self::of(Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    pub fn last_day(&self) -> NaiveDate {
        self.0
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    /// Moves `delta` months forward (or backward when negative). `None` outside years 1 to 9999.
    pub fn shift(&self, delta: i32) -> Option<Self> {
        let step = Months::new(delta.unsigned_abs());
        let date = if delta >= 0 {
            self.0.checked_add_months(step)
        } else {
            self.0.checked_sub_months(step)
        }?;
        YEARS.contains(&date.year()).then_some(MonthKey(date))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::of(date) == *self
    }

    /// The given day of this month, clamped to the month's length (day 31 in February
    /// becomes the 28th or 29th).
    pub fn day_clamped(&self, day: u32) -> NaiveDate {
        let day = day.clamp(1, self.days_in_month());
        self.0.with_day(day).unwrap_or(self.0)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for MonthKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidMonth(s.to_string());
        let s = s.trim();
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        MonthKey::new(year, month).map_err(|_| invalid())
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

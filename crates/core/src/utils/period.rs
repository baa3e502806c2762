//! Calendar month periods and the instant ranges they cover.
//!
//! Every month-scoped record (incomes, goals) and every month-range query
//! (variable expenses) goes through [`MonthPeriod`], so month and year
//! validation happens in exactly one place.

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveTime, TimeDelta, Utc};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::errors::{Result, ValidationError};

const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// Inclusive range of instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        *instant >= self.start && *instant <= self.end
    }
}

/// A validated (month, year) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthPeriod {
    first_day: NaiveDate,
}

impl MonthPeriod {
    /// Builds a period, rejecting months outside 1..=12 and years outside 1..=9999.
    pub fn new(month: u32, year: i32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(ValidationError::InvalidMonth(month).into());
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(ValidationError::InvalidYear(year).into());
        }
        let first_day = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(ValidationError::InvalidMonth(month))?;
        Ok(Self { first_day })
    }

    /// The period containing `date`.
    pub fn of_date(date: NaiveDate) -> Self {
        Self {
            first_day: date - Days::new(u64::from(date.day0())),
        }
    }

    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    pub fn last_day(&self) -> NaiveDate {
        self.next().first_day - Days::new(1)
    }

    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    /// The preceding calendar month; January rolls back to December of the previous year.
    pub fn previous(&self) -> Self {
        Self {
            first_day: self.first_day - Months::new(1),
        }
    }

    pub fn next(&self) -> Self {
        Self {
            first_day: self.first_day + Months::new(1),
        }
    }

    /// Clamps a day-of-month to the last valid day of this period.
    pub fn clamp_day(&self, day: u32) -> u32 {
        day.min(self.days_in_month())
    }

    /// The date in this period for a recurring day-of-month, clamped for short months.
    pub fn date_for_day(&self, day: u32) -> NaiveDate {
        let offset = self.clamp_day(day.max(1)) - 1;
        self.first_day + Days::new(u64::from(offset))
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        Self::of_date(date) == *self
    }

    /// `[00:00:00.000, 23:59:59.999]` UTC across the whole month.
    pub fn date_range(&self) -> DateRange {
        let start = self.first_day.and_time(NaiveTime::MIN).and_utc();
        let end = self.next().first_day.and_time(NaiveTime::MIN).and_utc()
            - TimeDelta::milliseconds(1);
        DateRange { start, end }
    }
}

impl Serialize for MonthPeriod {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("MonthPeriod", 2)?;
        state.serialize_field("month", &self.month())?;
        state.serialize_field("year", &self.year())?;
        state.end()
    }
}

impl std::fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

/// Number of days in `month` of `year`. Returns 31 for out-of-range input.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    MonthPeriod::new(month, year)
        .map(|p| p.days_in_month())
        .unwrap_or(31)
}

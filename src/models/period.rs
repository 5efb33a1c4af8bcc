//! Payroll period model.
//!
//! This module contains the [`Fortnight`] and [`PayrollPeriod`] types that
//! identify a half-month payroll period (quincena) and derive its calendar
//! day range.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};

/// Selects one of the two fortnights (quincenas) of a month.
///
/// Serialized as the number `1` or `2`, matching the backend contract.
///
/// # Example
///
/// ```
/// use nomina_engine::models::Fortnight;
///
/// let fortnight = Fortnight::First;
/// assert_eq!(serde_json::to_string(&fortnight).unwrap(), "1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Fortnight {
    /// Days 1-15 of the month.
    First,
    /// Day 16 through the end of the month.
    Second,
}

impl TryFrom<u8> for Fortnight {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Fortnight::First),
            2 => Ok(Fortnight::Second),
            other => Err(format!("quincena must be 1 or 2, got {}", other)),
        }
    }
}

impl From<Fortnight> for u8 {
    fn from(fortnight: Fortnight) -> Self {
        match fortnight {
            Fortnight::First => 1,
            Fortnight::Second => 2,
        }
    }
}

impl std::fmt::Display for Fortnight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

/// Identifies a fortnightly payroll period.
///
/// A period is an immutable (month, year, fortnight) value; its calendar day
/// range is derived, never stored. Fortnight 1 always covers days 1-15;
/// fortnight 2 covers day 16 through the last day of the month, so its
/// length varies between 13 and 16 days.
///
/// # Example
///
/// ```
/// use nomina_engine::models::{Fortnight, PayrollPeriod};
///
/// let period = PayrollPeriod::new(2025, 1, Fortnight::Second).unwrap();
/// assert_eq!(period.first_day(), 16);
/// assert_eq!(period.last_day(), 31);
/// assert_eq!(period.day_count(), 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayrollPeriod {
    /// The calendar year.
    #[serde(rename = "anio")]
    pub year: i32,
    /// The calendar month (1-12).
    #[serde(rename = "mes")]
    pub month: u32,
    /// Which half of the month this period covers.
    #[serde(rename = "quincena")]
    pub fortnight: Fortnight,
}

impl PayrollPeriod {
    /// Creates a new period, validating the month and year.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::InvalidPeriod`] when the month is outside
    /// 1-12 or the year is outside a sane range.
    pub fn new(year: i32, month: u32, fortnight: Fortnight) -> PayrollResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(PayrollError::InvalidPeriod {
                message: format!("month must be 1-12, got {}", month),
            });
        }
        if !(2000..=2100).contains(&year) {
            return Err(PayrollError::InvalidPeriod {
                message: format!("year must be 2000-2100, got {}", year),
            });
        }
        Ok(Self {
            year,
            month,
            fortnight,
        })
    }

    /// Returns the first calendar day number of the fortnight (1 or 16).
    pub fn first_day(&self) -> u32 {
        match self.fortnight {
            Fortnight::First => 1,
            Fortnight::Second => 16,
        }
    }

    /// Returns the last calendar day number of the fortnight (15 or
    /// end-of-month).
    pub fn last_day(&self) -> u32 {
        match self.fortnight {
            Fortnight::First => 15,
            Fortnight::Second => days_in_month(self.year, self.month),
        }
    }

    /// Returns the number of calendar days in the fortnight.
    pub fn day_count(&self) -> u32 {
        self.last_day() - self.first_day() + 1
    }

    /// Returns the first calendar date of the fortnight.
    pub fn start_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.first_day())
    }

    /// Returns the last calendar date of the fortnight.
    pub fn end_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.last_day())
    }

    /// Checks whether a day number falls within this fortnight.
    pub fn contains_day(&self, day: u32) -> bool {
        day >= self.first_day() && day <= self.last_day()
    }

    /// Resolves a day number of this fortnight to a calendar date.
    ///
    /// Returns `None` when the day is outside the fortnight's range.
    pub fn date_of(&self, day: u32) -> Option<NaiveDate> {
        if !self.contains_day(day) {
            return None;
        }
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    /// Checks whether a day number of this fortnight falls on a Saturday or
    /// Sunday (ISO weekday).
    ///
    /// Days outside the fortnight return `false`; range validation is a
    /// separate concern.
    pub fn is_weekend_day(&self, day: u32) -> bool {
        self.date_of(day)
            .is_some_and(|date| matches!(date.weekday(), Weekday::Sat | Weekday::Sun))
    }

    /// Returns the day numbers of this fortnight that may be marked as
    /// non-worked, i.e. the weekdays.
    pub fn selectable_days(&self) -> Vec<u32> {
        (self.first_day()..=self.last_day())
            .filter(|&day| !self.is_weekend_day(day))
            .collect()
    }

    /// Returns the period immediately following this one.
    ///
    /// Quincena 1 is followed by quincena 2 of the same month; quincena 2
    /// by quincena 1 of the next month. Returns `None` past the supported
    /// year range.
    pub fn following(&self) -> Option<PayrollPeriod> {
        match self.fortnight {
            Fortnight::First => PayrollPeriod::new(self.year, self.month, Fortnight::Second).ok(),
            Fortnight::Second => {
                let (year, month) = if self.month == 12 {
                    (self.year + 1, 1)
                } else {
                    (self.year, self.month + 1)
                };
                PayrollPeriod::new(year, month, Fortnight::First).ok()
            }
        }
    }

    /// Returns the (year, month) of the calendar month preceding this
    /// period's month.
    ///
    /// Stimuli are paid in arrears: the fortnights of month M are funded
    /// from month M-1's posted income.
    pub fn preceding_month(&self) -> (i32, u32) {
        if self.month == 1 {
            (self.year - 1, 12)
        } else {
            (self.year, self.month - 1)
        }
    }
}

impl std::fmt::Display for PayrollPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{} quincena {}", self.month, self.year, self.fortnight)
    }
}

/// Returns the number of days in a calendar month, accounting for leap
/// years via chrono.
fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if NaiveDate::from_ymd_opt(year, 2, 29).is_some() => 29,
        _ => 28,
    }
}

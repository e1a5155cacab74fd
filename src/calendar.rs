//! Calendar arithmetic on local dates, and the [`SundayDate`] type
//!
//! Everything here is pure: functions that need "today" take it as a parameter.
//! Dates are plain local calendar dates ([`NaiveDate`]), there is no timezone involved.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{Datelike, Days, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

/// Returns true if `date` falls on a Sunday
pub fn is_sunday(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Sun
}

/// The Sunday on or immediately before `date`
pub fn nearest_sunday(date: NaiveDate) -> NaiveDate {
    let days_since_sunday = date.weekday().num_days_from_sunday();
    date - Duration::days(i64::from(days_since_sunday))
}

/// The Sunday on or immediately after `date`
pub fn upcoming_sunday(date: NaiveDate) -> NaiveDate {
    let days_until_sunday = (7 - date.weekday().num_days_from_sunday()) % 7;
    date + Duration::days(i64::from(days_until_sunday))
}

/// Moves `date` by `weeks * 7` calendar days (backwards if `weeks` is negative).
///
/// Returns `None` if the result is not representable.
pub fn shift_weeks(date: NaiveDate, weeks: i64) -> Option<NaiveDate> {
    let days = Days::new(weeks.unsigned_abs().checked_mul(7)?);
    if weeks >= 0 {
        date.checked_add_days(days)
    } else {
        date.checked_sub_days(days)
    }
}

/// Formats a date as `YYYY-MM-DD`
pub fn to_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parses a strict `YYYY-MM-DD` string.
///
/// chrono alone would accept unpadded fields (`2026-1-4`), which would then not survive a
/// round-trip through [`to_iso`], hence the explicit shape check.
pub fn from_iso(iso: &str) -> Result<NaiveDate, Error> {
    let bytes = iso.as_bytes();
    let well_shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if well_shaped == false {
        return Err(Error::InvalidFormat(format!("{:?} is not a YYYY-MM-DD date", iso)));
    }

    // Cannot fail: the shape check guarantees ASCII digits
    let year: i32 = iso[0..4].parse().map_err(|_| Error::InvalidFormat(iso.to_string()))?;
    let month: u32 = iso[5..7].parse().map_err(|_| Error::InvalidFormat(iso.to_string()))?;
    let day: u32 = iso[8..10].parse().map_err(|_| Error::InvalidFormat(iso.to_string()))?;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| Error::InvalidFormat(format!("{:?} is not a real calendar date", iso)))
}



/// A calendar date that is guaranteed to be a Sunday.
///
/// Its canonical textual form (used for `Display`, serde and as ledger keys in stored documents) is `YYYY-MM-DD`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SundayDate {
    date: NaiveDate,
}

impl SundayDate {
    /// Returns `None` if `date` is not a Sunday
    pub fn new(date: NaiveDate) -> Option<Self> {
        if is_sunday(date) {
            Some(Self { date })
        } else {
            None
        }
    }

    /// See [`nearest_sunday`]
    pub fn nearest(date: NaiveDate) -> Self {
        Self { date: nearest_sunday(date) }
    }

    /// See [`upcoming_sunday`]
    pub fn upcoming(date: NaiveDate) -> Self {
        Self { date: upcoming_sunday(date) }
    }

    pub fn as_date(&self) -> NaiveDate {
        self.date
    }

    /// Another Sunday, `weeks` weeks later (or earlier)
    pub fn shift_weeks(&self, weeks: i64) -> Option<Self> {
        shift_weeks(self.date, weeks).map(|date| Self { date })
    }

    /// Signed number of days from `earlier` to `self`
    pub fn days_since(&self, earlier: &SundayDate) -> i64 {
        self.date.signed_duration_since(earlier.date).num_days()
    }

    pub fn to_iso(&self) -> String {
        to_iso(self.date)
    }
}

impl FromStr for SundayDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date = from_iso(s)?;
        Self::new(date).ok_or_else(|| Error::InvalidFormat(format!("{} is not a Sunday", s)))
    }
}

impl Display for SundayDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_iso())
    }
}

/// Used to support serde
impl Serialize for SundayDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_iso())
    }
}
/// Used to support serde
impl<'de> Deserialize<'de> for SundayDate {
    fn deserialize<D>(deserializer: D) -> Result<SundayDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

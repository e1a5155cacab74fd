//! The Sunday window: the ordered set of Sundays currently under management
//!
//! The window is the discrete time axis used by the [`rotation`](crate::rotation) scorer.

use std::convert::TryFrom;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{self, SundayDate};
use crate::config::SundayAnchor;

/// An ascending sequence of unique Sundays.
///
/// Every mutating method leaves the window sorted and deduplicated.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Window {
    sundays: Vec<SundayDate>,
}

fn weeks(count: usize) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}

impl Window {
    /// `past_count` Sundays before the nearest Sunday of `reference`, that Sunday itself, then `future_count` Sundays after it
    pub fn build_default(reference: NaiveDate, past_count: usize, future_count: usize) -> Self {
        Self::build_around(SundayDate::nearest(reference), past_count, future_count)
    }

    /// Same as [`Self::build_default`], for an already resolved anchor Sunday
    ///
    /// Counts reaching beyond the representable dates are cut at the edge of the calendar.
    pub fn build_around(anchor: SundayDate, past_count: usize, future_count: usize) -> Self {
        let mut window = Self { sundays: vec![anchor] };
        window.extend_past(past_count);
        window.extend_future(future_count);
        window
    }

    /// Rebuilds a window of `2 * radius + 1` Sundays around `center`, discarding the previous content.
    ///
    /// `anchor` tells how a non-Sunday `center` is resolved.
    pub fn recenter(center: NaiveDate, radius: usize, anchor: SundayAnchor, today: NaiveDate) -> Self {
        let resolved = match anchor {
            SundayAnchor::Nearest => calendar::nearest_sunday(center),
            SundayAnchor::Upcoming => calendar::upcoming_sunday(center),
        };
        let center = match SundayDate::new(resolved) {
            Some(sunday) => sunday,
            None => {
                log::warn!("{} did not resolve to a Sunday. Centering on the upcoming Sunday of {} instead", center, today);
                SundayDate::upcoming(today)
            }
        };
        Self::build_around(center, radius, radius)
    }

    /// Builds a window from stored `YYYY-MM-DD` strings, silently dropping the ones that are malformed or are not Sundays
    pub fn from_iso_list<S: AsRef<str>>(list: &[S]) -> Self {
        let sundays = list.iter()
            .filter_map(|iso| match iso.as_ref().parse::<SundayDate>() {
                Ok(sunday) => Some(sunday),
                Err(err) => {
                    log::debug!("Dropping window entry: {}", err);
                    None
                }
            })
            .collect();

        let mut window = Self { sundays };
        window.normalize(&[]);
        window
    }

    /// Adds `count` Sundays before the earliest one, one week apart. Does nothing on an empty window
    pub fn extend_past(&mut self, count: usize) {
        let first = match self.first() {
            None => return,
            Some(first) => first,
        };
        self.sundays.extend(
            (1..=weeks(count)).map_while(|i| first.shift_weeks(-i))
        );
        self.normalize(&[]);
    }

    /// Adds `count` Sundays after the latest one, one week apart. Does nothing on an empty window
    pub fn extend_future(&mut self, count: usize) {
        let last = match self.last() {
            None => return,
            Some(last) => last,
        };
        self.sundays.extend(
            (1..=weeks(count)).map_while(|i| last.shift_weeks(i))
        );
        self.normalize(&[]);
    }

    /// Inserts every date of `must_include` that is missing, then sorts and deduplicates.
    ///
    /// Entries cannot fail the Sunday check here since [`SundayDate`] enforces it; invalid
    /// strings are dropped earlier, by [`Self::from_iso_list`].
    pub fn normalize(&mut self, must_include: &[SundayDate]) {
        self.sundays.extend_from_slice(must_include);
        self.sundays.sort_unstable();
        self.sundays.dedup();
    }

    pub fn sundays(&self) -> &[SundayDate] {
        &self.sundays
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &SundayDate> {
        self.sundays.iter()
    }

    pub fn len(&self) -> usize {
        self.sundays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sundays.is_empty()
    }

    pub fn first(&self) -> Option<SundayDate> {
        self.sundays.first().copied()
    }

    pub fn last(&self) -> Option<SundayDate> {
        self.sundays.last().copied()
    }

    /// Position of `sunday` in the window, if it is a member
    pub fn index_of(&self, sunday: &SundayDate) -> Option<usize> {
        self.sundays.binary_search(sunday).ok()
    }

    pub fn contains(&self, sunday: &SundayDate) -> bool {
        self.index_of(sunday).is_some()
    }

    /// The `YYYY-MM-DD` form of every Sunday, in order
    pub fn to_iso_list(&self) -> Vec<String> {
        self.sundays.iter().map(|s| s.to_iso()).collect()
    }
}

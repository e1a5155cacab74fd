//! Rotation scoring: how long has it been since each volunteer last served?
//!
//! "Weeks since" is counted in [`Window`] positions rather than in calendar weeks, so that the window acts as the tick
//! count. When the window does not span both dates any more, it falls back to calendar arithmetic.
//! Both modes agree as long as consecutive window entries are exactly one week apart.

use std::cmp::Ordering;

use crate::calendar::SundayDate;
use crate::ledger::Ledger;
use crate::utils::compare_names;
use crate::volunteer::{Volunteer, VolunteerId};
use crate::window::Window;

/// Rotation status of a single volunteer. This is derived data, it is never stored
#[derive(Clone, Debug, PartialEq)]
pub struct RotationRecord<'a> {
    pub volunteer: &'a Volunteer,
    /// The latest Sunday (up to the reference Sunday, within the window) this volunteer served on
    pub last_served: Option<SundayDate>,
    /// `None` means "never served"
    pub weeks_since: Option<usize>,
}

impl<'a> RotationRecord<'a> {
    pub fn has_served(&self) -> bool {
        self.weeks_since.is_some()
    }
}

/// The most recent Sunday of `window`, not later than `current_sunday`, on which `volunteer_id` served.
///
/// Ledger entries outside of the window are ignored.
pub fn last_served(ledger: &Ledger, window: &Window, volunteer_id: &VolunteerId, current_sunday: &SundayDate) -> Option<SundayDate> {
    window.iter()
        .rev()
        .skip_while(|sunday| *sunday > current_sunday)
        .find(|sunday| ledger.is_assigned(sunday, volunteer_id))
        .copied()
}

/// Number of window positions between `last_sunday` and `current_sunday` (0 if they are the same, never negative).
///
/// If either date is missing from the window, this is the number of calendar weeks between them, rounded to the nearest integer.
pub fn weeks_since(last_sunday: Option<&SundayDate>, current_sunday: &SundayDate, window: &Window) -> Option<usize> {
    let last_sunday = last_sunday?;

    match (window.index_of(last_sunday), window.index_of(current_sunday)) {
        (Some(last_index), Some(current_index)) => {
            Some(current_index.saturating_sub(last_index))
        },
        _ => {
            log::debug!("{} or {} is outside of the window, counting calendar weeks", last_sunday, current_sunday);
            let days = current_sunday.days_since(last_sunday);
            // Rounds half up, like Math.round
            let weeks = (days + 3).div_euclid(7);
            Some(weeks.max(0) as usize)
        },
    }
}

/// Computes the rotation record of every volunteer, and sorts them by priority:
/// never-served volunteers first, then the longest idle ones. Ties are sorted alphabetically.
pub fn rank<'a, I>(volunteers: I, ledger: &Ledger, window: &Window, current_sunday: &SundayDate) -> Vec<RotationRecord<'a>>
where
    I: IntoIterator<Item = &'a Volunteer>,
{
    let mut records: Vec<RotationRecord<'a>> = volunteers.into_iter()
        .map(|volunteer| {
            let last = last_served(ledger, window, volunteer.id(), current_sunday);
            let weeks = weeks_since(last.as_ref(), current_sunday, window);
            RotationRecord {
                volunteer,
                last_served: last,
                weeks_since: weeks,
            }
        })
        .collect();

    records.sort_by(compare_priority);
    records
}

fn compare_priority(left: &RotationRecord, right: &RotationRecord) -> Ordering {
    let by_weeks = match (left.weeks_since, right.weeks_since) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(l), Some(r)) => r.cmp(&l),
    };
    by_weeks.then_with(|| compare_names(left.volunteer.name(), right.volunteer.name()))
}

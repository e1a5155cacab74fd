//! Who served (or is assigned) on which Sunday

use std::collections::{BTreeMap, BTreeSet};

use crate::calendar::SundayDate;
use crate::volunteer::VolunteerId;

/// A mapping from Sundays to the volunteers that served on them.
///
/// A Sunday with nobody assigned has no entry at all: setting an empty set removes the entry,
/// so that every reader sees "absent" and "empty" identically.
/// Entries may refer to Sundays that are not (or no longer) in the [`Window`](crate::window::Window); this is valid.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ledger {
    served: BTreeMap<SundayDate, BTreeSet<VolunteerId>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// The volunteers assigned on `sunday` (empty if none)
    pub fn assigned(&self, sunday: &SundayDate) -> BTreeSet<VolunteerId> {
        self.served.get(sunday).cloned().unwrap_or_default()
    }

    pub fn is_assigned(&self, sunday: &SundayDate, volunteer_id: &VolunteerId) -> bool {
        self.served.get(sunday)
            .map(|ids| ids.contains(volunteer_id))
            .unwrap_or(false)
    }

    /// Replaces the set of volunteers for `sunday` wholesale
    pub fn set_assigned(&mut self, sunday: SundayDate, volunteer_ids: BTreeSet<VolunteerId>) {
        if volunteer_ids.is_empty() {
            self.served.remove(&sunday);
        } else {
            self.served.insert(sunday, volunteer_ids);
        }
    }

    /// Adds or removes a single volunteer on `sunday`. Returns whether the ledger changed
    pub fn toggle(&mut self, sunday: SundayDate, volunteer_id: &VolunteerId, is_assigned: bool) -> bool {
        if is_assigned {
            self.served.entry(sunday)
                .or_default()
                .insert(volunteer_id.clone())
        } else {
            let ids = match self.served.get_mut(&sunday) {
                None => return false,
                Some(ids) => ids,
            };
            let changed = ids.remove(volunteer_id);
            if ids.is_empty() {
                self.served.remove(&sunday);
            }
            changed
        }
    }

    /// Strips `volunteer_id` from every Sunday. Returns how many Sundays were affected
    pub fn remove_volunteer_everywhere(&mut self, volunteer_id: &VolunteerId) -> usize {
        let mut affected = 0;
        for ids in self.served.values_mut() {
            if ids.remove(volunteer_id) {
                affected += 1;
            }
        }
        self.served.retain(|_, ids| ids.is_empty() == false);
        affected
    }

    /// Every Sunday that has at least one volunteer, in ascending order
    pub fn iter(&self) -> impl Iterator<Item = (&SundayDate, &BTreeSet<VolunteerId>)> {
        self.served.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.served.is_empty()
    }
}

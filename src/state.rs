//! The complete in-memory state of the tracker
//!
//! A [`TrackerState`] is owned by a single controller (usually a [`Tracker`](crate::tracker::Tracker)), and every
//! mutation goes through `&mut self`. All methods keep the window sorted and make sure both reference
//! Sundays belong to it.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::calendar::SundayDate;
use crate::config::WindowSettings;
use crate::error::Error;
use crate::ledger::Ledger;
use crate::raw::{RawState, RawVolunteer, Validation};
use crate::rotation::{self, RotationRecord};
use crate::utils::compare_names;
use crate::volunteer::{Roster, Volunteer, VolunteerId};
use crate::window::Window;

/// A line of the "who served on the selected Sunday" checklist
#[derive(Clone, Debug, PartialEq)]
pub struct ChecklistEntry<'a> {
    pub volunteer: &'a Volunteer,
    pub served: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TrackerState {
    roster: Roster,
    window: Window,
    ledger: Ledger,
    /// The Sunday considered as "now" for rotation scores
    current_sunday: SundayDate,
    /// The Sunday whose served checklist is being edited
    selected_sunday: SundayDate,
}

impl TrackerState {
    /// An empty roster, an empty ledger, and a window around today's anchor Sunday
    pub fn default_for(today: NaiveDate, settings: &WindowSettings) -> Self {
        let anchor = settings.anchor.resolve(today);
        Self {
            roster: Roster::new(),
            window: Window::build_around(anchor, settings.past_count, settings.future_count),
            ledger: Ledger::new(),
            current_sunday: anchor,
            selected_sunday: anchor,
        }
    }

    pub fn new(roster: Roster, window: Window, ledger: Ledger, current_sunday: SundayDate, selected_sunday: SundayDate) -> Self {
        let mut state = Self { roster, window, ledger, current_sunday, selected_sunday };
        state.normalize();
        state
    }

    /// Rebuilds a state from a document, repairing what can be repaired.
    ///
    /// Fails with [`Error::InvalidState`] only if no reference Sunday can be found at all.
    pub fn from_raw(raw: &RawState, validation: Validation) -> Result<Self, Error> {
        let window = Window::from_iso_list(&raw.sundays);

        let current_sunday = match parse_reference(raw.current_sunday.as_deref(), "currentSunday") {
            Some(sunday) => sunday,
            None => {
                let fallback = match validation {
                    Validation::Load => window.sundays()
                        .get(window.len().saturating_sub(5))
                        .copied()
                        .or_else(|| window.first()),
                    Validation::Import => window.last(),
                };
                fallback.ok_or_else(|| Error::InvalidState("no valid Sunday to use as the current one".to_string()))?
            }
        };
        let selected_sunday = parse_reference(raw.selected_sunday.as_deref(), "selectedSunday")
            .unwrap_or(current_sunday);

        let roster = Roster::from_volunteers(
            raw.volunteers.iter()
                .map(|v| Volunteer::new(VolunteerId::from(v.id.as_str()), v.name.clone()))
                .collect()
        );

        let mut ledger = Ledger::new();
        for (iso, ids) in &raw.served_by_sunday {
            let sunday = match iso.parse::<SundayDate>() {
                Ok(sunday) => sunday,
                Err(err) => {
                    log::warn!("Dropping served list: {}", err);
                    continue;
                }
            };
            let ids: BTreeSet<VolunteerId> = ids.iter()
                .map(|id| VolunteerId::from(id.as_str()))
                .filter(|id| {
                    let known = roster.get(id).is_some();
                    if known == false {
                        log::debug!("Dropping unknown volunteer {} from {}", id, sunday);
                    }
                    known
                })
                .collect();
            ledger.set_assigned(sunday, ids);
        }

        Ok(Self::new(roster, window, ledger, current_sunday, selected_sunday))
    }

    pub fn to_raw(&self) -> RawState {
        RawState {
            volunteers: self.roster.iter()
                .map(|v| RawVolunteer { id: v.id().to_string(), name: v.name().to_string() })
                .collect(),
            sundays: self.window.to_iso_list(),
            current_sunday: Some(self.current_sunday.to_iso()),
            selected_sunday: Some(self.selected_sunday.to_iso()),
            served_by_sunday: self.ledger.iter()
                .map(|(sunday, ids)| (sunday.to_iso(), ids.iter().map(|id| id.to_string()).collect()))
                .collect(),
        }
    }

    pub fn roster(&self) -> &Roster                 { &self.roster          }
    pub fn window(&self) -> &Window                 { &self.window          }
    pub fn ledger(&self) -> &Ledger                 { &self.ledger          }
    pub fn current_sunday(&self) -> SundayDate      { self.current_sunday   }
    pub fn selected_sunday(&self) -> SundayDate     { self.selected_sunday  }

    /// Makes sure the reference Sundays are in the window, and that the window is sorted and deduplicated
    pub fn normalize(&mut self) {
        self.window.normalize(&[self.current_sunday, self.selected_sunday]);
    }

    /// Changes the reference Sunday. If the selected Sunday was later, it is moved back to the new reference
    pub fn set_current_sunday(&mut self, sunday: SundayDate) {
        self.current_sunday = sunday;
        if self.selected_sunday > self.current_sunday {
            self.selected_sunday = self.current_sunday;
        }
        self.normalize();
    }

    pub fn set_selected_sunday(&mut self, sunday: SundayDate) {
        self.selected_sunday = sunday;
        self.normalize();
    }

    pub fn extend_past(&mut self, count: usize) {
        self.window.extend_past(count);
        self.normalize();
    }

    pub fn extend_future(&mut self, count: usize) {
        self.window.extend_future(count);
        self.normalize();
    }

    /// Rebuilds the window around today's anchor Sunday, which becomes both the current and the selected Sunday
    pub fn jump_to_today(&mut self, today: NaiveDate, settings: &WindowSettings) {
        self.window = Window::recenter(today, settings.recenter_radius, settings.anchor, today);
        let anchor = settings.anchor.resolve(today);
        self.current_sunday = anchor;
        self.selected_sunday = anchor;
        self.normalize();
    }

    /// Marks whether a volunteer served on the selected Sunday. Returns whether the ledger changed
    pub fn set_served(&mut self, volunteer_id: &VolunteerId, served: bool) -> bool {
        if self.roster.get(volunteer_id).is_none() {
            log::warn!("Ignoring served status of unknown volunteer {}", volunteer_id);
            return false;
        }
        self.ledger.toggle(self.selected_sunday, volunteer_id, served)
    }

    /// Replaces everyone who served on the selected Sunday. Unknown ids are ignored
    pub fn set_served_list(&mut self, volunteer_ids: BTreeSet<VolunteerId>) {
        let roster = &self.roster;
        let known = volunteer_ids.into_iter()
            .filter(|id| roster.get(id).is_some())
            .collect();
        self.ledger.set_assigned(self.selected_sunday, known);
    }

    pub fn add_volunteer(&mut self, name: &str) -> Result<Option<VolunteerId>, Error> {
        self.roster.add(name)
    }

    pub fn rename_volunteer(&mut self, id: &VolunteerId, new_name: &str) -> Result<bool, Error> {
        self.roster.rename(id, new_name)
    }

    /// Deletes a volunteer from the roster and from every Sunday of the ledger, in a single step
    pub fn remove_volunteer(&mut self, id: &VolunteerId) -> Option<Volunteer> {
        let removed = self.roster.remove(id)?;
        let affected = self.ledger.remove_volunteer_everywhere(id);
        log::debug!("Removed {} from the roster and from {} Sunday(s)", removed.name(), affected);
        Some(removed)
    }

    /// Every volunteer, by rotation priority for the current Sunday
    pub fn ranking(&self) -> Vec<RotationRecord<'_>> {
        rotation::rank(self.roster.iter(), &self.ledger, &self.window, &self.current_sunday)
    }

    /// Every volunteer, alphabetically, with whether they served on the selected Sunday
    pub fn checklist(&self) -> Vec<ChecklistEntry<'_>> {
        let mut entries: Vec<ChecklistEntry<'_>> = self.roster.iter()
            .map(|volunteer| ChecklistEntry {
                volunteer,
                served: self.ledger.is_assigned(&self.selected_sunday, volunteer.id()),
            })
            .collect();
        entries.sort_by(|l, r| compare_names(l.volunteer.name(), r.volunteer.name()));
        entries
    }
}

fn parse_reference(iso: Option<&str>, field: &str) -> Option<SundayDate> {
    let iso = iso?;
    match iso.parse() {
        Ok(sunday) => Some(sunday),
        Err(err) => {
            log::warn!("Ignoring {}: {}", field, err);
            None
        }
    }
}

//! The controller that owns the tracker state and keeps it persisted
//!
//! Every user action is applied to the [`TrackerState`], which is normalized and then saved to the
//! [`KeyValueStore`]. Saving is fire-and-forget: a failed write is logged, but never undoes or blocks the action.

use std::collections::BTreeSet;
use std::error::Error as StdError;

use chrono::NaiveDate;

use crate::calendar::{self, SundayDate};
use crate::config::{self, WindowSettings};
use crate::error::Error;
use crate::raw::{RawState, Validation};
use crate::rotation::RotationRecord;
use crate::state::{ChecklistEntry, TrackerState};
use crate::traits::{KeyValueStore, Prompter};
use crate::volunteer::VolunteerId;

/// Suggested file name for an export made on `today`, e.g. `rezcafe-volunteer-tracker-2026-02-22.json`
pub fn export_file_name(today: NaiveDate) -> String {
    let prefix = match config::EXPORT_FILE_PREFIX.lock() {
        Ok(prefix) => prefix.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    };
    sanitize_filename::sanitize(format!("{}-{}.json", prefix, calendar::to_iso(today)))
}

/// Owns a [`TrackerState`] and the store it is persisted to
#[derive(Debug)]
pub struct Tracker<S: KeyValueStore> {
    store: S,
    settings: WindowSettings,
    state: TrackerState,
}

impl<S: KeyValueStore> Tracker<S> {
    /// Restores the state saved in `store`, see [`Self::load_with_settings`]
    pub fn load(store: S, today: NaiveDate) -> Self {
        Self::load_with_settings(store, today, WindowSettings::default())
    }

    /// Restores the state saved in `store`.
    ///
    /// Anything that goes wrong (nothing stored yet, unreadable store, invalid document) results in the default state for `today`.
    pub fn load_with_settings(store: S, today: NaiveDate, settings: WindowSettings) -> Self {
        let state = match store.get(config::STORAGE_KEY) {
            Err(err) => {
                log::warn!("Unable to read the stored state: {}. Using a default state", err);
                TrackerState::default_for(today, &settings)
            },
            Ok(None) => {
                log::info!("No stored state yet, starting from scratch");
                TrackerState::default_for(today, &settings)
            },
            Ok(Some(document)) => {
                let restored = RawState::parse(&document, Validation::Load)
                    .and_then(|raw| TrackerState::from_raw(&raw, Validation::Load));
                match restored {
                    Ok(state) => state,
                    Err(err) => {
                        log::warn!("Invalid stored state: {}. Using a default state", err);
                        TrackerState::default_for(today, &settings)
                    },
                }
            },
        };

        Self { store, settings, state }
    }

    pub fn state(&self) -> &TrackerState       { &self.state    }
    pub fn settings(&self) -> &WindowSettings  { &self.settings }
    pub fn store(&self) -> &S                  { &self.store    }

    /// Every volunteer, by rotation priority for the current Sunday
    pub fn ranking(&self) -> Vec<RotationRecord<'_>> {
        self.state.ranking()
    }

    /// Every volunteer, alphabetically, with their served status on the selected Sunday
    pub fn checklist(&self) -> Vec<ChecklistEntry<'_>> {
        self.state.checklist()
    }

    /// Normalizes the state, then saves it. Called once at the end of every action
    fn commit(&mut self) {
        self.state.normalize();

        let document = match self.state.to_raw().to_json_pretty() {
            Err(err) => {
                log::warn!("Unable to serialize the state: {}", err);
                return;
            },
            Ok(document) => document,
        };
        if let Err(err) = self.store.set(config::STORAGE_KEY, &document) {
            log::warn!("Unable to save the state: {}", err);
        }
    }

    /// Adds a volunteer. Blank names are ignored, duplicated names are refused
    pub fn add_volunteer(&mut self, name: &str) -> Result<Option<VolunteerId>, Error> {
        let id = self.state.add_volunteer(name)?;
        if id.is_some() {
            self.commit();
        }
        Ok(id)
    }

    pub fn rename_volunteer(&mut self, id: &VolunteerId, new_name: &str) -> Result<bool, Error> {
        let renamed = self.state.rename_volunteer(id, new_name)?;
        if renamed {
            self.commit();
        }
        Ok(renamed)
    }

    /// Asks `prompter` for a new name, then renames the volunteer. A cancelled prompt renames nothing
    pub fn rename_volunteer_interactive<P: Prompter>(&mut self, id: &VolunteerId, prompter: &mut P) -> Result<bool, Error> {
        let current_name = match self.state.roster().get(id) {
            None => return Ok(false),
            Some(volunteer) => volunteer.name().to_string(),
        };
        match prompter.prompt("Rename volunteer:", &current_name) {
            None => Ok(false),
            Some(new_name) => self.rename_volunteer(id, &new_name),
        }
    }

    /// Removes a volunteer and all their served checkmarks, once `prompter` has confirmed it.
    ///
    /// Returns whether the volunteer has been removed.
    pub fn remove_volunteer<P: Prompter>(&mut self, id: &VolunteerId, prompter: &mut P) -> bool {
        let name = match self.state.roster().get(id) {
            None => return false,
            Some(volunteer) => volunteer.name().to_string(),
        };
        let message = format!("Remove {}? This will also remove their served checkmarks.", name);
        if prompter.confirm(&message) == false {
            return false;
        }

        let removed = self.state.remove_volunteer(id).is_some();
        self.commit();
        removed
    }

    pub fn set_current_sunday(&mut self, sunday: SundayDate) {
        self.state.set_current_sunday(sunday);
        self.commit();
    }

    pub fn set_selected_sunday(&mut self, sunday: SundayDate) {
        self.state.set_selected_sunday(sunday);
        self.commit();
    }

    /// Marks whether a volunteer served on the selected Sunday
    pub fn set_served(&mut self, volunteer_id: &VolunteerId, served: bool) -> bool {
        let changed = self.state.set_served(volunteer_id, served);
        if changed {
            self.commit();
        }
        changed
    }

    /// Replaces everyone who served on the selected Sunday
    pub fn set_served_list(&mut self, volunteer_ids: BTreeSet<VolunteerId>) {
        self.state.set_served_list(volunteer_ids);
        self.commit();
    }

    /// Shows more Sundays in the past
    pub fn show_previous_sundays(&mut self) {
        self.state.extend_past(self.settings.extend_step);
        self.commit();
    }

    /// Shows more Sundays in the future
    pub fn show_next_sundays(&mut self) {
        self.state.extend_future(self.settings.extend_step);
        self.commit();
    }

    pub fn jump_to_today(&mut self, today: NaiveDate) {
        self.state.jump_to_today(today, &self.settings);
        self.commit();
    }

    /// The whole state, as a pretty-printed JSON document
    pub fn export(&self) -> Result<String, Box<dyn StdError>> {
        Ok(self.state.to_raw().to_json_pretty()?)
    }

    /// Replaces the whole state with the content of `document`.
    ///
    /// In case the document is invalid, the current state is left untouched and [`Error::InvalidImport`] is returned.
    pub fn import(&mut self, document: &str) -> Result<(), Error> {
        let imported = RawState::parse(document, Validation::Import)
            .and_then(|raw| TrackerState::from_raw(&raw, Validation::Import));

        match imported {
            Err(err) => {
                log::warn!("Refusing import: {}", err);
                Err(Error::InvalidImport(err.to_string()))
            },
            Ok(state) => {
                log::info!("Imported {} volunteers and {} Sundays", state.roster().len(), state.window().len());
                self.state = state;
                self.commit();
                Ok(())
            },
        }
    }

    /// Forgets everything (volunteers and history), once `prompter` has confirmed it.
    ///
    /// Returns whether the state has been reset.
    pub fn reset<P: Prompter>(&mut self, prompter: &mut P, today: NaiveDate) -> bool {
        if prompter.confirm("Reset everything? This clears all volunteers and history.") == false {
            return false;
        }

        if let Err(err) = self.store.remove(config::STORAGE_KEY) {
            log::warn!("Unable to remove the stored state: {}", err);
        }
        self.state = TrackerState::default_for(today, &self.settings);
        self.commit();
        true
    }
}

//! Volunteers and the roster they belong to

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;

/// Opaque, stable identifier of a volunteer.
///
/// Volunteers created by this crate get a random UUID, but imported documents may use any string.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VolunteerId {
    content: String,
}

impl VolunteerId {
    /// Generate a random VolunteerId
    pub fn random() -> Self {
        Self { content: Uuid::new_v4().to_string() }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }
}

impl From<String> for VolunteerId {
    fn from(content: String) -> Self {
        Self { content }
    }
}
impl From<&str> for VolunteerId {
    fn from(content: &str) -> Self {
        Self { content: content.to_string() }
    }
}

impl Display for VolunteerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

/// Someone who can serve on Sundays
#[derive(Clone, Debug, PartialEq)]
pub struct Volunteer {
    id: VolunteerId,
    name: String,
}

impl Volunteer {
    pub fn new(id: VolunteerId, name: String) -> Self {
        Self { id, name }
    }

    pub fn id(&self) -> &VolunteerId { &self.id   }
    pub fn name(&self) -> &str       { &self.name }
}

/// The active list of volunteers.
///
/// Names are unique under a case-insensitive comparison.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Roster {
    volunteers: Vec<Volunteer>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a roster from untrusted entries, keeping the first of any entries that share an id or a name
    pub fn from_volunteers(volunteers: Vec<Volunteer>) -> Self {
        let mut roster = Self::new();
        for volunteer in volunteers {
            let name = volunteer.name.trim().to_string();
            if name.is_empty() {
                log::debug!("Dropping volunteer {} with an empty name", volunteer.id);
                continue;
            }
            if roster.get(&volunteer.id).is_some() {
                log::warn!("Dropping volunteer {:?}: id {} is already used", name, volunteer.id);
                continue;
            }
            if roster.name_is_taken(&name, None) {
                log::warn!("Dropping volunteer {} ({}): duplicate name", name, volunteer.id);
                continue;
            }
            roster.volunteers.push(Volunteer::new(volunteer.id, name));
        }
        roster
    }

    /// Adds a new volunteer and returns its freshly generated id.
    ///
    /// Returns `Ok(None)` and changes nothing when `name` is blank.
    pub fn add(&mut self, name: &str) -> Result<Option<VolunteerId>, Error> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }
        if self.name_is_taken(name, None) {
            return Err(Error::DuplicateName(name.to_string()));
        }

        let id = VolunteerId::random();
        self.volunteers.push(Volunteer::new(id.clone(), name.to_string()));
        Ok(Some(id))
    }

    /// Renames a volunteer. Returns whether something has been renamed.
    ///
    /// Blank names and unknown ids are ignored.
    pub fn rename(&mut self, id: &VolunteerId, new_name: &str) -> Result<bool, Error> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Ok(false);
        }
        if self.name_is_taken(new_name, Some(id)) {
            return Err(Error::DuplicateName(new_name.to_string()));
        }

        match self.volunteers.iter_mut().find(|v| &v.id == id) {
            None => Ok(false),
            Some(volunteer) => {
                volunteer.name = new_name.to_string();
                Ok(true)
            }
        }
    }

    /// Removes a volunteer from the roster, and returns it.
    ///
    /// Callers are expected to also clear its id from the [`Ledger`](crate::ledger::Ledger), see [`TrackerState::remove_volunteer`](crate::state::TrackerState::remove_volunteer)
    pub fn remove(&mut self, id: &VolunteerId) -> Option<Volunteer> {
        let position = self.volunteers.iter().position(|v| &v.id == id)?;
        Some(self.volunteers.remove(position))
    }

    pub fn get(&self, id: &VolunteerId) -> Option<&Volunteer> {
        self.volunteers.iter().find(|v| &v.id == id)
    }

    /// Case-insensitive lookup by name
    pub fn find_by_name(&self, name: &str) -> Option<&Volunteer> {
        let name = name.trim().to_lowercase();
        self.volunteers.iter().find(|v| v.name.to_lowercase() == name)
    }

    fn name_is_taken(&self, name: &str, except: Option<&VolunteerId>) -> bool {
        let lowercase = name.to_lowercase();
        self.volunteers.iter()
            .filter(|v| Some(&v.id) != except)
            .any(|v| v.name.to_lowercase() == lowercase)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Volunteer> {
        self.volunteers.iter()
    }

    pub fn len(&self) -> usize {
        self.volunteers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.volunteers.is_empty()
    }
}

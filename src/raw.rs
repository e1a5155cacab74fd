//! The serializable document used for persistence, imports and exports
//!
//! Documents come from untrusted places (a previous version of the app, a hand-edited export...).
//! [`RawState::parse`] checks the overall shape and drops malformed entries, instead of failing on the first one.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Error;

/// How strict the shape check of a document is
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Validation {
    /// Used for the persisted document: only `sundays` is required, other fields get default values
    Load,
    /// Used for user-provided files: `sundays`, `volunteers` and `servedBySunday` are all required
    Import,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawVolunteer {
    pub id: String,
    pub name: String,
}

/// The whole tracker state, as plain strings
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawState {
    pub volunteers: Vec<RawVolunteer>,
    pub sundays: Vec<String>,
    pub current_sunday: Option<String>,
    pub selected_sunday: Option<String>,
    /// `"YYYY-MM-DD"` -> volunteer ids
    pub served_by_sunday: BTreeMap<String, Vec<String>>,
}

impl RawState {
    /// Parses a JSON document, see [`Self::from_value`]
    pub fn parse(document: &str, validation: Validation) -> Result<Self, Error> {
        let value: Value = serde_json::from_str(document)?;
        Self::from_value(&value, validation)
    }

    /// Checks the shape of a document and extracts its well-formed entries.
    ///
    /// Returns [`Error::InvalidState`] when a required array or mapping is missing.
    /// Entries of the wrong type (e.g. a volunteer without a name) are dropped.
    pub fn from_value(value: &Value, validation: Validation) -> Result<Self, Error> {
        let root = value.as_object()
            .ok_or_else(|| Error::InvalidState("the document is not a JSON object".to_string()))?;

        let sundays = match root.get("sundays").and_then(Value::as_array) {
            None => return Err(Error::InvalidState("missing \"sundays\" array".to_string())),
            Some(list) => strings_of(list, "sundays"),
        };

        let volunteers = match (root.get("volunteers").and_then(Value::as_array), validation) {
            (Some(list), _) => volunteers_of(list),
            (None, Validation::Load) => {
                log::debug!("No \"volunteers\" array, starting with an empty roster");
                Vec::new()
            },
            (None, Validation::Import) => return Err(Error::InvalidState("missing \"volunteers\" array".to_string())),
        };

        let served_by_sunday = match (root.get("servedBySunday").and_then(Value::as_object), validation) {
            (Some(map), _) => served_of(map),
            (None, Validation::Load) => {
                log::debug!("No \"servedBySunday\" mapping, starting with an empty ledger");
                BTreeMap::new()
            },
            (None, Validation::Import) => return Err(Error::InvalidState("missing \"servedBySunday\" mapping".to_string())),
        };

        Ok(Self {
            volunteers,
            sundays,
            current_sunday: non_empty_string(root.get("currentSunday")),
            selected_sunday: non_empty_string(root.get("selectedSunday")),
            served_by_sunday,
        })
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn non_empty_string(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str)
        .filter(|s| s.is_empty() == false)
        .map(str::to_string)
}

fn strings_of(list: &[Value], field: &str) -> Vec<String> {
    list.iter()
        .filter_map(|v| match v.as_str() {
            Some(s) => Some(s.to_string()),
            None => {
                log::debug!("Dropping non-string entry {} from {:?}", v, field);
                None
            },
        })
        .collect()
}

fn volunteers_of(list: &[Value]) -> Vec<RawVolunteer> {
    list.iter()
        .filter_map(|v| {
            let id = v.get("id").and_then(Value::as_str);
            let name = v.get("name").and_then(Value::as_str);
            match (id, name) {
                (Some(id), Some(name)) if id.is_empty() == false => Some(RawVolunteer {
                    id: id.to_string(),
                    name: name.to_string(),
                }),
                _ => {
                    log::warn!("Dropping malformed volunteer entry {}", v);
                    None
                },
            }
        })
        .collect()
}

fn served_of(map: &Map<String, Value>) -> BTreeMap<String, Vec<String>> {
    map.iter()
        .filter_map(|(sunday, ids)| match ids.as_array() {
            Some(ids) => Some((sunday.clone(), strings_of(ids, sunday))),
            None => {
                log::warn!("Dropping served list of {}: not an array", sunday);
                None
            },
        })
        .collect()
}



#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_tolerates_missing_optional_fields() {
        let raw = RawState::parse(r#"{"sundays": ["2026-01-04"]}"#, Validation::Load).unwrap();
        assert_eq!(raw.sundays, vec!["2026-01-04"]);
        assert!(raw.volunteers.is_empty());
        assert!(raw.served_by_sunday.is_empty());
        assert_eq!(raw.current_sunday, None);
    }

    #[test]
    fn sundays_are_always_required() {
        for validation in &[Validation::Load, Validation::Import] {
            let err = RawState::parse(r#"{"volunteers": [], "servedBySunday": {}}"#, *validation).unwrap_err();
            assert!(matches!(err, Error::InvalidState(_)));
        }
        assert!(matches!(RawState::parse(r#"{"sundays": "2026-01-04"}"#, Validation::Load), Err(Error::InvalidState(_))));
        assert!(matches!(RawState::parse("[]", Validation::Load), Err(Error::InvalidState(_))));
        assert!(matches!(RawState::parse("not json", Validation::Load), Err(Error::InvalidState(_))));
    }

    #[test]
    fn import_requires_every_collection() {
        let missing_ledger = r#"{"sundays": [], "volunteers": []}"#;
        assert!(matches!(RawState::parse(missing_ledger, Validation::Import), Err(Error::InvalidState(_))));

        let missing_roster = r#"{"sundays": [], "servedBySunday": {}}"#;
        assert!(matches!(RawState::parse(missing_roster, Validation::Import), Err(Error::InvalidState(_))));

        let complete = r#"{"sundays": [], "volunteers": [], "servedBySunday": {}}"#;
        assert!(RawState::parse(complete, Validation::Import).is_ok());
    }

    #[test]
    fn malformed_entries_are_dropped() {
        let document = r#"{
            "sundays": ["2026-01-04", 12, null],
            "volunteers": [{"id": "a", "name": "Alice"}, {"id": "b"}, {"name": "Nobody"}, {"id": "", "name": "Empty"}],
            "servedBySunday": {"2026-01-04": ["a", 3], "2026-01-11": "a"},
            "currentSunday": "2026-01-04",
            "selectedSunday": ""
        }"#;
        let raw = RawState::parse(document, Validation::Import).unwrap();
        assert_eq!(raw.sundays, vec!["2026-01-04"]);
        assert_eq!(raw.volunteers, vec![RawVolunteer { id: "a".to_string(), name: "Alice".to_string() }]);
        assert_eq!(raw.served_by_sunday.len(), 1);
        assert_eq!(raw.served_by_sunday["2026-01-04"], vec!["a"]);
        assert_eq!(raw.current_sunday.as_deref(), Some("2026-01-04"));
        assert_eq!(raw.selected_sunday, None);
    }

    #[test]
    fn serialized_field_names() {
        let raw = RawState {
            current_sunday: Some("2026-01-04".to_string()),
            ..RawState::default()
        };
        let value: Value = serde_json::from_str(&raw.to_json_pretty().unwrap()).unwrap();
        assert!(value.get("servedBySunday").unwrap().is_object());
        assert_eq!(value.get("currentSunday").unwrap(), "2026-01-04");
        assert!(value.get("selectedSunday").unwrap().is_null());
    }
}

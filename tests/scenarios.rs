//! End-to-end scenarios of a volunteer rotation, driven through a `Tracker` backed by an in-memory store

use chrono::NaiveDate;
use serde_json::json;

use sunday_roster::config::STORAGE_KEY;
use sunday_roster::mock_prompter::MockPrompter;
use sunday_roster::raw::{RawState, Validation};
use sunday_roster::store::MemoryStore;
use sunday_roster::traits::KeyValueStore;
use sunday_roster::{Error, SundayDate, Tracker, TrackerState, VolunteerId, Window};

fn sunday(iso: &str) -> SundayDate {
    iso.parse().unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, 24).unwrap()
}

/// A stored document with 9 consecutive Sundays, from 2026-01-04 to 2026-03-01
fn nine_sundays_document(served_by_sunday: serde_json::Value) -> String {
    let sundays: Vec<String> = Window::build_around(sunday("2026-01-04"), 0, 8).to_iso_list();
    json!({
        "volunteers": [
            {"id": "A", "name": "Alice"},
            {"id": "B", "name": "Bob"},
            {"id": "C", "name": "carol"},
        ],
        "sundays": sundays,
        "currentSunday": "2026-02-22",
        "selectedSunday": "2026-02-22",
        "servedBySunday": served_by_sunday,
    }).to_string()
}

fn tracker_with(document: &str) -> Tracker<MemoryStore> {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut store = MemoryStore::new();
    store.set(STORAGE_KEY, document).unwrap();
    Tracker::load(store, today())
}

fn ranked_names(tracker: &Tracker<MemoryStore>) -> Vec<String> {
    tracker.ranking().iter().map(|r| r.volunteer.name().to_string()).collect()
}

#[test]
fn seven_weeks_since_the_first_sunday() {
    let tracker = tracker_with(&nine_sundays_document(json!({"2026-01-04": ["A"]})));

    let ranking = tracker.ranking();
    let alice = ranking.iter().find(|r| r.volunteer.id().as_str() == "A").unwrap();
    assert_eq!(alice.last_served, Some(sunday("2026-01-04")));
    assert_eq!(alice.weeks_since, Some(7));
}

#[test]
fn extending_the_past_of_a_nine_sunday_window() {
    let mut tracker = tracker_with(&nine_sundays_document(json!({})));
    assert_eq!(tracker.state().window().len(), 9);

    tracker.show_previous_sundays();
    let window = tracker.state().window();
    assert_eq!(window.len(), 13);
    assert_eq!(window.first(), Some(sunday("2025-12-07")));
    assert!(window.sundays().windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn removing_a_volunteer_assigned_on_three_sundays() {
    let mut tracker = tracker_with(&nine_sundays_document(json!({
        "2026-01-04": ["A", "B"],
        "2026-01-25": ["A"],
        "2026-02-15": ["A", "C"],
    })));
    let alice = VolunteerId::from("A");

    assert!(tracker.remove_volunteer(&alice, &mut MockPrompter::confirming(1)));

    let ledger = tracker.state().ledger();
    for iso in &["2026-01-04", "2026-01-25", "2026-02-15"] {
        assert!(ledger.is_assigned(&sunday(iso), &alice) == false);
    }
    assert_eq!(ranked_names(&tracker), vec!["Bob", "carol"]);

    // The removal has been persisted as well
    let stored = tracker.store().get(STORAGE_KEY).unwrap().unwrap();
    assert!(stored.contains("\"A\"") == false);
}

#[test]
fn importing_a_document_without_ledger_is_refused() {
    let mut tracker = Tracker::load(MemoryStore::new(), today());
    let before = tracker.state().clone();

    let document = json!({
        "volunteers": [{"id": "A", "name": "Alice"}],
        "sundays": ["2026-01-04"],
    }).to_string();

    assert!(matches!(RawState::parse(&document, Validation::Import), Err(Error::InvalidState(_))));
    assert!(matches!(tracker.import(&document), Err(Error::InvalidImport(_))));
    // Not merged: this is still the default state
    assert_eq!(tracker.state(), &before);
    assert!(tracker.state().roster().is_empty());
}

#[test]
fn importing_replaces_everything() {
    let mut tracker = Tracker::load(MemoryStore::new(), today());
    tracker.add_volunteer("Zed").unwrap();

    let document = json!({
        "volunteers": [{"id": "A", "name": "Alice"}, {"id": "B", "name": "Bob"}],
        "sundays": ["2026-01-04", "2026-01-11", "2026-01-12", "2026-01-18"],
        "servedBySunday": {"2026-01-04": ["B"]},
    }).to_string();
    tracker.import(&document).unwrap();

    let state = tracker.state();
    assert_eq!(state.window().to_iso_list(), vec!["2026-01-04", "2026-01-11", "2026-01-18"]);
    assert_eq!(state.current_sunday(), sunday("2026-01-18"));
    assert_eq!(state.selected_sunday(), sunday("2026-01-18"));
    assert_eq!(ranked_names(&tracker), vec!["Alice", "Bob"]);
    assert_eq!(tracker.ranking()[1].weeks_since, Some(2));
}

#[test]
fn export_then_import_restores_the_same_state() {
    let mut tracker = tracker_with(&nine_sundays_document(json!({"2026-01-11": ["B"], "2026-02-01": ["A"]})));
    tracker.set_selected_sunday(sunday("2026-01-18"));
    let exported = tracker.export().unwrap();

    let mut other = Tracker::load(MemoryStore::new(), today());
    other.import(&exported).unwrap();
    assert_eq!(other.state(), tracker.state());
}

#[test]
fn ranking_drives_who_serves_next() {
    let mut tracker = tracker_with(&nine_sundays_document(json!({
        "2026-01-11": ["B"],
        "2026-02-01": ["C"],
    })));
    assert_eq!(ranked_names(&tracker), vec!["Alice", "Bob", "carol"]);

    // Alice serves on the current Sunday: she goes to the bottom
    let alice = VolunteerId::from("A");
    assert!(tracker.set_served(&alice, true));
    assert_eq!(ranked_names(&tracker), vec!["Bob", "carol", "Alice"]);

    let weeks: Vec<Option<usize>> = tracker.ranking().iter().map(|r| r.weeks_since).collect();
    assert_eq!(weeks, vec![Some(6), Some(3), Some(0)]);

    // Looking back from an earlier Sunday ignores later services
    tracker.set_current_sunday(sunday("2026-01-25"));
    let weeks: Vec<(String, Option<usize>)> = tracker.ranking().iter()
        .map(|r| (r.volunteer.name().to_string(), r.weeks_since))
        .collect();
    assert_eq!(weeks, vec![
        ("Alice".to_string(), None),
        ("carol".to_string(), None),
        ("Bob".to_string(), Some(2)),
    ]);
}

#[test]
fn duplicate_names_leave_the_state_unchanged() {
    let mut tracker = tracker_with(&nine_sundays_document(json!({})));
    let before = tracker.state().clone();

    assert!(matches!(tracker.add_volunteer("ALICE"), Err(Error::DuplicateName(_))));
    assert!(matches!(tracker.rename_volunteer(&VolunteerId::from("B"), "Carol"), Err(Error::DuplicateName(_))));
    assert_eq!(tracker.state(), &before);
}

#[test]
fn stored_document_without_sundays_falls_back_to_default() {
    let tracker = tracker_with(r#"{"volunteers": [{"id": "A", "name": "Alice"}], "servedBySunday": {}}"#);
    assert!(tracker.state().roster().is_empty());
    assert_eq!(tracker.state().window().len(), 13);
    assert_eq!(tracker.state().current_sunday(), sunday("2026-02-22"));
}

#[test]
fn narrowed_window_keeps_dormant_ledger_entries() {
    let mut tracker = tracker_with(&nine_sundays_document(json!({"2026-01-04": ["A"]})));

    // Jumping to a later date drops 2026-01-04 from the window, but not from the ledger
    tracker.jump_to_today(NaiveDate::from_ymd_opt(2026, 6, 3).unwrap());
    let state = tracker.state();
    assert!(state.window().contains(&sunday("2026-01-04")) == false);
    assert!(state.ledger().is_assigned(&sunday("2026-01-04"), &VolunteerId::from("A")));
    assert_eq!(ranked_names(&tracker), vec!["Alice", "Bob", "carol"]);
    assert!(tracker.ranking().iter().all(|r| r.weeks_since.is_none()));

    // Once the window includes it again, it counts again (in window positions: 2026-01-11 is not in the window)
    let mut state: TrackerState = tracker.state().clone();
    state.set_selected_sunday(sunday("2026-01-04"));
    state.set_current_sunday(sunday("2026-01-18"));
    assert_eq!(&state.window().sundays()[..2], &[sunday("2026-01-04"), sunday("2026-01-18")]);
    let alice = state.ranking().into_iter().find(|r| r.volunteer.id().as_str() == "A").map(|r| r.weeks_since);
    assert_eq!(alice, Some(Some(1)));
}

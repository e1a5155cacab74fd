//! Some utility functions

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::calendar::SundayDate;
use crate::rotation::RotationRecord;
use crate::window::Window;

/// Human-readable form of a Sunday, e.g. `Sun Feb 22, 2026`
pub fn format_sunday(sunday: &SundayDate) -> String {
    sunday.as_date().format("%a %b %-d, %Y").to_string()
}

/// Alphabetical order of display names.
///
/// Names are first compared on their base letters, ignoring accents and case (so that `Émile` sorts before `Eve`, and `anna` before `Bob`).
/// Accents, then case, only break the remaining ties.
pub fn compare_names(left: &str, right: &str) -> Ordering {
    Ord::cmp(&base_letters(left), &base_letters(right))
        .then_with(|| Ord::cmp(&left.to_lowercase(), &right.to_lowercase()))
        .then_with(|| left.cmp(right))
}

/// Lowercase letters of `name`, with their diacritics stripped
fn base_letters(name: &str) -> String {
    name.nfd()
        .filter(|c| is_combining_mark(*c) == false)
        .flat_map(char::to_lowercase)
        .collect()
}

/// The label shown in the "weeks since" column
pub fn weeks_label(record: &RotationRecord) -> String {
    match record.weeks_since {
        None => "Never".to_string(),
        Some(weeks) => weeks.to_string(),
    }
}

/// A debug utility that pretty-prints a ranking
pub fn print_ranking(ranking: &[RotationRecord]) {
    if ranking.is_empty() {
        println!("    No volunteers yet.");
        return;
    }
    for record in ranking {
        let last = record.last_served
            .map(|s| format_sunday(&s))
            .unwrap_or_else(|| "-".to_string());
        println!("    {:>6}  {}\t(last served: {})", weeks_label(record), record.volunteer.name(), last);
    }
}

/// A debug utility that prints the Sundays of a window, marking the reference and selected ones
pub fn print_window(window: &Window, current: &SundayDate, selected: &SundayDate) {
    for sunday in window.iter() {
        let current_mark = if sunday == current { "*" } else { " " };
        let selected_mark = if sunday == selected { ">" } else { " " };
        println!("  {}{} {}", current_mark, selected_mark, format_sunday(sunday));
    }
}

//! Support for library configuration options

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::calendar::SundayDate;

/// Key under which the whole tracker document is persisted in a [`KeyValueStore`](crate::traits::KeyValueStore)
pub const STORAGE_KEY: &str = "rezcafe_volunteer_tracker_v1";

/// Prefix of the file names suggested for exports (e.g. `rezcafe-volunteer-tracker-2026-02-22.json`).
/// Feel free to override it when initing this library.
pub static EXPORT_FILE_PREFIX: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("rezcafe-volunteer-tracker".to_string())));

/// Which Sunday stands for "today" when a window is built or re-centered
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SundayAnchor {
    /// The Sunday on or before today
    Nearest,
    /// The Sunday on or after today
    Upcoming,
}

impl SundayAnchor {
    pub fn resolve(&self, date: NaiveDate) -> SundayDate {
        match self {
            SundayAnchor::Nearest => SundayDate::nearest(date),
            SundayAnchor::Upcoming => SundayDate::upcoming(date),
        }
    }
}

impl Default for SundayAnchor {
    fn default() -> Self {
        SundayAnchor::Nearest
    }
}

/// Sizes used when building and growing the Sunday window
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    /// Sundays before the anchor in a freshly built window
    pub past_count: usize,
    /// Sundays after the anchor in a freshly built window
    pub future_count: usize,
    /// How many Sundays the "previous" and "next" actions add
    pub extend_step: usize,
    /// Half-width of the window rebuilt by "jump to today"
    pub recenter_radius: usize,
    pub anchor: SundayAnchor,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            past_count: 8,
            future_count: 4,
            extend_step: 4,
            recenter_radius: 6,
            anchor: SundayAnchor::Nearest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_settings_use_defaults() {
        let settings: WindowSettings = serde_json::from_str(r#"{"extend_step": 2, "anchor": "Upcoming"}"#).unwrap();
        assert_eq!(settings.extend_step, 2);
        assert_eq!(settings.anchor, SundayAnchor::Upcoming);
        assert_eq!(settings.past_count, 8);
        assert_eq!(settings.future_count, 4);
    }

    #[test]
    fn anchors() {
        let thursday = NaiveDate::from_ymd_opt(2026, 2, 19).unwrap();
        assert_eq!(SundayAnchor::Nearest.resolve(thursday).to_iso(), "2026-02-15");
        assert_eq!(SundayAnchor::Upcoming.resolve(thursday).to_iso(), "2026-02-22");
    }
}

//! This crate tracks volunteers serving at a weekly (Sunday) event, and tells who should serve next.
//!
//! The time axis is a [`Window`] of Sundays (see the [`window`] module), built on the date helpers of the [`calendar`] module. \
//! Who served on which Sunday is recorded in a [`Ledger`](ledger::Ledger), and the [`rotation`] module derives, for every volunteer,
//! how many Sundays have passed since they last served. Volunteers that have never served, then the ones idle for the longest, come first.
//!
//! A [`Tracker`] ties all of this together: it owns the [`TrackerState`], and persists it to a
//! [`KeyValueStore`](traits::KeyValueStore) after every action.
//! Nothing in this crate reads the system clock: "today" is always passed by the caller.

pub mod traits;

pub mod error;
pub use error::Error;
pub mod calendar;
pub use calendar::SundayDate;
pub mod window;
pub use window::Window;
pub mod ledger;
pub mod volunteer;
pub use volunteer::{Volunteer, VolunteerId};
pub mod rotation;
pub use rotation::RotationRecord;
pub mod raw;
pub mod state;
pub use state::TrackerState;
pub mod tracker;
pub use tracker::Tracker;

pub mod store;
pub mod mock_prompter;

pub mod config;
pub mod utils;

//! Errors returned by the roster core

use std::fmt::{Display, Formatter};

/// Everything that can go wrong inside the core.
///
/// None of these is fatal: load and import failures are turned into fallbacks by the
/// [`Tracker`](crate::tracker::Tracker), and [`Error::DuplicateName`] simply blocks the operation that raised it.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// A date string that is not a real `YYYY-MM-DD` calendar date
    InvalidFormat(String),
    /// A persisted or imported document that lacks a required array or mapping
    InvalidState(String),
    /// A volunteer name that collides (case-insensitively) with another one in the roster
    DuplicateName(String),
    /// An import that has been refused. The in-memory state has been left untouched
    InvalidImport(String),
}

impl Error {
    pub fn kind_str(&self) -> &'static str {
        match self {
            Error::InvalidFormat(_) => "invalid date format",
            Error::InvalidState(_)  => "invalid state document",
            Error::DuplicateName(_) => "duplicate volunteer name",
            Error::InvalidImport(_) => "invalid import",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Error::InvalidFormat(msg)
            | Error::InvalidState(msg)
            | Error::DuplicateName(msg)
            | Error::InvalidImport(msg) => msg,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind_str(), self.message())
    }
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidState(format!("unable to parse document: {}", err))
    }
}

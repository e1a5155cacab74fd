//! Interfaces to the collaborators of the core: storage and the user

use std::error::Error;

/// An opaque key-value store that persists documents between sessions
pub trait KeyValueStore {
    /// Returns the value stored under `key`, or `None` if nothing has been stored yet
    fn get(&self, key: &str) -> Result<Option<String>, Box<dyn Error>>;
    /// Stores `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn Error>>;
    /// Forgets about `key`. Removing a missing key is not an error
    fn remove(&mut self, key: &str) -> Result<(), Box<dyn Error>>;
}

/// Asks the user things. Destructive operations are only performed once this returns a confirmation
pub trait Prompter {
    /// Ask a yes/no question
    fn confirm(&mut self, message: &str) -> bool;
    /// Ask for a line of text, pre-filled with `default`. `None` means the user cancelled
    fn prompt(&mut self, message: &str, default: &str) -> Option<String>;
}

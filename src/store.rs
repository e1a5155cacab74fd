//! [`KeyValueStore`] implementations: one in memory, one backed by a folder of JSON files

use std::collections::HashMap;
use std::error::Error;
use std::path::{Path, PathBuf};

use crate::traits::KeyValueStore;

/// A store that lives as long as the process. Mostly useful for tests
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), Box<dyn Error>> {
        self.entries.remove(key);
        Ok(())
    }
}



/// A store that saves every key to its own `<key>.json` file in a folder
#[derive(Clone, Debug, PartialEq)]
pub struct FolderStore {
    backing_folder: PathBuf,
}

impl FolderStore {
    /// The folder does not need to exist yet, it is created on the first write
    pub fn new(folder: &Path) -> Self {
        Self {
            backing_folder: PathBuf::from(folder),
        }
    }

    pub fn folder(&self) -> &Path {
        &self.backing_folder
    }

    /// Path of the file that stores `key`
    pub fn file_for(&self, key: &str) -> PathBuf {
        let file_name = sanitize_filename::sanitize(format!("{}.json", key));
        self.backing_folder.join(file_name)
    }
}

impl KeyValueStore for FolderStore {
    fn get(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let path = self.file_for(key);
        if path.exists() == false {
            return Ok(None);
        }
        match std::fs::read_to_string(&path) {
            Err(err) => Err(format!("Unable to read file {:?}: {}", path, err).into()),
            Ok(content) => Ok(Some(content)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        std::fs::create_dir_all(&self.backing_folder)?;
        let path = self.file_for(key);
        if let Err(err) = std::fs::write(&path, value) {
            return Err(format!("Unable to save file {:?}: {}", path, err).into());
        }
        log::trace!("Saved {:?}", path);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), Box<dyn Error>> {
        let path = self.file_for(key);
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        Ok(())
    }
}



#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(store: &mut dyn KeyValueStore) {
        assert_eq!(store.get("roster").unwrap(), None);

        store.set("roster", "{\"a\": 1}").unwrap();
        assert_eq!(store.get("roster").unwrap().as_deref(), Some("{\"a\": 1}"));

        store.set("roster", "{}").unwrap();
        assert_eq!(store.get("roster").unwrap().as_deref(), Some("{}"));

        store.remove("roster").unwrap();
        assert_eq!(store.get("roster").unwrap(), None);
        store.remove("roster").unwrap();
    }

    #[test]
    fn memory_store() {
        let mut store = MemoryStore::new();
        exercise(&mut store);
        assert!(store.is_empty());
    }

    #[test]
    fn folder_store() {
        let folder = std::env::temp_dir().join(format!("sunday_roster_store_{}", uuid::Uuid::new_v4()));
        let mut store = FolderStore::new(&folder);
        exercise(&mut store);

        store.set("a/b:c", "x").unwrap();
        let path = store.file_for("a/b:c");
        assert_eq!(path.parent(), Some(folder.as_path()));
        assert!(path.exists());

        let _ = std::fs::remove_dir_all(&folder);
    }
}

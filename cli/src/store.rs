//! Session persistence for the CLI.
//!
//! The token store's three keys live in one small JSON object on disk so a
//! login survives between invocations. Every operation re-reads the file;
//! the CLI runs one command per process so there is nothing to cache.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use lending::store::KeyValueStore;

use crate::error::CliError;

/// `<config dir>/library-cli/session.json`.
pub fn default_path() -> Result<PathBuf, CliError> {
    dirs::config_dir().map(|dir| dir.join("library-cli").join("session.json")).ok_or(CliError::NoStateDir)
}

#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing file reads as empty; a corrupt one is reported and ignored.
    fn load(&self) -> BTreeMap<String, String> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "session file unreadable");
                return BTreeMap::new();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "session file corrupt; ignoring");
            BTreeMap::new()
        })
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), CliError> {
        if entries.is_empty() {
            return match fs::remove_file(&self.path) {
                Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
                _ => Ok(()),
            };
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(entries)?)?;
        Ok(())
    }

    fn update(&self, apply: impl FnOnce(&mut BTreeMap<String, String>)) {
        let mut entries = self.load();
        apply(&mut entries);
        if let Err(e) = self.save(&entries) {
            tracing::warn!(path = %self.path.display(), error = %e, "session file write failed");
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.load().remove(key)
    }

    fn set(&self, key: &str, value: &str) {
        self.update(|entries| {
            entries.insert(key.to_owned(), value.to_owned());
        });
    }

    fn remove(&self, key: &str) {
        self.update(|entries| {
            entries.remove(key);
        });
    }
}

//! A JSON file holding one install's record.
//!
//! Saves are atomic: the record is written to a sibling temporary file and
//! renamed over the target, so a crash mid-save leaves either the old or the
//! new record on disk, never a truncated one.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use calpet_types::{Calendar, PetState};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::record::PetRecord;

/// Suffix appended to the target file name while a save is in flight.
const TEMP_SUFFIX: &str = ".tmp";

/// File-backed persistence for the state record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStore {
    /// Location of the record.
    path: PathBuf,
}

impl FileStore {
    /// A store backed by the file at `path`. Nothing is read until
    /// [`FileStore::load`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the record.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved state, or `None` if nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file exists but cannot be read, or
    /// [`StoreError::Json`] if it is not a valid record.
    pub fn load(&self) -> Result<Option<PetState>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let record: PetRecord = serde_json::from_str(&contents)?;
        debug!(path = %self.path.display(), "State record loaded");
        Ok(Some(record.into_state()))
    }

    /// Load the saved state, creating a fresh one on first launch.
    ///
    /// Returns the state and whether it was newly created. A new state is
    /// not written until [`FileStore::save`] is called.
    ///
    /// # Errors
    ///
    /// Same as [`FileStore::load`].
    pub fn load_or_create(
        &self,
        now: DateTime<Utc>,
        calendar: &Calendar,
    ) -> Result<(PetState, bool), StoreError> {
        if let Some(state) = self.load()? {
            return Ok((state, false));
        }
        info!(path = %self.path.display(), "No saved state; starting a new install");
        Ok((PetState::new(now, calendar), true))
    }

    /// Save the state atomically.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if writing or renaming fails, or
    /// [`StoreError::Json`] if the state cannot be encoded.
    pub fn save(&self, state: &PetState) -> Result<(), StoreError> {
        let record = PetRecord::from_state(state)?;
        let json = serde_json::to_string_pretty(&record)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let temp = self.temp_path();
        fs::write(&temp, json)?;
        fs::rename(&temp, &self.path)?;
        debug!(path = %self.path.display(), "State record saved");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(TEMP_SUFFIX);
        PathBuf::from(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_file_sits_next_to_the_target() {
        let store = FileStore::new("/var/lib/calpet/state.json");
        assert_eq!(store.temp_path(), PathBuf::from("/var/lib/calpet/state.json.tmp"));
    }
}

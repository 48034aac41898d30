//! JSON persistence for the roster.
//!
//! The roster lives in one pretty-printed JSON file under the configured
//! root folder. On a first launch that file does not exist yet; a seed
//! file of bare person records is consulted instead, and an empty roster
//! is the final fallback.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::error::{Result, StoreError};
use crate::person::Person;
use crate::roster::Roster;

/// Roster file name under the root folder.
pub const ROSTER_FILE: &str = "roster.json";
/// Seed file of bare person records, consulted when no roster exists.
pub const PEOPLE_FILE: &str = "people.json";

/// Reads and writes rosters under a root folder.
#[derive(Debug, Clone)]
pub struct RosterStore {
    root: PathBuf,
}

impl RosterStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Opens the store at `root`, creating the folder if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let store = Self::new(root);
        fs::create_dir_all(&store.root)?;
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn roster_path(&self) -> PathBuf {
        self.root.join(ROSTER_FILE)
    }

    pub fn people_path(&self) -> PathBuf {
        self.root.join(PEOPLE_FILE)
    }

    /// Loads the roster.
    ///
    /// A missing roster file is not an error: the seed people file is
    /// consulted instead, giving everyone listed a fresh ledger of
    /// `default_slots` slots, and an empty roster is returned when that
    /// file is absent too.
    pub fn load(&self, default_slots: usize) -> Result<Roster> {
        let roster_path = self.roster_path();
        if roster_path.exists() {
            let content = read(&roster_path)?;
            return decode(&roster_path, &content);
        }

        let people_path = self.people_path();
        if people_path.exists() {
            let content = read(&people_path)?;
            let people: Vec<Person> = decode(&people_path, &content)?;
            return Ok(Roster::from_people(people, default_slots));
        }

        Ok(Roster::new())
    }

    /// Writes the roster, pretty-printed.
    pub fn save(&self, roster: &Roster) -> Result<()> {
        let path = self.roster_path();
        let content = serde_json::to_string_pretty(roster)?;
        fs::write(&path, content).map_err(|source| StoreError::WriteFailed { path, source })?;
        Ok(())
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| {
        StoreError::ReadFailed {
            path: path.to_path_buf(),
            source,
        }
        .into()
    })
}

fn decode<T: DeserializeOwned>(path: &Path, content: &str) -> Result<T> {
    serde_json::from_str(content).map_err(|source| {
        StoreError::DecodeFailed {
            path: path.to_path_buf(),
            source,
        }
        .into()
    })
}

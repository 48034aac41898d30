//! TOML-based application configuration.
//!
//! Stores the folder holding the roster files and the slot count given to
//! new ledgers. Configuration is stored at `~/.config/croissant/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::{ConfigError, Result};
use crate::ledger::Ledger;

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/croissant/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Folder holding the roster files. The data directory when unset.
    #[serde(default)]
    pub root_path: Option<PathBuf>,
    /// Slot count given to newly created ledgers.
    #[serde(default = "default_slots")]
    pub slots: usize,
}

fn default_slots() -> usize {
    Ledger::DEFAULT_SLOTS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_path: None,
            slots: default_slots(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or
    /// parsed, or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg = toml::from_str(&content).map_err(|err| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: err.to_string(),
                })?;
                Ok(cfg)
            }
            // Only a genuinely absent file gets the seeded default; any
            // other read failure must not clobber an existing config.
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(err) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: err.to_string(),
            }
            .into()),
        }
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|err| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        std::fs::write(path, content).map_err(|err| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        Ok(())
    }

    /// Folder where the roster files live.
    pub fn root(&self) -> Result<PathBuf> {
        match &self.root_path {
            Some(path) => Ok(path.clone()),
            None => data_dir(),
        }
    }

    /// Get a config value as string by key.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "root_path" => Some(
                self.root_path
                    .as_ref()
                    .map(|path| path.display().to_string())
                    .unwrap_or_default(),
            ),
            "slots" => Some(self.slots.to_string()),
            _ => None,
        }
    }

    /// Apply a value to a key without persisting.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "root_path" => {
                self.root_path = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            "slots" => {
                let slots: usize = value.parse().map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("cannot parse '{value}' as a slot count"),
                })?;
                if slots == 0 {
                    return Err(ConfigError::InvalidValue {
                        key: key.to_string(),
                        message: "a ledger needs at least one slot".to_string(),
                    }
                    .into());
                }
                self.slots = slots;
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string()).into()),
        }
        Ok(())
    }

    /// Set a config value by key and persist the change.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.apply(key, value)?;
        self.save()
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}

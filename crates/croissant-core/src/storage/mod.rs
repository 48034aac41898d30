mod config;
mod store;

pub use config::Config;
pub use store::{RosterStore, PEOPLE_FILE, ROSTER_FILE};

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/croissant[-dev]/` based on CROISSANT_ENV.
///
/// Set CROISSANT_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("CROISSANT_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("croissant-dev")
    } else {
        base_dir.join("croissant")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

mod config;

pub use config::{BoardSection, Config, OrderSection, SelectorSection};

use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Returns `~/.config/taskpick[-dev]/` based on TASKPICK_ENV.
///
/// Set TASKPICK_ENV=dev to use development config directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn config_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .ok_or(ConfigError::NoConfigDir)?
        .join(".config");

    let env = std::env::var("TASKPICK_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("taskpick-dev")
    } else {
        base_dir.join("taskpick")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

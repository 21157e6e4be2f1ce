mod config;

pub use config::{AlertConfig, ClockConfig, Config, LogConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the configuration directory.
///
/// `BREAKCLOCK_CONFIG_DIR` overrides the location entirely. Otherwise this is
/// `~/.config/breakclock[-dev]/`, with the `-dev` suffix selected by
/// `BREAKCLOCK_ENV=dev`. The directory is created if missing.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("BREAKCLOCK_CONFIG_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("BREAKCLOCK_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("breakclock-dev")
            } else {
                base_dir.join("breakclock")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::DirUnavailable {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}

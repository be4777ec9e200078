mod config;

pub use config::{Config, DisplayConfig, LoggingConfig, PromptConfig, SchedulerConfig};

use std::path::PathBuf;

use crate::error::Result;

/// Returns the configuration directory.
///
/// `POMOPRO_CONFIG_DIR` wins when set. Otherwise `~/.config/pomopro[-dev]/`,
/// with the `-dev` suffix when `POMOPRO_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("POMOPRO_CONFIG_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("POMOPRO_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("pomopro-dev")
            } else {
                base_dir.join("pomopro")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

//! Platform-specific configuration paths.
//!
//! # Directory Structure
//!
//! - **User config**: `~/.config/echora/` (Linux), `~/Library/Application Support/echora/` (macOS), `%APPDATA%\echora\` (Windows)
//! - **Default job config**: `<user config>/config.toml`

use crate::error::ConfigError;
use std::path::{Path, PathBuf};

/// Application name used for directory paths.
const APP_NAME: &str = "echora";

/// File name of the default job configuration.
const CONFIG_FILE: &str = "config.toml";

/// Returns the user-specific configuration directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the path of the default job configuration file.
pub fn default_config_path() -> PathBuf {
    user_config_dir().join(CONFIG_FILE)
}

/// Pick the configuration file to load.
///
/// An explicit path is always returned; otherwise the default file is
/// returned only if it exists.
pub fn find_config(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let default = default_config_path();
    default.is_file().then_some(default)
}

/// Ensures the user config directory exists, creating it if necessary.
pub fn ensure_user_config_dir() -> Result<PathBuf, ConfigError> {
    let dir = user_config_dir();
    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| ConfigError::create_dir(&dir, e))?;
    }
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_dir_ends_with_app_name() {
        assert!(user_config_dir().ends_with(APP_NAME));
        assert!(default_config_path().ends_with("echora/config.toml"));
    }

    #[test]
    fn explicit_config_wins() {
        let explicit = Path::new("/tmp/custom.toml");
        assert_eq!(find_config(Some(explicit)), Some(explicit.to_path_buf()));
    }
}

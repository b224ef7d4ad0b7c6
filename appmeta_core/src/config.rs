use crate::error::AppMetaError;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "appmeta";
const APP_NAME: &str = "appmeta_pusher";
const CONFIG_FILE: &str = "config.json";

/// Environment override for the config directory (used by tests and portable installs)
pub const CONFIG_DIR_ENV: &str = "APPMETA_CONFIG_DIR";

/// Default FTP port of the console's FTP payload
pub const DEFAULT_PORT: &str = "2121";

/// Last-used console address. Only `ip` and `port` are remembered; the
/// application identifier is entered per session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub ip: String,
    pub port: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ip: String::new(),
            port: DEFAULT_PORT.to_string(),
        }
    }
}

/// Get the config directory path for this app
pub fn get_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        return Some(PathBuf::from(dir));
    }

    ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
        .map(|dirs| dirs.config_dir().to_path_buf())
}

impl Settings {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        get_config_dir().map(|dir| dir.join(CONFIG_FILE))
    }

    /// Load settings from the default location.
    ///
    /// Fallback policy: a missing, unreadable or malformed file means "no prior
    /// settings" and yields [`Settings::default`]. This never fails.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::debug!("No config directory available, using default settings");
                Self::default()
            }
        }
    }

    /// Load settings from an explicit path, with the same fallback policy as [`Settings::load`]
    pub fn load_from(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!("No settings at {:?} ({}), using defaults", path, e);
                return Self::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Ignoring malformed settings file {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Save settings to the default location, overwriting the previous file
    pub fn save(&self) -> Result<(), AppMetaError> {
        let path = Self::config_path().ok_or_else(|| AppMetaError::ConfigIo {
            path: PathBuf::from(CONFIG_FILE),
            source: std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no config directory available",
            ),
        })?;
        self.save_to(&path)
    }

    /// Save settings to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<(), AppMetaError> {
        let io_err = |source: std::io::Error| AppMetaError::ConfigIo {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| io_err(e.into()))?;
        fs::write(path, json).map_err(io_err)?;

        tracing::info!("Settings saved to {:?}", path);
        Ok(())
    }
}

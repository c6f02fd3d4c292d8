// ============================================================================
// Configuration
// ============================================================================
// Optional config.json next to the log file. Missing or broken files fall
// back to the defaults; NASA_API_KEY overrides the stored key.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::apod::{DEFAULT_API_KEY, DEFAULT_API_URL};
use crate::error::{ApodError, Result};

pub const CONFIG_FILE: &str = "config.json";
pub const API_KEY_ENV: &str = "NASA_API_KEY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: String,
    pub api_url: String,
    pub set_wallpaper: bool,
    /// Treat a non-zero PowerShell exit as a failed run.
    pub fail_on_wallpaper_error: bool,
    pub show_progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_key: DEFAULT_API_KEY.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            set_wallpaper: true,
            fail_on_wallpaper_error: false,
            show_progress: true,
        }
    }
}

impl Config {
    pub fn path_in(config_dir: &Path) -> PathBuf {
        config_dir.join(CONFIG_FILE)
    }

    pub fn load(path: &Path) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Apply the API key from the environment, ignoring empty values.
    pub fn with_env_key(mut self, env_key: Option<String>) -> Self {
        if let Some(key) = env_key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty()) {
            self.api_key = key;
        }
        self
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| ApodError::io("cannot create config directory", dir, e))?;
        }
        let json = serde_json::to_string_pretty(self).map_err(ApodError::ConfigEncode)?;
        fs::write(path, json).map_err(|e| ApodError::io("cannot write config file", path, e))
    }

    /// Pretty JSON with the API key masked.
    pub fn display_json(&self) -> String {
        let mut shown = self.clone();
        if shown.api_key != DEFAULT_API_KEY {
            shown.api_key = mask(&shown.api_key);
        }
        serde_json::to_string_pretty(&shown).unwrap_or_default()
    }
}

fn mask(key: &str) -> String {
    let visible: String = key.chars().take(4).collect();
    format!("{}{}", visible, "*".repeat(key.chars().count().saturating_sub(4)))
}

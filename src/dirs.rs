// ============================================================================
// Directory Preparation
// ============================================================================
// Wallpapers land in <home>/Desktop/NasaBilder, the config and log file in
// <config dir>/NasaApod.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ApodError, Result};

pub const TARGET_FOLDER: &str = "NasaBilder";
pub const APP_FOLDER: &str = "NasaApod";

/// Home directory of the current user.
pub fn home_dir() -> Result<PathBuf> {
    home_dir_from(|key| env::var_os(key))
}

fn home_dir_from(lookup: impl Fn(&str) -> Option<OsString>) -> Result<PathBuf> {
    ["USERPROFILE", "HOME"]
        .iter()
        .filter_map(|key| lookup(key))
        .find(|value| !value.is_empty())
        .map(PathBuf::from)
        .ok_or(ApodError::HomeDirUnavailable)
}

pub fn target_dir(home: &Path) -> PathBuf {
    home.join("Desktop").join(TARGET_FOLDER)
}

/// Creates `dir` and every missing parent. Succeeds silently if it already exists.
pub fn prepare_target_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| ApodError::io("cannot create target directory", dir, e))
}

/// Directory holding config.json and apod.log.
pub fn app_config_dir(home: &Path) -> PathBuf {
    config_dir_from(home, |key| env::var_os(key))
}

fn config_dir_from(home: &Path, lookup: impl Fn(&str) -> Option<OsString>) -> PathBuf {
    let base = ["APPDATA", "XDG_CONFIG_HOME"]
        .iter()
        .filter_map(|key| lookup(key))
        .find(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| home.join(".config"));
    base.join(APP_FOLDER)
}

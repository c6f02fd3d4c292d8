// ============================================================================
// Wallpaper Setting
// ============================================================================
// On Windows the wallpaper is set without admin rights: PowerShell writes the
// per-user registry value and asks user32 to reload the desktop parameters.
// Every other platform gets a no-op setter.

use std::path::Path;
use std::process::Command;

use crate::error::{ApodError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WallpaperStatus {
    Applied,
    Skipped { reason: &'static str },
    Failed { code: i32 },
}

pub trait WallpaperSetter {
    fn name(&self) -> &'static str;

    fn apply(&self, image_path: &Path) -> Result<WallpaperStatus>;
}

/// Platform check, e.g. with `std::env::consts::OS`.
pub fn is_windows(platform: &str) -> bool {
    platform.to_lowercase().contains("windows")
}

pub fn detect(platform: &str) -> Box<dyn WallpaperSetter> {
    if is_windows(platform) {
        Box::new(PowerShellWallpaper)
    } else {
        Box::new(Unsupported)
    }
}

/// Registry update plus settings refresh as one PowerShell command.
pub fn powershell_script(image_path: &Path) -> String {
    // PowerShell '...' strings escape a quote by doubling it
    let path = image_path.to_string_lossy().replace('\'', "''");
    format!(
        "Set-ItemProperty -Path 'HKCU:\\Control Panel\\Desktop' -Name wallpaper -Value '{}'; \
         rundll32.exe user32.dll,UpdatePerUserSystemParameters",
        path
    )
}

pub fn powershell_args(image_path: &Path) -> Vec<String> {
    vec![
        "-NoProfile".to_string(),
        "-ExecutionPolicy".to_string(),
        "Bypass".to_string(),
        "-Command".to_string(),
        powershell_script(image_path),
    ]
}

pub struct PowerShellWallpaper;

impl WallpaperSetter for PowerShellWallpaper {
    fn name(&self) -> &'static str {
        "PowerShell registry update"
    }

    fn apply(&self, image_path: &Path) -> Result<WallpaperStatus> {
        let absolute = std::path::absolute(image_path)
            .map_err(|e| ApodError::io("cannot resolve wallpaper path", image_path, e))?;

        // stdout/stderr stay attached to our console
        let status = Command::new("powershell")
            .args(powershell_args(&absolute))
            .status()
            .map_err(ApodError::WallpaperSpawn)?;

        if status.success() {
            Ok(WallpaperStatus::Applied)
        } else {
            Ok(WallpaperStatus::Failed {
                code: status.code().unwrap_or(-1),
            })
        }
    }
}

pub struct Unsupported;

impl WallpaperSetter for Unsupported {
    fn name(&self) -> &'static str {
        "unsupported platform"
    }

    fn apply(&self, _image_path: &Path) -> Result<WallpaperStatus> {
        Ok(WallpaperStatus::Skipped {
            reason: "no Windows system detected",
        })
    }
}

/// Selected when the configuration turns wallpaper setting off.
pub struct Disabled;

impl WallpaperSetter for Disabled {
    fn name(&self) -> &'static str {
        "disabled"
    }

    fn apply(&self, _image_path: &Path) -> Result<WallpaperStatus> {
        Ok(WallpaperStatus::Skipped {
            reason: "wallpaper setting is disabled",
        })
    }
}

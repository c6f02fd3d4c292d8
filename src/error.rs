// ============================================================================
// Error Types
// ============================================================================

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApodError>;

#[derive(Debug, Error)]
pub enum ApodError {
    #[error("cannot find home directory (USERPROFILE and HOME are unset)")]
    HomeDirUnavailable,

    #[error("{context}: {}", path.display())]
    Io {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{url} answered with HTTP status {status}")]
    Http { url: String, status: u16 },

    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("transfer from {url} interrupted")]
    Transfer {
        url: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON")]
    Json(#[from] serde_json::Error),

    #[error("cannot serialize configuration")]
    ConfigEncode(#[source] serde_json::Error),

    #[error("field \"{0}\" not found in APOD response")]
    MissingField(String),

    #[error("field \"{0}\" in APOD response is not a string")]
    NotAString(String),

    #[error("could not start PowerShell to set the wallpaper")]
    WallpaperSpawn(#[source] io::Error),

    #[error("PowerShell exited with code {code} while setting the wallpaper")]
    Wallpaper { code: i32 },
}

impl ApodError {
    pub fn io(context: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        ApodError::Io {
            context,
            path: path.into(),
            source,
        }
    }

    /// `url` must already be safe to print; the URL inside `source` is dropped.
    pub fn transport(url: &str, source: reqwest::Error) -> Self {
        ApodError::Transport {
            url: url.to_string(),
            source: source.without_url(),
        }
    }
}

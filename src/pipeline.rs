// ============================================================================
// APOD Pipeline
// ============================================================================
// prepare dir -> fetch metadata -> media gate -> file name -> download -> wallpaper

use std::path::PathBuf;

use chrono::NaiveDate;
use reqwest::blocking::Client;

use crate::apod::fetch_metadata;
use crate::dirs::prepare_target_dir;
use crate::download::download_to;
use crate::error::{ApodError, Result};
use crate::extract::parse_metadata;
use crate::logging::Logger;
use crate::progress::mb;
use crate::sanitize::target_file_name;
use crate::wallpaper::{WallpaperSetter, WallpaperStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Saved {
        path: PathBuf,
        bytes: u64,
        wallpaper: WallpaperStatus,
    },
    /// Not an error: video and other days simply produce no file.
    NotAnImage { media_type: String },
}

pub struct Pipeline<'a> {
    pub client: Client,
    pub metadata_url: String,
    pub target_dir: PathBuf,
    pub today: NaiveDate,
    pub setter: &'a dyn WallpaperSetter,
    pub fail_on_wallpaper_error: bool,
    pub show_progress: bool,
    pub logger: &'a Logger,
}

impl Pipeline<'_> {
    pub fn run(&self) -> Result<RunOutcome> {
        let log = self.logger;

        prepare_target_dir(&self.target_dir)?;
        log.info(&format!("Target folder: {}", self.target_dir.display()));

        let body = fetch_metadata(&self.client, &self.metadata_url)?;
        log.success("APOD metadata received");

        let meta = parse_metadata(&body)?;
        if !meta.is_image() {
            log.info(&format!("Today's APOD is not an image (media_type={})", meta.media_type));
            return Ok(RunOutcome::NotAnImage {
                media_type: meta.media_type,
            });
        }

        let hd_url = meta.require_hd_url()?;
        let path = self
            .target_dir
            .join(target_file_name(self.today, meta.title.as_deref()));

        log.info(&format!("Title  : {}", meta.title.as_deref().unwrap_or("-")));
        log.info(&format!("HD URL : {}", hd_url));
        log.info(&format!("Saving to {}", path.display()));

        let bytes = download_to(&self.client, hd_url, &path, self.show_progress)?;
        log.success(&format!("Downloaded ({:.2} MB)", mb(bytes)));

        log.info(&format!("Setting wallpaper via {}", self.setter.name()));
        let wallpaper = self.setter.apply(&path)?;
        match &wallpaper {
            WallpaperStatus::Applied => log.success("Wallpaper set"),
            WallpaperStatus::Skipped { reason } => {
                log.info(&format!("Wallpaper not set: {}", reason))
            }
            WallpaperStatus::Failed { code } => {
                if self.fail_on_wallpaper_error {
                    return Err(ApodError::Wallpaper { code: *code });
                }
                log.warn(&format!("PowerShell exited with code {} while setting the wallpaper", code));
            }
        }

        Ok(RunOutcome::Saved {
            path,
            bytes,
            wallpaper,
        })
    }
}

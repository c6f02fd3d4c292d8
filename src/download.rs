// ============================================================================
// Image Downloader
// ============================================================================

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use reqwest::blocking::Client;
use reqwest::StatusCode;

use crate::error::{ApodError, Result};
use crate::progress::{clear_progress_line, print_progress_bar};

const CHUNK_SIZE: usize = 8192;

/// Stream `url` into `target`, replacing any existing file.
/// Returns the number of bytes written. A failed transfer may leave a
/// truncated file behind.
pub fn download_to(client: &Client, url: &str, target: &Path, show_progress: bool) -> Result<u64> {
    let mut response = client
        .get(url)
        .send()
        .map_err(|e| ApodError::transport(url, e))?;

    if response.status() != StatusCode::OK {
        return Err(ApodError::Http {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }

    let total = response.content_length().unwrap_or(0);
    let show_progress = show_progress && total > 0;

    let mut file = File::create(target).map_err(|e| ApodError::io("cannot create image file", target, e))?;
    let mut chunk = vec![0u8; CHUNK_SIZE];
    let mut written = 0u64;

    loop {
        let n = match response.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) => {
                if show_progress {
                    clear_progress_line();
                }
                return Err(ApodError::Transfer {
                    url: url.to_string(),
                    source: e,
                });
            }
        };

        file.write_all(&chunk[..n])
            .map_err(|e| ApodError::io("cannot write image file", target, e))?;
        written += n as u64;

        if show_progress {
            print_progress_bar(written, total);
        }
    }

    file.flush().map_err(|e| ApodError::io("cannot write image file", target, e))?;
    if show_progress {
        clear_progress_line();
    }

    Ok(written)
}

// ============================================================================
// NASA APOD API
// ============================================================================
// Base URL: https://api.nasa.gov/planetary/apod
// API Key: REQUIRED as query parameter (DEMO_KEY works with a low rate limit)
// ============================================================================

use reqwest::blocking::{Client, ClientBuilder};
use reqwest::redirect::Policy;
use reqwest::StatusCode;

use crate::error::{ApodError, Result};

pub const DEFAULT_API_URL: &str = "https://api.nasa.gov/planetary/apod";
pub const DEFAULT_API_KEY: &str = "DEMO_KEY";

const USER_AGENT: &str = concat!("apod-wallpaper/", env!("CARGO_PKG_VERSION"));

/// Settings shared by the metadata and image requests.
/// No request timeout: each call blocks until the server finishes or fails.
/// Redirects are not followed, so a 3xx answer fails like any other non-200.
pub fn client_builder() -> ClientBuilder {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(None::<std::time::Duration>)
        .redirect(Policy::none())
}

pub fn build_client() -> Result<Client> {
    client_builder()
        .build()
        .map_err(|e| ApodError::transport("HTTP client setup", e))
}

/// Build the metadata URL with the API key as query parameter
pub fn metadata_url(base: &str, api_key: &str) -> String {
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{}{}api_key={}", base, separator, urlencoding::encode(api_key))
}

/// One GET against the metadata endpoint; anything but 200 is fatal.
pub fn fetch_metadata(client: &Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .send()
        .map_err(|e| ApodError::transport(redact(url), e))?;

    if response.status() != StatusCode::OK {
        return Err(ApodError::Http {
            url: redact(url).to_string(),
            status: response.status().as_u16(),
        });
    }

    response.text().map_err(|e| ApodError::transport(redact(url), e))
}

// Keeps the API key out of console and log output.
fn redact(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

// ============================================================================
// Field Extraction
// ============================================================================
// Only three top-level string fields of the APOD response are consumed.
// Video days carry no `hdurl`, so it stays optional until the media gate.

use serde_json::Value;

use crate::error::{ApodError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApodMetadata {
    pub media_type: String,
    pub title: Option<String>,
    pub hd_url: Option<String>,
}

impl ApodMetadata {
    pub fn is_image(&self) -> bool {
        self.media_type.eq_ignore_ascii_case("image")
    }

    /// The HD image URL, required once the entry is known to be an image.
    pub fn require_hd_url(&self) -> Result<&str> {
        self.hd_url
            .as_deref()
            .ok_or_else(|| ApodError::MissingField("hdurl".to_string()))
    }
}

pub fn parse_metadata(text: &str) -> Result<ApodMetadata> {
    let value: Value = serde_json::from_str(text)?;
    Ok(ApodMetadata {
        media_type: string_field(&value, "media_type")?,
        title: optional_string_field(&value, "title")?,
        hd_url: optional_string_field(&value, "hdurl")?,
    })
}

/// Value of the top-level string field `name`.
pub fn string_field(value: &Value, name: &str) -> Result<String> {
    optional_string_field(value, name)?.ok_or_else(|| ApodError::MissingField(name.to_string()))
}

// null counts as absent
fn optional_string_field(value: &Value, name: &str) -> Result<Option<String>> {
    match value.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ApodError::NotAString(name.to_string())),
    }
}

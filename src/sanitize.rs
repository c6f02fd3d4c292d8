// ============================================================================
// Filename Sanitizer
// ============================================================================

use chrono::NaiveDate;

/// Used when the APOD entry has no title, or nothing is left after sanitizing.
pub const UNTITLED: &str = "Untitled";

/// Characters Windows refuses in file names.
const ILLEGAL_CHARS: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Strip characters that are illegal in file names, then trim whitespace.
pub fn sanitize_title(title: Option<&str>) -> String {
    let cleaned: String = title
        .unwrap_or_default()
        .chars()
        .filter(|c| !ILLEGAL_CHARS.contains(c))
        .collect();

    match cleaned.trim() {
        "" => UNTITLED.to_string(),
        trimmed => trimmed.to_string(),
    }
}

/// `<YYYY-MM-DD> - <sanitized title>.jpg`
pub fn target_file_name(date: NaiveDate, title: Option<&str>) -> String {
    format!("{} - {}.jpg", date.format("%Y-%m-%d"), sanitize_title(title))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_every_illegal_char() {
        let dirty = r#"a\b/c:d*e?f"g<h>i|j"#;
        let clean = sanitize_title(Some(dirty));
        assert_eq!(clean, "abcdefghij");
        assert!(!clean.chars().any(|c| ILLEGAL_CHARS.contains(&c)));
    }

    #[test]
    fn trims_after_removal() {
        assert_eq!(sanitize_title(Some("  M31: Andromeda?  ")), "M31 Andromeda");
        assert_eq!(sanitize_title(Some("| Orion |")), "Orion");
    }

    #[test]
    fn clean_title_is_unchanged() {
        let once = sanitize_title(Some("Crab Nebula"));
        assert_eq!(once, "Crab Nebula");
        assert_eq!(sanitize_title(Some(&once)), once);
    }

    #[test]
    fn sanitizing_is_idempotent() {
        for title in ["NGC 1300: Spiral <Galaxy>", "  ?? ", "Saturn / Rings", "Ä é 星"] {
            let once = sanitize_title(Some(title));
            assert_eq!(sanitize_title(Some(&once)), once, "input: {title:?}");
        }
    }

    #[test]
    fn missing_or_empty_title_uses_placeholder() {
        assert_eq!(sanitize_title(None), UNTITLED);
        assert_eq!(sanitize_title(Some("")), UNTITLED);
        assert_eq!(sanitize_title(Some(" :*? ")), UNTITLED);
    }

    #[test]
    fn keeps_unicode_and_length() {
        let long = "Sternbild ".repeat(40);
        assert_eq!(sanitize_title(Some(&long)), long.trim());
        assert_eq!(sanitize_title(Some("Komet Ä")), "Komet Ä");
    }

    #[test]
    fn file_name_combines_date_and_title() {
        let date = NaiveDate::from_ymd_opt(2025, 11, 21).unwrap();
        assert_eq!(
            target_file_name(date, Some("Crab Nebula")),
            "2025-11-21 - Crab Nebula.jpg"
        );
        assert_eq!(target_file_name(date, None), "2025-11-21 - Untitled.jpg");
    }
}

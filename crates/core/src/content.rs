//! Content-kind constants and validation for library items.
//!
//! Kind names must match the CHECK constraint in
//! `20260301000002_create_content_items_table.sql`.

/// A PDF document.
pub const KIND_PDF: &str = "pdf";

/// A video file.
pub const KIND_VIDEO: &str = "video";

/// An audio file.
pub const KIND_AUDIO: &str = "audio";

/// Any other document format (docx, pptx, plain text).
pub const KIND_DOCUMENT: &str = "document";

/// All valid content kinds.
pub const VALID_KINDS: &[&str] = &[KIND_PDF, KIND_VIDEO, KIND_AUDIO, KIND_DOCUMENT];

/// Maximum title length in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// Validate that a content kind is one of the accepted values.
pub fn validate_kind(kind: &str) -> Result<(), String> {
    if VALID_KINDS.contains(&kind) {
        Ok(())
    } else {
        Err(format!(
            "Invalid content kind '{kind}'. Must be one of: {}",
            VALID_KINDS.join(", ")
        ))
    }
}

/// Validate a content title: non-empty after trimming, within length limits.
pub fn validate_title(title: &str) -> Result<(), String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err("Title must not be empty".to_string());
    }
    if trimmed.chars().count() > MAX_TITLE_LEN {
        return Err(format!(
            "Title must be at most {MAX_TITLE_LEN} characters long"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_kinds_accepted() {
        for kind in VALID_KINDS {
            assert!(validate_kind(kind).is_ok());
        }
    }

    #[test]
    fn test_invalid_kind_rejected() {
        let result = validate_kind("spreadsheet");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid content kind"));
    }

    #[test]
    fn test_empty_kind_rejected() {
        assert!(validate_kind("").is_err());
    }

    #[test]
    fn test_title_accepted() {
        assert!(validate_title("Integrated Pest Management for Rice").is_ok());
    }

    #[test]
    fn test_blank_title_rejected() {
        assert!(validate_title("   ").is_err());
    }

    #[test]
    fn test_overlong_title_rejected() {
        let title = "x".repeat(MAX_TITLE_LEN + 1);
        let result = validate_title(&title);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("at most"));
    }
}

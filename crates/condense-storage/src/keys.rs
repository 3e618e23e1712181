//! Storage key generation.
//!
//! Keys are unique per upload so concurrent uploads of the same filename
//! never collide; the original filename only contributes its extension.

use std::path::Path;
use uuid::Uuid;

/// Generate a unique storage key for an uploaded file, preserving the
/// lowercase extension: `uploads/{uuid}.{ext}`.
pub fn key_for_filename(filename: &str) -> String {
    let extension = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_else(|| "bin".to_string());
    format!("uploads/{}.{}", Uuid::new_v4(), extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_extension_lowercase() {
        let key = key_for_filename("Report.PDF");
        assert!(key.starts_with("uploads/"));
        assert!(key.ends_with(".pdf"));
    }

    #[test]
    fn falls_back_without_extension() {
        assert!(key_for_filename("report").ends_with(".bin"));
    }

    #[test]
    fn keys_are_unique() {
        assert_ne!(key_for_filename("a.pdf"), key_for_filename("a.pdf"));
    }
}

//! Content-type to file-extension mapping
//!
//! Pure table lookup used when naming materialized files. Unknown types
//! degrade gracefully to an extensionless filename; there is no error path.

/// Maps a content type to the canonical extension for materialized copies
///
/// Every `image/*` subtype maps to `.jpg` regardless of the actual image
/// format; the extension is table-driven, not format-derived.
#[must_use]
pub fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        t if t.starts_with("image/") => ".jpg",
        "application/pdf" => ".pdf",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => ".docx",
        "application/msword" => ".doc",
        "text/plain" => ".txt",
        _ => "",
    }
}

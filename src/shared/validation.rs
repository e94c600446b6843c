use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Characters not allowed in a stored upload filename
    pub static ref UNSAFE_FILENAME_CHARS: Regex = Regex::new(r"[^A-Za-z0-9_.-]").unwrap();

    /// Runs of whitespace, collapsed to a single underscore
    pub static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Fallback name for uploads whose filename sanitizes to nothing
pub const FALLBACK_FILENAME: &str = "image";

/// Reduce a client-supplied filename to a safe ASCII basename.
///
/// - Directory components are dropped ("../../etc/passwd" -> "passwd")
/// - Whitespace becomes `_`, other characters outside `[A-Za-z0-9_.-]` are removed
/// - Leading/trailing dots and underscores are trimmed
pub fn sanitize_filename(raw: &str) -> String {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or("");
    let spaced = WHITESPACE_RUN.replace_all(base.trim(), "_");
    let cleaned = UNSAFE_FILENAME_CHARS.replace_all(&spaced, "");
    let trimmed = cleaned.trim_matches(|c| c == '.' || c == '_');

    if trimmed.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        trimmed.to_string()
    }
}

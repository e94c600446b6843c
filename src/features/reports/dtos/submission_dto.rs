use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::reports::models::CreateReportImage;

/// Allowed MIME types for complaint photos
pub const ALLOWED_IMAGE_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Maximum size of a single photo in bytes (10MB)
pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

/// Check if a MIME type is allowed for a complaint photo
pub fn is_image_mime_type_allowed(content_type: &str) -> bool {
    ALLOWED_IMAGE_MIME_TYPES.contains(&content_type)
}

/// Complaint parsed from the `/submit_complaint` multipart form
#[derive(Debug, Default, Validate)]
pub struct SubmitComplaintDto {
    /// Submitting user, 0 when anonymous
    pub user_id: i32,
    #[validate(length(max = 100, message = "Category must be at most 100 characters"))]
    pub category: Option<String>,
    pub severity: i32,
    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,
    /// Falls back to the configured default location when absent
    #[validate(length(max = 255, message = "Location must be at most 255 characters"))]
    pub location: Option<String>,
    pub images: Vec<CreateReportImage>,
}

/// Parse an optional whole-number form field; blank means 0.
pub fn parse_form_int(field: &str, raw: &str) -> Result<i32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }

    trimmed
        .parse::<i32>()
        .map_err(|_| AppError::BadRequest(format!("{} must be a whole number", field)))
}

/// Treat blank form text as missing
pub fn non_blank(raw: String) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
